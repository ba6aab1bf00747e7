use super::*;
use crate::poly::Poly;
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-12, "{a} != {b}");
}

fn check_fresh(g: &Grid) {
    for x in 0..g.nx() {
        for y in 0..g.ny() {
            assert_eq!(g.potential(x, y), 0.0, "({x},{y})");
            let on_wall = x == 0 || y == 0 || x == g.nx() - 1 || y == g.ny() - 1;
            assert_eq!(g.is_updatable(x, y), !on_wall, "({x},{y})");
        }
    }
}

#[test]
fn too_small_is_rejected() {
    assert_eq!(Grid::new(2, 5).unwrap_err(), GridError::TooSmall { nx: 2, ny: 5 });
    assert_eq!(Grid::new(5, 2).unwrap_err(), GridError::TooSmall { nx: 5, ny: 2 });
    assert!(Grid::new(0, 0).is_err());
    assert!(Grid::new(3, 3).is_ok());
}

#[test]
fn fresh_grid_has_zero_walls_and_free_interior() {
    let g = Grid::new(5, 5).unwrap();
    check_fresh(&g);
    assert_eq!(g.orientation(), Orientation::SouthIsZero);
    assert_eq!(g.iteration_count(), 0);
    assert!(!g.err_not_converged());
}

#[test]
fn walls_corners_and_centre_point() {
    let mut g = Grid::new(5, 5).unwrap();
    g.fix_v(2, 2, 10.0).unwrap();
    g.fix_wall("n", 5.0).unwrap();
    g.fix_wall("s", 10.0).unwrap();
    g.fix_wall("e", 15.0).unwrap();
    g.fix_wall("w", 20.0).unwrap();

    for i in 1..4 {
        assert_close(g.potential(i, 4), 5.0);
        assert_close(g.potential(i, 0), 10.0);
        assert_close(g.potential(4, i), 15.0);
        assert_close(g.potential(0, i), 20.0);
    }
    assert_close(g.potential(0, 4), 12.5); // NW
    assert_close(g.potential(0, 0), 15.0); // SW
    assert_close(g.potential(4, 4), 10.0); // NE
    assert_close(g.potential(4, 0), 12.5); // SE
    assert_close(g.potential(2, 2), 10.0);
    assert!(!g.is_updatable(2, 2));
    assert!(g.is_updatable(1, 1));
    assert_close(g.potential(1, 1), 0.0);
}

#[test]
fn corners_track_latest_wall_values() {
    let mut g = Grid::new(6, 4).unwrap();
    g.fix_wall("N", 8.0).unwrap();
    g.fix_wall("West", -2.0).unwrap();
    assert_close(g.potential(0, 3), 3.0);
    g.fix_wall("north", 4.0).unwrap();
    assert_close(g.potential(0, 3), 1.0);
    // Untouched south wall keeps the SW corner at the mean of 0 and -2.
    assert_close(g.potential(0, 0), -1.0);
}

#[test]
fn unknown_wall_fails_without_mutation() {
    let mut g = Grid::new(5, 7).unwrap();
    g.fix_wall("e", 3.0).unwrap();
    let before = g.clone();
    for bad in ["", "up", "x", "?north"] {
        let err = g.fix_wall(bad, 99.0).unwrap_err();
        assert_eq!(err, GridError::UnknownWall(bad.to_string()));
        assert_eq!(g.v(), before.v());
        assert_eq!(g.do_update(), before.do_update());
    }
}

#[test]
fn unknown_wall_still_recomputes_corners() {
    let mut g = Grid::new(5, 5).unwrap();
    g.fix_wall("n", 6.0).unwrap();
    // Stale corner: overwrite the north wall neighbour by hand.
    g.fix_v(1, 4, 2.0).unwrap();
    assert!(g.fix_wall("q", 1.0).is_err());
    assert_close(g.potential(0, 4), 1.0);
}

#[test]
fn fixing_a_corner_is_rejected_everywhere() {
    for orientation in [Orientation::SouthIsZero, Orientation::NorthIsZero] {
        for (nx, ny) in [(3, 3), (4, 7), (9, 5)] {
            let mut g = Grid::with_orientation(nx, ny, orientation).unwrap();
            let before = g.clone();
            for (x, y) in [(0, 0), (0, ny - 1), (nx - 1, 0), (nx - 1, ny - 1)] {
                assert!(g.is_corner(x, y));
                assert_eq!(g.fix_v(x, y, 1.0), Err(GridError::CornerFix { x, y }));
            }
            assert_eq!(g.v(), before.v());
            assert_eq!(g.do_update(), before.do_update());
        }
    }
}

#[test]
fn out_of_bounds_cells_are_rejected() {
    let mut g = Grid::new(4, 3).unwrap();
    assert_eq!(
        g.fix_v(4, 1, 1.0),
        Err(GridError::OutOfBounds { x: 4, y: 1, nx: 4, ny: 3 })
    );
    assert!(g.float_v(1, 3).is_err());
}

#[test]
fn floated_cell_keeps_value_until_next_sweep() {
    let mut g = Grid::new(5, 5).unwrap();
    g.fix_v(2, 2, 10.0).unwrap();
    g.float_v(2, 2).unwrap();
    assert!(g.is_updatable(2, 2));
    assert_close(g.potential(2, 2), 10.0);
    g.update();
    // Neighbours at (2,1) and (1,2) were swept first and picked up 2.5 each.
    assert_close(g.potential(2, 1), 2.5);
    assert_close(g.potential(1, 2), 2.5);
    assert_close(g.potential(2, 2), 1.25);
}

#[test]
fn floating_a_wall_cell_lets_it_keep_its_value() {
    // The stamp never visits walls, so a floated wall cell is simply left alone.
    let mut g = Grid::new(5, 5).unwrap();
    g.fix_wall("s", 7.0).unwrap();
    g.float_v(2, 0).unwrap();
    g.update();
    assert_close(g.potential(2, 0), 7.0);
}

#[test]
fn sweep_is_in_place() {
    // 5x3: a single interior row under a 4 V north wall.
    let mut g = Grid::new(5, 3).unwrap();
    g.fix_wall("n", 4.0).unwrap();
    let max_delta = g.update();
    assert_close(g.potential(1, 1), 1.0);
    // Later cells see the already-updated west neighbour (Jacobi would give 1.0).
    assert_close(g.potential(2, 1), 1.25);
    assert_close(g.potential(3, 1), 1.3125);
    assert_close(max_delta, 1.3125);
    assert_close(g.max_delta_v(), 1.3125);
}

#[test]
fn default_grid_converges_in_one_sweep() {
    let mut g = Grid::new(5, 5).unwrap();
    let report = g.solve_default();
    assert_eq!(report.iterations, 1);
    assert_eq!(report.max_delta_v, 0.0);
    assert!(report.converged);
    assert!(!g.err_not_converged());
    check_fresh(&g);
}

#[test]
fn capacitor_converges_within_twenty_sweeps() {
    let mut g = Grid::new(25, 25).unwrap();
    for x in 2..12 {
        g.fix_v(x, 16, 10.0).unwrap();
        g.fix_v(x, 8, -10.0).unwrap();
    }
    let report = g.solve(SolveCfg::new(0.1, 20));
    assert!(!g.err_not_converged(), "{report:?}");
    assert!(report.iterations <= 20);
    assert!(report.max_delta_v <= 0.1);
}

#[test]
fn cap_reached_sets_not_converged() {
    let mut g = Grid::new(25, 25).unwrap();
    g.fix_wall("n", 100.0).unwrap();
    let report = g.solve(SolveCfg::new(1e-9, 3));
    assert_eq!(report.iterations, 3);
    assert_eq!(g.iteration_count(), 3);
    assert!(g.err_not_converged());
    assert!(!report.converged);
    assert!(g.max_delta_v() > 1e-9);

    // A zero cap still runs the unconditional first sweep.
    let report = g.solve(SolveCfg::new(1e-9, 0));
    assert_eq!(report.iterations, 1);
}

#[test]
fn north_is_zero_mirrors_south_is_zero() {
    let (nx, ny) = (7, 6);
    let mut s = Grid::with_orientation(nx, ny, Orientation::SouthIsZero).unwrap();
    let mut n = Grid::with_orientation(nx, ny, Orientation::NorthIsZero).unwrap();
    for g in [&mut s, &mut n] {
        g.fix_wall("n", 10.0).unwrap();
        g.fix_wall("e", -4.0).unwrap();
    }
    s.fix_v(2, 1, 3.0).unwrap();
    n.fix_v(2, ny - 2, 3.0).unwrap();
    let rs = s.solve(SolveCfg::new(1e-6, 50));
    let rn = n.solve(SolveCfg::new(1e-6, 50));
    assert_eq!(rs.iterations, rn.iterations);
    for x in 0..nx {
        for y in 0..ny {
            assert_close(s.potential(x, y), n.potential(x, ny - 1 - y));
        }
    }
    // The north wall sits at index 0 in the flipped grid.
    assert_close(n.potential(3, 0), 10.0);
}

#[test]
fn polygon_may_cover_corners() {
    let mut g = Grid::new(5, 5).unwrap();
    let all = Poly::from_pairs(&[[-1, -1], [10, -1], [10, 10], [-1, 10]]);
    assert_eq!(g.fix_poly(&all, 7.0), 25);
    for x in 0..5 {
        for y in 0..5 {
            assert_close(g.potential(x, y), 7.0);
            assert!(!g.is_updatable(x, y));
        }
    }
    // Floating only releases interior cells.
    assert_eq!(g.float_poly(&all), 9);
    assert!(g.is_updatable(2, 2));
    assert!(!g.is_updatable(0, 2));
    assert!(!g.is_updatable(4, 4));
    assert_close(g.potential(2, 2), 7.0);
}

#[test]
fn polygon_covers_every_cell_when_north_is_zero() {
    let mut g = Grid::with_orientation(5, 5, Orientation::NorthIsZero).unwrap();
    let all = Poly::from_pairs(&[[-1, -1], [10, -1], [10, 10], [-1, 10]]);
    assert_eq!(g.fix_poly(&all, -3.0), 25);
    for x in 0..5 {
        for y in 0..5 {
            assert_close(g.potential(x, y), -3.0);
            assert!(!g.is_updatable(x, y));
        }
    }
    assert_eq!(g.float_poly(&all), 9);
    for x in 0..5 {
        for y in 0..5 {
            let interior = (1..4).contains(&x) && (1..4).contains(&y);
            assert_eq!(g.is_updatable(x, y), interior, "({x},{y})");
        }
    }
}

#[test]
fn polygon_region_is_fixed_and_held() {
    let mut g = Grid::new(50, 50).unwrap();
    let tri = Poly::from_pairs(&[[10, 10], [30, 10], [20, 30]]);
    let sq = Poly::from_pairs(&[[35, 35], [40, 35], [40, 40], [35, 40]]);
    assert!(g.fix_poly(&tri, 50.0) > 0);
    assert!(g.fix_poly(&sq, -50.0) > 0);
    g.solve(SolveCfg::new(0.5, 40));
    assert_close(g.potential(20, 15), 50.0);
    assert_close(g.potential(38, 38), -50.0);
    assert!(!g.is_updatable(20, 15));
    // Outside both regions the field relaxed to something in between.
    let mid = g.potential(30, 30);
    assert!(mid > -50.0 && mid < 50.0);
    assert!(g.is_updatable(30, 30));
}

#[test]
fn relaxed_field_is_discrete_harmonic_and_bounded() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut g = Grid::new(12, 10).unwrap();
    let mut fixed = vec![0.0f64];
    for _ in 0..6 {
        let x = rng.gen_range(1..11);
        let y = rng.gen_range(1..9);
        let v: f64 = rng.gen_range(-20.0..20.0);
        g.fix_v(x, y, v).unwrap();
        fixed.push(v);
    }
    let report = g.solve(SolveCfg::new(1e-10, 5000));
    assert!(report.converged, "{report:?}");

    // Maximum principle: free cells stay within the range of the fixed potentials.
    let lo = fixed.iter().copied().fold(f64::INFINITY, f64::min) - 1e-9;
    let hi = fixed.iter().copied().fold(f64::NEG_INFINITY, f64::max) + 1e-9;
    for x in 1..11 {
        for y in 1..9 {
            if !g.is_updatable(x, y) {
                continue;
            }
            let v = g.potential(x, y);
            let mean = (g.potential(x - 1, y)
                + g.potential(x + 1, y)
                + g.potential(x, y - 1)
                + g.potential(x, y + 1))
                / 4.0;
            assert!((v - mean).abs() < 1e-6, "({x},{y}) residual {}", v - mean);
            assert!(v >= lo && v <= hi);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]

    #[test]
    fn fresh_grids_of_any_size(nx in 3usize..16, ny in 3usize..16, south in any::<bool>()) {
        let g = Grid::with_orientation(nx, ny, Orientation::from_south_is_zero(south)).unwrap();
        check_fresh(&g);
        prop_assert!(g.is_corner(0, 0) && g.is_corner(nx - 1, ny - 1));
    }

    #[test]
    fn solve_respects_cap_and_flag(
        cap in 1usize..8,
        acc in 1e-6f64..1.0,
        wall_v in -50.0f64..50.0,
        px in 1usize..9, py in 1usize..9,
        pv in -50.0f64..50.0,
    ) {
        let mut g = Grid::new(10, 10).unwrap();
        g.fix_wall("w", wall_v).unwrap();
        g.fix_v(px, py, pv).unwrap();
        let report = g.solve(SolveCfg::new(acc, cap));
        prop_assert!(report.iterations >= 1 && report.iterations <= cap);
        prop_assert_eq!(g.err_not_converged(), g.max_delta_v() > acc);
        prop_assert_eq!(report.converged, !g.err_not_converged());
    }
}
