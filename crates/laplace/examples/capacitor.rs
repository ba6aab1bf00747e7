//! Finite parallel-plate capacitor on a 25×25 grid.
//!
//! Usage:
//!   cargo run -p laplace --example capacitor -- [max_iterations]
//!
//! Prints the solve summary and the potential along the vertical centre line.

use laplace::{Grid, SolveCfg};

fn main() {
    let max_iterations = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(99);
    let mut g = Grid::new(25, 25).expect("25x25 is a valid grid");
    for x in 2..23 {
        g.fix_v(x, 16, 10.0).expect("plate cells are not corners");
        g.fix_v(x, 8, -10.0).expect("plate cells are not corners");
    }
    let report = g.solve(SolveCfg::new(0.01, max_iterations));
    let converged = if report.converged {
        "Converged"
    } else {
        "Not Converged"
    };
    println!(
        "Solution after {} iterations ({converged}) [error={:.3}V]",
        report.iterations, report.max_delta_v
    );
    for y in (0..g.ny()).rev() {
        println!("y={y:2}  V={:8.3}", g.potential(12, y));
    }
}
