//! The update stamp and the convergence loop.
//!
//! The stamp replaces a free cell by the mean of its N, S, E, W neighbours:
//! ```text
//!   N
//! W X E
//!   S
//! ```
//! Cells are overwritten in place while sweeping, so a neighbour visited
//! earlier in the same sweep contributes its new value (Gauss–Seidel, not
//! Jacobi). Convergence rate and the exact trajectory depend on this.

use super::compass::step;
use super::{Grid, SolveCfg, SolveReport};

impl Grid {
    /// One sweep over the strictly interior cells. Returns the largest change.
    ///
    /// Order: outer loop west to east, inner loop south to north.
    pub fn update(&mut self) -> f64 {
        let c = self.compass;
        let mut max_delta = 0.0f64;
        for x in c.east_interior() {
            for y in c.north_interior() {
                if !self.do_update[(x, y)] {
                    continue;
                }
                let old_v = self.v[(x, y)];
                let new_v = (self.v[(step(x, c.go_west), y)]
                    + self.v[(step(x, c.go_east), y)]
                    + self.v[(x, step(y, c.go_north))]
                    + self.v[(x, step(y, c.go_south))])
                    / 4.0;
                max_delta = max_delta.max((new_v - old_v).abs());
                self.v[(x, y)] = new_v;
            }
        }
        self.max_delta_v = max_delta;
        max_delta
    }

    /// Sweep until the largest change is within `cfg.accuracy_v` or
    /// `cfg.max_iterations` sweeps have run. At least one sweep always runs.
    ///
    /// Hitting the cap is not an error: check `err_not_converged` or the report.
    pub fn solve(&mut self, cfg: SolveCfg) -> SolveReport {
        self.max_delta_v = 0.0;
        self.err_not_converged = false;
        self.update();
        let mut iteration_count = 1usize;
        tracing::debug!(sweep = iteration_count, max_delta_v = self.max_delta_v, "sweep");
        while self.max_delta_v > cfg.accuracy_v && iteration_count < cfg.max_iterations {
            self.update();
            iteration_count += 1;
            tracing::debug!(sweep = iteration_count, max_delta_v = self.max_delta_v, "sweep");
        }
        self.err_not_converged = self.max_delta_v > cfg.accuracy_v;
        self.iteration_count = iteration_count;

        let report = SolveReport {
            iterations: iteration_count,
            max_delta_v: self.max_delta_v,
            converged: !self.err_not_converged,
        };
        tracing::info!(
            iterations = report.iterations,
            max_delta_v = report.max_delta_v,
            converged = report.converged,
            "solve"
        );
        report
    }

    /// `solve` with the default accuracy (0.1 V) and cap (9 sweeps).
    pub fn solve_default(&mut self) -> SolveReport {
        self.solve(SolveCfg::default())
    }
}
