//! Sequential impulse (projected Gauss-Seidel) solver over constraint rows.

use super::body::BodySet;
use super::error::Result;
use super::row::ConstraintRow;
use super::SolverConfig;

/// Summary of one solver pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverStats {
    /// Number of sweeps actually performed.
    pub iterations: u32,
    /// Whether the pass ended on the tolerance rather than the iteration cap.
    pub converged: bool,
    /// Sum of `|Δλ|` over the last sweep.
    pub last_delta: f32,
}

/// Per-row scratch for one pass.
#[derive(Debug, Clone, Copy, Default)]
struct RowState {
    bias: f32,
    effective_mass: f32,
    lambda: f32,
    active: bool,
}

/// Gauss-Seidel solver that sweeps rows in the order they are given.
///
/// Rows sharing a body see each other's impulses immediately, because every
/// call borrows the pair from the [`BodySet`] in sequence.
#[derive(Debug, Clone)]
pub struct GaussSeidelSolver {
    config: SolverConfig,
    rows: Vec<RowState>,
}

impl GaussSeidelSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            rows: Vec::new(),
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SolverConfig {
        &mut self.config
    }

    /// Accumulated multipliers of the last pass, one per row.
    pub fn impulses(&self) -> impl Iterator<Item = f32> + '_ {
        self.rows.iter().map(|row| row.lambda)
    }

    /// Run one pass over `rows` and merge the result into the body velocities.
    pub fn solve<R: ConstraintRow>(
        &mut self,
        rows: &mut [R],
        bodies: &mut BodySet,
    ) -> Result<SolverStats> {
        self.config.validate()?;

        let h = self.config.timestep;
        let params = self.config.stabilization;

        bodies.reset_deltas();
        self.rows.clear();
        self.rows.resize(rows.len(), RowState::default());

        for (row, state) in rows.iter_mut().zip(self.rows.iter_mut()) {
            let (ha, hb) = row.bodies();
            let (body_a, body_b) = bodies.pair_mut(ha, hb)?;

            state.bias = row.compute_bias(body_a, body_b, params.a, params.b, h);
            state.effective_mass = row.compute_effective_mass(body_a, body_b, params.eps);
            // Static-static pairs and degenerate rows carry no mass to move.
            state.active = state.effective_mass > 0.0;
        }

        let mut stats = SolverStats {
            iterations: 0,
            converged: false,
            last_delta: 0.0,
        };

        if rows.is_empty() {
            stats.converged = true;
            return Ok(stats);
        }

        for iteration in 0..self.config.iterations {
            let mut delta_total = 0.0;

            for (row, state) in rows.iter_mut().zip(self.rows.iter_mut()) {
                if !state.active {
                    continue;
                }
                let (ha, hb) = row.bodies();
                let (body_a, body_b) = bodies.pair_mut(ha, hb)?;

                let residual = row.velocity_residual(body_a, body_b);
                let mut delta_lambda =
                    (state.bias - residual - params.eps * state.lambda) / state.effective_mass;

                let (min, max) = row.force_bounds();
                let sum = state.lambda + delta_lambda;
                if sum < min {
                    delta_lambda = min - state.lambda;
                    state.lambda = min;
                } else if sum > max {
                    delta_lambda = max - state.lambda;
                    state.lambda = max;
                } else {
                    state.lambda = sum;
                }

                row.apply_impulse(body_a, body_b, delta_lambda);
                delta_total += delta_lambda.abs();
            }

            stats.iterations = iteration + 1;
            stats.last_delta = delta_total;
            tracing::trace!(iteration, delta_total, "gauss-seidel sweep");

            if delta_total * delta_total < self.config.tolerance {
                stats.converged = true;
                break;
            }
        }

        if !stats.converged {
            tracing::warn!(
                iterations = stats.iterations,
                last_delta = stats.last_delta,
                "solver hit the iteration cap before converging"
            );
        }

        bodies.apply_deltas();

        tracing::debug!(
            rows = rows.len(),
            iterations = stats.iterations,
            converged = stats.converged,
            "solver pass finished"
        );

        Ok(stats)
    }
}
