//! Constraint rows for a sequential impulse (projected Gauss-Seidel) solver.
//!
//! # Architecture
//!
//! A solver pass over a list of rows runs in this order:
//!
//! 1. Reset the solver-local velocity accumulators of every body
//! 2. Evaluate the bias `B` and effective mass `C` of each row
//! 3. Sweep the rows in list order: read the residual, compute and clamp the
//!    multiplier increment, apply it to the accumulators
//! 4. Stop after a fixed number of sweeps or once the increments vanish
//! 5. Merge the accumulators into the bodies' velocities
//!
//! Collision detection and position integration happen outside this module.

pub mod body;
pub mod contact;
pub mod error;
pub mod row;
pub mod solver;
pub mod stabilization;

pub use body::{BodyHandle, BodySet, RigidBody, RigidBodyType};
pub use contact::{ContactConstraint, ContactGeometry};
pub use error::{PhysicsError, Result};
pub use row::ConstraintRow;
pub use solver::{GaussSeidelSolver, SolverStats};
pub use stabilization::StabilizationParams;

/// Configuration for a solver pass.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Maximum number of Gauss-Seidel sweeps. Default: 10.
    pub iterations: u32,
    /// A sweep whose squared total increment falls below this ends the pass. Default: 1e-7.
    pub tolerance: f32,
    /// Timestep in seconds. Default: 1/60.
    pub timestep: f32,
    /// Gains passed to every row. Default: Baumgarte `a = b = 0.2`, `eps = 0`.
    pub stabilization: StabilizationParams,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            iterations: 10,
            tolerance: 1e-7,
            timestep: 1.0 / 60.0,
            stabilization: StabilizationParams::default(),
        }
    }
}

impl SolverConfig {
    /// Default configuration with SPOOK gains for the given stiffness and relaxation.
    pub fn spook(stiffness: f32, relaxation: f32, timestep: f32) -> Result<Self> {
        Ok(Self {
            timestep,
            stabilization: StabilizationParams::spook(stiffness, relaxation, timestep)?,
            ..Self::default()
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(PhysicsError::InvalidConfig("iterations must be at least 1"));
        }
        if self.timestep.is_nan() || self.timestep <= 0.0 {
            return Err(PhysicsError::InvalidTimestep(self.timestep));
        }
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            return Err(PhysicsError::InvalidConfig("tolerance must be non-negative"));
        }
        self.stabilization.validate()
    }
}
