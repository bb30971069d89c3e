//! Errors raised by the collaborators around constraint rows.
//!
//! The row operations themselves never fail; these cover body lookup and
//! configuration mistakes made by whoever drives the solver.

use thiserror::Error;

use super::body::BodyHandle;

/// Error type for body storage, constraint setup and solver configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// A constraint refers to a body that is not in the [`BodySet`](super::body::BodySet).
    #[error("unknown body handle {0:?}")]
    UnknownBody(BodyHandle),

    /// Both sides of a constraint refer to the same body.
    #[error("constraint references body {0:?} on both sides")]
    SelfContact(BodyHandle),

    /// Force bounds with `min > max` (or NaN).
    #[error("invalid force bounds: min {min} must not exceed max {max}")]
    InvalidForceBounds { min: f32, max: f32 },

    /// Non-positive timestep.
    #[error("timestep must be positive, got {0}")]
    InvalidTimestep(f32),

    /// Solver or stabilization settings out of range.
    #[error("invalid solver configuration: {0}")]
    InvalidConfig(&'static str),
}

/// Result alias used throughout the physics module.
pub type Result<T> = std::result::Result<T, PhysicsError>;
