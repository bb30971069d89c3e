//! rein contact solver
//!
//! Normal contact constraint rows and a sequential impulse solver for rigid
//! body simulation.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! 1. **physics::body** - Rigid body state and solver-local velocity accumulators
//! 2. **physics::row** - The `ConstraintRow` contract the solver drives
//! 3. **physics::contact** - Non-penetration contact rows
//! 4. **physics::solver** - Projected Gauss-Seidel solver over a list of rows
//! 5. **ecs** - hecs ECS integration (feature = "ecs")

pub mod physics;

#[cfg(feature = "ecs")]
pub mod ecs;

pub use physics::{
    BodyHandle, BodySet, ConstraintRow, ContactConstraint, ContactGeometry, GaussSeidelSolver,
    PhysicsError, RigidBody, RigidBodyType, SolverConfig, SolverStats, StabilizationParams,
};

#[cfg(feature = "ecs")]
pub use ecs::prelude::*;

// Re-export glam for convenience
pub use glam;
