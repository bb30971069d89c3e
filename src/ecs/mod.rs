//! Entity Component System integration with hecs.
//!
//! Entities carry a [`RigidBody`](crate::physics::RigidBody) component; the
//! bridge copies them into a [`BodySet`](crate::physics::BodySet) for a solver
//! pass and writes the result back.

pub mod bridge;

pub use bridge::{gather_bodies, BodyBinding};

pub mod prelude {
    pub use super::bridge::*;
}
