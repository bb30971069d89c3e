//! The contract between a constraint row and the outer solver.

use super::body::{BodyHandle, RigidBody};

/// A scalar (one-dimensional) velocity constraint between two bodies.
///
/// The solver resolves [`bodies`](Self::bodies) against its body storage and
/// hands the pair to every other call, always in `(a, b)` order.
pub trait ConstraintRow {
    /// Handles of body A and body B.
    fn bodies(&self) -> (BodyHandle, BodyHandle);

    /// `(min, max)` bounds for the accumulated multiplier.
    fn force_bounds(&self) -> (f32, f32);

    /// Right-hand side `B` of the velocity-level constraint equation.
    ///
    /// `a` and `b` are the position and velocity stabilization gains, `h` the
    /// timestep.
    fn compute_bias(
        &mut self,
        body_a: &RigidBody,
        body_b: &RigidBody,
        a: f32,
        b: f32,
        h: f32,
    ) -> f32;

    /// Effective mass `C = G M⁻¹ Gᵀ + eps`.
    fn compute_effective_mass(&mut self, body_a: &RigidBody, body_b: &RigidBody, eps: f32) -> f32;

    /// Constraint velocity measured from the solver-local accumulators only.
    fn velocity_residual(&self, body_a: &RigidBody, body_b: &RigidBody) -> f32;

    /// Add `delta_lambda` along the constraint to both bodies' accumulators.
    fn apply_impulse(&mut self, body_a: &mut RigidBody, body_b: &mut RigidBody, delta_lambda: f32);
}

impl<T: ConstraintRow + ?Sized> ConstraintRow for Box<T> {
    fn bodies(&self) -> (BodyHandle, BodyHandle) {
        (**self).bodies()
    }

    fn force_bounds(&self) -> (f32, f32) {
        (**self).force_bounds()
    }

    fn compute_bias(
        &mut self,
        body_a: &RigidBody,
        body_b: &RigidBody,
        a: f32,
        b: f32,
        h: f32,
    ) -> f32 {
        (**self).compute_bias(body_a, body_b, a, b, h)
    }

    fn compute_effective_mass(&mut self, body_a: &RigidBody, body_b: &RigidBody, eps: f32) -> f32 {
        (**self).compute_effective_mass(body_a, body_b, eps)
    }

    fn velocity_residual(&self, body_a: &RigidBody, body_b: &RigidBody) -> f32 {
        (**self).velocity_residual(body_a, body_b)
    }

    fn apply_impulse(&mut self, body_a: &mut RigidBody, body_b: &mut RigidBody, delta_lambda: f32) {
        (**self).apply_impulse(body_a, body_b, delta_lambda)
    }
}
