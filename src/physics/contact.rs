//! Non-penetration contact constraint row.
//!
//! # Jacobian
//!
//! With `n` pointing from body A to body B and `ri`, `rj` the offsets from
//! each centre of mass to the contact point, the row is
//!
//! ```text
//!      linear A   angular A    linear B   angular B
//! G = [   -n,    -(ri x n),       n,       rj x n  ]
//! ```
//!
//! so `G W = n·(vB - vA) + (rj x n)·wB - (ri x n)·wA` and
//! `G M⁻¹ Gᵀ = 1/mA + 1/mB + (ri x n)·IA⁻¹(ri x n) + (rj x n)·IB⁻¹(rj x n)`.

use glam::{Mat3, Vec3};

use super::body::{BodyHandle, RigidBody};
use super::error::{PhysicsError, Result};
use super::row::ConstraintRow;

/// Default upper bound on the normal multiplier.
pub const DEFAULT_MAX_FORCE: f32 = 1e6;

/// Contact geometry as reported by a collision detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactGeometry {
    /// Contact normal (from body A to body B), unit length.
    pub normal: Vec3,
    /// Deepest point of the contact on body A's surface, world space.
    pub point_a: Vec3,
    /// Deepest point of the contact on body B's surface, world space.
    pub point_b: Vec3,
}

impl ContactGeometry {
    /// Signed separation along the normal, negative while overlapping.
    #[inline]
    pub fn penetration(&self) -> f32 {
        self.normal.dot(self.point_b - self.point_a)
    }
}

/// A single normal contact row between two bodies.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactConstraint {
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
    /// Signed penetration reported at creation, negative = overlapping.
    /// The bias uses the live body positions instead.
    pub penetration: f32,
    /// Friction coefficient, consumed by tangential rows.
    pub friction: f32,
    normal: Vec3,
    ri: Vec3,
    rj: Vec3,
    min_force: f32,
    max_force: f32,
    penetration_vec: Vec3,
    rixn: Vec3,
    rjxn: Vec3,
    inv_inertia_a: Mat3,
    inv_inertia_b: Mat3,
}

impl ContactConstraint {
    /// Create an empty contact between `body_a` and `body_b`.
    ///
    /// The normal defaults to +Y and both offsets to zero; the force bounds
    /// only allow pushing.
    pub fn new(body_a: BodyHandle, body_b: BodyHandle) -> Self {
        Self {
            body_a,
            body_b,
            penetration: 0.0,
            friction: 0.0,
            normal: Vec3::Y,
            ri: Vec3::ZERO,
            rj: Vec3::ZERO,
            min_force: 0.0,
            max_force: DEFAULT_MAX_FORCE,
            penetration_vec: Vec3::ZERO,
            rixn: Vec3::ZERO,
            rjxn: Vec3::ZERO,
            inv_inertia_a: Mat3::ZERO,
            inv_inertia_b: Mat3::ZERO,
        }
    }

    /// Build a contact from world-space witness points.
    pub fn from_geometry(
        handle_a: BodyHandle,
        handle_b: BodyHandle,
        body_a: &RigidBody,
        body_b: &RigidBody,
        geometry: &ContactGeometry,
    ) -> Self {
        Self::new(handle_a, handle_b)
            .with_normal(geometry.normal)
            .with_offsets(
                geometry.point_a - body_a.position,
                geometry.point_b - body_b.position,
            )
            .with_penetration(geometry.penetration())
    }

    pub fn with_normal(mut self, normal: Vec3) -> Self {
        self.set_normal(normal);
        self
    }

    pub fn with_offsets(mut self, ri: Vec3, rj: Vec3) -> Self {
        self.set_offsets(ri, rj);
        self
    }

    pub fn with_penetration(mut self, penetration: f32) -> Self {
        self.penetration = penetration;
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    /// Replace the multiplier bounds. Fails unless `min <= max`.
    pub fn with_force_bounds(mut self, min: f32, max: f32) -> Result<Self> {
        self.set_force_bounds(min, max)?;
        Ok(self)
    }

    pub fn set_normal(&mut self, normal: Vec3) {
        debug_assert!(normal.is_normalized(), "contact normal must be unit length");
        self.normal = normal;
        self.update_lever_arms();
    }

    pub fn set_offsets(&mut self, ri: Vec3, rj: Vec3) {
        self.ri = ri;
        self.rj = rj;
        self.update_lever_arms();
    }

    pub fn set_force_bounds(&mut self, min: f32, max: f32) -> Result<()> {
        if min.is_nan() || max.is_nan() || min > max {
            return Err(PhysicsError::InvalidForceBounds { min, max });
        }
        self.min_force = min;
        self.max_force = max;
        Ok(())
    }

    #[inline]
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    #[inline]
    pub fn ri(&self) -> Vec3 {
        self.ri
    }

    #[inline]
    pub fn rj(&self) -> Vec3 {
        self.rj
    }

    /// `ri x n`.
    #[inline]
    pub fn rixn(&self) -> Vec3 {
        self.rixn
    }

    /// `rj x n`.
    #[inline]
    pub fn rjxn(&self) -> Vec3 {
        self.rjxn
    }

    #[inline]
    pub fn min_force(&self) -> f32 {
        self.min_force
    }

    #[inline]
    pub fn max_force(&self) -> f32 {
        self.max_force
    }

    /// `q = (xB + rj) - (xA + ri)` as of the last [`compute_bias`](ConstraintRow::compute_bias).
    #[inline]
    pub fn penetration_vec(&self) -> Vec3 {
        self.penetration_vec
    }

    fn update_lever_arms(&mut self) {
        self.rixn = self.ri.cross(self.normal);
        self.rjxn = self.rj.cross(self.normal);
    }

    // Bodies may have rotated since the last call, so the world-space tensors
    // are rebuilt from the diagonals every time.
    fn update_inertia(&mut self, body_a: &RigidBody, body_b: &RigidBody) {
        self.inv_inertia_a = Mat3::from_diagonal(body_a.inv_inertia);
        self.inv_inertia_b = Mat3::from_diagonal(body_b.inv_inertia);
    }
}

impl ConstraintRow for ContactConstraint {
    fn bodies(&self) -> (BodyHandle, BodyHandle) {
        (self.body_a, self.body_b)
    }

    fn force_bounds(&self) -> (f32, f32) {
        (self.min_force, self.max_force)
    }

    fn compute_bias(
        &mut self,
        body_a: &RigidBody,
        body_b: &RigidBody,
        a: f32,
        b: f32,
        h: f32,
    ) -> f32 {
        self.update_lever_arms();
        self.update_inertia(body_a, body_b);

        let n = self.normal;

        self.penetration_vec = (body_b.position + self.rj) - (body_a.position + self.ri);
        let gq = n.dot(self.penetration_vec);

        let gw = n.dot(body_b.linear_velocity - body_a.linear_velocity)
            + self.rjxn.dot(body_b.angular_velocity)
            - self.rixn.dot(body_a.angular_velocity);

        let gimf = n.dot(body_b.force) * body_b.inv_mass - n.dot(body_a.force) * body_a.inv_mass
            + self.rjxn.dot(self.inv_inertia_b * body_b.torque)
            - self.rixn.dot(self.inv_inertia_a * body_a.torque);

        -gq * a - gw * b - h * gimf
    }

    fn compute_effective_mass(&mut self, body_a: &RigidBody, body_b: &RigidBody, eps: f32) -> f32 {
        self.update_lever_arms();
        self.update_inertia(body_a, body_b);

        body_a.inv_mass
            + body_b.inv_mass
            + eps
            + (self.inv_inertia_a * self.rixn).dot(self.rixn)
            + (self.inv_inertia_b * self.rjxn).dot(self.rjxn)
    }

    fn velocity_residual(&self, body_a: &RigidBody, body_b: &RigidBody) -> f32 {
        self.normal.dot(body_b.linear_delta - body_a.linear_delta)
            - self.rixn.dot(body_a.angular_delta_or_zero())
            + self.rjxn.dot(body_b.angular_delta_or_zero())
    }

    fn apply_impulse(&mut self, body_a: &mut RigidBody, body_b: &mut RigidBody, delta_lambda: f32) {
        self.update_inertia(body_a, body_b);
        let n = self.normal;

        body_a.linear_delta -= n * (body_a.inv_mass * delta_lambda);
        body_b.linear_delta += n * (body_b.inv_mass * delta_lambda);

        if let Some(w) = body_a.angular_delta.as_mut() {
            *w -= self.inv_inertia_a * self.rixn * delta_lambda;
        }
        if let Some(w) = body_b.angular_delta.as_mut() {
            *w += self.inv_inertia_b * self.rjxn * delta_lambda;
        }
    }
}
