//! Stabilization gains fed to [`ConstraintRow::compute_bias`](super::row::ConstraintRow::compute_bias).

use super::error::{PhysicsError, Result};

/// Baumgarte position gain.
const DEFAULT_POSITION_GAIN: f32 = 0.2;
/// Velocity-error damping gain.
const DEFAULT_VELOCITY_GAIN: f32 = 0.2;

/// The `a`, `b`, `eps` triple used by every row in a solver pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilizationParams {
    /// Position-error gain.
    pub a: f32,
    /// Velocity-error gain.
    pub b: f32,
    /// Constraint force mixing added to the effective mass.
    pub eps: f32,
}

impl Default for StabilizationParams {
    fn default() -> Self {
        Self {
            a: DEFAULT_POSITION_GAIN,
            b: DEFAULT_VELOCITY_GAIN,
            eps: 0.0,
        }
    }
}

impl StabilizationParams {
    /// Derive gains from a spring stiffness `k` and relaxation time `d`
    /// (in timesteps), following the SPOOK discretisation:
    ///
    /// ```text
    /// a   = 4 / (h (1 + 4d))
    /// b   = 4d / (1 + 4d)
    /// eps = 4 / (h² k (1 + 4d))
    /// ```
    pub fn spook(stiffness: f32, relaxation: f32, h: f32) -> Result<Self> {
        if h.is_nan() || h <= 0.0 {
            return Err(PhysicsError::InvalidTimestep(h));
        }
        if stiffness.is_nan() || stiffness <= 0.0 {
            return Err(PhysicsError::InvalidConfig("stiffness must be positive"));
        }
        if relaxation.is_nan() || relaxation < 0.0 {
            return Err(PhysicsError::InvalidConfig("relaxation must be non-negative"));
        }

        let denom = 1.0 + 4.0 * relaxation;
        Ok(Self {
            a: 4.0 / (h * denom),
            b: 4.0 * relaxation / denom,
            eps: 4.0 / (h * h * stiffness * denom),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.eps.is_nan() || self.eps < 0.0 {
            return Err(PhysicsError::InvalidConfig("eps must be non-negative"));
        }
        if !self.a.is_finite() || !self.b.is_finite() {
            return Err(PhysicsError::InvalidConfig("stabilization gains must be finite"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_gains() {
        let params = StabilizationParams::default();
        assert_eq!(params.a, 0.2);
        assert_eq!(params.b, 0.2);
        assert_eq!(params.eps, 0.0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_spook_closed_form() {
        let h = 1.0 / 60.0;
        let params = StabilizationParams::spook(1e7, 3.0, h).unwrap();

        assert!((params.a - 4.0 / (h * 13.0)).abs() < 1e-4, "a = {}", params.a);
        assert!((params.b - 12.0 / 13.0).abs() < 1e-6, "b = {}", params.b);
        let eps = 4.0 / (h * h * 1e7 * 13.0);
        assert!((params.eps - eps).abs() < 1e-9, "eps = {}", params.eps);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_spook_rigid_limit() {
        // No relaxation: full position correction in one step, no velocity damping.
        let params = StabilizationParams::spook(1e7, 0.0, 0.5).unwrap();
        assert!((params.a - 8.0).abs() < 1e-6);
        assert_eq!(params.b, 0.0);
    }

    #[test]
    fn test_spook_rejects_bad_input() {
        assert_eq!(
            StabilizationParams::spook(1e7, 3.0, 0.0).unwrap_err(),
            PhysicsError::InvalidTimestep(0.0)
        );
        assert!(StabilizationParams::spook(0.0, 3.0, 0.1).is_err());
        assert!(StabilizationParams::spook(1e7, -1.0, 0.1).is_err());
    }

    #[test]
    fn test_validate_rejects_negative_eps() {
        let params = StabilizationParams {
            eps: -1.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }
}
