//! Dual-anchor triangulation
//!
//! Two anchors sit on the cart `baseline` apart, anchor 0 on the left at
//! `-L/2` and anchor 1 on the right at `+L/2`. With distances `d0`, `d1` to
//! the tag:
//!
//! ```text
//! x  = (d0² - d1²) / (2L)          lateral offset, positive to the right
//! y² = d0² - (x + L/2)²            forward distance squared
//! y  = sqrt(max(y², 0))
//! ```
//!
//! When the readings violate the triangle inequality the radicand goes
//! negative and `y` is exactly 0. A zero distance means "indeterminate", not
//! "adjacent"; the follow controller's minimum-distance check stops the cart
//! in that case.

use libm::{atan2f, sqrtf};

const RAD_TO_DEG: f32 = 180.0 / core::f32::consts::PI;

/// Estimator geometry and mounting calibration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatorConfig {
    /// Anchor separation (cm)
    pub baseline: f32,
    /// Negate the angle for anchors mounted mirrored
    pub invert_angle: bool,
    /// Fixed angle correction added last (degrees)
    pub angle_offset: f32,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            baseline: 28.0,
            invert_angle: true,
            angle_offset: 0.0,
        }
    }
}

/// Target position relative to the cart
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PositionFix {
    /// Forward distance (cm); 0 when geometry is indeterminate
    pub distance: f32,
    /// Bearing in degrees; positive to the right before inversion
    pub angle: f32,
    /// Both anchor distances were positive
    pub valid: bool,
    pub timestamp_ms: u64,
}

impl PositionFix {
    /// Fix carrying no usable geometry
    pub fn invalid(timestamp_ms: u64) -> Self {
        Self {
            timestamp_ms,
            ..Self::default()
        }
    }

    /// Valid, but the readings did not form a triangle
    pub fn is_indeterminate(&self) -> bool {
        self.valid && self.distance == 0.0
    }
}

/// Pure, total triangulation over two anchor distances
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionEstimator {
    config: EstimatorConfig,
}

impl PositionEstimator {
    pub fn new(config: EstimatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Lateral offset `x` of the tag (cm)
    pub fn lateral_offset(&self, d0: f32, d1: f32) -> f32 {
        (d0 * d0 - d1 * d1) / (2.0 * self.config.baseline)
    }

    /// Triangulate a fix from both anchor distances.
    ///
    /// Returns an invalid fix when either distance or the baseline is not
    /// positive.
    pub fn estimate(&self, d0: f32, d1: f32, timestamp_ms: u64) -> PositionFix {
        let baseline = self.config.baseline;
        if d0 <= 0.0 || d1 <= 0.0 || baseline <= 0.0 {
            return PositionFix::invalid(timestamp_ms);
        }

        let x = self.lateral_offset(d0, d1);
        let half = x + baseline / 2.0;
        let y_sq = d0 * d0 - half * half;
        let y = if y_sq > 0.0 { sqrtf(y_sq) } else { 0.0 };

        let mut angle = atan2f(x, y) * RAD_TO_DEG;
        if self.config.invert_angle {
            angle = -angle;
        }
        angle += self.config.angle_offset;

        PositionFix {
            distance: y,
            angle,
            valid: true,
            timestamp_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimator(invert_angle: bool) -> PositionEstimator {
        PositionEstimator::new(EstimatorConfig {
            baseline: 28.0,
            invert_angle,
            angle_offset: 0.0,
        })
    }

    #[test]
    fn test_centered_target() {
        let fix = estimator(false).estimate(100.0, 100.0, 7);
        assert!(fix.valid);
        assert_eq!(fix.timestamp_ms, 7);
        assert!(fix.angle.abs() < 0.001);
        // y = sqrt(100² - 14²)
        assert!((fix.distance - 99.0151).abs() < 0.01);
    }

    #[test]
    fn test_target_to_the_right_has_positive_angle() {
        // Closer to the right anchor
        let fix = estimator(false).estimate(110.0, 100.0, 0);
        assert!(fix.distance > 0.0);
        assert!(fix.angle > 0.0);
    }

    #[test]
    fn test_inversion_flips_sign() {
        let plain = estimator(false).estimate(110.0, 100.0, 0);
        let inverted = estimator(true).estimate(110.0, 100.0, 0);
        assert!((plain.angle + inverted.angle).abs() < 0.001);
    }

    #[test]
    fn test_offset_applied_after_inversion() {
        let est = PositionEstimator::new(EstimatorConfig {
            baseline: 28.0,
            invert_angle: true,
            angle_offset: 5.0,
        });
        let fix = est.estimate(100.0, 100.0, 0);
        assert!((fix.angle - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_triangle_violation_yields_zero_distance() {
        // |d0 - d1| far exceeds the baseline
        let fix = estimator(false).estimate(200.0, 50.0, 0);
        assert!(fix.valid);
        assert_eq!(fix.distance, 0.0);
        assert!(fix.is_indeterminate());
        assert!((fix.angle - 90.0).abs() < 0.001);
    }

    #[test]
    fn test_non_positive_inputs_are_invalid() {
        let est = estimator(false);
        assert!(!est.estimate(0.0, 100.0, 0).valid);
        assert!(!est.estimate(100.0, -1.0, 0).valid);

        let degenerate = PositionEstimator::new(EstimatorConfig {
            baseline: 0.0,
            invert_angle: false,
            angle_offset: 0.0,
        });
        assert!(!degenerate.estimate(100.0, 100.0, 0).valid);
    }
}
