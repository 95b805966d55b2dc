//! Easing functions for element animations.

use serde::{Deserialize, Serialize};

/// Timing curve of an animation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Interpolator {
    #[default]
    Linear,
    /// Slow start, used for outgoing elements.
    Accelerate,
    /// Slow end, used for incoming elements.
    Decelerate,
}

// ============================================================================
// Easing Functions
// ============================================================================

/// Linear interpolation between two values.
#[inline]
#[must_use]
pub fn lerp(start: f32, end: f32, t: f32) -> f32 { (end - start).mul_add(t, start) }

/// Ease-in (slow start, accelerates).
#[inline]
#[must_use]
pub fn ease_in(t: f32) -> f32 { t * t * t }

/// Ease-out (fast start, decelerates).
#[inline]
#[must_use]
pub fn ease_out(t: f32) -> f32 {
    let t1 = t - 1.0;
    (t1 * t1).mul_add(t1, 1.0)
}

/// Applies an interpolator to a linear progress value in `[0, 1]`.
#[inline]
#[must_use]
pub fn apply_easing(t: f32, interpolator: Interpolator) -> f32 {
    let t = t.clamp(0.0, 1.0);
    match interpolator {
        Interpolator::Linear => t,
        Interpolator::Accelerate => ease_in(t),
        Interpolator::Decelerate => ease_out(t),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 1.0, 0.0) - 0.0).abs() < f32::EPSILON);
        assert!((lerp(0.0, 1.0, 0.5) - 0.5).abs() < f32::EPSILON);
        assert!((lerp(1.0, 0.0, 0.25) - 0.75).abs() < f32::EPSILON);
    }

    #[test]
    fn test_ease_in() {
        assert!((ease_in(0.0) - 0.0).abs() < f32::EPSILON);
        assert!(ease_in(0.5) < 0.5);
        assert!((ease_in(1.0) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_ease_out() {
        assert!((ease_out(0.0) - 0.0).abs() < f32::EPSILON);
        assert!(ease_out(0.5) > 0.5);
        assert!((ease_out(1.0) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_apply_easing_clamps() {
        assert!((apply_easing(1.5, Interpolator::Linear) - 1.0).abs() < f32::EPSILON);
        assert!((apply_easing(-0.5, Interpolator::Decelerate) - 0.0).abs() < f32::EPSILON);
        assert!(
            (apply_easing(0.5, Interpolator::Accelerate) - ease_in(0.5)).abs() < f32::EPSILON
        );
    }
}
