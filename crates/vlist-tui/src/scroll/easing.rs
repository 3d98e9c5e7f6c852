//! L4 Atomic Layer: Pure easing functions for scroll animations
//!
//! Quartic curves mapping progress [0, 1] to eased progress [0, 1], and the
//! pixel-level timing function built on them.

// Re-export EasingType from core
pub use vlist_core::EasingType;

/// Extension trait for EasingType with calculation methods
pub trait EasingTypeExt {
    /// Apply the easing function to a progress value
    ///
    /// # Arguments
    /// * `t` - Progress value in range [0, 1]
    ///
    /// # Returns
    /// Eased value in range [0, 1]
    fn apply(&self, t: f64) -> f64;
}

impl EasingTypeExt for EasingType {
    #[inline]
    fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::Linear => t,
            EasingType::EaseIn => quartic_ease_in(t),
            EasingType::EaseOut => quartic_ease_out(t),
            EasingType::EaseInOut => quartic_ease_in_out(t),
        }
    }
}

/// Quartic ease-in: f(t) = t⁴
#[inline]
fn quartic_ease_in(t: f64) -> f64 {
    t * t * t * t
}

/// Quartic ease-out: f(t) = 1 - (1-t)⁴
#[inline]
fn quartic_ease_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv * inv
}

/// Quartic ease-in-out: 8t⁴ for the first half, mirrored for the second
#[inline]
fn quartic_ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        8.0 * t * t * t * t
    } else {
        let inv = t - 1.0;
        1.0 - 8.0 * inv * inv * inv * inv
    }
}

/// Position at `time` of a scroll from `source` to `target` over `duration` ms
///
/// Returns `source` at `time = 0` and `target` once `time >= duration`.
#[inline]
pub fn timing_function(
    easing: EasingType,
    source: f64,
    target: f64,
    duration: f64,
    time: f64,
) -> f64 {
    if duration <= 0.0 || time >= duration {
        return target;
    }
    source + (target - source) * easing.apply(time / duration)
}
