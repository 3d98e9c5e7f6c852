//! L4 Atomic Layer: Configuration types for list scrolling
//!
//! Re-exports configuration from vlist-core and provides additional utilities.

// Re-export config types from core
pub use vlist_core::{EasingType, ScrollConfig, ScrollMode};

/// Extension trait for ScrollConfig with utility methods
pub trait ScrollConfigExt {
    /// Animation duration in milliseconds, never negative
    fn animation_duration(&self) -> f64;

    /// Interval between frames in milliseconds
    fn frame_interval(&self) -> f64;

    /// Check if animated scrolling is effectively enabled
    fn is_smooth(&self) -> bool;
}

impl ScrollConfigExt for ScrollConfig {
    #[inline]
    fn animation_duration(&self) -> f64 {
        if self.animation_duration_ms.is_finite() {
            self.animation_duration_ms.max(0.0)
        } else {
            0.0
        }
    }

    #[inline]
    fn frame_interval(&self) -> f64 {
        if self.animation_fps == 0 {
            16.0 // ~60fps fallback
        } else {
            1000.0 / self.animation_fps as f64
        }
    }

    #[inline]
    fn is_smooth(&self) -> bool {
        self.smooth_enabled && self.animation_duration() > 0.0
    }
}
