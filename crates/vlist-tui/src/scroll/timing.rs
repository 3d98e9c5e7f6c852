//! L4 Atomic Layer: Time calculation utilities for scroll animations
//!
//! Timestamps are milliseconds supplied by the host frame clock, so every
//! function here is pure and replayable.

/// Duration of one simulated frame in milliseconds
pub const FRAME_TIME: f64 = 16.0;

/// Check if animation is complete
#[inline]
pub fn is_complete(elapsed: f64, duration: f64) -> bool {
    elapsed >= duration
}

/// Milliseconds between two host timestamps, never negative
#[inline]
pub fn elapsed_since(start: f64, now: f64) -> f64 {
    (now - start).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_since_never_negative() {
        assert_eq!(elapsed_since(100.0, 80.0), 0.0);
        assert_eq!(elapsed_since(100.0, 116.0), 16.0);
        assert!(is_complete(16.0, 16.0));
        assert!(!is_complete(15.9, 16.0));
    }
}
