//! L3 Molecular Layer: Scroll animation controller
//!
//! Combines easing functions, timing utilities and the host frame scheduler.
//! The animator owns at most one animation and at most one pending frame
//! request; the coordinator decides what each frame means.

use tracing::trace;
use vlist_core::Point;

use super::easing::{timing_function, EasingType};
use super::scheduler::{FrameScheduler, FrameToken};
use super::timing::{elapsed_since, is_complete, FRAME_TIME};

/// Largest flick velocity in px/ms, per axis
pub const MAX_VELOCITY: f64 = 100.0;

/// Velocity multiplier applied every simulated frame
pub const FRICTION: f64 = 0.95;

/// Simulation stops once vx² + vy² drops below this
pub const STOP_VELOCITY_SQUARED: f64 = 0.04;

/// Where a flick comes to rest and how long it takes to get there
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlickTarget {
    pub target_x: f64,
    pub target_y: f64,
    pub duration: f64,
}

/// A running animation from a source to a target position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    pub source_x: f64,
    pub source_y: f64,
    pub target_x: f64,
    pub target_y: f64,
    pub duration: f64,
    pub start_timestamp: f64,
}

impl AnimationState {
    /// Eased position after `elapsed` milliseconds
    pub fn position_at(&self, easing: EasingType, elapsed: f64) -> Point {
        Point::new(
            timing_function(easing, self.source_x, self.target_x, self.duration, elapsed),
            timing_function(easing, self.source_y, self.target_y, self.duration, elapsed),
        )
    }

    pub fn target(&self) -> Point {
        Point::new(self.target_x, self.target_y)
    }
}

/// Result of delivering one frame to the animator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    pub position: Point,
    pub elapsed: f64,
    /// The animation reached its target on this frame and was cleared
    pub done: bool,
}

/// Scroll animation controller
///
/// Call [`ScrollAnimator::start`] to begin an animation, then deliver each
/// frame the scheduler fires through [`ScrollAnimator::on_frame`]. Frames are
/// not rescheduled automatically; the caller asks for the next one with
/// [`ScrollAnimator::animate`] once it has applied the current position.
#[derive(Debug)]
pub struct ScrollAnimator<S> {
    scheduler: S,
    /// Frame requested from the scheduler and not yet delivered
    pending: Option<FrameToken>,
    animation: Option<AnimationState>,
    easing: EasingType,
}

impl<S: FrameScheduler> ScrollAnimator<S> {
    pub fn new(scheduler: S, easing: EasingType) -> Self {
        Self {
            scheduler,
            pending: None,
            animation: None,
            easing,
        }
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Check if an animation is currently active
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Check if a frame callback is outstanding
    #[inline]
    pub fn is_frame_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn animation(&self) -> Option<&AnimationState> {
        self.animation.as_ref()
    }

    /// Predict where a flick with the given velocity comes to rest
    ///
    /// Velocities are px/ms in scroll space and are clamped to
    /// ±[`MAX_VELOCITY`]. Each 16 ms frame moves by `v * 16` and then decays
    /// velocity by [`FRICTION`]. A velocity already below the stop threshold
    /// yields zero duration and the source position.
    pub fn simulate(
        &self,
        source_x: f64,
        source_y: f64,
        velocity_x: f64,
        velocity_y: f64,
    ) -> FlickTarget {
        let mut vx = clamp_velocity(velocity_x);
        let mut vy = clamp_velocity(velocity_y);
        let mut target_x = source_x;
        let mut target_y = source_y;
        let mut duration = 0.0;

        while vx * vx + vy * vy >= STOP_VELOCITY_SQUARED {
            target_x += vx * FRAME_TIME;
            target_y += vy * FRAME_TIME;
            duration += FRAME_TIME;
            vx *= FRICTION;
            vy *= FRICTION;
        }

        FlickTarget {
            target_x,
            target_y,
            duration,
        }
    }

    /// Begin an animation, superseding any animation in flight
    pub fn start(&mut self, state: AnimationState) {
        self.stop();
        trace!(
            "animating ({}, {}) -> ({}, {}) over {}ms",
            state.source_x,
            state.source_y,
            state.target_x,
            state.target_y,
            state.duration
        );
        self.animation = Some(state);
        self.animate();
    }

    /// Move the target of the running animation without restarting its curve
    pub fn retarget(&mut self, target_x: f64, target_y: f64) -> bool {
        match self.animation.as_mut() {
            Some(animation) => {
                animation.target_x = target_x;
                animation.target_y = target_y;
                true
            }
            None => false,
        }
    }

    /// Request the next frame unless one is already outstanding
    pub fn animate(&mut self) {
        if self.pending.is_none() {
            self.pending = Some(self.scheduler.schedule());
        }
    }

    /// Deliver a fired frame
    ///
    /// Returns `None` for tokens that were cancelled or superseded.
    pub fn on_frame(&mut self, token: FrameToken, timestamp: f64) -> Option<AnimationFrame> {
        if self.pending != Some(token) {
            trace!("ignoring stale frame {}", token.id());
            return None;
        }
        self.pending = None;

        let state = self.animation?;
        let elapsed = elapsed_since(state.start_timestamp, timestamp);
        let done = is_complete(elapsed, state.duration);
        let position = if done {
            state.target()
        } else {
            state.position_at(self.easing, elapsed)
        };
        if done {
            self.animation = None;
        }

        Some(AnimationFrame {
            position,
            elapsed,
            done,
        })
    }

    /// Cancel the pending frame and drop the animation; safe to repeat
    pub fn stop(&mut self) {
        if let Some(token) = self.pending.take() {
            self.scheduler.cancel(token);
        }
        self.animation = None;
    }
}

#[inline]
fn clamp_velocity(velocity: f64) -> f64 {
    if velocity.is_finite() {
        velocity.clamp(-MAX_VELOCITY, MAX_VELOCITY)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::scheduler::FrameQueue;

    fn animator() -> ScrollAnimator<FrameQueue> {
        ScrollAnimator::new(FrameQueue::new(), EasingType::Linear)
    }

    fn state(target_y: f64, duration: f64) -> AnimationState {
        AnimationState {
            source_x: 0.0,
            source_y: 0.0,
            target_x: 0.0,
            target_y,
            duration,
            start_timestamp: 1000.0,
        }
    }

    #[test]
    fn test_simulate_zero_velocity() {
        let target = animator().simulate(10.0, 20.0, 0.0, 0.0);
        assert_eq!(
            target,
            FlickTarget {
                target_x: 10.0,
                target_y: 20.0,
                duration: 0.0
            }
        );
    }

    #[test]
    fn test_simulate_decays_to_rest() {
        let target = animator().simulate(0.0, 100.0, 0.0, 3.0);
        assert!(target.target_y > 100.0);
        assert!(target.duration > 0.0);
        assert_eq!(target.duration % FRAME_TIME, 0.0);
        // geometric series bound: v * 16 / (1 - 0.95)
        assert!(target.target_y - 100.0 < 3.0 * 16.0 / 0.05);
    }

    #[test]
    fn test_simulate_single_frame() {
        // 0.2 is exactly at the threshold: one frame, then 0.19 stops
        let target = animator().simulate(0.0, 0.0, 0.2, 0.0);
        assert_eq!(target.duration, 16.0);
        assert!((target.target_x - 3.2).abs() < 1e-9);
    }

    #[test]
    fn test_simulate_clamps_velocity() {
        let a = animator();
        assert_eq!(a.simulate(0.0, 0.0, 0.0, 5000.0), a.simulate(0.0, 0.0, 0.0, MAX_VELOCITY));
        assert_eq!(a.simulate(0.0, 0.0, -5000.0, 0.0), a.simulate(0.0, 0.0, -MAX_VELOCITY, 0.0));
        assert_eq!(a.simulate(0.0, 0.0, f64::NAN, 0.0).duration, 0.0);
    }

    #[test]
    fn test_frames_until_done() {
        let mut a = animator();
        a.start(state(100.0, 100.0));
        assert!(a.is_animating());

        let token = a.scheduler_mut().take_pending()[0];
        let frame = a.on_frame(token, 1050.0).unwrap();
        assert_eq!(frame.position.top, 50.0);
        assert!(!frame.done);
        assert!(!a.is_frame_pending());

        a.animate();
        let token = a.scheduler_mut().take_pending()[0];
        let frame = a.on_frame(token, 1100.0).unwrap();
        assert_eq!(frame.position.top, 100.0);
        assert!(frame.done);
        assert!(!a.is_animating());
    }

    #[test]
    fn test_stale_frame_ignored() {
        let mut a = animator();
        a.start(state(100.0, 100.0));
        let stale = a.scheduler_mut().take_pending()[0];
        a.start(state(200.0, 100.0));
        assert!(a.on_frame(stale, 1050.0).is_none());
        assert!(a.is_animating());
    }

    #[test]
    fn test_retarget_keeps_curve() {
        let mut a = animator();
        a.start(state(100.0, 100.0));
        assert!(a.retarget(0.0, 300.0));
        let token = a.scheduler_mut().take_pending()[0];
        let frame = a.on_frame(token, 1050.0).unwrap();
        assert_eq!(frame.position.top, 150.0);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut a = animator();
        a.start(state(100.0, 100.0));
        a.stop();
        a.stop();
        assert!(!a.is_animating());
        assert!(!a.is_frame_pending());
        assert!(!a.scheduler().is_pending());
        assert!(!a.retarget(1.0, 1.0));
    }
}
