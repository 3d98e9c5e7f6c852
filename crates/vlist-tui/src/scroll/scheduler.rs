//! L4 Atomic Layer: Frame pacing seam between animations and the host
//!
//! Animations never sleep or spawn timers. They ask the host for a callback
//! on its next frame and the host calls back with the frame timestamp.

/// Handle for one requested frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(u64);

impl FrameToken {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Host frame-pacing primitive
pub trait FrameScheduler {
    /// Request a single callback on the next frame
    fn schedule(&mut self) -> FrameToken;

    /// Cancel a requested callback; unknown or fired tokens are ignored
    fn cancel(&mut self, token: FrameToken);
}

/// Queue-backed scheduler for hosts that poll once per frame
///
/// Callbacks requested while a frame is being delivered land in the queue
/// for the following frame, matching `requestAnimationFrame` semantics.
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: Vec<FrameToken>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any callback is waiting for the next frame
    #[inline]
    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Take every callback due on this frame
    pub fn take_pending(&mut self) -> Vec<FrameToken> {
        std::mem::take(&mut self.pending)
    }
}

impl FrameScheduler for FrameQueue {
    fn schedule(&mut self) -> FrameToken {
        self.next_id += 1;
        let token = FrameToken(self.next_id);
        self.pending.push(token);
        token
    }

    fn cancel(&mut self, token: FrameToken) {
        self.pending.retain(|t| *t != token);
    }
}
