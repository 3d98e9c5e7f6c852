//! Scroll physics and coordination for virtual lists
//!
//! All time inputs are millisecond timestamps supplied by the caller, so the
//! whole module runs deterministically under a [`FrameQueue`].
//!
//! # Architecture
//!
//! ## L4 Atomic Layer
//! - `easing` - Quartic easing curves and the timing function
//! - `timing` - Progress and elapsed-time helpers
//! - `config` - Configuration types (re-exported from vlist-core)
//! - `scheduler` - Frame request tokens and the pull-based frame queue
//! - `scrollbar` - Thumb geometry and auto-hide
//!
//! ## L3 Molecular Layer
//! - `animation` - Flick simulation and eased animation driver
//!
//! ## L2 Organism Layer
//! - `coordinator` - Drag, wheel, key and programmatic scrolling against a
//!   [`vlist_core::ScrollHost`]
//!
//! # Usage
//!
//! ```ignore
//! use vlist_tui::scroll::{FrameQueue, ScrollCoordinator, ScrollToOptions};
//!
//! let mut coordinator = ScrollCoordinator::new(window_manager, FrameQueue::new(), config);
//! coordinator.scroll_to(ScrollToOptions::index(42), now);
//!
//! // In the main loop, deliver due frames
//! coordinator.run_frame(now);
//! ```

// L4 Atomic Layer
pub mod config;
pub mod easing;
pub mod scheduler;
pub mod scrollbar;
pub mod timing;

// L3 Molecular Layer
pub mod animation;

// L2 Organism Layer
pub mod coordinator;

pub use animation::{AnimationFrame, AnimationState, FlickTarget, ScrollAnimator};
pub use config::{EasingType, ScrollConfig, ScrollConfigExt, ScrollMode};
pub use coordinator::{
    AccumulatedTarget, Align, Flick, PositionTarget, ScrollCoordinator, ScrollEvent,
    ScrollEventKind, ScrollPosition, ScrollState, ScrollToOptions, WheelDeltaMode, WheelInput,
};
pub use easing::{timing_function, EasingTypeExt};
pub use scheduler::{FrameQueue, FrameScheduler, FrameToken};
pub use scrollbar::ScrollbarThumb;
