pub mod config;
pub mod error;
pub mod geometry;
pub mod host;
pub mod metrics;
pub mod window;

pub use config::{AppConfig, EasingType, ItemSize, ListConfig, ScrollConfig, ScrollMode};
pub use error::{Error, Result};
pub use geometry::{ClientSize, Direction, GridPosition, Point, ScrollBounds};
pub use host::{MoreInfo, ScrollHost};
pub use metrics::{Metrics, MetricsCalculator, Threshold};
pub use window::{ItemLayout, SlotUpdate, Window, WindowManager};
