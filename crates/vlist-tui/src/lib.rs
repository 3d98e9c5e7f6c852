pub mod app;
pub mod event;
pub mod focus;
pub mod input;
pub mod keymap;
pub mod list;
pub mod nav;
pub mod scroll;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use focus::{ContainerRestrict, FocusFollow, SpotlightHost};
pub use list::{RenderedItem, VirtualList};
pub use nav::NavKey;
pub use theme::Theme;
