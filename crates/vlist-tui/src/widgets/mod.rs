mod list_view;
mod scrollbar;
mod status_bar;

pub use list_view::{cell_rect, ListViewWidget};
pub use scrollbar::ScrollbarWidget;
pub use status_bar::StatusBarWidget;
