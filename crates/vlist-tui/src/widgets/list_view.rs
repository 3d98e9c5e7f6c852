use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, PX_PER_COL, PX_PER_ROW};

pub struct ListViewWidget;

impl ListViewWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let wm = app.list.window_manager();
        let window = wm.window();

        let title = format!(
            " vlist  {} items  window {}..{} ",
            wm.data_size(),
            window.first_index,
            window.end_index()
        );
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg0));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let position = app.list.coordinator().position();
        let rtl = app.list.config().rtl && !wm.metrics().is_vertical();
        let client_width = inner.width as f64 * PX_PER_COL;
        let focused = app.focused_index();

        for item in app.list.render(|index| format!("Item {index}")) {
            let layout = item.layout;
            let x = if rtl {
                client_width - (-layout.x - position.left) - layout.width
            } else {
                layout.x - position.left
            };
            let y = layout.y - position.top;
            let Some(cell) = cell_rect(inner, x, y, layout.width, layout.height) else {
                continue;
            };

            let style = if focused == Some(item.index) {
                Style::default()
                    .fg(theme.fg0)
                    .bg(theme.selection)
                    .add_modifier(Modifier::BOLD)
            } else if item.index % 2 == 0 {
                Style::default().fg(theme.fg0).bg(theme.bg1)
            } else {
                Style::default().fg(theme.grey2).bg(theme.bg0)
            };
            let label = Line::from(vec![
                Span::styled(format!(" {} ", item.content), style),
                Span::styled(format!("#{}", item.slot), Style::default().fg(theme.grey0)),
            ]);
            frame.render_widget(Paragraph::new(label).style(style), cell);
        }
    }
}

/// Terminal cells covered by an item at pixel offset `(x, y)` from the
/// viewport origin, clipped to `inner`
pub fn cell_rect(inner: Rect, x: f64, y: f64, width: f64, height: f64) -> Option<Rect> {
    let left = (x / PX_PER_COL).round() as i64;
    let top = (y / PX_PER_ROW).round() as i64;
    let right = ((x + width) / PX_PER_COL).round().max(left as f64 + 1.0) as i64;
    let bottom = ((y + height) / PX_PER_ROW).round().max(top as f64 + 1.0) as i64;

    let clip_left = left.max(0);
    let clip_top = top.max(0);
    let clip_right = right.min(inner.width as i64);
    let clip_bottom = bottom.min(inner.height as i64);
    if clip_left >= clip_right || clip_top >= clip_bottom {
        return None;
    }

    Some(Rect {
        x: inner.x + clip_left as u16,
        y: inner.y + clip_top as u16,
        width: (clip_right - clip_left) as u16,
        height: (clip_bottom - clip_top) as u16,
    })
}
