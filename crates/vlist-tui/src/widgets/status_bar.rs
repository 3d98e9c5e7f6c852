use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::focus::ContainerRestrict;
use crate::scroll::{ScrollEventKind, ScrollState};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let coordinator = app.list.coordinator();

        let state_str = match coordinator.state() {
            ScrollState::Idle => "IDLE",
            ScrollState::Dragging => "DRAG",
            ScrollState::Animating => "ANIM",
        };
        let restrict_str = match app.restrict() {
            ContainerRestrict::SelfFirst => "self-first",
            ContainerRestrict::SelfOnly => "self-only",
        };
        let event_str = match app.last_event.map(|event| event.kind) {
            Some(ScrollEventKind::Start) => "start",
            Some(ScrollEventKind::Scroll) => "scroll",
            Some(ScrollEventKind::Stop) => "stop",
            None => "-",
        };
        let visible = app.list.window_manager().more_info();
        let position = coordinator.position();

        let status_text = format!(
            " {} | pos {:.0},{:.0} | visible {}-{} | focus {} | {} | last {}",
            state_str,
            position.left,
            position.top,
            fmt_index(visible.first_visible_index),
            fmt_index(visible.last_visible_index),
            fmt_index(app.focused_index()),
            restrict_str,
            event_str,
        );

        let help_hint = " q:quit hjkl:move C-f/C-b:page gg/G:jump ";
        let padding_len = area
            .width
            .saturating_sub(status_text.len() as u16 + help_hint.len() as u16)
            as usize;

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}

fn fmt_index(index: Option<usize>) -> String {
    index.map_or_else(|| "-".to_string(), |i| i.to_string())
}
