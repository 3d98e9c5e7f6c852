use ratatui::{buffer::Buffer, layout::Rect, style::Style, Frame};

use crate::scroll::ScrollbarThumb;
use crate::theme::Theme;

pub struct ScrollbarWidget;

impl ScrollbarWidget {
    /// Draw `thumb` along the longer side of `area`
    pub fn render(frame: &mut Frame, area: Rect, thumb: &ScrollbarThumb, theme: &Theme) {
        Self::draw(frame.buffer_mut(), area, thumb, theme);
    }

    fn draw(buf: &mut Buffer, area: Rect, thumb: &ScrollbarThumb, theme: &Theme) {
        let vertical = area.height >= area.width;
        let track_len = if vertical { area.height } else { area.width };
        let track_style = Style::default().fg(theme.track).bg(theme.bg0);

        if !thumb.is_visible() {
            for i in 0..track_len {
                let (x, y) = cell(area, vertical, i);
                buf.set_string(x, y, " ", track_style);
            }
            return;
        }

        let (offset, len) = thumb.span(track_len);
        let thumb_style = Style::default().fg(theme.thumb).bg(theme.bg0);
        for i in 0..track_len {
            let (x, y) = cell(area, vertical, i);
            if i >= offset && i < offset + len {
                buf.set_string(x, y, "█", thumb_style);
            } else if vertical {
                buf.set_string(x, y, "│", track_style);
            } else {
                buf.set_string(x, y, "─", track_style);
            }
        }
    }
}

fn cell(area: Rect, vertical: bool, i: u16) -> (u16, u16) {
    if vertical {
        (area.x, area.y + i)
    } else {
        (area.x + i, area.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_visible_thumb() {
        let area = Rect::new(0, 0, 1, 10);
        let mut buf = Buffer::empty(area);
        let mut thumb = ScrollbarThumb::new(0.05);
        thumb.update(500.0, 2000.0, 1500.0);
        thumb.show();

        ScrollbarWidget::draw(&mut buf, area, &thumb, &Theme::default());
        // 3-cell thumb at the end of a 10-cell track
        assert_eq!(buf[(0, 0)].symbol(), "│");
        assert_eq!(buf[(0, 6)].symbol(), "│");
        assert_eq!(buf[(0, 7)].symbol(), "█");
        assert_eq!(buf[(0, 9)].symbol(), "█");
    }

    #[test]
    fn test_hidden_thumb_clears_track() {
        let area = Rect::new(0, 0, 6, 1);
        let mut buf = Buffer::empty(area);
        let thumb = ScrollbarThumb::new(0.05);

        ScrollbarWidget::draw(&mut buf, area, &thumb, &Theme::default());
        assert_eq!(buf[(3, 0)].symbol(), " ");
    }
}
