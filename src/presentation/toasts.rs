use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use super::view::ToastRender;

const MARGIN: u16 = 1;

/// Stack toasts in the top-right corner, newest at the bottom.
pub fn render_toasts(frame: &mut Frame<'_>, toasts: &[ToastRender<'_>]) {
    let screen = frame.area();
    let mut y = screen.y.saturating_add(MARGIN);
    for toast in toasts {
        let width = (toast.message.width() as u16)
            .saturating_add(4)
            .min(screen.width.saturating_sub(MARGIN * 2));
        if width < 5 || y.saturating_add(3) > screen.bottom() {
            break;
        }
        let x = screen.right().saturating_sub(width + MARGIN);
        let area = Rect::new(x, y, width, 3);

        let colour = if toast.error {
            Color::Rgb(0xe7, 0x4c, 0x3c)
        } else {
            Color::Rgb(0x29, 0x80, 0xb9)
        };
        let mut style = Style::default().fg(Color::White).bg(colour);
        if toast.fading {
            style = style.add_modifier(Modifier::DIM);
        }
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(toast.message.to_string())
                .style(style)
                .block(Block::default().borders(Borders::ALL).border_style(style)),
            area,
        );
        y = y.saturating_add(3);
    }
}
