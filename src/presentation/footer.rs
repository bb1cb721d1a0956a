use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::view::UiContext;

pub fn render_footer(frame: &mut Frame<'_>, area: Rect, ctx: &UiContext<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let mut status = ctx.status_message.to_string();
    if let Some(label) = &ctx.focus_label {
        status.push_str(" • focus: ");
        status.push_str(label);
    }
    if status.trim().is_empty() {
        status = "Ready".to_string();
    }
    let badge = if ctx.channels_ready {
        Span::styled(" [sources ok]", Style::default().fg(Color::Green))
    } else {
        Span::styled(" [no source]", Style::default().fg(Color::Red))
    };
    let status_widget = Paragraph::new(Line::from(vec![Span::raw(status), badge]))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(status_widget, chunks[0]);

    let help_text = ctx.help.unwrap_or(" ");
    let help_widget = Paragraph::new(help_text.to_string())
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title("Actions"));
    frame.render_widget(help_widget, chunks[1]);
}
