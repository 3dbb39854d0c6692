use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::form::FormField;
use crate::tui::app::{App, StatusKind};

/// Key hints for the focused field
fn hint(app: &App) -> &'static str {
    match app.focus {
        FormField::Name | FormField::Supplier if app.list_open() => {
            "\u{2191}\u{2193} move  Enter pick  Esc close"
        }
        FormField::Currency => "\u{2190}\u{2192} currency  Tab next  Ctrl-S save",
        FormField::Status => "\u{2190}\u{2192} status  Tab next  Ctrl-S save",
        _ => "Tab next  Ctrl-S save  Esc quit",
    }
}

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans = Vec::new();
    if let Some(status) = &app.status {
        let color = match status.kind {
            StatusKind::Success => app.theme.green,
            StatusKind::Error => app.theme.red,
        };
        spans.push(Span::styled(
            status.text.clone(),
            Style::default().fg(color).bg(bg),
        ));
    }

    let hint = hint(app);
    let content_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let hint_width = hint.chars().count();
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
