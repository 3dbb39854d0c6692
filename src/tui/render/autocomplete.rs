use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::combo::{ListView, SuggestionRow};
use crate::form::FormField;
use crate::tui::app::App;

const NO_MATCHES: &str = "No matches";

/// The focused field's dropdown contents
fn focused_list(app: &App) -> ListView {
    match app.focus {
        FormField::Name => app.name_combo.list_view(app.form.name()),
        FormField::Supplier => app.supplier_combo.list_view(app.form.supplier()),
        _ => ListView::Hidden,
    }
}

/// Render the suggestion dropdown floating below the focused field
pub fn render_autocomplete(frame: &mut Frame, app: &App, anchor: Rect) {
    let rows = match focused_list(app) {
        ListView::Hidden => return,
        ListView::NoMatches => None,
        ListView::Suggestions(rows) => Some(rows),
    };

    let bg = app.theme.background;
    let dim = app.theme.dim;
    let max_visible = app.max_visible;

    let count = rows.as_ref().map_or(1, |r| r.len().min(max_visible));

    // Widest entry + prefix, current marker, borders
    let max_width = match &rows {
        Some(rows) => {
            rows.iter()
                .map(|r| UnicodeWidthStr::width(r.label.as_str()))
                .max()
                .unwrap_or(10)
                + 8
        }
        None => NO_MATCHES.len() + 4,
    };

    let popup_w = (max_width as u16)
        .min(anchor.width.saturating_sub(2))
        .max(12);
    let popup_h = (count as u16) + 2; // +2 for borders

    // Below the field, or above it when there is no room
    let term_area = frame.area();
    let y = if anchor.y + anchor.height + popup_h <= term_area.height {
        anchor.y + anchor.height
    } else {
        anchor.y.saturating_sub(popup_h)
    };
    let x = anchor.x.min(term_area.width.saturating_sub(popup_w));
    let popup_area = Rect::new(x, y, popup_w, popup_h);

    let inner_w = (popup_w as usize).saturating_sub(2);
    let lines: Vec<Line> = match &rows {
        None => vec![Line::from(Span::styled(
            format!(" {NO_MATCHES}"),
            Style::default()
                .fg(dim)
                .bg(bg)
                .add_modifier(Modifier::ITALIC),
        ))],
        Some(rows) => {
            let highlight = rows.iter().position(|r| r.highlighted).unwrap_or(0);
            // Scroll window around the highlighted row
            let scroll_start = if highlight >= max_visible {
                highlight - max_visible + 1
            } else {
                0
            };
            rows.iter()
                .skip(scroll_start)
                .take(max_visible)
                .map(|row| suggestion_line(app, row, inner_w))
                .collect()
        }
    };

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.selection_border).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, popup_area);
}

fn suggestion_line(app: &App, row: &SuggestionRow, inner_w: usize) -> Line<'static> {
    let bg = app.theme.background;
    let style = if row.highlighted {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(bg)
    };

    let prefix = if row.highlighted { " \u{25B8} " } else { "   " };
    let mark = if row.is_current { " \u{2713}" } else { "  " };
    let label_w = inner_w.saturating_sub(prefix.chars().count() + mark.chars().count());
    let pad = label_w.saturating_sub(UnicodeWidthStr::width(row.label.as_str()));

    Line::from(vec![
        Span::styled(prefix, style),
        Span::styled(format!("{}{}", row.label, " ".repeat(pad)), style),
        Span::styled(mark, style.fg(app.theme.green)),
    ])
}
