pub mod autocomplete;
pub mod form_view;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use super::app::App;

/// Main render function: title, form, status row, then the dropdown on top
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: title (2 rows) | form | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // title + separator
            Constraint::Min(1),    // form
            Constraint::Length(1), // status row
        ])
        .split(area);

    let title = Line::from(Span::styled(
        format!(" {}", app.title()),
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.background)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(title).style(bg_style), chunks[0]);

    let anchor = form_view::render_form_view(frame, app, chunks[1]);
    status_row::render_status_row(frame, app, chunks[2]);

    // Dropdown floats over everything else
    if let Some(anchor) = anchor {
        autocomplete::render_autocomplete(frame, app, anchor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormField;
    use std::time::{Duration, Instant};
    use super::test_helpers::*;

    #[test]
    fn test_full_screen_with_open_dropdown() {
        let mut app = demo_app();
        let t0 = Instant::now();
        app.focus = FormField::Supplier;
        app.supplier_combo.input("tech", app.form.supplier_mut(), t0);
        settle(&mut app, t0 + Duration::from_millis(300));

        let out = render_to_string(TERM_W, TERM_H, |frame, _| {
            render(frame, &app);
        });
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], " Add warehouse item");
        assert!(lines[6].contains("Supplier") && lines[6].contains("tech"));
        // Dropdown sits directly below the supplier row
        assert!(lines[8].contains("Tashkent Tech"));
        assert!(lines[TERM_H as usize - 1].ends_with("Esc close"));
    }

    #[test]
    fn test_edit_title() {
        let app = demo_edit_app(2);
        let out = render_to_string(TERM_W, TERM_H, |frame, _| {
            render(frame, &app);
        });
        assert!(out.starts_with(" Edit warehouse item #2"));
        assert!(out.contains("Thermal paper roll"));
    }
}
