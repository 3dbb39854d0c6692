use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::combo::Label;
use crate::form::FormField;
use crate::tui::app::App;

/// Columns reserved for field labels
pub const LABEL_W: u16 = 18;

const CHOICE_PLACEHOLDER: &str = "Choose...";

/// Render the item form. Returns the value area of the focused field
/// when it hosts a combobox, so the dropdown can anchor below it.
pub fn render_form_view(frame: &mut Frame, app: &App, area: Rect) -> Option<Rect> {
    let bg = app.theme.background;
    let mut lines: Vec<Line> = Vec::new();
    let mut anchor = None;

    for &field in app.form.fields() {
        let focused = field == app.focus;
        let row_y = area.y + lines.len() as u16;

        let label_style = if focused {
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text).bg(bg)
        };
        let marker = if focused { "\u{25B8} " } else { "  " };
        let label = format!("{}{}", marker, field.label());

        let mut spans = vec![Span::styled(
            format!("{:<width$}", label, width = LABEL_W as usize),
            label_style,
        )];
        spans.extend(value_spans(app, field));
        let is_choice = matches!(field, FormField::Currency | FormField::Status);
        if focused && !is_choice {
            spans.push(Span::styled(
                "\u{258C}",
                Style::default().fg(app.theme.highlight).bg(bg),
            ));
        }
        lines.push(Line::from(spans));

        let hosts_combo = matches!(field, FormField::Name | FormField::Supplier);
        if focused && hosts_combo && row_y < area.bottom() {
            anchor = Some(Rect::new(
                area.x + LABEL_W,
                row_y,
                area.width.saturating_sub(LABEL_W),
                1,
            ));
        }

        if let Some(msg) = app.errors.get(&field) {
            lines.push(Line::from(vec![
                Span::styled(" ".repeat(LABEL_W as usize), Style::default().bg(bg)),
                Span::styled(msg.clone(), Style::default().fg(app.theme.red).bg(bg)),
            ]));
        }
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
    anchor
}

fn value_spans(app: &App, field: FormField) -> Vec<Span<'static>> {
    let bg = app.theme.background;
    let text = Style::default().fg(app.theme.text_bright).bg(bg);
    let dim = Style::default().fg(app.theme.dim).bg(bg);

    let label_span = |label: Label| match label {
        Label::Placeholder(s) => Span::styled(s, dim),
        Label::Text(s) => Span::styled(s, text),
        Label::Selection(s) => Span::styled(s, text.add_modifier(Modifier::BOLD)),
    };

    match field {
        FormField::Name => vec![label_span(app.name_combo.label(app.form.name()))],
        FormField::Supplier => vec![label_span(app.supplier_combo.label(app.form.supplier()))],
        FormField::Currency => {
            choice_spans(app.form.currency().map(|c| c.code()), field == app.focus, text, dim)
        }
        FormField::Status => {
            choice_spans(app.form.status().map(|s| s.label()), field == app.focus, text, dim)
        }
        FormField::SerialNumbers => {
            let serials = app
                .form
                .text_field(field)
                .map(|v| v.as_str().split('\n').collect::<Vec<_>>().join(", "))
                .unwrap_or_default();
            vec![Span::styled(serials, text)]
        }
        other => {
            let value = app
                .form
                .text_field(other)
                .map(|v| v.as_str().to_string())
                .unwrap_or_default();
            vec![Span::styled(value, text)]
        }
    }
}

/// A value picked with Left/Right, with arrows while focused
fn choice_spans(
    value: Option<&'static str>,
    focused: bool,
    text: Style,
    dim: Style,
) -> Vec<Span<'static>> {
    match value {
        Some(v) if focused => vec![
            Span::styled("\u{2039} ", dim),
            Span::styled(v, text),
            Span::styled(" \u{203A}", dim),
        ],
        Some(v) => vec![Span::styled(v, text)],
        None => vec![Span::styled(CHOICE_PLACEHOLDER, dim)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combo::FieldValue;
    use crate::model::Currency;
    use crate::tui::render::test_helpers::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_form() {
        let app = demo_app();
        let out = render_to_string(TERM_W, 8, |frame, area| {
            render_form_view(frame, &app, area);
        });
        let expected = [
            "\u{25B8} Product         Select...\u{258C}",
            "  Quantity",
            "  Purchase price",
            "  Currency        Choose...",
            "  Supplier        Select...",
            "  Serial numbers",
        ]
        .join("\n");
        assert_eq!(out, expected);
    }

    #[test]
    fn test_errors_render_under_their_fields() {
        let mut app = demo_app();
        app.submit();
        let out = render_to_string(TERM_W, 12, |frame, area| {
            render_form_view(frame, &app, area);
        });
        assert!(out.contains("Product name is required."));
        assert!(out.contains("Choose a supplier."));
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].contains("Product"));
        assert_eq!(lines[1].trim(), "Product name is required.");
    }

    #[test]
    fn test_values_and_anchor() {
        let mut app = demo_app();
        *app.form.text_field_mut(FormField::Price).unwrap() = FieldValue::new("12.50");
        app.form.set_currency(Currency::Uzs);
        *app.form.text_field_mut(FormField::SerialNumbers).unwrap() = FieldValue::new("A1\nA2");
        app.focus = FormField::Supplier;

        let mut anchor = None;
        let out = render_to_string(TERM_W, 8, |frame, area| {
            anchor = render_form_view(frame, &app, area);
        });
        assert!(out.contains("12.50"));
        assert!(out.contains("UZS"));
        assert!(out.contains("A1, A2"));
        assert_eq!(anchor, Some(Rect::new(LABEL_W, 4, TERM_W - LABEL_W, 1)));
    }

    #[test]
    fn test_edit_form_rows() {
        let mut app = demo_edit_app(1);
        app.focus = FormField::Status;
        let out = render_to_string(TERM_W, 8, |frame, area| {
            render_form_view(frame, &app, area);
        });
        let expected = [
            "  Product         Barcode scanner",
            "\u{25B8} Status          \u{2039} In stock \u{203A}",
            "  Purchase price  45.5",
            "  Currency        USD",
            "  Supplier        Tashkent Tech",
            "  Serial number   100-12341654",
        ]
        .join("\n");
        assert_eq!(out, expected);
    }
}
