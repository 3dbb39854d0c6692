use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_segmentation::UnicodeSegmentation;

use crate::combo::{BoundField, FieldValue};
use crate::form::FormField;
use crate::model::{Currency, ItemStatus};

use super::app::App;

/// Handle a key event on the form
pub fn handle_key(app: &mut App, key: KeyEvent) {
    handle_key_at(app, key, Instant::now());
}

/// `handle_key` with an explicit clock, so debounce timing is testable
pub fn handle_key_at(app: &mut App, key: KeyEvent, now: Instant) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    match (key.modifiers, key.code) {
        (m, KeyCode::Char('c')) if m.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        (m, KeyCode::Char('s')) if m.contains(KeyModifiers::CONTROL) => {
            app.submit();
        }
        (_, KeyCode::Esc) => {
            if app.list_open() {
                dismiss_focused(app);
            } else {
                app.should_quit = true;
            }
        }
        (_, KeyCode::Tab) => app.focus_next(),
        (_, KeyCode::BackTab) => app.focus_prev(),
        (_, KeyCode::Up) => {
            if !move_highlight(app, -1) {
                app.focus_prev();
            }
        }
        (_, KeyCode::Down) => {
            if !move_highlight(app, 1) {
                app.focus_next();
            }
        }
        (_, KeyCode::Enter) => handle_enter(app, now),
        (_, KeyCode::Left | KeyCode::Right) if app.focus == FormField::Currency => {
            cycle_currency(app);
        }
        (_, KeyCode::Left) if app.focus == FormField::Status => cycle_status(app, false),
        (_, KeyCode::Right) if app.focus == FormField::Status => cycle_status(app, true),
        (_, KeyCode::Backspace) => {
            edit_focused(app, now, Edit::Pop);
        }
        (m, KeyCode::Char(c))
            if !m.contains(KeyModifiers::CONTROL) && !m.contains(KeyModifiers::ALT) =>
        {
            match app.focus {
                FormField::Currency => pick_currency_by_letter(app, c),
                FormField::Status => pick_status_by_letter(app, c),
                _ => edit_focused(app, now, Edit::Push(c)),
            }
        }
        _ => {}
    }
}

#[derive(Clone, Copy)]
enum Edit {
    Push(char),
    Pop,
}

fn edit_focused(app: &mut App, now: Instant, edit: Edit) {
    let focus = app.focus;
    match (focus, edit) {
        (FormField::Name, Edit::Push(c)) => app.name_combo.push_char(c, app.form.name_mut(), now),
        (FormField::Name, Edit::Pop) => app.name_combo.pop_char(app.form.name_mut(), now),
        (FormField::Supplier, Edit::Push(c)) => {
            app.supplier_combo.push_char(c, app.form.supplier_mut(), now)
        }
        (FormField::Supplier, Edit::Pop) => {
            app.supplier_combo.pop_char(app.form.supplier_mut(), now)
        }
        (_, edit) => {
            let Some(field) = app.form.text_field_mut(focus) else {
                return;
            };
            match edit {
                Edit::Push(c) => push_char(field, c),
                Edit::Pop => pop_grapheme(field),
            }
        }
    }
    app.errors.shift_remove(&focus);
}

fn push_char(field: &mut FieldValue, c: char) {
    let mut text = field.as_str().to_string();
    text.push(c);
    field.set_value(text);
}

fn pop_grapheme(field: &mut FieldValue) {
    let text = field.as_str();
    let cut = text.grapheme_indices(true).next_back().map_or(0, |(i, _)| i);
    let text = text[..cut].to_string();
    field.set_value(text);
}

/// Move the focused dropdown's cursor. False when no list is showing.
fn move_highlight(app: &mut App, delta: isize) -> bool {
    match app.focus {
        FormField::Name if app.name_combo.is_list_visible() => {
            app.name_combo.move_highlight(delta);
            true
        }
        FormField::Supplier if app.supplier_combo.is_list_visible() => {
            app.supplier_combo.move_highlight(delta);
            true
        }
        _ => false,
    }
}

fn dismiss_focused(app: &mut App) {
    match app.focus {
        FormField::Name => app.name_combo.dismiss(),
        FormField::Supplier => app.supplier_combo.dismiss(),
        _ => {}
    }
}

fn handle_enter(app: &mut App, now: Instant) {
    let picked = match app.focus {
        FormField::Name => app.name_combo.select_highlighted(app.form.name_mut()),
        FormField::Supplier => app.supplier_combo.select_highlighted(app.form.supplier_mut()),
        FormField::SerialNumbers => {
            // One serial number per line
            edit_focused(app, now, Edit::Push('\n'));
            return;
        }
        _ => false,
    };
    if picked {
        app.errors.shift_remove(&app.focus);
    } else {
        app.focus_next();
    }
}

fn cycle_currency(app: &mut App) {
    app.form.set_currency(match app.form.currency() {
        Some(c) => c.next(),
        None => Currency::ALL[0],
    });
    app.errors.shift_remove(&FormField::Currency);
}

fn cycle_status(app: &mut App, forward: bool) {
    app.form.set_status(match app.form.status() {
        Some(s) if forward => s.next(),
        Some(s) => s.prev(),
        None => ItemStatus::ALL[0],
    });
    app.errors.shift_remove(&FormField::Status);
}

fn pick_currency_by_letter(app: &mut App, c: char) {
    let c = c.to_ascii_uppercase();
    if let Some(currency) = Currency::ALL
        .iter()
        .copied()
        .find(|cur| cur.code().starts_with(c))
    {
        app.form.set_currency(currency);
        app.errors.shift_remove(&FormField::Currency);
    }
}

/// I(n stock), S(old) or R(efund)
fn pick_status_by_letter(app: &mut App, c: char) {
    let c = c.to_ascii_uppercase();
    if let Some(status) = ItemStatus::ALL
        .iter()
        .copied()
        .find(|s| s.key().starts_with(c))
    {
        app.form.set_status(status);
        app.errors.shift_remove(&FormField::Status);
    }
}
