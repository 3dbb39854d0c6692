use std::thread;
use std::time::{Duration, Instant};

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::api::Backend;
use crate::model::AppConfig;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// An app over the demo catalog with no simulated latency.
pub fn demo_app() -> App {
    App::new(Backend::demo(Duration::ZERO), &AppConfig::default())
}

/// The edit form for demo item `id`
pub fn demo_edit_app(id: u64) -> App {
    let backend = Backend::demo(Duration::ZERO);
    let item = backend.store.get_item(id).unwrap();
    App::edit(backend, &AppConfig::default(), &item)
}

/// Tick at `now` until neither combobox has a lookup scheduled or in flight.
pub fn settle(app: &mut App, now: Instant) {
    let give_up = Instant::now() + Duration::from_secs(5);
    app.tick(now);
    while (app.name_combo.is_pending() || app.supplier_combo.is_pending())
        && Instant::now() < give_up
    {
        thread::sleep(Duration::from_millis(2));
        app.tick(now);
    }
}
