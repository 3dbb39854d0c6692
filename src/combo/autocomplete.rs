use std::sync::Arc;
use std::time::{Duration, Instant};

use unicode_segmentation::UnicodeSegmentation;

use super::debounce::Debouncer;
use super::fetch::{Fetcher, SuggestionSource};
use super::field::BoundField;

/// Label shown on an empty field when no placeholder is configured
pub const DEFAULT_PLACEHOLDER: &str = "Select...";

/// How a suggestion is shown and which string identifies it.
///
/// The key is what lands in the bound field on selection and is also the
/// equality used to mark the current row.
pub trait ItemFormat<T> {
    fn render_item(&self, item: &T) -> String;
    fn get_key(&self, item: &T) -> String;
}

/// `ItemFormat` built from two closures
#[derive(Clone)]
pub struct FnFormat<R, K> {
    render: R,
    key: K,
}

impl<R, K> FnFormat<R, K> {
    pub fn new(render: R, key: K) -> Self {
        FnFormat { render, key }
    }
}

impl<T, R, K> ItemFormat<T> for FnFormat<R, K>
where
    R: Fn(&T) -> String,
    K: Fn(&T) -> String,
{
    fn render_item(&self, item: &T) -> String {
        (self.render)(item)
    }

    fn get_key(&self, item: &T) -> String {
        (self.key)(item)
    }
}

/// Where the combobox stands between typed text and a confirmed pick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComboState {
    /// No text, no selection
    Idle,
    /// Text present without a confirmed selection
    Typing,
    /// Text equals the selected item's key
    Selected,
    /// A selection existed but the text was just edited away from its key
    DirtyAfterSelect,
}

/// What the closed field shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    Placeholder(String),
    Text(String),
    Selection(String),
}

impl Label {
    pub fn as_str(&self) -> &str {
        match self {
            Label::Placeholder(s) | Label::Text(s) | Label::Selection(s) => s,
        }
    }
}

/// One visible suggestion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRow {
    pub label: String,
    pub key: String,
    /// Key equals the bound field's value
    pub is_current: bool,
    /// Keyboard cursor is on this row
    pub highlighted: bool,
}

/// What the dropdown shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Hidden,
    NoMatches,
    Suggestions(Vec<SuggestionRow>),
}

/// Debounced remote-search combobox bound to a host form field.
///
/// The owner forwards edits through `input` (or `push_char`/`pop_char`)
/// and calls `tick` from its event loop; `tick` fires the debounced lookup
/// and applies the response to the latest lookup only.
pub struct Autocomplete<T, F> {
    format: F,
    placeholder: String,
    query: String,
    suggestions: Vec<T>,
    open: bool,
    selected: Option<T>,
    state: ComboState,
    highlight: usize,
    debounce: Debouncer<String>,
    fetcher: Fetcher<T>,
}

impl<T, F> Autocomplete<T, F>
where
    T: Clone + Send + 'static,
    F: ItemFormat<T>,
{
    pub fn new(source: Arc<dyn SuggestionSource<T>>, format: F, delay: Duration) -> Self {
        Autocomplete {
            format,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            query: String::new(),
            suggestions: Vec::new(),
            open: false,
            selected: None,
            state: ComboState::Idle,
            highlight: 0,
            debounce: Debouncer::new(delay),
            fetcher: Fetcher::new(source),
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    // -----------------------------------------------------------------------
    // Accessors

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn state(&self) -> ComboState {
        self.state
    }

    pub fn selected(&self) -> Option<&T> {
        self.selected.as_ref()
    }

    pub fn suggestions(&self) -> &[T] {
        &self.suggestions
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn highlight(&self) -> usize {
        self.highlight
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// True only while a non-empty suggestion list is shown
    pub fn is_list_visible(&self) -> bool {
        self.open && !self.suggestions.is_empty()
    }

    /// A lookup is scheduled or in flight
    pub fn is_pending(&self) -> bool {
        self.debounce.is_armed() || self.fetcher.is_pending()
    }

    /// When the scheduled lookup will fire, if one is scheduled
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }

    // -----------------------------------------------------------------------
    // Editing

    /// Replace the typed text. The bound field always follows the raw text.
    pub fn input(&mut self, text: &str, field: &mut impl BoundField, now: Instant) {
        self.query = text.to_string();
        field.set_value(self.query.clone());

        if self.query.is_empty() {
            self.selected = None;
            self.state = ComboState::Idle;
            self.close_and_forget();
            self.suggestions.clear();
            return;
        }

        if let Some(item) = &self.selected {
            if self.format.get_key(item) == self.query {
                self.state = ComboState::Selected;
                self.debounce.cancel();
                return;
            }
            // The text no longer names the picked item
            self.selected = None;
            self.state = ComboState::DirtyAfterSelect;
        } else {
            self.state = ComboState::Typing;
        }

        self.highlight = 0;
        self.debounce.arm(now, self.query.clone());
    }

    pub fn push_char(&mut self, c: char, field: &mut impl BoundField, now: Instant) {
        let mut text = self.query.clone();
        text.push(c);
        self.input(&text, field, now);
    }

    /// Remove the last grapheme
    pub fn pop_char(&mut self, field: &mut impl BoundField, now: Instant) {
        let cut = self
            .query
            .grapheme_indices(true)
            .next_back()
            .map_or(0, |(i, _)| i);
        let text = self.query[..cut].to_string();
        self.input(&text, field, now);
    }

    // -----------------------------------------------------------------------
    // Event loop

    /// Fire a due lookup and apply a fresh response. Returns true when the
    /// suggestion list changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let Some(query) = self.debounce.take_due(now) {
            self.fetcher.issue(query);
        }

        let Some(resp) = self.fetcher.poll() else {
            return false;
        };
        match resp.result {
            Ok(items) => {
                self.suggestions = items;
                self.highlight = 0;
                self.open = true;
                true
            }
            Err(e) => {
                log::warn!("error fetching suggestions for {:?}: {}", resp.query, e);
                false
            }
        }
    }

    // -----------------------------------------------------------------------
    // Selection

    /// Pick the suggestion at `index`. The bound field receives its key.
    pub fn select(&mut self, index: usize, field: &mut impl BoundField) -> bool {
        let Some(item) = self.suggestions.get(index).cloned() else {
            return false;
        };
        let key = self.format.get_key(&item);
        self.query = key.clone();
        field.set_value(key);
        self.selected = Some(item);
        self.state = ComboState::Selected;
        self.close_and_forget();
        true
    }

    pub fn select_highlighted(&mut self, field: &mut impl BoundField) -> bool {
        if !self.is_list_visible() {
            return false;
        }
        self.select(self.highlight, field)
    }

    /// Move the keyboard cursor, wrapping at both ends
    pub fn move_highlight(&mut self, delta: isize) {
        let len = self.suggestions.len();
        if !self.is_list_visible() || len == 0 {
            return;
        }
        let len = len as isize;
        self.highlight = (self.highlight as isize + delta).rem_euclid(len) as usize;
    }

    /// Close the list and drop any scheduled or in-flight lookup
    pub fn dismiss(&mut self) {
        self.close_and_forget();
    }

    /// Start over from a value the host form already holds, e.g. a
    /// prefilled edit form. The text becomes the query; nothing is fetched
    /// until the next edit.
    pub fn seed_from(&mut self, field: &impl BoundField) {
        self.query = field.value().to_string();
        self.suggestions.clear();
        self.selected = None;
        self.state = if self.query.is_empty() {
            ComboState::Idle
        } else {
            ComboState::Typing
        };
        self.close_and_forget();
    }

    /// Back to `Idle` after the host form reset its values
    pub fn reset(&mut self) {
        self.query.clear();
        self.suggestions.clear();
        self.selected = None;
        self.state = ComboState::Idle;
        self.close_and_forget();
    }

    fn close_and_forget(&mut self) {
        self.open = false;
        self.highlight = 0;
        self.debounce.cancel();
        self.fetcher.invalidate();
    }

    // -----------------------------------------------------------------------
    // Rendering

    pub fn label(&self, field: &impl BoundField) -> Label {
        match &self.selected {
            Some(item) if self.format.get_key(item) == self.query => {
                Label::Selection(self.format.render_item(item))
            }
            _ if field.value().is_empty() => Label::Placeholder(self.placeholder.clone()),
            _ => Label::Text(field.value().to_string()),
        }
    }

    pub fn list_view(&self, field: &impl BoundField) -> ListView {
        if !self.open || self.query.is_empty() {
            return ListView::Hidden;
        }
        if self.suggestions.is_empty() {
            return ListView::NoMatches;
        }
        let rows = self
            .suggestions
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let key = self.format.get_key(item);
                SuggestionRow {
                    label: self.format.render_item(item),
                    is_current: key == field.value(),
                    highlighted: i == self.highlight,
                    key,
                }
            })
            .collect();
        ListView::Suggestions(rows)
    }
}

impl<T, F> Drop for Autocomplete<T, F> {
    fn drop(&mut self) {
        self.debounce.cancel();
        self.fetcher.invalidate();
    }
}
