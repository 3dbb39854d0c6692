pub mod autocomplete;
pub mod debounce;
pub mod fetch;
pub mod field;

pub use autocomplete::{
    Autocomplete, ComboState, DEFAULT_PLACEHOLDER, FnFormat, ItemFormat, Label, ListView,
    SuggestionRow,
};
pub use debounce::Debouncer;
pub use fetch::{FetchError, FetchResponse, Fetcher, SuggestionSource};
pub use field::{BoundField, FieldValue};
