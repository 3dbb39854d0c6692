use indexmap::IndexMap;
use serde::Serialize;

use crate::api::ApiError;
use crate::combo::FieldValue;

/// Fields of the add and edit forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Name,
    Quantity,
    Price,
    Currency,
    Supplier,
    Status,
    SerialNumber,
    SerialNumbers,
}

impl FormField {
    /// Add form, in display order
    pub const ADD_ORDER: [FormField; 6] = [
        FormField::Name,
        FormField::Quantity,
        FormField::Price,
        FormField::Currency,
        FormField::Supplier,
        FormField::SerialNumbers,
    ];

    /// Edit form, in display order
    pub const EDIT_ORDER: [FormField; 6] = [
        FormField::Name,
        FormField::Status,
        FormField::Price,
        FormField::Currency,
        FormField::Supplier,
        FormField::SerialNumber,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Product",
            FormField::Quantity => "Quantity",
            FormField::Price => "Purchase price",
            FormField::Currency => "Currency",
            FormField::Supplier => "Supplier",
            FormField::Status => "Status",
            FormField::SerialNumber => "Serial number",
            FormField::SerialNumbers => "Serial numbers",
        }
    }

    fn index_in(self, order: &[FormField]) -> usize {
        order.iter().position(|f| *f == self).unwrap_or(0)
    }

    /// Next field in `order` for Tab, wrapping
    pub fn next_in(self, order: &[FormField]) -> FormField {
        order[(self.index_in(order) + 1) % order.len()]
    }

    /// Previous field in `order` for Shift-Tab, wrapping
    pub fn prev_in(self, order: &[FormField]) -> FormField {
        let n = order.len();
        order[(self.index_in(order) + n - 1) % n]
    }
}

/// Validation messages keyed by field, in field order
pub type FieldErrors = IndexMap<FormField, String>;

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("{} field(s) need attention", .0.len())]
    Invalid(FieldErrors),
    #[error("could not store item: {0}")]
    Store(#[from] ApiError),
}

// ---------------------------------------------------------------------------
// Checks shared by both forms

/// Trimmed text, or `message` under `field` when blank
pub(super) fn required_text(
    value: &FieldValue,
    field: FormField,
    message: &str,
    errors: &mut FieldErrors,
) -> Option<String> {
    if value.is_blank() {
        errors.insert(field, message.into());
        return None;
    }
    Some(value.as_str().trim().to_string())
}

/// Trimmed text, or None when blank
pub(super) fn optional_text(value: &FieldValue) -> Option<String> {
    if value.is_blank() {
        None
    } else {
        Some(value.as_str().trim().to_string())
    }
}

pub(super) fn required_choice<T: Copy>(
    value: Option<T>,
    field: FormField,
    message: &str,
    errors: &mut FieldErrors,
) -> Option<T> {
    if value.is_none() {
        errors.insert(field, message.into());
    }
    value
}

/// A finite, non-negative purchase price
pub(super) fn price(value: &FieldValue, errors: &mut FieldErrors) -> Option<f64> {
    if value.is_blank() {
        errors.insert(FormField::Price, "Enter the purchase price.".into());
        return None;
    }
    match value.as_str().trim().parse::<f64>() {
        Ok(p) if p.is_finite() && p >= 0.0 => Some(p),
        _ => {
            errors.insert(
                FormField::Price,
                "Price must be a non-negative number.".into(),
            );
            None
        }
    }
}
