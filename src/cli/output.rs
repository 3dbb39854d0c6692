use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::form::FieldErrors;
use crate::model::{NewWarehouseItem, Product, Supplier, WarehouseItem, WarehouseItemUpdate};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct AddedJson<'a> {
    pub stored: &'a NewWarehouseItem,
}

#[derive(Serialize)]
pub struct UpdatedJson<'a> {
    pub id: u64,
    pub updated: &'a WarehouseItemUpdate,
}

#[derive(Serialize)]
pub struct ErrorsJson<'a> {
    pub errors: &'a FieldErrors,
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// Pad `s` with spaces to `width` display columns
fn pad(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(w)))
}

fn id_width<I: Iterator<Item = u64>>(ids: I) -> usize {
    ids.map(|id| id.to_string().len()).max().unwrap_or(1)
}

pub fn format_suppliers(suppliers: &[Supplier]) -> String {
    let w = id_width(suppliers.iter().map(|s| s.id));
    suppliers
        .iter()
        .map(|s| format!("{:>w$}  {}\n", s.id, s.name, w = w))
        .collect()
}

pub fn format_products(products: &[Product]) -> String {
    let w = id_width(products.iter().map(|p| p.id));
    products
        .iter()
        .map(|p| format!("{:>w$}  {}\n", p.id, p.name, w = w))
        .collect()
}

pub fn format_items(items: &[WarehouseItem]) -> String {
    let id_w = id_width(items.iter().map(|i| i.id));
    let name_w = items
        .iter()
        .map(|i| UnicodeWidthStr::width(i.name.as_str()))
        .max()
        .unwrap_or(0);
    let supplier_w = items
        .iter()
        .map(|i| UnicodeWidthStr::width(i.supplier.name.as_str()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for item in items {
        let serial = if item.serial_number.is_empty() {
            "-"
        } else {
            item.serial_number.as_str()
        };
        let line = format!(
            "{:>id_w$}  {}  {}  {:>10.2} {}  {}  {}",
            item.id,
            pad(&item.name, name_w),
            pad(&item.supplier.name, supplier_w),
            item.price,
            item.currency_key,
            item.date,
            serial,
            id_w = id_w,
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

pub fn format_field_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, msg)| format!("  {}: {}\n", field.label(), msg))
        .collect()
}

pub fn format_added(item: &NewWarehouseItem) -> String {
    let qty = item.quantity.unwrap_or(1);
    format!(
        "added {} x {} from {} at {:.2} {}\n",
        qty, item.name, item.supplier, item.price, item.currency_key
    )
}

pub fn format_updated(id: u64, update: &WarehouseItemUpdate) -> String {
    format!(
        "updated #{}: {} from {} at {:.2} {} [{}]\n",
        id, update.name, update.supplier, update.price, update.currency_key, update.status_key
    )
}
