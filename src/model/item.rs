use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::combo::ItemFormat;

/// A supplier the warehouse buys from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: u64,
    pub name: String,
}

/// A catalog product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
}

/// Currency a purchase price is recorded in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "UZS")]
    Uzs,
}

impl Currency {
    pub const ALL: [Currency; 2] = [Currency::Usd, Currency::Uzs];

    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Uzs => "UZS",
        }
    }

    /// Next currency in `ALL`, wrapping
    pub fn next(self) -> Currency {
        match self {
            Currency::Usd => Currency::Uzs,
            Currency::Uzs => Currency::Usd,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "UZS" => Ok(Currency::Uzs),
            other => Err(format!("unknown currency '{}' (expected USD or UZS)", other)),
        }
    }
}

/// Where a stocked unit stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    InStock,
    Sold,
    Refund,
}

impl ItemStatus {
    pub const ALL: [ItemStatus; 3] = [ItemStatus::InStock, ItemStatus::Sold, ItemStatus::Refund];

    pub fn key(self) -> &'static str {
        match self {
            ItemStatus::InStock => "IN_STOCK",
            ItemStatus::Sold => "SOLD",
            ItemStatus::Refund => "REFUND",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ItemStatus::InStock => "In stock",
            ItemStatus::Sold => "Sold",
            ItemStatus::Refund => "Defect/return",
        }
    }

    /// Next status in `ALL`, wrapping
    pub fn next(self) -> ItemStatus {
        match self {
            ItemStatus::InStock => ItemStatus::Sold,
            ItemStatus::Sold => ItemStatus::Refund,
            ItemStatus::Refund => ItemStatus::InStock,
        }
    }

    /// Previous status in `ALL`, wrapping
    pub fn prev(self) -> ItemStatus {
        match self {
            ItemStatus::InStock => ItemStatus::Refund,
            ItemStatus::Sold => ItemStatus::InStock,
            ItemStatus::Refund => ItemStatus::Sold,
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ItemStatus {
    type Err = String;

    /// Accepts the backend key in any case, with `-` or `_` separators
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "IN_STOCK" => Ok(ItemStatus::InStock),
            "SOLD" => Ok(ItemStatus::Sold),
            "REFUND" => Ok(ItemStatus::Refund),
            other => Err(format!(
                "unknown status '{}' (expected IN_STOCK, SOLD or REFUND)",
                other
            )),
        }
    }
}

/// A stocked item as the backend lists it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseItem {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub serial_number: String,
    pub status_key: String,
    pub price: f64,
    pub date: String,
    pub currency_key: String,
    pub product: Product,
    pub supplier: Supplier,
}

/// Payload for storing a new warehouse item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWarehouseItem {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    pub price: f64,
    pub currency_key: Currency,
    pub supplier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_numbers: Option<String>,
}

/// Payload for changing an existing warehouse item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseItemUpdate {
    pub name: String,
    pub price: f64,
    pub currency_key: Currency,
    pub supplier: String,
    pub status_key: ItemStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
}

/// Responses arrive wrapped as `{ "data": ... }`
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Show and key records by their name
#[derive(Debug, Clone, Copy, Default)]
pub struct ByName;

impl ItemFormat<Supplier> for ByName {
    fn render_item(&self, item: &Supplier) -> String {
        item.name.clone()
    }

    fn get_key(&self, item: &Supplier) -> String {
        item.name.clone()
    }
}

impl ItemFormat<Product> for ByName {
    fn render_item(&self, item: &Product) -> String {
        item.name.clone()
    }

    fn get_key(&self, item: &Product) -> String {
        item.name.clone()
    }
}
