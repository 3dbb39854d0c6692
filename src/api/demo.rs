use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use crate::combo::{FetchError, SuggestionSource};
use crate::model::{
    ItemStatus, NewWarehouseItem, Product, Supplier, WarehouseItem, WarehouseItemUpdate,
};

use super::{ApiError, WarehouseStore};

/// In-memory stand-in for the back-office API, seeded with sample data.
pub struct DemoCatalog {
    suppliers: Vec<Supplier>,
    products: Mutex<Vec<Product>>,
    items: Mutex<Vec<WarehouseItem>>,
    latency: Duration,
}

fn supplier(id: u64, name: &str) -> Supplier {
    Supplier {
        id,
        name: name.to_string(),
    }
}

fn product(id: u64, name: &str) -> Product {
    Product {
        id,
        name: name.to_string(),
    }
}

/// Case-insensitive substring match; no query matches everything
fn matches(name: &str, query: Option<&str>) -> bool {
    match query {
        Some(q) if !q.is_empty() => name.to_lowercase().contains(&q.to_lowercase()),
        _ => true,
    }
}

impl Default for DemoCatalog {
    fn default() -> Self {
        let suppliers = vec![
            supplier(1, "Acme Trading"),
            supplier(2, "Tashkent Tech"),
            supplier(3, "Samarkand Paper"),
            supplier(4, "Silk Road Logistics"),
            supplier(5, "Bukhara Electronics"),
        ];
        let products = vec![
            product(1, "Receipt printer"),
            product(2, "Barcode scanner"),
            product(3, "Cash drawer"),
            product(4, "Thermal paper roll"),
            product(5, "POS terminal"),
            product(6, "Card reader"),
        ];
        let items = vec![
            WarehouseItem {
                id: 1,
                name: "Barcode scanner".into(),
                serial_number: "100-12341654".into(),
                status_key: ItemStatus::InStock.key().into(),
                price: 45.5,
                date: "2024-01-12".into(),
                currency_key: "USD".into(),
                product: products[1].clone(),
                supplier: suppliers[1].clone(),
            },
            WarehouseItem {
                id: 2,
                name: "Thermal paper roll".into(),
                serial_number: String::new(),
                status_key: ItemStatus::InStock.key().into(),
                price: 12000.0,
                date: "2024-02-03".into(),
                currency_key: "UZS".into(),
                product: products[3].clone(),
                supplier: suppliers[2].clone(),
            },
        ];
        DemoCatalog {
            suppliers,
            products: Mutex::new(products),
            items: Mutex::new(items),
            latency: Duration::ZERO,
        }
    }
}

impl DemoCatalog {
    /// Sleep this long before answering each lookup
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn wait(&self) {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
    }

    pub fn suppliers(&self, query: Option<&str>) -> Vec<Supplier> {
        self.wait();
        self.suppliers
            .iter()
            .filter(|s| matches(&s.name, query))
            .cloned()
            .collect()
    }

    pub fn products(&self, query: Option<&str>) -> Result<Vec<Product>, ApiError> {
        self.wait();
        let products = self.products.lock().map_err(|_| poisoned())?;
        Ok(products
            .iter()
            .filter(|p| matches(&p.name, query))
            .cloned()
            .collect())
    }

    pub fn warehouse_items(&self, query: Option<&str>) -> Result<Vec<WarehouseItem>, ApiError> {
        self.wait();
        let items = self.items.lock().map_err(|_| poisoned())?;
        Ok(items
            .iter()
            .filter(|i| matches(&i.name, query) || matches(&i.supplier.name, query))
            .cloned()
            .collect())
    }

    fn supplier_named(&self, name: &str) -> Result<Supplier, ApiError> {
        self.suppliers
            .iter()
            .find(|s| s.name == name)
            .cloned()
            .ok_or_else(|| ApiError::Rejected(format!("unknown supplier '{}'", name)))
    }

    /// The catalog product with this name, added if it is new
    fn product_named(&self, name: &str) -> Result<Product, ApiError> {
        let mut products = self.products.lock().map_err(|_| poisoned())?;
        if let Some(p) = products.iter().find(|p| p.name == name) {
            return Ok(p.clone());
        }
        let next_id = products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let p = product(next_id, name);
        products.push(p.clone());
        Ok(p)
    }
}

fn poisoned() -> ApiError {
    ApiError::Rejected("demo catalog lock poisoned".into())
}

impl WarehouseStore for DemoCatalog {
    /// Unknown suppliers are rejected; unknown products are added to the catalog.
    fn store_item(&self, item: &NewWarehouseItem) -> Result<(), ApiError> {
        let supplier = self.supplier_named(&item.supplier)?;
        let product = self.product_named(&item.name)?;

        let mut items = self.items.lock().map_err(|_| poisoned())?;
        let date = chrono::Local::now().format("%Y-%m-%d").to_string();
        let serials: Vec<String> = item
            .serial_numbers
            .as_deref()
            .map(|s| {
                s.lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();
        let count = item
            .quantity
            .map(|q| q as usize)
            .unwrap_or(1)
            .max(serials.len())
            .max(1);

        for i in 0..count {
            let next_id = items.iter().map(|it| it.id).max().unwrap_or(0) + 1;
            items.push(WarehouseItem {
                id: next_id,
                name: item.name.clone(),
                serial_number: serials.get(i).cloned().unwrap_or_default(),
                status_key: ItemStatus::InStock.key().into(),
                price: item.price,
                date: date.clone(),
                currency_key: item.currency_key.code().to_string(),
                product: product.clone(),
                supplier: supplier.clone(),
            });
        }
        log::debug!("demo catalog stored {} x {}", count, item.name);
        Ok(())
    }

    fn get_item(&self, id: u64) -> Result<WarehouseItem, ApiError> {
        self.wait();
        let items = self.items.lock().map_err(|_| poisoned())?;
        items
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or(ApiError::NotFound(id))
    }

    /// Same supplier and product rules as `store_item`. The date is kept.
    fn update_item(&self, id: u64, update: &WarehouseItemUpdate) -> Result<(), ApiError> {
        let supplier = self.supplier_named(&update.supplier)?;
        let product = self.product_named(&update.name)?;

        let mut items = self.items.lock().map_err(|_| poisoned())?;
        let item = items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(ApiError::NotFound(id))?;
        item.name = update.name.clone();
        item.price = update.price;
        item.currency_key = update.currency_key.code().to_string();
        item.status_key = update.status_key.key().to_string();
        item.serial_number = update.serial_number.clone().unwrap_or_default();
        item.product = product;
        item.supplier = supplier;
        log::debug!("demo catalog updated #{} ({})", id, update.status_key);
        Ok(())
    }
}

impl SuggestionSource<Supplier> for DemoCatalog {
    fn fetch(&self, query: Option<&str>) -> Result<Vec<Supplier>, FetchError> {
        Ok(self.suppliers(query))
    }
}

impl SuggestionSource<Product> for DemoCatalog {
    fn fetch(&self, query: Option<&str>) -> Result<Vec<Product>, FetchError> {
        Ok(self.products(query)?)
    }
}

impl SuggestionSource<WarehouseItem> for DemoCatalog {
    fn fetch(&self, query: Option<&str>) -> Result<Vec<WarehouseItem>, FetchError> {
        Ok(self.warehouse_items(query)?)
    }
}
