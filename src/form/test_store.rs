use std::sync::Mutex;

use crate::api::{ApiError, WarehouseStore};
use crate::model::{NewWarehouseItem, Product, Supplier, WarehouseItem, WarehouseItemUpdate};

/// Records writes and serves one fixed item. `reject` fails every write.
#[derive(Default)]
pub struct RecordingStore {
    pub stored: Mutex<Vec<NewWarehouseItem>>,
    pub updated: Mutex<Vec<(u64, WarehouseItemUpdate)>>,
    pub reject: bool,
}

/// Item #3: a barcode scanner from Tashkent Tech, in stock
pub fn scanner() -> WarehouseItem {
    WarehouseItem {
        id: 3,
        name: "Scanner (old label)".into(),
        serial_number: "100-12341654".into(),
        status_key: "IN_STOCK".into(),
        price: 45.5,
        date: "2024-01-12".into(),
        currency_key: "USD".into(),
        product: Product {
            id: 2,
            name: "Barcode scanner".into(),
        },
        supplier: Supplier {
            id: 2,
            name: "Tashkent Tech".into(),
        },
    }
}

impl WarehouseStore for RecordingStore {
    fn store_item(&self, item: &NewWarehouseItem) -> Result<(), ApiError> {
        if self.reject {
            return Err(ApiError::Rejected("backend said no".into()));
        }
        self.stored.lock().unwrap().push(item.clone());
        Ok(())
    }

    fn get_item(&self, id: u64) -> Result<WarehouseItem, ApiError> {
        let item = scanner();
        if id == item.id {
            Ok(item)
        } else {
            Err(ApiError::NotFound(id))
        }
    }

    fn update_item(&self, id: u64, update: &WarehouseItemUpdate) -> Result<(), ApiError> {
        if self.reject {
            return Err(ApiError::Rejected("backend said no".into()));
        }
        self.updated.lock().unwrap().push((id, update.clone()));
        Ok(())
    }
}
