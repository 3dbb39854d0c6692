pub mod demo;
pub mod http;

use std::sync::Arc;
use std::time::Duration;

pub use demo::DemoCatalog;
pub use http::HttpCatalog;

use crate::combo::{FetchError, SuggestionSource};
use crate::model::{
    ApiConfig, NewWarehouseItem, Product, Supplier, WarehouseItem, WarehouseItemUpdate,
};

/// Error type for back-office API calls
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} answered {status}")]
    Status { url: String, status: u16 },
    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("rejected: {0}")]
    Rejected(String),
    #[error("no warehouse item #{0}")]
    NotFound(u64),
}

impl From<ApiError> for FetchError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::Http(e) => FetchError::Http(e),
            ApiError::Status { url, status } => FetchError::Status { url, status },
            ApiError::Decode(e) => FetchError::Decode(e),
            ApiError::Rejected(msg) => FetchError::Unavailable(msg),
            e @ ApiError::NotFound(_) => FetchError::Unavailable(e.to_string()),
        }
    }
}

/// Reads and writes warehouse items
pub trait WarehouseStore: Send + Sync {
    fn store_item(&self, item: &NewWarehouseItem) -> Result<(), ApiError>;

    /// One item by id, for prefilling the edit form
    fn get_item(&self, id: u64) -> Result<WarehouseItem, ApiError>;

    fn update_item(&self, id: u64, update: &WarehouseItemUpdate) -> Result<(), ApiError>;
}

/// The lookups and the store the front ends talk to, whichever catalog
/// answers them.
#[derive(Clone)]
pub struct Backend {
    pub suppliers: Arc<dyn SuggestionSource<Supplier>>,
    pub products: Arc<dyn SuggestionSource<Product>>,
    pub items: Arc<dyn SuggestionSource<WarehouseItem>>,
    pub store: Arc<dyn WarehouseStore>,
}

impl Backend {
    pub fn http(config: &ApiConfig) -> Result<Self, ApiError> {
        let catalog = Arc::new(HttpCatalog::new(config)?);
        log::debug!("using back-office API at {}", catalog.base_url());
        Ok(Backend {
            suppliers: catalog.clone(),
            products: catalog.clone(),
            items: catalog.clone(),
            store: catalog,
        })
    }

    pub fn demo(latency: Duration) -> Self {
        let catalog = Arc::new(DemoCatalog::default().with_latency(latency));
        Backend {
            suppliers: catalog.clone(),
            products: catalog.clone(),
            items: catalog.clone(),
            store: catalog,
        }
    }
}
