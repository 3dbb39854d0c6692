use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;

use crate::combo::{FetchError, SuggestionSource};
use crate::model::{
    ApiConfig, Envelope, NewWarehouseItem, Product, Supplier, WarehouseItem, WarehouseItemUpdate,
};

use super::{ApiError, WarehouseStore};

/// Blocking REST client for the back-office API
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    base_url: String,
}

impl HttpCatalog {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("stockroom/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(HttpCatalog {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// GET a list endpoint, passing `?query=` only for a non-empty query
    fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<&str>,
    ) -> Result<Vec<T>, ApiError> {
        let url = self.url(path);
        let mut request = self.client.get(&url);
        if let Some(q) = query.filter(|q| !q.is_empty()) {
            request = request.query(&[("query", q)]);
        }
        let response = ensure_success(url, request.send()?)?;
        unwrap_envelope(response)
    }

    pub fn suppliers(&self, query: Option<&str>) -> Result<Vec<Supplier>, ApiError> {
        self.list("suppliers", query)
    }

    pub fn products(&self, query: Option<&str>) -> Result<Vec<Product>, ApiError> {
        self.list("products", query)
    }

    pub fn warehouse_items(&self, query: Option<&str>) -> Result<Vec<WarehouseItem>, ApiError> {
        self.list("warehouse", query)
    }
}

/// Non-2xx answers become `ApiError::Status`
fn ensure_success(url: String, response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status {
            url,
            status: status.as_u16(),
        });
    }
    Ok(response)
}

fn unwrap_envelope<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let body = response.text()?;
    let envelope: Envelope<T> = serde_json::from_str(&body)?;
    Ok(envelope.data)
}

impl WarehouseStore for HttpCatalog {
    fn store_item(&self, item: &NewWarehouseItem) -> Result<(), ApiError> {
        let url = self.url("warehouse");
        let response = self.client.post(&url).json(item).send()?;
        ensure_success(url, response)?;
        Ok(())
    }

    fn get_item(&self, id: u64) -> Result<WarehouseItem, ApiError> {
        let url = self.url(&format!("warehouse/{}", id));
        let response = self.client.get(&url).send()?;
        unwrap_envelope(ensure_success(url, response)?)
    }

    fn update_item(&self, id: u64, update: &WarehouseItemUpdate) -> Result<(), ApiError> {
        let url = self.url(&format!("warehouse/{}", id));
        let response = self.client.put(&url).json(update).send()?;
        ensure_success(url, response)?;
        Ok(())
    }
}

impl SuggestionSource<Supplier> for HttpCatalog {
    fn fetch(&self, query: Option<&str>) -> Result<Vec<Supplier>, FetchError> {
        Ok(self.suppliers(query)?)
    }
}

impl SuggestionSource<Product> for HttpCatalog {
    fn fetch(&self, query: Option<&str>) -> Result<Vec<Product>, FetchError> {
        Ok(self.products(query)?)
    }
}

impl SuggestionSource<WarehouseItem> for HttpCatalog {
    fn fetch(&self, query: Option<&str>) -> Result<Vec<WarehouseItem>, FetchError> {
        Ok(self.warehouse_items(query)?)
    }
}
