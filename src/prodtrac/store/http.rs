//! HTTP client for the remote product service.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use serde_json::Value;
use tracing::{debug, warn};

use super::ProductStore;
use crate::config::{normalize_url, ProdtracConfig};
use crate::error::{ProdtracError, Result};
use crate::model::{HealthStatus, Product, ProductPayload};

pub struct HttpStore {
    client: Client,
    base_url: String,
}

impl HttpStore {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: normalize_url(base_url)?,
        })
    }

    pub fn from_config(config: &ProdtracConfig) -> Result<Self> {
        Self::new(&config.api_url, Duration::from_secs(config.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn send(&self, method: &str, url: &str, request: RequestBuilder) -> Result<Response> {
        debug!(method, url, "sending request");
        let response = request.send()?;
        let status = response.status();
        debug!(method, url, status = status.as_u16(), "received response");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        let detail = rejection_detail(&body);
        warn!(method, url, status = status.as_u16(), detail = ?detail, "request rejected");
        Err(ProdtracError::Rejected {
            status: status.as_u16(),
            detail,
        })
    }
}

impl ProductStore for HttpStore {
    fn list_products(&self) -> Result<Vec<Product>> {
        let url = self.url("/products/");
        let response = self.send("GET", &url, self.client.get(&url))?;
        let records: Vec<Value> = response.json()?;
        Ok(decode_listing(records))
    }

    fn get_product(&self, id: i64) -> Result<Product> {
        let url = self.url(&format!("/products/{}", id));
        let response = self.send("GET", &url, self.client.get(&url))?;
        Ok(response.json()?)
    }

    fn create_product(&mut self, product: &ProductPayload) -> Result<()> {
        let url = self.url("/products/");
        self.send("POST", &url, self.client.post(&url).json(product))?;
        Ok(())
    }

    fn update_product(&mut self, id: i64, product: &ProductPayload) -> Result<()> {
        let url = self.url(&format!("/products/{}", id));
        self.send("PUT", &url, self.client.put(&url).json(product))?;
        Ok(())
    }

    fn delete_product(&mut self, id: i64) -> Result<()> {
        let url = self.url(&format!("/products/{}", id));
        self.send("DELETE", &url, self.client.delete(&url))?;
        Ok(())
    }

    fn health(&self) -> Result<HealthStatus> {
        let url = self.url("/health");
        let response = self.send("GET", &url, self.client.get(&url))?;
        Ok(response.json()?)
    }
}

/// Extracts the human-readable `detail` from an error body.
///
/// A string `detail` is returned verbatim. A list of validation entries (each
/// carrying a `msg`) is joined with `"; "`. Anything else yields `None`.
/// Decodes each listed record on its own. A record whose id cannot be read is
/// dropped with a warning; the rest of the listing still loads.
pub fn decode_listing(records: Vec<Value>) -> Vec<Product> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value::<Product>(record) {
            Ok(product) => Some(product),
            Err(e) => {
                warn!(index, error = %e, "skipping unreadable product record");
                None
            }
        })
        .collect()
}

pub fn rejection_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(entries) => {
            let messages: Vec<&str> = entries
                .iter()
                .filter_map(|e| e.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_detail_is_verbatim() {
        assert_eq!(
            rejection_detail(r#"{"detail":"name required"}"#).as_deref(),
            Some("name required")
        );
    }

    #[test]
    fn validation_entries_are_joined() {
        let body = r#"{"detail":[
            {"loc":["body","name"],"msg":"String should have at least 1 character","type":"string_too_short"},
            {"loc":["body","price"],"msg":"Input should be greater than 0","type":"greater_than"}
        ]}"#;
        assert_eq!(
            rejection_detail(body).as_deref(),
            Some("String should have at least 1 character; Input should be greater than 0")
        );
    }

    #[test]
    fn missing_or_unusable_detail_is_none() {
        assert_eq!(rejection_detail(""), None);
        assert_eq!(rejection_detail("Internal Server Error"), None);
        assert_eq!(rejection_detail(r#"{"message":"nope"}"#), None);
        assert_eq!(rejection_detail(r#"{"detail":""}"#), None);
        assert_eq!(rejection_detail(r#"{"detail":42}"#), None);
        assert_eq!(rejection_detail(r#"{"detail":[{"loc":[]}]}"#), None);
    }

    #[test]
    fn listing_skips_records_without_a_usable_id() {
        let records: Vec<Value> = serde_json::from_str(
            r#"[{"id":1,"name":"Phone"},{"id":"7","name":"Lamp"},{"id":"abc"},{"name":"No id"},"junk"]"#,
        )
        .unwrap();
        let products = decode_listing(records);
        let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 7]);
        assert_eq!(products[1].name, "Lamp");
    }

    #[test]
    fn base_url_is_normalized() {
        let store = HttpStore::new("http://localhost:8000/", Duration::from_secs(1)).unwrap();
        assert_eq!(store.base_url(), "http://localhost:8000");
        assert_eq!(store.url("/products/"), "http://localhost:8000/products/");
        assert!(HttpStore::new("localhost", Duration::from_secs(1)).is_err());
    }
}
