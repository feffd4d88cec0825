//! # Storage Layer
//!
//! Product data lives on a remote service; this module defines how the rest of
//! the crate talks to it. The [`ProductStore`] trait is the only contract the
//! command layer depends on.
//!
//! ## Implementations
//!
//! - [`http::HttpStore`]: the production client for the REST resource at
//!   `/products/`
//!   - `GET /products/` list, `GET /products/{id}` single record
//!   - `POST /products/` create, `PUT /products/{id}` update
//!   - `DELETE /products/{id}` delete, `GET /health` liveness
//!
//! - [`memory::InMemoryStore`]: in-process stand-in for tests
//!   - No network
//!   - Can be told to reject writes the way the server would
//!
//! ## Failure Contract
//!
//! Any non-2xx answer becomes [`ProdtracError::Rejected`], carrying the
//! server's human-readable `detail` when one was sent. Callers decide what
//! generic text to show otherwise.
//!
//! [`ProdtracError::Rejected`]: crate::error::ProdtracError::Rejected

use crate::error::Result;
use crate::model::{HealthStatus, Product, ProductPayload};

pub mod http;
pub mod memory;

/// Abstract interface to the product collection.
pub trait ProductStore {
    /// Every product, in whatever order the backend keeps them
    fn list_products(&self) -> Result<Vec<Product>>;

    /// A single product by id
    fn get_product(&self, id: i64) -> Result<Product>;

    /// Create a product; id collisions are up to the backend
    fn create_product(&mut self, product: &ProductPayload) -> Result<()>;

    /// Replace the product addressed by `id`
    fn update_product(&mut self, id: i64, product: &ProductPayload) -> Result<()>;

    /// Remove the product addressed by `id`
    fn delete_product(&mut self, id: i64) -> Result<()>;

    /// Service liveness
    fn health(&self) -> Result<HealthStatus>;
}
