use super::ProductStore;
use crate::error::{ProdtracError, Result};
use crate::model::{HealthStatus, Product, ProductPayload};
use std::collections::BTreeMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
///
/// Mirrors the service's answers: unknown ids are rejected with status 404 and
/// a `Product not found` detail.
#[derive(Default)]
pub struct InMemoryStore {
    products: BTreeMap<i64, Product>,
    reject_writes: Option<String>,
    fail_reads: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            products: products.into_iter().map(|p| (p.id, p)).collect(),
            ..Self::default()
        }
    }

    /// Makes every subsequent write fail with the given server detail.
    pub fn reject_writes(&mut self, detail: impl Into<String>) {
        self.reject_writes = Some(detail.into());
    }

    /// Makes every subsequent read fail as if the service were unreachable.
    pub fn fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    fn check_write(&self) -> Result<()> {
        match &self.reject_writes {
            Some(detail) => Err(ProdtracError::Rejected {
                status: 400,
                detail: Some(detail.clone()),
            }),
            None => Ok(()),
        }
    }

    fn check_read(&self) -> Result<()> {
        if self.fail_reads {
            return Err(ProdtracError::Api("service unavailable".to_string()));
        }
        Ok(())
    }
}

fn not_found() -> ProdtracError {
    ProdtracError::Rejected {
        status: 404,
        detail: Some("Product not found".to_string()),
    }
}

impl ProductStore for InMemoryStore {
    fn list_products(&self) -> Result<Vec<Product>> {
        self.check_read()?;
        Ok(self.products.values().cloned().collect())
    }

    fn get_product(&self, id: i64) -> Result<Product> {
        self.check_read()?;
        self.products.get(&id).cloned().ok_or_else(not_found)
    }

    fn create_product(&mut self, product: &ProductPayload) -> Result<()> {
        self.check_write()?;
        if self.products.contains_key(&product.id) {
            return Err(ProdtracError::Rejected {
                status: 500,
                detail: Some(format!(
                    "Error creating product: duplicate id {}",
                    product.id
                )),
            });
        }
        self.products.insert(product.id, Product::from(product));
        Ok(())
    }

    fn update_product(&mut self, id: i64, product: &ProductPayload) -> Result<()> {
        self.check_write()?;
        let existing = self.products.get_mut(&id).ok_or_else(not_found)?;
        let mut updated = Product::from(product);
        updated.id = id;
        *existing = updated;
        Ok(())
    }

    fn delete_product(&mut self, id: i64) -> Result<()> {
        self.check_write()?;
        self.products.remove(&id).map(|_| ()).ok_or_else(not_found)
    }

    fn health(&self) -> Result<HealthStatus> {
        self.check_read()?;
        Ok(HealthStatus {
            status: "healthy".to_string(),
            service: "in-memory".to_string(),
        })
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    /// The four records the service seeds an empty database with.
    pub fn seed_products() -> Vec<Product> {
        vec![
            Product::new(1, "Phone", "A smartphone", 699.99, 50),
            Product::new(2, "Laptop", "A powerful laptop", 999.99, 30),
            Product::new(3, "Pen", "A blue ink pen", 1.99, 100),
            Product::new(4, "Table", "A wooden table", 199.99, 20),
        ]
    }

    pub fn seeded_store() -> InMemoryStore {
        InMemoryStore::with_products(seed_products())
    }

    pub fn payload(id: i64, name: &str, price: f64, quantity: u64) -> ProductPayload {
        ProductPayload {
            id,
            name: name.to_string(),
            description: format!("{} description", name),
            price,
            quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn crud_round() {
        let mut store = InMemoryStore::new();
        store.create_product(&payload(7, "Lamp", 20.0, 2)).unwrap();
        assert_eq!(store.get_product(7).unwrap().name, "Lamp");

        store.update_product(7, &payload(7, "Desk Lamp", 25.0, 1)).unwrap();
        assert_eq!(store.get_product(7).unwrap().price, Some(25.0));

        store.delete_product(7).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn unknown_ids_are_rejected_with_detail() {
        let mut store = seeded_store();
        let err = store.delete_product(99).unwrap_err();
        assert_eq!(err.to_string(), "Product not found");
        assert!(store.get_product(99).is_err());
        assert!(store.update_product(99, &payload(99, "X", 1.0, 1)).is_err());
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut store = seeded_store();
        assert!(store.create_product(&payload(1, "Again", 1.0, 1)).is_err());
        assert_eq!(store.get_product(1).unwrap().name, "Phone");
    }

    #[test]
    fn rejected_writes_leave_data_alone() {
        let mut store = seeded_store();
        store.reject_writes("name required");
        let err = store.create_product(&payload(9, "", 1.0, 1)).unwrap_err();
        assert_eq!(err.user_message("Operation failed"), "name required");
        assert!(store.delete_product(1).is_err());
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn failing_reads() {
        let mut store = seeded_store();
        store.fail_reads(true);
        assert!(store.list_products().is_err());
        store.fail_reads(false);
        assert_eq!(store.list_products().unwrap().len(), 4);
    }
}
