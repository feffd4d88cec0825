//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for every prodtrac operation, whichever UI drives it (the
//! one-shot CLI, the interactive shell, or tests).
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Owns** the store and the config directory
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no printing and keeps no view state; the in-memory product list and
//! the form live in [`crate::state::AppState`], driven by [`crate::session`].
//!
//! ## Generic Over ProductStore
//!
//! `ProdtracApi<S: ProductStore>` is generic over the backend:
//! - Production: `ProdtracApi<HttpStore>`
//! - Testing: `ProdtracApi<InMemoryStore>`

use crate::commands;
use crate::error::Result;
use crate::model::ProductPayload;
use crate::store::ProductStore;
use crate::view::ViewState;
use std::path::{Path, PathBuf};

pub struct ProdtracApi<S: ProductStore> {
    store: S,
    config_dir: PathBuf,
}

impl<S: ProductStore> ProdtracApi<S> {
    pub fn new(store: S, config_dir: PathBuf) -> Self {
        Self { store, config_dir }
    }

    pub fn list_products(&self, view: &ViewState) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, view)
    }

    pub fn get_product(&self, id: i64) -> Result<commands::CmdResult> {
        commands::get::run(&self.store, id)
    }

    pub fn create_product(&mut self, payload: &ProductPayload) -> Result<commands::CmdResult> {
        commands::create::run(&mut self.store, payload)
    }

    pub fn update_product(
        &mut self,
        id: i64,
        payload: &ProductPayload,
    ) -> Result<commands::CmdResult> {
        commands::update::run(&mut self.store, id, payload)
    }

    pub fn delete_product(&mut self, id: i64) -> Result<commands::CmdResult> {
        commands::delete::run(&mut self.store, id)
    }

    pub fn health(&self) -> Result<commands::CmdResult> {
        commands::health::run(&self.store)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.config_dir, action)
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::{payload, seeded_store};
    use crate::view::{SortDirection, SortField};

    fn api() -> ProdtracApi<crate::store::memory::InMemoryStore> {
        ProdtracApi::new(seeded_store(), std::env::temp_dir())
    }

    #[test]
    fn list_passes_view_through() {
        let api = api();
        let view = ViewState::new("", SortField::Quantity, SortDirection::Desc);
        let result = api.list_products(&view).unwrap();
        let ids: Vec<i64> = result.listed_products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1, 2, 4]);
    }

    #[test]
    fn mutations_reach_the_store() {
        let mut api = api();
        api.create_product(&payload(5, "Lamp", 20.0, 4)).unwrap();
        api.update_product(5, &payload(5, "Desk Lamp", 22.0, 4)).unwrap();
        api.delete_product(1).unwrap();

        let result = api.list_products(&ViewState::default()).unwrap();
        let names: Vec<&str> = result
            .listed_products
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Laptop", "Pen", "Table", "Desk Lamp"]);
    }

    #[test]
    fn get_and_health() {
        let api = api();
        assert_eq!(api.get_product(4).unwrap().listed_products[0].name, "Table");
        assert!(api.health().unwrap().health.is_some());
    }
}
