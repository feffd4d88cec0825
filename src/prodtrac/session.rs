//! A running client: application state plus the API that feeds it.
//!
//! [`Session`] performs the remote calls and turns each outcome into an
//! [`Action`] for [`AppState::reduce`]. After every successful create, update,
//! or delete it refetches the whole list; the filter and sort the user chose
//! are left untouched.

use tracing::debug;

use crate::api::ProdtracApi;
use crate::commands::{CREATED_MESSAGE, DELETED_MESSAGE, UPDATED_MESSAGE};
use crate::draft::DraftField;
use crate::error::ProdtracError;
use crate::model::Product;
use crate::state::{Action, AppState};
use crate::store::ProductStore;
use crate::view::{SortField, ViewState};

pub const FETCH_FAILED: &str = "Failed to fetch products";
pub const SUBMIT_FAILED: &str = "Operation failed";
pub const DELETE_FAILED: &str = "Delete failed";

pub struct Session<S: ProductStore> {
    api: ProdtracApi<S>,
    state: AppState,
}

impl<S: ProductStore> Session<S> {
    pub fn new(api: ProdtracApi<S>) -> Self {
        Self::with_view(api, ViewState::default())
    }

    pub fn with_view(api: ProdtracApi<S>, view: ViewState) -> Self {
        Self {
            api,
            state: AppState::with_view(view),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn api(&self) -> &ProdtracApi<S> {
        &self.api
    }

    pub fn api_mut(&mut self) -> &mut ProdtracApi<S> {
        &mut self.api
    }

    pub fn rows(&self) -> Vec<&Product> {
        self.state.rows()
    }

    fn dispatch(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        self.state = state.reduce(action);
    }

    /// Re-reads the full list. Returns whether the fetch succeeded.
    pub fn refresh(&mut self) -> bool {
        self.dispatch(Action::FetchStarted);
        let ticket = self.state.latest_ticket();

        // The projection happens in `rows`, so fetch unfiltered.
        match self.api.list_products(&ViewState::default()) {
            Ok(result) => {
                if !self.state.accepts(ticket) {
                    debug!(seq = ticket.seq(), "discarding superseded fetch");
                }
                self.dispatch(Action::FetchSucceeded(ticket, result.listed_products));
                true
            }
            Err(e) => {
                debug!(seq = ticket.seq(), error = %e, "fetch failed");
                self.dispatch(Action::FetchFailed(ticket, FETCH_FAILED.to_string()));
                false
            }
        }
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.dispatch(Action::SetFilter(filter.into()));
    }

    pub fn sort_by(&mut self, field: SortField) {
        self.dispatch(Action::SortBy(field));
    }

    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) {
        self.dispatch(Action::EditField(field, value.into()));
    }

    /// Opens the product with `id` from the current list for editing.
    pub fn edit(&mut self, id: i64) -> bool {
        match self.state.find(id).cloned() {
            Some(product) => {
                self.dispatch(Action::Edit(product));
                true
            }
            None => {
                let err = ProdtracError::ProductNotFound(id);
                self.dispatch(Action::MutationFailed(err.to_string()));
                false
            }
        }
    }

    pub fn cancel(&mut self) {
        self.dispatch(Action::CancelEdit);
    }

    pub fn dismiss(&mut self) {
        self.dispatch(Action::Dismiss);
    }

    /// Sends the draft as a create or an update. Returns whether the write
    /// succeeded; a failed refetch afterwards does not undo that.
    pub fn submit(&mut self) -> bool {
        let payload = match self.state.draft.to_payload() {
            Ok(payload) => payload,
            Err(e) => {
                self.dispatch(Action::MutationFailed(e.user_message(SUBMIT_FAILED)));
                return false;
            }
        };

        let outcome = match self.state.draft.edit_id {
            Some(id) => self
                .api
                .update_product(id, &payload)
                .map(|_| UPDATED_MESSAGE),
            None => self.api.create_product(&payload).map(|_| CREATED_MESSAGE),
        };

        match outcome {
            Ok(message) => {
                self.dispatch(Action::MutationSucceeded(message.to_string()));
                self.refresh();
                true
            }
            Err(e) => {
                self.dispatch(Action::MutationFailed(e.user_message(SUBMIT_FAILED)));
                false
            }
        }
    }

    /// Deletes a product. Confirmation is the caller's job.
    pub fn delete(&mut self, id: i64) -> bool {
        match self.api.delete_product(id) {
            Ok(_) => {
                self.dispatch(Action::MutationSucceeded(DELETED_MESSAGE.to_string()));
                self.refresh();
                true
            }
            Err(e) => {
                self.dispatch(Action::MutationFailed(e.user_message(DELETE_FAILED)));
                false
            }
        }
    }
}
