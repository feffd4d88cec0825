//! # Application State
//!
//! Everything a running client remembers lives in one [`AppState`] value:
//! the last-fetched product list, the [`ViewState`], the [`FormDraft`], and
//! the two message banners. State only changes through [`AppState::reduce`],
//! which takes the state by value together with an [`Action`] and returns the
//! next state. Network calls happen elsewhere ([`crate::session`]); the
//! reducer only records their outcome.
//!
//! ## Fetch Tickets
//!
//! Each fetch is announced with [`Action::FetchStarted`], which issues a
//! [`FetchTicket`] with a strictly increasing sequence number. Completion
//! actions carry the ticket back. A completion is applied only when its
//! ticket is newer than the last one applied, so a slow response to an old
//! request can never overwrite the result of a newer one.
//!
//! ## Staleness
//!
//! The list is authoritative right after a fetch is applied and stale from a
//! successful mutation until the next applied fetch.

use crate::draft::{DraftField, FormDraft};
use crate::model::Product;
use crate::view::{project, SortField, ViewState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetFilter(String),
    SortBy(SortField),
    Edit(Product),
    EditField(DraftField, String),
    CancelEdit,
    FetchStarted,
    FetchSucceeded(FetchTicket, Vec<Product>),
    FetchFailed(FetchTicket, String),
    MutationSucceeded(String),
    MutationFailed(String),
    Dismiss,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub products: Vec<Product>,
    pub view: ViewState,
    pub draft: FormDraft,
    pub notice: Option<String>,
    pub error: Option<String>,
    issued: u64,
    applied: u64,
    stale: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_view(view: ViewState) -> Self {
        Self {
            view,
            ..Self::default()
        }
    }

    pub fn reduce(mut self, action: Action) -> Self {
        match action {
            Action::SetFilter(filter) => self.view.filter = filter,
            Action::SortBy(field) => self.view.toggle_sort(field),
            Action::Edit(product) => {
                self.draft = FormDraft::from_product(&product);
                self.notice = None;
                self.error = None;
            }
            Action::EditField(field, value) => {
                if let Err(e) = self.draft.set(field, value) {
                    self.error = Some(e.user_message("Operation failed"));
                }
            }
            Action::CancelEdit => self.draft = FormDraft::new(),
            Action::FetchStarted => self.issued += 1,
            Action::FetchSucceeded(ticket, products) => {
                if self.accepts(ticket) {
                    self.applied = ticket.0;
                    self.products = products;
                    self.stale = false;
                    self.error = None;
                }
            }
            Action::FetchFailed(ticket, message) => {
                if self.accepts(ticket) {
                    self.error = Some(message);
                }
            }
            Action::MutationSucceeded(message) => {
                self.notice = Some(message);
                self.error = None;
                self.draft = FormDraft::new();
                self.stale = true;
            }
            Action::MutationFailed(message) => {
                self.error = Some(message);
                self.notice = None;
            }
            Action::Dismiss => {
                self.notice = None;
                self.error = None;
            }
        }
        self
    }

    /// The ticket issued by the most recent `FetchStarted`.
    pub fn latest_ticket(&self) -> FetchTicket {
        FetchTicket(self.issued)
    }

    /// Whether a completion carrying `ticket` would still be applied.
    pub fn accepts(&self, ticket: FetchTicket) -> bool {
        ticket.0 > self.applied && ticket.0 <= self.issued
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// The rows to display, derived from the list and the view.
    pub fn rows(&self) -> Vec<&Product> {
        project(&self.products, &self.view)
    }

    pub fn find(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}
