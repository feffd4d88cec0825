//! # CLI Behavior
//!
//! This is **one possible UI client** for prodtrac, not the application itself.
//! For the overall architecture, see the crate-level documentation of the
//! library.
//!
//! ## Naked Execution (`prodtrac`)
//!
//! Running `prodtrac` with no arguments defaults to `prodtrac list`.
//!
//! ## One-shot vs Interactive
//!
//! Every subcommand except `shell` performs a single request and exits; a
//! failure prints `Error: <message>` to stderr and exits with status 1.
//! `prodtrac shell` keeps a [`prodtrac::session::Session`] alive: the last
//! fetched list, the search and sort choice, and the add/edit form persist
//! between lines, and failures only raise a banner.
//!
//! ## Where the Base URL Comes From
//!
//! `--api-url` beats `PRODTRAC_API_URL`, which beats `config.json`, which
//! beats `http://localhost:8000`.

mod commands;
mod render;
mod setup;
mod shell;

pub use commands::run;
