//! # Prodtrac Architecture
//!
//! Prodtrac is a **UI-agnostic client library** for a REST product inventory
//! service, with a CLI on top. The library holds every rule about products:
//! how they are decoded, filtered, sorted, edited and sent back.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - One-shot subcommands and the interactive shell           │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Session + State (session.rs, state.rs, view.rs, draft.rs)  │
//! │  - AppState changed only by the pure `reduce`               │
//! │  - Listing derived on demand by `view::project`             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs) -> Command Layer (commands/*.rs)        │
//! │  - Thin facade, returns structured `CmdResult`s             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract ProductStore trait                              │
//! │  - HttpStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! Apart from the HTTP calls inside `HttpStore` and reading `config.json`,
//! library code never touches the terminal. It takes Rust values and returns
//! `Result`s, so the same core can back a different UI.
//!
//! ## Testing Strategy
//!
//! 1. **Pure logic** (`view`, `draft`, `state`): unit tests on plain values.
//! 2. **Commands, API and session**: unit tests over `InMemoryStore`.
//! 3. **HTTP store**: integration tests against a local `tiny_http` server.
//! 4. **CLI**: rendering and shell tests in `cli/`, end-to-end binary tests
//!    in `tests/cli.rs`.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One function per operation
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: `Product`, the outgoing payload, and lenient decoding
//! - [`view`]: Filter and sort projection
//! - [`draft`]: The add/edit form and its validation
//! - [`state`]: Application state and its reducer
//! - [`session`]: Runs actions against the API and feeds the reducer
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod draft;
pub mod error;
pub mod model;
pub mod session;
pub mod state;
pub mod store;
pub mod view;
