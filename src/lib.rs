//! # Folio
//!
//! A JSON backend for a personal portfolio (profile, skills, projects,
//! education and a résumé upload), usable both as a standalone binary and as
//! a library.
//!
//! ## Library Usage
//!
//! ```toml
//! [dependencies]
//! folio = { version = "0.1", default-features = false }
//! ```
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::path::PathBuf;
//! use folio::server::{AppState, create_router};
//! use folio::store::{SqliteStore, Store};
//!
//! let store = SqliteStore::new(&PathBuf::from("./data/portfolio.db")).unwrap();
//! store.initialize().unwrap();
//!
//! let state = Arc::new(AppState::new(Arc::new(store), PathBuf::from("./data/uploads")));
//! let router = create_router(state);
//! // Serve with axum...
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Builds the `folio` binary. Disable with `default-features = false`.

pub mod config;
pub mod error;
pub mod server;
pub mod store;
pub mod types;
pub mod uploads;
