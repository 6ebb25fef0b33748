//! # data-kit
//!
//! A type-safe, generic in-memory data service for Rust.
//!
//! ## Features
//!
//! - **Fully Generic:** Serve any record type `T` that implements [`Entity`]
//! - **One Store, Many Kinds:** Per-kind façades share one store; identifiers are scoped per kind
//! - **Atomic Operations:** One lock per store, every operation is a single critical section
//! - **Mocked Fixtures:** Pre-populate services with generated customers and products
//! - **Observability:** Built-in logging and pluggable request metrics
//!
//! ## Quick Start
//!
//! ```ignore
//! use data_kit::{DataService, Entity, InMemoryDataService};
//! use data_kit::entity::Id;
//!
//! // 1. Define your entity
//! #[derive(Clone)]
//! struct User {
//!     id: Id,
//!     name: String,
//! }
//!
//! // 2. Implement Entity
//! impl Entity for User {
//!     fn id(&self) -> Id { self.id }
//!     fn set_id(&mut self, id: Id) { self.id = id; }
//!     fn kind() -> &'static str { "user" }
//! }
//!
//! // 3. Create the service once, at startup
//! let users = InMemoryDataService::<User>::new();
//!
//! // 4. Share it - cloning is cheap and every clone sees the same store
//! let handler_users = users.clone();
//! let alice = handler_users.add(User { id: 0, name: "Alice".into() }).await?;
//! assert_eq!(alice.id, 1);
//! ```
//!
//! ### Mocked Services
//!
//! ```ignore
//! use data_kit::{MockedDataService, fixture::MockConfig, models::Customer};
//!
//! let customers = MockedDataService::<Customer>::with_config(
//!     &MockConfig::default().with_count(10).with_seed(7),
//! )?;
//! ```

#[macro_use]
extern crate log;

pub mod entity;
pub mod error;
pub mod fixture;
pub mod key;
pub mod library;
pub mod models;
pub mod observability;
pub mod service;
pub mod store;

// Re-exports for convenience
pub use entity::{Entity, Id};
pub use error::{Error, Result};
pub use fixture::{Fixture, FixtureGenerator, MockConfig};
pub use key::RecordKey;
pub use library::Library;
pub use service::{DataService, InMemoryDataService, MockedDataService};
pub use store::{RecordStore, SharedStore, StoreStats};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
