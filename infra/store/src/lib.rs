//! Concrete data sources.
//!
//! - [`MemoryStore`]: the full source, loaded from a JSON seed, with reverse import lookups.
//! - [`ReadThroughSource`]: a restricted, caching source in front of another one. It only
//!   answers the base queries.
//!
//! ```rust
//! use docsite_details::DataSource;
//! use docsite_domain::capabilities::Capabilities;
//! use docsite_store::{MemoryStore, ReadThroughSource};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let store = Arc::new(MemoryStore::from_json(br#"{"modules": []}"#).unwrap());
//! assert!(store.capabilities().contains(Capabilities::IMPORTED_BY));
//!
//! let restricted = ReadThroughSource::new(store, 1_000, Duration::from_secs(60));
//! assert!(restricted.capabilities().is_empty());
//! ```

mod error;
mod memory;
mod read_through;
mod seed;

pub use error::{StoreError, StoreErrorExt};
pub use memory::MemoryStore;
pub use read_through::ReadThroughSource;
