//! Mock API Core - Domain types and the in-memory store.
//!
//! This crate holds everything the mock API server mutates:
//! - `types` - Typed ids plus the `User` and `Product` records
//! - `store` - The `Store` with its ordered collections and counter
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations - no I/O, no HTTP,
//! no clocks. Locking and request handling live in `mock-api-server`.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod store;
pub mod types;

pub use store::{Collection, Record, Store, StoreError};
pub use types::*;
