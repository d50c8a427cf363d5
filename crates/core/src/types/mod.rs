//! Core types for the mock API.
//!
//! Records are plain serde structs; the `*Fields` types carry the optional
//! values a client may send when creating or updating a record.

pub mod id;
pub mod product;
pub mod user;

pub use id::*;
pub use product::{DEFAULT_PRODUCT_NAME, Product, ProductFields};
pub use user::{DEFAULT_USER_NAME, User, UserFields};
