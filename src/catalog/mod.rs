//! Product catalog subsystem.
//!
//! # Data Flow
//! ```text
//! request body bytes
//!     → codec.rs (decode wire JSON → Product)
//!     → store.rs (append / update under write lock)
//!
//! GET /products
//!     → store.rs (read-locked view)
//!     → codec.rs (encode view → JSON array)
//! ```
//!
//! # Design Decisions
//! - The store is the only owner of the collection; handlers hold `Arc<ProductStore>`
//! - Insertion order is preserved and is the basis for edit-in-place
//! - Timestamps are server-assigned and never leave the process

pub mod codec;
pub mod product;
pub mod store;

pub use codec::{CodecError, ProductPayload};
pub use product::Product;
pub use store::{ProductStore, StoreError};
