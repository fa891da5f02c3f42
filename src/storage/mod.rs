//! Bill store implementations for different backends

#[cfg(feature = "http")]
pub mod http;
#[cfg(feature = "in-memory")]
pub mod in_memory;

#[cfg(feature = "http")]
pub use http::HttpBillStore;
#[cfg(feature = "in-memory")]
pub use in_memory::{InMemoryBillStore, StoredReceipt};
