//! AWS-facing adapters and services for gradpict resources.
//!
//! Backend traits in `adapters` sit at the SDK seam. The provisioner and the
//! two facades (`FileStore`, `MemoryStore`) are written against those traits
//! so they can run over the real SDK clients or in-memory test doubles.

pub mod adapters;
pub mod error;
pub mod file_store;
pub mod memory_store;
pub mod provisioner;
pub mod sdk;

pub use adapters::table_store::PutReceipt;
pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use provisioner::Provisioner;
