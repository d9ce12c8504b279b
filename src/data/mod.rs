// Data module - Embedded cipher catalog

pub mod cipher_mapping;

// Re-export commonly used types
pub use cipher_mapping::{CIPHER_DB, CipherCatalog, CipherDatabase};
