//! Remote document store implementations.

pub mod json_dir_document_store;
pub mod memory_document_store;

pub use json_dir_document_store::JsonDirDocumentStore;
pub use memory_document_store::MemoryDocumentStore;
