//! Storage backends for keyhole.
//!
//! Every backend implements [`keyhole_core::UrlStore`]; the repository layer
//! stays agnostic of which one sits behind it.

pub mod memory;

pub use memory::InMemoryStore;
