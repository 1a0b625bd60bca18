//! Core types and traits for the keyhole URL shortener.
//!
//! This crate provides the persisted record schema, the short-identifier
//! type, and the abstract document store the repository persists through.

pub mod error;
pub mod record;
pub mod short_id;
pub mod store;

pub use error::{Result, StorageError};
pub use record::UrlRecord;
pub use short_id::ShortId;
pub use store::{RecordField, RecordFilter, UrlStore};
