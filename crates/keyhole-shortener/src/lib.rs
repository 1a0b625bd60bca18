//! URL repository and orchestration service for keyhole.
//!
//! [`UrlRepository`] persists URL records through any [`keyhole_core::UrlStore`]
//! and owns the uniqueness invariant on short identifiers.
//! [`ShortenerService`] composes the repository with a generator, escalating
//! through the length classes when a generated identifier collides.

pub mod error;
pub mod repository;
pub mod service;
pub mod shortener;

pub use error::{Result, ShortenerError};
pub use repository::UrlRepository;
pub use service::ShortenerService;
pub use shortener::Shortener;
