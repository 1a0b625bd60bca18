use crate::error::Result;
use async_trait::async_trait;
use keyhole_core::{ShortId, UrlRecord};

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Shortens a long URL and returns the persisted record.
    /// Shortening the same URL twice hands back the existing record.
    async fn shorten(&self, long_url: &str) -> Result<UrlRecord>;

    /// Resolves a short identifier to its stored record, counting the
    /// lookup as one visit.
    async fn resolve(&self, short_id: &ShortId) -> Result<UrlRecord>;
}
