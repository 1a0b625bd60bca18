use crate::error::{Result, ShortenerError};
use crate::repository::UrlRepository;
use crate::shortener::Shortener;
use async_trait::async_trait;
use keyhole_core::{ShortId, StorageError, UrlRecord, UrlStore};
use keyhole_generator::{Generator, LengthClass};
use std::sync::Arc;
use tracing::debug;

/// A concrete implementation of the [`Shortener`] trait.
///
/// Wraps a [`UrlRepository`] and a [`Generator`]. Generated identifiers are
/// only probabilistically unique, so a save can collide; the service recovers
/// by escalating through the length classes, drawing a fresh identifier from
/// a wider space each time.
#[derive(Debug, Clone)]
pub struct ShortenerService<S, G> {
    repository: UrlRepository<S>,
    generator: Arc<G>,
}

impl<S: UrlStore, G: Generator> ShortenerService<S, G> {
    /// Creates a new service over `repository` and `generator`.
    pub fn new(repository: UrlRepository<S>, generator: G) -> Self {
        Self {
            repository,
            generator: Arc::new(generator),
        }
    }

    /// Validates that the URL carries an http(s) scheme and a host.
    ///
    /// The URL is stored verbatim afterwards; no normalization happens here.
    fn validate_url(url: &str) -> Result<()> {
        if url.is_empty() {
            return Err(ShortenerError::InvalidUrl("url is empty".to_string()));
        }

        let Some((scheme, rest)) = url.split_once("://") else {
            return Err(ShortenerError::InvalidUrl(format!(
                "url must carry a scheme and host: {url}"
            )));
        };
        if scheme.is_empty() || rest.is_empty() {
            return Err(ShortenerError::InvalidUrl(format!(
                "url must carry a scheme and host: {url}"
            )));
        }

        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return Err(ShortenerError::InvalidUrl(format!(
                "url scheme must be http or https: {scheme}"
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl<S: UrlStore, G: Generator> Shortener for ShortenerService<S, G> {
    async fn shorten(&self, long_url: &str) -> Result<UrlRecord> {
        Self::validate_url(long_url)?;

        // A long URL is shortened once; hand back the existing record.
        match self.repository.short_url(long_url).await {
            Ok(existing) => {
                debug!(
                    long_url = %long_url,
                    short_id = ?existing.short_id,
                    "long url already shortened"
                );
                return Ok(existing);
            }
            Err(StorageError::NotFound(_)) => {}
            Err(other) => return Err(other.into()),
        }

        for class in LengthClass::ALL {
            let short_id = self.generator.generate(class);
            let record = UrlRecord::new(long_url, short_id);
            match self.repository.save_record(record).await {
                Ok(saved) => return Ok(saved),
                Err(StorageError::Conflict(taken)) => {
                    debug!(
                        class = %class,
                        short_id = %taken,
                        "identifier collision, escalating to a longer class"
                    );
                }
                Err(other) => return Err(other.into()),
            }
        }

        Err(ShortenerError::IdSpaceExhausted {
            attempts: LengthClass::ALL.len(),
        })
    }

    async fn resolve(&self, short_id: &ShortId) -> Result<UrlRecord> {
        let record = self.repository.long_url(short_id).await?;
        self.repository.track_visit(short_id).await?;
        Ok(record)
    }
}
