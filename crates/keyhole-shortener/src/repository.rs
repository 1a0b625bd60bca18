use jiff::Timestamp;
use keyhole_core::{RecordField, RecordFilter, Result, ShortId, StorageError, UrlRecord, UrlStore};
use std::sync::Arc;
use tracing::{debug, trace};

/// Persistence layer for URL records over an abstract document store.
///
/// The repository owns the uniqueness invariant on `shortId`: it ensures the
/// unique sparse index after every save, and the store's conflict signal is
/// the only collision-detection mechanism in the system. Records lacking a
/// short identifier are exempt from the index and tolerated on save.
#[derive(Debug, Clone)]
pub struct UrlRepository<S> {
    store: Arc<S>,
}

impl<S: UrlStore> UrlRepository<S> {
    /// Creates a repository over `store`.
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Saves a record and re-ensures the unique sparse index on `shortId`.
    ///
    /// Returns the record as persisted. Fails with
    /// [`StorageError::Conflict`] when the identifier is already taken;
    /// callers recover by saving again with a fresh identifier.
    pub async fn save_record(&self, record: UrlRecord) -> Result<UrlRecord> {
        self.store.insert(record.clone()).await?;
        self.store
            .ensure_unique_sparse_index(RecordField::ShortId)
            .await?;
        debug!(short_id = ?record.short_id, "record saved, unique index ensured");
        Ok(record)
    }

    /// The record a short identifier resolves to.
    ///
    /// Fails with [`StorageError::NotFound`] when no record matches, and
    /// with [`StorageError::CorruptedIndex`] when the supposedly-unique
    /// identifier matches more than one record.
    pub async fn long_url(&self, short_id: &ShortId) -> Result<UrlRecord> {
        trace!(short_id = %short_id, "looking up record by short id");
        let filter = RecordFilter::ShortId(short_id);
        match self.store.find_one(filter).await? {
            Some(record) => Ok(record),
            None => Err(StorageError::NotFound(filter.to_string())),
        }
    }

    /// The record shortening `long_url`, if one exists.
    ///
    /// `longUrl` is not unique; when several records match, the earliest
    /// saved one wins.
    pub async fn short_url(&self, long_url: &str) -> Result<UrlRecord> {
        trace!(long_url = %long_url, "looking up record by long url");
        let filter = RecordFilter::LongUrl(long_url);
        match self.store.find_one(filter).await? {
            Some(record) => Ok(record),
            None => Err(StorageError::NotFound(filter.to_string())),
        }
    }

    /// Appends the current time to the visit history of the record keyed by
    /// `short_id`.
    pub async fn track_visit(&self, short_id: &ShortId) -> Result<()> {
        let visited_at = Timestamp::now();
        if !self.store.append_visit(short_id, visited_at).await? {
            return Err(StorageError::NotFound(
                RecordFilter::ShortId(short_id).to_string(),
            ));
        }
        trace!(short_id = %short_id, visited_at = %visited_at, "visit recorded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use keyhole_storage::InMemoryStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn record(long_url: &str, short_id: &str) -> UrlRecord {
        UrlRecord::new(long_url, ShortId::new(short_id))
    }

    fn sparse_record(long_url: &str) -> UrlRecord {
        UrlRecord {
            long_url: long_url.to_string(),
            short_id: None,
            visit_times: Vec::new(),
            create_time: Timestamp::now(),
        }
    }

    fn repository() -> UrlRepository<InMemoryStore> {
        UrlRepository::new(InMemoryStore::new())
    }

    /// Forwards to an [`InMemoryStore`] while counting index ensures.
    #[derive(Debug, Default)]
    struct CountingStore {
        inner: InMemoryStore,
        ensures: AtomicUsize,
    }

    #[async_trait]
    impl UrlStore for CountingStore {
        async fn insert(&self, record: UrlRecord) -> Result<()> {
            self.inner.insert(record).await
        }

        async fn find_one(&self, filter: RecordFilter<'_>) -> Result<Option<UrlRecord>> {
            self.inner.find_one(filter).await
        }

        async fn append_visit(&self, short_id: &ShortId, at: Timestamp) -> Result<bool> {
            self.inner.append_visit(short_id, at).await
        }

        async fn ensure_unique_sparse_index(&self, field: RecordField) -> Result<()> {
            self.ensures.fetch_add(1, Ordering::SeqCst);
            self.inner.ensure_unique_sparse_index(field).await
        }
    }

    #[tokio::test]
    async fn save_then_look_up_both_ways() {
        let repo = repository();
        repo.save_record(record("http://example.com", "abc123"))
            .await
            .unwrap();

        let by_id = repo.long_url(&ShortId::new("abc123")).await.unwrap();
        assert_eq!(by_id.long_url, "http://example.com");

        let by_url = repo.short_url("http://example.com").await.unwrap();
        assert_eq!(by_url.short_id, Some(ShortId::new("abc123")));
    }

    #[tokio::test]
    async fn save_returns_the_persisted_record() {
        let repo = repository();
        let saved = repo
            .save_record(record("http://example.com", "abc123"))
            .await
            .unwrap();

        assert_eq!(saved.long_url, "http://example.com");
        assert_eq!(saved.short_id, Some(ShortId::new("abc123")));
        assert!(saved.visit_times.is_empty());
    }

    #[tokio::test]
    async fn duplicate_short_id_is_a_conflict() {
        let repo = repository();
        repo.save_record(record("http://example.com", "abc123"))
            .await
            .unwrap();

        let err = repo
            .save_record(record("http://other.example.com", "abc123"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));

        // The first record is untouched by the rejected save.
        let kept = repo.long_url(&ShortId::new("abc123")).await.unwrap();
        assert_eq!(kept.long_url, "http://example.com");
    }

    #[tokio::test]
    async fn missing_short_id_is_not_found() {
        let repo = repository();

        let err = repo
            .long_url(&ShortId::new("doesnotexist"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn missing_long_url_is_not_found() {
        let repo = repository();

        let err = repo.short_url("http://nowhere.example.com").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn three_visits_accumulate_in_order() {
        let repo = repository();
        repo.save_record(record("http://example.com", "abc123"))
            .await
            .unwrap();

        let id = ShortId::new("abc123");
        for _ in 0..3 {
            repo.track_visit(&id).await.unwrap();
        }

        let found = repo.long_url(&id).await.unwrap();
        assert_eq!(found.visit_times.len(), 3);
        let ordered = found.visit_times.windows(2).all(|pair| pair[0] <= pair[1]);
        assert!(ordered, "visit times must be non-decreasing");
    }

    #[tokio::test]
    async fn tracking_a_missing_record_is_not_found() {
        let repo = repository();

        let err = repo
            .track_visit(&ShortId::new("doesnotexist"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn records_without_short_ids_save_freely() {
        let repo = repository();

        // The sparse index exempts unkeyed records, so neither save conflicts.
        repo.save_record(sparse_record("http://example.com/a"))
            .await
            .unwrap();
        repo.save_record(sparse_record("http://example.com/b"))
            .await
            .unwrap();

        let found = repo.short_url("http://example.com/b").await.unwrap();
        assert_eq!(found.short_id, None);
    }

    #[tokio::test]
    async fn earliest_record_wins_repeated_long_urls() {
        let repo = repository();
        repo.save_record(record("http://example.com", "first1"))
            .await
            .unwrap();
        repo.save_record(record("http://example.com", "second"))
            .await
            .unwrap();

        let found = repo.short_url("http://example.com").await.unwrap();
        assert_eq!(found.short_id, Some(ShortId::new("first1")));
    }

    #[tokio::test]
    async fn every_save_reensures_the_index() {
        let repo = UrlRepository::new(CountingStore::default());
        for i in 0..3 {
            repo.save_record(record(&format!("http://example{i}.com"), &format!("id{i:04}")))
                .await
                .unwrap();
        }

        assert_eq!(repo.store.ensures.load(Ordering::SeqCst), 3);
    }
}
