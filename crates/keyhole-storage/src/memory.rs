use async_trait::async_trait;
use jiff::Timestamp;
use keyhole_core::{RecordField, RecordFilter, Result, ShortId, StorageError, UrlRecord, UrlStore};
use std::collections::HashSet;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
struct Inner {
    /// Documents in insertion order; a multi-match lookup on an unindexed
    /// field resolves to the earliest insert.
    documents: Vec<UrlRecord>,
    unique_indexes: HashSet<RecordField>,
}

/// In-memory implementation of [`UrlStore`].
///
/// Documents live behind a single `RwLock`, which is enough for tests and
/// single-process deployments. Uniqueness is enforced only for fields with
/// an ensured index, mirroring how a document database leaves unindexed
/// fields unconstrained.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

impl InMemoryStore {
    /// Creates an empty store with no indexes ensured.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| StorageError::Unavailable("store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| StorageError::Unavailable("store lock poisoned".to_string()))
    }
}

#[async_trait]
impl UrlStore for InMemoryStore {
    async fn insert(&self, record: UrlRecord) -> Result<()> {
        let mut guard = self.write()?;
        let inner = &mut *guard;

        for field in &inner.unique_indexes {
            // Sparse index: a document lacking the field is exempt.
            let Some(key) = field.value(&record) else {
                continue;
            };
            if inner
                .documents
                .iter()
                .any(|doc| field.value(doc) == Some(key))
            {
                return Err(StorageError::Conflict(key.to_string()));
            }
        }

        inner.documents.push(record);
        Ok(())
    }

    async fn find_one(&self, filter: RecordFilter<'_>) -> Result<Option<UrlRecord>> {
        let inner = self.read()?;
        let mut matches = inner.documents.iter().filter(|doc| filter.matches(doc));

        let Some(first) = matches.next() else {
            return Ok(None);
        };
        if inner.unique_indexes.contains(&filter.field()) && matches.next().is_some() {
            return Err(StorageError::CorruptedIndex(filter.to_string()));
        }
        Ok(Some(first.clone()))
    }

    async fn append_visit(&self, short_id: &ShortId, at: Timestamp) -> Result<bool> {
        let mut guard = self.write()?;
        let inner = &mut *guard;

        let filter = RecordFilter::ShortId(short_id);
        let unique = inner.unique_indexes.contains(&RecordField::ShortId);

        let mut matches = inner
            .documents
            .iter_mut()
            .filter(|doc| filter.matches(doc));
        let Some(first) = matches.next() else {
            return Ok(false);
        };
        if unique && matches.next().is_some() {
            return Err(StorageError::CorruptedIndex(filter.to_string()));
        }

        first.visit_times.push(at);
        Ok(true)
    }

    async fn ensure_unique_sparse_index(&self, field: RecordField) -> Result<()> {
        let mut guard = self.write()?;
        let inner = &mut *guard;

        if inner.unique_indexes.contains(&field) {
            return Ok(());
        }

        // A unique index cannot be built over documents that already collide.
        let mut seen = HashSet::new();
        for doc in &inner.documents {
            let Some(key) = field.value(doc) else {
                continue;
            };
            if !seen.insert(key) {
                return Err(StorageError::Conflict(key.to_string()));
            }
        }

        inner.unique_indexes.insert(field);
        Ok(())
    }
}
