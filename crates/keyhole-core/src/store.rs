use crate::error::Result;
use crate::record::UrlRecord;
use crate::short_id::ShortId;
use async_trait::async_trait;
use jiff::Timestamp;
use std::fmt::Display;

/// Fields of the persisted record that lookups and indexes may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    ShortId,
    LongUrl,
}

impl RecordField {
    /// The persisted field name, matching the serde renames on [`UrlRecord`].
    pub fn wire_name(self) -> &'static str {
        match self {
            RecordField::ShortId => "shortId",
            RecordField::LongUrl => "longUrl",
        }
    }

    /// The value `record` carries for this field, if present.
    pub fn value(self, record: &UrlRecord) -> Option<&str> {
        match self {
            RecordField::ShortId => record.short_id.as_ref().map(ShortId::as_str),
            RecordField::LongUrl => Some(record.long_url.as_str()),
        }
    }
}

/// An exact-match filter over a single record field.
#[derive(Debug, Clone, Copy)]
pub enum RecordFilter<'a> {
    ShortId(&'a ShortId),
    LongUrl(&'a str),
}

impl RecordFilter<'_> {
    /// The field this filter matches on.
    pub fn field(&self) -> RecordField {
        match self {
            RecordFilter::ShortId(_) => RecordField::ShortId,
            RecordFilter::LongUrl(_) => RecordField::LongUrl,
        }
    }

    /// The value a matching record must carry.
    pub fn key(&self) -> &str {
        match self {
            RecordFilter::ShortId(id) => id.as_str(),
            RecordFilter::LongUrl(url) => url,
        }
    }

    /// Whether `record` matches this filter.
    pub fn matches(&self, record: &UrlRecord) -> bool {
        self.field().value(record) == Some(self.key())
    }
}

impl Display for RecordFilter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} \"{}\"", self.field().wire_name(), self.key())
    }
}

/// The abstract document store the repository persists through.
///
/// A store holds [`UrlRecord`] documents and enforces uniqueness for fields
/// that have had a unique index ensured. Engine choice and connection
/// management live behind implementations of this trait; the repository only
/// sees these four operations.
#[async_trait]
pub trait UrlStore: Send + Sync + 'static {
    /// Inserts one document.
    ///
    /// Fails with [`StorageError::Conflict`] when a unique-indexed field of
    /// `record` collides with an existing document.
    ///
    /// [`StorageError::Conflict`]: crate::StorageError::Conflict
    async fn insert(&self, record: UrlRecord) -> Result<()>;

    /// Returns the document matching `filter`, or `None` when nothing does.
    ///
    /// When the filter names a unique-indexed field and more than one
    /// document matches, implementations must fail with
    /// [`StorageError::CorruptedIndex`] instead of picking one.
    ///
    /// [`StorageError::CorruptedIndex`]: crate::StorageError::CorruptedIndex
    async fn find_one(&self, filter: RecordFilter<'_>) -> Result<Option<UrlRecord>>;

    /// Atomically appends `at` to the visit history of the document keyed by
    /// `short_id`.
    ///
    /// Returns `false` when no document matches. Concurrent appends to one
    /// document must all survive; no appended timestamp may be lost.
    async fn append_visit(&self, short_id: &ShortId, at: Timestamp) -> Result<bool>;

    /// Ensures a unique, sparse index over `field`. Idempotent.
    ///
    /// Documents lacking the field stay unindexed and exempt from
    /// uniqueness. Fails with [`StorageError::Conflict`] when existing
    /// documents already collide — a unique index cannot be built over
    /// duplicate keys.
    ///
    /// [`StorageError::Conflict`]: crate::StorageError::Conflict
    async fn ensure_unique_sparse_index(&self, field: RecordField) -> Result<()>;
}
