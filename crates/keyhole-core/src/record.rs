use crate::short_id::ShortId;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A persisted long↔short mapping plus its visit history.
///
/// The serialized field names (`longUrl`, `shortId`, `visitTimes`,
/// `createTime`) are part of the storage contract and must round-trip
/// exactly; the serde renames pin them independently of the Rust names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlRecord {
    /// The original URL, stored verbatim — the repository never normalizes it.
    #[serde(rename = "longUrl")]
    pub long_url: String,
    /// The generated identifier, unique across all records once indexed.
    /// Records lacking the field are tolerated and exempt from the sparse
    /// uniqueness index.
    #[serde(rename = "shortId", skip_serializing_if = "Option::is_none", default)]
    pub short_id: Option<ShortId>,
    /// One UTC timestamp per successful resolution, in append order.
    #[serde(rename = "visitTimes", default)]
    pub visit_times: Vec<Timestamp>,
    /// Set once when the record is created, immutable thereafter.
    #[serde(rename = "createTime")]
    pub create_time: Timestamp,
}

impl UrlRecord {
    /// Creates a fresh record mapping `long_url` to `short_id`.
    ///
    /// `create_time` is the current instant; the visit history starts empty.
    pub fn new(long_url: impl Into<String>, short_id: ShortId) -> Self {
        Self {
            long_url: long_url.into(),
            short_id: Some(short_id),
            visit_times: Vec::new(),
            create_time: Timestamp::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_starts_without_visits() {
        let record = UrlRecord::new("http://example.com", ShortId::new("abc123"));

        assert_eq!(record.long_url, "http://example.com");
        assert_eq!(record.short_id, Some(ShortId::new("abc123")));
        assert!(record.visit_times.is_empty());
        assert!(record.create_time <= Timestamp::now());
    }

    #[test]
    fn wire_names_match_storage_contract() {
        let record = UrlRecord::new("http://example.com", ShortId::new("abc123"));

        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();
        let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();

        assert_eq!(keys, ["createTime", "longUrl", "shortId", "visitTimes"]);
    }

    #[test]
    fn missing_short_id_is_omitted_from_wire_form() {
        let record = UrlRecord {
            long_url: "http://example.com".to_string(),
            short_id: None,
            visit_times: Vec::new(),
            create_time: Timestamp::now(),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("shortId").is_none());

        // A document without the field deserializes back to `None`.
        let parsed: UrlRecord = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.short_id, None);
    }

    #[test]
    fn round_trips_through_wire_form() {
        let mut record = UrlRecord::new("http://example.com", ShortId::new("abc123"));
        record.visit_times.push(Timestamp::now());

        let json = serde_json::to_string(&record).unwrap();
        let parsed: UrlRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, record);
    }
}
