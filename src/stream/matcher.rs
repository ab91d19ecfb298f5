use serde::Serialize;
use serde_json::Value;

use super::playlist::normalize_stream_key;

/// One live stream as listed by the provider directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryRecord {
    pub stream_key: String,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl DirectoryRecord {
    /// Accepts `streamKey`/`stream_key` and a string or numeric `id`
    /// (`liveStreamId` as a fallback). Returns `None` for anything else.
    pub fn from_value(value: &Value) -> Option<Self> {
        let stream_key = value
            .get("streamKey")
            .filter(|v| !v.is_null())
            .or_else(|| value.get("stream_key"))
            .and_then(Value::as_str)?;
        let id = value
            .get("id")
            .filter(|v| !v.is_null())
            .or_else(|| value.get("liveStreamId"))
            .and_then(|v| match v {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })?;

        Some(Self {
            stream_key: stream_key.to_string(),
            id,
            name: value.get("name").and_then(Value::as_str).map(str::to_string),
        })
    }
}

/// Finds the first record whose normalized key equals `key` exactly.
///
/// Records are taken in the order the directory returned them; when several
/// share a normalized key the earliest wins. Also returns the record count.
pub fn match_stream<'a>(
    key: &str,
    records: &'a [DirectoryRecord],
) -> (Option<&'a DirectoryRecord>, usize) {
    let found = records
        .iter()
        .find(|r| normalize_stream_key(&r.stream_key) == key);
    (found, records.len())
}
