//! Playlist URL resolution and provider stream correlation.

pub mod directory;
pub mod matcher;
pub mod playlist;

use serde::Serialize;
use tracing::{debug, warn};

pub use directory::{HttpStreamDirectory, StreamDirectory};
pub use matcher::{DirectoryRecord, match_stream};
pub use playlist::{ResolveError, StreamLocator, normalize_stream_key, parse_playlist_url};

use crate::common::Lookup;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupStatus {
    Matched,
    NotFound,
    /// No provider credentials, the directory was never queried.
    Skipped,
    LookupFailed,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamResolution {
    pub app_id: String,
    pub stream_key: String,
    pub stream_id: Option<String>,
    /// The playlist URL as submitted.
    pub raw: String,
    pub lookup: LookupStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
}

/// Parses `raw` and, best effort, correlates the key with the provider
/// directory. Only a bad URL fails; directory trouble leaves `stream_id` empty.
pub async fn resolve_stream(
    raw: &str,
    directory: &dyn StreamDirectory,
) -> Result<StreamResolution, ResolveError> {
    let StreamLocator { app_id, stream_key } = parse_playlist_url(raw)?;

    let (stream_id, lookup, total) = match directory.list_live_streams().await {
        Lookup::Ok(records) => {
            let (found, total) = match_stream(&stream_key, &records);
            match found {
                Some(record) => {
                    debug!("Stream key {} matched provider stream {}", stream_key, record.id);
                    (Some(record.id.clone()), LookupStatus::Matched, Some(total))
                }
                None => {
                    debug!("Stream key {} not among {} provider streams", stream_key, total);
                    (None, LookupStatus::NotFound, Some(total))
                }
            }
        }
        Lookup::NotConfigured => (None, LookupStatus::Skipped, None),
        Lookup::Failed(reason) => {
            warn!("Provider directory lookup failed: {}", reason);
            (None, LookupStatus::LookupFailed, None)
        }
    };

    Ok(StreamResolution {
        app_id,
        stream_key,
        stream_id,
        raw: raw.to_string(),
        lookup,
        total,
    })
}
