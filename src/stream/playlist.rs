use serde::Serialize;
use url::Url;

/// Path segment that precedes `<app>/<key>` in provider playlist URLs.
pub const LAYOUT_MARKER: &str = "live_cdn";

/// Provider-neutral address of a live stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamLocator {
    pub app_id: String,
    pub stream_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("invalid playlist url: {0}")]
    InvalidUrl(String),

    #[error("unrecognized playlist layout, expected .../live_cdn/<app>/<key>/...")]
    UnrecognizedLayout {
        segments: Vec<String>,
        marker: Option<usize>,
    },
}

impl ResolveError {
    /// Whatever was parsed before giving up, for the error body.
    pub fn partial(&self) -> Option<serde_json::Value> {
        match self {
            Self::InvalidUrl(_) => None,
            Self::UnrecognizedLayout { segments, marker } => Some(serde_json::json!({
                "segments": segments,
                "markerIndex": marker,
            })),
        }
    }
}

/// CDNs append a run of dashes to stream keys inconsistently; stripping it
/// makes keys from different sources comparable.
pub fn normalize_stream_key(key: &str) -> &str {
    key.trim_end_matches('-')
}

pub fn parse_playlist_url(raw: &str) -> Result<StreamLocator, ResolveError> {
    let url = Url::parse(raw.trim()).map_err(|e| ResolveError::InvalidUrl(e.to_string()))?;

    let segments: Vec<&str> = url.path().split('/').filter(|s| !s.is_empty()).collect();
    let unrecognized = |marker: Option<usize>| ResolveError::UnrecognizedLayout {
        segments: segments.iter().map(|s| s.to_string()).collect(),
        marker,
    };

    let Some(marker) = segments.iter().position(|s| *s == LAYOUT_MARKER) else {
        return Err(unrecognized(None));
    };
    let (Some(app_id), Some(key)) = (segments.get(marker + 1), segments.get(marker + 2)) else {
        return Err(unrecognized(Some(marker)));
    };

    let stream_key = normalize_stream_key(key);
    if app_id.is_empty() || stream_key.is_empty() {
        return Err(unrecognized(Some(marker)));
    }

    Ok(StreamLocator {
        app_id: app_id.to_string(),
        stream_key: stream_key.to_string(),
    })
}
