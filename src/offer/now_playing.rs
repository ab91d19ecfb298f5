use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

use crate::server::now_ms;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NowPlaying {
    pub artist_id: Option<String>,
    pub artist_name: Option<String>,
    pub updated_at: u64,
}

/// Current now-playing value. Each update swaps in a whole new snapshot, so
/// readers see either the previous value or the next one, never a mix.
#[derive(Debug, Default)]
pub struct NowPlayingState {
    current: RwLock<Arc<NowPlaying>>,
}

impl NowPlayingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Arc<NowPlaying> {
        self.current.read().clone()
    }

    pub fn set(&self, artist_id: String, artist_name: Option<String>) -> Arc<NowPlaying> {
        let next = Arc::new(NowPlaying {
            artist_id: Some(artist_id),
            artist_name: artist_name.filter(|n| !n.trim().is_empty()),
            updated_at: now_ms(),
        });
        *self.current.write() = next.clone();
        next
    }
}
