use std::{sync::Arc, time::Duration};

use tokio::{task::JoinHandle, time::MissedTickBehavior};
use tracing::debug;

use super::TtlStore;

/// Runs `sweep()` on a fixed interval until the handle is aborted.
pub fn spawn_sweeper<V>(store: Arc<TtlStore<V>>, every: Duration) -> JoinHandle<()>
where
    V: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // the first tick completes immediately
        interval.tick().await;

        loop {
            interval.tick().await;
            let removed = store.sweep();
            if removed > 0 {
                debug!("Swept {} expired tokens, {} remaining", removed, store.len());
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ManualClock;

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_evicts_without_reads() {
        let clock = Arc::new(ManualClock::new(1_000));
        let store = Arc::new(TtlStore::with_clock(Duration::from_secs(60), clock.clone()));
        store.put("stale", 1u32);
        clock.advance(Duration::from_secs(61));

        let handle = spawn_sweeper(store.clone(), Duration::from_secs(2));
        tokio::time::sleep(Duration::from_secs(5)).await;

        assert!(store.is_empty());
        handle.abort();
    }
}
