//! Background quote refresh
//!
//! Fetches immediately, then on every tick until shutdown.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::state::AppState;

pub const FEED_ERROR_MESSAGE: &str = "Unable to sync with live market data. Retry in a few moments.";

/// Fetch one snapshot into the shared feed
pub async fn refresh_once(state: &AppState) {
    state.feed.write().await.begin_refresh();

    match state.provider.fetch_quotes().await {
        Ok(quotes) => {
            tracing::info!(
                provider = state.provider.name(),
                count = quotes.len(),
                "market snapshot refreshed"
            );
            state.feed.write().await.apply_snapshot(quotes);
        }
        Err(e) => {
            tracing::warn!(provider = state.provider.name(), "market refresh failed: {}", e);
            state.feed.write().await.record_failure(FEED_ERROR_MESSAGE);
        }
    }
}

pub fn spawn_refresh(
    state: AppState,
    every: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => refresh_once(&state).await,
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::info!("quote refresh stopped");
                        break;
                    }
                }
            }
        }
    })
}
