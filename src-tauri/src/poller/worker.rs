use super::result::{body_preview, timestamp_now, PollResult};
use super::{lock, Shared};
use crate::observer::PollObserver;
use reqwest::Client;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Background loop for one polling session.
pub(crate) struct Worker {
    pub session_id: String,
    pub url: String,
    pub interval: Duration,
    pub preview_limit: usize,
    pub client: Client,
    pub shared: Arc<Mutex<Shared>>,
    pub observer: Option<Arc<dyn PollObserver>>,
    pub cancel: CancellationToken,
}

impl Worker {
    pub(crate) async fn run(self) {
        // First poll happens right away; ticks start one interval later.
        self.poll_once().await;

        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => break,
                _ = ticker.tick() => self.poll_once().await,
            }
        }

        tracing::debug!("Poll worker for {} exited (session {})", self.url, self.session_id);
    }

    async fn poll_once(&self) {
        let result = probe(&self.client, &self.url, self.preview_limit).await;
        self.record(result);
    }

    fn record(&self, result: PollResult) {
        let appended = {
            let mut shared = lock(&self.shared);
            if shared.log_owner.as_deref() == Some(self.session_id.as_str()) {
                shared.results.push(result.clone());
                true
            } else {
                false
            }
        };

        if !appended {
            tracing::debug!("Discarded result from superseded session {}", self.session_id);
            return;
        }

        if let Some(observer) = &self.observer {
            observer.publish(&result);
        }
    }
}

/// Issue one GET and capture its outcome. Never fails: transport errors end up
/// in the returned record.
pub async fn probe(client: &Client, url: &str, preview_limit: usize) -> PollResult {
    let timestamp = timestamp_now();

    let mut resp = match client.get(url).send().await {
        Ok(resp) => resp,
        Err(e) => {
            tracing::warn!("Poll of {url} failed: {e}");
            return PollResult::transport_failure(timestamp, &e);
        }
    };

    let status = resp.status().as_u16();
    let preview = match read_prefix(&mut resp, preview_limit).await {
        Ok(bytes) => body_preview(&bytes, preview_limit),
        Err(e) => {
            tracing::debug!("Failed to read body from {url}: {e}");
            String::new()
        }
    };

    tracing::debug!("Polled {url}: {status}");
    PollResult::response(timestamp, status, preview)
}

/// Read at most `limit` bytes of the body, leaving the rest on the wire.
async fn read_prefix(resp: &mut reqwest::Response, limit: usize) -> Result<Vec<u8>, reqwest::Error> {
    let mut buf = Vec::with_capacity(limit.min(8192));
    while buf.len() < limit {
        match resp.chunk().await? {
            Some(chunk) => {
                let take = (limit - buf.len()).min(chunk.len());
                buf.extend_from_slice(&chunk[..take]);
            }
            None => break,
        }
    }
    Ok(buf)
}
