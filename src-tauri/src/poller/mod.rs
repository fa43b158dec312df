//! Poll controller: lifecycle state, the result log, and the worker handoff.
//!
//! A [`Poller`] runs at most one session at a time. Starting a session clears
//! the log and spawns a [`worker::Worker`] on the current Tokio runtime;
//! stopping raises the session's cancellation token and returns without
//! waiting for the worker. A poll already in flight at that point still lands
//! in the log, but only while no newer session has replaced it.

pub mod result;
pub mod worker;

#[cfg(test)]
mod test_server;

pub use result::PollResult;

use crate::config::PollerConfig;
use crate::error::{AppError, ControlError};
use crate::observer::PollObserver;
use reqwest::Client;
use serde::{Serialize, Serializer};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;
use worker::Worker;

/// Lifecycle state; serialized as `0` (idle) or `1` (polling).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollerState {
    #[default]
    Idle,
    Polling,
}

impl Serialize for PollerState {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(*self as u8)
    }
}

/// Describes the running session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub id: String,
    pub url: String,
    pub interval_seconds: u64,
    pub started_at: String,
}

struct ActiveSession {
    info: SessionInfo,
    cancel: CancellationToken,
}

/// Everything guarded by the controller's single lock.
#[derive(Default)]
pub(crate) struct Shared {
    state: PollerState,
    results: Vec<PollResult>,
    /// Session whose start created `results`; outlives a stop.
    log_owner: Option<String>,
    active: Option<ActiveSession>,
}

// The guarded data is plain values that are never left half-updated.
pub(crate) fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Owns the polling lifecycle for one target at a time.
pub struct Poller {
    shared: Arc<Mutex<Shared>>,
    client: Client,
    config: PollerConfig,
    observer: Option<Arc<dyn PollObserver>>,
}

impl Poller {
    pub fn new(config: PollerConfig) -> Result<Self, AppError> {
        let client = config.build_client()?;
        Ok(Self {
            shared: Arc::new(Mutex::new(Shared::default())),
            client,
            config,
            observer: None,
        })
    }

    /// Register the listener that receives every appended result.
    pub fn with_observer(mut self, observer: impl PollObserver) -> Self {
        self.observer = Some(Arc::new(observer));
        self
    }

    /// Start a session polling `url` every `interval_secs` seconds.
    ///
    /// Must be called from within a Tokio runtime; the worker is spawned onto it.
    pub fn try_start(&self, url: &str, interval_secs: i64) -> Result<SessionInfo, ControlError> {
        let mut shared = lock(&self.shared);

        if shared.state == PollerState::Polling {
            return Err(ControlError::AlreadyPolling);
        }
        let interval_secs = u64::try_from(interval_secs)
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or(ControlError::InvalidInterval)?;
        let interval = Duration::from_secs(interval_secs);
        // The worker schedules its first tick one interval out and the next one
        // a further interval later; both deadlines must fit in an Instant.
        interval
            .checked_mul(2)
            .and_then(|span| Instant::now().checked_add(span))
            .ok_or(ControlError::IntervalTooLarge)?;
        let runtime =
            tokio::runtime::Handle::try_current().map_err(|_| ControlError::NoRuntime)?;

        let info = SessionInfo {
            id: Uuid::new_v4().to_string(),
            url: url.to_string(),
            interval_seconds: interval_secs,
            started_at: result::timestamp_now(),
        };
        let cancel = CancellationToken::new();

        shared.state = PollerState::Polling;
        shared.results = Vec::new();
        shared.log_owner = Some(info.id.clone());
        shared.active = Some(ActiveSession {
            info: info.clone(),
            cancel: cancel.clone(),
        });

        let worker = Worker {
            session_id: info.id.clone(),
            url: info.url.clone(),
            interval,
            preview_limit: self.config.preview_limit,
            client: self.client.clone(),
            shared: Arc::clone(&self.shared),
            observer: self.observer.clone(),
            cancel,
        };
        runtime.spawn(worker.run());

        tracing::info!("Started polling {} every {}s (session {})", info.url, interval_secs, info.id);
        Ok(info)
    }

    /// Host-facing form of [`Poller::try_start`]: always answers with a message.
    pub fn start_polling(&self, url: &str, interval_secs: i64) -> String {
        match self.try_start(url, interval_secs) {
            Ok(info) => format!(
                "Started polling {} every {} seconds",
                info.url, info.interval_seconds
            ),
            Err(e) => e.to_string(),
        }
    }

    /// Cancel the running session. Does not wait for the worker to exit.
    pub fn try_stop(&self) -> Result<SessionInfo, ControlError> {
        let mut shared = lock(&self.shared);

        if shared.state == PollerState::Idle {
            return Err(ControlError::NotPolling);
        }
        let session = shared.active.take().ok_or(ControlError::NotPolling)?;
        session.cancel.cancel();
        shared.state = PollerState::Idle;

        tracing::info!("Stopped polling {} (session {})", session.info.url, session.info.id);
        Ok(session.info)
    }

    /// Host-facing form of [`Poller::try_stop`].
    pub fn stop_polling(&self) -> String {
        match self.try_stop() {
            Ok(_) => "Polling stopped".to_string(),
            Err(e) => e.to_string(),
        }
    }

    /// Snapshot of the log, oldest first.
    pub fn results(&self) -> Vec<PollResult> {
        lock(&self.shared).results.clone()
    }

    pub fn state(&self) -> PollerState {
        lock(&self.shared).state
    }

    pub fn session(&self) -> Option<SessionInfo> {
        lock(&self.shared).active.as_ref().map(|s| s.info.clone())
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        if let Some(session) = lock(&self.shared).active.take() {
            session.cancel.cancel();
        }
    }
}
