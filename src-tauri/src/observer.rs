use crate::poller::PollResult;
use tokio::sync::mpsc;

/// Event name used when results are pushed to the frontend.
pub const POLL_RESULT_EVENT: &str = "pollResult";

/// Receives every result right after it is appended to the log.
///
/// Publishing is fire-and-forget: implementations must return promptly and
/// swallow their own failures so a slow or absent listener never stalls polling.
pub trait PollObserver: Send + Sync + 'static {
    fn publish(&self, result: &PollResult);
}

/// Bounded channel; results are dropped when the receiver lags or is gone.
impl PollObserver for mpsc::Sender<PollResult> {
    fn publish(&self, result: &PollResult) {
        if let Err(e) = self.try_send(result.clone()) {
            tracing::debug!("Dropped poll result notification: {e}");
        }
    }
}

#[cfg(feature = "desktop")]
impl<R: tauri::Runtime> PollObserver for tauri::AppHandle<R> {
    fn publish(&self, result: &PollResult) {
        use tauri::Emitter;

        if let Err(e) = self.emit(POLL_RESULT_EVENT, result) {
            tracing::debug!("Failed to emit {POLL_RESULT_EVENT}: {e}");
        }
    }
}
