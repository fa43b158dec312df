use crate::poller::Poller;

/// Shared application state managed by Tauri
pub struct AppState {
    pub poller: Poller,
}

impl AppState {
    pub fn new(poller: Poller) -> Self {
        Self { poller }
    }
}
