pub mod config;
pub mod error;
pub mod observer;
pub mod poller;

#[cfg(feature = "desktop")]
mod commands;
#[cfg(feature = "desktop")]
mod state;

pub use config::PollerConfig;
pub use observer::PollObserver;
pub use poller::{PollResult, Poller, PollerState, SessionInfo};

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use tauri::Manager;
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tauri::Builder::default()
        .setup(|app| {
            let poller =
                Poller::new(PollerConfig::default())?.with_observer(app.handle().clone());
            app.manage(state::AppState::new(poller));
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::poller::start_polling,
            commands::poller::stop_polling,
            commands::poller::get_results,
            commands::poller::get_state,
            commands::poller::get_session,
        ])
        .run(tauri::generate_context!())
        .expect("error while running URL Poller");
}
