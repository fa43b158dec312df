use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

// Tauri requires Serialize for command return errors
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Rejections from the poller's control operations.
///
/// These are reported to callers as plain messages, never as command failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControlError {
    #[error("Already polling. Stop current poll first.")]
    AlreadyPolling,
    #[error("Duration must be greater than 0")]
    InvalidInterval,
    #[error("Duration is too large")]
    IntervalTooLarge,
    #[error("Not currently polling")]
    NotPolling,
    #[error("No async runtime available to run the poll worker")]
    NoRuntime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PollerConfig;
    use crate::poller::Poller;

    #[test]
    fn control_errors_render_host_messages() {
        assert_eq!(
            ControlError::AlreadyPolling.to_string(),
            "Already polling. Stop current poll first."
        );
        assert_eq!(
            ControlError::InvalidInterval.to_string(),
            "Duration must be greater than 0"
        );
        assert_eq!(
            ControlError::IntervalTooLarge.to_string(),
            "Duration is too large"
        );
        assert_eq!(ControlError::NotPolling.to_string(), "Not currently polling");
    }

    #[test]
    fn client_setup_failure_serializes_as_message() {
        let config = PollerConfig {
            user_agent: "bad\nagent".into(),
            ..PollerConfig::default()
        };
        let err = Poller::new(config).err().unwrap();
        assert!(matches!(err, AppError::Http(_)));

        let json = serde_json::to_value(&err).unwrap();
        let message = json.as_str().unwrap();
        assert!(message.starts_with("HTTP client error: "), "{message}");
    }
}
