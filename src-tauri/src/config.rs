use std::time::Duration;

/// Per-request timeout applied to every poll, independent of the interval.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum number of body bytes kept in a result's preview.
pub const DEFAULT_PREVIEW_LIMIT: usize = 200;

/// Settings for the poller's HTTP client and result capture.
///
/// Everything lives in memory; hosts override fields with struct update syntax:
///
/// ```rust
/// use std::time::Duration;
/// use url_poller_lib::config::PollerConfig;
///
/// let config = PollerConfig {
///     request_timeout: Duration::from_secs(2),
///     ..PollerConfig::default()
/// };
/// assert_eq!(config.preview_limit, 200);
/// ```
#[derive(Debug, Clone)]
pub struct PollerConfig {
    pub request_timeout: Duration,
    pub preview_limit: usize,
    pub user_agent: String,
    /// Honor `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub system_proxy: bool,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            preview_limit: DEFAULT_PREVIEW_LIMIT,
            user_agent: format!("url-poller/{}", env!("CARGO_PKG_VERSION")),
            system_proxy: true,
        }
    }
}

impl PollerConfig {
    pub(crate) fn build_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.request_timeout)
            .user_agent(self.user_agent.clone());
        if !self.system_proxy {
            builder = builder.no_proxy();
        }
        builder.build()
    }
}
