use chrono::{Local, SecondsFormat};
use serde::Serialize;
use std::error::Error;

/// Outcome of a single poll attempt, as shown to the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollResult {
    pub timestamp: String,
    /// 0 when no response was received.
    pub status_code: u16,
    pub success: bool,
    pub error: String,
    pub body_preview: String,
}

impl PollResult {
    /// A request that never produced a response (DNS, connect, TLS, timeout).
    pub fn transport_failure(timestamp: String, error: &(dyn Error + 'static)) -> Self {
        Self {
            timestamp,
            status_code: 0,
            success: false,
            error: describe_error(error),
            body_preview: String::new(),
        }
    }

    /// A response was received; success is decided by the status alone.
    pub fn response(timestamp: String, status_code: u16, body_preview: String) -> Self {
        Self {
            timestamp,
            status_code,
            success: (200..300).contains(&status_code),
            error: String::new(),
            body_preview,
        }
    }
}

/// Local time with offset, e.g. `2026-10-19T14:03:07.412+02:00`.
pub fn timestamp_now() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Millis, false)
}

/// Render an error with its source chain, since reqwest keeps the useful
/// detail (connection refused, dns failure) in the sources.
pub fn describe_error(error: &(dyn Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Turn raw body bytes into a preview of at most `limit` bytes.
///
/// Invalid UTF-8 is replaced lossily, and the cut lands on a char boundary so
/// the preview never exceeds the limit.
pub fn body_preview(bytes: &[u8], limit: usize) -> String {
    let bytes = &bytes[..bytes.len().min(limit)];
    let mut text = String::from_utf8_lossy(bytes).into_owned();
    if text.len() > limit {
        let mut end = limit;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text.truncate(end);
    }
    text
}
