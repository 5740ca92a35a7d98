//! Error formatting utilities
//!
//! Renders errors with their nested causes so a single log line carries
//! the whole story (e.g. the hyper connect error under a reqwest error).

use crate::Error;
use std::error::Error as StdError;

/// Format error for display, including nested `source()` causes
pub fn format_error(error: &Error) -> String {
    let formatted = match error {
        Error::Auth {
            reason,
            endpoint: Some(endpoint),
        } => format!("Authentication against {} failed: {}", endpoint, reason),

        Error::Timeout {
            operation,
            duration_secs,
        } => format!(
            "Operation '{}' timed out after {} seconds",
            operation, duration_secs
        ),

        _ => error.to_string(),
    };

    let mut result = formatted;
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_str = cause.to_string();
        // reqwest repeats its inner message in Display; skip duplicates
        if !result.contains(&cause_str) {
            result.push_str(&format!(" (caused by: {})", cause_str));
        }
        source = cause.source();
    }

    result
}

/// Format error for structured logging
pub fn format_error_for_logging(error: &Error) -> serde_json::Value {
    let mut log_data = serde_json::json!({
        "message": format_error(error),
        "category": error.category(),
        "network": error.is_network(),
    });

    match error {
        Error::Http(e) => {
            if let Some(status) = e.status() {
                log_data["status"] = serde_json::Value::Number(status.as_u16().into());
            }
            if let Some(url) = e.url() {
                log_data["url"] = serde_json::Value::String(url.to_string());
            }
        }
        Error::Timeout { duration_secs, .. } => {
            log_data["timeout_duration"] = serde_json::Value::Number((*duration_secs).into());
        }
        Error::Auth {
            endpoint: Some(endpoint),
            ..
        } => {
            log_data["endpoint"] = serde_json::Value::String(endpoint.clone());
        }
        _ => {}
    }

    log_data
}
