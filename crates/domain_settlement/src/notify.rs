//! Operator notification sink
//!
//! Engine operations report their outcome here, fire-and-forget. The
//! default sink writes to the tracing log; the API layer echoes the same
//! message back in its response body.

use serde::{Deserialize, Serialize};

/// How loud the notification should be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// Fire-and-forget outcome reporting
///
/// Implementations must not fail; the engines never consult a result.
pub trait Notifier {
    fn notify(&self, severity: Severity, title: &str, message: &str);
}

/// Sink that writes notifications to the tracing log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, severity: Severity, title: &str, message: &str) {
        match severity {
            Severity::Info => tracing::info!(title, "{}", message),
            Severity::Success => tracing::info!(title, "{}", message),
            Severity::Error => tracing::warn!(title, "{}", message),
        }
    }
}

/// Sink that drops everything, for callers that report another way
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _severity: Severity, _title: &str, _message: &str) {}
}
