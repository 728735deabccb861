//! Reporting of payloads that break a method's documented return type.

use rmpv::Value;

/// Receives daemon anomalies the client refuses to coerce.
pub trait DiagnosticSink: Send + Sync {
    fn unexpected_value(&self, method: &str, raw: &Value);
}

/// Forwards anomalies to the `log` facade at warn level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn unexpected_value(&self, method: &str, raw: &Value) {
        log::warn!("{method} returned unexpected value {raw}");
    }
}
