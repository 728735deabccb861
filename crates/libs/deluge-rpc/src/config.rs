use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use crate::diagnostics::{DiagnosticSink, LogSink};
use crate::protocol::ProtocolVersion;

/// File form of the client settings.
///
/// ```toml
/// protocol = "v1"
/// call_timeout_ms = 30000
/// log_anomalies = true
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    #[serde(default)]
    pub protocol: ProtocolVersion,
    #[serde(default)]
    pub call_timeout_ms: Option<u64>,
    #[serde(default = "default_log_anomalies")]
    pub log_anomalies: bool,
}

fn default_log_anomalies() -> bool {
    true
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { protocol: ProtocolVersion::default(), call_timeout_ms: None, log_anomalies: true }
    }
}

impl ClientConfig {
    pub fn from_toml(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, std::io::Error> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))
    }

    pub fn into_settings(self) -> Settings {
        let diagnostics: Option<Arc<dyn DiagnosticSink>> =
            if self.log_anomalies { Some(Arc::new(LogSink)) } else { None };
        Settings {
            protocol: self.protocol,
            call_timeout: self.call_timeout_ms.map(Duration::from_millis),
            diagnostics,
        }
    }
}

/// Runtime settings of a [`crate::Client`], fixed at construction.
#[derive(Clone, Default)]
pub struct Settings {
    pub protocol: ProtocolVersion,
    /// Deadline applied to each call; `None` waits for the transport.
    pub call_timeout: Option<Duration>,
    pub diagnostics: Option<Arc<dyn DiagnosticSink>>,
}

impl Settings {
    pub fn new(protocol: ProtocolVersion) -> Self {
        Self { protocol, ..Self::default() }
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = Some(timeout);
        self
    }

    pub fn with_diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = Some(sink);
        self
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("protocol", &self.protocol)
            .field("call_timeout", &self.call_timeout)
            .field("diagnostics", &self.diagnostics.is_some())
            .finish()
    }
}
