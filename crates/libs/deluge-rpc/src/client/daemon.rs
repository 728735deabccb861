use rmpv::Value;
use tokio_util::sync::CancellationToken;

use super::Client;
use crate::error::RpcError;
use crate::transport::{Args, Kwargs};
use crate::value::FromValue;

const TEST_LISTEN_PORT: &str = "core.test_listen_port";

impl Client {
    /// Free space in bytes at `path`; an empty path asks for the default
    /// download location.
    pub async fn get_free_space(
        &self,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<i64, RpcError> {
        self.call_scan("core.get_free_space", Args::new().text(path), cancel).await
    }

    pub async fn get_libtorrent_version(
        &self,
        cancel: &CancellationToken,
    ) -> Result<String, RpcError> {
        self.call_scan("core.get_libtorrent_version", Args::new(), cancel).await
    }

    /// Version string of the daemon itself.
    pub async fn daemon_info(&self, cancel: &CancellationToken) -> Result<String, RpcError> {
        self.call_scan("daemon.info", Args::new(), cancel).await
    }

    /// Names of every method the daemon exposes.
    pub async fn method_list(&self, cancel: &CancellationToken) -> Result<Vec<String>, RpcError> {
        self.call_strings("daemon.get_method_list", cancel).await
    }

    /// Ids of all torrents in the session.
    pub async fn session_state(&self, cancel: &CancellationToken) -> Result<Vec<String>, RpcError> {
        self.call_strings("core.get_session_state", cancel).await
    }

    pub async fn get_listen_port(&self, cancel: &CancellationToken) -> Result<u16, RpcError> {
        const METHOD: &str = "core.get_listen_port";
        let port: i32 = self.call_scan(METHOD, Args::new(), cancel).await?;
        u16::try_from(port).map_err(|_| {
            RpcError::invalid_return_value(METHOD, format!("port {port} is outside 0..=65535"))
        })
    }

    /// Asks the daemon whether its listen port is reachable from outside.
    ///
    /// Some daemon releases answer with nil or a list instead of a boolean.
    /// Such payloads are reported to the configured diagnostic sink and
    /// returned as [`RpcError::InvalidReturnValue`], never read as `false`.
    pub async fn test_listen_port(&self, cancel: &CancellationToken) -> Result<bool, RpcError> {
        let values = self.invoke(TEST_LISTEN_PORT, Args::new(), Kwargs::new(), cancel).await?;
        let [first] = values.as_slice() else {
            return Err(RpcError::invalid_return_value(
                TEST_LISTEN_PORT,
                format!("expected exactly 1 value, found {}", values.len()),
            ));
        };
        bool::from_value(first).map_err(|err| {
            self.report_anomaly(TEST_LISTEN_PORT, first);
            RpcError::invalid_return_value(TEST_LISTEN_PORT, err.to_string())
        })
    }

    fn report_anomaly(&self, method: &str, raw: &Value) {
        if let Some(sink) = &self.settings.diagnostics {
            sink.unexpected_value(method, raw);
        }
    }
}
