use std::sync::Arc;

use rmpv::Value;
use tokio_util::sync::CancellationToken;

use crate::config::Settings;
use crate::error::RpcError;
use crate::protocol::ProtocolVersion;
use crate::transport::{Args, Kwargs, Transport};
use crate::value::{scan_single, FromValue};

mod accounts;
mod daemon;
mod plugins;
mod torrents;


/// Typed command layer over a daemon [`Transport`].
///
/// The client holds no per-call state; it can be shared between tasks and
/// called concurrently. The protocol version is fixed for its lifetime.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    settings: Settings,
}

impl Client {
    pub fn new(transport: Arc<dyn Transport>, settings: Settings) -> Self {
        Self { transport, settings }
    }

    pub fn protocol(&self) -> ProtocolVersion {
        self.settings.protocol
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Calls `method` and returns its positional return values.
    ///
    /// A transport failure is returned unchanged, a daemon error verbatim.
    /// Firing `cancel` before the reply arrives yields
    /// [`RpcError::Cancelled`]; a token that is already cancelled never
    /// reaches the transport.
    pub async fn invoke(
        &self,
        method: &str,
        args: Args,
        kwargs: Kwargs,
        cancel: &CancellationToken,
    ) -> Result<Vec<Value>, RpcError> {
        log::debug!("rpc call {method} ({} args)", args.len());
        let pending = async {
            let call = self.transport.call(method, args, kwargs);
            let outcome = match self.settings.call_timeout {
                Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| {
                    RpcError::Timeout {
                        method: method.to_owned(),
                        timeout_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
                    }
                })?,
                None => call.await,
            };
            outcome.map_err(|source| RpcError::Transport { method: method.to_owned(), source })
        };

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                log::debug!("rpc call {method} cancelled");
                return Err(RpcError::Cancelled { method: method.to_owned() });
            }
            response = pending => response?,
        };

        response.into_result().map_err(|err| {
            log::debug!("rpc call {method} failed on daemon: {err}");
            RpcError::Daemon(err)
        })
    }

    /// Calls a method whose return value carries no information.
    pub(crate) async fn call_unit(
        &self,
        method: &str,
        args: Args,
        cancel: &CancellationToken,
    ) -> Result<(), RpcError> {
        self.invoke(method, args, Kwargs::new(), cancel).await.map(|_| ())
    }

    /// Calls a method returning exactly one value of type `T`.
    pub(crate) async fn call_scan<T: FromValue>(
        &self,
        method: &str,
        args: Args,
        cancel: &CancellationToken,
    ) -> Result<T, RpcError> {
        let values = self.invoke(method, args, Kwargs::new(), cancel).await?;
        scan_single(&values).map_err(|err| RpcError::invalid_return_value(method, err.to_string()))
    }

    pub(crate) async fn call_strings(
        &self,
        method: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<String>, RpcError> {
        self.call_scan(method, Args::new(), cancel).await
    }

    pub(crate) fn require_accounts(&self, method: &str) -> Result<(), RpcError> {
        if self.protocol().supports_accounts() {
            return Ok(());
        }
        Err(RpcError::Unsupported { method: method.to_owned(), protocol: self.protocol() })
    }
}
