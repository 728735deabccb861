use tokio_util::sync::CancellationToken;

use super::Client;
use crate::error::RpcError;
use crate::transport::Args;

impl Client {
    pub async fn get_enabled_plugins(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<String>, RpcError> {
        self.call_strings("core.get_enabled_plugins", cancel).await
    }

    pub async fn get_available_plugins(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<String>, RpcError> {
        self.call_strings("core.get_available_plugins", cancel).await
    }

    // Newer daemons answer with a boolean that legacy ones do not send; it is
    // not read so both generations behave the same.
    pub async fn enable_plugin(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<(), RpcError> {
        self.call_unit("core.enable_plugin", Args::new().text(name), cancel).await
    }

    pub async fn disable_plugin(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<(), RpcError> {
        self.call_unit("core.disable_plugin", Args::new().text(name), cancel).await
    }
}
