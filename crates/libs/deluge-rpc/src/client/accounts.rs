use rmpv::Value;
use tokio_util::sync::CancellationToken;

use super::Client;
use crate::account::Account;
use crate::error::RpcError;
use crate::transport::Args;
use crate::value::describe;

const KNOWN_ACCOUNTS: &str = "core.get_known_accounts";

// Account management only exists on newer daemons; every method here fails
// with `RpcError::Unsupported` on a legacy client before anything is sent.
impl Client {
    /// All accounts known to the daemon, passwords and levels included.
    pub async fn known_accounts(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<Account>, RpcError> {
        self.require_accounts(KNOWN_ACCOUNTS)?;
        let users: Vec<Value> = self.call_scan(KNOWN_ACCOUNTS, Args::new(), cancel).await?;
        users
            .iter()
            .map(|user| {
                if !matches!(user, Value::Map(_)) {
                    return Err(RpcError::invalid_dictionary(
                        KNOWN_ACCOUNTS,
                        format!("expected dictionary, found {}", describe(user)),
                    ));
                }
                Account::from_dictionary(user)
                    .map_err(|err| RpcError::invalid_dictionary(KNOWN_ACCOUNTS, err.to_string()))
            })
            .collect()
    }

    /// Creates an account; requires an admin session.
    pub async fn create_account(
        &self,
        account: &Account,
        cancel: &CancellationToken,
    ) -> Result<bool, RpcError> {
        const METHOD: &str = "core.create_account";
        self.require_accounts(METHOD)?;
        self.call_scan(METHOD, account.to_args(), cancel).await
    }

    /// Sets a new password and level for an existing account.
    pub async fn update_account(
        &self,
        account: &Account,
        cancel: &CancellationToken,
    ) -> Result<bool, RpcError> {
        const METHOD: &str = "core.update_account";
        self.require_accounts(METHOD)?;
        self.call_scan(METHOD, account.to_args(), cancel).await
    }

    pub async fn remove_account(
        &self,
        username: &str,
        cancel: &CancellationToken,
    ) -> Result<bool, RpcError> {
        const METHOD: &str = "core.remove_account";
        self.require_accounts(METHOD)?;
        self.call_scan(METHOD, Args::new().text(username), cancel).await
    }
}
