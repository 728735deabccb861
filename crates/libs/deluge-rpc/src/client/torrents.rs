use rmpv::Value;
use tokio_util::sync::CancellationToken;

use super::Client;
use crate::error::{RpcError, TorrentError};
use crate::options::{options_dictionary, Options};
use crate::protocol::{state_change_method, StateChange};
use crate::transport::{Args, Kwargs};
use crate::value::{as_list, scan_single, FromValue};

const REMOVE_TORRENTS: &str = "core.remove_torrents";

impl Client {
    /// Adds a torrent from a magnet URI and returns its hash.
    ///
    /// An empty hash means the daemon already had the torrent.
    pub async fn add_torrent_magnet(
        &self,
        magnet_uri: &str,
        options: Option<&Options>,
        cancel: &CancellationToken,
    ) -> Result<String, RpcError> {
        let args = Args::new().text(magnet_uri).value(self.options_value(options));
        self.add_torrent("core.add_torrent_magnet", args, cancel).await
    }

    /// Adds a torrent the daemon downloads from `url`; see
    /// [`Client::add_torrent_magnet`] for the result.
    pub async fn add_torrent_url(
        &self,
        url: &str,
        options: Option<&Options>,
        cancel: &CancellationToken,
    ) -> Result<String, RpcError> {
        let args = Args::new().text(url).value(self.options_value(options));
        self.add_torrent("core.add_torrent_url", args, cancel).await
    }

    /// Adds a torrent from base64-encoded metainfo.
    pub async fn add_torrent_file(
        &self,
        file_name: &str,
        content_base64: &str,
        options: Option<&Options>,
        cancel: &CancellationToken,
    ) -> Result<String, RpcError> {
        let args =
            Args::new().text(file_name).text(content_base64).value(self.options_value(options));
        self.add_torrent("core.add_torrent_file", args, cancel).await
    }

    async fn add_torrent(
        &self,
        method: &str,
        args: Args,
        cancel: &CancellationToken,
    ) -> Result<String, RpcError> {
        let hash: Option<String> = self.call_scan(method, args, cancel).await?;
        Ok(hash.unwrap_or_default())
    }

    /// Removes several torrents in one call, optionally deleting their data.
    ///
    /// Returns the targets the daemon could not process; an empty list means
    /// none were reported as failed. The failure list mainly flags unknown
    /// torrent ids: an id missing from it does not guarantee that the torrent
    /// has left the session or that its files are gone by the time this
    /// returns, since the daemon may finish removal asynchronously.
    pub async fn remove_torrents<S: AsRef<str>>(
        &self,
        ids: &[S],
        remove_data: bool,
        cancel: &CancellationToken,
    ) -> Result<Vec<TorrentError>, RpcError> {
        let args = Args::new().ids(ids).flag(remove_data);
        let values = self.invoke(REMOVE_TORRENTS, args, Kwargs::new(), cancel).await?;
        decode_failures(REMOVE_TORRENTS, &values)
    }

    /// Removes one torrent; `true` when the daemon removed it.
    pub async fn remove_torrent(
        &self,
        id: &str,
        remove_data: bool,
        cancel: &CancellationToken,
    ) -> Result<bool, RpcError> {
        self.call_scan("core.remove_torrent", Args::new().text(id).flag(remove_data), cancel)
            .await
    }

    pub async fn pause_torrents<S: AsRef<str>>(
        &self,
        ids: &[S],
        cancel: &CancellationToken,
    ) -> Result<(), RpcError> {
        self.change_state(StateChange::Pause, ids, cancel).await
    }

    pub async fn resume_torrents<S: AsRef<str>>(
        &self,
        ids: &[S],
        cancel: &CancellationToken,
    ) -> Result<(), RpcError> {
        self.change_state(StateChange::Resume, ids, cancel).await
    }

    async fn change_state<S: AsRef<str>>(
        &self,
        change: StateChange,
        ids: &[S],
        cancel: &CancellationToken,
    ) -> Result<(), RpcError> {
        let method = state_change_method(self.protocol(), change);
        self.call_unit(method, Args::new().ids(ids), cancel).await
    }

    /// Moves the data of the given torrents to `dest`.
    pub async fn move_storage<S: AsRef<str>>(
        &self,
        ids: &[S],
        dest: &str,
        cancel: &CancellationToken,
    ) -> Result<(), RpcError> {
        self.call_unit("core.move_storage", Args::new().ids(ids).text(dest), cancel).await
    }

    pub async fn set_torrent_options(
        &self,
        id: &str,
        options: &Options,
        cancel: &CancellationToken,
    ) -> Result<(), RpcError> {
        let args = Args::new().text(id).value(options.to_dictionary(self.protocol()));
        self.call_unit("core.set_torrent_options", args, cancel).await
    }

    /// Replaces the tracker list of a torrent with `tracker_url` at tier 0.
    pub async fn set_torrent_tracker(
        &self,
        id: &str,
        tracker_url: &str,
        cancel: &CancellationToken,
    ) -> Result<(), RpcError> {
        let tracker = Value::Map(vec![
            (Value::from("url"), Value::from(tracker_url)),
            (Value::from("tier"), Value::from(0)),
        ]);
        let args = Args::new().text(id).value(Value::Array(vec![tracker]));
        self.call_unit("core.set_torrent_trackers", args, cancel).await
    }

    pub async fn force_reannounce<S: AsRef<str>>(
        &self,
        ids: &[S],
        cancel: &CancellationToken,
    ) -> Result<(), RpcError> {
        self.call_unit("core.force_reannounce", Args::new().ids(ids), cancel).await
    }

    fn options_value(&self, options: Option<&Options>) -> Value {
        options_dictionary(options, self.protocol())
    }
}

/// Decodes the `[(id, message), ..]` failure list of a bulk call.
///
/// A malformed entry stops decoding; the error keeps the entries read so far.
pub(crate) fn decode_failures(
    method: &str,
    values: &[Value],
) -> Result<Vec<TorrentError>, RpcError> {
    let list: Value = scan_single(values)
        .map_err(|err| RpcError::invalid_return_value(method, err.to_string()))?;
    let entries =
        as_list(&list).map_err(|err| RpcError::invalid_return_value(method, err.to_string()))?;

    let mut failures = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match <(String, String)>::from_value(entry) {
            Ok((id, message)) => failures.push(TorrentError { id, message }),
            Err(err) => {
                return Err(RpcError::InvalidBatchEntry {
                    method: method.to_owned(),
                    index,
                    detail: err.to_string(),
                    decoded: failures,
                })
            }
        }
    }
    Ok(failures)
}
