//! Client-side command layer for the Deluge daemon RPC surface.
//!
//! [`Client`] turns typed operations into daemon method calls over a
//! caller-supplied [`Transport`] and shapes the untyped replies back into
//! typed results. Every call ends in exactly one of:
//!
//! - a fully decoded value,
//! - a transport failure or cancellation ([`ErrorKind::Transport`]),
//! - the daemon's own error, returned verbatim ([`ErrorKind::Daemon`]),
//! - a shape error when the payload does not match ([`ErrorKind::Shape`]).
//!
//! Bulk calls such as [`Client::remove_torrents`] succeed with a list of
//! per-target [`TorrentError`]s instead of failing as a whole.

#![allow(clippy::result_large_err)]

mod account;
mod client;
mod config;
pub mod diagnostics;
pub mod envelope;
mod error;
mod options;
pub mod protocol;
mod transport;
pub mod value;

pub use account::{Account, AuthLevel};
pub use client::Client;
pub use config::{ClientConfig, Settings};
pub use diagnostics::{DiagnosticSink, LogSink};
pub use envelope::{DaemonError, Reply, Response};
pub use error::{
    code as error_code, ErrorKind, RpcError, TorrentError, TransportError, TransportErrorKind,
};
pub use options::{Options, V2Options};
pub use protocol::ProtocolVersion;
pub use transport::{Args, Kwargs, Transport};

pub use rmpv::Value;
pub use tokio_util::sync::CancellationToken;
