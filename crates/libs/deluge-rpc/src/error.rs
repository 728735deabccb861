use std::fmt;

use thiserror::Error;

use crate::envelope::DaemonError;
use crate::protocol::ProtocolVersion;

pub mod code {
    pub const TRANSPORT: &str = "DELUGE_TRANSPORT_FAILURE";
    pub const CANCELLED: &str = "DELUGE_TRANSPORT_CANCELLED";
    pub const TIMEOUT: &str = "DELUGE_TRANSPORT_TIMEOUT";
    pub const DAEMON: &str = "DELUGE_DAEMON_ERROR";
    pub const INVALID_RETURN_VALUE: &str = "DELUGE_SHAPE_INVALID_RETURN_VALUE";
    pub const INVALID_DICTIONARY_RESPONSE: &str = "DELUGE_SHAPE_INVALID_DICTIONARY_RESPONSE";
    pub const INVALID_BATCH_ENTRY: &str = "DELUGE_SHAPE_INVALID_BATCH_ENTRY";
    pub const UNSUPPORTED: &str = "DELUGE_REQUEST_UNSUPPORTED";
}

/// Failure channel an [`RpcError`] belongs to.
///
/// The channels never overlap: a daemon refusal is never reported as a
/// shape error and vice versa.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Connectivity, authentication, cancellation or deadline expiry.
    Transport,
    /// The daemon understood the call and failed it.
    Daemon,
    /// The success payload did not have the expected arity or type.
    Shape,
    /// The request could not be issued against this client.
    Request,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransportErrorKind {
    Io,
    Auth,
    Closed,
    Other,
}

/// Opaque failure reported by a [`crate::Transport`] implementation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind:?}: {message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Io, message)
    }

    pub fn closed(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Closed, message)
    }
}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

/// One failed target of a batch call.
///
/// Only produced while decoding the failure list of a bulk operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TorrentError {
    /// Hash of the torrent that could not be processed.
    pub id: String,
    pub message: String,
}

impl fmt::Display for TorrentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>: '{}'", self.id, self.message)
    }
}

impl std::error::Error for TorrentError {}

#[derive(Clone, Debug, PartialEq, Error)]
#[non_exhaustive]
pub enum RpcError {
    #[error("transport failure calling {method}: {source}")]
    Transport {
        method: String,
        #[source]
        source: TransportError,
    },

    #[error("call to {method} was cancelled")]
    Cancelled { method: String },

    #[error("call to {method} timed out after {timeout_ms}ms")]
    Timeout { method: String, timeout_ms: u64 },

    #[error(transparent)]
    Daemon(DaemonError),

    #[error("invalid return value from {method}: {detail}")]
    InvalidReturnValue { method: String, detail: String },

    #[error("invalid dictionary response from {method}: {detail}")]
    InvalidDictionaryResponse { method: String, detail: String },

    /// A bulk failure list contained an entry that is not an `(id, message)`
    /// pair. `decoded` holds the entries read before it, in daemon order.
    #[error("invalid failure entry {index} from {method}: {detail}")]
    InvalidBatchEntry {
        method: String,
        index: usize,
        detail: String,
        decoded: Vec<TorrentError>,
    },

    #[error("{method} is not available on protocol {protocol}")]
    Unsupported { method: String, protocol: ProtocolVersion },
}

impl RpcError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport { .. } | Self::Cancelled { .. } | Self::Timeout { .. } => {
                ErrorKind::Transport
            }
            Self::Daemon(_) => ErrorKind::Daemon,
            Self::InvalidReturnValue { .. }
            | Self::InvalidDictionaryResponse { .. }
            | Self::InvalidBatchEntry { .. } => ErrorKind::Shape,
            Self::Unsupported { .. } => ErrorKind::Request,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Transport { .. } => code::TRANSPORT,
            Self::Cancelled { .. } => code::CANCELLED,
            Self::Timeout { .. } => code::TIMEOUT,
            Self::Daemon(_) => code::DAEMON,
            Self::InvalidReturnValue { .. } => code::INVALID_RETURN_VALUE,
            Self::InvalidDictionaryResponse { .. } => code::INVALID_DICTIONARY_RESPONSE,
            Self::InvalidBatchEntry { .. } => code::INVALID_BATCH_ENTRY,
            Self::Unsupported { .. } => code::UNSUPPORTED,
        }
    }

    pub fn is_shape_error(&self) -> bool {
        self.kind() == ErrorKind::Shape
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }

    /// The daemon's own error value, when the daemon refused the call.
    pub fn daemon_error(&self) -> Option<&DaemonError> {
        match self {
            Self::Daemon(err) => Some(err),
            _ => None,
        }
    }

    pub fn invalid_return_value(method: &str, detail: impl Into<String>) -> Self {
        Self::InvalidReturnValue { method: method.to_owned(), detail: detail.into() }
    }

    pub fn invalid_dictionary(method: &str, detail: impl Into<String>) -> Self {
        Self::InvalidDictionaryResponse { method: method.to_owned(), detail: detail.into() }
    }
}
