//! Daemon reply envelope: either a success payload or a daemon-side error.

use std::fmt;

use rmpv::Value;

use crate::value::{as_list, FromValue, ScanError};

pub const RPC_RESPONSE: i64 = 1;
pub const RPC_ERROR: i64 = 2;
pub const RPC_EVENT: i64 = 3;

/// Error value reported by the daemon for a call it understood but failed.
#[derive(Clone, Debug, PartialEq)]
pub struct DaemonError {
    /// Python exception class name, e.g. `InvalidTorrentError`.
    pub exception_type: String,
    pub message: String,
    /// Raw exception arguments as sent by the daemon.
    pub args: Vec<Value>,
    pub traceback: String,
}

impl DaemonError {
    pub fn new(exception_type: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            exception_type: exception_type.into(),
            args: vec![Value::from(message.as_str())],
            message,
            traceback: String::new(),
        }
    }

    pub fn with_traceback(mut self, traceback: impl Into<String>) -> Self {
        self.traceback = traceback.into();
        self
    }

    // Legacy daemons send a single message string, newer ones an argument
    // list followed by a keyword dictionary.
    fn from_fields(fields: &[Value]) -> Result<Self, ScanError> {
        let [exception_type, detail, rest @ ..] = fields else {
            return Err(ScanError::arity(3, fields.len()));
        };
        let exception_type = String::from_value(exception_type)?;
        let (args, message) = match detail {
            Value::Array(items) => {
                let parts = items
                    .iter()
                    .map(|item| String::from_value(item).unwrap_or_else(|_| item.to_string()))
                    .collect::<Vec<_>>();
                (items.clone(), parts.join(", "))
            }
            other => {
                let message = String::from_value(other)?;
                (vec![other.clone()], message)
            }
        };
        let traceback = match rest.last() {
            Some(Value::Nil | Value::Map(_)) | None => String::new(),
            Some(value) => String::from_value(value)?,
        };
        Ok(Self { exception_type, message, args, traceback })
    }
}

impl fmt::Display for DaemonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.exception_type, self.message)
    }
}

impl std::error::Error for DaemonError {}

/// Outcome of one daemon call as seen by the command layer.
#[derive(Clone, Debug, PartialEq)]
pub enum Response {
    /// Positional return values of a successful call.
    Ok(Vec<Value>),
    Err(DaemonError),
}

impl Response {
    pub fn success(values: Vec<Value>) -> Self {
        Self::Ok(values)
    }

    /// Success carrying a single return value.
    pub fn value(value: Value) -> Self {
        Self::Ok(vec![value])
    }

    pub fn error(err: DaemonError) -> Self {
        Self::Err(err)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Err(_))
    }

    /// Decoded return values; empty for an error response.
    pub fn values(&self) -> &[Value] {
        match self {
            Self::Ok(values) => values,
            Self::Err(_) => &[],
        }
    }

    pub fn into_result(self) -> Result<Vec<Value>, DaemonError> {
        match self {
            Self::Ok(values) => Ok(values),
            Self::Err(err) => Err(err),
        }
    }
}

/// A decoded daemon reply addressed to one request.
#[derive(Clone, Debug, PartialEq)]
pub struct Reply {
    pub request_id: i64,
    pub response: Response,
}

impl Reply {
    /// Interprets a raw reply tuple.
    ///
    /// `[1, request_id, value..]` is a success; `[2, request_id,
    /// exception_type, args, kwargs?, traceback]` is a daemon error. Event
    /// messages are not replies and fail with a shape error.
    pub fn from_message(message: &Value) -> Result<Self, ScanError> {
        let items = as_list(message)?;
        let [kind, request_id, rest @ ..] = items else {
            return Err(ScanError::arity(2, items.len()));
        };
        let kind = i64::from_value(kind)?;
        let request_id = i64::from_value(request_id)?;
        let response = match kind {
            RPC_RESPONSE => Response::Ok(rest.to_vec()),
            RPC_ERROR => Response::Err(DaemonError::from_fields(rest)?),
            _ => {
                return Err(ScanError {
                    expected: "response or error message",
                    found: format!("message type {kind}"),
                })
            }
        };
        Ok(Self { request_id, response })
    }
}
