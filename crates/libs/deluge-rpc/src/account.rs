use std::fmt;
use std::str::FromStr;

use rmpv::Value;
use serde::{Deserialize, Serialize};

use crate::transport::Args;
use crate::value::{as_dictionary, FromValue, ScanError};

/// Daemon permission level of an account.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuthLevel {
    None,
    ReadOnly,
    #[default]
    Normal,
    Admin,
}

impl AuthLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::ReadOnly => "READONLY",
            Self::Normal => "NORMAL",
            Self::Admin => "ADMIN",
        }
    }

    pub fn level(self) -> i64 {
        match self {
            Self::None => 0,
            Self::ReadOnly => 1,
            Self::Normal => 5,
            Self::Admin => 10,
        }
    }
}

impl fmt::Display for AuthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthLevel {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "NONE" => Ok(Self::None),
            "READONLY" => Ok(Self::ReadOnly),
            "NORMAL" => Ok(Self::Normal),
            "ADMIN" => Ok(Self::Admin),
            other => Err(format!("unknown auth level '{other}'")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    pub username: String,
    pub password: String,
    pub auth_level: AuthLevel,
}

impl Account {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        auth_level: AuthLevel,
    ) -> Self {
        Self { username: username.into(), password: password.into(), auth_level }
    }

    /// Builds an account from a `{username, password, authlevel}` dictionary.
    ///
    /// The dictionary must hold exactly those three keys.
    pub fn from_dictionary(value: &Value) -> Result<Self, ScanError> {
        let entries = as_dictionary(value)?;
        if entries.len() != 3 {
            return Err(ScanError {
                expected: "dictionary with 3 account fields",
                found: format!("{} fields", entries.len()),
            });
        }

        let mut username = None;
        let mut password = None;
        let mut auth_level = None;
        for (key, field) in entries {
            match String::from_value(key)?.as_str() {
                "username" => username = Some(String::from_value(field)?),
                "password" => password = Some(String::from_value(field)?),
                "authlevel" => {
                    let raw = String::from_value(field)?;
                    let level = raw.parse::<AuthLevel>().map_err(|_| ScanError {
                        expected: "auth level name",
                        found: format!("'{raw}'"),
                    })?;
                    auth_level = Some(level);
                }
                other => {
                    return Err(ScanError {
                        expected: "account field",
                        found: format!("key '{other}'"),
                    })
                }
            }
        }

        match (username, password, auth_level) {
            (Some(username), Some(password), Some(auth_level)) => {
                Ok(Self { username, password, auth_level })
            }
            _ => Err(ScanError {
                expected: "username, password and authlevel",
                found: "duplicate account fields".to_owned(),
            }),
        }
    }

    pub(crate) fn to_args(&self) -> Args {
        Args::new()
            .text(&self.username)
            .text(&self.password)
            .text(self.auth_level.as_str())
    }
}
