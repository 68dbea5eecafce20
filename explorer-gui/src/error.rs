use std::{error, fmt};

use druid::Data;

#[derive(Clone, Debug, Data)]
pub enum Error {
    ConfigError(String),
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConfigError(err) => f.write_str(err),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::ConfigError(err.to_string())
    }
}
