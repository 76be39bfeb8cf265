#![forbid(unsafe_code)]

//! Configuration errors.

use std::fmt;

/// Why a [`PageConfig`](crate::PageConfig) was rejected.
#[derive(Debug)]
pub enum ConfigError {
    /// The JSON document could not be decoded.
    Parse(serde_json::Error),
    /// A markup selector was blank.
    EmptySelector(&'static str),
    /// A presentation class name was blank.
    EmptyClassName(&'static str),
    /// A numeric setting was negative or not finite.
    InvalidNumber { field: &'static str, value: f64 },
    /// The confirmation message shown after form submission was blank.
    EmptyMessage,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid page config JSON: {err}"),
            Self::EmptySelector(field) => write!(f, "selector `{field}` is empty"),
            Self::EmptyClassName(field) => write!(f, "class name `{field}` is empty"),
            Self::InvalidNumber { field, value } => {
                write!(f, "`{field}` must be finite and non-negative, got {value}")
            }
            Self::EmptyMessage => write!(f, "confirmation message is empty"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// A recorded trace line could not be decoded.
#[derive(Debug)]
pub struct TraceError {
    /// 1-based line number within the trace.
    pub line: usize,
    pub source: serde_json::Error,
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trace line {}: {}", self.line, self.source)
    }
}

impl std::error::Error for TraceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}
