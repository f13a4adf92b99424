//! Error types and handling for geocode-address.

use std::fmt;

use crate::types::Status;

/// Result type alias for geocoding operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for geocoding operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The provider answered with a non-`OK` status
    #[error("Geocoding error: {status}{}", detail(.message))]
    Geocoding {
        /// Status reported by the provider
        status: Status,
        /// Optional human readable explanation sent along with the status
        message: Option<String>,
    },

    /// Network or HTTP level failure while talking to the provider
    #[error("Transport error: {message}")]
    Transport {
        /// Error message of the underlying transport
        message: String,
    },

    /// The provider answered, but the payload cannot be used
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Error message
        message: String,
    },

    /// Missing or malformed configuration
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// A failed lookup, tagged with the operation that issued it
    #[error("Error {operation}: {source}")]
    Lookup {
        /// Operation that failed
        operation: Operation,
        /// Underlying failure
        source: Box<Error>,
    },
}

/// Caller-facing operation of a [`Geocoder`](crate::Geocoder).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// [`Geocoder::validate_address`](crate::Geocoder::validate_address)
    ValidateAddress,
    /// [`Geocoder::find_address_info`](crate::Geocoder::find_address_info)
    FindAddressInfo,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::ValidateAddress => f.write_str("validating address"),
            Operation::FindAddressInfo => f.write_str("finding address info"),
        }
    }
}

impl Error {
    /// Create a new provider status error
    pub fn geocoding(status: Status, message: Option<String>) -> Self {
        Self::Geocoding { status, message }
    }

    /// Create a new transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a new invalid response error
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Tag an error with the operation that failed
    pub fn lookup(operation: Operation, source: Error) -> Self {
        Self::Lookup {
            operation,
            source: Box::new(source),
        }
    }

    /// The operation that failed, if known.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::Lookup { operation, .. } => Some(*operation),
            _ => None,
        }
    }

    /// The innermost error, with any operation context removed.
    pub fn root(&self) -> &Error {
        match self {
            Self::Lookup { source, .. } => source.root(),
            other => other,
        }
    }

    /// The provider status, if this error was caused by one.
    pub fn status(&self) -> Option<&Status> {
        match self.root() {
            Self::Geocoding { status, .. } => Some(status),
            _ => None,
        }
    }
}

fn detail(message: &Option<String>) -> String {
    message
        .as_ref()
        .map(|message| format!(" ({message})"))
        .unwrap_or_default()
}
