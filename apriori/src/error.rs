//! Error types for loading, mining and writing itemsets.

use thiserror::Error;

/// Errors that can abort a mining run.
#[derive(Debug, Error)]
pub enum MiningError {
    /// Input could not be read or output could not be written.
    #[error("I/O error while {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// A transaction line could not be parsed.
    #[error("malformed transaction on line {line}: '{token}' {reason}")]
    Parse {
        line: usize,
        token: String,
        reason: &'static str,
    },

    /// The run was configured with invalid parameters.
    #[error("invalid configuration: {message}")]
    Configuration { message: String },

    /// A one-hot matrix could not be interpreted as transactions.
    #[error("invalid transaction matrix: {message}")]
    InvalidMatrix { message: String },
}

impl MiningError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn parse(line: usize, token: impl Into<String>, reason: &'static str) -> Self {
        Self::Parse {
            line,
            token: token.into(),
            reason,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn invalid_matrix(message: impl Into<String>) -> Self {
        Self::InvalidMatrix {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MiningError>;
