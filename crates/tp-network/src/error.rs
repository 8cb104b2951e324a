//! Error types for graph loading and cost derivation.

use thiserror::Error;

use tp_core::EdgeId;

/// Failure to derive the traversal cost of one edge.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CostError {
    #[error("division by zero: efficiency is {efficiency} (length {length})")]
    DivideByZero { length: f64, efficiency: f64 },

    #[error("{what} is not finite ({value})")]
    NonFinite { what: &'static str, value: f64 },
}

pub type CostResult<T> = Result<T, CostError>;

/// A malformed graph.  Loading stops at the first problem found and nothing
/// is built.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("duplicate node key {0:?}")]
    DuplicateNode(String),

    #[error("invalid node identifier {0:?}")]
    InvalidIdentifier(String),

    #[error("{edge}: `{endpoint}` endpoint {key:?} is not a known node")]
    DanglingEndpoint {
        edge:     EdgeId,
        endpoint: &'static str,
        key:      String,
    },

    #[error("{edge}: {field} = {value} is out of range")]
    InvalidAttribute {
        edge:  EdgeId,
        field: &'static str,
        value: f64,
    },

    #[error("{edge}: {source}")]
    Cost {
        edge:   EdgeId,
        #[source]
        source: CostError,
    },

    #[error("graph has too many {0} to index")]
    TooLarge(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Alias for `Result<T, DataError>`.
pub type DataResult<T> = Result<T, DataError>;
