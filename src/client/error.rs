//! Error types for graph store clients

use crate::graph::GraphError;
use thiserror::Error;

/// Errors that can occur talking to a graph store
#[derive(Error, Debug)]
pub enum ClientError {
    /// Store unreachable, or credentials rejected
    #[error("Connection error: {0}")]
    Connection(String),

    /// The store rejected or failed a statement
    #[error("Query error: {0}")]
    Query(String),

    /// A result column could not be read as the expected type
    #[error("Decode error: {0}")]
    Decode(String),

    /// Embedded store failure
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),
}

pub type ClientResult<T> = Result<T, ClientError>;
