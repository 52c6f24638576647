//! Error types for asmchart-core

use thiserror::Error;

use crate::chart::NodeId;

/// Result type alias for asmchart-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in asmchart-core
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file could not be found
    #[error("configuration file not found: {path}")]
    ConfigNotFound {
        /// Path that was searched
        path: String,
    },

    /// Failed to parse YAML configuration
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// Invalid configuration value
    #[error("invalid configuration: {message}")]
    ConfigInvalid {
        /// Description of what's invalid
        message: String,
    },

    /// Two variables share a name
    #[error("duplicate variable '{name}'")]
    DuplicateVariable {
        /// The repeated name
        name: String,
    },

    /// Two nodes share an identifier
    #[error("duplicate node id {id}")]
    DuplicateNode {
        /// The repeated identifier
        id: NodeId,
    },

    /// A variable is not usable as a signal
    #[error("invalid variable '{name}': {message}")]
    InvalidVariable {
        /// Variable name
        name: String,
        /// Description of the problem
        message: String,
    },

    /// Chart name is not a legal module identifier
    #[error("invalid chart name '{name}'")]
    InvalidChartName {
        /// The offending name
        name: String,
    },

    /// Start identifier is not a node of the chart
    #[error("start node {id} does not exist")]
    UnknownStart {
        /// The missing identifier
        id: NodeId,
    },

    /// A node points at an identifier that is not in the chart
    #[error("node {from} references missing node {target}")]
    DanglingReference {
        /// Node holding the reference
        from: NodeId,
        /// Missing target
        target: NodeId,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
