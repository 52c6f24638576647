//! Error types for code generation

use asmchart_core::NodeId;
use thiserror::Error;

/// Result type for codegen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing or generating a chart
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to parse a YAML chart description
    #[error("failed to parse chart description: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Failed to parse an XML chart description
    #[error("failed to parse chart XML: {0}")]
    XmlError(#[from] quick_xml::DeError),

    /// The chart does not name a start state
    #[error("chart has no start state")]
    MissingStartState,

    /// A decision node lacks one of its branch targets
    #[error("decision node {id} is missing its {branch} destination")]
    MissingBranchTarget {
        /// Decision node identifier
        id: NodeId,
        /// `"true"` or `"false"`
        branch: &'static str,
    },

    /// A numeric field holds something other than a number
    #[error("invalid {field} '{value}': expected a non-negative integer")]
    InvalidNumber {
        /// Field being read
        field: &'static str,
        /// Raw text
        value: String,
    },

    /// File extension does not map to a chart format
    #[error("unsupported chart format: {path}")]
    UnsupportedFormat {
        /// Offending path
        path: String,
    },

    /// Chart model or configuration error
    #[error(transparent)]
    Chart(#[from] asmchart_core::Error),

    /// A variable collides with a register the generator declares
    #[error("variable '{name}' collides with a generated register")]
    ReservedName {
        /// Colliding identifier
        name: String,
    },

    /// Control reaches an identifier that is not in the chart
    #[error("node {id} does not exist{}", referrer(.referenced_by))]
    UnresolvedNode {
        /// Missing identifier
        id: NodeId,
        /// Node whose reference was followed
        referenced_by: Option<NodeId>,
    },

    /// Decision/condition nodes loop without passing through a state
    #[error("non-terminating control path through nodes {cycle:?}")]
    NonTerminatingPath {
        /// Nodes on the loop, first node repeated at the end
        cycle: Vec<NodeId>,
    },

    /// Decisions nest deeper than the configured limit
    #[error("decision node {id} nests deeper than {limit} levels")]
    NestingTooDeep {
        /// Decision node that crossed the limit
        id: NodeId,
        /// Configured limit
        limit: usize,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn referrer(referenced_by: &Option<NodeId>) -> String {
    match referenced_by {
        Some(from) => format!(" (referenced by node {from})"),
        None => String::new(),
    }
}
