//! Error types for snapshot parsing and validation.
//!
//! Analyses themselves never fail: degenerate inputs (empty graph, missing
//! start node, unreachable target) are reported in-band by the result types.
//! Only turning editor output into a [`Graph`](crate::Graph) can error.

use thiserror::Error;

/// Result type alias for snapshot operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors raised while parsing or strictly validating a graph snapshot.
#[derive(Error, Debug)]
pub enum GraphError {
    /// Snapshot JSON could not be parsed.
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The same node id was declared twice.
    #[error("duplicate node id '{0}'")]
    DuplicateNode(String),

    /// The same edge id was declared twice.
    #[error("duplicate edge id '{0}'")]
    DuplicateEdge(String),

    /// An edge references a node id missing from the node set.
    #[error("edge '{edge}' references unknown node '{node}'")]
    UnknownNode { edge: String, node: String },

    /// An edge weight is NaN or infinite.
    #[error("edge '{edge}' has non-finite weight {weight}")]
    InvalidWeight { edge: String, weight: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GraphError::UnknownNode {
            edge: "A-Z".to_string(),
            node: "Z".to_string(),
        };
        assert_eq!(err.to_string(), "edge 'A-Z' references unknown node 'Z'");
        assert_eq!(
            GraphError::DuplicateNode("A".into()).to_string(),
            "duplicate node id 'A'"
        );
    }

    #[test]
    fn test_json_error_converts() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{nodes:");
        let err: GraphError = parse.unwrap_err().into();
        assert!(matches!(err, GraphError::Json(_)));
    }
}
