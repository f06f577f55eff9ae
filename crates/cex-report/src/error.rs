use crate::ids::{ArgNodeId, CfaNodeId};

/// Failures while reading or validating a report.
#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    #[error("failed to read report: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid report JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no embedded report block with id `{0}` found")]
    MissingEmbeddedReport(&'static str),
    #[error("report contains no functions")]
    NoFunctions,
    #[error("function `{0}` is defined more than once")]
    DuplicateFunction(String),
    #[error("CFA node {0} is defined more than once")]
    DuplicateCfaNode(CfaNodeId),
    #[error("ARG node {node} is defined more than once in {graph}")]
    DuplicateArgNode { graph: String, node: ArgNodeId },
    #[error("edge in {graph} references unknown node {node}")]
    DanglingEdge { graph: String, node: u32 },
    #[error("ARG node {arg} references unknown CFA node {cfa}")]
    UnknownLocation { arg: ArgNodeId, cfa: CfaNodeId },
    #[error(
        "ARG node {arg} is placed at CFA node {first} and at {second}"
    )]
    ConflictingLocation {
        arg: ArgNodeId,
        first: String,
        second: String,
    },
    #[error("CFA node {node} calls unknown function `{callee}`")]
    UnknownCallee { node: CfaNodeId, callee: String },
}

/// A selection outside the set of rendered options.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("error path {index} out of range ({available} available)")]
    ErrorPathOutOfRange { index: usize, available: usize },
    #[error("option {option} out of range ({available} available)")]
    OptionOutOfRange { option: usize, available: usize },
    #[error("function {index} out of range ({available} available)")]
    FunctionOutOfRange { index: usize, available: usize },
}
