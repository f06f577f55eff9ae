use serde::{Deserialize, Serialize};
use std::fmt;

// ------------------------------------------------------------------
// Node identifiers
// ------------------------------------------------------------------

/// Identifier of a CFA node (a program location).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct CfaNodeId(pub u32);

/// Identifier of an ARG node (an abstract state).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct ArgNodeId(pub u32);

/// Position of a function in the report's function list.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct FunctionIndex(pub usize);

impl fmt::Display for CfaNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ArgNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ------------------------------------------------------------------
// View selectors
// ------------------------------------------------------------------

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Cfa,
    Arg,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Cfa, Tab::Arg];

    pub fn other(self) -> Tab {
        match self {
            Tab::Cfa => Tab::Arg,
            Tab::Arg => Tab::Cfa,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Tab::Cfa => "CFA",
            Tab::Arg => "ARG",
        }
    }
}

/// Which of the two renderings of an error path is shown.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    #[default]
    Collapsed,
    FullErrorPath,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 2] =
        [DisplayMode::Collapsed, DisplayMode::FullErrorPath];
}

/// One ARG rendering: error path `path` shown in `mode`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct ArgView {
    pub path: usize,
    pub mode: DisplayMode,
}

impl ArgView {
    pub fn new(path: usize, mode: DisplayMode) -> Self {
        Self { path, mode }
    }
}

/// Key of one renderable graph in the report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub enum GraphKey {
    Cfa(FunctionIndex),
    Arg(ArgView),
}

impl GraphKey {
    pub fn tab(&self) -> Tab {
        match self {
            GraphKey::Cfa(_) => Tab::Cfa,
            GraphKey::Arg(_) => Tab::Arg,
        }
    }
}

/// A node in either graph representation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub enum NodeRef {
    Cfa(CfaNodeId),
    Arg(ArgNodeId),
}

impl NodeRef {
    pub fn tab(&self) -> Tab {
        match self {
            NodeRef::Cfa(_) => Tab::Cfa,
            NodeRef::Arg(_) => Tab::Arg,
        }
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRef::Cfa(id) => write!(f, "CFA node {id}"),
            NodeRef::Arg(id) => write!(f, "ARG node {id}"),
        }
    }
}

/// Screen or canvas coordinates, in the units of whichever front end
/// supplied them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, by: Point) -> Point {
        Point::new(self.x + by.x, self.y + by.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_key_order_lists_cfa_before_arg() {
        let mut keys = vec![
            GraphKey::Arg(ArgView::new(0, DisplayMode::FullErrorPath)),
            GraphKey::Arg(ArgView::new(0, DisplayMode::Collapsed)),
            GraphKey::Cfa(FunctionIndex(1)),
            GraphKey::Arg(ArgView::new(1, DisplayMode::Collapsed)),
        ];
        keys.sort();
        assert_eq!(keys[0], GraphKey::Cfa(FunctionIndex(1)));
        assert_eq!(
            keys[1],
            GraphKey::Arg(ArgView::new(0, DisplayMode::Collapsed))
        );
        assert_eq!(
            keys[2],
            GraphKey::Arg(ArgView::new(0, DisplayMode::FullErrorPath))
        );
    }

    #[test]
    fn test_tab_serializes_lowercase() {
        let json = serde_json::to_string(&Tab::Arg).unwrap();
        assert_eq!(json, "\"arg\"");
        let mode: DisplayMode =
            serde_json::from_str("\"full_error_path\"").unwrap();
        assert_eq!(mode, DisplayMode::FullErrorPath);
    }
}
