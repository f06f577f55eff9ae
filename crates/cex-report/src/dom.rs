//! Element identifiers of the rendered report page.
//!
//! Identifier strings are built and parsed only here; everything else
//! works with the typed keys from [`crate::ids`].

use crate::ids::{
    ArgNodeId, ArgView, CfaNodeId, DisplayMode, NodeRef, Tab,
};

pub const INFO_BOX: &str = "infoBox";
pub const ARG_TOOLBAR: &str = "arg-toolbar";
pub const CFA_TOOLBAR: &str = "cfa-toolbar";
pub const REPORT_DATA: &str = "report-data";
pub const HIGHLIGHT_CLASS: &str = "highlighted";

const TAB_SELECTOR_PREFIX: &str = "set-tab-";
const CFA_NODE_PREFIX: &str = "cfa-node";
const ARG_NODE_PREFIX: &str = "arg-node";
const ARG_ERROR_NODE_PREFIX: &str = "arg-error-node";
/// Infix the report generator places in front of full error-path graphs
const ERROR_GRAPH_PREFIX: &str = "svg";

pub fn tab_selector_id(tab: Tab) -> String {
    let n = match tab {
        Tab::Cfa => 1,
        Tab::Arg => 2,
    };
    format!("{TAB_SELECTOR_PREFIX}{n}")
}

pub fn tab_from_selector_id(id: &str) -> Option<Tab> {
    match id.strip_prefix(TAB_SELECTOR_PREFIX)? {
        "1" => Some(Tab::Cfa),
        "2" => Some(Tab::Arg),
        _ => None,
    }
}

pub fn panel_id(tab: Tab) -> &'static str {
    match tab {
        Tab::Cfa => "cfa-container",
        Tab::Arg => "arg-container",
    }
}

pub fn cfa_panel_id(function_name: &str, index: usize) -> String {
    format!("cfa-svg-{function_name}{index}")
}

pub fn arg_graph_id(view: ArgView) -> String {
    match view.mode {
        DisplayMode::Collapsed => format!("arg-graph{}", view.path),
        DisplayMode::FullErrorPath => {
            format!("arg-{ERROR_GRAPH_PREFIX}arg-error-graph{}", view.path)
        }
    }
}

/// Element id of `node` inside a graph rendered in `mode`. CFA nodes
/// ignore the mode.
pub fn node_element_id(node: NodeRef, mode: DisplayMode) -> String {
    match (node, mode) {
        (NodeRef::Cfa(id), _) => format!("{CFA_NODE_PREFIX}{id}"),
        (NodeRef::Arg(id), DisplayMode::Collapsed) => {
            format!("{ARG_NODE_PREFIX}{id}")
        }
        (NodeRef::Arg(id), DisplayMode::FullErrorPath) => {
            format!("{ARG_ERROR_NODE_PREFIX}{id}")
        }
    }
}

/// Inverse of [`node_element_id`].
pub fn parse_node_element_id(id: &str) -> Option<(NodeRef, DisplayMode)> {
    if let Some(rest) = id.strip_prefix(CFA_NODE_PREFIX) {
        let n = rest.parse().ok()?;
        return Some((NodeRef::Cfa(CfaNodeId(n)), DisplayMode::Collapsed));
    }
    if let Some(rest) = id.strip_prefix(ARG_ERROR_NODE_PREFIX) {
        let n = rest.parse().ok()?;
        return Some((
            NodeRef::Arg(ArgNodeId(n)),
            DisplayMode::FullErrorPath,
        ));
    }
    if let Some(rest) = id.strip_prefix(ARG_NODE_PREFIX) {
        let n = rest.parse().ok()?;
        return Some((NodeRef::Arg(ArgNodeId(n)), DisplayMode::Collapsed));
    }
    None
}
