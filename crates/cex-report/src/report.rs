use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::config::ViewerConfig;
use crate::dom;
use crate::error::ReportError;
use crate::ids::{ArgNodeId, ArgView, CfaNodeId, DisplayMode, Point};

// ------------------------------------------------------------------
// Report structures
// ------------------------------------------------------------------

/// One row of the text shown when a node is hovered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoEntry {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge<Id> {
    pub source: Id,
    pub target: Id,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CfaNode {
    pub id: CfaNodeId,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub info: Vec<InfoEntry>,
    /// Set on synthetic function-call nodes: the called function's name
    #[serde(default)]
    pub calls: Option<String>,
    #[serde(default)]
    pub position: Point,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CfaFunction {
    pub name: String,
    pub nodes: Vec<CfaNode>,
    #[serde(default)]
    pub edges: Vec<Edge<CfaNodeId>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArgNode {
    pub id: ArgNodeId,
    /// Program location of this state; absent on synthetic nodes
    #[serde(default)]
    pub cfa_node: Option<CfaNodeId>,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub info: Vec<InfoEntry>,
    #[serde(default)]
    pub position: Point,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArgGraph {
    pub nodes: Vec<ArgNode>,
    #[serde(default)]
    pub edges: Vec<Edge<ArgNodeId>>,
}

/// Both renderings of one counterexample path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPath {
    pub collapsed: ArgGraph,
    pub full: ArgGraph,
}

impl ErrorPath {
    pub fn graph(&self, mode: DisplayMode) -> &ArgGraph {
        match mode {
            DisplayMode::Collapsed => &self.collapsed,
            DisplayMode::FullErrorPath => &self.full,
        }
    }
}

/// The immutable dataset embedded in a counterexample report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub functions: Vec<CfaFunction>,
    #[serde(default)]
    pub error_paths: Vec<ErrorPath>,
    #[serde(default)]
    pub viewer: ViewerConfig,
}

// ------------------------------------------------------------------
// Loading
// ------------------------------------------------------------------

impl Report {
    /// Parse and validate a report from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        let report: Report = serde_json::from_str(json)?;
        report.validate()?;
        Ok(report)
    }

    /// Extract the JSON block embedded in a report page and parse it.
    pub fn from_html(html: &str) -> Result<Self, ReportError> {
        let json = extract_embedded_json(html).ok_or(
            ReportError::MissingEmbeddedReport(dom::REPORT_DATA),
        )?;
        Self::from_json(json)
    }

    /// Load either a bare JSON report or an HTML page embedding one.
    pub fn load_from_file(path: &Path) -> Result<Self, ReportError> {
        let contents = std::fs::read_to_string(path)?;
        let report = if contents.trim_start().starts_with('<') {
            Self::from_html(&contents)?
        } else {
            Self::from_json(&contents)?
        };
        tracing::info!(
            path = %path.display(),
            functions = report.functions.len(),
            error_paths = report.error_paths.len(),
            "loaded counterexample report"
        );
        Ok(report)
    }

    pub fn arg_graph(&self, view: ArgView) -> Option<&ArgGraph> {
        self.error_paths.get(view.path).map(|p| p.graph(view.mode))
    }

    /// Check referential integrity. Every later lookup relies on this.
    pub fn validate(&self) -> Result<(), ReportError> {
        if self.functions.is_empty() {
            return Err(ReportError::NoFunctions);
        }

        let mut function_names = HashSet::new();
        let mut cfa_nodes = HashSet::new();
        for function in &self.functions {
            if !function_names.insert(function.name.as_str()) {
                return Err(ReportError::DuplicateFunction(
                    function.name.clone(),
                ));
            }
            for node in &function.nodes {
                if !cfa_nodes.insert(node.id) {
                    return Err(ReportError::DuplicateCfaNode(node.id));
                }
            }
        }

        for (index, function) in self.functions.iter().enumerate() {
            let local: HashSet<CfaNodeId> =
                function.nodes.iter().map(|n| n.id).collect();
            for edge in &function.edges {
                for end in [edge.source, edge.target] {
                    if !local.contains(&end) {
                        return Err(ReportError::DanglingEdge {
                            graph: dom::cfa_panel_id(
                                &function.name,
                                index,
                            ),
                            node: end.0,
                        });
                    }
                }
            }
            for node in &function.nodes {
                if let Some(callee) = &node.calls
                    && !function_names.contains(callee.as_str())
                {
                    return Err(ReportError::UnknownCallee {
                        node: node.id,
                        callee: callee.clone(),
                    });
                }
            }
        }

        let mut locations: HashMap<ArgNodeId, Option<CfaNodeId>> =
            HashMap::new();
        for (path, error_path) in self.error_paths.iter().enumerate() {
            for mode in DisplayMode::ALL {
                let view = ArgView::new(path, mode);
                let graph = error_path.graph(mode);
                let graph_id = dom::arg_graph_id(view);
                validate_arg_graph(
                    graph,
                    &graph_id,
                    &cfa_nodes,
                    &mut locations,
                )?;
            }
        }

        Ok(())
    }
}

fn validate_arg_graph(
    graph: &ArgGraph,
    graph_id: &str,
    cfa_nodes: &HashSet<CfaNodeId>,
    locations: &mut HashMap<ArgNodeId, Option<CfaNodeId>>,
) -> Result<(), ReportError> {
    let mut local = HashSet::new();
    for node in &graph.nodes {
        if !local.insert(node.id) {
            return Err(ReportError::DuplicateArgNode {
                graph: graph_id.to_string(),
                node: node.id,
            });
        }
        if let Some(cfa) = node.cfa_node
            && !cfa_nodes.contains(&cfa)
        {
            return Err(ReportError::UnknownLocation {
                arg: node.id,
                cfa,
            });
        }
        // The same abstract state may appear in several renderings,
        // but always at the same program location.
        match locations.get(&node.id) {
            Some(previous) if *previous != node.cfa_node => {
                return Err(ReportError::ConflictingLocation {
                    arg: node.id,
                    first: describe_location(*previous),
                    second: describe_location(node.cfa_node),
                });
            }
            Some(_) => {}
            None => {
                locations.insert(node.id, node.cfa_node);
            }
        }
    }
    for edge in &graph.edges {
        for end in [edge.source, edge.target] {
            if !local.contains(&end) {
                return Err(ReportError::DanglingEdge {
                    graph: graph_id.to_string(),
                    node: end.0,
                });
            }
        }
    }
    Ok(())
}

fn describe_location(location: Option<CfaNodeId>) -> String {
    match location {
        Some(id) => id.to_string(),
        None => String::from("none"),
    }
}

/// Return the body of `<script id="report-data" ...>...</script>`.
pub fn extract_embedded_json(html: &str) -> Option<&str> {
    let marker = format!("id=\"{}\"", dom::REPORT_DATA);
    let tag_start = html.find(&marker)?;
    let body_start = tag_start + html[tag_start..].find('>')? + 1;
    let body_len = html[body_start..].find("</script>")?;
    Some(html[body_start..body_start + body_len].trim())
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------
