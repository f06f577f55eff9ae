use std::collections::HashMap;

use cex_report::report::{ArgGraph, CfaFunction};
use cex_report::{
    ArgView, DisplayMode, FunctionIndex, GraphKey, NodeRef, Point, Report,
};
use eframe::egui::Pos2;
use egui_graphs::{DefaultEdgeShape, Graph, GraphView};
use petgraph::Directed;
use petgraph::graph::DefaultIx;
use petgraph::stable_graph::{NodeIndex, StableGraph};

use crate::layout_fixed::{LayoutFixed, LayoutStateFixed};
use crate::node_shapes::ReportNodeShape;
use crate::settings::ViewerSettings;

/// Payload of every drawn node.
#[derive(Debug, Clone)]
pub struct ReportNode {
    pub node: NodeRef,
    pub label: String,
    pub position: Point,
}

// ------------------------------------------------------------------
// Type aliases for graph types
// ------------------------------------------------------------------

pub type ReportGraph = StableGraph<ReportNode, String>;

pub type ReportGraphDisplay = Graph<
    ReportNode,
    String,
    Directed,
    DefaultIx,
    ReportNodeShape,
    DefaultEdgeShape,
>;

pub type ReportGraphView<'a> = GraphView<
    'a,
    ReportNode,
    String,
    Directed,
    DefaultIx,
    ReportNodeShape,
    DefaultEdgeShape,
    LayoutStateFixed,
    LayoutFixed,
>;

// ------------------------------------------------------------------
// Building
// ------------------------------------------------------------------

pub fn cfa_graph(function: &CfaFunction) -> ReportGraph {
    report_graph(
        function.nodes.iter().map(|n| ReportNode {
            node: NodeRef::Cfa(n.id),
            label: n.label.clone(),
            position: n.position,
        }),
        function.edges.iter().map(|e| {
            (NodeRef::Cfa(e.source), NodeRef::Cfa(e.target), &e.label)
        }),
    )
}

pub fn arg_graph(graph: &ArgGraph) -> ReportGraph {
    report_graph(
        graph.nodes.iter().map(|n| ReportNode {
            node: NodeRef::Arg(n.id),
            label: n.label.clone(),
            position: n.position,
        }),
        graph.edges.iter().map(|e| {
            (NodeRef::Arg(e.source), NodeRef::Arg(e.target), &e.label)
        }),
    )
}

/// Edges whose endpoints are not among `nodes` are skipped.
fn report_graph<'a>(
    nodes: impl IntoIterator<Item = ReportNode>,
    edges: impl IntoIterator<Item = (NodeRef, NodeRef, &'a String)>,
) -> ReportGraph {
    let mut g = ReportGraph::default();
    let mut index = HashMap::new();
    for node in nodes {
        let id = node.node;
        index.insert(id, g.add_node(node));
    }
    for (source, target, label) in edges {
        if let (Some(&a), Some(&b)) = (index.get(&source), index.get(&target))
        {
            g.add_edge(a, b, label.clone());
        }
    }
    g
}

/// One drawn graph plus the lookup from report nodes to its indices.
pub struct GraphDisplay {
    pub graph: ReportGraphDisplay,
    indices: HashMap<NodeRef, NodeIndex>,
}

impl GraphDisplay {
    pub fn new(g: &ReportGraph, settings: &ViewerSettings) -> Self {
        let mut graph = ReportGraphDisplay::from(g);
        let mut indices = HashMap::new();
        for (idx, node) in g.node_indices().zip(g.node_weights()) {
            indices.insert(node.node, idx);
            if let Some(graph_node) = graph.node_mut(idx) {
                let label = if node.label.is_empty() {
                    node.node.to_string()
                } else {
                    node.label.clone()
                };
                graph_node.set_label(label);
                let Point { x, y } = node.position;
                graph_node.set_location(Pos2::new(x, y));
            }
        }
        for (idx, label) in g.edge_indices().zip(g.edge_weights()) {
            if let Some(edge) = graph.edge_mut(idx) {
                edge.set_label(label.clone());
            }
        }
        let mut display = Self { graph, indices };
        display.apply_settings(settings);
        display
    }

    pub fn node_index(&self, node: NodeRef) -> Option<NodeIndex> {
        self.indices.get(&node).copied()
    }

    pub fn node_at(&self, idx: NodeIndex) -> Option<NodeRef> {
        self.graph.node(idx).map(|n| n.payload().node)
    }

    pub fn hovered(&self) -> Option<NodeRef> {
        self.graph.hovered_node().and_then(|idx| self.node_at(idx))
    }

    /// Mark exactly `node` as selected, which draws the highlight.
    pub fn set_highlight(&mut self, node: Option<NodeRef>) {
        let target = node.and_then(|n| self.node_index(n));
        let all: Vec<NodeIndex> =
            self.graph.nodes_iter().map(|(idx, _)| idx).collect();
        for idx in all {
            if let Some(graph_node) = self.graph.node_mut(idx) {
                graph_node.set_selected(Some(idx) == target);
            }
        }
    }

    pub fn highlighted(&self) -> Option<NodeRef> {
        self.graph
            .nodes_iter()
            .find(|(_, n)| n.selected())
            .map(|(_, n)| n.payload().node)
    }

    pub fn apply_settings(&mut self, settings: &ViewerSettings) {
        let all: Vec<NodeIndex> =
            self.graph.nodes_iter().map(|(idx, _)| idx).collect();
        for idx in all {
            if let Some(graph_node) = self.graph.node_mut(idx) {
                graph_node.display_mut().apply_settings(settings);
            }
        }
    }
}

/// Displays of every graph in the report, keyed like the registry.
pub fn build_displays(
    report: &Report,
    settings: &ViewerSettings,
) -> HashMap<GraphKey, GraphDisplay> {
    let mut displays = HashMap::new();
    for (i, function) in report.functions.iter().enumerate() {
        displays.insert(
            GraphKey::Cfa(FunctionIndex(i)),
            GraphDisplay::new(&cfa_graph(function), settings),
        );
    }
    for (path, error_path) in report.error_paths.iter().enumerate() {
        for mode in DisplayMode::ALL {
            let view = ArgView::new(path, mode);
            let g = arg_graph(error_path.graph(mode));
            displays
                .insert(GraphKey::Arg(view), GraphDisplay::new(&g, settings));
        }
    }
    displays
}
