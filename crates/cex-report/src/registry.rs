use std::collections::{BTreeSet, HashMap};

use crate::dom;
use crate::ids::{
    ArgView, CfaNodeId, DisplayMode, FunctionIndex, GraphKey, NodeRef,
    Point, Tab,
};
use crate::report::{InfoEntry, Report};

/// Everything a front end needs to show one graph of the report.
#[derive(Debug, Clone)]
pub struct RenderTarget {
    pub key: GraphKey,
    pub dom_id: String,
    pub title: String,
    nodes: BTreeSet<NodeRef>,
}

impl RenderTarget {
    pub fn contains(&self, node: NodeRef) -> bool {
        self.nodes.contains(&node)
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeRef> + '_ {
        self.nodes.iter().copied()
    }

}

/// Descriptive text of a node, as baked into the report.
#[derive(Debug, Clone)]
pub struct NodeDetails {
    pub label: String,
    pub info: Vec<InfoEntry>,
    pub position: Point,
    /// Program location (ARG) or owning function (CFA)
    pub context: Option<InfoEntry>,
}

/// Typed lookup from graph keys to render targets, built once per
/// report.
#[derive(Debug, Clone, Default)]
pub struct GraphRegistry {
    /// CFA functions in report order, then ARG views by path with the
    /// collapsed rendering first
    targets: Vec<RenderTarget>,
    index: HashMap<GraphKey, usize>,
    /// Keyed per graph: the renderings of one ARG state may carry
    /// different info rows
    details: HashMap<(GraphKey, NodeRef), NodeDetails>,
    cfa_owner: HashMap<CfaNodeId, FunctionIndex>,
    callees: HashMap<CfaNodeId, FunctionIndex>,
    entry_nodes: Vec<Option<CfaNodeId>>,
    error_paths: usize,
}

impl GraphRegistry {
    /// Build the registry from a validated report.
    pub fn build(report: &Report) -> Self {
        let mut registry = GraphRegistry {
            error_paths: report.error_paths.len(),
            ..Default::default()
        };

        let function_index: HashMap<&str, FunctionIndex> = report
            .functions
            .iter()
            .enumerate()
            .map(|(i, f)| (f.name.as_str(), FunctionIndex(i)))
            .collect();

        for (i, function) in report.functions.iter().enumerate() {
            let key = GraphKey::Cfa(FunctionIndex(i));
            let mut nodes = BTreeSet::new();
            for node in &function.nodes {
                nodes.insert(NodeRef::Cfa(node.id));
                registry.cfa_owner.insert(node.id, FunctionIndex(i));
                if let Some(callee) = node
                    .calls
                    .as_deref()
                    .and_then(|name| function_index.get(name))
                {
                    registry.callees.insert(node.id, *callee);
                }
                registry.details.insert(
                    (key, NodeRef::Cfa(node.id)),
                    NodeDetails {
                        label: node.label.clone(),
                        info: node.info.clone(),
                        position: node.position,
                        context: Some(InfoEntry {
                            key: String::from("function"),
                            value: function.name.clone(),
                        }),
                    },
                );
            }
            registry
                .entry_nodes
                .push(function.nodes.first().map(|n| n.id));
            registry.push(RenderTarget {
                key,
                dom_id: dom::cfa_panel_id(&function.name, i),
                title: function.name.clone(),
                nodes,
            });
        }

        for (path, error_path) in report.error_paths.iter().enumerate() {
            for mode in DisplayMode::ALL {
                let view = ArgView::new(path, mode);
                let graph = error_path.graph(mode);
                let mut nodes = BTreeSet::new();
                for node in &graph.nodes {
                    let node_ref = NodeRef::Arg(node.id);
                    nodes.insert(node_ref);
                    registry.details.insert(
                        (GraphKey::Arg(view), node_ref),
                        NodeDetails {
                            label: node.label.clone(),
                            info: node.info.clone(),
                            position: node.position,
                            context: node.cfa_node.map(|cfa| InfoEntry {
                                key: String::from("location"),
                                value: format!("N{cfa}"),
                            }),
                        },
                    );
                }
                registry.push(RenderTarget {
                    key: GraphKey::Arg(view),
                    dom_id: dom::arg_graph_id(view),
                    title: arg_view_title(view),
                    nodes,
                });
            }
        }

        registry
    }

    fn push(&mut self, target: RenderTarget) {
        self.index.insert(target.key, self.targets.len());
        self.targets.push(target);
    }

    pub fn get(&self, key: GraphKey) -> Option<&RenderTarget> {
        self.index.get(&key).map(|&i| &self.targets[i])
    }

    pub fn targets(&self) -> &[RenderTarget] {
        &self.targets
    }

    pub fn targets_for(
        &self,
        tab: Tab,
    ) -> impl Iterator<Item = &RenderTarget> + '_ {
        self.targets.iter().filter(move |t| t.key.tab() == tab)
    }

    pub fn error_path_count(&self) -> usize {
        self.error_paths
    }

    pub fn function_count(&self) -> usize {
        self.entry_nodes.len()
    }

    /// ARG dropdown entries, in the order they are rendered.
    pub fn arg_options(&self) -> Vec<ArgView> {
        (0..self.error_paths)
            .flat_map(|path| {
                DisplayMode::ALL
                    .into_iter()
                    .map(move |mode| ArgView::new(path, mode))
            })
            .collect()
    }

    /// Text of `node` as drawn in graph `key`.
    pub fn details(
        &self,
        key: GraphKey,
        node: NodeRef,
    ) -> Option<&NodeDetails> {
        self.details.get(&(key, node))
    }

    pub fn owner_of(&self, node: CfaNodeId) -> Option<FunctionIndex> {
        self.cfa_owner.get(&node).copied()
    }

    pub fn callee_of(&self, node: CfaNodeId) -> Option<FunctionIndex> {
        self.callees.get(&node).copied()
    }

    pub fn entry_node(&self, function: FunctionIndex) -> Option<CfaNodeId> {
        self.entry_nodes.get(function.0).copied().flatten()
    }

    /// Graphs rendering `node`, in registry order.
    pub fn graphs_containing(
        &self,
        node: NodeRef,
    ) -> impl Iterator<Item = GraphKey> + '_ {
        self.targets
            .iter()
            .filter(move |t| t.contains(node))
            .map(|t| t.key)
    }

    /// Graph shown for `tab` before the user picks one.
    pub fn default_graph(&self, tab: Tab) -> Option<GraphKey> {
        self.targets_for(tab).next().map(|t| t.key)
    }
}

pub fn arg_view_title(view: ArgView) -> String {
    match view.mode {
        DisplayMode::Collapsed => format!("Error path {} (ARG)", view.path),
        DisplayMode::FullErrorPath => {
            format!("Error path {} (full)", view.path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ArgNodeId;
    use crate::report::tests::sample_report;

    #[test]
    fn test_registry_order_and_ids() {
        let registry = GraphRegistry::build(&sample_report());
        let ids: Vec<&str> = registry
            .targets()
            .iter()
            .map(|t| t.dom_id.as_str())
            .collect();
        assert_eq!(
            ids,
            vec![
                "cfa-svg-main0",
                "cfa-svg-__Main1",
                "arg-graph0",
                "arg-svgarg-error-graph0",
                "arg-graph1",
                "arg-svgarg-error-graph1",
            ]
        );
        assert_eq!(registry.function_count(), 2);
        assert_eq!(registry.error_path_count(), 2);
    }

    #[test]
    fn test_arg_options_alternate_modes_per_path() {
        let registry = GraphRegistry::build(&sample_report());
        let options = registry.arg_options();
        assert_eq!(options.len(), 4);
        assert_eq!(options[0], ArgView::new(0, DisplayMode::Collapsed));
        assert_eq!(options[1], ArgView::new(0, DisplayMode::FullErrorPath));
        assert_eq!(options[2], ArgView::new(1, DisplayMode::Collapsed));
    }

    #[test]
    fn test_lookup_tables() {
        let registry = GraphRegistry::build(&sample_report());
        assert_eq!(
            registry.owner_of(CfaNodeId(11)),
            Some(FunctionIndex(1))
        );
        assert_eq!(
            registry.callee_of(CfaNodeId(100001)),
            Some(FunctionIndex(1))
        );
        assert_eq!(registry.callee_of(CfaNodeId(2)), None);
        assert_eq!(
            registry.entry_node(FunctionIndex(1)),
            Some(CfaNodeId(10))
        );

        let graphs: Vec<GraphKey> = registry
            .graphs_containing(NodeRef::Arg(ArgNodeId(2)))
            .collect();
        assert_eq!(
            graphs,
            vec![GraphKey::Arg(ArgView::new(0, DisplayMode::FullErrorPath))]
        );
    }

    #[test]
    fn test_details_carry_location_context() {
        let registry = GraphRegistry::build(&sample_report());
        let collapsed = GraphKey::Arg(ArgView::new(0, DisplayMode::Collapsed));
        let details = registry
            .details(collapsed, NodeRef::Arg(ArgNodeId(5)))
            .unwrap();
        assert_eq!(details.label, "5 @ N4");
        assert_eq!(details.info[0].value, "ERROR");
        assert_eq!(details.context.as_ref().unwrap().value, "N4");

        let full = GraphKey::Arg(ArgView::new(1, DisplayMode::FullErrorPath));
        let synthetic =
            registry.details(full, NodeRef::Arg(ArgNodeId(9))).unwrap();
        assert!(synthetic.context.is_none());
    }

    #[test]
    fn test_details_are_kept_per_rendering() {
        let registry = GraphRegistry::build(&sample_report());
        let node = NodeRef::Arg(ArgNodeId(5));
        let full = GraphKey::Arg(ArgView::new(0, DisplayMode::FullErrorPath));
        assert!(registry.details(full, node).unwrap().info.is_empty());

        let other_path = GraphKey::Arg(ArgView::new(1, DisplayMode::Collapsed));
        assert!(registry.details(other_path, node).is_none());
    }
}
