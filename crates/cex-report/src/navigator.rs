use crate::correspondence::NodeCorrespondence;
use crate::hover;
use crate::ids::{CfaNodeId, GraphKey, NodeRef, Tab};
use crate::registry::GraphRegistry;
use crate::state::{Navigation, ViewerState};
use crate::tabs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// `target` is highlighted in the visible graph of `tab`, which is
    /// now active
    Jumped { tab: Tab, target: NodeRef },
    NoCorrespondingNode,
    /// Callee navigation was asked of a node that calls nothing
    NotACallNode,
}

impl NavigationOutcome {
    pub fn target(&self) -> Option<NodeRef> {
        match self {
            NavigationOutcome::Jumped { target, .. } => Some(*target),
            _ => None,
        }
    }
}

/// Jump from `node`, shown in `source_tab`, to its counterpart in the
/// other graph.
pub fn jump_to_corresponding_node(
    state: &mut ViewerState,
    registry: &GraphRegistry,
    correspondence: &NodeCorrespondence,
    source_tab: Tab,
    node: NodeRef,
) -> NavigationOutcome {
    if node.tab() != source_tab {
        tracing::debug!(%node, ?source_tab, "node not in source tab");
        return NavigationOutcome::NoCorrespondingNode;
    }
    let Some(target) = correspondence.resolve(node) else {
        tracing::debug!(%node, "no corresponding node");
        return NavigationOutcome::NoCorrespondingNode;
    };
    let Some(graph) = graph_for(state, registry, target) else {
        return NavigationOutcome::NoCorrespondingNode;
    };
    navigate(state, registry, graph, target)
}

/// Follow a synthetic function-call node into the called function and
/// highlight its entry node.
pub fn jump_to_callee(
    state: &mut ViewerState,
    registry: &GraphRegistry,
    node: CfaNodeId,
) -> NavigationOutcome {
    let Some(callee) = registry.callee_of(node) else {
        return NavigationOutcome::NotACallNode;
    };
    let Some(entry) = registry.entry_node(callee) else {
        return NavigationOutcome::NoCorrespondingNode;
    };
    navigate(state, registry, GraphKey::Cfa(callee), NodeRef::Cfa(entry))
}

/// Double-click on `node`: call nodes open their callee, everything else
/// jumps to the other graph.
pub fn activate(
    state: &mut ViewerState,
    registry: &GraphRegistry,
    correspondence: &NodeCorrespondence,
    node: NodeRef,
) -> NavigationOutcome {
    match node {
        NodeRef::Cfa(cfa) if registry.callee_of(cfa).is_some() => {
            jump_to_callee(state, registry, cfa)
        }
        _ => jump_to_corresponding_node(
            state,
            registry,
            correspondence,
            node.tab(),
            node,
        ),
    }
}

/// Remove the highlight. Returns whether there was one.
pub fn dismiss_highlight(state: &mut ViewerState) -> bool {
    let had = state.highlight.take().is_some();
    if had {
        tracing::debug!("highlight dismissed");
    }
    had
}

fn graph_for(
    state: &ViewerState,
    registry: &GraphRegistry,
    target: NodeRef,
) -> Option<GraphKey> {
    match target {
        NodeRef::Cfa(cfa) => registry.owner_of(cfa).map(GraphKey::Cfa),
        NodeRef::Arg(_) => {
            let current = state
                .visible_graph(Tab::Arg)
                .filter(|key| {
                    registry.get(*key).is_some_and(|t| t.contains(target))
                });
            current.or_else(|| registry.graphs_containing(target).next())
        }
    }
}

fn navigate(
    state: &mut ViewerState,
    registry: &GraphRegistry,
    graph: GraphKey,
    target: NodeRef,
) -> NavigationOutcome {
    state.navigation = Navigation::Navigating { target };
    state.set_visible_graph(graph);
    hover::retain_rendered(state, registry);
    tabs::select_tab(state, graph.tab());
    state.highlight = Some(target);
    state.navigation = Navigation::Idle;
    tracing::debug!(%target, ?graph, "navigated");
    NavigationOutcome::Jumped {
        tab: graph.tab(),
        target,
    }
}
