use crate::config::ViewerConfig;
use crate::ids::{
    ArgView, DisplayMode, FunctionIndex, GraphKey, NodeRef, Point, Tab,
};
use crate::registry::GraphRegistry;

/// The node under the pointer and where its overlay is anchored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hover {
    pub node: NodeRef,
    pub anchor: Point,
    /// The pointer left the node straight onto the overlay
    pub pointer_on_overlay: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Navigation {
    #[default]
    Idle,
    Navigating {
        target: NodeRef,
    },
}

/// Mutable view state of one open report.
///
/// Each tab owns a single visible-graph slot, so at most one graph per
/// tab can ever be shown.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerState {
    pub(crate) active_tab: Tab,
    pub(crate) cfa_slot: Option<FunctionIndex>,
    pub(crate) arg_slot: Option<ArgView>,
    pub(crate) hover: Option<Hover>,
    pub(crate) highlight: Option<NodeRef>,
    pub(crate) navigation: Navigation,
}

impl ViewerState {
    pub fn initial(registry: &GraphRegistry, config: &ViewerConfig) -> Self {
        let cfa_slot = match registry.default_graph(Tab::Cfa) {
            Some(GraphKey::Cfa(function)) => Some(function),
            _ => None,
        };
        let arg_slot = match registry.default_graph(Tab::Arg) {
            Some(GraphKey::Arg(view)) => Some(view),
            _ => None,
        };
        Self {
            active_tab: config.initial_tab,
            cfa_slot,
            arg_slot,
            hover: None,
            highlight: None,
            navigation: Navigation::Idle,
        }
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn selected_error_path(&self) -> Option<usize> {
        self.arg_slot.map(|view| view.path)
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.arg_slot.map(|view| view.mode).unwrap_or_default()
    }

    pub fn selected_function(&self) -> Option<FunctionIndex> {
        self.cfa_slot
    }

    pub fn hover(&self) -> Option<&Hover> {
        self.hover.as_ref()
    }

    pub fn hovered_node(&self) -> Option<NodeRef> {
        self.hover.map(|h| h.node)
    }

    pub fn highlighted_node(&self) -> Option<NodeRef> {
        self.highlight
    }

    pub fn navigation(&self) -> Navigation {
        self.navigation
    }

    /// The graph occupying `tab`'s slot, whether or not `tab` is active.
    pub fn visible_graph(&self, tab: Tab) -> Option<GraphKey> {
        match tab {
            Tab::Cfa => self.cfa_slot.map(GraphKey::Cfa),
            Tab::Arg => self.arg_slot.map(GraphKey::Arg),
        }
    }

    /// The graph currently on screen.
    pub fn shown_graph(&self) -> Option<GraphKey> {
        self.visible_graph(self.active_tab)
    }

    pub(crate) fn set_visible_graph(&mut self, key: GraphKey) {
        match key {
            GraphKey::Cfa(function) => self.cfa_slot = Some(function),
            GraphKey::Arg(view) => self.arg_slot = Some(view),
        }
    }

    /// Whether `node` is drawn in the graph currently on screen.
    pub fn is_rendered(&self, registry: &GraphRegistry, node: NodeRef) -> bool {
        node.tab() == self.active_tab
            && self
                .shown_graph()
                .and_then(|key| registry.get(key))
                .is_some_and(|target| target.contains(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{ArgNodeId, CfaNodeId};
    use crate::report::tests::sample_report;

    #[test]
    fn test_initial_state_fills_both_slots() {
        let report = sample_report();
        let registry = GraphRegistry::build(&report);
        let state = ViewerState::initial(&registry, &report.viewer);

        assert_eq!(state.active_tab(), Tab::Cfa);
        assert_eq!(state.selected_function(), Some(FunctionIndex(0)));
        assert_eq!(state.selected_error_path(), Some(0));
        assert_eq!(state.display_mode(), DisplayMode::Collapsed);
        assert_eq!(state.hovered_node(), None);
        assert_eq!(state.navigation(), Navigation::Idle);
    }

    #[test]
    fn test_rendered_only_in_active_tab() {
        let report = sample_report();
        let registry = GraphRegistry::build(&report);
        let mut state = ViewerState::initial(&registry, &report.viewer);

        assert!(state.is_rendered(&registry, NodeRef::Cfa(CfaNodeId(1))));
        assert!(!state.is_rendered(&registry, NodeRef::Cfa(CfaNodeId(10))));
        assert!(!state.is_rendered(&registry, NodeRef::Arg(ArgNodeId(0))));

        state.active_tab = Tab::Arg;
        assert!(state.is_rendered(&registry, NodeRef::Arg(ArgNodeId(0))));
        assert!(!state.is_rendered(&registry, NodeRef::Arg(ArgNodeId(2))));
    }
}
