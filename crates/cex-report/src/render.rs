//! Pure projection of [`ViewerState`] onto the report page.
//!
//! Front ends apply a [`Snapshot`] wholesale after every transition
//! instead of toggling elements one by one.

use std::collections::BTreeSet;

use crate::config::ViewerConfig;
use crate::dom;
use crate::error_path;
use crate::hover::{self, InfoBox};
use crate::ids::{DisplayMode, FunctionIndex, GraphKey, NodeRef, Tab};
use crate::registry::GraphRegistry;
use crate::state::ViewerState;

/// Own visibility of one element. An element is on screen only if its
/// parent is too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementVisibility {
    pub dom_id: String,
    pub visible: bool,
    pub parent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub node: NodeRef,
    pub dom_id: String,
    /// Graph container holding the highlighted element
    pub graph_dom_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub active_tab: Tab,
    pub visible_graphs: Vec<GraphKey>,
    pub elements: Vec<ElementVisibility>,
    pub info_box: Option<InfoBox>,
    pub highlight: Option<Highlight>,
    pub selected_arg_option: Option<usize>,
    pub selected_function: Option<FunctionIndex>,
    shown_nodes: BTreeSet<String>,
}

impl Snapshot {
    pub fn element(&self, dom_id: &str) -> Option<&ElementVisibility> {
        self.elements.iter().find(|e| e.dom_id == dom_id)
    }

    /// Whether the element with `dom_id` is on screen. Node ids are
    /// resolved against the graph currently shown.
    pub fn is_displayed(&self, dom_id: &str) -> bool {
        if self.shown_nodes.contains(dom_id) {
            return true;
        }
        let mut current = self.element(dom_id);
        while let Some(element) = current {
            if !element.visible {
                return false;
            }
            match &element.parent {
                Some(parent) => current = self.element(parent),
                None => return true,
            }
        }
        false
    }

    /// Ids of every element currently on screen, in page order.
    pub fn displayed(&self) -> Vec<&str> {
        self.elements
            .iter()
            .map(|e| e.dom_id.as_str())
            .filter(|id| self.is_displayed(id))
            .collect()
    }
}

pub fn snapshot(
    state: &ViewerState,
    registry: &GraphRegistry,
    config: &ViewerConfig,
) -> Snapshot {
    let info_box = hover::info_box(state, registry, config);
    let visible_graphs: Vec<GraphKey> =
        Tab::ALL.iter().filter_map(|&t| state.visible_graph(t)).collect();

    let mut elements = Vec::new();
    for tab in Tab::ALL {
        elements.push(ElementVisibility {
            dom_id: dom::panel_id(tab).to_string(),
            visible: state.active_tab() == tab,
            parent: None,
        });
    }
    for target in registry.targets() {
        elements.push(ElementVisibility {
            dom_id: target.dom_id.clone(),
            visible: visible_graphs.contains(&target.key),
            parent: Some(dom::panel_id(target.key.tab()).to_string()),
        });
    }
    elements.push(ElementVisibility {
        dom_id: dom::INFO_BOX.to_string(),
        visible: info_box.is_some(),
        parent: None,
    });

    let shown_nodes = state
        .shown_graph()
        .and_then(|key| registry.get(key).map(|t| (key, t)))
        .map(|(key, target)| {
            let mode = mode_of(key);
            target
                .nodes()
                .map(|node| dom::node_element_id(node, mode))
                .collect()
        })
        .unwrap_or_default();

    let highlight = state.highlighted_node().and_then(|node| {
        let key = state.visible_graph(node.tab())?;
        let target = registry.get(key)?;
        target.contains(node).then(|| Highlight {
            node,
            dom_id: dom::node_element_id(node, mode_of(key)),
            graph_dom_id: target.dom_id.clone(),
        })
    });

    Snapshot {
        active_tab: state.active_tab(),
        visible_graphs,
        elements,
        info_box,
        highlight,
        selected_arg_option: error_path::selected_option(state, registry),
        selected_function: state.selected_function(),
        shown_nodes,
    }
}

fn mode_of(key: GraphKey) -> DisplayMode {
    match key {
        GraphKey::Cfa(_) => DisplayMode::Collapsed,
        GraphKey::Arg(view) => view.mode,
    }
}
