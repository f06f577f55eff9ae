use crate::config::ViewerConfig;
use crate::ids::{ArgNodeId, CfaNodeId, NodeRef, Point};
use crate::registry::GraphRegistry;
use crate::report::InfoEntry;
use crate::state::{Hover, ViewerState};

/// Content and placement of the single hover overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoBox {
    pub node: NodeRef,
    pub title: String,
    pub rows: Vec<InfoEntry>,
    /// Top-left corner, in the coordinates of the hover anchor
    pub position: Point,
}

/// Pointer entered `node`. Returns whether the overlay is now shown for
/// it; nodes outside the graph on screen are ignored.
pub fn on_hover(
    state: &mut ViewerState,
    registry: &GraphRegistry,
    node: NodeRef,
    anchor: Point,
) -> bool {
    if !state.is_rendered(registry, node) {
        tracing::debug!(%node, "hover ignored, node not on screen");
        return false;
    }
    if state.hovered_node() != Some(node) {
        tracing::debug!(%node, "hover");
    }
    state.hover = Some(Hover {
        node,
        anchor,
        pointer_on_overlay: false,
    });
    true
}

/// Pointer left `node`.
pub fn on_unhover(
    state: &mut ViewerState,
    node: NodeRef,
    moved_onto_overlay: bool,
) {
    let Some(hover) = state.hover.as_mut() else {
        return;
    };
    if hover.node != node {
        return;
    }
    if moved_onto_overlay {
        hover.pointer_on_overlay = true;
    } else {
        tracing::debug!(%node, "unhover");
        state.hover = None;
    }
}

pub fn on_overlay_enter(state: &mut ViewerState) {
    if let Some(hover) = state.hover.as_mut() {
        hover.pointer_on_overlay = true;
    }
}

/// Pointer left the overlay, possibly back onto `moved_onto`.
pub fn on_overlay_leave(
    state: &mut ViewerState,
    moved_onto: Option<NodeRef>,
) {
    let Some(hover) = state.hover.as_mut() else {
        return;
    };
    if moved_onto == Some(hover.node) {
        hover.pointer_on_overlay = false;
    } else {
        tracing::debug!(node = %hover.node, "overlay left");
        state.hover = None;
    }
}

/// Drop the hover if its node is no longer drawn.
pub(crate) fn retain_rendered(
    state: &mut ViewerState,
    registry: &GraphRegistry,
) {
    if let Some(hover) = state.hover
        && !state.is_rendered(registry, hover.node)
    {
        tracing::debug!(node = %hover.node, "hover retired");
        state.hover = None;
    }
}

pub fn info_box(
    state: &ViewerState,
    registry: &GraphRegistry,
    config: &ViewerConfig,
) -> Option<InfoBox> {
    let hover = state.hover()?;
    let details = registry.details(state.shown_graph()?, hover.node)?;
    let title = if details.label.is_empty() {
        let (NodeRef::Cfa(CfaNodeId(n)) | NodeRef::Arg(ArgNodeId(n))) =
            hover.node;
        format!("Node {n}")
    } else {
        details.label.clone()
    };
    let rows = details
        .context
        .iter()
        .chain(details.info.iter())
        .cloned()
        .collect();
    Some(InfoBox {
        node: hover.node,
        title,
        rows,
        position: hover.anchor.offset(config.info_box_offset),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_path::select_option;
    use crate::ids::Tab;
    use crate::report::tests::sample_report;
    use crate::tabs::select_tab;

    fn setup() -> (GraphRegistry, ViewerState, ViewerConfig) {
        let report = sample_report();
        let registry = GraphRegistry::build(&report);
        let state = ViewerState::initial(&registry, &report.viewer);
        (registry, state, report.viewer)
    }

    const N1: NodeRef = NodeRef::Cfa(CfaNodeId(1));
    const N2: NodeRef = NodeRef::Cfa(CfaNodeId(2));

    #[test]
    fn test_hover_shows_info_box_at_offset() {
        let (registry, mut state, config) = setup();
        let anchor = Point::new(100.0, 40.0);
        assert!(on_hover(&mut state, &registry, N1, anchor));

        let info = info_box(&state, &registry, &config).unwrap();
        assert_eq!(info.node, N1);
        assert_eq!(info.title, "N1");
        assert_eq!(info.position, Point::new(112.0, 52.0));
        assert_eq!(info.rows[0].key, "function");
        assert_eq!(info.rows[0].value, "main");
        assert_eq!(info.rows[1].value, "3");
    }

    #[test]
    fn test_second_hover_replaces_first() {
        let (registry, mut state, config) = setup();
        on_hover(&mut state, &registry, N1, Point::default());
        on_hover(&mut state, &registry, N2, Point::default());

        // stale leave of the first node
        on_unhover(&mut state, N1, false);
        let info = info_box(&state, &registry, &config).unwrap();
        assert_eq!(info.node, N2);
    }

    #[test]
    fn test_hover_outside_visible_graph_is_ignored() {
        let (registry, mut state, _) = setup();
        assert!(!on_hover(
            &mut state,
            &registry,
            NodeRef::Cfa(CfaNodeId(10)),
            Point::default()
        ));
        assert!(!on_hover(
            &mut state,
            &registry,
            NodeRef::Arg(ArgNodeId(0)),
            Point::default()
        ));
        assert_eq!(state.hovered_node(), None);
    }

    #[test]
    fn test_moving_onto_overlay_keeps_it() {
        let (registry, mut state, _) = setup();
        on_hover(&mut state, &registry, N1, Point::default());
        on_unhover(&mut state, N1, true);
        assert_eq!(state.hovered_node(), Some(N1));
        assert!(state.hover().unwrap().pointer_on_overlay);

        on_overlay_leave(&mut state, Some(N1));
        assert_eq!(state.hovered_node(), Some(N1));
        assert!(!state.hover().unwrap().pointer_on_overlay);

        on_overlay_enter(&mut state);
        on_overlay_leave(&mut state, None);
        assert_eq!(state.hovered_node(), None);
    }

    #[test]
    fn test_unhover_hides_overlay() {
        let (registry, mut state, config) = setup();
        on_hover(&mut state, &registry, N1, Point::default());
        on_unhover(&mut state, N1, false);
        assert!(info_box(&state, &registry, &config).is_none());
    }

    #[test]
    fn test_info_rows_follow_the_shown_rendering() {
        let (registry, mut state, config) = setup();
        let node = NodeRef::Arg(ArgNodeId(0));
        select_tab(&mut state, Tab::Arg);
        select_option(&mut state, &registry, 1).unwrap();
        on_hover(&mut state, &registry, node, Point::default());

        let info = info_box(&state, &registry, &config).unwrap();
        assert_eq!(info.rows[0].value, "N1");
        assert_eq!(info.rows[1].value, "x = 5");

        // same state, collapsed rendering
        select_option(&mut state, &registry, 0).unwrap();
        assert_eq!(state.hovered_node(), Some(node));
        let info = info_box(&state, &registry, &config).unwrap();
        assert_eq!(info.rows[1].value, "x = ?");
    }

    #[test]
    fn test_tab_switch_clears_overlay() {
        let (registry, mut state, config) = setup();
        on_hover(&mut state, &registry, N1, Point::default());
        select_tab(&mut state, Tab::Arg);
        assert!(info_box(&state, &registry, &config).is_none());
    }
}
