use crate::error::SelectionError;
use crate::hover;
use crate::ids::{ArgView, DisplayMode, GraphKey};
use crate::registry::{GraphRegistry, arg_view_title};
use crate::state::ViewerState;

/// One entry of the ARG dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownOption {
    pub label: String,
    pub view: ArgView,
}

/// Dropdown entries in display order: per path, collapsed then full.
pub fn options(registry: &GraphRegistry) -> Vec<DropdownOption> {
    registry
        .arg_options()
        .into_iter()
        .map(|view| DropdownOption {
            label: arg_view_title(view),
            view,
        })
        .collect()
}

/// Show error path `index` in `mode` and hide every other ARG graph.
pub fn select_error_path(
    state: &mut ViewerState,
    registry: &GraphRegistry,
    mode: DisplayMode,
    index: usize,
) -> Result<(), SelectionError> {
    let available = registry.error_path_count();
    if index >= available {
        tracing::warn!(index, available, "error path out of range");
        return Err(SelectionError::ErrorPathOutOfRange { index, available });
    }
    show(state, registry, ArgView::new(index, mode));
    Ok(())
}

/// Select dropdown entry `option`.
pub fn select_option(
    state: &mut ViewerState,
    registry: &GraphRegistry,
    option: usize,
) -> Result<ArgView, SelectionError> {
    let views = registry.arg_options();
    let Some(&view) = views.get(option) else {
        tracing::warn!(
            option,
            available = views.len(),
            "dropdown option out of range"
        );
        return Err(SelectionError::OptionOutOfRange {
            option,
            available: views.len(),
        });
    };
    show(state, registry, view);
    Ok(view)
}

/// Position of the visible ARG graph in the dropdown.
pub fn selected_option(
    state: &ViewerState,
    registry: &GraphRegistry,
) -> Option<usize> {
    let view = state.arg_slot?;
    registry.arg_options().iter().position(|v| *v == view)
}

fn show(state: &mut ViewerState, registry: &GraphRegistry, view: ArgView) {
    if state.arg_slot != Some(view) {
        tracing::debug!(path = view.path, mode = ?view.mode, "show ARG graph");
    }
    state.set_visible_graph(GraphKey::Arg(view));
    hover::retain_rendered(state, registry);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{ArgNodeId, NodeRef, Point, Tab};
    use crate::report::tests::sample_report;
    use crate::state::Hover;

    fn setup() -> (GraphRegistry, ViewerState) {
        let report = sample_report();
        let registry = GraphRegistry::build(&report);
        let state = ViewerState::initial(&registry, &report.viewer);
        (registry, state)
    }

    #[test]
    fn test_select_full_error_path() {
        let (registry, mut state) = setup();
        select_error_path(
            &mut state,
            &registry,
            DisplayMode::FullErrorPath,
            1,
        )
        .unwrap();
        assert_eq!(state.selected_error_path(), Some(1));
        assert_eq!(state.display_mode(), DisplayMode::FullErrorPath);
        assert_eq!(selected_option(&state, &registry), Some(3));
    }

    #[test]
    fn test_out_of_range_leaves_state_untouched() {
        let (registry, mut state) = setup();
        let before = state.clone();
        let err = select_error_path(
            &mut state,
            &registry,
            DisplayMode::Collapsed,
            2,
        )
        .unwrap_err();
        assert_eq!(
            err,
            SelectionError::ErrorPathOutOfRange {
                index: 2,
                available: 2
            }
        );
        assert_eq!(
            select_option(&mut state, &registry, 4).unwrap_err(),
            SelectionError::OptionOutOfRange {
                option: 4,
                available: 4
            }
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_options_are_labelled_in_order() {
        let (registry, _) = setup();
        let labels: Vec<String> =
            options(&registry).into_iter().map(|o| o.label).collect();
        assert_eq!(
            labels,
            vec![
                "Error path 0 (ARG)",
                "Error path 0 (full)",
                "Error path 1 (ARG)",
                "Error path 1 (full)",
            ]
        );
    }

    #[test]
    fn test_switching_graph_retires_hover_on_missing_node() {
        let (registry, mut state) = setup();
        state.active_tab = Tab::Arg;
        state.hover = Some(Hover {
            node: NodeRef::Arg(ArgNodeId(1)),
            anchor: Point::default(),
            pointer_on_overlay: false,
        });

        // node 1 is drawn in both renderings of path 0
        select_option(&mut state, &registry, 1).unwrap();
        assert_eq!(state.hovered_node(), Some(NodeRef::Arg(ArgNodeId(1))));

        select_option(&mut state, &registry, 2).unwrap();
        assert_eq!(state.hovered_node(), None);
    }
}
