use std::path::PathBuf;

use cex_report::{
    DisplayMode, FunctionIndex, NavigationOutcome, NodeRef, Point, Tab,
    Viewer,
};

use crate::effects::Effect;
use crate::settings::ViewerSettings;
use crate::store::Store;

/// Actions that can be dispatched to modify the viewer state
#[derive(Debug, Clone)]
pub enum Action {
    // Tabs and graph selection
    /// Show the CFA or the ARG panel
    SelectTab { tab: Tab },
    /// Pick an entry of the CFA function dropdown
    SelectFunction { index: usize },
    /// Pick an entry of the ARG error-path dropdown
    SelectErrorPathOption { option: usize },
    SelectErrorPath { mode: DisplayMode, index: usize },

    // Hover
    HoverNode { node: NodeRef, anchor: Point },
    UnhoverNode {
        node: NodeRef,
        moved_onto_overlay: bool,
    },
    EnterInfoBox,
    LeaveInfoBox { moved_onto: Option<NodeRef> },

    // Navigation
    /// Double-click on a node
    ActivateNode { node: NodeRef },
    JumpToCorrespondingNode { source_tab: Tab, node: NodeRef },
    DismissHighlight,

    // UI State Actions
    SetShowLabels { show: bool },
    UpdateSettings { settings: ViewerSettings },
    SetShowSettings { show: bool },
    ClearLayoutResetFlag,
    ClearPendingFocus,

    // File Operations
    LoadReport { path: PathBuf },
    SaveSettings { path: PathBuf },
    ClearErrorMessage,
}

/// Apply an action to the store, returning any follow-up effects.
pub fn update(store: &mut Store, action: Action) -> Vec<Effect> {
    tracing::debug!(?action, "apply action");
    let shown_before = store.shown_graph();
    let effects = apply(store, action);
    if store.shown_graph() != shown_before {
        store.layout_reset_needed = true;
    }
    store.sync_highlight();
    effects
}

fn apply(store: &mut Store, action: Action) -> Vec<Effect> {
    match action {
        Action::SelectTab { tab } => {
            with_viewer(store, |viewer| {
                viewer.select_tab(tab);
                Ok(vec![])
            })
        }
        Action::SelectFunction { index } => with_viewer(store, |viewer| {
            viewer.select_function(FunctionIndex(index))?;
            Ok(vec![])
        }),
        Action::SelectErrorPathOption { option } => {
            with_viewer(store, |viewer| {
                viewer.select_arg_option(option)?;
                Ok(vec![])
            })
        }
        Action::SelectErrorPath { mode, index } => {
            with_viewer(store, |viewer| {
                viewer.select_error_path(mode, index)?;
                Ok(vec![])
            })
        }

        Action::HoverNode { node, anchor } => with_viewer(store, |viewer| {
            viewer.hover(node, anchor);
            Ok(vec![])
        }),
        Action::UnhoverNode {
            node,
            moved_onto_overlay,
        } => with_viewer(store, |viewer| {
            viewer.unhover(node, moved_onto_overlay);
            Ok(vec![])
        }),
        Action::EnterInfoBox => with_viewer(store, |viewer| {
            viewer.enter_info_box();
            Ok(vec![])
        }),
        Action::LeaveInfoBox { moved_onto } => {
            with_viewer(store, |viewer| {
                viewer.leave_info_box(moved_onto);
                Ok(vec![])
            })
        }

        Action::ActivateNode { node } => with_viewer(store, |viewer| {
            Ok(focus(viewer.activate(node)))
        }),
        Action::JumpToCorrespondingNode { source_tab, node } => {
            with_viewer(store, |viewer| {
                Ok(focus(viewer.jump_to_corresponding_node(source_tab, node)))
            })
        }
        Action::DismissHighlight => with_viewer(store, |viewer| {
            viewer.dismiss_highlight();
            Ok(vec![])
        }),

        Action::SetShowLabels { show } => {
            store.settings.show_labels = show;
            store.apply_settings();
            vec![]
        }
        Action::UpdateSettings { settings } => {
            store.settings = settings.clamped();
            store.apply_settings();
            vec![]
        }
        Action::SetShowSettings { show } => {
            store.show_settings = show;
            vec![]
        }
        Action::ClearLayoutResetFlag => {
            store.layout_reset_needed = false;
            vec![]
        }
        Action::ClearPendingFocus => {
            store.pending_focus = None;
            vec![]
        }

        Action::LoadReport { path } => vec![Effect::LoadReport { path }],
        Action::SaveSettings { path } => {
            vec![Effect::SaveSettings { path }]
        }
        Action::ClearErrorMessage => {
            store.error_message = None;
            vec![]
        }
    }
}

/// Run `f` against the open report. Rejected selections end up in the
/// error dialog.
fn with_viewer<F>(store: &mut Store, f: F) -> Vec<Effect>
where
    F: FnOnce(&mut Viewer) -> Result<Vec<Effect>, cex_report::SelectionError>,
{
    let Some(viewer) = store.viewer.as_mut() else {
        return vec![];
    };
    match f(viewer) {
        Ok(effects) => effects,
        Err(e) => {
            store.error_message = Some(e.to_string());
            vec![]
        }
    }
}

fn focus(outcome: NavigationOutcome) -> Vec<Effect> {
    outcome
        .target()
        .map(|node| Effect::FocusNode { node })
        .into_iter()
        .collect()
}
