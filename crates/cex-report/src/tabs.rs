use crate::ids::Tab;
use crate::state::ViewerState;

/// Show `tab`'s panel. Any hover is dropped; graph slots and the
/// highlight survive.
pub fn select_tab(state: &mut ViewerState, tab: Tab) {
    if state.hover.take().is_some() {
        tracing::debug!("hover cleared by tab switch");
    }
    if state.active_tab != tab {
        tracing::debug!(from = ?state.active_tab, to = ?tab, "select tab");
    }
    state.active_tab = tab;
}
