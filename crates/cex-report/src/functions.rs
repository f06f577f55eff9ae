use crate::error::SelectionError;
use crate::hover;
use crate::ids::{FunctionIndex, GraphKey, Tab};
use crate::registry::GraphRegistry;
use crate::state::ViewerState;

/// Titles of the CFA dropdown, one per function in report order.
pub fn options(registry: &GraphRegistry) -> Vec<String> {
    registry
        .targets_for(Tab::Cfa)
        .map(|target| target.title.clone())
        .collect()
}

/// Show the CFA panel of `function` and hide every other one.
pub fn select_function(
    state: &mut ViewerState,
    registry: &GraphRegistry,
    function: FunctionIndex,
) -> Result<(), SelectionError> {
    let available = registry.function_count();
    if function.0 >= available {
        tracing::warn!(index = function.0, available, "function out of range");
        return Err(SelectionError::FunctionOutOfRange {
            index: function.0,
            available,
        });
    }
    if state.cfa_slot != Some(function) {
        tracing::debug!(index = function.0, "show CFA function");
    }
    state.set_visible_graph(GraphKey::Cfa(function));
    hover::retain_rendered(state, registry);
    Ok(())
}
