use crate::actions::{self, Action};
use crate::effects::{self, Effect};
use crate::store::Store;

pub struct State {
    pub store: Store,
    action_queue: Vec<Action>,
    effect_queue: Vec<Effect>,
}

impl State {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            action_queue: Vec::new(),
            effect_queue: Vec::new(),
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        self.action_queue.push(action);
    }

    pub fn flush_actions(&mut self) {
        let actions = std::mem::take(&mut self.action_queue);
        for action in actions {
            let mut effects = actions::update(&mut self.store, action);
            self.effect_queue.append(&mut effects);
        }
    }

    pub fn flush_effects(&mut self) {
        let effects = std::mem::take(&mut self.effect_queue);
        for effect in effects {
            effects::run(&mut self.store, effect);
        }
    }

    /// Apply everything queued so far, effects included.
    pub fn flush(&mut self) {
        self.flush_actions();
        self.flush_effects();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ViewerSettings;
    use cex_report::{CfaNodeId, NodeRef, Tab, Viewer};

    #[test]
    fn test_focus_effect_runs_after_actions() {
        let viewer = Viewer::from_json(include_str!(
            "../../cex-report/tests/fixtures/counterexample.json"
        ))
        .unwrap();
        let mut state =
            State::new(Store::with_viewer(viewer, ViewerSettings::default()));

        state.dispatch(Action::ActivateNode {
            node: NodeRef::Cfa(CfaNodeId(100001)),
        });
        state.flush_actions();
        assert_eq!(state.store.pending_focus, None);

        state.flush_effects();
        assert_eq!(
            state.store.pending_focus,
            Some(NodeRef::Cfa(CfaNodeId(10)))
        );

        state.dispatch(Action::SelectTab { tab: Tab::Arg });
        state.dispatch(Action::ClearPendingFocus);
        state.flush();
        assert_eq!(state.store.pending_focus, None);
        let viewer = state.store.viewer.as_ref().unwrap();
        assert_eq!(viewer.state().active_tab(), Tab::Arg);
    }
}
