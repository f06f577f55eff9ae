use std::path::Path;

use crate::config::ViewerConfig;
use crate::correspondence::NodeCorrespondence;
use crate::error::{ReportError, SelectionError};
use crate::error_path::{self, DropdownOption};
use crate::functions;
use crate::hover::{self, InfoBox};
use crate::ids::{
    ArgView, CfaNodeId, DisplayMode, FunctionIndex, NodeRef, Point, Tab,
};
use crate::navigator::{self, NavigationOutcome};
use crate::registry::GraphRegistry;
use crate::render::{self, Snapshot};
use crate::report::Report;
use crate::state::ViewerState;
use crate::tabs;

/// One open report together with everything derived from it.
#[derive(Debug, Clone)]
pub struct Viewer {
    report: Report,
    registry: GraphRegistry,
    correspondence: NodeCorrespondence,
    state: ViewerState,
}

impl Viewer {
    pub fn new(report: Report) -> Result<Self, ReportError> {
        report.validate()?;
        let registry = GraphRegistry::build(&report);
        let correspondence = NodeCorrespondence::build(&report);
        let state = ViewerState::initial(&registry, &report.viewer);
        Ok(Self {
            report,
            registry,
            correspondence,
            state,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        Self::new(Report::from_json(json)?)
    }

    pub fn from_html(html: &str) -> Result<Self, ReportError> {
        Self::new(Report::from_html(html)?)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ReportError> {
        Self::new(Report::load_from_file(path)?)
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn registry(&self) -> &GraphRegistry {
        &self.registry
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.report.viewer
    }

    pub fn select_tab(&mut self, tab: Tab) {
        tabs::select_tab(&mut self.state, tab);
    }

    pub fn select_error_path(
        &mut self,
        mode: DisplayMode,
        index: usize,
    ) -> Result<(), SelectionError> {
        error_path::select_error_path(
            &mut self.state,
            &self.registry,
            mode,
            index,
        )
    }

    pub fn arg_options(&self) -> Vec<DropdownOption> {
        error_path::options(&self.registry)
    }

    pub fn select_arg_option(
        &mut self,
        option: usize,
    ) -> Result<ArgView, SelectionError> {
        error_path::select_option(&mut self.state, &self.registry, option)
    }

    pub fn function_options(&self) -> Vec<String> {
        functions::options(&self.registry)
    }

    pub fn select_function(
        &mut self,
        function: FunctionIndex,
    ) -> Result<(), SelectionError> {
        functions::select_function(&mut self.state, &self.registry, function)
    }

    pub fn hover(&mut self, node: NodeRef, anchor: Point) -> bool {
        hover::on_hover(&mut self.state, &self.registry, node, anchor)
    }

    pub fn unhover(&mut self, node: NodeRef, moved_onto_overlay: bool) {
        hover::on_unhover(&mut self.state, node, moved_onto_overlay);
    }

    pub fn enter_info_box(&mut self) {
        hover::on_overlay_enter(&mut self.state);
    }

    pub fn leave_info_box(&mut self, moved_onto: Option<NodeRef>) {
        hover::on_overlay_leave(&mut self.state, moved_onto);
    }

    pub fn jump_to_corresponding_node(
        &mut self,
        source_tab: Tab,
        node: NodeRef,
    ) -> NavigationOutcome {
        navigator::jump_to_corresponding_node(
            &mut self.state,
            &self.registry,
            &self.correspondence,
            source_tab,
            node,
        )
    }

    pub fn jump_to_callee(&mut self, node: CfaNodeId) -> NavigationOutcome {
        navigator::jump_to_callee(&mut self.state, &self.registry, node)
    }

    pub fn activate(&mut self, node: NodeRef) -> NavigationOutcome {
        navigator::activate(
            &mut self.state,
            &self.registry,
            &self.correspondence,
            node,
        )
    }

    pub fn dismiss_highlight(&mut self) -> bool {
        navigator::dismiss_highlight(&mut self.state)
    }

    pub fn info_box(&self) -> Option<InfoBox> {
        hover::info_box(&self.state, &self.registry, self.config())
    }

    pub fn snapshot(&self) -> Snapshot {
        render::snapshot(&self.state, &self.registry, self.config())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ArgNodeId;
    use crate::report::tests::SAMPLE;

    #[test]
    fn test_viewer_from_json() {
        let viewer = Viewer::from_json(SAMPLE).unwrap();
        assert_eq!(viewer.state().active_tab(), Tab::Cfa);
        assert_eq!(viewer.function_options().len(), 2);
        assert_eq!(viewer.arg_options().len(), 4);
    }

    #[test]
    fn test_viewer_rejects_invalid_report() {
        let mut report = Report::from_json(SAMPLE).unwrap();
        report.functions.clear();
        assert!(matches!(
            Viewer::new(report),
            Err(ReportError::NoFunctions)
        ));
    }

    #[test]
    fn test_round_trip_restores_arg_visibility() {
        let mut viewer = Viewer::from_json(SAMPLE).unwrap();
        viewer.select_tab(Tab::Arg);
        viewer.select_arg_option(3).unwrap();
        let before = viewer.snapshot().displayed().join(",");

        viewer.select_tab(Tab::Cfa);
        viewer.select_tab(Tab::Arg);
        assert_eq!(viewer.snapshot().displayed().join(","), before);
    }

    #[test]
    fn test_highlight_survives_hover() {
        let mut viewer = Viewer::from_json(SAMPLE).unwrap();
        viewer.activate(NodeRef::Cfa(CfaNodeId(1)));
        let target = NodeRef::Arg(ArgNodeId(0));
        assert_eq!(viewer.state().highlighted_node(), Some(target));

        viewer.hover(target, Point::default());
        viewer.unhover(target, false);
        assert_eq!(viewer.state().highlighted_node(), Some(target));
    }
}
