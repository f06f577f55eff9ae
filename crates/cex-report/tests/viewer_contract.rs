//! Drives the viewer the way the report page's end-to-end script does,
//! checking element visibility by DOM id.

use cex_report::dom::{self, INFO_BOX};
use cex_report::{
    ArgNodeId, CfaNodeId, NavigationOutcome, NodeRef, Point, Tab, Viewer,
};

const REPORT: &str = include_str!("fixtures/counterexample.json");

fn open_report() -> Viewer {
    Viewer::from_json(REPORT).expect("fixture report is valid")
}

fn click_tab(viewer: &mut Viewer, selector: &str) {
    let tab = dom::tab_from_selector_id(selector).expect("known tab");
    viewer.select_tab(tab);
}

#[test]
fn error_graph_option_shows_full_path() {
    let mut viewer = open_report();
    click_tab(&mut viewer, "set-tab-2");

    viewer.select_arg_option(1).unwrap();
    let snapshot = viewer.snapshot();
    assert!(snapshot.is_displayed("arg-svgarg-error-graph0"));
    assert!(!snapshot.is_displayed("arg-graph0"));

    // selecting it twice changes nothing
    viewer.select_arg_option(1).unwrap();
    assert_eq!(viewer.snapshot(), snapshot);
}

#[test]
fn collapsed_option_shows_arg_graph() {
    let mut viewer = open_report();
    click_tab(&mut viewer, "set-tab-2");

    viewer.select_arg_option(1).unwrap();
    viewer.select_arg_option(0).unwrap();
    let snapshot = viewer.snapshot();
    assert!(snapshot.is_displayed("arg-graph0"));
    assert!(!snapshot.is_displayed("arg-svgarg-error-graph0"));
}

#[test]
fn hovering_arg_node_shows_info_box() {
    let mut viewer = open_report();
    click_tab(&mut viewer, "set-tab-2");

    let (node, _) = dom::parse_node_element_id("arg-node0").unwrap();
    assert!(viewer.hover(node, Point::new(40.0, 40.0)));
    assert!(viewer.snapshot().is_displayed(INFO_BOX));

    let info = viewer.info_box().unwrap();
    assert_eq!(info.title, "0 @ N1");
    assert_eq!(info.rows[0].value, "N1");
    assert_eq!(info.rows[1].value, "x = ?");

    viewer.unhover(node, false);
    assert!(!viewer.snapshot().is_displayed(INFO_BOX));
}

#[test]
fn hovering_full_path_node_shows_its_own_rows() {
    let mut viewer = open_report();
    click_tab(&mut viewer, "set-tab-2");
    viewer.select_arg_option(1).unwrap();

    let (node, _) = dom::parse_node_element_id("arg-error-node0").unwrap();
    assert!(viewer.hover(node, Point::default()));
    let info = viewer.info_box().unwrap();
    assert_eq!(info.rows.len(), 2);
    assert_eq!(info.rows[1].key, "state");
    assert_eq!(info.rows[1].value, "x = 5");
}

#[test]
fn hovering_second_node_replaces_info_box() {
    let mut viewer = open_report();
    let first = NodeRef::Cfa(CfaNodeId(1));
    let second = NodeRef::Cfa(CfaNodeId(4));

    viewer.hover(first, Point::default());
    viewer.hover(second, Point::default());
    viewer.unhover(first, false);

    let snapshot = viewer.snapshot();
    assert!(snapshot.is_displayed(INFO_BOX));
    assert_eq!(snapshot.info_box.unwrap().node, second);
}

#[test]
fn tab_switch_hides_info_box() {
    let mut viewer = open_report();
    viewer.hover(NodeRef::Cfa(CfaNodeId(2)), Point::default());
    click_tab(&mut viewer, "set-tab-2");
    assert!(!viewer.snapshot().is_displayed(INFO_BOX));
}

#[test]
fn double_click_on_call_node_opens_callee() {
    let mut viewer = open_report();
    let snapshot = viewer.snapshot();
    assert!(snapshot.is_displayed("cfa-svg-main0"));
    assert!(!snapshot.is_displayed("cfa-svg-__Main1"));

    let (node, _) = dom::parse_node_element_id("cfa-node100001").unwrap();
    viewer.activate(node);

    let snapshot = viewer.snapshot();
    assert!(!snapshot.is_displayed("cfa-svg-main0"));
    assert!(snapshot.is_displayed("cfa-svg-__Main1"));
    let highlight = snapshot.highlight.as_ref().unwrap();
    assert_eq!(highlight.dom_id, "cfa-node10");
    assert!(snapshot.is_displayed(&highlight.dom_id));
}

#[test]
fn double_click_jumps_between_graphs() {
    let mut viewer = open_report();

    let outcome = viewer.activate(NodeRef::Cfa(CfaNodeId(4)));
    assert_eq!(
        outcome,
        NavigationOutcome::Jumped {
            tab: Tab::Arg,
            target: NodeRef::Arg(ArgNodeId(5))
        }
    );
    let snapshot = viewer.snapshot();
    assert!(snapshot.is_displayed("arg-container"));
    assert!(!snapshot.is_displayed("cfa-container"));
    assert!(snapshot.is_displayed("arg-node5"));
    assert_eq!(snapshot.highlight.unwrap().dom_id, "arg-node5");

    let outcome = viewer.activate(NodeRef::Arg(ArgNodeId(5)));
    assert_eq!(outcome.target(), Some(NodeRef::Cfa(CfaNodeId(4))));
    assert!(viewer.snapshot().is_displayed("cfa-node4"));
}

#[test]
fn jump_without_counterpart_keeps_view() {
    let mut viewer = open_report();
    let before = viewer.snapshot();
    let outcome = viewer.jump_to_corresponding_node(
        Tab::Cfa,
        NodeRef::Cfa(CfaNodeId(100001)),
    );
    assert_eq!(outcome, NavigationOutcome::NoCorrespondingNode);
    assert_eq!(viewer.snapshot(), before);
}

#[test]
fn embedded_report_page_loads() {
    let html = format!(
        "<!DOCTYPE html><html><body>\
         <script id=\"{}\" type=\"application/json\">{}</script>\
         </body></html>",
        dom::REPORT_DATA,
        REPORT
    );
    let viewer = Viewer::from_html(&html).unwrap();
    assert_eq!(viewer.registry().targets().len(), 6);
}

#[test]
fn out_of_range_option_is_rejected() {
    let mut viewer = open_report();
    let before = viewer.snapshot();
    assert!(viewer.select_arg_option(9).is_err());
    assert!(
        viewer
            .select_error_path(cex_report::DisplayMode::Collapsed, 2)
            .is_err()
    );
    assert_eq!(viewer.snapshot(), before);
}
