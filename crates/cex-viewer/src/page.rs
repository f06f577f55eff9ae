//! Inline style changes that bring a pre-rendered report page in line
//! with a snapshot. The browser binding only applies them.

use cex_report::{Snapshot, dom};

/// One inline style property to set, or to remove when `value` is
/// `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleChange {
    pub dom_id: String,
    pub property: &'static str,
    pub value: Option<String>,
}

impl StyleChange {
    fn display(dom_id: &str, visible: bool) -> Self {
        Self {
            dom_id: dom_id.to_string(),
            property: "display",
            // hidden elements get `none`, shown ones fall back to the
            // page stylesheet
            value: (!visible).then(|| String::from("none")),
        }
    }

    fn px(dom_id: &str, property: &'static str, value: f32) -> Self {
        Self {
            dom_id: dom_id.to_string(),
            property,
            value: Some(format!("{value}px")),
        }
    }
}

/// Style changes for every element the snapshot knows about: panels,
/// graph containers (HTML or SVG), and the info box with its position.
pub fn style_changes(snapshot: &Snapshot) -> Vec<StyleChange> {
    let mut changes: Vec<StyleChange> = snapshot
        .elements
        .iter()
        .map(|e| StyleChange::display(&e.dom_id, e.visible))
        .collect();
    if let Some(info) = &snapshot.info_box {
        changes.push(StyleChange::px(dom::INFO_BOX, "left", info.position.x));
        changes.push(StyleChange::px(dom::INFO_BOX, "top", info.position.y));
    }
    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use cex_report::{NodeRef, Point, Tab, Viewer};

    const SAMPLE: &str =
        include_str!("../../cex-report/tests/fixtures/counterexample.json");

    fn change<'a>(
        changes: &'a [StyleChange],
        dom_id: &str,
        property: &str,
    ) -> Option<&'a StyleChange> {
        changes
            .iter()
            .find(|c| c.dom_id == dom_id && c.property == property)
    }

    #[test]
    fn test_switching_renderings_hides_the_other_svg() {
        let mut viewer = Viewer::from_json(SAMPLE).unwrap();
        viewer.select_tab(Tab::Arg);
        viewer.select_arg_option(1).unwrap();
        viewer.select_arg_option(0).unwrap();

        let changes = style_changes(&viewer.snapshot());
        let full = change(&changes, "arg-svgarg-error-graph0", "display");
        assert_eq!(full.unwrap().value.as_deref(), Some("none"));
        let collapsed = change(&changes, "arg-graph0", "display");
        assert_eq!(collapsed.unwrap().value, None);

        // every CFA function svg is styled, not only the shown one
        let callee = change(&changes, "cfa-svg-__Main1", "display");
        assert_eq!(callee.unwrap().value.as_deref(), Some("none"));
    }

    #[test]
    fn test_info_box_is_positioned_when_shown() {
        let mut viewer = Viewer::from_json(SAMPLE).unwrap();
        let changes = style_changes(&viewer.snapshot());
        let hidden = change(&changes, dom::INFO_BOX, "display");
        assert_eq!(hidden.unwrap().value.as_deref(), Some("none"));
        assert!(change(&changes, dom::INFO_BOX, "left").is_none());

        let node = NodeRef::Cfa(cex_report::CfaNodeId(1));
        viewer.hover(node, Point::new(100.0, 40.0));
        let changes = style_changes(&viewer.snapshot());
        let shown = change(&changes, dom::INFO_BOX, "display");
        assert_eq!(shown.unwrap().value, None);
        assert_eq!(
            change(&changes, dom::INFO_BOX, "left").unwrap().value.as_deref(),
            Some("112px")
        );
        assert_eq!(
            change(&changes, dom::INFO_BOX, "top").unwrap().value.as_deref(),
            Some("52px")
        );
    }
}
