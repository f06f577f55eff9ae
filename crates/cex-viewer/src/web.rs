#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use cex_report::render::Snapshot;
use cex_report::{GraphKey, NodeRef, Point, Tab, Viewer, dom};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CssStyleDeclaration, Document, Element, Event, EventTarget, HtmlElement,
    HtmlSelectElement, KeyboardEvent, MouseEvent, SvgElement,
};

use crate::actions::Action;
use crate::error::ViewerError;
use crate::page::{self, StyleChange};
use crate::settings::ViewerSettings;
use crate::state::State;
use crate::store::Store;

type Shared = Rc<RefCell<State>>;

const NODE_SELECTOR: &str =
    "[id^='cfa-node'], [id^='arg-node'], [id^='arg-error-node']";

impl From<ViewerError> for JsValue {
    fn from(e: ViewerError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

fn js_error(e: JsValue) -> ViewerError {
    ViewerError::Dom(format!("{e:?}"))
}

/// Attach the viewer to the pre-rendered report page.
#[wasm_bindgen]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let document = web_sys::window()
        .ok_or("No window")?
        .document()
        .ok_or("No document")?;

    bind(&document)?;
    Ok(())
}

fn bind(document: &Document) -> Result<(), ViewerError> {
    let json = element(document, dom::REPORT_DATA)?
        .text_content()
        .unwrap_or_default();
    let viewer = Viewer::from_json(&json)?;
    let shared: Shared = Rc::new(RefCell::new(State::new(
        Store::for_page(viewer, ViewerSettings::default()),
    )));

    bind_tabs(document, &shared)?;
    bind_dropdowns(document, &shared)?;
    bind_nodes(document, &shared)?;
    bind_info_box(document, &shared)?;

    listen(document, "keydown", &shared, document, |event| {
        let escape = event
            .dyn_ref::<KeyboardEvent>()
            .is_some_and(|k| k.key() == "Escape");
        if escape {
            vec![Action::DismissHighlight]
        } else {
            vec![]
        }
    })?;

    let mut state = shared.borrow_mut();
    render(document, &mut state)
}

fn bind_tabs(document: &Document, shared: &Shared) -> Result<(), ViewerError> {
    for tab in Tab::ALL {
        let selector = element(document, &dom::tab_selector_id(tab))?;
        listen(&selector, "click", shared, document, move |_| {
            vec![Action::SelectTab { tab }]
        })?;
    }
    Ok(())
}

fn bind_dropdowns(
    document: &Document,
    shared: &Shared,
) -> Result<(), ViewerError> {
    let (arg_labels, function_labels) = {
        let state = shared.borrow();
        let viewer = state.store.viewer.as_ref();
        let arg = viewer
            .map(|v| v.arg_options().into_iter().map(|o| o.label).collect())
            .unwrap_or_default();
        let functions =
            viewer.map(|v| v.function_options()).unwrap_or_default();
        (arg, functions)
    };

    if let Some(select) = toolbar_select(document, dom::ARG_TOOLBAR) {
        fill_options(document, &select, &arg_labels)?;
        listen(&select, "change", shared, document, |event| {
            selected_index(event)
                .map(|option| Action::SelectErrorPathOption { option })
                .into_iter()
                .collect()
        })?;
    }
    if let Some(select) = toolbar_select(document, dom::CFA_TOOLBAR) {
        fill_options(document, &select, &function_labels)?;
        listen(&select, "change", shared, document, |event| {
            selected_index(event)
                .map(|index| Action::SelectFunction { index })
                .into_iter()
                .collect()
        })?;
    }
    Ok(())
}

fn bind_nodes(document: &Document, shared: &Shared) -> Result<(), ViewerError> {
    let targets: Vec<(String, Vec<(NodeRef, String)>)> = {
        let state = shared.borrow();
        let Some(viewer) = state.store.viewer.as_ref() else {
            return Ok(());
        };
        viewer
            .registry()
            .targets()
            .iter()
            .map(|target| {
                let mode = match target.key {
                    GraphKey::Arg(view) => view.mode,
                    GraphKey::Cfa(_) => Default::default(),
                };
                let nodes = target
                    .nodes()
                    .map(|n| (n, dom::node_element_id(n, mode)))
                    .collect();
                (target.dom_id.clone(), nodes)
            })
            .collect()
    };
    let info_box = element(document, dom::INFO_BOX)?;

    for (graph_id, nodes) in targets {
        let container = element(document, &graph_id)?;
        for (node, node_id) in nodes {
            let Some(node_element) = container
                .query_selector(&format!("#{node_id}"))
                .map_err(js_error)?
            else {
                continue;
            };

            listen(&node_element, "mouseenter", shared, document, move |e| {
                let Some(mouse) = e.dyn_ref::<MouseEvent>() else {
                    return vec![];
                };
                let anchor =
                    Point::new(mouse.page_x() as f32, mouse.page_y() as f32);
                vec![Action::HoverNode { node, anchor }]
            })?;

            let overlay = info_box.clone();
            listen(&node_element, "mouseleave", shared, document, move |e| {
                let related = e
                    .dyn_ref::<MouseEvent>()
                    .and_then(|m| m.related_target())
                    .and_then(|t| t.dyn_into::<web_sys::Node>().ok());
                let moved_onto_overlay = overlay.contains(related.as_ref());
                vec![Action::UnhoverNode {
                    node,
                    moved_onto_overlay,
                }]
            })?;

            listen(&node_element, "dblclick", shared, document, move |_| {
                vec![Action::ActivateNode { node }]
            })?;
        }
    }
    Ok(())
}

fn bind_info_box(
    document: &Document,
    shared: &Shared,
) -> Result<(), ViewerError> {
    let info_box = element(document, dom::INFO_BOX)?;
    listen(&info_box, "mouseenter", shared, document, |_| {
        vec![Action::EnterInfoBox]
    })?;
    listen(&info_box, "mouseleave", shared, document, |e| {
        let moved_onto = e
            .dyn_ref::<MouseEvent>()
            .and_then(|m| m.related_target())
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest(NODE_SELECTOR).ok().flatten())
            .and_then(|el| dom::parse_node_element_id(&el.id()))
            .map(|(node, _)| node);
        vec![Action::LeaveInfoBox { moved_onto }]
    })?;
    Ok(())
}

/// Register `handler` for `name` events on `target`. Its actions are
/// applied and the page re-rendered before the handler returns.
fn listen<F>(
    target: &EventTarget,
    name: &str,
    shared: &Shared,
    document: &Document,
    handler: F,
) -> Result<(), ViewerError>
where
    F: Fn(&Event) -> Vec<Action> + 'static,
{
    let shared = Rc::clone(shared);
    let document = document.clone();
    let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let actions = handler(&event);
        if actions.is_empty() {
            return;
        }
        let Ok(mut state) = shared.try_borrow_mut() else {
            return;
        };
        for action in actions {
            state.dispatch(action);
        }
        state.flush();
        if let Err(e) = render(&document, &mut state) {
            web_sys::console::error_1(&e.to_string().into());
        }
    });
    target
        .add_event_listener_with_callback(
            name,
            closure.as_ref().unchecked_ref(),
        )
        .map_err(js_error)?;
    closure.forget();
    Ok(())
}

// ------------------------------------------------------------------
// Rendering
// ------------------------------------------------------------------

/// Apply the current snapshot to the page.
fn render(document: &Document, state: &mut State) -> Result<(), ViewerError> {
    let Some(snapshot) = state.store.viewer.as_ref().map(|v| v.snapshot())
    else {
        return Ok(());
    };

    render_info_box(document, &snapshot)?;
    for change in page::style_changes(&snapshot) {
        if let Some(el) = document.get_element_by_id(&change.dom_id) {
            apply_style(&el, &change)?;
        }
    }
    let highlighted = render_highlight(document, &snapshot)?;

    if let Some(select) = toolbar_select(document, dom::ARG_TOOLBAR) {
        select.set_selected_index(to_index(snapshot.selected_arg_option));
    }
    if let Some(select) = toolbar_select(document, dom::CFA_TOOLBAR) {
        select.set_selected_index(to_index(
            snapshot.selected_function.map(|f| f.0),
        ));
    }

    if state.store.pending_focus.take().is_some()
        && let Some(el) = highlighted
    {
        el.scroll_into_view();
    }
    Ok(())
}

fn render_info_box(
    document: &Document,
    snapshot: &Snapshot,
) -> Result<(), ViewerError> {
    let Some(info) = &snapshot.info_box else {
        return Ok(());
    };
    let info_box = element(document, dom::INFO_BOX)?;

    info_box.set_inner_html("");
    let title = document.create_element("strong").map_err(js_error)?;
    title.set_text_content(Some(info.title.as_str()));
    info_box.append_child(&title).map_err(js_error)?;

    if !info.rows.is_empty() {
        let table = document.create_element("table").map_err(js_error)?;
        for row in &info.rows {
            let tr = document.create_element("tr").map_err(js_error)?;
            for text in [row.key.as_str(), row.value.as_str()] {
                let td = document.create_element("td").map_err(js_error)?;
                td.set_text_content(Some(text));
                tr.append_child(&td).map_err(js_error)?;
            }
            table.append_child(&tr).map_err(js_error)?;
        }
        info_box.append_child(&table).map_err(js_error)?;
    }
    Ok(())
}

/// Move the highlight class onto the snapshot's node. Returns the
/// highlighted element, if it exists on the page.
fn render_highlight(
    document: &Document,
    snapshot: &Snapshot,
) -> Result<Option<Element>, ViewerError> {
    let stale = document
        .query_selector_all(&format!(".{}", dom::HIGHLIGHT_CLASS))
        .map_err(js_error)?;
    for i in 0..stale.length() {
        let item = stale.item(i).and_then(|n| n.dyn_into::<Element>().ok());
        if let Some(el) = item {
            el.class_list()
                .remove_1(dom::HIGHLIGHT_CLASS)
                .map_err(js_error)?;
        }
    }

    let Some(highlight) = &snapshot.highlight else {
        return Ok(None);
    };
    let Some(container) = document.get_element_by_id(&highlight.graph_dom_id)
    else {
        return Ok(None);
    };
    let target = container
        .query_selector(&format!("#{}", highlight.dom_id))
        .map_err(js_error)?;
    if let Some(el) = &target {
        el.class_list()
            .add_1(dom::HIGHLIGHT_CLASS)
            .map_err(js_error)?;
    }
    Ok(target)
}

// ------------------------------------------------------------------
// DOM helpers
// ------------------------------------------------------------------

fn element(document: &Document, id: &str) -> Result<Element, ViewerError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| ViewerError::MissingElement(id.to_string()))
}

fn toolbar_select(
    document: &Document,
    toolbar: &str,
) -> Option<HtmlSelectElement> {
    document
        .query_selector(&format!("#{toolbar} select"))
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
}

/// Populate an empty dropdown; pages that ship their own options keep
/// them.
fn fill_options(
    document: &Document,
    select: &HtmlSelectElement,
    labels: &[String],
) -> Result<(), ViewerError> {
    if select.length() > 0 {
        return Ok(());
    }
    for label in labels {
        let option = document.create_element("option").map_err(js_error)?;
        option.set_text_content(Some(label.as_str()));
        select.append_child(&option).map_err(js_error)?;
    }
    Ok(())
}

fn selected_index(event: &Event) -> Option<usize> {
    let select = event
        .target()
        .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())?;
    usize::try_from(select.selected_index()).ok()
}

fn to_index(index: Option<usize>) -> i32 {
    index.and_then(|i| i32::try_from(i).ok()).unwrap_or(-1)
}

/// Inline style of an HTML or SVG element; graph containers are
/// usually `<svg>`.
fn inline_style(el: &Element) -> Result<CssStyleDeclaration, ViewerError> {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        return Ok(html.style());
    }
    if let Some(svg) = el.dyn_ref::<SvgElement>() {
        return Ok(svg.style());
    }
    Err(ViewerError::Dom(format!(
        "element `{}` has no inline style",
        el.id()
    )))
}

fn apply_style(el: &Element, change: &StyleChange) -> Result<(), ViewerError> {
    let style = inline_style(el)?;
    match &change.value {
        Some(value) => style
            .set_property(change.property, value)
            .map_err(js_error)?,
        None => {
            style.remove_property(change.property).map_err(js_error)?;
        }
    }
    Ok(())
}
