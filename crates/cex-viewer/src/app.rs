use cex_report::state::Hover;
use cex_report::{DisplayMode, GraphKey, NodeRef, Point, Tab, dom};
use eframe::egui;
use egui_graphs::{
    SettingsInteraction, SettingsNavigation, SettingsStyle, reset_layout,
};
use std::path::PathBuf;

use crate::actions::Action;
use crate::graph_view::ReportGraphView;
use crate::layout_fixed::LayoutStateFixed;
use crate::settings::{
    FIT_PADDING_RANGE, HIGHLIGHT_STROKE_RANGE, NODE_RADIUS_RANGE,
    SETTINGS_FILE, SliderRange,
};
use crate::state::State;

pub struct ViewerApp {
    pub state: State,
    /// Where the info box was drawn last frame
    info_box_rect: Option<egui::Rect>,
}

impl ViewerApp {
    pub fn new(state: State) -> Self {
        Self {
            state,
            info_box_rect: None,
        }
    }

    fn render_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open report…").clicked() {
                        ui.close();
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Report", &["json", "html"])
                            .pick_file()
                        {
                            self.state.dispatch(Action::LoadReport { path });
                        }
                    }
                });
                ui.menu_button("View", |ui| {
                    let mut show = self.state.store.settings.show_labels;
                    if ui.checkbox(&mut show, "Show labels").changed() {
                        self.state.dispatch(Action::SetShowLabels { show });
                    }
                    if ui.button("Settings…").clicked() {
                        ui.close();
                        self.state
                            .dispatch(Action::SetShowSettings { show: true });
                    }
                    if ui.button("Clear highlight").clicked() {
                        ui.close();
                        self.state.dispatch(Action::DismissHighlight);
                    }
                });
            });
        });
    }

    fn render_toolbar(&mut self, ctx: &egui::Context) {
        let Some(viewer) = self.state.store.viewer.as_ref() else {
            return;
        };
        let active = viewer.state().active_tab();
        let function_options = viewer.function_options();
        let arg_options = viewer.arg_options();
        let snapshot = viewer.snapshot();

        let mut actions = Vec::new();
        egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let mut selected = active;
                for tab in Tab::ALL {
                    ui.selectable_value(&mut selected, tab, tab.title());
                }
                if selected != active {
                    actions.push(Action::SelectTab { tab: selected });
                }

                ui.separator();
                match active {
                    Tab::Cfa => {
                        let current =
                            snapshot.selected_function.map(|f| f.0);
                        let text = current
                            .and_then(|i| function_options.get(i))
                            .cloned()
                            .unwrap_or_default();
                        let mut chosen = current;
                        egui::ComboBox::from_id_salt(dom::CFA_TOOLBAR)
                            .selected_text(text)
                            .show_ui(ui, |ui| {
                                for (i, name) in
                                    function_options.iter().enumerate()
                                {
                                    ui.selectable_value(
                                        &mut chosen,
                                        Some(i),
                                        name,
                                    );
                                }
                            });
                        if chosen != current
                            && let Some(index) = chosen
                        {
                            actions.push(Action::SelectFunction { index });
                        }
                    }
                    Tab::Arg => {
                        let current = snapshot.selected_arg_option;
                        let text = current
                            .and_then(|i| arg_options.get(i))
                            .map(|o| o.label.clone())
                            .unwrap_or_default();
                        let mut chosen = current;
                        egui::ComboBox::from_id_salt(dom::ARG_TOOLBAR)
                            .selected_text(text)
                            .show_ui(ui, |ui| {
                                for (i, option) in
                                    arg_options.iter().enumerate()
                                {
                                    ui.selectable_value(
                                        &mut chosen,
                                        Some(i),
                                        &option.label,
                                    );
                                }
                            });
                        if chosen != current
                            && let Some(option) = chosen
                        {
                            actions.push(Action::SelectErrorPathOption {
                                option,
                            });
                        }
                    }
                }
            });
        });
        for action in actions {
            self.state.dispatch(action);
        }
    }

    fn render_graph(&mut self, ctx: &egui::Context) {
        let pointer = ctx.input(|i| i.pointer.hover_pos());
        let over_info_box = pointer
            .zip(self.info_box_rect)
            .is_some_and(|(p, rect)| rect.contains(p));

        egui::CentralPanel::default().show(ctx, |ui| {
            let store = &mut self.state.store;
            let Some(key) = store.shown_graph() else {
                ui.centered_and_justified(|ui| {
                    ui.label("No report loaded. Use File > Open report…");
                });
                return;
            };

            let reset = store.layout_reset_needed;
            let focus = store.pending_focus.is_some();
            if reset {
                reset_layout::<LayoutStateFixed>(ui, None);
            }

            let settings_interaction = SettingsInteraction::new()
                .with_dragging_enabled(false)
                .with_hover_enabled(true)
                .with_node_clicking_enabled(true);
            let settings_navigation = SettingsNavigation::new()
                .with_zoom_and_pan_enabled(true)
                .with_fit_to_screen_enabled(reset || focus)
                .with_fit_to_screen_padding(store.settings.fit_padding);
            let settings_style = SettingsStyle::new()
                .with_labels_always(store.settings.show_labels);

            let Some(display) = store.displays.get_mut(&key) else {
                return;
            };
            let response = ui.add(
                &mut ReportGraphView::new(&mut display.graph)
                    .with_interactions(&settings_interaction)
                    .with_navigations(&settings_navigation)
                    .with_styles(&settings_style),
            );
            let graph_hover = display.hovered();

            let current = store
                .viewer
                .as_ref()
                .and_then(|v| v.state().hover().copied());
            let mut actions = pointer_actions(
                graph_hover,
                current.as_ref(),
                pointer.map(|p| Point::new(p.x, p.y)),
                over_info_box,
            );
            if response.double_clicked()
                && let Some(node) = graph_hover
            {
                actions.push(Action::ActivateNode { node });
            }
            if reset {
                actions.push(Action::ClearLayoutResetFlag);
            }
            if focus {
                actions.push(Action::ClearPendingFocus);
            }
            for action in actions {
                self.state.dispatch(action);
            }
        });
    }

    fn render_info_box(&mut self, ctx: &egui::Context) {
        let info =
            self.state.store.viewer.as_ref().and_then(|v| v.info_box());
        let Some(info) = info else {
            self.info_box_rect = None;
            return;
        };
        let area = egui::Area::new(egui::Id::new(dom::INFO_BOX))
            .order(egui::Order::Foreground)
            .fixed_pos(egui::pos2(info.position.x, info.position.y))
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.strong(&info.title);
                    if info.rows.is_empty() {
                        return;
                    }
                    ui.separator();
                    egui::Grid::new("info_box_rows").show(ui, |ui| {
                        for row in &info.rows {
                            ui.label(&row.key);
                            ui.monospace(&row.value);
                            ui.end_row();
                        }
                    });
                });
            });
        self.info_box_rect = Some(area.response.rect);
    }

    fn render_status_bar(&mut self, ctx: &egui::Context) {
        let store = &self.state.store;
        let Some(viewer) = store.viewer.as_ref() else {
            return;
        };
        let shown = store
            .shown_graph()
            .and_then(|key| viewer.registry().get(key))
            .map(|target| target.title.clone())
            .unwrap_or_default();
        let mode = match viewer.state().display_mode() {
            DisplayMode::Collapsed => "collapsed",
            DisplayMode::FullErrorPath => "full error path",
        };
        let path = store
            .report_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(shown);
                if matches!(store.shown_graph(), Some(GraphKey::Arg(_))) {
                    ui.label(format!("({mode})"));
                }
                ui.separator();
                ui.weak(
                    "Double-click a node to jump to its counterpart. \
                     Esc clears the highlight.",
                );
                ui.with_layout(
                    egui::Layout::right_to_left(egui::Align::Center),
                    |ui| ui.weak(path),
                );
            });
        });
    }

    fn render_settings_window(&mut self, ctx: &egui::Context) {
        if !self.state.store.show_settings {
            return;
        }
        let mut settings = self.state.store.settings.clone();
        let mut open = true;
        let mut save = false;
        egui::Window::new("Settings")
            .open(&mut open)
            .resizable(false)
            .show(ctx, |ui| {
                slider(
                    ui,
                    &mut settings.node_radius,
                    NODE_RADIUS_RANGE,
                    "Node radius",
                );
                slider(
                    ui,
                    &mut settings.highlight_stroke,
                    HIGHLIGHT_STROKE_RANGE,
                    "Highlight width",
                );
                slider(
                    ui,
                    &mut settings.fit_padding,
                    FIT_PADDING_RANGE,
                    "Focus padding",
                );
                ui.checkbox(&mut settings.show_labels, "Show labels");
                ui.horizontal(|ui| {
                    ui.color_edit_button_srgb(&mut settings.highlight_color);
                    ui.label("Highlight colour");
                });
                ui.separator();
                save = ui.button("Save").clicked();
            });
        if settings != self.state.store.settings {
            self.state.dispatch(Action::UpdateSettings { settings });
        }
        if save {
            self.state.dispatch(Action::SaveSettings {
                path: PathBuf::from(SETTINGS_FILE),
            });
        }
        if !open {
            self.state.dispatch(Action::SetShowSettings { show: false });
        }
    }

    fn render_error_window(&mut self, ctx: &egui::Context) {
        if let Some(error) = self.state.store.error_message.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&error);
                    if ui.button("OK").clicked() {
                        self.state.dispatch(Action::ClearErrorMessage);
                    }
                });
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render_menu_bar(ctx);
        self.render_toolbar(ctx);
        self.render_status_bar(ctx);
        self.render_graph(ctx);
        self.render_info_box(ctx);
        self.render_settings_window(ctx);
        self.render_error_window(ctx);

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.state.dispatch(Action::DismissHighlight);
        }

        self.state.flush();
    }
}

fn slider(
    ui: &mut egui::Ui,
    value: &mut f32,
    range: SliderRange,
    text: &str,
) {
    ui.add(
        egui::Slider::new(value, range.min..=range.max)
            .step_by(range.step as f64)
            .text(text),
    );
}

/// Translate this frame's pointer state into hover actions.
pub(crate) fn pointer_actions(
    graph_hover: Option<NodeRef>,
    current: Option<&Hover>,
    pointer: Option<Point>,
    over_info_box: bool,
) -> Vec<Action> {
    match (graph_hover, current) {
        (Some(node), Some(hover)) if hover.node == node => {
            if hover.pointer_on_overlay {
                vec![Action::LeaveInfoBox {
                    moved_onto: Some(node),
                }]
            } else {
                vec![]
            }
        }
        (Some(node), _) => pointer
            .map(|anchor| Action::HoverNode { node, anchor })
            .into_iter()
            .collect(),
        (None, Some(hover)) if over_info_box => {
            if hover.pointer_on_overlay {
                vec![]
            } else {
                vec![Action::UnhoverNode {
                    node: hover.node,
                    moved_onto_overlay: true,
                }]
            }
        }
        (None, Some(hover)) => {
            if hover.pointer_on_overlay {
                vec![Action::LeaveInfoBox { moved_onto: None }]
            } else {
                vec![Action::UnhoverNode {
                    node: hover.node,
                    moved_onto_overlay: false,
                }]
            }
        }
        (None, None) => vec![],
    }
}
