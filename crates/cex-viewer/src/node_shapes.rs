use eframe::egui::{
    Color32, FontFamily, FontId, Pos2, Shape, Stroke, Vec2,
    epaint::{CircleShape, TextShape},
};
use egui_graphs::{DisplayNode, DrawContext, NodeProps};
use petgraph::{EdgeType, stable_graph::IndexType};

use crate::settings::ViewerSettings;

const LABEL_GAP: f32 = 4.0;
const LABEL_FONT: f32 = 13.0;

/// Circle with its label underneath. Selection marks the navigation
/// highlight, so it gets the configured highlight stroke.
#[derive(Clone, Debug)]
pub struct ReportNodeShape {
    pos: Pos2,
    selected: bool,
    dragged: bool,
    hovered: bool,
    color: Option<Color32>,
    label_text: String,
    pub radius: f32,
    pub labels_always: bool,
    pub highlight: Stroke,
}

impl<N: Clone> From<NodeProps<N>> for ReportNodeShape {
    fn from(props: NodeProps<N>) -> Self {
        let defaults = ViewerSettings::default();
        let mut shape = Self {
            pos: props.location(),
            selected: props.selected,
            dragged: props.dragged,
            hovered: props.hovered,
            color: props.color(),
            label_text: props.label,
            radius: 0.0,
            labels_always: true,
            highlight: Stroke::NONE,
        };
        shape.apply_settings(&defaults);
        shape
    }
}

impl<N: Clone, E: Clone, Ty: EdgeType, Ix: IndexType>
    DisplayNode<N, E, Ty, Ix> for ReportNodeShape
{
    fn closest_boundary_point(&self, dir: Vec2) -> Pos2 {
        self.pos + dir.normalized() * self.radius
    }

    fn shapes(&mut self, ctx: &DrawContext) -> Vec<Shape> {
        let mut res = Vec::with_capacity(2);
        let center_screen = ctx.meta.canvas_to_screen_pos(self.pos);
        let radius_screen = ctx.meta.canvas_to_screen_size(self.radius);
        let color = self.effective_color(ctx);

        res.push(
            CircleShape {
                center: center_screen,
                radius: radius_screen,
                fill: color,
                stroke: self.effective_stroke(),
            }
            .into(),
        );

        if !(self.labels_always || self.hovered || self.selected) {
            return res;
        }

        let galley = ctx.ctx.fonts_mut(|f| {
            f.layout_no_wrap(
                self.label_text.clone(),
                FontId::new(LABEL_FONT, FontFamily::Monospace),
                color,
            )
        });
        let gap = ctx.meta.canvas_to_screen_size(LABEL_GAP);
        let label_pos = Pos2::new(
            center_screen.x - galley.size().x / 2.0,
            center_screen.y + radius_screen + gap,
        );
        res.push(TextShape::new(label_pos, galley, color).into());
        res
    }

    fn update(&mut self, state: &NodeProps<N>) {
        self.pos = state.location();
        self.selected = state.selected;
        self.dragged = state.dragged;
        self.hovered = state.hovered;
        self.color = state.color();
        self.label_text = state.label.clone();
    }

    fn is_inside(&self, pos: Pos2) -> bool {
        (pos - self.pos).length() <= self.radius
    }
}

impl ReportNodeShape {
    pub fn apply_settings(&mut self, settings: &ViewerSettings) {
        let [r, g, b] = settings.highlight_color;
        self.radius = settings.node_radius;
        self.labels_always = settings.show_labels;
        self.highlight = Stroke::new(
            settings.highlight_stroke,
            Color32::from_rgb(r, g, b),
        );
    }

    fn effective_color(&self, ctx: &DrawContext) -> Color32 {
        if let Some(c) = self.color {
            return c;
        }
        let visuals = if self.dragged || self.hovered {
            ctx.ctx.style().visuals.widgets.active
        } else {
            ctx.ctx.style().visuals.widgets.inactive
        };
        visuals.fg_stroke.color
    }

    fn effective_stroke(&self) -> Stroke {
        if self.selected {
            self.highlight
        } else {
            Stroke::new(1.5, Color32::from_rgb(80, 80, 80))
        }
    }
}
