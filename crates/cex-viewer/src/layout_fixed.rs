use eframe::egui;
use egui_graphs::{
    DisplayEdge, DisplayNode, Graph, Layout, LayoutState,
};
use petgraph::EdgeType;
use petgraph::graph::IndexType;
use serde::{Deserialize, Serialize};

/// Node positions come from the report, so there is nothing to keep
/// between frames.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutStateFixed;

impl LayoutState for LayoutStateFixed {}

/// Layout that leaves every node where the report put it.
#[derive(Debug, Clone, Default)]
pub struct LayoutFixed {
    state: LayoutStateFixed,
}

impl Layout<LayoutStateFixed> for LayoutFixed {
    fn from_state(state: LayoutStateFixed) -> impl Layout<LayoutStateFixed> {
        Self { state }
    }

    fn next<N, E, Ty, Ix, Dn, De>(
        &mut self,
        _g: &mut Graph<N, E, Ty, Ix, Dn, De>,
        _ui: &egui::Ui,
    ) where
        N: Clone,
        E: Clone,
        Ty: EdgeType,
        Ix: IndexType,
        Dn: DisplayNode<N, E, Ty, Ix>,
        De: DisplayEdge<N, E, Ty, Ix, Dn>,
    {
    }

    fn state(&self) -> LayoutStateFixed {
        self.state.clone()
    }
}
