use std::collections::HashMap;
use std::path::{Path, PathBuf};

use cex_report::{GraphKey, NodeRef, Viewer};

use crate::error::ViewerError;
use crate::graph_view::{GraphDisplay, build_displays};
use crate::settings::ViewerSettings;

/// Everything the reducer mutates.
pub struct Store {
    pub viewer: Option<Viewer>,
    pub displays: HashMap<GraphKey, GraphDisplay>,
    pub settings: ViewerSettings,
    pub report_path: Option<PathBuf>,
    /// The shown graph changed and its view must be refitted
    pub layout_reset_needed: bool,
    /// Node a navigation asked to bring into view
    pub pending_focus: Option<NodeRef>,
    pub show_settings: bool,
    pub error_message: Option<String>,
}

impl Store {
    pub fn new(settings: ViewerSettings) -> Self {
        Self {
            viewer: None,
            displays: HashMap::new(),
            settings,
            report_path: None,
            layout_reset_needed: false,
            pending_focus: None,
            show_settings: false,
            error_message: None,
        }
    }

    pub fn with_viewer(viewer: Viewer, settings: ViewerSettings) -> Self {
        let mut store = Self::new(settings);
        store.set_viewer(viewer);
        store
    }

    /// Store for a front end that draws nothing itself and only
    /// restyles a pre-rendered page, so no graph displays are built.
    pub fn for_page(viewer: Viewer, settings: ViewerSettings) -> Self {
        let mut store = Self::new(settings);
        store.viewer = Some(viewer);
        store
    }

    pub fn set_viewer(&mut self, viewer: Viewer) {
        self.displays = build_displays(viewer.report(), &self.settings);
        self.viewer = Some(viewer);
        self.layout_reset_needed = true;
        self.pending_focus = None;
        self.sync_highlight();
    }

    pub fn load_report(&mut self, path: &Path) -> Result<(), ViewerError> {
        let viewer = Viewer::load_from_file(path)?;
        self.set_viewer(viewer);
        self.report_path = Some(path.to_path_buf());
        Ok(())
    }

    pub fn shown_graph(&self) -> Option<GraphKey> {
        self.viewer.as_ref()?.state().shown_graph()
    }

    pub fn shown_display(&self) -> Option<&GraphDisplay> {
        self.displays.get(&self.shown_graph()?)
    }

    pub fn shown_display_mut(&mut self) -> Option<&mut GraphDisplay> {
        let key = self.shown_graph()?;
        self.displays.get_mut(&key)
    }

    /// Mirror the viewer's highlight onto node selection in every
    /// display.
    pub fn sync_highlight(&mut self) {
        let snapshot = self.viewer.as_ref().map(|v| v.snapshot());
        let highlight = snapshot
            .as_ref()
            .and_then(|s| s.highlight.as_ref())
            .map(|h| h.node);
        let visible = snapshot.map(|s| s.visible_graphs).unwrap_or_default();
        for (key, display) in self.displays.iter_mut() {
            let node = highlight.filter(|_| visible.contains(key));
            display.set_highlight(node);
        }
    }

    pub fn apply_settings(&mut self) {
        for display in self.displays.values_mut() {
            display.apply_settings(&self.settings);
        }
    }
}
