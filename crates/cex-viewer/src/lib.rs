pub mod actions;
pub mod effects;
pub mod error;
pub mod graph_view;
pub mod layout_fixed;
pub mod node_shapes;
pub mod page;
pub mod settings;
pub mod state;
pub mod store;

#[cfg(not(target_arch = "wasm32"))]
pub mod app;
pub mod native;
pub mod web;

pub use error::ViewerError;

/// Build the native app around an already populated store.
#[cfg(not(target_arch = "wasm32"))]
pub fn create_app(
    _cc: &eframe::CreationContext<'_>,
    store: store::Store,
) -> app::ViewerApp {
    app::ViewerApp::new(state::State::new(store))
}
