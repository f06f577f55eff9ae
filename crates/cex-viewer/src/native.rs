#![cfg(not(target_arch = "wasm32"))]

use std::path::Path;

use crate::create_app;
use crate::settings::ViewerSettings;
use crate::store::Store;

/// Entry point used by the native executable.
pub fn run(report: &Path, settings: &Path) -> eframe::Result<()> {
    let mut store = Store::new(ViewerSettings::load_or_default(settings));
    if let Err(e) = store.load_report(report) {
        tracing::warn!(
            path = %report.display(),
            error = %e,
            "no report opened"
        );
        store.error_message =
            Some(format!("Could not open {}: {e}", report.display()));
    }

    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "Counterexample Viewer",
        native_options,
        Box::new(move |cc| Ok(Box::new(create_app(cc, store)))),
    )
}
