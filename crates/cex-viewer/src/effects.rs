use std::path::PathBuf;

use cex_report::NodeRef;

use crate::store::Store;

/// Deferred effects that must run outside the main reducer (e.g., file IO)
#[derive(Debug, Clone)]
pub enum Effect {
    /// Replace the open report with the one at `path`
    LoadReport { path: PathBuf },
    SaveSettings { path: PathBuf },
    /// Bring a freshly highlighted node into view
    FocusNode { node: NodeRef },
}

/// Execute a single effect against the store
pub fn run(store: &mut Store, effect: Effect) {
    match effect {
        Effect::LoadReport { path } => {
            if let Err(e) = store.load_report(&path) {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "load failed"
                );
                store.error_message = Some(e.to_string());
            }
        }
        Effect::SaveSettings { path } => {
            if let Err(e) = store.settings.save(&path) {
                store.error_message = Some(e.to_string());
            }
        }
        Effect::FocusNode { node } => {
            store.pending_focus = Some(node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ViewerSettings;

    #[test]
    fn test_failed_load_keeps_previous_state() {
        let mut store = Store::new(ViewerSettings::default());
        let path = std::env::temp_dir().join("cex_viewer_missing_report.json");
        run(&mut store, Effect::LoadReport { path });
        assert!(store.viewer.is_none());
        assert!(store.error_message.is_some());
    }

    #[test]
    fn test_load_report_from_file() {
        let temp_file =
            std::env::temp_dir().join("cex_viewer_load_test.json");
        std::fs::write(
            &temp_file,
            include_str!("../../cex-report/tests/fixtures/counterexample.json"),
        )
        .expect("write fixture");

        let mut store = Store::new(ViewerSettings::default());
        run(
            &mut store,
            Effect::LoadReport {
                path: temp_file.clone(),
            },
        );
        assert!(store.error_message.is_none());
        assert_eq!(store.displays.len(), 6);
        assert_eq!(store.report_path.as_deref(), Some(temp_file.as_path()));

        std::fs::remove_file(&temp_file).ok();
    }
}
