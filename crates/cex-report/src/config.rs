use serde::{Deserialize, Serialize};

use crate::ids::{Point, Tab};

/// Viewer options carried in the report's optional `viewer` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Tab shown when the report is opened
    pub initial_tab: Tab,
    /// Distance between the hover anchor and the info box corner
    pub info_box_offset: Point,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            initial_tab: Tab::Cfa,
            info_box_offset: Point::new(12.0, 12.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config: ViewerConfig =
            serde_json::from_str(r#"{ "initial_tab": "arg" }"#).unwrap();
        assert_eq!(config.initial_tab, Tab::Arg);
        assert_eq!(config.info_box_offset, Point::new(12.0, 12.0));
    }
}
