//! Interactive model of a counterexample report: a control-flow
//! automaton per function and the abstract reachability graph of each
//! error path, linked node to node.

pub mod config;
pub mod correspondence;
pub mod dom;
pub mod error;
pub mod error_path;
pub mod functions;
pub mod hover;
pub mod ids;
pub mod navigator;
pub mod registry;
pub mod render;
pub mod report;
pub mod state;
pub mod tabs;
pub mod viewer;

pub use config::ViewerConfig;
pub use correspondence::NodeCorrespondence;
pub use error::{ReportError, SelectionError};
pub use error_path::DropdownOption;
pub use hover::InfoBox;
pub use ids::{
    ArgNodeId, ArgView, CfaNodeId, DisplayMode, FunctionIndex, GraphKey,
    NodeRef, Point, Tab,
};
pub use navigator::NavigationOutcome;
pub use registry::{GraphRegistry, RenderTarget};
pub use render::Snapshot;
pub use report::Report;
pub use state::{Navigation, ViewerState};
pub use viewer::Viewer;
