use cex_report::ReportError;

#[derive(thiserror::Error, Debug)]
pub enum ViewerError {
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("failed to access file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings: {0}")]
    Json(#[from] serde_json::Error),
    #[error("page element `{0}` not found")]
    MissingElement(String),
    #[error("browser call failed: {0}")]
    Dom(String),
}
