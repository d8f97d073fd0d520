use thiserror::Error;

pub type HangarResult<T> = Result<T, HangarError>;

/// Failures at the I/O edges of the application.
///
/// The scheduling core (propagation, geometry, windowing) never fails; it
/// degrades instead. Only file, JSON and CSV handling report errors.
#[derive(Debug, Error)]
pub enum HangarError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("csv is missing required columns (found: {found:?}); need item and title columns")]
    MissingColumns { found: Vec<String> },

    #[error("no valid tasks found in csv ({skipped} rows skipped)")]
    NoTasks { skipped: usize },

    #[error("select a specific project before importing tasks")]
    NoActiveProject,

    #[error("unknown project: {0}")]
    UnknownProject(String),
}
