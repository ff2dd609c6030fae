use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanviewError {
    #[error("CLICKUP_API_TOKEN is not set")]
    MissingToken,

    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },

    #[error("{method} {path} failed with status {status}: {body}")]
    Service {
        method: String,
        path: String,
        status: u16,
        body: String,
    },

    #[error("view folder '{0}' is the source folder; customer views need a folder of their own")]
    ViewFolderIsSource(String),

    #[error("no customers found: nothing to select")]
    EmptyCatalog,

    #[error("invalid selection {index}: expected a number between 1 and {len}")]
    InvalidSelection { index: usize, len: usize },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl PlanviewError {
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        PlanviewError::NotFound {
            kind,
            name: name.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlanviewError>;
