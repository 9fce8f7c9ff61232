use std::path::PathBuf;

use thiserror::Error;

/// Why an import document was rejected. Nothing is written when this is
/// returned.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("top-level value must be an object")]
    NotAnObject,
    #[error("missing or non-object \"caseInfo\"")]
    MissingCaseInfo,
    #[error("missing or non-array \"parameters\"")]
    MissingParameters,
    #[error("invalid parameter list: {0}")]
    InvalidParameters(String),
}

#[derive(Debug, Error)]
pub enum ParameterError {
    #[error("name is required")]
    EmptyName,
    #[error("at least one shade is required")]
    NoShades,
    #[error("parameter \"{0}\" already exists")]
    DuplicateName(String),
    #[error("parameter \"{0}\" not found")]
    NotFound(String),
    #[error("\"{0}\" is a default parameter and cannot be deleted")]
    DefaultProtected(String),
    #[error("shade index {index} is out of range for \"{id}\"")]
    PositionOutOfRange { id: String, index: usize },
}

#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("no translation file for \"{code}\" in {}", dir.display())]
    NotFound { code: &'static str, dir: PathBuf },
    #[error("failed to read translations: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON translations: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML translations: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
