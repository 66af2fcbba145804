use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlantError {
    #[error("invalid plant: {0}")]
    Validation(String),

    #[error("plant not found: {0}")]
    NotFound(String),

    #[error("persistence failed: {0}")]
    Persistence(String),

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("not logged in: run 'plants login'")]
    NotAuthenticated,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlantError>;
