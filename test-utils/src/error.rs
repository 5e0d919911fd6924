use thiserror::Error;

/// Errors that can occur while setting up a test environment.
#[derive(Error, Debug)]
pub enum TestError {
    /// Temp directory, file or socket operation failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Seed data could not be serialized.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
