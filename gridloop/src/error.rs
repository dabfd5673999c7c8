// error.rs - Fatal start-up errors

use thiserror::Error;

/// Everything that makes a run end badly: start-up failures, or a
/// background task that died and took the group down with it.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to start the async runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("failed to create window: {0}")]
    Window(String),

    #[error("background task failed: {0}")]
    TaskFailed(String),
}

pub type Result<T> = std::result::Result<T, Error>;
