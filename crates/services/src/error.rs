//! Shared error types for the services crate.

use thiserror::Error;

use atlas_core::quiz::QuizError;
use source::repository::SourceError;

/// Errors emitted by `ExplorerService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExplorerError {
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Errors emitted by the guess-the-flag game.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GuessError {
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Source(#[from] SourceError),
}
