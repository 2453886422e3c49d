use thiserror::Error;

use crate::model::{CodeError, CountryError};
use crate::quiz::QuizError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Code(#[from] CodeError),
    #[error(transparent)]
    Country(#[from] CountryError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
}
