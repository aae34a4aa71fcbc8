use thiserror::Error;

use crate::model::{CatalogError, LessonError, QuestionError, SlugError, TextError};
use crate::navigator::NavigatorError;
use crate::quiz::QuizError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Lesson(#[from] LessonError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Slug(#[from] SlugError),
    #[error(transparent)]
    Text(#[from] TextError),
    #[error(transparent)]
    Navigator(#[from] NavigatorError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
}
