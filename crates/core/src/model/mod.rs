mod catalog;
mod completion;
mod ids;
mod lesson;
mod question;
mod slide;
mod slug;
mod text;

pub use catalog::{Catalog, CatalogError};
pub use completion::CompletionSet;
pub use ids::{LessonId, ParseIdError, QuestionId};
pub use lesson::{LessonDraft, LessonError, LessonMetadata};
pub use question::{MIN_OPTIONS, QuestionDraft, QuestionError, QuizQuestion, option_letter};
pub use slide::{Slide, SlideBody, SlideDeck};
pub use slug::{Slug, SlugError};
pub use text::{PromptText, SummaryText, Text, TextError, TitleText};
