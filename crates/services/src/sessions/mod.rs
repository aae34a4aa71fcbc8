mod deck;
mod progress;
mod service;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use deck::derive_slides;
pub use progress::{QuizProgress, SlideProgress};
pub use service::LessonSession;
pub use view::{OptionView, QuestionView, QuizView, ResultView, ReviewItem, SessionView, SlideView};
pub use workflow::{
    CONTENT_NOT_FOUND, CONTENT_UNAVAILABLE, LessonLoopService, LessonOpen, NavigationIntent,
    SubmitResult,
};
