use lesson_core::model::{LessonMetadata, SlideDeck};
use lesson_core::navigator::SlideNavigator;
use lesson_core::quiz::{QuizOutcome, QuizSession};

use super::deck::derive_slides;
use super::progress::SlideProgress;
use super::view::{QuizView, SessionView, SlideView, question_view, result_view};
use crate::error::SessionError;

//
// ─── MODE ──────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    Slides {
        deck: SlideDeck,
        navigator: SlideNavigator,
    },
    /// No level-2 headings: the whole document is shown and the quiz is unreachable.
    Raw { markdown: String },
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One learner's pass through a lesson: slides, then the quiz.
///
/// Purely in-memory; persisting completion is left to `LessonLoopService`.
/// Quiz answers survive leaving the quiz for the last slide and are only
/// cleared by [`LessonSession::retake`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonSession {
    lesson: LessonMetadata,
    mode: Mode,
    quiz: QuizSession,
    completed: bool,
}

impl LessonSession {
    /// Build a session from the lesson's markdown.
    ///
    /// `completed` is the persisted completion flag at open time.
    #[must_use]
    pub fn new(lesson: LessonMetadata, markdown: String, completed: bool) -> Self {
        let deck = derive_slides(&markdown);
        let mode = match SlideNavigator::new(deck.len()) {
            Ok(navigator) => Mode::Slides { deck, navigator },
            Err(_) => Mode::Raw { markdown },
        };
        let quiz = QuizSession::new(lesson.quiz().to_vec());
        Self {
            lesson,
            mode,
            quiz,
            completed,
        }
    }

    #[must_use]
    pub fn lesson(&self) -> &LessonMetadata {
        &self.lesson
    }

    #[must_use]
    pub fn is_raw(&self) -> bool {
        matches!(self.mode, Mode::Raw { .. })
    }

    #[must_use]
    pub fn deck(&self) -> Option<&SlideDeck> {
        match &self.mode {
            Mode::Slides { deck, .. } => Some(deck),
            Mode::Raw { .. } => None,
        }
    }

    #[must_use]
    pub fn navigator(&self) -> Option<&SlideNavigator> {
        match &self.mode {
            Mode::Slides { navigator, .. } => Some(navigator),
            Mode::Raw { .. } => None,
        }
    }

    #[must_use]
    pub fn quiz(&self) -> &QuizSession {
        &self.quiz
    }

    #[must_use]
    pub fn in_quiz(&self) -> bool {
        self.navigator().is_some_and(SlideNavigator::in_quiz)
    }

    /// Whether this lesson is recorded as completed.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub(crate) fn set_completed(&mut self) {
        self.completed = true;
    }

    fn navigator_mut(&mut self) -> Option<&mut SlideNavigator> {
        match &mut self.mode {
            Mode::Slides { navigator, .. } => Some(navigator),
            Mode::Raw { .. } => None,
        }
    }

    //
    // ─── SLIDE NAVIGATION ──────────────────────────────────────────────────────
    //

    pub fn next_slide(&mut self) -> bool {
        self.navigator_mut().is_some_and(SlideNavigator::next)
    }

    /// Step back one slide; from the quiz this returns to the last slide.
    pub fn prev_slide(&mut self) -> bool {
        self.navigator_mut().is_some_and(SlideNavigator::prev)
    }

    pub fn enter_quiz(&mut self) -> bool {
        self.navigator_mut().is_some_and(SlideNavigator::enter_quiz)
    }

    pub fn return_to_last_slide(&mut self) -> bool {
        self.navigator_mut()
            .is_some_and(SlideNavigator::return_to_last_slide)
    }

    //
    // ─── QUIZ ──────────────────────────────────────────────────────────────────
    //

    /// Answer the current question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotInQuiz` outside the quiz, or the quiz's own
    /// rejection for a submitted quiz or an unknown option.
    pub fn select_answer(&mut self, option_index: usize) -> Result<(), SessionError> {
        if !self.in_quiz() {
            return Err(SessionError::NotInQuiz);
        }
        self.quiz.select_answer(option_index)?;
        Ok(())
    }

    pub fn next_question(&mut self) -> bool {
        self.in_quiz() && !self.quiz.is_submitted() && self.quiz.advance_question()
    }

    pub fn prev_question(&mut self) -> bool {
        self.in_quiz() && !self.quiz.is_submitted() && self.quiz.retreat_question()
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.in_quiz() && self.quiz.can_submit()
    }

    pub(crate) fn submit_quiz(&mut self) -> Option<QuizOutcome> {
        if !self.in_quiz() {
            return None;
        }
        self.quiz.submit()
    }

    #[must_use]
    pub fn outcome(&self) -> Option<QuizOutcome> {
        self.quiz.outcome()
    }

    /// Clear every answer and return to the first question.
    ///
    /// The completion flag is left untouched.
    pub fn retake(&mut self) {
        self.quiz.retake();
    }

    //
    // ─── VIEW ──────────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn view(&self) -> SessionView {
        let (deck, navigator) = match &self.mode {
            Mode::Raw { markdown } => {
                return SessionView::Raw {
                    markdown: markdown.clone(),
                };
            }
            Mode::Slides { deck, navigator } => (deck, navigator),
        };

        if navigator.in_quiz() {
            return SessionView::Quiz(self.quiz_view());
        }

        let index = navigator.current();
        let (title, body) = deck
            .get(index)
            .map(|slide| (slide.title().to_owned(), slide.body().as_str().to_owned()))
            .unwrap_or_default();
        SessionView::Slide(SlideView {
            title,
            body,
            progress: SlideProgress {
                index,
                total: deck.len(),
            },
            can_prev: navigator.can_prev(),
            can_next: navigator.can_next(),
            can_enter_quiz: navigator.can_enter_quiz(),
        })
    }

    fn quiz_view(&self) -> QuizView {
        if let Some(outcome) = self.quiz.outcome() {
            return QuizView::Result(result_view(&self.quiz, &outcome));
        }
        match self.quiz.current_question() {
            Some(question) => QuizView::Question(question_view(&self.quiz, question)),
            None => QuizView::Empty,
        }
    }
}
