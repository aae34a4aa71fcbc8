use lesson_core::model::{QuizQuestion, option_letter};
use lesson_core::quiz::{QuizOutcome, QuizSession};

use super::progress::{QuizProgress, SlideProgress, percent};

/// What the learner is looking at right now.
///
/// Presentation-agnostic: bodies stay markdown and numbers stay numbers; the
/// front end decides how to render them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionView {
    /// Whole document, shown when the lesson has no slides.
    Raw { markdown: String },
    Slide(SlideView),
    Quiz(QuizView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideView {
    pub title: String,
    pub body: String,
    pub progress: SlideProgress,
    pub can_prev: bool,
    pub can_next: bool,
    pub can_enter_quiz: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizView {
    /// The lesson has no quiz questions.
    Empty,
    Question(QuestionView),
    Result(ResultView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub index: usize,
    pub letter: char,
    pub text: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub progress: QuizProgress,
    pub prompt: String,
    pub options: Vec<OptionView>,
    pub can_prev: bool,
    pub can_next: bool,
    pub can_submit: bool,
}

/// A wrongly answered question, with both choices spelled out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewItem {
    /// 1-based question number.
    pub number: usize,
    pub prompt: String,
    pub selected_letter: char,
    pub selected_text: String,
    pub correct_letter: char,
    pub correct_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub score: usize,
    pub total: usize,
    pub threshold: usize,
    pub percent: u8,
    pub passed: bool,
    pub perfect: bool,
    pub missed: Vec<ReviewItem>,
}

pub(crate) fn question_view(quiz: &QuizSession, question: &QuizQuestion) -> QuestionView {
    let selected = quiz.current_answer();
    let options = question
        .options()
        .iter()
        .enumerate()
        .map(|(index, text)| OptionView {
            index,
            letter: option_letter(index),
            text: text.clone(),
            selected: selected == Some(index),
        })
        .collect();

    let answered = quiz.answered_count();
    QuestionView {
        progress: QuizProgress {
            index: quiz.current_index(),
            total: quiz.total(),
            answered,
            remaining: quiz.total() - answered,
        },
        prompt: question.prompt().to_owned(),
        options,
        can_prev: quiz.current_index() > 0,
        can_next: !quiz.is_last_question(),
        can_submit: quiz.can_submit(),
    }
}

pub(crate) fn result_view(quiz: &QuizSession, outcome: &QuizOutcome) -> ResultView {
    let missed = outcome
        .missed
        .iter()
        .filter_map(|miss| {
            let question = quiz.questions().get(miss.index)?;
            Some(ReviewItem {
                number: miss.index + 1,
                prompt: question.prompt().to_owned(),
                selected_letter: option_letter(miss.selected),
                selected_text: question.option(miss.selected).unwrap_or_default().to_owned(),
                correct_letter: option_letter(miss.correct),
                correct_text: question.correct_option().to_owned(),
            })
        })
        .collect();

    ResultView {
        score: outcome.score,
        total: outcome.total,
        threshold: outcome.threshold,
        percent: percent(outcome.score, outcome.total),
        passed: outcome.passed(),
        perfect: outcome.is_perfect(),
        missed,
    }
}
