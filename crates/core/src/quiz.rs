//! Answer collection and scoring for a lesson quiz.

use thiserror::Error;

use crate::model::{QuestionId, QuizQuestion};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz has no questions")]
    NoQuestions,

    #[error("quiz was already submitted")]
    AlreadySubmitted,

    #[error("option {index} does not exist; question has {len} options")]
    OptionOutOfRange { index: usize, len: usize },
}

/// Minimum score needed to pass a quiz of `total` questions: half, rounded up.
#[must_use]
pub fn passing_threshold(total: usize) -> usize {
    total.div_ceil(2)
}

/// A question answered wrongly, with both indices kept for review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissedQuestion {
    pub index: usize,
    pub question_id: QuestionId,
    pub selected: usize,
    pub correct: usize,
}

/// Result of a submitted quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome {
    pub score: usize,
    pub total: usize,
    pub threshold: usize,
    pub missed: Vec<MissedQuestion>,
}

impl QuizOutcome {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.score >= self.threshold
    }

    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.missed.is_empty()
    }

    #[must_use]
    pub fn missed_indices(&self) -> Vec<usize> {
        self.missed.iter().map(|m| m.index).collect()
    }
}

/// State of one attempt at a lesson quiz.
///
/// Answers are `None` until selected. Questions can be visited in any order;
/// submission needs every answer and the cursor on the last question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    current: usize,
    answers: Vec<Option<usize>>,
    submitted: bool,
}

impl QuizSession {
    #[must_use]
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        let answers = vec![None; questions.len()];
        Self {
            questions,
            current: 0,
            answers,
            submitted: false,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.current)
    }

    #[must_use]
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    #[must_use]
    pub fn current_answer(&self) -> Option<usize> {
        self.answers.get(self.current).copied().flatten()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        !self.is_empty() && self.current + 1 == self.total()
    }

    /// Record `option_index` for the current question, replacing any earlier choice.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AlreadySubmitted` after submission,
    /// `QuizError::NoQuestions` for an empty quiz and
    /// `QuizError::OptionOutOfRange` for an index the question does not offer.
    /// State is unchanged on error.
    pub fn select_answer(&mut self, option_index: usize) -> Result<(), QuizError> {
        if self.submitted {
            return Err(QuizError::AlreadySubmitted);
        }
        let question = self.current_question().ok_or(QuizError::NoQuestions)?;
        if option_index >= question.option_count() {
            return Err(QuizError::OptionOutOfRange {
                index: option_index,
                len: question.option_count(),
            });
        }
        self.answers[self.current] = Some(option_index);
        Ok(())
    }

    /// Move to the next question; unanswered questions may be skipped.
    pub fn advance_question(&mut self) -> bool {
        if self.current + 1 >= self.total() {
            return false;
        }
        self.current += 1;
        true
    }

    pub fn retreat_question(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// True iff the cursor is on the last question and every question is answered.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.is_last_question() && self.answers.iter().all(Option::is_some)
    }

    /// Score the attempt.
    ///
    /// Returns `None` without touching state when [`Self::can_submit`] is false.
    pub fn submit(&mut self) -> Option<QuizOutcome> {
        if !self.can_submit() {
            return None;
        }
        self.submitted = true;
        self.outcome()
    }

    /// The scored result of a submitted attempt.
    #[must_use]
    pub fn outcome(&self) -> Option<QuizOutcome> {
        if !self.submitted {
            return None;
        }

        let mut score = 0;
        let mut missed = Vec::new();
        for (index, (question, answer)) in self.questions.iter().zip(&self.answers).enumerate() {
            let selected = (*answer)?;
            if question.is_correct(selected) {
                score += 1;
            } else {
                missed.push(MissedQuestion {
                    index,
                    question_id: question.id(),
                    selected,
                    correct: question.correct_answer_index(),
                });
            }
        }

        Some(QuizOutcome {
            score,
            total: self.total(),
            threshold: passing_threshold(self.total()),
            missed,
        })
    }

    /// Start over: clear every answer, return to the first question.
    pub fn retake(&mut self) {
        self.answers.iter_mut().for_each(|a| *a = None);
        self.current = 0;
        self.submitted = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz(correct: &[usize]) -> QuizSession {
        let questions = correct
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                QuizQuestion::new(
                    QuestionId::new(i as u64 + 1),
                    &format!("Question {}", i + 1),
                    vec!["A".into(), "B".into(), "C".into(), "D".into()],
                    c,
                )
                .unwrap()
            })
            .collect();
        QuizSession::new(questions)
    }

    fn answer_all(session: &mut QuizSession, answers: &[usize]) {
        for (i, &a) in answers.iter().enumerate() {
            session.select_answer(a).unwrap();
            if i + 1 < answers.len() {
                assert!(session.advance_question());
            }
        }
    }

    #[test]
    fn threshold_is_half_rounded_up() {
        assert_eq!(passing_threshold(0), 0);
        assert_eq!(passing_threshold(1), 1);
        assert_eq!(passing_threshold(6), 3);
        assert_eq!(passing_threshold(13), 7);
    }

    #[test]
    fn fresh_session_is_unanswered() {
        let session = quiz(&[1, 1, 1]);
        assert_eq!(session.answers(), &[None, None, None]);
        assert_eq!(session.current_index(), 0);
        assert!(!session.is_submitted());
        assert!(!session.can_submit());
    }

    #[test]
    fn can_submit_requires_last_question_and_all_answers() {
        let mut session = quiz(&[0, 0, 0]);
        session.select_answer(0).unwrap();
        session.advance_question();
        session.advance_question();
        session.select_answer(0).unwrap();
        assert!(session.is_last_question());
        assert!(!session.can_submit(), "question 2 is still unanswered");

        session.retreat_question();
        session.select_answer(2).unwrap();
        assert!(!session.can_submit(), "not on the last question");

        session.advance_question();
        assert!(session.can_submit());
    }

    #[test]
    fn submit_is_rejected_without_state_change() {
        let mut session = quiz(&[0, 0]);
        session.select_answer(1).unwrap();
        let before = session.clone();
        assert!(session.submit().is_none());
        assert_eq!(session, before);
    }

    #[test]
    fn scores_and_lists_missed_questions() {
        let mut session = quiz(&[1, 1, 1, 1, 1, 1]);
        answer_all(&mut session, &[1, 1, 2, 1, 1, 2]);
        let outcome = session.submit().unwrap();

        assert_eq!(outcome.score, 4);
        assert_eq!(outcome.total, 6);
        assert_eq!(outcome.missed_indices(), vec![2, 5]);
        assert_eq!(outcome.missed[0].selected, 2);
        assert_eq!(outcome.missed[0].correct, 1);
        assert!(outcome.passed());
        assert!(!outcome.is_perfect());
        assert!(session.is_submitted());
    }

    #[test]
    fn pass_boundaries() {
        let mut six = quiz(&[0; 6]);
        answer_all(&mut six, &[0, 0, 0, 1, 1, 1]);
        assert!(six.submit().unwrap().passed());

        let mut six = quiz(&[0; 6]);
        answer_all(&mut six, &[0, 0, 1, 1, 1, 1]);
        assert!(!six.submit().unwrap().passed());

        let mut thirteen = quiz(&[0; 13]);
        answer_all(&mut thirteen, &[0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1]);
        assert_eq!(thirteen.submit().unwrap().score, 7);
        assert!(thirteen.outcome().unwrap().passed());

        let mut thirteen = quiz(&[0; 13]);
        answer_all(&mut thirteen, &[0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1]);
        assert!(!thirteen.submit().unwrap().passed());
    }

    #[test]
    fn reselect_overwrites_and_out_of_range_is_rejected() {
        let mut session = quiz(&[0, 0]);
        session.select_answer(1).unwrap();
        session.select_answer(3).unwrap();
        assert_eq!(session.current_answer(), Some(3));

        let err = session.select_answer(4).unwrap_err();
        assert_eq!(err, QuizError::OptionOutOfRange { index: 4, len: 4 });
        assert_eq!(session.current_answer(), Some(3));
    }

    #[test]
    fn answers_are_frozen_after_submit() {
        let mut session = quiz(&[0]);
        session.select_answer(0).unwrap();
        session.submit().unwrap();
        assert_eq!(session.select_answer(1), Err(QuizError::AlreadySubmitted));
    }

    #[test]
    fn retake_resets_everything() {
        let mut session = quiz(&[1, 1, 1, 1, 1, 1]);
        answer_all(&mut session, &[0, 0, 0, 0, 0, 0]);
        let outcome = session.submit().unwrap();
        assert_eq!(outcome.score, 0);
        assert!(!outcome.passed());

        session.retake();
        assert_eq!(session.answers(), &[None; 6]);
        assert_eq!(session.current_index(), 0);
        assert!(!session.is_submitted());
        assert!(session.outcome().is_none());
    }

    #[test]
    fn empty_quiz_never_submits() {
        let mut session = quiz(&[]);
        assert!(session.is_empty());
        assert!(!session.can_submit());
        assert!(session.submit().is_none());
        assert_eq!(session.select_answer(0), Err(QuizError::NoQuestions));
        assert!(!session.advance_question());
    }
}
