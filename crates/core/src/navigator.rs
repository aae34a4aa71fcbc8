//! Position tracking over a lesson's content slides plus the trailing quiz.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NavigatorError {
    #[error("lesson has no slides to navigate")]
    NoSlides,
}

/// Where the learner currently is within a lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlidePosition {
    Content(usize),
    Quiz,
}

/// Cursor over `N` content slides, with position `N` standing for the quiz.
///
/// Ordinary forward navigation stops at the last content slide; the quiz is
/// only entered through [`SlideNavigator::enter_quiz`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideNavigator {
    slide_count: usize,
    current: usize,
}

impl SlideNavigator {
    /// # Errors
    ///
    /// Returns `NavigatorError::NoSlides` for a lesson without content slides;
    /// such lessons are rendered raw and never enter the slide flow.
    pub fn new(slide_count: usize) -> Result<Self, NavigatorError> {
        if slide_count == 0 {
            return Err(NavigatorError::NoSlides);
        }
        Ok(Self {
            slide_count,
            current: 0,
        })
    }

    #[must_use]
    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    /// Raw position in `[0, slide_count]`.
    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn position(&self) -> SlidePosition {
        if self.in_quiz() {
            SlidePosition::Quiz
        } else {
            SlidePosition::Content(self.current)
        }
    }

    #[must_use]
    pub fn in_quiz(&self) -> bool {
        self.current == self.slide_count
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    #[must_use]
    pub fn is_last_content(&self) -> bool {
        self.current + 1 == self.slide_count
    }

    #[must_use]
    pub fn can_prev(&self) -> bool {
        self.current > 0
    }

    #[must_use]
    pub fn can_next(&self) -> bool {
        self.current + 1 < self.slide_count
    }

    #[must_use]
    pub fn can_enter_quiz(&self) -> bool {
        self.is_last_content()
    }

    /// Move to the following content slide. Returns whether the cursor moved.
    pub fn next(&mut self) -> bool {
        if !self.can_next() {
            return false;
        }
        self.current += 1;
        true
    }

    pub fn prev(&mut self) -> bool {
        if !self.can_prev() {
            return false;
        }
        self.current -= 1;
        true
    }

    /// One-way gate from the last content slide into the quiz.
    pub fn enter_quiz(&mut self) -> bool {
        if !self.can_enter_quiz() {
            return false;
        }
        self.current = self.slide_count;
        true
    }

    /// Leave the quiz for the last content slide. No-op outside the quiz.
    pub fn return_to_last_slide(&mut self) -> bool {
        if !self.in_quiz() {
            return false;
        }
        self.current = self.slide_count - 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_slides_cannot_be_navigated() {
        assert_eq!(SlideNavigator::new(0), Err(NavigatorError::NoSlides));
    }

    #[test]
    fn next_stops_at_last_content_slide() {
        let mut nav = SlideNavigator::new(3).unwrap();
        assert!(nav.next());
        assert_eq!(nav.current(), 1);
        assert!(nav.next());
        assert_eq!(nav.position(), SlidePosition::Content(2));

        assert!(!nav.next());
        assert_eq!(nav.position(), SlidePosition::Content(2));
        assert!(!nav.in_quiz());
    }

    #[test]
    fn quiz_is_only_reachable_from_last_slide() {
        let mut nav = SlideNavigator::new(3).unwrap();
        assert!(!nav.enter_quiz());
        nav.next();
        assert!(!nav.enter_quiz());
        nav.next();
        assert!(nav.enter_quiz());
        assert_eq!(nav.position(), SlidePosition::Quiz);
        assert_eq!(nav.current(), 3);

        assert!(!nav.next());
        assert!(!nav.enter_quiz());
        assert_eq!(nav.current(), 3);
    }

    #[test]
    fn prev_is_noop_at_first_slide() {
        let mut nav = SlideNavigator::new(2).unwrap();
        assert!(nav.is_first());
        assert!(!nav.prev());
        assert_eq!(nav.current(), 0);
    }

    #[test]
    fn return_to_last_slide_from_quiz() {
        let mut nav = SlideNavigator::new(2).unwrap();
        assert!(!nav.return_to_last_slide());
        nav.next();
        nav.enter_quiz();
        assert!(nav.return_to_last_slide());
        assert_eq!(nav.position(), SlidePosition::Content(1));
        assert!(nav.is_last_content());
    }

    #[test]
    fn single_slide_lesson_goes_straight_to_quiz() {
        let mut nav = SlideNavigator::new(1).unwrap();
        assert!(nav.is_first());
        assert!(nav.is_last_content());
        assert!(!nav.next());
        assert!(nav.enter_quiz());
        assert!(nav.prev());
        assert_eq!(nav.current(), 0);
    }
}
