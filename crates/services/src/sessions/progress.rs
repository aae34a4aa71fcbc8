/// Position within a lesson's content slides, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideProgress {
    pub index: usize,
    pub total: usize,
}

impl SlideProgress {
    /// 1-based slide number for display ("Slide k of N").
    #[must_use]
    pub fn number(&self) -> usize {
        self.index + 1
    }

    /// Share of the deck already behind the learner.
    #[must_use]
    pub fn percent(&self) -> u8 {
        percent(self.index, self.total)
    }
}

/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    pub index: usize,
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
}

impl QuizProgress {
    #[must_use]
    pub fn number(&self) -> usize {
        self.index + 1
    }

    #[must_use]
    pub fn percent(&self) -> u8 {
        percent(self.number(), self.total)
    }
}

pub(crate) fn percent(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let value = part.min(total) * 100 / total;
    u8::try_from(value).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slide_percent_counts_slides_behind() {
        let progress = SlideProgress { index: 0, total: 4 };
        assert_eq!(progress.number(), 1);
        assert_eq!(progress.percent(), 0);
        assert_eq!(SlideProgress { index: 3, total: 4 }.percent(), 75);
    }

    #[test]
    fn quiz_percent_counts_current_question() {
        let progress = QuizProgress {
            index: 1,
            total: 4,
            answered: 1,
            remaining: 3,
        };
        assert_eq!(progress.number(), 2);
        assert_eq!(progress.percent(), 50);
    }

    #[test]
    fn percent_of_nothing_is_zero() {
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(4, 6), 66);
    }
}
