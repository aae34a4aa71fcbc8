//! Line-driven terminal front end for a lesson session.

use std::io::{self, BufRead, Write};

use services::sessions::{QuestionView, QuizView, ResultView, SessionView, SlideView};
use services::{LessonListItem, LessonLoopService, LessonSession, NavigationIntent};

use crate::render::to_terminal;

const HELP: &str = "Commands: n next, p previous, q start quiz, b back to lesson, \
1-9 or A-Z answer, s submit, r retake, x exit";

/// One learner action, parsed from an input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Prev,
    EnterQuiz,
    Back,
    Answer(usize),
    Submit,
    Retake,
    Exit,
    Help,
}

impl Command {
    /// Lowercase letters are commands; digits and uppercase letters pick an option.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let mut chars = line.trim().chars();
        let ch = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        match ch {
            'n' => Some(Self::Next),
            'p' => Some(Self::Prev),
            'q' => Some(Self::EnterQuiz),
            'b' => Some(Self::Back),
            's' => Some(Self::Submit),
            'r' => Some(Self::Retake),
            'x' => Some(Self::Exit),
            'h' | '?' => Some(Self::Help),
            '1'..='9' => ch.to_digit(10).map(|d| Self::Answer(d as usize - 1)),
            'A'..='Z' => Some(Self::Answer(ch as usize - 'A' as usize)),
            _ => None,
        }
    }
}

/// Drives a `LessonSession` from text commands and prints each resulting view.
pub struct Player<'a, R, W> {
    lessons: &'a LessonLoopService,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Player<'a, R, W> {
    pub fn new(lessons: &'a LessonLoopService, input: R, output: W) -> Self {
        Self {
            lessons,
            input,
            output,
        }
    }

    /// Run until the learner exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from reading commands or writing output.
    pub async fn run(&mut self, session: &mut LessonSession) -> io::Result<NavigationIntent> {
        writeln!(self.output, "{}", session.lesson().title())?;
        writeln!(self.output, "{HELP}")?;
        self.show(session)?;

        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(self.lessons.exit());
            }
            if line.trim().is_empty() {
                continue;
            }
            let Some(command) = Command::parse(&line) else {
                writeln!(self.output, "Unknown command. {HELP}")?;
                continue;
            };
            if command == Command::Exit {
                return Ok(self.lessons.exit());
            }
            if let Some(note) = self.apply(session, command).await {
                writeln!(self.output, "{note}")?;
            }
            self.show(session)?;
        }
    }

    async fn apply(&mut self, session: &mut LessonSession, command: Command) -> Option<String> {
        let moved = match command {
            Command::Next => session.next_slide() || session.next_question(),
            Command::Prev => {
                if session.in_quiz() {
                    session.prev_question()
                } else {
                    session.prev_slide()
                }
            }
            Command::EnterQuiz => session.enter_quiz(),
            Command::Back => session.return_to_last_slide(),
            Command::Answer(index) => {
                return session.select_answer(index).err().map(|err| err.to_string());
            }
            Command::Submit => {
                return match self.lessons.submit(session).await {
                    Some(result) if result.newly_completed => {
                        Some("Lesson completed and saved.".to_owned())
                    }
                    Some(_) => None,
                    None => Some(
                        "Answer every question and go to the last one before submitting."
                            .to_owned(),
                    ),
                };
            }
            Command::Retake => {
                if !session.quiz().is_submitted() {
                    return Some("Nothing to retake yet.".to_owned());
                }
                session.retake();
                true
            }
            Command::Help => return Some(HELP.to_owned()),
            Command::Exit => true,
        };
        (!moved).then(|| "Not available here.".to_owned())
    }

    fn show(&mut self, session: &LessonSession) -> io::Result<()> {
        let screen = render_session(session);
        writeln!(self.output, "\n{screen}")?;
        self.output.flush()
    }
}

/// Dashboard text: one line per lesson, completed ones marked.
#[must_use]
pub fn render_listing(items: &[LessonListItem]) -> String {
    if items.is_empty() {
        return "No lessons available.".to_owned();
    }
    items
        .iter()
        .map(|item| {
            format!(
                "[{}] {:<24} {} ({} questions)\n      {}",
                if item.completed { 'x' } else { ' ' },
                item.slug.as_str(),
                item.title,
                item.question_count,
                item.summary
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[must_use]
pub fn render_session(session: &LessonSession) -> String {
    let mut screen = match session.view() {
        SessionView::Raw { markdown } => to_terminal(&markdown),
        SessionView::Slide(slide) => render_slide(&slide),
        SessionView::Quiz(QuizView::Empty) => {
            "This lesson has no quiz questions yet. Press b to go back.".to_owned()
        }
        SessionView::Quiz(QuizView::Question(question)) => render_question(&question),
        SessionView::Quiz(QuizView::Result(result)) => render_result(&result),
    };
    if session.is_completed() {
        screen.push_str("\n\nYou have completed this lesson.");
    }
    screen
}

fn render_slide(slide: &SlideView) -> String {
    let mut screen = format!(
        "Slide {} of {} ({}%)\n\n{}\n{}\n\n{}",
        slide.progress.number(),
        slide.progress.total,
        slide.progress.percent(),
        slide.title,
        "-".repeat(slide.title.chars().count()),
        to_terminal(&slide.body)
    );
    if slide.can_enter_quiz {
        screen.push_str("\n\nLast slide. Press q to start the quiz.");
    }
    screen
}

fn render_question(question: &QuestionView) -> String {
    let mut lines = vec![
        format!(
            "Question {} of {} ({} answered)",
            question.progress.number(),
            question.progress.total,
            question.progress.answered
        ),
        String::new(),
        question.prompt.clone(),
    ];
    for option in &question.options {
        let marker = if option.selected { '>' } else { ' ' };
        lines.push(format!("{marker} {}. {}", option.letter, option.text));
    }
    if question.can_submit {
        lines.push(String::new());
        lines.push("All questions answered. Press s to submit.".to_owned());
    }
    lines.join("\n")
}

fn render_result(result: &ResultView) -> String {
    let verdict = if result.passed { "Passed" } else { "Not passed" };
    let mut lines = vec![format!(
        "Score: {} / {} ({}%). {verdict}. {} correct needed to pass.",
        result.score, result.total, result.percent, result.threshold
    )];
    if result.perfect {
        lines.push("Perfect score!".to_owned());
    }
    for item in &result.missed {
        lines.push(String::new());
        lines.push(format!("Q{}: {}", item.number, item.prompt));
        lines.push(format!(
            "  Your answer: {}. {}",
            item.selected_letter, item.selected_text
        ));
        lines.push(format!("  Correct: {}. {}", item.correct_letter, item.correct_text));
    }
    lines.push(String::new());
    lines.push("Press r to retake or x to exit.".to_owned());
    lines.join("\n")
}
