use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use lesson_core::model::{LessonDraft, LessonId, QuestionDraft};
use lesson_core::time::fixed_clock;
use services::sessions::{CONTENT_NOT_FOUND, CONTENT_UNAVAILABLE, QuizView, SessionView};
use services::{
    AppServices, LessonOpen, LessonSession, NavigationIntent, ServicesConfig, SubmitResult,
};
use storage::repository::{InMemoryRepository, KeyValueStore, Storage, StorageError};

const MARKDOWN: &str = "# Web3 Foundations\n\n## The Evolution of the Internet\nWeb1, Web2, Web3.\n\n## Welcome to Web3\nOwnership.\n\n## Bitcoin and Stacks\nLayers.\n";

fn lesson(id: u64, slug: &str, answer_key: &[usize]) -> LessonDraft {
    LessonDraft {
        id,
        title: format!("Lesson {id}"),
        slug: slug.into(),
        summary: "Summary".into(),
        content_path: format!("{id}-{slug}.md"),
        created_at: None,
        quiz: answer_key
            .iter()
            .enumerate()
            .map(|(i, &correct)| QuestionDraft {
                id: i as u64 + 1,
                question: format!("Question {}", i + 1),
                options: vec!["A".into(), "B".into(), "C".into()],
                correct_answer_index: correct,
            })
            .collect(),
    }
}

fn seeded_repo() -> InMemoryRepository {
    InMemoryRepository::new()
        .with_catalog(vec![
            lesson(1, "web3-foundations", &[1, 1, 1, 1, 1, 1]),
            lesson(2, "intro-to-clarity", &[0, 0]),
            lesson(3, "missing-content", &[0]),
            lesson(4, "blank-content", &[0]),
        ])
        .with_content("1-web3-foundations.md", MARKDOWN)
        .with_content("2-intro-to-clarity.md", "No sections here.")
        .with_content("4-blank-content.md", "   \n")
}

async fn build_services(repo: &InMemoryRepository) -> AppServices {
    AppServices::from_storage(
        Storage::from_in_memory(repo.clone()),
        fixed_clock(),
        ServicesConfig::default(),
    )
    .await
    .expect("services")
}

async fn open(services: &AppServices, slug: &str) -> LessonSession {
    match services.lesson_loop().open_lesson(slug).await {
        LessonOpen::Session(session) => *session,
        LessonOpen::Redirect(intent) => panic!("unexpected redirect: {intent:?}"),
    }
}

fn walk_to_quiz(session: &mut LessonSession) {
    while session.next_slide() {}
    assert!(session.enter_quiz(), "quiz reachable from the last slide");
}

fn answer(session: &mut LessonSession, answers: &[usize]) {
    for (i, &a) in answers.iter().enumerate() {
        session.select_answer(a).unwrap();
        if i + 1 < answers.len() {
            assert!(session.next_question());
        }
    }
}

#[tokio::test]
async fn passing_quiz_records_completion() {
    let repo = seeded_repo();
    let services = build_services(&repo).await;
    let loop_svc = services.lesson_loop();

    let mut session = open(&services, "web3-foundations").await;
    assert!(!session.is_completed());
    assert_eq!(session.deck().map(|d| d.len()), Some(3));

    walk_to_quiz(&mut session);
    answer(&mut session, &[1, 1, 2, 1, 1, 2]);
    let SubmitResult {
        outcome,
        newly_completed,
    } = loop_svc.submit(&mut session).await.expect("submittable");

    assert_eq!(outcome.score, 4);
    assert_eq!(outcome.missed_indices(), vec![2, 5]);
    assert!(outcome.passed());
    assert!(newly_completed);
    assert!(session.is_completed());
    assert!(services.completions().is_completed(LessonId::new(1)));
    assert_eq!(
        repo.get_value("completed_lessons").await.unwrap().as_deref(),
        Some("[1]")
    );

    let listing = services.listing();
    assert!(listing[0].completed);
    assert!(!listing[1].completed);
}

#[tokio::test]
async fn failing_quiz_leaves_completion_untouched() {
    let repo = seeded_repo();
    let services = build_services(&repo).await;
    let loop_svc = services.lesson_loop();

    let mut session = open(&services, "web3-foundations").await;
    walk_to_quiz(&mut session);
    answer(&mut session, &[0; 6]);
    let result = loop_svc.submit(&mut session).await.unwrap();

    assert_eq!(result.outcome.score, 0);
    assert!(!result.outcome.passed());
    assert!(!result.newly_completed);
    assert!(!services.completions().is_completed(LessonId::new(1)));
    assert_eq!(repo.get_value("completed_lessons").await.unwrap(), None);

    session.retake();
    assert_eq!(session.quiz().answers(), &[None; 6]);
    assert!(!session.quiz().is_submitted());
}

#[tokio::test]
async fn retake_after_pass_keeps_completion() {
    let repo = seeded_repo();
    let services = build_services(&repo).await;
    let loop_svc = services.lesson_loop();

    let mut session = open(&services, "intro-to-clarity").await;
    // No level-2 headings: raw mode, quiz unreachable.
    assert!(session.is_raw());
    assert!(!session.enter_quiz());

    let mut session = open(&services, "web3-foundations").await;
    walk_to_quiz(&mut session);
    answer(&mut session, &[1; 6]);
    assert!(loop_svc.submit(&mut session).await.unwrap().newly_completed);

    session.retake();
    answer(&mut session, &[0; 6]);
    let second = loop_svc.submit(&mut session).await.unwrap();
    assert!(!second.outcome.passed());
    assert!(session.is_completed());
    assert!(services.completions().is_completed(LessonId::new(1)));

    let reopened = open(&services, "web3-foundations").await;
    assert!(reopened.is_completed());
}

#[tokio::test]
async fn submit_is_ignored_until_every_answer_is_set() {
    let repo = seeded_repo();
    let services = build_services(&repo).await;
    let loop_svc = services.lesson_loop();

    let mut session = open(&services, "web3-foundations").await;
    walk_to_quiz(&mut session);
    answer(&mut session, &[1, 1, 1, 1, 1]);
    assert!(!session.can_submit());
    assert!(loop_svc.submit(&mut session).await.is_none());
    assert!(!session.quiz().is_submitted());
}

#[tokio::test]
async fn unknown_slug_redirects_to_listing() {
    let services = build_services(&seeded_repo()).await;
    let open = services.lesson_loop().open_lesson("does-not-exist").await;
    assert_eq!(open, LessonOpen::Redirect(NavigationIntent::Listing));

    let open = services.lesson_loop().open_lesson("Web3-Foundations").await;
    assert_eq!(open, LessonOpen::Redirect(NavigationIntent::Listing));
}

#[tokio::test]
async fn content_failures_show_placeholders() {
    let services = build_services(&seeded_repo()).await;

    let missing = open(&services, "missing-content").await;
    assert_eq!(
        missing.view(),
        SessionView::Raw {
            markdown: CONTENT_NOT_FOUND.into()
        }
    );

    let blank = open(&services, "blank-content").await;
    assert_eq!(
        blank.view(),
        SessionView::Raw {
            markdown: CONTENT_UNAVAILABLE.into()
        }
    );
}

#[tokio::test]
async fn quiz_view_reports_progress() {
    let services = build_services(&seeded_repo()).await;
    let mut session = open(&services, "web3-foundations").await;
    walk_to_quiz(&mut session);
    session.select_answer(1).unwrap();
    session.next_question();

    let SessionView::Quiz(QuizView::Question(view)) = session.view() else {
        panic!("expected question view");
    };
    assert_eq!(view.progress.number(), 2);
    assert_eq!(view.progress.total, 6);
    assert_eq!(view.progress.answered, 1);
    assert!(view.can_prev);
}

struct BrokenValues;

#[async_trait]
impl KeyValueStore for BrokenValues {
    async fn get_value(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Connection("offline".into()))
    }

    async fn put_value(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("offline".into()))
    }
}

#[tokio::test]
async fn unavailable_progress_storage_is_not_fatal() {
    let repo = seeded_repo();
    let mut storage = Storage::from_in_memory(repo);
    storage.values = Arc::new(BrokenValues);
    let services = AppServices::from_storage(storage, fixed_clock(), ServicesConfig::default())
        .await
        .unwrap();

    let mut session = open(&services, "web3-foundations").await;
    assert!(!session.is_completed());
    walk_to_quiz(&mut session);
    answer(&mut session, &[1; 6]);
    let result = services.lesson_loop().submit(&mut session).await.unwrap();

    assert!(result.outcome.passed());
    assert!(!result.newly_completed);
    assert!(!services.completions().is_completed(LessonId::new(1)));
}

/// Serves the first read, then fails every later one.
struct FlakyValues {
    inner: InMemoryRepository,
    reads: AtomicUsize,
}

#[async_trait]
impl KeyValueStore for FlakyValues {
    async fn get_value(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.reads.fetch_add(1, Ordering::SeqCst) == 0 {
            self.inner.get_value(key).await
        } else {
            Err(StorageError::Connection("offline".into()))
        }
    }

    async fn put_value(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.put_value(key, value).await
    }
}

#[tokio::test]
async fn failed_reload_keeps_earlier_completions() {
    let repo = seeded_repo();
    repo.put_value("completed_lessons", "[2]").await.unwrap();
    let mut storage = Storage::from_in_memory(repo.clone());
    storage.values = Arc::new(FlakyValues {
        inner: repo.clone(),
        reads: AtomicUsize::new(0),
    });
    let services = AppServices::from_storage(storage, fixed_clock(), ServicesConfig::default())
        .await
        .unwrap();
    assert!(services.completions().is_completed(LessonId::new(2)));

    let mut session = open(&services, "web3-foundations").await;
    assert!(services.completions().is_completed(LessonId::new(2)));

    walk_to_quiz(&mut session);
    answer(&mut session, &[1; 6]);
    let result = services.lesson_loop().submit(&mut session).await.unwrap();

    assert!(result.newly_completed);
    assert_eq!(
        repo.get_value("completed_lessons").await.unwrap().as_deref(),
        Some("[1,2]")
    );
}
