use std::sync::Arc;

use async_trait::async_trait;
use quiz_core::model::Question;
use services::{Direction, QuestionSource, QuestionSourceError, StaticQuestionSource};
use storage::repository::{InMemoryRepository, SessionStateRepository, StorageError};

use super::test_harness::{sample_questions, setup_quiz_harness, setup_sample_harness};
use crate::vm::QuizIntent;

struct PendingSource;

#[async_trait]
impl QuestionSource for PendingSource {
    async fn fetch_questions(&self) -> Result<Vec<Question>, QuestionSourceError> {
        std::future::pending().await
    }

    fn describe(&self) -> String {
        "pending".to_string()
    }
}

struct OfflineSource;

#[async_trait]
impl QuestionSource for OfflineSource {
    async fn fetch_questions(&self) -> Result<Vec<Question>, QuestionSourceError> {
        services::decode_questions("<html>offline</html>")
    }

    fn describe(&self) -> String {
        "offline".to_string()
    }
}

struct ReadOnlyStore;

#[async_trait]
impl SessionStateRepository for ReadOnlyStore {
    async fn get_entry(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    async fn set_entry(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn remove_entry(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_waits_for_questions() {
    let mut harness = setup_quiz_harness(
        Arc::new(PendingSource),
        Arc::new(InMemoryRepository::new()),
    );
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Loading..."), "missing loading text in {html}");
    assert!(!html.contains("Question 1"), "rendered before ready: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_first_question() {
    let repo = InMemoryRepository::new();
    let mut harness = setup_sample_harness(&repo);
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Question 1 of 2"), "missing progress in {html}");
    assert!(html.contains("View Results"), "missing results action in {html}");
    assert!(html.contains("Which concept moves values?"), "missing text in {html}");
    assert!(html.contains("Memory model"), "missing skill in {html}");
    assert!(html.contains("radio"), "missing radio inputs in {html}");
    assert!(html.contains("Check Answer"), "missing check action in {html}");
    assert!(!html.contains("Loading..."), "still loading in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_completes_two_questions() {
    let repo = InMemoryRepository::new();
    let mut harness = setup_sample_harness(&repo);
    harness.rebuild();
    harness.settle().await;

    harness.dispatch(QuizIntent::Select("opt1".into())).await;
    harness.dispatch(QuizIntent::Submit).await;

    let html = harness.render();
    assert!(html.contains("Question 2 of 2"), "did not advance in {html}");
    assert!(html.contains("checkbox"), "missing checkbox inputs in {html}");

    harness.dispatch(QuizIntent::Select("opt1".into())).await;
    harness.dispatch(QuizIntent::Select("opt2".into())).await;
    harness.dispatch(QuizIntent::Submit).await;

    let html = harness.render();
    assert!(html.contains("Quiz Results"), "missing results in {html}");
    assert!(html.contains("You scored 2 out of 2"), "missing score in {html}");
    assert!(html.contains("Percentage: 100.00%"), "missing percentage in {html}");
    assert!(html.contains("Congratulations! You passed!"), "missing verdict in {html}");
    assert!(!html.contains("Check Answer"), "question still shown in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_shows_feedback_on_check() {
    let repo = InMemoryRepository::new();
    let mut harness = setup_sample_harness(&repo);
    harness.rebuild();
    harness.settle().await;

    harness.dispatch(QuizIntent::Select("opt3".into())).await;
    harness.dispatch(QuizIntent::CheckAnswer).await;

    let html = harness.render();
    assert!(html.contains("Incorrect."), "missing verdict in {html}");
    assert!(
        html.contains("Correct answer(s): Ownership"),
        "missing correct answers in {html}"
    );

    harness.dispatch(QuizIntent::Navigate(Direction::Next)).await;
    let html = harness.render();
    assert!(!html.contains("Incorrect."), "feedback kept after navigation: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_restart_clears_saved_progress() {
    let repo = InMemoryRepository::new();
    let mut harness = setup_sample_harness(&repo);
    harness.rebuild();
    harness.settle().await;

    harness.dispatch(QuizIntent::Select("opt1".into())).await;
    harness.dispatch(QuizIntent::Submit).await;
    harness.dispatch(QuizIntent::ViewResults).await;

    let html = harness.render();
    assert!(html.contains("You scored 1 out of 2"), "missing score in {html}");
    assert!(html.contains("Keep practicing"), "missing verdict in {html}");
    assert_eq!(repo.len().unwrap(), 3);

    harness.dispatch(QuizIntent::Restart).await;

    let html = harness.render();
    assert!(html.contains("Question 1 of 2"), "not back at start: {html}");
    assert!(!html.contains("Quiz Results"), "results still open: {html}");
    assert_eq!(repo.len().unwrap(), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_close_keeps_position() {
    let repo = InMemoryRepository::new();
    let mut harness = setup_sample_harness(&repo);
    harness.rebuild();
    harness.settle().await;

    harness.dispatch(QuizIntent::Navigate(Direction::Next)).await;
    harness.dispatch(QuizIntent::ViewResults).await;
    harness.dispatch(QuizIntent::CloseResults).await;

    let html = harness.render();
    assert!(html.contains("Question 2 of 2"), "position lost in {html}");
    assert!(html.contains("Which are compile-time checks?"), "missing text in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_without_questions_shows_navigation_only() {
    let mut harness = setup_quiz_harness(
        Arc::new(OfflineSource),
        Arc::new(InMemoryRepository::new()),
    );
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Question 1 of 0"), "missing progress in {html}");
    assert!(!html.contains("Check Answer"), "question rendered in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_reports_unsaved_progress() {
    let mut harness = setup_quiz_harness(
        Arc::new(StaticQuestionSource::new(sample_questions())),
        Arc::new(ReadOnlyStore),
    );
    harness.rebuild();
    harness.settle().await;

    harness.dispatch(QuizIntent::Select("opt1".into())).await;

    let html = harness.render();
    assert!(
        html.contains("Your progress could not be saved."),
        "missing notice in {html}"
    );
    let vm = harness.handles.vm();
    let recorded = harness
        .dom
        .in_runtime(|| vm.read().as_ref().is_some_and(|vm| vm.session().current_answer().is_some()));
    assert!(recorded, "selection lost after failed save");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_stays_rendered_while_saving() {
    let repo = InMemoryRepository::new();
    let mut harness = setup_sample_harness(&repo);
    harness.rebuild();
    harness.settle().await;

    harness.dispatch_without_waiting(QuizIntent::Navigate(Direction::Next));

    let html = harness.render();
    assert!(html.contains("Question 2 of 2"), "navigation missing mid-save: {html}");
    assert!(
        html.contains("Which are compile-time checks?"),
        "question missing mid-save: {html}"
    );

    harness.dispatch_without_waiting(QuizIntent::Select("opt1".into()));
    harness.dispatch_without_waiting(QuizIntent::Select("opt2".into()));
    harness.settle().await;

    let vm = harness.handles.vm();
    let picked = harness.dom.in_runtime(|| {
        vm.read()
            .as_ref()
            .and_then(|vm| vm.session().current_answer().map(|selection| selection.len()))
    });
    assert_eq!(picked, Some(2), "back-to-back picks were dropped");
    assert_eq!(repo.len().unwrap(), 3);
}
