use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use quiz_core::model::{Answer, Question};
use services::{QuestionSource, QuizLoopService, StaticQuestionSource};
use storage::repository::{InMemoryRepository, SessionStateRepository};

use crate::context::{UiApp, build_app_context};
use crate::views::QuizView;
use crate::vm::QuizIntent;

use super::quiz::QuizTestHandles;

struct TestApp {
    quiz_loop: Arc<QuizLoopService>,
}

impl UiApp for TestApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

#[derive(Props, Clone)]
struct QuizHarnessProps {
    app: Arc<TestApp>,
    handles: QuizTestHandles,
}

impl PartialEq for QuizHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn QuizHarness(props: QuizHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { QuizView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub handles: QuizTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Let spawned work and resources finish.
    pub async fn settle(&mut self) {
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub async fn dispatch(&mut self, intent: QuizIntent) {
        self.dispatch_without_waiting(intent);
        self.settle().await;
    }

    /// Dispatch and render once, before spawned storage writes get polled.
    pub fn dispatch_without_waiting(&mut self, intent: QuizIntent) {
        let dispatch = self.handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn sample_questions() -> Vec<Question> {
    let options = vec![
        Answer::new("opt1", "Ownership"),
        Answer::new("opt2", "Borrowing"),
        Answer::new("opt3", "Garbage collection"),
    ];
    vec![
        Question::new(
            "Which concept moves values?",
            options.clone(),
            vec![options[0].clone()],
            "Memory model",
            false,
        )
        .expect("valid question"),
        Question::new(
            "Which are compile-time checks?",
            options.clone(),
            vec![options[0].clone(), options[1].clone()],
            "",
            true,
        )
        .expect("valid question"),
    ]
}

pub fn setup_quiz_harness(
    source: Arc<dyn QuestionSource>,
    store: Arc<dyn SessionStateRepository>,
) -> ViewHarness {
    let quiz_loop = Arc::new(QuizLoopService::new(source, store));
    let handles = QuizTestHandles::default();
    let dom = VirtualDom::new_with_props(
        QuizHarness,
        QuizHarnessProps {
            app: Arc::new(TestApp { quiz_loop }),
            handles: handles.clone(),
        },
    );
    ViewHarness { dom, handles }
}

pub fn setup_sample_harness(repo: &InMemoryRepository) -> ViewHarness {
    setup_quiz_harness(
        Arc::new(StaticQuestionSource::new(sample_questions())),
        Arc::new(repo.clone()),
    )
}
