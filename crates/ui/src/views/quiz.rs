use std::sync::Arc;

use dioxus::prelude::*;
use quiz_core::model::OptionId;
use services::Direction;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuizIntent, QuizVm, start_quiz};

use super::navigation::NavigationBar;
use super::question::QuestionPanel;
use super::results::ResultsPanel;

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_loop = ctx.quiz_loop();

    let vm = use_signal(|| None::<QuizVm>);
    let notice = use_signal(|| None::<ViewError>);

    let quiz_loop_for_resource = Arc::clone(&quiz_loop);
    let resource = use_resource(move || {
        let quiz_loop = Arc::clone(&quiz_loop_for_resource);
        let mut vm = vm;
        async move {
            let started = start_quiz(&quiz_loop).await;
            vm.set(Some(started));
            Ok::<_, ViewError>(())
        }
    });
    let state = view_state_from_resource(&resource);

    let dispatch_intent = use_callback(move |intent: QuizIntent| {
        let mut vm = vm;
        let mut notice = notice;

        // The session changes in place; only the storage write is spawned.
        let pending = vm.write().as_mut().and_then(|vm| vm.apply_now(intent));
        let Some(pending) = pending else {
            return;
        };

        let quiz_loop = Arc::clone(&quiz_loop);
        spawn(async move {
            let result = pending.run(&quiz_loop).await;
            notice.set(result.err());
        });
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch_intent, vm);
            }
        }
    }

    let body = match state {
        ViewState::Idle | ViewState::Loading => rsx! {
            p { class: "loading", "Loading..." }
        },
        ViewState::Error(err) => rsx! {
            p { class: "fatal", "{err.message()}" }
        },
        ViewState::Ready(()) => {
            let vm_guard = vm.read();
            let progress = vm_guard.as_ref().map(QuizVm::progress);
            let show_results = vm_guard.as_ref().is_some_and(QuizVm::show_results);
            let results = vm_guard
                .as_ref()
                .filter(|_| show_results)
                .map(QuizVm::results);
            let question = vm_guard
                .as_ref()
                .filter(|_| !show_results)
                .and_then(QuizVm::question);
            drop(vm_guard);

            rsx! {
                if let Some(progress) = progress {
                    NavigationBar {
                        position: progress.position,
                        total: progress.total,
                        on_view_results: move |()| dispatch_intent.call(QuizIntent::ViewResults),
                    }
                }
                if let Some(err) = notice() {
                    div { class: "notice", "{err.message()}" }
                }
                if let Some(results) = results {
                    ResultsPanel {
                        results,
                        on_close: move |()| dispatch_intent.call(QuizIntent::CloseResults),
                        on_restart: move |()| dispatch_intent.call(QuizIntent::Restart),
                    }
                }
                if let Some(question) = question {
                    QuestionPanel {
                        question,
                        on_select: move |option: OptionId| {
                            dispatch_intent.call(QuizIntent::Select(option));
                        },
                        on_check: move |()| dispatch_intent.call(QuizIntent::CheckAnswer),
                        on_submit: move |()| dispatch_intent.call(QuizIntent::Submit),
                        on_navigate: move |direction: Direction| {
                            dispatch_intent.call(QuizIntent::Navigate(direction));
                        },
                    }
                }
            }
        }
    };

    rsx! {
        div { class: "quiz", {body} }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    vm: Rc<RefCell<Option<Signal<Option<QuizVm>>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>, vm: Signal<Option<QuizVm>>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.vm.borrow_mut() = Some(vm);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn vm(&self) -> Signal<Option<QuizVm>> {
        (*self.vm.borrow()).expect("quiz vm registered")
    }
}
