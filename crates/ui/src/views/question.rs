use dioxus::prelude::*;

use quiz_core::model::OptionId;
use services::Direction;

use crate::vm::QuestionVm;

/// One question with its options, actions and optional feedback.
#[component]
pub fn QuestionPanel(
    question: QuestionVm,
    on_select: Callback<OptionId>,
    on_check: Callback<()>,
    on_submit: Callback<()>,
    on_navigate: Callback<Direction>,
) -> Element {
    let input_type = question.input_type();
    let group = format!("answer-{}", question.index);

    rsx! {
        div { class: "question",
            div { class: "quiz-question", "{question.text}" }
            if let Some(skill) = question.skill.as_ref() {
                div { class: "quiz-skill", "{skill}" }
            }
            div { class: "answers",
                {question.options.iter().map(|option| {
                    let id = option.option.clone();
                    rsx! {
                        label {
                            key: "{option.option}",
                            class: if option.highlighted { "answer correct" } else { "answer" },
                            input {
                                r#type: input_type,
                                name: "{group}",
                                checked: option.selected,
                                onchange: move |_| on_select.call(id.clone()),
                            }
                            "{option.text}"
                        }
                    }
                })}
            }
            div { class: "actions",
                button {
                    class: "nav-button prev",
                    r#type: "button",
                    disabled: !question.can_go_previous,
                    onclick: move |_| on_navigate.call(Direction::Previous),
                    "Previous"
                }
                button {
                    class: "action-button check",
                    r#type: "button",
                    onclick: move |_| on_check.call(()),
                    "Check Answer"
                }
                button {
                    class: "action-button submit",
                    r#type: "button",
                    onclick: move |_| on_submit.call(()),
                    "Submit"
                }
                button {
                    class: "nav-button next",
                    r#type: "button",
                    disabled: !question.can_go_next,
                    onclick: move |_| on_navigate.call(Direction::Next),
                    "Next"
                }
            }
            if let Some(feedback) = question.feedback.as_ref() {
                div { class: "feedback",
                    p {
                        class: if feedback.correct { "correct-feedback" } else { "incorrect-feedback" },
                        "{feedback.verdict}"
                    }
                    p { "{feedback.correct_answers_label}" }
                }
            }
        }
    }
}
