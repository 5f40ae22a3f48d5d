use dioxus::prelude::*;

use crate::vm::ResultsVm;

#[component]
pub fn ResultsPanel(results: ResultsVm, on_close: Callback<()>, on_restart: Callback<()>) -> Element {
    rsx! {
        div { class: "results",
            h2 { "Quiz Results" }
            p { "{results.score_label}" }
            p {
                class: if results.passed { "passing-score" } else { "failing-score" },
                "{results.percentage_label}"
            }
            p { "{results.verdict}" }
            button {
                r#type: "button",
                onclick: move |_| on_close.call(()),
                "Close"
            }
            button {
                r#type: "button",
                onclick: move |_| on_restart.call(()),
                "Restart Quiz"
            }
        }
    }
}
