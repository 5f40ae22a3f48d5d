use dioxus::prelude::*;

#[component]
pub fn NavigationBar(position: usize, total: usize, on_view_results: Callback<()>) -> Element {
    rsx! {
        nav { class: "navigation",
            span { "Question {position} of {total}" }
            button {
                r#type: "button",
                onclick: move |_| on_view_results.call(()),
                "View Results"
            }
        }
    }
}
