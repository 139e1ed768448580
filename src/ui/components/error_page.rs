use crate::api::describe_code;
use crate::ui::Route;
use dioxus::prelude::*;
use tracing::debug;

#[component]
pub fn ErrorPage(code: String) -> Element {
    let description = describe_code(&code);

    rsx! {
        div { class: "card",
            h1 { class: "error-code", "{code}" }
            p { class: "error-description", "{description}" }
            Link { to: Route::Upload {}, class: "button", "Back to upload" }
        }
    }
}

/// Unmatched paths end up on the 404 error view
#[component]
pub fn PageNotFound(segments: Vec<String>) -> Element {
    let navigator = use_navigator();

    use_effect(move || {
        debug!("No route for /{}", segments.join("/"));
        navigator.replace(Route::ErrorPage {
            code: "404".to_string(),
        });
    });

    rsx! {}
}
