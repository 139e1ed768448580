use crate::api::UploadResult;
use crate::ui::Route;
use dioxus::prelude::*;

/// Identifier and key of a finished upload. Both are needed to download the file.
#[component]
pub fn UploadInformation(result: UploadResult, on_upload_another: EventHandler<()>) -> Element {
    rsx! {
        div { class: "card",
            h2 { "Upload complete" }
            p { class: "muted", "Keep both values, the key cannot be recovered." }
            dl { class: "details",
                dt { "Id" }
                dd { class: "mono", "{result.id}" }
                dt { "Key" }
                dd { class: "mono", "{result.key}" }
            }
            div { class: "actions",
                button { class: "button button-primary", onclick: move |_| on_upload_another.call(()),
                    "Upload another file"
                }
                Link { to: Route::Download {}, class: "button", "Go to download" }
            }
        }
    }
}
