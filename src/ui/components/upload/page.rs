use crate::api::UploadResult;
use dioxus::prelude::*;

use super::{FileUploader, UploadInformation};

/// Upload page. Each uploader generation is its own session.
#[component]
pub fn Upload() -> Element {
    let mut generation = use_signal(|| 0u32);
    let mut uploaded = use_signal(|| None::<UploadResult>);

    rsx! {
        h1 { class: "page-title", "Upload a file" }
        if let Some(result) = uploaded() {
            UploadInformation {
                result,
                on_upload_another: move |_| {
                    uploaded.set(None);
                    generation.set(generation() + 1);
                },
            }
        } else {
            FileUploader {
                key: "{generation}",
                on_completed: move |result| uploaded.set(Some(result)),
                on_retry: move |_| generation.set(generation() + 1),
            }
        }
    }
}
