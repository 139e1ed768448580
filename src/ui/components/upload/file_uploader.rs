use crate::api::UploadResult;
use crate::upload::{Admissibility, ConfigurationStatus, SessionState};
use crate::units::readable_bytes;
use dioxus::prelude::*;

use super::super::upload_hooks::use_upload_session;
use super::{ConfigurationInfo, FileChooser, FileInfo};

#[component]
pub fn FileUploader(on_completed: EventHandler<UploadResult>, on_retry: EventHandler<()>) -> Element {
    let (session, snapshot) = use_upload_session(on_completed);
    let current = snapshot();
    let is_uploading = current.state == SessionState::Uploading;

    let size_warning = match current.admissibility {
        Admissibility::TooLarge {
            size_bytes,
            body_max_size,
        } => Some(format!(
            "File is {}, the server accepts at most {}",
            readable_bytes(size_bytes),
            readable_bytes(body_max_size)
        )),
        _ => None,
    };
    let failure = current
        .last_failure
        .as_ref()
        .map(|failure| failure.description());
    let selected = current.file.as_deref().cloned();
    let select_session = session.clone();

    let configuration_view = match &current.configuration {
        ConfigurationStatus::Pending => rsx! {
            div { class: "card muted", "Loading server configuration..." }
        },
        ConfigurationStatus::Loaded(configuration) => rsx! {
            ConfigurationInfo { configuration: *configuration }
        },
        ConfigurationStatus::Failed(load_failure) => {
            let description = load_failure.description();
            rsx! {
                div { class: "card banner-error",
                    p { "Could not load the server configuration: {description}" }
                    button { class: "button", onclick: move |_| on_retry.call(()), "Retry" }
                }
            }
        }
    };

    rsx! {
        {configuration_view}

        div { class: "card",
            FileChooser {
                on_selected: move |file| select_session.select_file(file),
            }

            if let Some(file) = selected {
                FileInfo { file }
            }

            if let Some(warning) = size_warning {
                p { class: "banner-warning", "{warning}" }
            }

            if let Some(description) = failure {
                p { class: "banner-error", "Upload failed: {description}" }
            }

            button {
                class: "button button-primary",
                disabled: !current.can_upload(),
                onclick: move |_| session.trigger_upload(),
                if is_uploading {
                    "Uploading..."
                } else {
                    "Upload"
                }
            }
        }
    }
}
