use crate::api::{ApiError, DownloadedFile, FailureStatus};
use crate::config::use_config;
use crate::ui::Route;
use crate::AppContext;
use dioxus::prelude::*;
use rfd::AsyncFileDialog;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Fetch a file by id and key, then save it where the user chooses
#[component]
pub fn Download() -> Element {
    let context = use_context::<AppContext>();
    let config = use_config();
    let navigator = use_navigator();

    let mut id = use_signal(String::new);
    let mut key = use_signal(String::new);
    let mut is_downloading = use_signal(|| false);
    let mut saved_to = use_signal(|| None::<PathBuf>);
    let mut save_error = use_signal(|| None::<String>);

    let can_download = !is_downloading() && !id().trim().is_empty() && !key().trim().is_empty();

    let on_download = move |_: MouseEvent| {
        let api = context.api.clone();
        let runtime_handle = context.runtime_handle.clone();
        let download_dir = config.download_dir.clone();
        let file_id = id().trim().to_string();
        let file_key = key().trim().to_string();

        spawn(async move {
            is_downloading.set(true);
            saved_to.set(None);
            save_error.set(None);

            let outcome = runtime_handle
                .spawn(async move { api.download_file(&file_id, &file_key).await })
                .await;
            is_downloading.set(false);

            let status = match outcome {
                Ok(Ok(file)) => {
                    match save_downloaded(file, download_dir).await {
                        Ok(Some(path)) => saved_to.set(Some(path)),
                        Ok(None) => {}
                        Err(e) => {
                            error!("Failed to save download: {}", e);
                            save_error.set(Some(e.to_string()));
                        }
                    }
                    return;
                }
                Ok(Err(e)) => {
                    warn!("Download failed: {}", e);
                    e.status()
                }
                Err(e) => {
                    error!("Download task failed: {}", e);
                    FailureStatus::Transport
                }
            };

            let code = status
                .code()
                .map(|code| code.to_string())
                .unwrap_or_else(|| "0".to_string());
            navigator.push(Route::ErrorPage { code });
        });
    };

    rsx! {
        h1 { class: "page-title", "Download a file" }
        div { class: "card",
            label { class: "field",
                span { "Id" }
                input {
                    class: "input mono",
                    value: "{id}",
                    oninput: move |evt| id.set(evt.value()),
                }
            }
            label { class: "field",
                span { "Key" }
                input {
                    class: "input mono",
                    r#type: "password",
                    value: "{key}",
                    oninput: move |evt| key.set(evt.value()),
                }
            }
            button {
                class: "button button-primary",
                disabled: !can_download,
                onclick: on_download,
                if is_downloading() {
                    "Downloading..."
                } else {
                    "Download"
                }
            }
            if let Some(path) = saved_to() {
                p { class: "banner-success", "Saved to {path.display()}" }
            }
            if let Some(message) = save_error() {
                p { class: "banner-error", "{message}" }
            }
        }
    }
}

/// Ask where to save the file and write it there. `None` when the dialog was cancelled.
async fn save_downloaded(
    file: DownloadedFile,
    download_dir: Option<PathBuf>,
) -> Result<Option<PathBuf>, ApiError> {
    let mut dialog = AsyncFileDialog::new().set_title("Save downloaded file");
    if let Some(dir) = download_dir {
        dialog = dialog.set_directory(dir);
    }
    if let Some(name) = &file.file_name {
        dialog = dialog.set_file_name(name.as_str());
    }

    let Some(target) = dialog.save_file().await else {
        return Ok(None);
    };

    let path = target.path().to_path_buf();
    tokio::fs::write(&path, &file.bytes).await?;
    info!("Saved {} bytes to {}", file.bytes.len(), path.display());

    Ok(Some(path))
}
