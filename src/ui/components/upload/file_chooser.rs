use crate::upload::SelectedFile;
use dioxus::prelude::*;
use rfd::AsyncFileDialog;
use tracing::{error, info};

/// Picking a file never interrupts an upload in flight; the next upload uses it
#[component]
pub fn FileChooser(on_selected: EventHandler<SelectedFile>) -> Element {
    let mut read_error = use_signal(|| None::<String>);

    rsx! {
        div { class: "file-chooser",
            button {
                class: "button",
                onclick: move |_| {
                    spawn(async move {
                        let Some(picked) = AsyncFileDialog::new()
                            .set_title("Choose a file to upload")
                            .pick_file()
                            .await
                        else {
                            return;
                        };

                        match SelectedFile::from_path(picked.path()).await {
                            Ok(file) => {
                                info!("Selected {} ({} bytes)", file.name, file.size_bytes);
                                read_error.set(None);
                                on_selected.call(file);
                            }
                            Err(e) => {
                                error!("Failed to read {}: {}", picked.path().display(), e);
                                read_error.set(Some(e.to_string()));
                            }
                        }
                    });
                },
                "Choose file"
            }
            if let Some(message) = read_error() {
                span { class: "banner-error", "{message}" }
            }
        }
    }
}
