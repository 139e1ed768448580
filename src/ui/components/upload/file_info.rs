use crate::upload::SelectedFile;
use crate::units::readable_bytes;
use dioxus::prelude::*;

#[component]
pub fn FileInfo(file: SelectedFile) -> Element {
    let size = readable_bytes(file.size_bytes);

    rsx! {
        dl { class: "details",
            dt { "Name" }
            dd { "{file.name}" }
            dt { "Type" }
            dd { "{file.mime_type}" }
            dt { "Size" }
            dd { "{size}" }
        }
    }
}
