use crate::api::ServerConfiguration;
use crate::units::readable_bytes;
use chrono::Utc;
use dioxus::prelude::*;

/// Server limits shown above the uploader
#[component]
pub fn ConfigurationInfo(configuration: ServerConfiguration) -> Element {
    let max_size = readable_bytes(configuration.body_max_size);
    let expires_at = configuration
        .expires_at(Utc::now())
        .format("%Y-%m-%d %H:%M UTC")
        .to_string();

    rsx! {
        div { class: "chips",
            span { class: "chip", "Max size: {max_size}" }
            span { class: "chip", "Kept for {configuration.days_file_available} days" }
            span { class: "chip muted", "Files uploaded now expire {expires_at}" }
        }
    }
}
