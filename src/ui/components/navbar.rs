use crate::ui::Route;
use dioxus::prelude::*;

/// Layout with the navigation links above the routed page
#[component]
pub fn Navbar() -> Element {
    rsx! {
        nav { class: "navbar",
            span { class: "navbar-brand", "chest" }
            Link { to: Route::Upload {}, class: "navbar-link", "Upload" }
            Link { to: Route::Download {}, class: "navbar-link", "Download" }
        }
        main { class: "page", Outlet::<Route> {} }
    }
}
