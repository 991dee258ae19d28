//! Loading spinner component.

use dioxus::prelude::*;

/// Simple loading indicator shown while an imagery request is in flight.
#[component]
pub fn LoadingSpinner() -> Element {
    rsx! {
        div {
            style: "display: flex; justify-content: center; align-items: center; padding: 12px; color: #666;",
            "Loading imagery..."
        }
    }
}
