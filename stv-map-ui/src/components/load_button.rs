//! The load-imagery button.

use crate::state::AppState;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct LoadButtonProps {
    /// Fired when the user asks for a load. The handler drives the
    /// session controller; the button only reflects its state.
    pub on_load: EventHandler<()>,
}

/// Button that triggers an imagery load. Disabled until the map is
/// ready and while a request is in flight, mirroring the controller's
/// preconditions.
#[component]
pub fn LoadButton(props: LoadButtonProps) -> Element {
    let state = use_context::<AppState>();
    let loading = (state.loading)();
    let map_ready = (state.map_ready)();

    let label = if loading {
        "Loading..."
    } else {
        "Load Sentinel-2 Imagery"
    };

    rsx! {
        button {
            disabled: !map_ready || loading,
            style: "padding: 8px 16px; background: #2196F3; color: white; border: none; border-radius: 4px; cursor: pointer;",
            onclick: move |_| props.on_load.call(()),
            "{label}"
        }
    }
}
