//! Panel listing the loaded layer groups.

use crate::state::AppState;
use dioxus::prelude::*;

/// Lists each loaded group most-recent-first: its date range, bounding
/// box, and the layers it contributed to the map's layers control.
#[component]
pub fn LayerGroupPanel() -> Element {
    let state = use_context::<AppState>();
    let groups = state.layer_groups.read().clone();

    if groups.is_empty() {
        return rsx! {
            p {
                style: "font-size: 12px; color: #888;",
                "No imagery loaded yet. Pick a date range and load the visible area."
            }
        };
    }

    rsx! {
        div {
            style: "margin-top: 12px; padding-top: 8px; border-top: 1px solid #e0e0e0;",
            h3 {
                style: "margin: 0 0 4px 0; font-size: 14px;",
                "Loaded imagery"
            }
            for group in groups.iter() {
                div {
                    key: "{group.id}",
                    style: "margin: 6px 0; font-size: 12px;",
                    strong { "{group.date_range}" }
                    span {
                        style: "color: #888;",
                        " -- bbox {group.bbox}"
                    }
                    ul {
                        style: "margin: 2px 0 0 0;",
                        for layer in group.layers.iter() {
                            li {
                                key: "{layer.id}",
                                "{layer.name} ({layer.image_count} images)"
                            }
                        }
                    }
                }
            }
        }
    }
}
