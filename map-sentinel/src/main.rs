//! Sentinel-2 imagery viewer.
//!
//! Pick a date range, pan/zoom the Leaflet map, and load satellite
//! tile layers for the visible bounding box from the imagery service.
//! Each successful load appends a toggleable group of overlays.
//!
//! Data flow:
//! 1. On mount: evaluate the Leaflet glue and poll until the map is up,
//!    then hand the controller its viewport capability.
//! 2. On "Load": the session controller validates the inputs against
//!    the current viewport and dispatches a single fetch; a newer load
//!    supersedes an in-flight one.
//! 3. On resolution: the controller's layer groups are mirrored into
//!    signals and synced to the Leaflet layers control.

use dioxus::prelude::*;

use stv_imagery::bounding_box::ViewportBounds;
use stv_imagery::request::DateRangeInput;
use stv_imagery::DEFAULT_BASE_URL;
use stv_map_ui::components::{
    DateRangePicker, ErrorDisplay, LayerGroupPanel, LoadButton, LoadingSpinner, MapContainer,
};
use stv_map_ui::fetch::FetchTransport;
use stv_map_ui::js_bridge;
use stv_map_ui::state::AppState;
use stv_session::{LoadResolution, LoadStart, SessionController, ViewportSource};

/// DOM id for the Leaflet container div.
const MAP_CONTAINER_ID: &str = "sentinel-map";

/// Initial view: London area.
const MAP_CENTER_LAT: f64 = 51.48;
const MAP_CENTER_LNG: f64 = -0.1265;
const MAP_ZOOM: u32 = 9;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("sentinel-root"))
        .launch(App);
}

/// The map capability handed to the controller once Leaflet is up.
struct LeafletViewport;

impl ViewportSource for LeafletViewport {
    fn viewport_bounds(&self) -> Option<ViewportBounds> {
        js_bridge::viewport_bounds()
    }
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);
    let mut session: Signal<SessionController> = use_signal(|| {
        SessionController::new(
            Box::new(FetchTransport::new(DEFAULT_BASE_URL)),
            Box::new(|| js_sys::Date::now() as i64),
        )
    });

    // ─── Mount: bring the Leaflet map up, then open the gate ───
    use_future(move || async move {
        js_bridge::init_map(MAP_CONTAINER_ID, MAP_CENTER_LAT, MAP_CENTER_LNG, MAP_ZOOM);
        while !js_bridge::map_ready() {
            js_bridge::sleep_ms(100).await;
        }
        session.write().on_map_ready(Box::new(LeafletViewport));
        state.map_ready.set(true);
    });

    // ─── Sync overlays whenever the loaded groups change ───
    use_effect(move || {
        let groups = state.layer_groups.read();
        if !groups.is_empty() {
            js_bridge::sync_layer_groups(&groups);
        }
    });

    // ─── End of session: abort in-flight work, drop the map ───
    use_drop(move || {
        session.write().teardown();
        js_bridge::destroy_map();
    });

    let on_load = move |_| {
        // Button-level guard; the controller handles overlap on its own.
        if (state.loading)() || !(state.map_ready)() {
            return;
        }
        state.error_msg.set(None);

        let dates = DateRangeInput::new((state.start_date)(), (state.end_date)());
        let load_start = session.write().request_load(&dates);
        match load_start {
            LoadStart::Ignored => {}
            LoadStart::Rejected(errors) => {
                let joined = errors
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("\n");
                state.error_msg.set(Some(format!("Invalid parameters:\n{joined}")));
            }
            LoadStart::Dispatched { token, response } => {
                state.loading.set(true);
                spawn(async move {
                    let outcome = response.await;
                    let resolution = session.write().resolve(token, outcome);
                    match resolution {
                        LoadResolution::Stale => {}
                        LoadResolution::Loaded { layer_count, .. } => {
                            log::info!("appended group with {layer_count} layers");
                            state
                                .layer_groups
                                .set(session.read().layer_groups().to_vec());
                            state.error_msg.set(None);
                        }
                        LoadResolution::Failed(error) => {
                            state
                                .error_msg
                                .set(Some(format!("Failed to load imagery: {error}")));
                        }
                    }
                    state.loading.set(session.read().is_loading());
                });
            }
        }
    };

    // ─── Render ───
    rsx! {
        div {
            style: "max-width: 1100px; margin: 0 auto; padding: 8px; font-family: system-ui, -apple-system, sans-serif;",

            header {
                style: "font-size: 20px; font-weight: bold; margin-bottom: 8px;",
                "Sentinel-2 Imagery Viewer"
            }

            div {
                style: "display: flex; gap: 16px; align-items: center; margin-bottom: 8px;",
                DateRangePicker {}
                LoadButton { on_load: on_load }
            }

            if let Some(err) = state.error_msg.read().as_ref() {
                ErrorDisplay { message: err.clone() }
            }

            if *state.loading.read() {
                LoadingSpinner {}
            }

            MapContainer {
                id: MAP_CONTAINER_ID.to_string(),
                initializing: !*state.map_ready.read(),
                height: 600,
            }

            LayerGroupPanel {}

            footer {
                style: "font-size: 11px; color: #888; text-align: center; margin-top: 8px;",
                "Imagery © Google Earth Engine -- base map © OpenStreetMap contributors"
            }
        }
    }
}
