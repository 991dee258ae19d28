//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! Leaflet itself is loaded from a CDN `<script>` tag; the glue in
//! `assets/js/map.js` is embedded at compile time, evaluated as globals
//! once Leaflet is available, and exposed via `window.*`. This module
//! provides safe Rust wrappers that serialize data and call those
//! globals.

use serde::Serialize;

use stv_imagery::bounding_box::ViewportBounds;
use stv_imagery::layer::LayerGroup;

// Embed the Leaflet glue at compile time.
static MAP_JS: &str = include_str!("../assets/js/map.js");

/// Opacity applied to every sentinel overlay.
const OVERLAY_OPACITY: f64 = 0.8;

/// Attribution shown for sentinel overlays.
const OVERLAY_ATTRIBUTION: &str = "Google Earth Engine";

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('STV JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Initialize the Leaflet map with a wait-for-Leaflet polling loop.
///
/// The glue defines functions like `stvInitMap(...)` via `function`
/// declarations. To ensure they become globally accessible (not
/// block-scoped inside the setInterval callback), they are evaluated
/// at global scope via indirect `eval()` once Leaflet and the container
/// element exist, then explicitly promoted to `window.*`.
pub fn init_map(container_id: &str, center_lat: f64, center_lng: f64, zoom: u32) {
    let store_js = format!(
        "window.__stvMapScript = {};",
        serde_json::to_string(MAP_JS).unwrap_or_default()
    );
    let _ = js_sys::eval(&store_js);

    let init_js = format!(
        r#"
        (function() {{
            var waitForLeaflet = setInterval(function() {{
                if (typeof L !== 'undefined' && document.getElementById('{container_id}')) {{
                    clearInterval(waitForLeaflet);
                    (0, eval)(window.__stvMapScript);
                    delete window.__stvMapScript;
                    if (typeof stvInitMap !== 'undefined') window.stvInitMap = stvInitMap;
                    if (typeof stvMapBounds !== 'undefined') window.stvMapBounds = stvMapBounds;
                    if (typeof stvSyncOverlays !== 'undefined') window.stvSyncOverlays = stvSyncOverlays;
                    if (typeof stvDestroyMap !== 'undefined') window.stvDestroyMap = stvDestroyMap;
                    window.stvInitMap('{container_id}', {center_lat}, {center_lng}, {zoom});
                    console.log('STV map initialized');
                }}
            }}, 100);
        }})();
        "#,
    );
    let _ = js_sys::eval(&init_js);
}

/// Whether the Leaflet map finished initializing.
pub fn map_ready() -> bool {
    js_sys::eval("window.__stvMapReady === true")
        .ok()
        .and_then(|value| value.as_bool())
        .unwrap_or(false)
}

/// Read the current viewport as west,south,east,north degrees.
pub fn viewport_bounds() -> Option<ViewportBounds> {
    let value = js_sys::eval(
        "typeof window.stvMapBounds === 'function' ? window.stvMapBounds() : ''",
    )
    .ok()?;
    let joined = value.as_string()?;
    if joined.is_empty() {
        return None;
    }
    let parts: Vec<f64> = joined
        .split(',')
        .filter_map(|part| part.parse().ok())
        .collect();
    if parts.len() != 4 {
        log::warn!("unreadable map bounds: {joined}");
        return None;
    }
    Some(ViewportBounds::new(parts[0], parts[1], parts[2], parts[3]))
}

#[derive(Serialize)]
struct OverlayDef {
    id: String,
    name: String,
    url: String,
    opacity: f64,
    attribution: &'static str,
}

/// Push every layer of every group to the Leaflet layers control.
///
/// Sync is append-only on the JS side, so re-sending the full set after
/// each load is cheap and keeps existing toggle state untouched.
pub fn sync_layer_groups(groups: &[LayerGroup]) {
    let overlays: Vec<OverlayDef> = groups
        .iter()
        .flat_map(|group| {
            group.layers.iter().map(|layer| OverlayDef {
                id: layer.id.clone(),
                name: format!(
                    "{} ({} to {})",
                    layer.name, layer.range_start, layer.range_end
                ),
                url: layer.url_template.clone(),
                opacity: OVERLAY_OPACITY,
                attribution: OVERLAY_ATTRIBUTION,
            })
        })
        .collect();

    let json = serde_json::to_string(&overlays).unwrap_or_default();
    let escaped = json.replace('\'', "\\'").replace('\n', "");
    call_js(&format!(
        "if (typeof window.stvSyncOverlays === 'function') window.stvSyncOverlays('{escaped}');"
    ));
}

/// Tear the Leaflet map down (component unmount).
pub fn destroy_map() {
    call_js("if (typeof window.stvDestroyMap === 'function') window.stvDestroyMap();");
}

/// Await a browser timeout; used to poll for map readiness.
pub async fn sleep_ms(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms);
        }
    });
    let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
}
