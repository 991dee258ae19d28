//! Browser `fetch()` transport for the session controller.
//!
//! Each dispatch gets its own `AbortController`; the returned
//! [`AbortGuard`] fires it when the controller supersedes the request.
//! An aborted fetch rejects with an `AbortError` DOM exception, which
//! maps to [`TransportError::Cancelled`] so the controller can drop it
//! silently.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, AbortSignal, Request, RequestInit, Response};

use stv_imagery::error::TransportError;
use stv_imagery::layer::TileServiceResponse;
use stv_imagery::request::RequestDescriptor;
use stv_session::{AbortGuard, PendingFetch, TileTransport};

/// Dispatches tile-listing GETs through the browser's `fetch()`.
pub struct FetchTransport {
    base_url: String,
}

impl FetchTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl TileTransport for FetchTransport {
    fn dispatch(&self, request: &RequestDescriptor) -> PendingFetch {
        let url = request.service_url(&self.base_url);
        let controller = AbortController::new().ok();
        let signal = controller.as_ref().map(|c| c.signal());

        let abort = match controller {
            Some(controller) => AbortGuard::new(move || controller.abort()),
            None => AbortGuard::noop(),
        };

        PendingFetch {
            response: Box::pin(run_fetch(url, signal)),
            abort,
        }
    }
}

async fn run_fetch(
    url: String,
    signal: Option<AbortSignal>,
) -> Result<TileServiceResponse, TransportError> {
    let window =
        web_sys::window().ok_or_else(|| TransportError::Network("no window".to_string()))?;

    let init = RequestInit::new();
    init.set_method("GET");
    if let Some(signal) = &signal {
        init.set_signal(Some(signal));
    }

    let request = Request::new_with_str_and_init(&url, &init)
        .map_err(|e| TransportError::Network(js_error_text(&e)))?;

    let response_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| classify_fetch_error(&e))?;
    let response: Response = response_value
        .dyn_into()
        .map_err(|_| TransportError::Network("unexpected fetch result".to_string()))?;

    let status = response.status();
    let body_promise = response
        .text()
        .map_err(|e| TransportError::Network(js_error_text(&e)))?;
    let body_value = JsFuture::from(body_promise)
        .await
        .map_err(|e| classify_fetch_error(&e))?;
    let body = body_value.as_string().unwrap_or_default();

    if !response.ok() {
        return Err(TransportError::Status { status, body });
    }

    TileServiceResponse::from_json(&body)
}

fn classify_fetch_error(error: &JsValue) -> TransportError {
    if let Some(exception) = error.dyn_ref::<web_sys::DomException>() {
        if exception.name() == "AbortError" {
            return TransportError::Cancelled;
        }
        return TransportError::Network(exception.message());
    }
    TransportError::Network(js_error_text(error))
}

fn js_error_text(error: &JsValue) -> String {
    error.as_string().unwrap_or_else(|| format!("{error:?}"))
}
