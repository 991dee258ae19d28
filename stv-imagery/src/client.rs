//! Native HTTP client for the imagery service.
//!
//! Compiled only with the `api` feature; the browser front end uses its
//! own `fetch()`-based transport instead.

use log::info;
use reqwest::Client;

use crate::error::TransportError;
use crate::layer::TileServiceResponse;
use crate::request::RequestDescriptor;

/// Issue a single tile-listing GET and decode the response.
///
/// Non-2xx statuses carry the response body in the error so the caller
/// can show the service's own message (the service reports "no imagery
/// found" as HTTP 400 with an explanatory body).
pub async fn fetch_tiles(
    client: &Client,
    base_url: &str,
    request: &RequestDescriptor,
) -> Result<TileServiceResponse, TransportError> {
    let url = request.service_url(base_url);
    info!("GET {url}");

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| TransportError::Network(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| TransportError::Network(e.to_string()))?;

    if !status.is_success() {
        return Err(TransportError::Status {
            status: status.as_u16(),
            body,
        });
    }

    TileServiceResponse::from_json(&body)
}
