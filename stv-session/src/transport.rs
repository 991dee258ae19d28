//! The injected HTTP-fetch capability.

use futures::future::LocalBoxFuture;

use stv_imagery::error::TransportError;
use stv_imagery::layer::TileServiceResponse;
use stv_imagery::request::RequestDescriptor;

/// Fire-once hook asking the transport to abort its request.
///
/// Cancellation is cooperative: firing the guard requests the abort but
/// never waits for it; the superseded response is discarded by token
/// comparison whenever it eventually resolves.
pub struct AbortGuard(Option<Box<dyn FnOnce()>>);

impl AbortGuard {
    pub fn new(abort: impl FnOnce() + 'static) -> Self {
        Self(Some(Box::new(abort)))
    }

    /// A guard for transports with nothing to abort.
    pub fn noop() -> Self {
        Self(None)
    }

    pub fn fire(mut self) {
        if let Some(abort) = self.0.take() {
            abort();
        }
    }
}

/// A dispatched imagery request: the pending response plus its abort
/// hook. The future is `LocalBoxFuture` because the browser transport
/// is not `Send`.
pub struct PendingFetch {
    pub response: LocalBoxFuture<'static, Result<TileServiceResponse, TransportError>>,
    pub abort: AbortGuard,
}

/// Capability for issuing the tile-listing GET.
///
/// Implementations: `fetch()` with an `AbortController` in the browser,
/// channel-backed fakes in tests.
pub trait TileTransport {
    fn dispatch(&self, request: &RequestDescriptor) -> PendingFetch;
}
