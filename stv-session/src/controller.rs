//! The session state machine: one outstanding request, append-only
//! layer groups, last-request-wins supersession.

use futures::future::LocalBoxFuture;
use log::{info, warn};

use stv_imagery::error::{TransportError, ValidationError};
use stv_imagery::layer::{LayerGroup, TileServiceResponse};
use stv_imagery::request::{build_request, DateRangeInput, RequestDescriptor};

use crate::transport::{AbortGuard, PendingFetch, TileTransport};
use crate::viewport::ViewportSource;

/// Identifies one load attempt. A token is stale once any newer attempt
/// has started (or the session was torn down); stale resolutions are
/// discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadToken(u64);

/// Synchronous outcome of [`SessionController::request_load`].
pub enum LoadStart {
    /// Map not ready, or its bounds unavailable: silent no-op.
    Ignored,
    /// Validation failed; no network call was made. The list is in
    /// fixed reporting order and meant for direct display.
    Rejected(Vec<ValidationError>),
    /// A request is in flight. Await `response`, then feed the outcome
    /// back through [`SessionController::resolve`] with this token.
    Dispatched {
        token: LoadToken,
        response: LocalBoxFuture<'static, Result<TileServiceResponse, TransportError>>,
    },
}

/// Outcome of feeding a response back into the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadResolution {
    /// Superseded, cancelled, or post-teardown: discarded without
    /// touching any state.
    Stale,
    /// A new layer group was prepended.
    Loaded { group_id: String, layer_count: usize },
    /// The attempt failed; nothing was appended. For the UI to display.
    Failed(TransportError),
}

struct InFlight {
    token: LoadToken,
    request: RequestDescriptor,
    abort: AbortGuard,
}

/// Owns the session state described in the data model: the layer
/// groups (most-recent-first), the loading flag, and the map-ready
/// gate. All mutation goes through its operations.
pub struct SessionController {
    transport: Box<dyn TileTransport>,
    clock: Box<dyn Fn() -> i64>,
    viewport: Option<Box<dyn ViewportSource>>,
    generation: u64,
    in_flight: Option<InFlight>,
    layer_groups: Vec<LayerGroup>,
}

impl SessionController {
    /// `clock` supplies millisecond timestamps for group ids
    /// (`js_sys::Date::now()` in the browser, fixed values in tests).
    pub fn new(transport: Box<dyn TileTransport>, clock: Box<dyn Fn() -> i64>) -> Self {
        Self {
            transport,
            clock,
            viewport: None,
            generation: 0,
            in_flight: None,
            layer_groups: Vec::new(),
        }
    }

    /// Record the map capability. The first call wins; repeated ready
    /// notifications are ignored.
    pub fn on_map_ready(&mut self, viewport: Box<dyn ViewportSource>) {
        if self.viewport.is_some() {
            return;
        }
        info!("map ready");
        self.viewport = Some(viewport);
    }

    pub fn is_map_ready(&self) -> bool {
        self.viewport.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Loaded groups, most recent first.
    pub fn layer_groups(&self) -> &[LayerGroup] {
        &self.layer_groups
    }

    /// Start a load for the given date inputs against the current
    /// viewport. Supersedes any in-flight attempt: its transport is
    /// asked to abort and its eventual resolution becomes stale, even
    /// when this attempt stops at validation.
    pub fn request_load(&mut self, dates: &DateRangeInput) -> LoadStart {
        if self.viewport.is_none() {
            return LoadStart::Ignored;
        }

        if let Some(previous) = self.in_flight.take() {
            info!("superseding in-flight imagery request");
            previous.abort.fire();
        }
        self.generation += 1;

        let bounds = match self.viewport.as_ref().and_then(|v| v.viewport_bounds()) {
            Some(bounds) => bounds,
            None => return LoadStart::Ignored,
        };

        let request = match build_request(dates, bounds) {
            Ok(request) => request,
            Err(errors) => return LoadStart::Rejected(errors),
        };

        let PendingFetch { response, abort } = self.transport.dispatch(&request);
        let token = LoadToken(self.generation);
        info!(
            "loading imagery for {} over {}",
            request.date_range, request.bbox
        );
        self.in_flight = Some(InFlight {
            token,
            request,
            abort,
        });

        LoadStart::Dispatched { token, response }
    }

    /// Feed a resolved response back in. Only the most recently issued
    /// token may mutate state; everything else is [`LoadResolution::Stale`].
    pub fn resolve(
        &mut self,
        token: LoadToken,
        outcome: Result<TileServiceResponse, TransportError>,
    ) -> LoadResolution {
        let is_current = self
            .in_flight
            .as_ref()
            .map(|in_flight| in_flight.token == token)
            .unwrap_or(false);
        if !is_current {
            return LoadResolution::Stale;
        }
        let Some(in_flight) = self.in_flight.take() else {
            return LoadResolution::Stale;
        };

        match outcome {
            Ok(response) => {
                let group = LayerGroup::from_response(&in_flight.request, response, (self.clock)());
                info!(
                    "loaded {} tile layers for {}",
                    group.layers.len(),
                    group.date_range
                );
                let resolution = LoadResolution::Loaded {
                    group_id: group.id.clone(),
                    layer_count: group.layers.len(),
                };
                self.layer_groups.insert(0, group);
                resolution
            }
            Err(TransportError::Cancelled) => LoadResolution::Stale,
            Err(error) => {
                warn!("imagery load failed: {error}");
                LoadResolution::Failed(error)
            }
        }
    }

    /// End of session: abort anything in flight and release the map
    /// capability. Late resolutions after teardown are stale.
    pub fn teardown(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.abort.fire();
        }
        self.generation += 1;
        self.viewport = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use stv_imagery::bounding_box::ViewportBounds;
    use stv_imagery::layer::{ImageMeta, LayerRecord};

    struct StubViewport(ViewportBounds);

    impl ViewportSource for StubViewport {
        fn viewport_bounds(&self) -> Option<ViewportBounds> {
            Some(self.0)
        }
    }

    struct GoneViewport;

    impl ViewportSource for GoneViewport {
        fn viewport_bounds(&self) -> Option<ViewportBounds> {
            None
        }
    }

    /// One dispatched request as seen by the fake transport.
    struct Dispatch {
        request: RequestDescriptor,
        sender: Option<oneshot::Sender<Result<TileServiceResponse, TransportError>>>,
        aborted: Rc<Cell<bool>>,
    }

    /// Records every dispatch and lets tests resolve them out of order.
    #[derive(Clone, Default)]
    struct FakeTransport {
        dispatches: Rc<RefCell<Vec<Dispatch>>>,
    }

    impl TileTransport for FakeTransport {
        fn dispatch(&self, request: &RequestDescriptor) -> PendingFetch {
            let (sender, receiver) = oneshot::channel();
            let aborted = Rc::new(Cell::new(false));
            self.dispatches.borrow_mut().push(Dispatch {
                request: request.clone(),
                sender: Some(sender),
                aborted: aborted.clone(),
            });
            PendingFetch {
                response: Box::pin(async move {
                    receiver.await.unwrap_or(Err(TransportError::Cancelled))
                }),
                abort: AbortGuard::new(move || aborted.set(true)),
            }
        }
    }

    impl FakeTransport {
        fn dispatched_count(&self) -> usize {
            self.dispatches.borrow().len()
        }

        fn aborted(&self, index: usize) -> bool {
            self.dispatches.borrow()[index].aborted.get()
        }

        fn respond(&self, index: usize, outcome: Result<TileServiceResponse, TransportError>) {
            let sender = self.dispatches.borrow_mut()[index].sender.take().unwrap();
            let _ = sender.send(outcome);
        }

        fn request(&self, index: usize) -> RequestDescriptor {
            self.dispatches.borrow()[index].request.clone()
        }
    }

    fn controller_with(transport: FakeTransport) -> SessionController {
        SessionController::new(Box::new(transport), Box::new(|| 1_736_000_000_000))
    }

    fn ready_controller(transport: FakeTransport) -> SessionController {
        let mut controller = controller_with(transport);
        controller.on_map_ready(Box::new(StubViewport(ViewportBounds::new(
            -0.2, 51.4, 0.0, 51.6,
        ))));
        controller
    }

    fn january() -> DateRangeInput {
        DateRangeInput::new("2025-01-01", "2025-01-31")
    }

    fn two_layer_response() -> TileServiceResponse {
        TileServiceResponse {
            layers: vec![
                LayerRecord {
                    label: "2025-01 (Sentinel-2)".to_string(),
                    tms_url: "https://tiles.example.com/a/{z}/{x}/{y}".to_string(),
                    start: "2025-01-01".to_string(),
                    end: "2025-01-31".to_string(),
                    images: vec![ImageMeta {
                        id: "S2A_1".to_string(),
                        date: "2025-01-03".to_string(),
                        latitude: 51.5,
                        longitude: -0.1,
                    }],
                },
                LayerRecord {
                    label: "2025-02 (Sentinel-2)".to_string(),
                    tms_url: "https://tiles.example.com/b/{z}/{x}/{y}".to_string(),
                    start: "2025-02-01".to_string(),
                    end: "2025-02-28".to_string(),
                    images: vec![],
                },
            ],
        }
    }

    #[test]
    fn test_load_before_map_ready_is_noop() {
        let transport = FakeTransport::default();
        let mut controller = controller_with(transport.clone());

        assert!(matches!(
            controller.request_load(&january()),
            LoadStart::Ignored
        ));
        assert_eq!(transport.dispatched_count(), 0);
        assert!(!controller.is_loading());
        assert!(controller.layer_groups().is_empty());
    }

    #[test]
    fn test_unreadable_viewport_is_noop() {
        let transport = FakeTransport::default();
        let mut controller = controller_with(transport.clone());
        controller.on_map_ready(Box::new(GoneViewport));

        assert!(matches!(
            controller.request_load(&january()),
            LoadStart::Ignored
        ));
        assert_eq!(transport.dispatched_count(), 0);
        assert!(!controller.is_loading());
    }

    #[test]
    fn test_validation_failure_is_synchronous_and_networkless() {
        let transport = FakeTransport::default();
        let mut controller = ready_controller(transport.clone());

        let start = controller.request_load(&DateRangeInput::new("2025-02-01", "2025-01-01"));
        match start {
            LoadStart::Rejected(errors) => {
                assert_eq!(errors, vec![ValidationError::DateOrder]);
            }
            _ => panic!("expected rejection"),
        }
        assert_eq!(transport.dispatched_count(), 0);
        assert!(!controller.is_loading());
    }

    #[test]
    fn test_successful_load_prepends_one_group() {
        let transport = FakeTransport::default();
        let mut controller = ready_controller(transport.clone());

        let token = match controller.request_load(&january()) {
            LoadStart::Dispatched { token, .. } => token,
            _ => panic!("expected dispatch"),
        };
        assert!(controller.is_loading());

        let resolution = controller.resolve(token, Ok(two_layer_response()));
        assert_eq!(
            resolution,
            LoadResolution::Loaded {
                group_id: "group-1736000000000".to_string(),
                layer_count: 2
            }
        );
        assert!(!controller.is_loading());

        let groups = controller.layer_groups();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].layers.len(), 2);
        assert_eq!(groups[0].date_range.to_string(), "2025-01-01 to 2025-01-31");
        assert_eq!(groups[0].layers[0].name, "2025-01 (Sentinel-2)");
    }

    #[test]
    fn test_http_failure_leaves_groups_unchanged() {
        let transport = FakeTransport::default();
        let mut controller = ready_controller(transport.clone());

        let token = match controller.request_load(&january()) {
            LoadStart::Dispatched { token, .. } => token,
            _ => panic!("expected dispatch"),
        };
        let resolution = controller.resolve(
            token,
            Err(TransportError::Status {
                status: 500,
                body: "internal error".to_string(),
            }),
        );
        assert!(matches!(resolution, LoadResolution::Failed(_)));
        assert!(!controller.is_loading());
        assert!(controller.layer_groups().is_empty());
    }

    #[test]
    fn test_second_load_supersedes_first() {
        let transport = FakeTransport::default();
        let mut controller = ready_controller(transport.clone());

        let first = match controller.request_load(&january()) {
            LoadStart::Dispatched { token, .. } => token,
            _ => panic!("expected dispatch"),
        };
        let second = match controller.request_load(&january()) {
            LoadStart::Dispatched { token, .. } => token,
            _ => panic!("expected dispatch"),
        };

        assert_eq!(transport.dispatched_count(), 2);
        assert!(transport.aborted(0));
        assert!(!transport.aborted(1));

        // First response arrives late: discarded, still loading.
        assert_eq!(
            controller.resolve(first, Ok(two_layer_response())),
            LoadResolution::Stale
        );
        assert!(controller.is_loading());
        assert!(controller.layer_groups().is_empty());

        // Second response lands.
        assert!(matches!(
            controller.resolve(second, Ok(two_layer_response())),
            LoadResolution::Loaded { .. }
        ));
        assert!(!controller.is_loading());
        assert_eq!(controller.layer_groups().len(), 1);
    }

    #[test]
    fn test_validation_failure_still_supersedes_in_flight() {
        let transport = FakeTransport::default();
        let mut controller = ready_controller(transport.clone());

        let first = match controller.request_load(&january()) {
            LoadStart::Dispatched { token, .. } => token,
            _ => panic!("expected dispatch"),
        };
        let start = controller.request_load(&DateRangeInput::new("", ""));
        assert!(matches!(start, LoadStart::Rejected(_)));
        assert!(transport.aborted(0));
        assert_eq!(
            controller.resolve(first, Ok(two_layer_response())),
            LoadResolution::Stale
        );
        assert!(controller.layer_groups().is_empty());
    }

    #[test]
    fn test_cancelled_outcome_is_silent() {
        let transport = FakeTransport::default();
        let mut controller = ready_controller(transport.clone());

        let token = match controller.request_load(&january()) {
            LoadStart::Dispatched { token, .. } => token,
            _ => panic!("expected dispatch"),
        };
        assert_eq!(
            controller.resolve(token, Err(TransportError::Cancelled)),
            LoadResolution::Stale
        );
        assert!(!controller.is_loading());
        assert!(controller.layer_groups().is_empty());
    }

    #[test]
    fn test_resolution_after_teardown_is_stale() {
        let transport = FakeTransport::default();
        let mut controller = ready_controller(transport.clone());

        let token = match controller.request_load(&january()) {
            LoadStart::Dispatched { token, .. } => token,
            _ => panic!("expected dispatch"),
        };
        controller.teardown();
        assert!(transport.aborted(0));
        assert!(!controller.is_map_ready());
        assert_eq!(
            controller.resolve(token, Ok(two_layer_response())),
            LoadResolution::Stale
        );
        assert!(controller.layer_groups().is_empty());
    }

    #[test]
    fn test_repeated_map_ready_keeps_first_viewport() {
        let transport = FakeTransport::default();
        let mut controller = controller_with(transport.clone());
        controller.on_map_ready(Box::new(StubViewport(ViewportBounds::new(
            -0.2, 51.4, 0.0, 51.6,
        ))));
        controller.on_map_ready(Box::new(StubViewport(ViewportBounds::new(
            10.0, 20.0, 30.0, 40.0,
        ))));

        match controller.request_load(&january()) {
            LoadStart::Dispatched { .. } => {}
            _ => panic!("expected dispatch"),
        }
        assert_eq!(transport.request(0).bbox.to_query_value(), "-0.2,51.4,0,51.6");
    }

    #[test]
    fn test_groups_accumulate_most_recent_first() {
        let transport = FakeTransport::default();
        let stamp = Rc::new(Cell::new(1_000i64));
        let clock_stamp = stamp.clone();
        let mut controller = SessionController::new(
            Box::new(transport.clone()),
            Box::new(move || clock_stamp.get()),
        );
        controller.on_map_ready(Box::new(StubViewport(ViewportBounds::new(
            -0.2, 51.4, 0.0, 51.6,
        ))));

        for expected_ms in [1_000i64, 2_000] {
            stamp.set(expected_ms);
            let token = match controller.request_load(&january()) {
                LoadStart::Dispatched { token, .. } => token,
                _ => panic!("expected dispatch"),
            };
            assert!(matches!(
                controller.resolve(token, Ok(two_layer_response())),
                LoadResolution::Loaded { .. }
            ));
        }

        let groups = controller.layer_groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].created_at_ms, 2_000);
        assert_eq!(groups[1].created_at_ms, 1_000);
    }

    #[test]
    fn test_dispatched_future_delivers_transport_outcome() {
        let transport = FakeTransport::default();
        let mut controller = ready_controller(transport.clone());

        let (token, response) = match controller.request_load(&january()) {
            LoadStart::Dispatched { token, response } => (token, response),
            _ => panic!("expected dispatch"),
        };
        transport.respond(0, Ok(two_layer_response()));

        let outcome = block_on(response);
        assert!(matches!(
            controller.resolve(token, outcome),
            LoadResolution::Loaded { .. }
        ));
        assert_eq!(controller.layer_groups().len(), 1);
    }

    #[test]
    fn test_abort_drops_channel_into_cancelled_outcome() {
        let transport = FakeTransport::default();
        let mut controller = ready_controller(transport.clone());

        let (first, first_response) = match controller.request_load(&january()) {
            LoadStart::Dispatched { token, response } => (token, response),
            _ => panic!("expected dispatch"),
        };
        let _second = controller.request_load(&january());

        // Superseded sender dropped: the pending future resolves to
        // Cancelled, which the controller swallows.
        transport.dispatches.borrow_mut()[0].sender = None;
        let outcome = block_on(first_response);
        assert_eq!(outcome, Err(TransportError::Cancelled));
        assert_eq!(controller.resolve(first, outcome), LoadResolution::Stale);
        assert!(controller.is_loading());
    }
}
