//! Integration tests for the transroute orchestrator
//!
//! These tests drive the full planning flow against a scripted in-process
//! provider, and the feature feed against a wiremock HTTP server. No real
//! mapping provider is contacted.

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use transroute::{
    classify, load_markers, Category, ControlAction, Coordinate, Error, LoadState, MapProvider,
    Notifier, RawFailure, RouteAlternative, RouteHandle, RoutePlanner, RouteRequest, RouteResult,
    VehicleProfile,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Scripted provider: canned geocodes, one canned route, call recording.
#[derive(Default)]
struct FakeProvider {
    geocodes: HashMap<String, Coordinate>,
    route: Option<RouteResult>,
    ready_failure: Option<RawFailure>,
    never_ready: bool,
    rendered: RefCell<Vec<RouteHandle>>,
    unrendered: RefCell<Vec<RouteHandle>>,
    requests: RefCell<Vec<RouteRequest>>,
}

impl FakeProvider {
    fn with_route(route: RouteResult) -> Self {
        let mut geocodes = HashMap::new();
        geocodes.insert("Moscow".to_string(), Coordinate::new(55.75, 37.62));
        geocodes.insert("Ryazan".to_string(), Coordinate::new(54.0, 39.0));
        Self {
            geocodes,
            route: Some(route),
            ..Self::default()
        }
    }
}

impl MapProvider for FakeProvider {
    async fn await_ready(&self) -> Result<(), RawFailure> {
        if self.never_ready {
            std::future::pending::<()>().await;
        }
        match &self.ready_failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(()),
        }
    }

    async fn geocode_once(&self, query: &str) -> Result<Option<Coordinate>, RawFailure> {
        Ok(self.geocodes.get(query).copied())
    }

    async fn build_route(&self, request: &RouteRequest) -> Result<RouteResult, RawFailure> {
        self.requests.borrow_mut().push(request.clone());
        Ok(self.route.clone().expect("scripted route"))
    }

    fn render(&self, handle: &RouteHandle) {
        self.rendered.borrow_mut().push(*handle);
    }

    fn unrender(&self, handle: &RouteHandle) {
        self.unrendered.borrow_mut().push(*handle);
    }
}

#[derive(Default)]
struct FakeNotifier {
    messages: RefCell<Vec<String>>,
}

impl Notifier for FakeNotifier {
    fn show(&self, message: &str, _duration: Duration) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

fn one_route(handle: u64) -> RouteResult {
    RouteResult {
        handle: RouteHandle(handle),
        alternatives: vec![RouteAlternative {
            distance_m: 196_000.0,
            duration_s: 10_800.0,
        }],
    }
}

#[tokio::test]
async fn test_full_truck_planning_flow() {
    init_logging();
    let provider = FakeProvider::with_route(one_route(1));
    let mut planner = RoutePlanner::new(provider, FakeNotifier::default());

    // Handshake first: ready provider yields the initial advisory set
    let recs = planner.start().await.unwrap();
    assert!(recs
        .iter()
        .any(|r| r.target_id == "build-route" && r.action == ControlAction::Disable));
    assert_eq!(planner.session().load_state, LoadState::Ready);

    planner.set_start_address("Moscow");
    planner.set_finish_address("Ryazan");
    planner.select_vehicle(VehicleProfile::truck_heavy());

    // With both addresses entered the build control flips to enabled
    let recs = planner.recommendations();
    assert!(recs
        .iter()
        .any(|r| r.target_id == "build-route" && r.action == ControlAction::Enable));
    assert!(recs
        .iter()
        .any(|r| r.target_id == "veh-truck-heavy" && r.action == ControlAction::Highlight));

    let handle = planner.build_route().await.unwrap();
    assert_eq!(handle, RouteHandle(1));
    assert_eq!(planner.session().active_route, Some(RouteHandle(1)));

    // The provider saw a truck request carrying only the weight constraint
    let request = serde_json::to_value(&planner.provider().requests.borrow()[0]).unwrap();
    assert_eq!(request["params"]["routingMode"], "truck");
    assert_eq!(request["params"]["truck"]["weight"], 55_000);
    assert!(request["params"]["truck"].get("axleCount").is_none());
    assert_eq!(request["referencePoints"][0]["lat"], 55.75);
    assert_eq!(request["referencePoints"][1]["lat"], 54.0);
}

#[tokio::test]
async fn test_rebuild_replaces_rendered_route() {
    let provider = FakeProvider::with_route(one_route(1));
    let mut planner = RoutePlanner::new(provider, FakeNotifier::default());
    planner.set_start_address("Moscow");
    planner.set_finish_address("Ryazan");

    planner.build_route().await.unwrap();
    planner.provider_mut().route = Some(one_route(2));
    planner.build_route().await.unwrap();

    // Old handle released before the new one was rendered
    assert_eq!(planner.provider().unrendered.borrow().as_slice(), &[RouteHandle(1)]);
    assert_eq!(
        planner.provider().rendered.borrow().as_slice(),
        &[RouteHandle(1), RouteHandle(2)]
    );
    assert_eq!(planner.session().active_route, Some(RouteHandle(2)));
}

#[tokio::test(start_paused = true)]
async fn test_ready_timeout_surfaces_and_permits_retry() {
    let provider = FakeProvider {
        never_ready: true,
        ..FakeProvider::default()
    };
    let mut planner = RoutePlanner::new(provider, FakeNotifier::default());

    let err = planner.start().await.unwrap_err();
    assert_eq!(err, Error::LoadTimeout);
    assert_eq!(planner.session().load_state, LoadState::Idle);
    assert_eq!(planner.notifier().messages.borrow().len(), 1);

    // An explicit reload may try again
    planner.provider_mut().never_ready = false;
    assert!(planner.start().await.is_ok());
    assert_eq!(planner.session().load_state, LoadState::Ready);
}

#[tokio::test]
async fn test_ready_error_is_classified() {
    let provider = FakeProvider {
        ready_failure: Some(RawFailure::message("Invalid API key supplied")),
        ..FakeProvider::default()
    };
    let mut planner = RoutePlanner::new(provider, FakeNotifier::default());

    match planner.start().await.unwrap_err() {
        Error::Provider(diag) => assert_eq!(diag.category, Category::Credential),
        other => panic!("expected classified provider error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_feature_feed_happy_path() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/frames_ready.geojson"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "properties": { "name": "Frame M-10", "comment": "northbound", "date": "2024-11-02" },
                    "geometry": { "type": "Point", "coordinates": [55.9, 37.3] }
                },
                {
                    "geometry": { "type": "Point", "coordinates": [56.1, 36.8] }
                },
                {
                    "properties": { "name": "no geometry, skipped" }
                }
            ]
        })))
        .mount(&server)
        .await;

    let url = format!("{}/frames_ready.geojson", server.uri());
    let markers = load_markers(&url).await;

    assert_eq!(markers.len(), 2);
    assert_eq!(markers[0].name, "Frame M-10");
    assert_eq!(markers[0].position, Coordinate::new(55.9, 37.3));
    assert_eq!(markers[1].name, "Weight frame");
}

#[tokio::test]
async fn test_feature_feed_degrades_on_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/frames_ready.geojson"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let url = format!("{}/frames_ready.geojson", server.uri());
    assert!(load_markers(&url).await.is_empty());
}

#[tokio::test]
async fn test_feature_feed_degrades_on_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/frames_ready.geojson"))
        .respond_with(ResponseTemplate::new(200).set_body_string("this is not geojson"))
        .mount(&server)
        .await;

    let url = format!("{}/frames_ready.geojson", server.uri());
    assert!(load_markers(&url).await.is_empty());
}

#[tokio::test]
async fn test_feature_feed_degrades_when_unreachable() {
    // Nothing listens on this port
    assert!(load_markers("http://127.0.0.1:9/frames_ready.geojson").await.is_empty());
}

#[test]
fn test_classifier_round_trip_through_public_api() {
    let diag = classify(&RawFailure::message("Failed to bundle \"package.search\""));
    assert_eq!(diag.category, Category::Bundle);
}
