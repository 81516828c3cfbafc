//! Session orchestration
//!
//! Owns the session state and drives one build attempt at a time through
//! geocoding and route construction. A monotonically increasing attempt
//! counter guarantees that a stale attempt's result is never applied after a
//! newer attempt has started; cancellation is cooperative (late results are
//! discarded, never rendered).

use std::time::Duration;

use crate::core::advisor::{self, Recommendation};
use crate::core::error::{Category, Error, Result};
use crate::core::geo::{fmt_dist, fmt_time, Coordinate, Waypoint};
use crate::core::geocode::GeocodingClient;
use crate::core::loader::{LoadSequencer, LoadState};
use crate::core::provider::{MapProvider, Notifier, RouteHandle, RouteResult};
use crate::core::route::RouteBuilder;
use crate::core::session::SessionState;
use crate::core::vehicle::VehicleProfile;

const TOAST_ERROR: Duration = Duration::from_millis(4000);
const TOAST_SUCCESS: Duration = Duration::from_millis(2000);
const TOAST_SHORT: Duration = Duration::from_millis(1500);

/// The route planning orchestrator: one instance per session, exclusive
/// owner of the [`SessionState`].
pub struct RoutePlanner<P, N> {
    provider: P,
    notifier: N,
    loader: LoadSequencer,
    session: SessionState,
    /// Monotonic build attempt counter; the newest attempt wins
    attempt_counter: u64,
}

impl<P: MapProvider, N: Notifier> RoutePlanner<P, N> {
    pub fn new(provider: P, notifier: N) -> Self {
        Self {
            provider,
            notifier,
            loader: LoadSequencer::new(),
            session: SessionState::new(),
            attempt_counter: 0,
        }
    }

    /// Override the provider ready deadline (tests, slow environments).
    pub fn with_ready_deadline(provider: P, notifier: N, deadline: Duration) -> Self {
        Self {
            loader: LoadSequencer::with_deadline(deadline),
            ..Self::new(provider, notifier)
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Advisory evaluation over the current session snapshot.
    pub fn recommendations(&self) -> Vec<Recommendation> {
        advisor::evaluate(&self.session)
    }

    /// Run the one-time readiness handshake.
    ///
    /// On `Ready` returns the initial advisory evaluation. On failure the
    /// diagnostic is surfaced through the notifier, the sequencer resets to
    /// `Idle`, and the error is returned; retry is a fresh user action.
    pub async fn start(&mut self) -> Result<Vec<Recommendation>> {
        let state = self.loader.run(&self.provider).await;
        match state {
            LoadState::Ready => {
                self.session.load_state = LoadState::Ready;
                Ok(self.recommendations())
            }
            LoadState::Failed => {
                let diagnostic = self
                    .loader
                    .take_failure()
                    .expect("failed load always carries a diagnostic");
                self.session.load_state = self.loader.state();
                self.notifier.show(diagnostic.user_message(), TOAST_ERROR);
                if diagnostic.category == Category::LoadTimeout {
                    Err(Error::LoadTimeout)
                } else {
                    Err(Error::Provider(diagnostic))
                }
            }
            other => {
                self.session.load_state = other;
                Ok(self.recommendations())
            }
        }
    }

    pub fn set_start_address(&mut self, text: impl Into<String>) {
        self.session.start_text = text.into();
    }

    pub fn set_finish_address(&mut self, text: impl Into<String>) {
        self.session.finish_text = text.into();
    }

    /// Append an intermediate point (typically a map click).
    pub fn add_via_point(&mut self, position: Coordinate) {
        self.session.via_points.push(position);
        let count = self.session.via_points.len();
        self.notifier
            .show(&format!("Added via point ({count})"), TOAST_SUCCESS);
    }

    pub fn clear_via_points(&mut self) {
        self.session.via_points.clear();
        self.notifier.show("Via points cleared", TOAST_SHORT);
    }

    pub fn select_vehicle(&mut self, profile: VehicleProfile) {
        self.session.vehicle = profile;
    }

    pub fn set_alternatives(&mut self, count: u32) {
        self.session.alternatives_wanted = count;
    }

    /// Start a new build attempt, superseding any attempt still in flight.
    ///
    /// Exposed so an embedding event loop can drive interleaved attempts;
    /// [`build_route`](Self::build_route) composes this with
    /// [`apply_route`](Self::apply_route).
    pub fn begin_attempt(&mut self) -> u64 {
        self.attempt_counter += 1;
        self.session.build_in_flight = true;
        self.attempt_counter
    }

    /// Apply a finished attempt's result. Returns `false` (and renders
    /// nothing) when a newer attempt has started since `attempt` began.
    pub fn apply_route(&mut self, attempt: u64, result: RouteResult) -> bool {
        if attempt != self.attempt_counter {
            log::debug!("discarding stale route result from attempt {attempt}");
            return false;
        }
        // At most one rendered route: release the previous one first
        if let Some(previous) = self.session.active_route.take() {
            self.provider.unrender(&previous);
        }
        self.provider.render(&result.handle);
        self.session.active_route = Some(result.handle);
        true
    }

    /// One full build attempt: geocode start, geocode finish, construct the
    /// route, render it.
    ///
    /// On failure the partial results are discarded but the entered
    /// addresses and via points stay untouched so the user can retry.
    pub async fn build_route(&mut self) -> Result<RouteHandle> {
        let attempt = self.begin_attempt();
        let outcome = self.run_attempt(attempt).await;
        if attempt == self.attempt_counter {
            self.session.build_in_flight = false;
        }
        match outcome {
            Ok(handle) => Ok(handle),
            Err(err) => {
                self.notifier.show(&err.to_string(), TOAST_ERROR);
                Err(err)
            }
        }
    }

    async fn run_attempt(&mut self, attempt: u64) -> Result<RouteHandle> {
        // Start strictly before finish: the full point list cannot be
        // assembled until both are resolved
        let geocoder = GeocodingClient::new(&self.provider);
        let start = geocoder.resolve(&self.session.start_text).await?;
        let finish = geocoder.resolve(&self.session.finish_text).await?;

        let mut waypoints = Vec::with_capacity(self.session.via_points.len() + 2);
        waypoints.push(Waypoint::start(start));
        waypoints.extend(self.session.via_points.iter().copied().map(Waypoint::via));
        waypoints.push(Waypoint::finish(finish));
        let points: Vec<Coordinate> = waypoints.iter().map(|w| w.position).collect();

        let result = RouteBuilder::new(&self.provider)
            .build(&points, &self.session.vehicle, self.session.alternatives_wanted)
            .await?;

        let handle = result.handle;
        let best = result.best().cloned();
        if self.apply_route(attempt, result) {
            let message = match best {
                Some(alt) => format!(
                    "Route built: {}, {}",
                    fmt_dist(alt.distance_m),
                    fmt_time(alt.duration_s)
                ),
                None => "Route built".to_string(),
            };
            self.notifier.show(&message, TOAST_SUCCESS);
        }
        Ok(handle)
    }
}
