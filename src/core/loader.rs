//! Provider readiness handshake
//!
//! One-time load sequence: `Idle -> Loading -> {Ready | Failed}`. The three
//! possible writers (ready callback, ready-error callback, deadline) race
//! through a [`Settlement`], so only the first resolution is honored and a
//! late provider callback has no observable effect.

use std::time::Duration;

use crate::core::error::{classify, Category, Diagnostic, RawFailure};
use crate::core::provider::MapProvider;
use crate::core::settle::Settlement;

/// Deadline for the provider ready handshake.
pub const DEFAULT_READY_TIMEOUT: Duration = Duration::from_secs(8);

/// Load sequencer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
enum LoadOutcome {
    Ready,
    Failed(Diagnostic),
}

/// Manages the one-time asynchronous readiness handshake with the provider.
///
/// Reentrant [`begin`](LoadSequencer::begin) calls while loading are no-ops.
/// A failure is surfaced once via [`take_failure`](LoadSequencer::take_failure),
/// which resets the sequencer to `Idle` so an explicit user-triggered reload
/// may retry. There is no automatic retry.
#[derive(Debug)]
pub struct LoadSequencer {
    state: LoadState,
    outcome: Settlement<LoadOutcome>,
    last_failure: Option<Diagnostic>,
    deadline: Duration,
}

impl LoadSequencer {
    pub fn new() -> Self {
        Self::with_deadline(DEFAULT_READY_TIMEOUT)
    }

    pub fn with_deadline(deadline: Duration) -> Self {
        Self {
            state: LoadState::Idle,
            outcome: Settlement::new(),
            last_failure: None,
            deadline,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Enter the loading state. No-op while already loading or ready.
    pub fn begin(&mut self) -> LoadState {
        if self.state == LoadState::Idle {
            self.state = LoadState::Loading;
            self.outcome = Settlement::new();
        }
        self.state
    }

    /// Provider signalled readiness. Honored only as the first settlement of
    /// an in-flight load.
    pub fn settle_ready(&mut self) -> LoadState {
        if self.state == LoadState::Loading && self.outcome.settle(LoadOutcome::Ready) {
            self.state = LoadState::Ready;
        }
        self.state
    }

    /// Provider signalled a ready-error or the transport failed.
    pub fn settle_failure(&mut self, raw: RawFailure) -> LoadState {
        let diagnostic = classify(&raw);
        self.settle_failed_with(diagnostic)
    }

    /// The deadline elapsed with neither a ready nor an error callback.
    pub fn settle_timeout(&mut self) -> LoadState {
        self.settle_failed_with(Diagnostic {
            category: Category::LoadTimeout,
            raw_message: format!("provider not ready within {:?}", self.deadline),
            advice: Some("Map provider did not become ready in time - reload to retry".to_string()),
        })
    }

    fn settle_failed_with(&mut self, diagnostic: Diagnostic) -> LoadState {
        if self.state == LoadState::Loading
            && self.outcome.settle(LoadOutcome::Failed(diagnostic.clone()))
        {
            self.state = LoadState::Failed;
            self.last_failure = Some(diagnostic);
        }
        self.state
    }

    /// Surface the failure diagnostic and reset to `Idle`, permitting one
    /// more explicit attempt.
    pub fn take_failure(&mut self) -> Option<Diagnostic> {
        if self.state != LoadState::Failed {
            return None;
        }
        self.state = LoadState::Idle;
        self.last_failure.take()
    }

    /// Drive one full handshake against the provider under the deadline.
    ///
    /// The timeout does not cancel the underlying provider call; it only
    /// stops waiting for it. A settlement that arrives afterwards is ignored.
    pub async fn run<P: MapProvider>(&mut self, provider: &P) -> LoadState {
        if self.begin() != LoadState::Loading {
            return self.state;
        }

        match tokio::time::timeout(self.deadline, provider.await_ready()).await {
            Ok(Ok(())) => self.settle_ready(),
            Ok(Err(raw)) => self.settle_failure(raw),
            Err(_elapsed) => self.settle_timeout(),
        }
    }
}

impl Default for LoadSequencer {
    fn default() -> Self {
        Self::new()
    }
}
