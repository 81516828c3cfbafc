//! Error taxonomy and failure classification for transroute
//!
//! Provider failures arrive in heterogeneous shapes (plain strings, event
//! payloads, transport errors). Everything is normalized to one message
//! before being matched against a priority-ordered rule table.

use serde_json::Value;
use thiserror::Error;

/// Diagnostic category assigned by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// A provider feature package/module failed to load or bundle
    Bundle,
    /// The provider script was blocked by a Content-Security-Policy
    PolicyBlocked,
    /// Network or fetch-level failure
    Network,
    /// Invalid or missing API key
    Credential,
    /// Nothing matched
    Unknown,
    /// The provider never signalled readiness within the deadline
    LoadTimeout,
}

/// Structured diagnostic produced by [`classify`]. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub category: Category,
    pub raw_message: String,
    pub advice: Option<String>,
}

impl Diagnostic {
    /// The text worth showing to a user: the advice when we have one,
    /// otherwise the normalized raw message.
    pub fn user_message(&self) -> &str {
        match &self.advice {
            Some(advice) => advice,
            None if !self.raw_message.is_empty() => &self.raw_message,
            None => "Unknown map provider error",
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

/// A raw failure as delivered by the provider or transport layer, before
/// normalization. Covers the shapes seen in practice: bare strings, event
/// payloads with `message`/`reason` fields, transport errors, and entirely
/// empty rejections.
#[derive(Debug, Clone, PartialEq)]
pub enum RawFailure {
    Message(String),
    Payload(Value),
    Transport(String),
    Empty,
}

impl RawFailure {
    pub fn message(text: impl Into<String>) -> Self {
        RawFailure::Message(text.into())
    }
}

impl From<reqwest::Error> for RawFailure {
    fn from(err: reqwest::Error) -> Self {
        RawFailure::Transport(err.to_string())
    }
}

/// Main error type for transroute operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Address text was empty or whitespace-only
    #[error("Address is empty")]
    EmptyInput,

    /// Geocoding returned zero matches
    #[error("Address not found: '{0}'")]
    NotFound(String),

    /// A route needs at least a start and a finish point
    #[error("At least 2 route points are required, got {0}")]
    InsufficientWaypoints(usize),

    /// The provider answered but produced no route alternatives
    #[error("No route found between the given points")]
    RouteNotFound,

    /// The provider runtime never became ready within the deadline
    #[error("Map provider did not become ready in time")]
    LoadTimeout,

    /// Classified provider-level failure
    #[error("{0}")]
    Provider(Diagnostic),
}

impl Error {
    /// Classify a raw provider failure into an [`Error::Provider`].
    pub fn from_raw(raw: &RawFailure) -> Self {
        Error::Provider(classify(raw))
    }
}

/// Convenience result type for transroute operations
pub type Result<T> = std::result::Result<T, Error>;

/// One classification rule: a predicate over the lowercased normalized
/// message plus the category and fixed advice it maps to.
struct ClassifyRule {
    matches: fn(&str) -> bool,
    category: Category,
    advice: &'static str,
}

/// Priority-ordered rule table. First match wins.
static RULES: &[ClassifyRule] = &[
    ClassifyRule {
        matches: |text| text.contains("failed to bundle") || text.contains("is not in storage"),
        category: Category::Bundle,
        advice: "A map provider module failed to load - adjust the requested \
                 feature package list (e.g. package.standard) or drop unused packages",
    },
    ClassifyRule {
        matches: |text| {
            text.contains("content security policy")
                || text.contains("refused to load the script")
                || text.contains("blocked by csp")
        },
        category: Category::PolicyBlocked,
        advice: "The map provider script was blocked by CSP - allow \
                 api-maps.yandex.ru in script-src/script-src-elem",
    },
    ClassifyRule {
        matches: |text| {
            text.contains("failed to fetch")
                || text.contains("networkerror")
                || text.contains("network error")
                || text.contains("error sending request")
                || text.contains("connection refused")
                || text.contains("timed out")
        },
        category: Category::Network,
        advice: "Network failure while talking to the map provider - check connectivity and retry",
    },
    ClassifyRule {
        matches: |text| {
            text.contains("invalid api key")
                || text.contains("api key")
                || text.contains("forbidden")
                || text.contains("unauthorized")
        },
        category: Category::Credential,
        advice: "The map provider rejected the API key - verify the configured key",
    },
];

/// Reduce any raw failure shape to one canonical message string.
///
/// Payload objects are probed for `message`, then `reason`; anything else is
/// JSON-stringified. Null and empty shapes normalize to the empty string.
pub fn normalize(raw: &RawFailure) -> String {
    match raw {
        RawFailure::Message(text) => text.clone(),
        RawFailure::Transport(text) => text.clone(),
        RawFailure::Empty => String::new(),
        RawFailure::Payload(value) => match value {
            Value::Null => String::new(),
            Value::String(text) => text.clone(),
            Value::Object(map) => {
                if let Some(Value::String(message)) = map.get("message") {
                    message.clone()
                } else if let Some(Value::String(reason)) = map.get("reason") {
                    reason.clone()
                } else {
                    value.to_string()
                }
            }
            other => other.to_string(),
        },
    }
}

/// Map a raw failure to a structured diagnostic. Total: never fails,
/// unrecognized shapes degrade to [`Category::Unknown`].
pub fn classify(raw: &RawFailure) -> Diagnostic {
    let message = normalize(raw);
    let lowered = message.to_lowercase();

    for rule in RULES {
        if (rule.matches)(&lowered) {
            return Diagnostic {
                category: rule.category,
                raw_message: message,
                advice: Some(rule.advice.to_string()),
            };
        }
    }

    Diagnostic {
        category: Category::Unknown,
        raw_message: message,
        advice: None,
    }
}
