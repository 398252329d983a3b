//! Core domain types, the library-wide error taxonomy, and cancellation
//! primitives shared by every engine.

pub mod cancel;
pub mod types;

pub use cancel::{CancelToken, Clock, ManualClock, SystemClock};
pub use types::*;

/// Errors surfaced by the analytics engines and stores.
///
/// Pure calculators never panic; they return these. The facade layer maps
/// them to transport-level codes. Session expiry and session absence are
/// deliberately the same variant so a caller cannot probe whether an id
/// ever existed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RiskError {
    /// Scenario tag not one of the four NGFS archetypes.
    InvalidScenario(String),
    /// Pricing regime tag not `global` or `kets`.
    InvalidRegime(String),
    /// Disclosure framework tag not `tcfd`, `issb`, or `kssb`.
    InvalidFramework(String),
    /// Malformed caller payload (coordinates, negative values, duplicates).
    InvalidInput(String),
    /// Unknown or expired session id.
    SessionNotFound,
    /// The caller's cancellation token fired.
    Cancelled,
    /// The request deadline elapsed mid-computation.
    DeadlineExceeded,
    /// Weather archive unreachable or returned unusable data. Internal:
    /// the physical engine converts this into a fallback, never surfaces it.
    WeatherUnavailable(String),
}

impl std::fmt::Display for RiskError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidScenario(tag) => write!(f, "unknown scenario: {tag}"),
            Self::InvalidRegime(tag) => write!(f, "unknown pricing regime: {tag}"),
            Self::InvalidFramework(tag) => write!(f, "unknown framework: {tag}"),
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Self::SessionNotFound => write!(f, "session not found or expired"),
            Self::Cancelled => write!(f, "request cancelled"),
            Self::DeadlineExceeded => write!(f, "request deadline exceeded"),
            Self::WeatherUnavailable(msg) => write!(f, "weather data unavailable: {msg}"),
        }
    }
}

impl std::error::Error for RiskError {}
