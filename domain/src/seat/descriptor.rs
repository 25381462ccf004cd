//! Seat identity and lifecycle types.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Unique identifier of a seat within a roster
pub type SeatId = String;

/// Model provider backing a seat (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Provider {
    Anthropic,
    OpenAi,
    Google,
    /// Deterministic in-process seat used for load tests and demos
    Synthetic,
    /// Caller-defined provider
    Custom(String),
}

impl Provider {
    /// Get the string identifier for this provider
    pub fn as_str(&self) -> &str {
        match self {
            Provider::Anthropic => "anthropic",
            Provider::OpenAi => "openai",
            Provider::Google => "google",
            Provider::Synthetic => "synthetic",
            Provider::Custom(s) => s,
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Provider {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "anthropic" => Provider::Anthropic,
            "openai" => Provider::OpenAi,
            "google" => Provider::Google,
            "synthetic" => Provider::Synthetic,
            other => Provider::Custom(other.to_string()),
        })
    }
}

impl Serialize for Provider {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Provider {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().expect("infallible"))
    }
}

/// Terminal lifecycle status of a seat for one request.
///
/// Every seat in the roster settles into exactly one of these; none of them
/// is an error that propagates to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatStatus {
    /// Known unavailable before the debate started; skipped proactively
    Offline,
    /// Invocation in flight (only visible through progress callbacks)
    Running,
    /// Ballot collected
    Voted,
    /// No response within the per-seat or global deadline
    TimedOut,
    /// Invocation failed
    Errored,
    /// Seat declined to take a stance
    Abstained,
}

impl SeatStatus {
    /// Whether this status carries a ballot
    pub fn has_ballot(&self) -> bool {
        matches!(self, SeatStatus::Voted | SeatStatus::Abstained)
    }

    /// Whether the seat settled without contributing evidence
    pub fn is_non_responsive(&self) -> bool {
        matches!(
            self,
            SeatStatus::Offline | SeatStatus::TimedOut | SeatStatus::Errored
        )
    }
}

impl std::fmt::Display for SeatStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SeatStatus::Offline => "offline",
            SeatStatus::Running => "running",
            SeatStatus::Voted => "voted",
            SeatStatus::TimedOut => "timeout",
            SeatStatus::Errored => "error",
            SeatStatus::Abstained => "abstain",
        };
        write!(f, "{}", s)
    }
}

/// Identity of one seat in the panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatDescriptor {
    /// Unique seat identifier within the roster
    pub seat_id: SeatId,
    /// Provider backing this seat
    pub provider: Provider,
    /// Model identifier as understood by the provider
    pub model: String,
}

impl SeatDescriptor {
    pub fn new(
        seat_id: impl Into<String>,
        provider: Provider,
        model: impl Into<String>,
    ) -> Self {
        Self {
            seat_id: seat_id.into(),
            provider,
            model: model.into(),
        }
    }

    /// Short display name, e.g. "seat-3 (synthetic)"
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.seat_id, self.provider)
    }
}

/// Fixed roster of seats for a debate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatRoster {
    pub seats: Vec<SeatDescriptor>,
}

impl SeatRoster {
    /// Default panel width
    pub const DEFAULT_SIZE: usize = 7;

    pub fn new(seats: Vec<SeatDescriptor>) -> Self {
        Self { seats }
    }

    /// Build a synthetic roster of `n` seats, used by demos and load tests
    pub fn synthetic(n: usize) -> Self {
        let seats = (0..n)
            .map(|i| {
                SeatDescriptor::new(
                    format!("seat-{}", i + 1),
                    Provider::Synthetic,
                    format!("synthetic-evaluator-v{}", i % 3 + 1),
                )
            })
            .collect();
        Self { seats }
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SeatDescriptor> {
        self.seats.iter()
    }
}

impl Default for SeatRoster {
    fn default() -> Self {
        Self::synthetic(Self::DEFAULT_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_roundtrip() {
        for provider in ["anthropic", "openai", "google", "synthetic", "acme"] {
            let parsed: Provider = provider.parse().unwrap();
            assert_eq!(parsed.to_string(), provider);
        }
    }

    #[test]
    fn test_status_classification() {
        assert!(SeatStatus::Voted.has_ballot());
        assert!(SeatStatus::Abstained.has_ballot());
        assert!(!SeatStatus::TimedOut.has_ballot());

        assert!(SeatStatus::Offline.is_non_responsive());
        assert!(SeatStatus::TimedOut.is_non_responsive());
        assert!(SeatStatus::Errored.is_non_responsive());
        assert!(!SeatStatus::Voted.is_non_responsive());
        assert!(!SeatStatus::Abstained.is_non_responsive());
    }

    #[test]
    fn test_status_display_matches_wire_names() {
        assert_eq!(SeatStatus::TimedOut.to_string(), "timeout");
        assert_eq!(SeatStatus::Errored.to_string(), "error");
        assert_eq!(SeatStatus::Abstained.to_string(), "abstain");
    }

    #[test]
    fn test_default_roster_size() {
        let roster = SeatRoster::default();
        assert_eq!(roster.len(), SeatRoster::DEFAULT_SIZE);
        assert!(roster.iter().all(|s| s.provider == Provider::Synthetic));
    }

    #[test]
    fn test_roster_seat_ids_unique() {
        let roster = SeatRoster::synthetic(7);
        let mut ids: Vec<_> = roster.iter().map(|s| s.seat_id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 7);
    }
}
