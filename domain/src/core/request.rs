//! Request value object - the unit of work the engine governs.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::id::{current_timestamp_ms, uuid_v4};

/// Domain tag for a request, used by the admission classifier
/// to select policy rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RequestDomain {
    /// Question answering
    Qna,
    /// File or document upload review
    Upload,
    /// Pass-through conduit to an external system
    Conduit,
    /// Caller-defined domain
    Custom(String),
}

impl RequestDomain {
    /// Get the string identifier for this domain
    pub fn as_str(&self) -> &str {
        match self {
            RequestDomain::Qna => "qna",
            RequestDomain::Upload => "upload",
            RequestDomain::Conduit => "conduit",
            RequestDomain::Custom(s) => s,
        }
    }
}

impl Default for RequestDomain {
    fn default() -> Self {
        RequestDomain::Qna
    }
}

impl std::fmt::Display for RequestDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RequestDomain {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "qna" => RequestDomain::Qna,
            "upload" => RequestDomain::Upload,
            "conduit" => RequestDomain::Conduit,
            other => RequestDomain::Custom(other.to_string()),
        })
    }
}

impl Serialize for RequestDomain {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RequestDomain {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().expect("infallible"))
    }
}

/// A request submitted for governance.
///
/// Immutable once admitted - the admission classifier produces a sanitized
/// copy and everything downstream (seats, judge, proof hash) sees only that
/// copy.
///
/// # Example
///
/// ```
/// use gavel_domain::core::{Request, RequestDomain};
///
/// let request = Request::new(RequestDomain::Qna, "Summarize the incident report");
/// assert_eq!(request.domain, RequestDomain::Qna);
/// assert!(!request.canonical_bytes().is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Request {
    /// Unique request identifier
    pub request_id: String,
    /// Domain tag (e.g. "qna", "upload", "conduit")
    pub domain: RequestDomain,
    /// Opaque input payload
    pub payload: String,
    /// Creation time (milliseconds since epoch)
    pub created_at: u64,
}

impl Request {
    /// Create a new request with a generated id
    pub fn new(domain: RequestDomain, payload: impl Into<String>) -> Self {
        Self {
            request_id: uuid_v4(),
            domain,
            payload: payload.into(),
            created_at: current_timestamp_ms(),
        }
    }

    /// Create a request with a caller-supplied id (e.g. replays from an
    /// external queue that already assigned one)
    pub fn with_id(
        request_id: impl Into<String>,
        domain: RequestDomain,
        payload: impl Into<String>,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            domain,
            payload: payload.into(),
            created_at: current_timestamp_ms(),
        }
    }

    /// Canonical byte encoding of this request.
    ///
    /// The proof record's `input_hash` is computed over exactly these bytes,
    /// so the encoding must stay stable: id, domain, and payload joined with
    /// newline separators.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(
            self.request_id.len() + self.domain.as_str().len() + self.payload.len() + 2,
        );
        bytes.extend_from_slice(self.request_id.as_bytes());
        bytes.push(b'\n');
        bytes.extend_from_slice(self.domain.as_str().as_bytes());
        bytes.push(b'\n');
        bytes.extend_from_slice(self.payload.as_bytes());
        bytes
    }

    /// Return a copy of this request with a different payload, preserving
    /// identity and creation time. Used by the sanitize stage.
    pub fn with_payload(&self, payload: impl Into<String>) -> Self {
        Self {
            request_id: self.request_id.clone(),
            domain: self.domain.clone(),
            payload: payload.into(),
            created_at: self.created_at,
        }
    }
}
