//! Remote fetch failures.

/// Ways a remote fetch can fail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum FetchErrorKind {
    /// The server answered with a non-success status.
    #[display("HTTP status {status}: {detail}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body or other diagnostic
        detail: String,
    },
    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[display("Transport failure: {_0}")]
    Transport(String),
    /// The response arrived but its body could not be decoded.
    #[display("Malformed response: {_0}")]
    Decode(String),
}

/// Fetch failure with location tracking.
///
/// Carries the status code (when the server answered) and a diagnostic, so
/// callers can report the failure without the cache ever treating it as fatal.
///
/// # Examples
///
/// ```
/// use tidings_error::{FetchError, FetchErrorKind};
///
/// let err = FetchError::new(FetchErrorKind::Status {
///     status: 401,
///     detail: "Invalid API key".to_string(),
/// });
/// assert_eq!(err.status(), Some(401));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Fetch Error: {} at line {} in {}", kind, line, file)]
pub struct FetchError {
    kind: FetchErrorKind,
    line: u32,
    file: &'static str,
}

impl FetchError {
    /// Create a new fetch error with caller location tracking.
    #[track_caller]
    pub fn new(kind: FetchErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a non-success status response.
    #[track_caller]
    pub fn status_code(status: u16, detail: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Status {
            status,
            detail: detail.into(),
        })
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FetchErrorKind {
        &self.kind
    }

    /// HTTP status, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            FetchErrorKind::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable diagnostic without location information.
    pub fn detail(&self) -> String {
        match &self.kind {
            FetchErrorKind::Status { detail, .. } => detail.clone(),
            FetchErrorKind::Transport(msg) | FetchErrorKind::Decode(msg) => msg.clone(),
        }
    }
}
