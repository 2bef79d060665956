//! Top-level error wrapper types.

use crate::{ConfigError, FetchError, MissingFieldError, StorageError};

/// Every error a Tidings crate can surface.
///
/// # Examples
///
/// ```
/// use tidings_error::{TidingsError, MissingFieldError};
///
/// let err: TidingsError = MissingFieldError::new("weather").into();
/// assert!(format!("{}", err).contains("weather"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum TidingsErrorKind {
    /// Remote fetch failed
    #[from(FetchError)]
    Fetch(FetchError),
    /// Field absent from a present record
    #[from(MissingFieldError)]
    MissingField(MissingFieldError),
    /// Persistence failure
    #[from(StorageError)]
    Storage(StorageError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Tidings error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Tidings Error: {}", _0)]
pub struct TidingsError(Box<TidingsErrorKind>);

impl TidingsError {
    /// Create a new error from a kind.
    pub fn new(kind: TidingsErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &TidingsErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to TidingsErrorKind
impl<T> From<T> for TidingsError
where
    T: Into<TidingsErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Tidings operations.
pub type TidingsResult<T> = std::result::Result<T, TidingsError>;
