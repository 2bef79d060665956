//! Missing field errors raised while reading fetched records.

/// An expected key was absent from a record that was otherwise present.
///
/// # Examples
///
/// ```
/// use tidings_error::MissingFieldError;
///
/// let err = MissingFieldError::new("main.temp");
/// assert_eq!(err.field(), "main.temp");
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Missing field '{}' at line {} in {}", field, line, file)]
pub struct MissingFieldError {
    field: String,
    line: u32,
    file: &'static str,
}

impl MissingFieldError {
    /// Create a new missing field error at the caller's location.
    #[track_caller]
    pub fn new(field: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            field: field.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// Dotted path of the missing field.
    pub fn field(&self) -> &str {
        &self.field
    }
}
