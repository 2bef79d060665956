//! Error types for Tidings.
//!
//! # Error Hierarchy
//!
//! Errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! `NotAvailable` (nothing cached yet) and `NotFound` (fallback search exhausted)
//! are ordinary outcomes modelled by the cache and resolver result enums, not errors.
//!
//! # Examples
//!
//! ```
//! use tidings_error::{FetchError, FetchErrorKind, TidingsResult};
//!
//! fn fetch_data() -> TidingsResult<String> {
//!     Err(FetchError::new(FetchErrorKind::Transport("connection refused".into())))?
//! }
//!
//! assert!(fetch_data().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod fetch;
mod field;
mod storage;

pub use config::ConfigError;
pub use error::{TidingsError, TidingsErrorKind, TidingsResult};
pub use fetch::{FetchError, FetchErrorKind};
pub use field::MissingFieldError;
pub use storage::{StorageError, StorageErrorKind};
