//! Error types shared by the library and the CLI.
//!
//! Errors are `anyhow::Error` values. Command handlers tag them with an `ErrorType` so that a
//! caller can tell a bad input apart from a broken installation without parsing messages.

use serde::{Deserialize, Serialize};

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// The broad class of a failure as seen by the caller.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// The input was malformed: a missing year, a bad date, a non-numeric amount.
    Validation,
    /// The home directory or its config file is missing or invalid.
    Config,
    /// A file could not be read or written.
    Io,
    /// The export could not be produced from otherwise valid input.
    Export,
}

serde_plain::derive_display_from_serialize!(ErrorType);
serde_plain::derive_fromstr_from_deserialize!(ErrorType);

/// Attaches an `ErrorType` to the error of a `Result`.
pub trait IntoResult<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T>;
}

impl<T, E> IntoResult<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn pub_result(self, error_type: ErrorType) -> Result<T> {
        self.map_err(|e| e.into().context(error_type))
    }
}

/// Returns the outermost `ErrorType` attached to `error`, if any.
pub fn error_type(error: &Error) -> Option<ErrorType> {
    error.downcast_ref::<ErrorType>().copied()
}
