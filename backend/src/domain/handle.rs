//! Social-network handle validation.
//!
//! A handle is the public username of an account on the external directory.
//! It is accepted when it is 3 to 15 characters long and uses only ASCII
//! letters, digits, and underscores.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Minimum allowed handle length.
pub const HANDLE_MIN: usize = 3;
/// Maximum allowed handle length.
pub const HANDLE_MAX: usize = 15;

static HANDLE_RE: OnceLock<Regex> = OnceLock::new();

fn handle_regex() -> &'static Regex {
    HANDLE_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains allowed characters.
        Regex::new("^[A-Za-z0-9_]*$")
            .unwrap_or_else(|error| panic!("handle regex failed to compile: {error}"))
    })
}

/// Reasons a raw string is not a valid handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HandleValidationError {
    /// Fewer than [`HANDLE_MIN`] characters.
    #[error("handle must be at least {min} characters")]
    TooShort { min: usize },
    /// More than [`HANDLE_MAX`] characters.
    #[error("handle must be at most {max} characters")]
    TooLong { max: usize },
    /// Contains something other than ASCII letters, digits, or underscores.
    #[error("handle may only contain letters, numbers, or underscores")]
    InvalidCharacters,
}

/// Return whether `raw` is a syntactically valid handle.
///
/// # Examples
/// ```
/// use handle_relay::domain::is_valid_handle;
///
/// assert!(is_valid_handle("jack"));
/// assert!(!is_valid_handle("a-b"));
/// ```
#[must_use]
pub fn is_valid_handle(raw: &str) -> bool {
    Handle::parse(raw).is_ok()
}

/// A handle that has passed validation.
///
/// ## Invariants
/// - length is within `[HANDLE_MIN, HANDLE_MAX]`;
/// - every character matches `[A-Za-z0-9_]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Handle(String);

impl Handle {
    /// Validate `raw` and wrap it.
    ///
    /// # Errors
    /// Returns the first rule the input breaks, checking length before
    /// characters.
    pub fn parse(raw: impl Into<String>) -> Result<Self, HandleValidationError> {
        let raw = raw.into();
        // The character rule admits only ASCII, so byte length is the
        // character count for every string that can pass.
        if raw.len() < HANDLE_MIN {
            return Err(HandleValidationError::TooShort { min: HANDLE_MIN });
        }
        if raw.len() > HANDLE_MAX {
            return Err(HandleValidationError::TooLong { max: HANDLE_MAX });
        }
        if !handle_regex().is_match(&raw) {
            return Err(HandleValidationError::InvalidCharacters);
        }
        Ok(Self(raw))
    }

    /// Borrow the handle text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Handle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Handle {
    type Error = HandleValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Handle> for String {
    fn from(value: Handle) -> Self {
        value.0
    }
}
