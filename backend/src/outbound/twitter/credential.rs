//! Bearer credential for the user directory.

use std::fmt;

use zeroize::Zeroizing;

/// Opaque bearer token sent as `Authorization: Bearer <token>`.
///
/// The secret is wiped from memory on drop and never printed by `Debug`.
#[derive(Clone)]
pub struct BearerToken(Zeroizing<String>);

impl BearerToken {
    /// Wrap a token, returning `None` when it is blank.
    ///
    /// Surrounding whitespace is trimmed; dotenv files and shell exports
    /// commonly leave a trailing newline or space behind.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = Zeroizing::new(raw.into());
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(Zeroizing::new(trimmed.to_owned())))
    }

    /// Expose the secret for header construction.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}
