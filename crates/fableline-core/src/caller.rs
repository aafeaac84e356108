//! Caller identifier validation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// A validated caller identifier: `+` followed by 10–15 digits.
///
/// Whitespace is stripped before validation; everything else about the
/// inbound `From` value must match exactly or the call is rejected with
/// [`GameError::InvalidCallerId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallerId(String);

impl CallerId {
    /// Parses and validates a raw caller identifier.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidCallerId`] if the identifier is not a
    /// `+`-prefixed E.164-style number of 10 to 15 digits.
    pub fn parse(raw: &str) -> Result<Self, GameError> {
        let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

        let Some(digits) = cleaned.strip_prefix('+') else {
            return Err(GameError::InvalidCallerId);
        };
        if !(10..=15).contains(&digits.len()) {
            return Err(GameError::InvalidCallerId);
        }
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(GameError::InvalidCallerId);
        }

        Ok(Self(cleaned))
    }

    /// Returns the normalized identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CallerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
