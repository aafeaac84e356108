//! Type-safe identifier newtypes.
//!
//! Story and node identifiers are human-authored names (`mystic-forest`,
//! `cave`), not synthetic keys, so these wrap strings rather than UUIDs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a story in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryId(String);

impl StoryId {
    /// Creates a story identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StoryId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Identifier of a node within a story graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// The entry node every story defines.
    pub const START: &'static str = "start";

    /// The continue/restart menu node every story defines.
    pub const CONTINUE_MENU: &'static str = "continue_menu";

    /// The story-selection control state. Not a node in any story; the
    /// navigation engine resolves it against the catalog instead.
    pub const STORY_SELECTION: &'static str = "story_selection";

    /// Creates a node identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The `start` node identifier.
    #[must_use]
    pub fn start() -> Self {
        Self::new(Self::START)
    }

    /// The `continue_menu` node identifier.
    #[must_use]
    pub fn continue_menu() -> Self {
        Self::new(Self::CONTINUE_MENU)
    }

    /// The `story_selection` control state identifier.
    #[must_use]
    pub fn story_selection() -> Self {
        Self::new(Self::STORY_SELECTION)
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A single DTMF digit, `'0'` through `'9'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Digit(char);

impl Digit {
    /// Creates a digit, returning `None` for non-digit characters.
    #[must_use]
    pub fn new(c: char) -> Option<Self> {
        c.is_ascii_digit().then_some(Self(c))
    }

    /// Returns the digit as a character.
    #[must_use]
    pub fn as_char(self) -> char {
        self.0
    }

    /// Returns the digit's numeric value, 0–9.
    #[must_use]
    pub fn value(self) -> u8 {
        // Constructor guarantees an ASCII digit.
        self.0 as u8 - b'0'
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<char> for Digit {
    type Error = String;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::new(c).ok_or_else(|| format!("not a DTMF digit: {c:?}"))
    }
}

impl From<Digit> for char {
    fn from(digit: Digit) -> Self {
        digit.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_accepts_ascii_digits_only() {
        assert_eq!(Digit::new('0').map(Digit::value), Some(0));
        assert_eq!(Digit::new('9').map(Digit::value), Some(9));
        assert!(Digit::new('a').is_none());
        assert!(Digit::new('#').is_none());
    }

    #[test]
    fn test_digit_round_trips_through_serde() {
        let digit = Digit::new('7').unwrap();
        let json = serde_json::to_string(&digit).unwrap();
        assert_eq!(json, "\"7\"");
        let back: Digit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, digit);
    }

    #[test]
    fn test_node_id_sentinels() {
        assert_eq!(NodeId::start().as_str(), "start");
        assert_eq!(NodeId::continue_menu().as_str(), "continue_menu");
        assert_eq!(NodeId::story_selection().as_str(), "story_selection");
    }
}
