//! Stable identifiers for expense records
//!
//! Positional indices shift whenever an earlier row is deleted, so every record
//! also carries an `ExpenseId` assigned once at creation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

const DISPLAY_PREFIX: &str = "exp-";

/// Unique, immutable identifier of an expense record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(Uuid);

impl ExpenseId {
    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an ID from a full UUID string
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }

    /// Short form shown in listings, e.g. `exp-1a2b3c4d`
    pub fn short(&self) -> String {
        format!("{}{}", DISPLAY_PREFIX, &self.0.to_string()[..8])
    }

    /// Whether `s` identifies this record, either as the full UUID or as a
    /// prefix of it (with or without the `exp-` display prefix)
    pub fn matches(&self, s: &str) -> bool {
        let s = s.trim();
        let s = s.strip_prefix(DISPLAY_PREFIX).unwrap_or(s);
        !s.is_empty() && self.0.to_string().starts_with(&s.to_ascii_lowercase())
    }
}

impl Default for ExpenseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ExpenseId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix(DISPLAY_PREFIX).unwrap_or(s);
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = ExpenseId::new();
        assert_ne!(id.to_string(), Uuid::nil().to_string());
        assert_ne!(id, ExpenseId::new());
    }

    #[test]
    fn test_short_form() {
        let id = ExpenseId::new();
        let short = id.short();
        assert!(short.starts_with("exp-"));
        assert_eq!(short.len(), 12);
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        let id = ExpenseId::new();
        let parsed: ExpenseId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_matches_prefix() {
        let id = ExpenseId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert!(id.matches("exp-550e8400"));
        assert!(id.matches("550E84"));
        assert!(id.matches("550e8400-e29b-41d4-a716-446655440000"));
        assert!(!id.matches("exp-"));
        assert!(!id.matches("660e"));
    }

    #[test]
    fn test_id_serialization() {
        let id = ExpenseId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: ExpenseId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
