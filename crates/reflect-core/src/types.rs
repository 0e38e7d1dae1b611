use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// UTC timestamp used throughout the system.
pub type Timestamp = DateTime<Utc>;

// =============================================================================
// Identifiers
// =============================================================================

/// Opaque identifier for a persisted reflection record.
///
/// Identifiers are assigned by the backing store; the editor never inspects
/// or generates them, it only passes them back on update.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReflectionId(String);

impl ReflectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReflectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ReflectionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ReflectionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// =============================================================================
// Records
// =============================================================================

/// A persisted reflection entry.
///
/// The record is owned by the caller; the editor receives a copy and, on a
/// successful save, hands back a new value with the updated body and
/// timestamp. `id` is `None` only for records that have not been persisted
/// yet; such records cannot be saved.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reflection {
    /// Store-assigned identifier. Absent for transient records.
    pub id: Option<ReflectionId>,
    /// The reflection text body.
    pub reflection: String,
    /// When the record was last written.
    pub updated_at: DateTime<Utc>,
}

impl Reflection {
    /// Create a persisted record with the given identifier and body.
    pub fn new(id: impl Into<ReflectionId>, reflection: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            reflection: reflection.into(),
            updated_at: Utc::now(),
        }
    }

    /// Create a transient record that has no identifier yet.
    pub fn transient(reflection: impl Into<String>) -> Self {
        Self {
            id: None,
            reflection: reflection.into(),
            updated_at: Utc::now(),
        }
    }

    /// Produce a new record equal to `self` except for the body, with the
    /// timestamp set to the current time.
    pub fn with_body(&self, reflection: impl Into<String>) -> Self {
        Self {
            id: self.id.clone(),
            reflection: reflection.into(),
            updated_at: Utc::now(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflection_id_display() {
        let id = ReflectionId::new("r1");
        assert_eq!(id.to_string(), "r1");
        assert_eq!(id.as_str(), "r1");
    }

    #[test]
    fn test_reflection_id_from_str_and_string() {
        let a: ReflectionId = "r1".into();
        let b: ReflectionId = String::from("r1").into();
        assert_eq!(a, b);
    }

    #[test]
    fn test_reflection_id_serde_transparent() {
        let id = ReflectionId::new("abc-123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abc-123\"");
        let back: ReflectionId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_reflection_new_has_id() {
        let r = Reflection::new("r1", "Today I learned");
        assert_eq!(r.id, Some(ReflectionId::new("r1")));
        assert_eq!(r.reflection, "Today I learned");
    }

    #[test]
    fn test_reflection_transient_has_no_id() {
        let r = Reflection::transient("draft text");
        assert!(r.id.is_none());
        assert_eq!(r.reflection, "draft text");
    }

    #[test]
    fn test_with_body_preserves_id_and_advances_timestamp() {
        let original = Reflection {
            id: Some(ReflectionId::new("r1")),
            reflection: "old".to_string(),
            updated_at: Utc::now() - chrono::Duration::seconds(60),
        };

        let updated = original.with_body("new");
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.reflection, "new");
        assert!(updated.updated_at > original.updated_at);
        // The original is untouched.
        assert_eq!(original.reflection, "old");
    }

    #[test]
    fn test_reflection_json_round_trip() {
        let r = Reflection::new("r1", "body text");
        let json = serde_json::to_string(&r).unwrap();
        let back: Reflection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
