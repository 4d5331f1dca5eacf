//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Unique identifier for an authorized representative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepresentativeId(Uuid);

impl RepresentativeId {
    /// Creates a new random RepresentativeId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a RepresentativeId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RepresentativeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RepresentativeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RepresentativeId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Name of a creditor class, e.g. "Financial Creditors-Secured".
///
/// Always trimmed and non-empty. Equality, ordering and hashing ignore
/// case; the name keeps the spelling it was created with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClassName(String);

impl ClassName {
    /// Creates a ClassName, rejecting blank input.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("class_name"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-folded form used for comparisons.
    pub fn key(&self) -> String {
        class_key(&self.0)
    }

    /// Filesystem-safe form: lowercase alphanumerics separated by single dashes.
    pub fn slug(&self) -> String {
        let mut slug = String::with_capacity(self.0.len());
        let mut pending_dash = false;
        for ch in self.0.chars() {
            if ch.is_ascii_alphanumeric() {
                if pending_dash && !slug.is_empty() {
                    slug.push('-');
                }
                slug.push(ch.to_ascii_lowercase());
                pending_dash = false;
            } else {
                pending_dash = true;
            }
        }
        slug
    }
}

/// Case-folded, trimmed form of a class name.
///
/// Two names with the same key denote the same class.
pub fn class_key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl PartialEq for ClassName {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ClassName {}

impl Hash for ClassName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for ClassName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ClassName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl TryFrom<String> for ClassName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClassName> for String {
    fn from(name: ClassName) -> Self {
        name.0
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Storage key shared by fee structures and attendance records.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordKey {
    pub representative_id: RepresentativeId,
    pub class_name: ClassName,
}

impl RecordKey {
    pub fn new(representative_id: RepresentativeId, class_name: ClassName) -> Self {
        Self {
            representative_id,
            class_name,
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.representative_id, self.class_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn representative_id_round_trips_through_string() {
        let id = RepresentativeId::new();
        let parsed: RepresentativeId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn representative_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<RepresentativeId>().is_err());
    }

    #[test]
    fn class_name_is_trimmed() {
        let name = ClassName::new("  Financial Creditors-Secured ").unwrap();
        assert_eq!(name.as_str(), "Financial Creditors-Secured");
    }

    #[test]
    fn class_name_rejects_blank() {
        assert!(matches!(
            ClassName::new("   "),
            Err(ValidationError::EmptyField { .. })
        ));
    }

    #[test]
    fn class_names_differing_in_case_are_equal() {
        use std::collections::HashSet;

        let upper = ClassName::new("Home Buyers").unwrap();
        let lower = ClassName::new(" home buyers").unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper.as_str(), "Home Buyers");

        let set: HashSet<ClassName> = [upper, lower].into_iter().collect();
        assert_eq!(set.len(), 1);
        assert!(ClassName::new("Workmen").unwrap() > ClassName::new("home buyers").unwrap());
    }

    #[test]
    fn class_name_slug_collapses_separators() {
        let name = ClassName::new("Financial Creditors - Secured (Home Buyers)").unwrap();
        assert_eq!(name.slug(), "financial-creditors-secured-home-buyers");
    }

    #[test]
    fn class_name_deserialization_validates() {
        let ok: ClassName = serde_json::from_str("\"Workmen\"").unwrap();
        assert_eq!(ok.as_str(), "Workmen");
        assert!(serde_json::from_str::<ClassName>("\"\"").is_err());
    }

    #[test]
    fn record_key_displays_id_and_class() {
        let id = RepresentativeId::new();
        let key = RecordKey::new(id, ClassName::new("Workmen").unwrap());
        assert_eq!(key.to_string(), format!("{}/Workmen", id));
    }
}
