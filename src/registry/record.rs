//! The car record value type.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// A registered car, identified by its `(make, model)` pair.
///
/// Equality and hashing only look at `make` and `model`, compared exactly as stored: no
/// trimming, case-sensitive, and an absent attribute is distinct from an empty one. The `id` is
/// assigned by the registry on insert and is purely informational.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Record {
    /// Surrogate identifier, replaced by the registry on insert.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<Uuid>,
    /// Manufacturer name.
    #[serde(default)]
    make: Option<String>,
    /// Model name.
    #[serde(default)]
    model: Option<String>,
}

impl Record {
    /// Build an unregistered record. Either attribute may be absent or empty.
    pub fn new(make: Option<String>, model: Option<String>) -> Self {
        Self {
            id: None,
            make,
            model,
        }
    }

    /// Convenience constructor for records with both attributes present.
    pub fn with_make_model(make: impl Into<String>, model: impl Into<String>) -> Self {
        Self::new(Some(make.into()), Some(model.into()))
    }

    /// Identifier assigned when the record was stored, if any.
    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    /// Manufacturer name as stored.
    pub fn make(&self) -> Option<&str> {
        self.make.as_deref()
    }

    /// Model name as stored.
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub(crate) fn assign_id(&mut self) {
        self.id = Some(Uuid::new_v4());
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.make == other.make && self.model == other.model
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.make.hash(state);
        self.model.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(record: &Record) -> u64 {
        let mut hasher = DefaultHasher::new();
        record.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn equality_ignores_assigned_id() {
        let mut stored = Record::with_make_model("Honda", "Civic");
        stored.assign_id();
        let incoming = Record::with_make_model("Honda", "Civic");

        assert_eq!(stored, incoming);
        assert_eq!(hash_of(&stored), hash_of(&incoming));
    }

    #[test]
    fn equality_is_exact_and_case_sensitive() {
        let base = Record::with_make_model("Honda", "Civic");
        assert_ne!(base, Record::with_make_model("honda", "Civic"));
        assert_ne!(base, Record::with_make_model("Honda ", "Civic"));
        assert_ne!(base, Record::with_make_model("Honda", "Accord"));
    }

    #[test]
    fn absent_and_empty_attributes_are_distinct() {
        let absent = Record::new(None, None);
        let empty = Record::new(Some(String::new()), Some(String::new()));

        assert_eq!(absent, Record::default());
        assert_ne!(absent, empty);
    }

    #[test]
    fn missing_fields_deserialize_as_absent() {
        let record: Record = serde_json::from_str(r#"{"make":"Mazda"}"#).expect("record json");

        assert_eq!(record.id(), None);
        assert_eq!(record.make(), Some("Mazda"));
        assert_eq!(record.model(), None);
    }

    #[test]
    fn serialization_includes_assigned_id() {
        let mut record = Record::with_make_model("Mazda", "MX-5");
        assert!(!serde_json::to_string(&record).expect("json").contains("\"id\""));

        record.assign_id();
        let value = serde_json::to_value(&record).expect("json");
        assert_eq!(value["make"], "Mazda");
        assert_eq!(value["model"], "MX-5");
        assert!(value["id"].is_string());
    }
}
