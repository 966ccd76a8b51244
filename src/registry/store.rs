//! In-memory record set with atomic check-and-insert.

use super::record::Record;
use super::types::{LookupQuery, RegistryError};
use std::collections::HashSet;
use std::sync::{PoisonError, RwLock};

/// Uniqueness-enforcing collection of [`Record`]s.
///
/// The set only grows. Inserts hold the write lock across the whole contains-then-add step, so
/// two concurrent inserts of equal records can never both succeed.
#[derive(Debug, Default)]
pub struct Registry {
    records: RwLock<HashSet<Record>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `record` unless an equal one already exists.
    ///
    /// Returns `true` when the record was added. A `false` result leaves the set untouched.
    pub fn insert(&self, record: Record) -> bool {
        self.register(record).is_ok()
    }

    /// Like [`Registry::insert`], but hands back the stored copy with its assigned id.
    pub fn register(&self, mut record: Record) -> Result<Record, RegistryError> {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        if records.contains(&record) {
            return Err(RegistryError::Conflict);
        }
        record.assign_id();
        records.insert(record.clone());
        Ok(record)
    }

    /// Find the first record matching the supplied filters.
    ///
    /// Terms are trimmed before matching and blank terms count as absent. Returns
    /// [`RegistryError::InvalidQuery`] when neither term is usable and `Ok(None)` when the query
    /// is valid but nothing matches.
    pub fn find(
        &self,
        make: Option<&str>,
        model: Option<&str>,
    ) -> Result<Option<Record>, RegistryError> {
        let query = LookupQuery::new(make, model)?;
        Ok(self.find_matching(&query))
    }

    /// Find the first record satisfying an already-normalized query.
    pub fn find_matching(&self, query: &LookupQuery) -> Option<Record> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        records
            .iter()
            .find(|record| query.matches(record.make(), record.model()))
            .cloned()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn insert_accepts_new_pairs_and_rejects_duplicates() {
        let registry = Registry::new();
        assert!(registry.is_empty());

        assert!(registry.insert(Record::with_make_model("Honda", "Civic")));
        assert!(registry.insert(Record::with_make_model("Honda", "Accord")));
        assert!(!registry.insert(Record::with_make_model("Honda", "Civic")));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn rejected_insert_keeps_original_record() {
        let registry = Registry::new();
        let stored = registry
            .register(Record::with_make_model("Honda", "Civic"))
            .expect("first registration");

        assert_eq!(
            registry.register(Record::with_make_model("Honda", "Civic")),
            Err(RegistryError::Conflict)
        );

        let found = registry
            .find(Some("Honda"), None)
            .expect("valid query")
            .expect("record present");
        assert_eq!(found.id(), stored.id());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn register_replaces_client_supplied_id() {
        let registry = Registry::new();
        let incoming: Record = serde_json::from_str(
            r#"{"id":"6f1c1d2e-0000-4000-8000-000000000000","make":"Mazda","model":"MX-5"}"#,
        )
        .expect("record json");
        let supplied = incoming.id();

        let stored = registry.register(incoming).expect("registration");
        assert!(stored.id().is_some());
        assert_ne!(stored.id(), supplied);
    }

    #[test]
    fn registered_record_is_findable_by_either_or_both_attributes() {
        let registry = Registry::new();
        let stored = registry
            .register(Record::with_make_model("Toyota", "Corolla"))
            .expect("registration");
        assert!(stored.id().is_some());

        for (make, model) in [
            (Some("Toyota"), None),
            (None, Some("Corolla")),
            (Some("Toyota"), Some("Corolla")),
        ] {
            let found = registry.find(make, model).expect("valid query");
            assert_eq!(found, Some(stored.clone()), "query {make:?}/{model:?}");
        }
    }

    #[test]
    fn find_trims_query_terms_but_not_stored_values() {
        let registry = Registry::new();
        registry.insert(Record::with_make_model("Foo", "Bar"));
        registry.insert(Record::with_make_model(" Padded ", "Value"));

        let found = registry.find(Some("  Foo  "), None).expect("valid query");
        assert_eq!(found, Some(Record::with_make_model("Foo", "Bar")));

        let padded = registry.find(Some(" Padded "), None).expect("valid query");
        assert_eq!(padded, None);
    }

    #[test]
    fn find_requires_a_filter_regardless_of_contents() {
        let registry = Registry::new();
        assert_eq!(registry.find(None, None), Err(RegistryError::InvalidQuery));

        registry.insert(Record::with_make_model("Honda", "Civic"));
        assert_eq!(
            registry.find(Some(""), Some("  ")),
            Err(RegistryError::InvalidQuery)
        );
    }

    #[test]
    fn blank_term_falls_back_to_single_attribute_lookup() {
        let registry = Registry::new();
        registry.insert(Record::with_make_model("Honda", "Civic"));

        let found = registry.find(Some("   "), Some("Civic")).expect("valid query");
        assert_eq!(found, Some(Record::with_make_model("Honda", "Civic")));
    }

    #[test]
    fn both_attributes_must_match_together() {
        let registry = Registry::new();
        registry.insert(Record::with_make_model("Honda", "Civic"));
        registry.insert(Record::with_make_model("Toyota", "Corolla"));

        assert_eq!(registry.find(Some("Honda"), Some("Corolla")), Ok(None));
    }

    #[test]
    fn records_without_attributes_are_stored_but_only_found_by_present_terms() {
        let registry = Registry::new();
        assert!(registry.insert(Record::new(None, Some("Solo".into()))));
        assert!(registry.insert(Record::new(None, None)));
        assert!(!registry.insert(Record::new(None, None)));

        let found = registry.find(None, Some("Solo")).expect("valid query");
        assert_eq!(found, Some(Record::new(None, Some("Solo".into()))));
        assert_eq!(registry.find(Some("Solo"), None), Ok(None));
    }

    #[test]
    fn honda_civic_scenario() {
        let registry = Registry::new();
        assert!(registry.insert(Record::with_make_model("Honda", "Civic")));
        assert_eq!(
            registry.register(Record::with_make_model("Honda", "Civic")),
            Err(RegistryError::Conflict)
        );
        assert_eq!(
            registry.find(Some("Honda"), None),
            Ok(Some(Record::with_make_model("Honda", "Civic")))
        );
        assert_eq!(registry.find(None, None), Err(RegistryError::InvalidQuery));
        assert_eq!(registry.find(Some("Toyota"), None), Ok(None));
    }

    #[test]
    fn concurrent_inserts_of_equal_records_admit_exactly_one() {
        let registry = Arc::new(Registry::new());
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.insert(Record::with_make_model("Race", "Car")))
            })
            .collect();

        let accepted = handles
            .into_iter()
            .map(|handle| handle.join().expect("insert thread"))
            .filter(|inserted| *inserted)
            .count();

        assert_eq!(accepted, 1);
        assert_eq!(registry.len(), 1);
    }
}
