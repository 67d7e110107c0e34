//! Ordered, append-only list of accepted registrations.

use crate::types::UserRecord;
use log::info;

/// In-memory registry of accepted records, in submission order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    records: Vec<UserRecord>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and return its 1-based position.
    pub fn append(&mut self, record: UserRecord) -> usize {
        self.records.push(record);
        let position = self.records.len();
        info!("record appended (position={})", position);
        position
    }

    /// All records in insertion order.
    pub fn list(&self) -> &[UserRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Country;
    use pretty_assertions::assert_eq;

    fn record(first_name: &str) -> UserRecord {
        UserRecord {
            first_name: first_name.to_string(),
            last_name: "Doe".to_string(),
            email: "doe@example.com".to_string(),
            company: "Acme".to_string(),
            country: Country::Thailand,
            phone: "1".to_string(),
            message: "hi".to_string(),
            image: "data:image/png;base64,".to_string(),
            agree_to_policy: true,
        }
    }

    #[test]
    fn append_preserves_insertion_order() {
        let mut registry = Registry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.append(record("R1")), 1);
        assert_eq!(registry.append(record("R2")), 2);
        assert_eq!(registry.list(), &[record("R1"), record("R2")]);
    }

    #[test]
    fn append_keeps_duplicates() {
        let mut registry = Registry::new();
        registry.append(record("Same"));
        registry.append(record("Same"));
        assert_eq!(registry.len(), 2);
    }
}
