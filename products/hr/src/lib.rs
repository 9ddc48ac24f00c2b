//! HR module: employee records held in process memory.
//!
//! Records are opaque JSON objects. The registry is append-only and keeps
//! insertion order; it is emptied only when the process restarts.

use std::{
    fmt,
    sync::{Arc, PoisonError, RwLock},
};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An employee payload as submitted by the client. No fields are required.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Employee(Map<String, Value>);

impl Employee {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = serde_json::to_string(&self.0).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

/// Shared, ordered employee list. Clones share the same storage.
#[derive(Clone, Debug, Default)]
pub struct EmployeeRegistry {
    records: Arc<RwLock<Vec<Employee>>>,
}

impl EmployeeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, returning the new length.
    pub fn append(&self, employee: Employee) -> usize {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        records.push(employee);
        tracing::debug!(count = records.len(), "employee appended");
        records.len()
    }

    /// Append a record and return the full list as it stood right after the
    /// append. No other append can interleave between the two.
    pub fn append_and_snapshot(&self, employee: Employee) -> Vec<Employee> {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        records.push(employee);
        tracing::debug!(count = records.len(), "employee appended");
        records.clone()
    }

    pub fn snapshot(&self) -> Vec<Employee> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn employee(value: Value) -> Employee {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn starts_empty() {
        let registry = EmployeeRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.snapshot().is_empty());
    }

    #[test]
    fn snapshot_preserves_insertion_order() {
        let registry = EmployeeRegistry::new();
        let names = ["Alice", "Bob", "Carol", "Bob"];
        for (idx, name) in names.iter().enumerate() {
            let snapshot = registry.append_and_snapshot(employee(json!({ "name": name })));
            assert_eq!(snapshot.len(), idx + 1);
        }
        let stored: Vec<_> = registry
            .snapshot()
            .iter()
            .map(|e| e.get("name").cloned().unwrap())
            .collect();
        assert_eq!(stored, names.map(Value::from).to_vec());
    }

    #[test]
    fn clones_share_storage() {
        let registry = EmployeeRegistry::new();
        let other = registry.clone();
        assert_eq!(other.append(Employee::default()), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn payload_round_trips_untouched() {
        let raw = json!({"name": "Alice", "age": 30, "tags": ["a", "b"], "manager": null});
        let parsed = employee(raw.clone());
        assert_eq!(serde_json::to_value(&parsed).unwrap(), raw);
        assert_eq!(parsed.to_string(), raw.to_string());
    }

    #[test]
    fn non_object_payloads_are_rejected() {
        assert!(serde_json::from_value::<Employee>(json!(["Alice"])).is_err());
        assert!(serde_json::from_value::<Employee>(json!("Alice")).is_err());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_appends_are_not_lost() {
        let registry = EmployeeRegistry::new();
        let handles: Vec<_> = (0..50)
            .map(|idx| {
                let registry = registry.clone();
                tokio::spawn(async move { registry.append(employee(json!({ "seq": idx }))) })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(registry.len(), 50);
    }
}
