use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::Mutex;

use super::error::RosterError;
use super::store::{Relation, RosterStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailOn {
    Read,
    Insert,
    Delete,
}

#[derive(Default)]
struct Tables {
    rows: HashMap<Relation, Vec<Value>>,
    next_id: i64,
    failures: HashMap<FailOn, String>,
}

impl Tables {
    fn take_failure(&mut self, op: FailOn) -> Result<(), RosterError> {
        match self.failures.remove(&op) {
            Some(message) => Err(RosterError::Backend(message)),
            None => Ok(()),
        }
    }
}

/// In-process store with identity assignment and one-shot failure injection.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next call of the given kind fail with `message`.
    pub async fn fail_next(&self, op: FailOn, message: &str) {
        self.tables.lock().await.failures.insert(op, message.to_string());
    }

    pub async fn rows(&self, relation: Relation) -> Vec<Value> {
        self.tables
            .lock()
            .await
            .rows
            .get(&relation)
            .cloned()
            .unwrap_or_default()
    }
}

fn field_matches(row: &Value, field: &str, value: &str) -> bool {
    match row.get(field) {
        Some(Value::String(s)) => s == value,
        Some(Value::Number(n)) => n.to_string() == value,
        Some(Value::Bool(b)) => b.to_string() == value,
        _ => false,
    }
}

#[async_trait]
impl RosterStore for MemoryStore {
    async fn query_all(&self, relation: Relation) -> Result<Vec<Value>, RosterError> {
        let mut tables = self.tables.lock().await;
        tables.take_failure(FailOn::Read)?;
        Ok(tables.rows.get(&relation).cloned().unwrap_or_default())
    }

    async fn query_by_field(
        &self,
        relation: Relation,
        field: &str,
        value: &str,
    ) -> Result<Vec<Value>, RosterError> {
        let mut tables = self.tables.lock().await;
        tables.take_failure(FailOn::Read)?;
        Ok(tables
            .rows
            .get(&relation)
            .map(|rows| {
                rows.iter()
                    .filter(|row| field_matches(row, field, value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert(&self, relation: Relation, row: Value) -> Result<Value, RosterError> {
        let mut tables = self.tables.lock().await;
        tables.take_failure(FailOn::Insert)?;

        let Value::Object(mut object) = row else {
            return Err(RosterError::Backend(format!(
                "insert into {} expects an object",
                relation
            )));
        };

        tables.next_id += 1;
        object.insert("id".to_string(), Value::from(tables.next_id));
        let stored = Value::Object(object);
        tables.rows.entry(relation).or_default().push(stored.clone());

        Ok(stored)
    }

    async fn delete_by_field(
        &self,
        relation: Relation,
        field: &str,
        value: &str,
    ) -> Result<usize, RosterError> {
        let mut tables = self.tables.lock().await;
        tables.take_failure(FailOn::Delete)?;

        let Some(rows) = tables.rows.get_mut(&relation) else {
            return Ok(0);
        };
        let before = rows.len();
        rows.retain(|row| !field_matches(row, field, value));
        Ok(before - rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_assigns_distinct_ids() {
        let store = MemoryStore::new();

        let first = store.insert(Relation::Players, json!({ "name": "Alice" })).await.unwrap();
        let second = store.insert(Relation::Coaches, json!({ "name": "Bob", "email": "bob@x.com" })).await.unwrap();

        assert_ne!(first["id"], second["id"]);
        assert_eq!(store.rows(Relation::Players).await.len(), 1);
    }

    #[tokio::test]
    async fn test_query_one_rejects_duplicates() {
        let store = MemoryStore::new();
        for _ in 0..2 {
            store.insert(Relation::Coaches, json!({ "name": "Bob", "email": "bob@x.com" })).await.unwrap();
        }

        let result = store.query_one_by_field(Relation::Coaches, "email", "bob@x.com").await;
        assert!(matches!(result, Err(RosterError::Ambiguous { .. })));
    }

    #[tokio::test]
    async fn test_failure_is_one_shot() {
        let store = MemoryStore::new();
        store.fail_next(FailOn::Read, "connection reset").await;

        let failed = store.query_all(Relation::Players).await;
        assert!(matches!(failed, Err(RosterError::Backend(ref m)) if m == "connection reset"));
        assert!(store.query_all(Relation::Players).await.is_ok());
    }
}
