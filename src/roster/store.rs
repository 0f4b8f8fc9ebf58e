use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

use super::error::RosterError;

/// The three relations the page reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Players,
    Coaches,
    CoachRequests,
}

impl Relation {
    pub fn table(&self) -> &'static str {
        match self {
            Relation::Players => "players",
            Relation::Coaches => "coaches",
            Relation::CoachRequests => "coach_requests",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

/// Relation-oriented access to the hosted store.
///
/// Rows travel as JSON objects; the store assigns `id` on insert.
#[async_trait]
pub trait RosterStore: Send + Sync {
    async fn query_all(&self, relation: Relation) -> Result<Vec<Value>, RosterError>;

    async fn query_by_field(
        &self,
        relation: Relation,
        field: &str,
        value: &str,
    ) -> Result<Vec<Value>, RosterError>;

    /// Returns the inserted row as stored, including its new `id`.
    async fn insert(&self, relation: Relation, row: Value) -> Result<Value, RosterError>;

    /// Returns the number of rows removed.
    async fn delete_by_field(
        &self,
        relation: Relation,
        field: &str,
        value: &str,
    ) -> Result<usize, RosterError>;

    /// Equality lookup expected to match at most one row.
    async fn query_one_by_field(
        &self,
        relation: Relation,
        field: &str,
        value: &str,
    ) -> Result<Option<Value>, RosterError> {
        let mut rows = self.query_by_field(relation, field, value).await?;
        match rows.len() {
            0 => Ok(None),
            1 => Ok(rows.pop()),
            _ => Err(RosterError::Ambiguous {
                relation,
                field: field.to_string(),
            }),
        }
    }
}
