use async_trait::async_trait;
use log::{debug, error};
use postgrest::Postgrest;
use serde::Deserialize;
use serde_json::Value;

use crate::config::SupabaseConfig;
use crate::roster::error::RosterError;
use crate::roster::store::{Relation, RosterStore};

/// PostgREST adapter for the roster tables.
pub struct SupabaseStore {
    client: Postgrest,
}

impl SupabaseStore {
    pub fn new(config: &SupabaseConfig) -> Self {
        let client = Postgrest::new(config.rest_url())
            .insert_header("apikey", config.key.clone())
            .insert_header("Authorization", format!("Bearer {}", config.key));
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: Option<String>,
    details: Option<String>,
}

/// Turns a PostgREST response into rows, keeping the backend's own message on failure.
fn decode_response(status: u16, body: &str) -> Result<Vec<Value>, RosterError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<PostgrestError>(body)
            .ok()
            .and_then(|e| e.message.or(e.details))
            .unwrap_or_else(|| format!("request failed with status {}: {}", status, body.trim()));
        return Err(RosterError::Backend(message));
    }

    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    match serde_json::from_str::<Value>(body)? {
        Value::Array(rows) => Ok(rows),
        Value::Null => Ok(Vec::new()),
        row => Ok(vec![row]),
    }
}

async fn read_rows(
    relation: Relation,
    request: postgrest::Builder,
) -> Result<Vec<Value>, RosterError> {
    let response = request.execute().await.map_err(|e| {
        error!("supabase request error on {}: {}", relation, e);
        RosterError::Backend(e.to_string())
    })?;

    let status = response.status().as_u16();
    let body = response.text().await.map_err(|e| {
        error!("error reading response body from {}: {}", relation, e);
        RosterError::Backend(e.to_string())
    })?;

    debug!("{} responded {} ({} bytes)", relation, status, body.len());
    decode_response(status, &body).map_err(|e| {
        error!("{} request failed: {}", relation, e);
        e
    })
}

#[async_trait]
impl RosterStore for SupabaseStore {
    async fn query_all(&self, relation: Relation) -> Result<Vec<Value>, RosterError> {
        let request = self
            .client
            .from(relation.table())
            .select("*")
            .order("id.asc");
        read_rows(relation, request).await
    }

    async fn query_by_field(
        &self,
        relation: Relation,
        field: &str,
        value: &str,
    ) -> Result<Vec<Value>, RosterError> {
        let request = self
            .client
            .from(relation.table())
            .select("*")
            .eq(field, value)
            .order("id.asc");
        read_rows(relation, request).await
    }

    async fn insert(&self, relation: Relation, row: Value) -> Result<Value, RosterError> {
        let body = serde_json::to_string(&[row])?;
        let request = self.client.from(relation.table()).insert(body);
        read_rows(relation, request)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| RosterError::Backend(format!("insert into {} returned no row", relation)))
    }

    async fn delete_by_field(
        &self,
        relation: Relation,
        field: &str,
        value: &str,
    ) -> Result<usize, RosterError> {
        let request = self.client.from(relation.table()).delete().eq(field, value);
        Ok(read_rows(relation, request).await?.len())
    }
}
