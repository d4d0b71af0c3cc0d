use async_trait::async_trait;
use serde_json::Value;
use sqlx::MySqlPool;

use super::{PersonDirectory, RecordStore, StoreError, StoreResult};
use crate::model::cohort::Cohort;
use crate::model::person::PersonRef;
use crate::utils::name_cache;

/// Durable document store over the `ledger_documents` table
/// (`doc_key VARCHAR PRIMARY KEY, doc JSON NOT NULL`).
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for MySqlStore {
    async fn load(&self, key: &str) -> StoreResult<Option<Value>> {
        sqlx::query_scalar::<_, Value>("SELECT doc FROM ledger_documents WHERE doc_key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    async fn save(&self, key: &str, value: Value) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO ledger_documents (doc_key, doc)
            VALUES (?, ?)
            ON DUPLICATE KEY UPDATE doc = VALUES(doc)
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(())
    }
}

/// Roster view over the `persons` table, fronted by the display-name cache.
pub struct MySqlDirectory {
    pool: MySqlPool,
}

impl MySqlDirectory {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PersonDirectory for MySqlDirectory {
    async fn list(&self, cohort: Cohort) -> StoreResult<Vec<PersonRef>> {
        let rows = sqlx::query_as::<_, (String, String)>(
            r#"
            SELECT id, display_name
            FROM persons
            WHERE cohort = ? AND status = 'active'
            ORDER BY display_name
            "#,
        )
        .bind(cohort.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(id, display_name)| PersonRef { id, display_name })
            .collect())
    }

    async fn display_name(&self, person_id: &str) -> StoreResult<Option<String>> {
        if let Some(name) = name_cache::lookup(person_id).await {
            return Ok(Some(name));
        }

        let name = sqlx::query_scalar::<_, String>(
            "SELECT display_name FROM persons WHERE id = ?",
        )
        .bind(person_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        if let Some(name) = &name {
            name_cache::remember(person_id, name).await;
        }

        Ok(name)
    }
}
