//! PostgreSQL-backed item store.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{Item, TodoError};
use crate::ports::ItemStore;

/// Create the `todo` table when it does not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), TodoError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS todo (
            id BIGSERIAL PRIMARY KEY,
            content TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .map_err(|e| TodoError::store(format!("Failed to create todo table: {}", e)))?;

    Ok(())
}

#[derive(Clone)]
pub struct PostgresItemStore {
    pool: PgPool,
}

impl PostgresItemStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemStore for PostgresItemStore {
    async fn insert(&self, text: &str) -> Result<Item, TodoError> {
        let (id, content) = sqlx::query_as::<_, (i64, String)>(
            r#"
            INSERT INTO todo (content)
            VALUES ($1)
            RETURNING id, content
            "#,
        )
        .bind(text)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| TodoError::store(format!("Failed to insert item: {}", e)))?;

        Ok(Item::new(id, content))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Item>, TodoError> {
        let row = sqlx::query_as::<_, (i64, String)>(
            r#"
            SELECT id, content
            FROM todo
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TodoError::store(format!("Failed to load item: {}", e)))?;

        Ok(row.map(|(id, content)| Item::new(id, content)))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), TodoError> {
        let result = sqlx::query(
            r#"
            DELETE FROM todo
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| TodoError::store(format!("Failed to delete item: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(TodoError::NotFound(id));
        }

        Ok(())
    }

    async fn list_all_desc(&self) -> Result<Vec<Item>, TodoError> {
        let rows = sqlx::query_as::<_, (i64, String)>(
            r#"
            SELECT id, content
            FROM todo
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| TodoError::store(format!("Failed to list items: {}", e)))?;

        Ok(rows
            .into_iter()
            .map(|(id, content)| Item::new(id, content))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    // Exercising PostgresItemStore requires a running PostgreSQL
    // instance. The store contract itself is covered against the
    // in-memory adapter in tests/live_feed_integration.rs; run this
    // adapter against a disposable database when changing the SQL.
}
