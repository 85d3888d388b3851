//! PostgreSQL storage implementation

use std::fmt::Debug;
use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use crate::domain::storage::{first_repeated_key, Storage, StorageEntity, StorageKey};
use crate::domain::DomainError;

/// Connection settings for the PostgreSQL backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresConfig {
    pub url: String,
    pub max_connections: u32,
    /// How long to wait for a pooled connection before failing the call
    pub acquire_timeout: Duration,
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            acquire_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }
}

/// Opens the pool shared by every table of the backend
pub async fn connect_pool(config: &PostgresConfig) -> Result<PgPool, DomainError> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.url)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))
}

/// Table names end up inside SQL text, so only plain identifiers are accepted
fn validate_table_name(name: &str) -> Result<(), DomainError> {
    let mut chars = name.chars();

    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

    if valid_start && valid_rest && name.len() <= 63 {
        Ok(())
    } else {
        Err(DomainError::configuration(format!(
            "Invalid table name '{}': use lowercase letters, digits and underscores",
            name
        )))
    }
}

/// One JSONB document per row, keyed by the entity key.
/// Batch writes run in a single transaction.
pub struct PostgresStorage<E>
where
    E: StorageEntity,
{
    pool: PgPool,
    table: String,
    _phantom: PhantomData<E>,
}

impl<E> Debug for PostgresStorage<E>
where
    E: StorageEntity,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresStorage")
            .field("table", &self.table)
            .finish()
    }
}

impl<E> PostgresStorage<E>
where
    E: StorageEntity,
{
    pub fn new(pool: PgPool, table: impl Into<String>) -> Result<Self, DomainError> {
        let table = table.into();
        validate_table_name(&table)?;

        Ok(Self {
            pool,
            table,
            _phantom: PhantomData,
        })
    }

    /// Creates the backing table when missing
    pub async fn ensure_table(&self) -> Result<(), DomainError> {
        let statement = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                key VARCHAR(255) PRIMARY KEY,
                data JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            self.table
        );

        sqlx::query(&statement)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to create table {}: {}", self.table, e))
            })?;

        Ok(())
    }

    fn decode(row: &PgRow) -> Result<E, DomainError> {
        let data: serde_json::Value = row
            .try_get("data")
            .map_err(|e| DomainError::storage(format!("Failed to read row: {}", e)))?;

        serde_json::from_value(data).map_err(|e| {
            DomainError::serialization(format!("Failed to deserialize entity: {}", e))
        })
    }

    fn encode(entity: &E) -> Result<serde_json::Value, DomainError> {
        serde_json::to_value(entity)
            .map_err(|e| DomainError::serialization(format!("Failed to serialize entity: {}", e)))
    }

    async fn fetch(&self, sql: &str, keys: Option<Vec<String>>) -> Result<Vec<E>, DomainError> {
        let query = sqlx::query(sql);
        let query = match keys {
            Some(keys) => query.bind(keys),
            None => query,
        };

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to read {}: {}", self.table, e)))?;

        rows.iter().map(Self::decode).collect()
    }
}

fn key_strings<K: StorageKey>(keys: &[K]) -> Vec<String> {
    keys.iter().map(|key| key.as_str().to_string()).collect()
}

#[async_trait]
impl<E> Storage<E> for PostgresStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
        let sql = format!("SELECT data FROM {} WHERE key = ANY($1)", self.table);

        Ok(self
            .fetch(&sql, Some(vec![key.as_str().to_string()]))
            .await?
            .into_iter()
            .next())
    }

    async fn get_many(&self, keys: &[E::Key]) -> Result<Vec<E>, DomainError> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT data FROM {} WHERE key = ANY($1) ORDER BY created_at",
            self.table
        );
        self.fetch(&sql, Some(key_strings(keys))).await
    }

    async fn list(&self) -> Result<Vec<E>, DomainError> {
        let sql = format!("SELECT data FROM {} ORDER BY created_at", self.table);
        self.fetch(&sql, None).await
    }

    async fn create_many(&self, entities: Vec<E>) -> Result<(), DomainError> {
        if let Some(key) = first_repeated_key(&entities) {
            return Err(DomainError::conflict(format!(
                "Entity with key '{}' appears more than once in the batch",
                key
            )));
        }

        let sql = format!("INSERT INTO {} (key, data) VALUES ($1, $2)", self.table);
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        for entity in &entities {
            let key = entity.key().as_str();

            sqlx::query(&sql)
                .bind(key)
                .bind(Self::encode(entity)?)
                .execute(&mut *tx)
                .await
                .map_err(|e| match e.as_database_error() {
                    Some(db) if db.is_unique_violation() => {
                        DomainError::conflict(format!("Entity with key '{}' already exists", key))
                    }
                    _ => DomainError::storage(format!("Failed to create entity: {}", e)),
                })?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit transaction: {}", e)))
    }

    async fn update_many(&self, entities: Vec<E>) -> Result<(), DomainError> {
        let sql = format!(
            "UPDATE {} SET data = $2, updated_at = NOW() WHERE key = $1",
            self.table
        );
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        for entity in &entities {
            let key = entity.key().as_str();

            let updated = sqlx::query(&sql)
                .bind(key)
                .bind(Self::encode(entity)?)
                .execute(&mut *tx)
                .await
                .map_err(|e| DomainError::storage(format!("Failed to update entity: {}", e)))?
                .rows_affected();

            // Dropping the transaction rolls back the rows already updated
            if updated == 0 {
                return Err(DomainError::not_found(format!(
                    "Entity with key '{}' not found",
                    key
                )));
            }
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit transaction: {}", e)))
    }

    async fn delete_many(&self, keys: &[E::Key]) -> Result<usize, DomainError> {
        if keys.is_empty() {
            return Ok(0);
        }

        let sql = format!("DELETE FROM {} WHERE key = ANY($1)", self.table);

        let result = sqlx::query(&sql)
            .bind(key_strings(keys))
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete entities: {}", e)))?;

        Ok(result.rows_affected() as usize)
    }

    async fn clear(&self) -> Result<(), DomainError> {
        let sql = format!("DELETE FROM {}", self.table);

        sqlx::query(&sql)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to clear {}: {}", self.table, e)))?;

        Ok(())
    }
}
