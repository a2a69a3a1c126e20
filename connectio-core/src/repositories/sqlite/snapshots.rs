//! connectio-core/src/repositories/sqlite/snapshots.rs

use std::str::FromStr;

use chrono::DateTime;
use sqlx::{Pool, Row, Sqlite};

use connectio_common::models::{Provider, ProviderSnapshot};
use connectio_common::traits::SnapshotRepository;

use crate::Error;

#[derive(Clone)]
pub struct SqliteSnapshotRepository {
    pool: Pool<Sqlite>,
}

impl SqliteSnapshotRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    fn row_to_snapshot(row: &sqlx::sqlite::SqliteRow) -> Result<ProviderSnapshot, Error> {
        let provider_str: String = row.try_get("provider")?;
        let payload_str: String = row.try_get("payload")?;
        let epoch: i64 = row.try_get("fetched_at")?;

        let fetched_at = DateTime::from_timestamp(epoch, 0)
            .ok_or_else(|| Error::Parse(format!("invalid fetched_at epoch: {epoch}")))?;

        Ok(ProviderSnapshot {
            provider: Provider::from_str(&provider_str).map_err(Error::Parse)?,
            payload: serde_json::from_str(&payload_str)?,
            fetched_at,
        })
    }
}

#[async_trait::async_trait]
impl SnapshotRepository for SqliteSnapshotRepository {
    async fn upsert(&self, snapshot: &ProviderSnapshot) -> Result<(), Error> {
        let provider_str = snapshot.provider.to_string();
        let payload = serde_json::to_string(&snapshot.payload)?;

        sqlx::query(
            r#"
            INSERT INTO snapshots (provider, payload, fetched_at)
            VALUES (?, ?, ?)
            ON CONFLICT (provider) DO UPDATE SET
                payload = excluded.payload,
                fetched_at = excluded.fetched_at
            "#,
        )
        .bind(&provider_str)
        .bind(payload)
        .bind(snapshot.fetched_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, provider: Provider) -> Result<Option<ProviderSnapshot>, Error> {
        let row = sqlx::query(
            r#"
            SELECT provider, payload, fetched_at
            FROM snapshots
            WHERE provider = ?
            "#,
        )
        .bind(provider.to_string())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(r) => Ok(Some(Self::row_to_snapshot(&r)?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, provider: Provider) -> Result<(), Error> {
        sqlx::query(
            r#"
            DELETE FROM snapshots
            WHERE provider = ?
            "#,
        )
        .bind(provider.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<ProviderSnapshot>, Error> {
        let rows = sqlx::query(
            r#"
            SELECT provider, payload, fetched_at
            FROM snapshots
            ORDER BY provider
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut results = Vec::with_capacity(rows.len());
        for r in rows {
            results.push(Self::row_to_snapshot(&r)?);
        }
        Ok(results)
    }
}
