//! connectio-core/src/repositories/sqlite/connected_apps.rs

use std::str::FromStr;

use chrono::Utc;
use sqlx::{Pool, Row, Sqlite};

use connectio_common::models::Provider;
use connectio_common::traits::ConnectedAppsRepository;

use crate::Error;

#[derive(Clone)]
pub struct SqliteConnectedAppsRepository {
    pool: Pool<Sqlite>,
}

impl SqliteConnectedAppsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ConnectedAppsRepository for SqliteConnectedAppsRepository {
    async fn set_connected(&self, provider: Provider, connected: bool) -> Result<(), Error> {
        if connected {
            sqlx::query(
                r#"
                INSERT INTO connected_apps (provider, connected_at)
                VALUES (?, ?)
                ON CONFLICT (provider) DO UPDATE SET
                    connected_at = excluded.connected_at
                "#,
            )
            .bind(provider.to_string())
            .bind(Utc::now().timestamp())
            .execute(&self.pool)
            .await?;
        } else {
            sqlx::query(
                r#"
                DELETE FROM connected_apps
                WHERE provider = ?
                "#,
            )
            .bind(provider.to_string())
            .execute(&self.pool)
            .await?;
        }
        Ok(())
    }

    async fn is_connected(&self, provider: Provider) -> Result<bool, Error> {
        let row = sqlx::query(
            r#"
            SELECT provider
            FROM connected_apps
            WHERE provider = ?
            "#,
        )
        .bind(provider.to_string())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.is_some())
    }

    async fn connected(&self) -> Result<Vec<Provider>, Error> {
        let rows = sqlx::query(
            r#"
            SELECT provider
            FROM connected_apps
            ORDER BY connected_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut providers = Vec::with_capacity(rows.len());
        for r in rows {
            let provider_str: String = r.try_get("provider")?;
            providers.push(Provider::from_str(&provider_str).map_err(Error::Parse)?);
        }
        Ok(providers)
    }
}
