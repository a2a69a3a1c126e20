//! connectio-core/src/repositories/sqlite/sessions.rs

use sqlx::{Pool, Row, Sqlite};

use connectio_common::models::{Provider, SessionCookie};
use connectio_common::traits::SessionCookieRepository;

use crate::crypto::Encryptor;
use crate::Error;

/// Cookie jar per provider, values encrypted at rest.
#[derive(Clone)]
pub struct SqliteSessionCookieRepository {
    pool: Pool<Sqlite>,
    encryptor: Encryptor,
}

impl SqliteSessionCookieRepository {
    pub fn new(pool: Pool<Sqlite>, encryptor: Encryptor) -> Self {
        Self { pool, encryptor }
    }
}

#[async_trait::async_trait]
impl SessionCookieRepository for SqliteSessionCookieRepository {
    async fn store_cookies(
        &self,
        provider: Provider,
        cookies: &[SessionCookie],
    ) -> Result<(), Error> {
        let provider_str = provider.to_string();

        sqlx::query(
            r#"
            DELETE FROM session_cookies
            WHERE provider = ?
            "#,
        )
        .bind(&provider_str)
        .execute(&self.pool)
        .await?;

        for cookie in cookies {
            let encrypted_value = self.encryptor.encrypt(&cookie.value)?;
            sqlx::query(
                r#"
                INSERT INTO session_cookies (provider, name, value)
                VALUES (?, ?, ?)
                ON CONFLICT (provider, name) DO UPDATE SET
                    value = excluded.value
                "#,
            )
            .bind(&provider_str)
            .bind(&cookie.name)
            .bind(encrypted_value)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    async fn cookies(&self, provider: Provider) -> Result<Vec<SessionCookie>, Error> {
        let rows = sqlx::query(
            r#"
            SELECT name, value
            FROM session_cookies
            WHERE provider = ?
            ORDER BY name
            "#,
        )
        .bind(provider.to_string())
        .fetch_all(&self.pool)
        .await?;

        let mut cookies = Vec::with_capacity(rows.len());
        for r in rows {
            let name: String = r.try_get("name")?;
            let encrypted_value: String = r.try_get("value")?;
            cookies.push(SessionCookie {
                name,
                value: self.encryptor.decrypt(&encrypted_value)?,
            });
        }
        Ok(cookies)
    }

    async fn clear(&self, provider: Provider) -> Result<(), Error> {
        sqlx::query(
            r#"
            DELETE FROM session_cookies
            WHERE provider = ?
            "#,
        )
        .bind(provider.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
