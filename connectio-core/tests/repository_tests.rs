// connectio-core/tests/repository_tests.rs

use serde_json::json;
use sqlx::Row;

use connectio_common::models::{Provider, ProviderSnapshot, SessionCookie};
use connectio_core::crypto::Encryptor;
use connectio_core::repositories::{
    ConnectedAppsRepository, SessionCookieRepository, SnapshotRepository,
    SqliteConnectedAppsRepository, SqliteSessionCookieRepository, SqliteSnapshotRepository,
};
use connectio_core::Database;

async fn database() -> Database {
    let db = Database::in_memory().await.unwrap();
    db.init_schema().await.unwrap();
    db
}

fn encryptor() -> Encryptor {
    let key = Encryptor::generate_key().unwrap();
    Encryptor::from_base64_key(&key).unwrap()
}

#[tokio::test]
async fn snapshot_upsert_get_round_trip() -> anyhow::Result<()> {
    let db = database().await;
    let repo = SqliteSnapshotRepository::new(db.pool().clone());

    let snapshot = ProviderSnapshot::new(Provider::Github, json!({ "octocat": { "stats": {} } }));
    repo.upsert(&snapshot).await?;

    let loaded = repo.get(Provider::Github).await?.unwrap();
    assert_eq!(loaded.provider, Provider::Github);
    assert_eq!(loaded.payload, snapshot.payload);
    assert_eq!(loaded.fetched_at.timestamp(), snapshot.fetched_at.timestamp());
    Ok(())
}

#[tokio::test]
async fn snapshot_upsert_replaces_previous_document() -> anyhow::Result<()> {
    let db = database().await;
    let repo = SqliteSnapshotRepository::new(db.pool().clone());

    repo.upsert(&ProviderSnapshot::new(Provider::Zomato, json!({ "v": 1 })))
        .await?;
    repo.upsert(&ProviderSnapshot::new(Provider::Zomato, json!({ "v": 2 })))
        .await?;

    let loaded = repo.get(Provider::Zomato).await?.unwrap();
    assert_eq!(loaded.payload, json!({ "v": 2 }));
    assert_eq!(repo.list().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn snapshot_delete_is_scoped_to_one_provider() -> anyhow::Result<()> {
    let db = database().await;
    let repo = SqliteSnapshotRepository::new(db.pool().clone());

    repo.upsert(&ProviderSnapshot::new(Provider::Zomato, json!({})))
        .await?;
    repo.upsert(&ProviderSnapshot::new(Provider::Swiggy, json!({})))
        .await?;

    repo.delete(Provider::Zomato).await?;

    assert!(repo.get(Provider::Zomato).await?.is_none());
    assert!(repo.get(Provider::Swiggy).await?.is_some());
    Ok(())
}

#[tokio::test]
async fn connected_apps_set_semantics() -> anyhow::Result<()> {
    let db = database().await;
    let repo = SqliteConnectedAppsRepository::new(db.pool().clone());

    assert!(!repo.is_connected(Provider::Github).await?);

    repo.set_connected(Provider::Github, true).await?;
    repo.set_connected(Provider::Github, true).await?;
    repo.set_connected(Provider::Swiggy, true).await?;

    assert!(repo.is_connected(Provider::Github).await?);
    assert_eq!(repo.connected().await?.len(), 2);

    repo.set_connected(Provider::Github, false).await?;
    assert!(!repo.is_connected(Provider::Github).await?);
    assert_eq!(repo.connected().await?, vec![Provider::Swiggy]);
    Ok(())
}

#[tokio::test]
async fn session_cookies_round_trip_and_replace() -> anyhow::Result<()> {
    let db = database().await;
    let repo = SqliteSessionCookieRepository::new(db.pool().clone(), encryptor());

    repo.store_cookies(
        Provider::Swiggy,
        &[
            SessionCookie::new("sid", "alpha"),
            SessionCookie::new("token", "beta"),
        ],
    )
    .await?;

    let jar = repo.cookies(Provider::Swiggy).await?;
    assert_eq!(jar.len(), 2);
    assert_eq!(jar[0], SessionCookie::new("sid", "alpha"));

    // A later import fully replaces the jar.
    repo.store_cookies(Provider::Swiggy, &[SessionCookie::new("sid", "gamma")])
        .await?;
    let jar = repo.cookies(Provider::Swiggy).await?;
    assert_eq!(jar, vec![SessionCookie::new("sid", "gamma")]);

    repo.clear(Provider::Swiggy).await?;
    assert!(repo.cookies(Provider::Swiggy).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn session_cookie_values_are_encrypted_at_rest() -> anyhow::Result<()> {
    let db = database().await;
    let repo = SqliteSessionCookieRepository::new(db.pool().clone(), encryptor());

    repo.store_cookies(Provider::Zomato, &[SessionCookie::new("zat", "plaintext-token")])
        .await?;

    let row = sqlx::query("SELECT value FROM session_cookies WHERE provider = 'zomato'")
        .fetch_one(db.pool())
        .await?;
    let stored: String = row.try_get("value")?;

    assert_ne!(stored, "plaintext-token");
    assert!(!stored.contains("plaintext-token"));

    let jar = repo.cookies(Provider::Zomato).await?;
    assert_eq!(jar[0].value, "plaintext-token");
    Ok(())
}
