// connectio-core/src/repositories/mod.rs

pub use connectio_common::traits::{
    ConnectedAppsRepository, SessionCookieRepository, SnapshotRepository,
};

pub use sqlite::connected_apps::SqliteConnectedAppsRepository;
pub use sqlite::sessions::SqliteSessionCookieRepository;
pub use sqlite::snapshots::SqliteSnapshotRepository;

pub mod sqlite;
