// connectio-common/src/traits/mod.rs

pub mod repository_traits;

pub use repository_traits::{
    ConnectedAppsRepository, SessionCookieRepository, SnapshotRepository,
};
