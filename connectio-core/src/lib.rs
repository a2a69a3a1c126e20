// connectio-core/src/lib.rs

pub mod catalog;
pub mod crypto;
pub mod db;
pub mod http;
pub mod pagination;
pub mod providers;
pub mod repositories;
pub mod sanitize;
pub mod services;

pub use connectio_common::error::Error;
pub use db::Database;
pub use http::{DefaultHttpClient, HttpClient, HttpResponse};
