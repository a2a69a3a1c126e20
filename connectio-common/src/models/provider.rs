// connectio-common/src/models/provider.rs

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

/// A third-party service whose account data can be linked and cached locally.
/// Add sqlx::Type so that SQLx knows how to decode this enum from its TEXT form.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "TEXT")]
#[sqlx(rename_all = "lowercase")]
pub enum Provider {
    Github,
    Zomato,
    Swiggy,
}

impl Provider {
    /// Every provider, in catalog order.
    pub fn all() -> [Provider; 3] {
        [Provider::Github, Provider::Zomato, Provider::Swiggy]
    }

    /// Origin whose session cookies authenticate this provider's endpoints,
    /// if it uses cookie auth at all.
    pub fn cookie_origin(&self) -> Option<&'static str> {
        match self {
            Provider::Github => None,
            Provider::Zomato => Some("https://www.zomato.com"),
            Provider::Swiggy => Some("https://www.swiggy.com"),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Github => write!(f, "github"),
            Provider::Zomato => write!(f, "zomato"),
            Provider::Swiggy => write!(f, "swiggy"),
        }
    }
}

impl FromStr for Provider {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "github" => Ok(Provider::Github),
            "zomato" => Ok(Provider::Zomato),
            "swiggy" => Ok(Provider::Swiggy),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}
