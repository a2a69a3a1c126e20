// connectio-common/src/models/session.rs

use serde::{Deserialize, Serialize};

/// One browser session cookie captured for a provider's origin.
/// The stand-in for the cookie jar the extension read from the host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
}

impl SessionCookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
