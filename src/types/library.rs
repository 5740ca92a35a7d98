//! Plex Media Server library sections and auth tokens

use serde::{Deserialize, Serialize};

/// Section type that gets refreshed after post-processing
pub const SHOW_SECTION_TYPE: &str = "show";

/// Query parameter carrying the auth token on server requests
pub const TOKEN_QUERY_PARAM: &str = "X-Plex-Token";

/// A `Directory` entry of `/library/sections`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibrarySection {
    /// Section key, used in the refresh path
    pub key: String,
    /// Content type (`show`, `movie`, `artist`, ...)
    #[serde(rename = "type")]
    pub section_type: String,
    /// Display title, when the server sends one
    pub title: Option<String>,
}

impl LibrarySection {
    pub fn new(key: impl Into<String>, section_type: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            section_type: section_type.into(),
            title: None,
        }
    }

    /// Exact match against `show`; `Show` or `shows` do not count
    pub fn is_show(&self) -> bool {
        self.section_type == SHOW_SECTION_TYPE
    }
}

/// Short-lived token handed out by the Plex.tv sign-in endpoint
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthToken(***)")
    }
}
