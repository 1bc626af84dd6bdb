//! Session identifiers and share links.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque per-session key used in both the publish and fetch paths.
///
/// Generated server-side from a URL-safe alphabet, so it can be used as a
/// path segment without escaping.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// Body of the create-session response: `{"id":"..."}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
}

/// Link a sharer hands to viewers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLink {
    pub url: String,
}

impl ShareLink {
    /// Build `<base_url>/view/<id>`. Trailing slashes on `base_url` are ignored.
    #[must_use]
    pub fn for_user(base_url: &str, user: &User) -> Self {
        Self { url: format!("{}/view/{}", base_url.trim_end_matches('/'), user.id) }
    }
}

#[cfg(test)]
#[path = "user_test.rs"]
mod tests;
