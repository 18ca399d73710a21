use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of an administrative user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminRole {
    Superadmin,
    Admin,
    Moderator,
}

/// Permissions granted to a freshly seeded admin.
pub const DEFAULT_ADMIN_PERMISSIONS: &[&str] = &["read", "write", "update", "delete"];

/// An administrative user stored in the `admins` collection.
///
/// `email` is the dedup key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub name: String,
    pub email: String,
    /// bcrypt hash, never the plain-text password.
    pub password: String,
    pub role: AdminRole,
    pub is_active: bool,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Who an informational page is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    User,
    Partner,
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Audience::User => write!(f, "user"),
            Audience::Partner => write!(f, "partner"),
        }
    }
}

impl Audience {
    /// Parse an audience from a string (case-insensitive).
    pub fn from_str_ci(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "user" => Some(Audience::User),
            "partner" => Some(Audience::Partner),
            _ => None,
        }
    }
}

/// A static informational page (terms, privacy, about, ...) stored in the
/// `infopages` collection. `(audience, slug)` is the effective dedup key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoPage {
    pub audience: Audience,
    pub slug: String,
    pub title: String,
    pub content: String,
}

/// An admin-defined property category, as stored by the category service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCategory {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub display_name: String,
    /// Icon key understood by the frontend icon set (e.g. `Tent`, `Castle`).
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub badge: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}
