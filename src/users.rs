pub mod file;
pub mod session;

use serde::{Deserialize, Serialize};

use crate::{prelude::*, users::session::Session};

/// Per-user display and notification settings.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Preferences {
    pub theme: String,
    pub notifications: bool,

    #[serde(default)]
    pub favorite_stores: Vec<String>,

    #[serde(default)]
    pub favorite_products: Vec<String>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
            notifications: true,
            favorite_stores: Vec::new(),
            favorite_products: Vec::new(),
        }
    }
}

/// Pluggable credential store.
///
/// The backend (file, embedded KV, external service) is swappable without
/// touching the comparison logic.
pub trait CredentialStore {
    fn register(&mut self, username: &str, password: &str, email: &str) -> Result;

    /// Verify the credentials and start a session.
    fn authenticate(&self, username: &str, password: &str) -> Result<Session>;

    fn preferences(&self, username: &str) -> Result<Preferences>;

    fn update_preferences(&mut self, username: &str, preferences: Preferences) -> Result;
}
