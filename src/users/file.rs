use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::{
    prelude::*,
    users::{CredentialStore, Preferences, session::Session},
};

#[derive(Deserialize, Serialize)]
struct UserRecord {
    /// Argon2 hash in PHC string format: salt and parameters travel with it.
    password_hash: String,

    email: String,
    created_at: DateTime<Local>,

    #[serde(default)]
    location_tracking: bool,

    #[serde(default)]
    preferences: Preferences,
}

/// JSON-file-backed credential store.
#[must_use]
pub struct FileStore {
    path: PathBuf,
    users: BTreeMap<String, UserRecord>,
}

impl FileStore {
    /// Open the store, starting empty when the file does not exist yet.
    pub fn open(path: &Path) -> Result<Self> {
        let users = if path.is_file() {
            let contents = fs::read_to_string(path).with_context(|| {
                format!("failed to read the user store from `{}`", path.display())
            })?;
            serde_json::from_str(&contents).with_context(|| {
                format!("failed to parse the user store from `{}`", path.display())
            })?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path: path.to_path_buf(), users })
    }

    fn save(&self) -> Result {
        let contents = serde_json::to_string_pretty(&self.users)?;
        fs::write(&self.path, contents).with_context(|| {
            format!("failed to write the user store to `{}`", self.path.display())
        })
    }

    fn record(&self, username: &str) -> Result<&UserRecord> {
        self.users.get(username).with_context(|| format!("unknown user `{username}`"))
    }

    fn record_mut(&mut self, username: &str) -> Result<&mut UserRecord> {
        self.users.get_mut(username).with_context(|| format!("unknown user `{username}`"))
    }

    pub fn grant_location_tracking(&mut self, username: &str) -> Result {
        self.record_mut(username)?.location_tracking = true;
        self.save()
    }

    pub fn revoke_location_tracking(&mut self, username: &str) -> Result {
        self.record_mut(username)?.location_tracking = false;
        self.save()
    }

    pub fn has_location_tracking(&self, username: &str) -> Result<bool> {
        Ok(self.record(username)?.location_tracking)
    }

    pub fn add_favorite_store(&mut self, username: &str, store: &str) -> Result {
        let favorites = &mut self.record_mut(username)?.preferences.favorite_stores;
        if !favorites.iter().any(|favorite| favorite == store) {
            favorites.push(store.to_string());
        }
        self.save()
    }

    pub fn add_favorite_product(&mut self, username: &str, product: &str) -> Result {
        let favorites = &mut self.record_mut(username)?.preferences.favorite_products;
        if !favorites.iter().any(|favorite| favorite == product) {
            favorites.push(product.to_string());
        }
        self.save()
    }
}

impl CredentialStore for FileStore {
    fn register(&mut self, username: &str, password: &str, email: &str) -> Result {
        ensure!(username.chars().count() >= 3, "username must be at least 3 characters long");
        ensure!(password.chars().count() >= 6, "password must be at least 6 characters long");
        ensure!(!self.users.contains_key(username), "username `{username}` already exists");

        let record = UserRecord {
            password_hash: hash_password(password)?,
            email: email.to_string(),
            created_at: Local::now(),
            location_tracking: false,
            preferences: Preferences::default(),
        };
        self.users.insert(username.to_string(), record);
        self.save()?;
        info!(username, "registered");
        Ok(())
    }

    fn authenticate(&self, username: &str, password: &str) -> Result<Session> {
        let record = self.record(username)?;
        ensure!(verify_password(&record.password_hash, password)?, "invalid password");
        Ok(Session::start(username))
    }

    fn preferences(&self, username: &str) -> Result<Preferences> {
        Ok(self.record(username)?.preferences.clone())
    }

    fn update_preferences(&mut self, username: &str, preferences: Preferences) -> Result {
        self.record_mut(username)?.preferences = preferences;
        self.save()
    }
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|error| anyhow!("failed to hash the password: {error}"))
}

fn verify_password(hash: &str, password: &str) -> Result<bool> {
    let hash =
        PasswordHash::new(hash).map_err(|error| anyhow!("malformed password hash: {error}"))?;
    Ok(Argon2::default().verify_password(password.as_bytes(), &hash).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temporary_store() -> Result<(tempfile::TempDir, FileStore)> {
        let directory = tempfile::tempdir()?;
        let store = FileStore::open(&directory.path().join("users.json"))?;
        Ok((directory, store))
    }

    #[test]
    fn register_and_authenticate() -> Result {
        let (_directory, mut store) = temporary_store()?;
        store.register("alice", "hunter2hunter2", "alice@example.com")?;

        let session = store.authenticate("alice", "hunter2hunter2")?;
        assert_eq!(session.username, "alice");
        session.logout();

        assert!(store.authenticate("alice", "wrong password").is_err());
        assert!(store.authenticate("bob", "hunter2hunter2").is_err());
        Ok(())
    }

    #[test]
    fn register_validates_input() -> Result {
        let (_directory, mut store) = temporary_store()?;
        assert!(store.register("al", "longenough", "").is_err());
        assert!(store.register("alice", "short", "").is_err());

        store.register("alice", "longenough", "")?;
        assert!(store.register("alice", "longenough", "").is_err());
        Ok(())
    }

    #[test]
    fn hashes_are_salted() -> Result {
        // Same password, different PHC strings.
        assert_ne!(hash_password("hunter2hunter2")?, hash_password("hunter2hunter2")?);
        Ok(())
    }

    #[test]
    fn preferences_survive_reopening() -> Result {
        let (directory, mut store) = temporary_store()?;
        let path = directory.path().join("users.json");
        store.register("alice", "longenough", "")?;

        let mut preferences = store.preferences("alice")?;
        assert_eq!(preferences.theme, "light");
        assert!(preferences.notifications);

        preferences.theme = "dark".to_string();
        store.update_preferences("alice", preferences)?;
        store.add_favorite_store("alice", "Walmart")?;
        store.add_favorite_store("alice", "Walmart")?;
        store.add_favorite_product("alice", "Laptop")?;

        let reopened = FileStore::open(&path)?;
        let preferences = reopened.preferences("alice")?;
        assert_eq!(preferences.theme, "dark");
        assert_eq!(preferences.favorite_stores, vec!["Walmart".to_string()]);
        assert_eq!(preferences.favorite_products, vec!["Laptop".to_string()]);
        Ok(())
    }

    #[test]
    fn location_tracking_grant_and_revoke() -> Result {
        let (_directory, mut store) = temporary_store()?;
        store.register("alice", "longenough", "")?;
        assert!(!store.has_location_tracking("alice")?);

        store.grant_location_tracking("alice")?;
        assert!(store.has_location_tracking("alice")?);

        store.revoke_location_tracking("alice")?;
        assert!(!store.has_location_tracking("alice")?);
        Ok(())
    }
}
