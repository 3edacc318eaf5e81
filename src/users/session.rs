use chrono::{DateTime, Local};

use crate::prelude::*;

/// Explicit login session.
///
/// Created by a successful [`crate::users::CredentialStore::authenticate`] and
/// destroyed by [`Session::logout`] — there is no ambient logged-in state.
#[must_use]
#[derive(Debug)]
pub struct Session {
    pub username: String,
    pub started_at: DateTime<Local>,
}

impl Session {
    pub(crate) fn start(username: &str) -> Self {
        info!(username, "session started");
        Self { username: username.to_string(), started_at: Local::now() }
    }

    pub fn logout(self) {
        info!(username = self.username, "session ended");
    }
}
