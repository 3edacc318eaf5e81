use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{
    prelude::*,
    users::{CredentialStore, file::FileStore},
};

#[derive(Parser)]
pub struct UserArgs {
    /// User store file.
    #[clap(long, env = "MAGPIE_USERS", default_value = "users.json")]
    pub store: PathBuf,

    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Subcommand)]
pub enum UserCommand {
    /// Create an account.
    Register {
        username: String,

        #[clap(long, env = "MAGPIE_PASSWORD")]
        password: String,

        #[clap(long, default_value = "")]
        email: String,
    },

    /// Verify credentials and start a session.
    Login {
        username: String,

        #[clap(long, env = "MAGPIE_PASSWORD")]
        password: String,
    },

    /// Show stored preferences.
    Preferences { username: String },

    /// Add a favorite store or product.
    Favorite {
        username: String,

        #[clap(long)]
        store: Option<String>,

        #[clap(long)]
        product: Option<String>,
    },

    /// Grant or revoke location tracking.
    Location {
        username: String,

        #[clap(long, conflicts_with = "revoke")]
        grant: bool,

        #[clap(long)]
        revoke: bool,
    },
}

#[instrument(skip_all)]
pub fn user(args: &UserArgs) -> Result {
    let mut store = FileStore::open(&args.store)?;
    match &args.command {
        UserCommand::Register { username, password, email } => {
            store.register(username, password, email)?;
        }
        UserCommand::Login { username, password } => {
            let session = store.authenticate(username, password)?;
            info!(started_at = %session.started_at, "authenticated");
            session.logout();
        }
        UserCommand::Preferences { username } => {
            let preferences = store.preferences(username)?;
            println!("{}", serde_json::to_string_pretty(&preferences)?);
        }
        UserCommand::Favorite { username, store: favorite_store, product } => {
            ensure!(
                favorite_store.is_some() || product.is_some(),
                "specify --store and/or --product",
            );
            if let Some(favorite_store) = favorite_store {
                store.add_favorite_store(username, favorite_store)?;
            }
            if let Some(product) = product {
                store.add_favorite_product(username, product)?;
            }
        }
        UserCommand::Location { username, grant, revoke } => {
            if *grant {
                store.grant_location_tracking(username)?;
            } else if *revoke {
                store.revoke_location_tracking(username)?;
            }
            info!(
                %username,
                location_tracking = store.has_location_tracking(username)?,
                "current state",
            );
        }
    }
    Ok(())
}
