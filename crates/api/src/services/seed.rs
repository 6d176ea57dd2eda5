//! Admin user seeding on startup.
//!
//! Ensures a dashboard User exists for the configured admin username,
//! hashed like any other user. Runs before the listener binds; a request
//! racing the seed fails closed as unauthenticated.

use tracing::{info, warn};
use uuid::Uuid;

use crate::config::AuthConfig;
use domain::models::User;
use shared::password::{hash_password, PasswordError};
use storage::{Documents, StorageError};

/// Error types for the seed step.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] PasswordError),
}

/// Creates the admin user if it does not exist yet.
///
/// Idempotent: a no-op once a user with the configured admin username is
/// present. Skipped with a warning when no admin password is configured.
pub async fn seed_admin_user(docs: &Documents, config: &AuthConfig) -> Result<(), SeedError> {
    if config.admin_username.is_empty() {
        return Ok(());
    }

    if config.admin_password.is_empty() {
        warn!("TP__AUTH__ADMIN_PASSWORD is empty - skipping admin user seed");
        return Ok(());
    }

    let mut users = docs.users().await?;
    if users.iter().any(|u| u.username == config.admin_username) {
        info!(
            username = %config.admin_username,
            "Admin user already exists - skipping seed"
        );
        return Ok(());
    }

    let user = User {
        id: Uuid::new_v4(),
        username: config.admin_username.clone(),
        password_hash: hash_password(&config.admin_password)?,
        is_admin: true,
    };

    info!(username = %user.username, user_id = %user.id, "Seeded admin user");
    users.push(user);
    docs.save_users(&users).await?;

    Ok(())
}
