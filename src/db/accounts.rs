use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rusqlite::{params, OptionalExtension, Row};
use tokio_rusqlite::Connection;

use crate::error::{AppError, Result};
use crate::models::Account;

#[derive(Clone)]
pub struct AccountStore {
    conn: Connection,
}

impl AccountStore {
    pub(super) fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Creates a new account. Fails with `DuplicateUsername` if the name is taken.
    pub async fn register(&self, username: &str, password: &str) -> Result<Account> {
        if username.is_empty() {
            return Err(AppError::InvalidInput("username"));
        }
        if password.is_empty() {
            return Err(AppError::InvalidInput("password"));
        }

        let password_hash = hash_password(password)?;
        let name = username.to_string();
        let stored_hash = password_hash.clone();
        let inserted = self
            .conn
            .call(move |conn| {
                let changed = conn.execute(
                    "INSERT INTO accounts (username, password_hash) VALUES (?1, ?2)
                     ON CONFLICT(username) DO NOTHING",
                    params![name, stored_hash],
                )?;
                Ok((changed > 0).then(|| conn.last_insert_rowid()))
            })
            .await?;

        let Some(id) = inserted else {
            tracing::warn!(username, "registration rejected, username exists");
            return Err(AppError::DuplicateUsername(username.to_string()));
        };

        tracing::info!(username, account_id = id, "registered account");
        Ok(Account {
            id,
            username: username.to_string(),
            password_hash,
        })
    }

    /// Returns the account only when the username matches exactly and the
    /// password verifies. Unknown users and wrong passwords both give `None`.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Option<Account>> {
        let Some(account) = self.find(username).await? else {
            return Ok(None);
        };

        let parsed = PasswordHash::new(&account.password_hash)
            .map_err(|e| AppError::PasswordHash(e.to_string()))?;
        if Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_err()
        {
            tracing::debug!(username, "password mismatch");
            return Ok(None);
        }

        Ok(Some(account))
    }

    async fn find(&self, username: &str) -> Result<Option<Account>> {
        let username = username.to_string();
        let account = self
            .conn
            .call(move |conn| {
                let account = conn
                    .query_row(
                        "SELECT id, username, password_hash FROM accounts WHERE username = ?1",
                        params![username],
                        account_from_row,
                    )
                    .optional()?;
                Ok(account)
            })
            .await?;
        Ok(account)
    }
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::PasswordHash(e.to_string()))?;
    Ok(hash.to_string())
}

fn account_from_row(row: &Row) -> rusqlite::Result<Account> {
    Ok(Account {
        id: row.get(0)?,
        username: row.get(1)?,
        password_hash: row.get(2)?,
    })
}
