use crate::error::{AppError, Result};
use crate::models::Account;

/// Which posts the feed shows. Lives on the viewer's session, never in the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedSelection {
    pub selected_author: Option<String>,
}

/// Per-viewer state: who is logged in and how the feed is filtered.
#[derive(Debug, Default)]
pub struct Session {
    user: Option<Account>,
    pub selection: FeedSelection,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login(&mut self, account: Account) {
        tracing::info!(username = %account.username, "logged in");
        self.user = Some(account);
    }

    pub fn logout(&mut self) {
        if let Some(account) = self.user.take() {
            tracing::info!(username = %account.username, "logged out");
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|a| a.username.as_str())
    }

    /// Gate for mutating post operations. Returns the username to use as author.
    pub fn require_login(&self) -> Result<&str> {
        self.username().ok_or(AppError::NotLoggedIn)
    }
}
