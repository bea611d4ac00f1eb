use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Username already taken: {0}")]
    DuplicateUsername(String),

    #[error("{0} must not be empty")]
    InvalidInput(&'static str),

    #[error("Post not found: {0}")]
    NotFound(i64),

    #[error("You must be logged in to do that")]
    NotLoggedIn,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Database error: {0}")]
    Database(#[from] tokio_rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Errors a caller can report to the user and carry on from.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::DuplicateUsername(_)
                | AppError::InvalidInput(_)
                | AppError::NotFound(_)
                | AppError::NotLoggedIn
                | AppError::InvalidCredentials
        )
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_are_recoverable() {
        assert!(AppError::DuplicateUsername("alice".into()).is_recoverable());
        assert!(AppError::InvalidInput("title").is_recoverable());
        assert!(AppError::NotFound(7).is_recoverable());
        assert!(AppError::NotLoggedIn.is_recoverable());
        assert!(!AppError::Config("bad".into()).is_recoverable());
        assert!(!AppError::Other(anyhow::anyhow!("disk gone")).is_recoverable());
    }

    #[test]
    fn messages_name_the_problem() {
        assert_eq!(AppError::NotFound(42).to_string(), "Post not found: 42");
        assert_eq!(
            AppError::InvalidInput("title").to_string(),
            "title must not be empty"
        );
    }
}
