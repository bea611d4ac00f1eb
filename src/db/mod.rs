mod accounts;
mod posts;
mod schema;

pub use accounts::AccountStore;
pub use posts::PostStore;

use tokio_rusqlite::Connection;

use crate::error::Result;

use schema::SCHEMA;

/// Owns the single SQLite connection. Every store call is funnelled through
/// the connection's worker thread, so writes from different stores never
/// interleave.
pub struct Database {
    conn: Connection,
}

impl Database {
    pub async fn open(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path).await?;
        Self::init(conn).await
    }

    #[cfg(test)]
    pub async fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().await?;
        Self::init(conn).await
    }

    async fn init(conn: Connection) -> Result<Self> {
        conn.call(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await?;

        tracing::debug!("database schema ready");
        Ok(Self { conn })
    }

    pub fn accounts(&self) -> AccountStore {
        AccountStore::new(self.conn.clone())
    }

    pub fn posts(&self) -> PostStore {
        PostStore::new(self.conn.clone())
    }
}
