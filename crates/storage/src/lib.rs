pub mod dto;
pub mod error;
pub mod models;
pub mod postgres;
mod queries;
pub mod session;
pub mod sqlite;

use std::sync::Arc;

use error::Result;
use postgres::PgProvider;
use session::{Session, SessionProvider};
use sqlite::SqliteProvider;

/// Handle to the backing store, passed explicitly to every service call
#[derive(Clone)]
pub struct Database {
    provider: Arc<dyn SessionProvider>,
}

impl Database {
    /// Connect to the store named by `database_url`. `sqlite:` URLs open a
    /// SQLite database, anything else is handed to PostgreSQL.
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        if database_url.starts_with("sqlite:") {
            let provider = SqliteProvider::connect(database_url, max_connections).await?;
            return Ok(Self::from_provider(provider));
        }

        let provider = PgProvider::connect(database_url, max_connections).await?;
        Ok(Self::from_provider(provider))
    }

    /// Private SQLite database living in memory, schema included
    pub async fn in_memory() -> Result<Self> {
        let db = Self::from_provider(SqliteProvider::in_memory().await?);
        db.ensure_schema().await?;
        Ok(db)
    }

    pub fn from_provider(provider: impl SessionProvider + 'static) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }

    /// Open a new unit-of-work
    pub async fn begin(&self) -> Result<Box<dyn Session>> {
        self.provider.begin().await
    }

    pub async fn ensure_schema(&self) -> Result<()> {
        self.provider.ensure_schema().await
    }
}
