use regex::Regex;
use sqlx::{
    sqlite::{
        SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow, SqliteSynchronous,
    },
    ConnectOptions, Row, SqlitePool,
};
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::log::LevelFilter;

use crate::domain::errors::DomainError;
use crate::shared::utils::EntityId;

mod authors;
mod fortunes;
pub mod import;
mod tags;

/// How long a connection waits on a locked database before reporting busy
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct Database {
    pub(crate) pool: SqlitePool,
}

impl Database {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let connect_options = SqliteConnectOptions::from_str(database_url)?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(BUSY_TIMEOUT)
            .foreign_keys(true)
            .log_statements(LevelFilter::Info)
            .log_slow_statements(LevelFilter::Warn, Duration::from_secs(1));

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(connect_options)
            .await?;

        tracing::info!(
            "Database pool ready (max_connections={})",
            max_connections.max(1)
        );
        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("migrations/sqlite").run(&self.pool).await?;
        Ok(())
    }

    /// Drop every table (migration history included) and migrate again
    pub async fn reset_schema(&self) -> Result<(), sqlx::Error> {
        for table in ["fortunes_tags", "fortunes", "tags", "authors", "_sqlx_migrations"] {
            sqlx::query(&format!("DROP TABLE IF EXISTS {}", table))
                .execute(&self.pool)
                .await?;
        }
        tracing::info!("Schema dropped");
        self.run_migrations().await
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
        }
    }
}

// Convert from sqlx errors
impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) => {
                let message = db_err.message();
                if let Some(entity) = unique_violation_entity(message) {
                    DomainError::Conflict(entity)
                } else if is_busy(message) {
                    DomainError::Busy(message.to_string())
                } else {
                    DomainError::Internal(format!("Database error: {}", message))
                }
            }
            sqlx::Error::PoolTimedOut => {
                DomainError::Busy("timed out waiting for a database connection".to_string())
            }
            _ => DomainError::Internal(err.to_string()),
        }
    }
}

/// Entity name for a unique-constraint message such as
/// `UNIQUE constraint failed: fortunes.content`
fn unique_violation_entity(message: &str) -> Option<String> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| {
        Regex::new(r"(?i)unique constraint failed: (\w+)\.").expect("constraint pattern is valid")
    });

    let table = pattern.captures(message)?.get(1)?.as_str();
    let entity = match table {
        "authors" => "author",
        "fortunes" => "fortune",
        "tags" => "tag",
        other => other.trim_end_matches('s'),
    };
    Some(entity.to_string())
}

fn is_busy(message: &str) -> bool {
    let message = message.to_ascii_lowercase();
    message.contains("database is locked")
        || message.contains("database table is locked")
        || message.contains("database is busy")
}

fn decode_id(row: &SqliteRow, column: &str) -> Result<EntityId, DomainError> {
    let raw: i64 = row.try_get(column)?;
    EntityId::from_i64(raw)
        .map_err(|e| DomainError::Internal(format!("corrupt id in column {}: {}", column, e)))
}
