pub mod queries;
pub mod transfer;

use std::str::FromStr;

use sqlx::error::ErrorKind;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

use crate::configuration::DatabaseSettings;

pub use queries::categories::Category;
pub use queries::questions::{NewQuestion, Question};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Object not found")]
    NotFound,
    #[error("Constraint violation: {0}")]
    Constraint(String),
    #[error("Connection error: {0}")]
    Connection(sqlx::Error),
    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("Database error: {0}")]
    Other(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> StoreError {
        if let sqlx::Error::Database(db_error) = &error {
            if matches!(
                db_error.kind(),
                ErrorKind::UniqueViolation
                    | ErrorKind::ForeignKeyViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation
            ) {
                return StoreError::Constraint(db_error.message().to_owned());
            }
        }
        match error {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            error @ (sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed) => StoreError::Connection(error),
            other => StoreError::Other(other),
        }
    }
}

/// Handle to the trivia database. Opened once at start-up and handed to
/// everything that needs persistence.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    pub async fn connect(settings: &DatabaseSettings) -> Result<Store, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(settings.max_connections)
            .connect_with(settings.connect_options()?)
            .await?;
        Ok(Store { pool })
    }

    /// Every `:memory:` connection is its own database, so this pool holds exactly one
    /// connection and never recycles it.
    pub async fn in_memory() -> Result<Store, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(SqliteConnectOptions::from_str("sqlite::memory:")?)
            .await?;
        Ok(Store { pool })
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn migrations_seed_categories() {
        let store = Store::in_memory().await.unwrap();
        store.migrate().await.unwrap();
        let categories = store.all_categories().await.unwrap();
        assert_eq!(categories.len(), 6);
        assert_eq!(categories[0].kind, "Science");
    }

    #[tokio::test]
    async fn migrations_are_repeatable() {
        let store = Store::in_memory().await.unwrap();
        store.migrate().await.unwrap();
        store.migrate().await.unwrap();
        assert_eq!(store.all_categories().await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn in_memory_data_outlives_a_single_query() {
        let store = Store::in_memory().await.unwrap();
        store.migrate().await.unwrap();
        let clone = store.clone();
        let created = clone
            .create_question(&NewQuestion {
                question: "What is 2+2?".to_owned(),
                answer: "4".to_owned(),
                category: 1,
                difficulty: 1,
            })
            .await
            .unwrap();
        let (first, second) = tokio::join!(store.all_questions(), clone.all_questions());
        assert_eq!(first.unwrap(), vec![created.clone()]);
        assert_eq!(second.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn closed_store_reports_connection_errors() {
        let store = Store::in_memory().await.unwrap();
        store.close().await;
        assert!(matches!(
            store.all_categories().await,
            Err(StoreError::Connection(_))
        ));
    }

    #[test]
    fn row_not_found_is_not_found() {
        assert!(matches!(
            StoreError::from(sqlx::Error::RowNotFound),
            StoreError::NotFound
        ));
    }

    #[test]
    fn pool_failures_are_connection_errors() {
        assert!(matches!(
            StoreError::from(sqlx::Error::PoolTimedOut),
            StoreError::Connection(_)
        ));
    }
}
