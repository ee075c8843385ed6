use async_trait::async_trait;
use core_config::database::DatabaseConfig;
use sea_orm::{
    ConnectOptions, Database, DatabaseConnection, DbBackend, DbErr, FromQueryResult, SqlErr,
    Statement,
};
use std::time::Duration;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::models::UserRecord;
use crate::repository::UserStore;

/// PostgreSQL implementation of UserStore using SeaORM.
///
/// Relies on the unique index on `users.email` created by the `migration`
/// crate; a conflicting insert is reported as [`StoreError::Conflict`].
#[derive(Clone)]
pub struct PostgresUserStore {
    db: DatabaseConnection,
}

/// Row shape for the columns this store reads
#[derive(Debug, FromQueryResult)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        UserRecord {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
        }
    }
}

impl PostgresUserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Open a connection pool sized by `config`
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        let mut options = ConnectOptions::new(config.url.clone());
        options
            .max_connections(config.max_connections)
            .connect_timeout(Duration::from_secs(8))
            .acquire_timeout(Duration::from_secs(8))
            .sqlx_logging(false);

        let db = Database::connect(options).await.map_err(backend_error)?;

        tracing::info!(max_connections = config.max_connections, "Connected user store to PostgreSQL");
        Ok(Self::new(db))
    }
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn find(&self, email: &str) -> StoreResult<Vec<UserRecord>> {
        let sql = "SELECT id, email, password_hash FROM users WHERE email = $1";

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [email.into()]);

        let rows = UserRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(backend_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, email: &str, password_hash: &str) -> StoreResult<UserRecord> {
        let sql = r#"
            INSERT INTO users (id, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash
        "#;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [Uuid::now_v7().into(), email.into(), password_hash.into()],
        );

        let row = UserRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    StoreError::Conflict(email.to_string())
                } else {
                    backend_error(e)
                }
            })?
            .ok_or_else(|| StoreError::Backend("insert returned no row".to_string()))?;

        tracing::info!(user_id = %row.id, "Created user");
        Ok(row.into())
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

fn backend_error(err: DbErr) -> StoreError {
    StoreError::Backend(format!("Database error: {err}"))
}
