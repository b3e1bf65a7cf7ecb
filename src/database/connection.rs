use std::sync::Arc;
use std::time::Duration;

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tokio::sync::OnceCell;

use crate::config::DatabaseConfig;
use crate::error::AppResult;

pub type DbConn = DatabaseConnection;

pub async fn create_connection(config: &DatabaseConfig) -> AppResult<DbConn> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    let conn = Database::connect(options).await?;
    log::info!("Connected to database");
    Ok(conn)
}

pub async fn run_migrations(conn: &DbConn) -> AppResult<()> {
    Migrator::up(conn, None).await?;
    log::info!("Database migrations applied");
    Ok(())
}

/// Shared connection established on first use.
///
/// Concurrent first callers wait on the same initialization, so exactly one
/// connect happens. A failed connect leaves the cell empty and the next
/// caller retries.
#[derive(Clone)]
pub struct LazyConnection {
    cell: Arc<OnceCell<DbConn>>,
    config: DatabaseConfig,
}

impl LazyConnection {
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            cell: Arc::new(OnceCell::new()),
            config,
        }
    }

    /// Wraps an already-open connection
    pub fn from_connection(conn: DbConn, config: DatabaseConfig) -> Self {
        Self {
            cell: Arc::new(OnceCell::new_with(Some(conn))),
            config,
        }
    }

    pub async fn conn(&self) -> AppResult<&DbConn> {
        self.cell
            .get_or_try_init(|| async {
                let conn = create_connection(&self.config).await?;
                if self.config.run_migrations {
                    run_migrations(&conn).await?;
                }
                Ok(conn)
            })
            .await
    }

    pub fn is_connected(&self) -> bool {
        self.cell.initialized()
    }
}
