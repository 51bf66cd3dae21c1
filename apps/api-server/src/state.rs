//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::PostService;
use quill_core::ports::PostRepository;
use quill_infra::InMemoryPostRepository;

#[cfg(feature = "postgres")]
use quill_infra::{DatabaseConfig, DatabaseConnections, PostgresPostRepository};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    #[cfg(feature = "postgres")]
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        let (db, repo): (Option<Arc<DatabaseConnections>>, Arc<dyn PostRepository>) = {
            if let Some(db_config) = &config.database {
                match connect(db_config, config.auto_migrate).await {
                    Ok(connections) => {
                        let conn = Arc::new(connections);
                        let repo = Arc::new(PostgresPostRepository::new(conn.main.clone()));
                        (Some(conn), repo)
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        (None, Arc::new(InMemoryPostRepository::new()))
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                (None, Arc::new(InMemoryPostRepository::new()))
            }
        };

        #[cfg(not(feature = "postgres"))]
        let repo: Arc<dyn PostRepository> = {
            if config.database.is_some() {
                tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
            }
            tracing::info!("Running without postgres feature - using in-memory repository");
            Arc::new(InMemoryPostRepository::new())
        };

        tracing::info!("Application state initialized");

        Self {
            posts: PostService::new(repo),
            #[cfg(feature = "postgres")]
            db,
        }
    }

    /// State backed by an arbitrary repository and no database handle.
    pub fn with_repository(repo: Arc<dyn PostRepository>) -> Self {
        Self {
            posts: PostService::new(repo),
            #[cfg(feature = "postgres")]
            db: None,
        }
    }

    /// Report which store backs the API and whether it answers.
    #[cfg(feature = "postgres")]
    pub async fn storage_status(&self) -> &'static str {
        match &self.db {
            Some(db) if db.main.ping().await.is_ok() => "up",
            Some(_) => "down",
            None => "in-memory",
        }
    }

    #[cfg(not(feature = "postgres"))]
    pub async fn storage_status(&self) -> &'static str {
        "in-memory"
    }
}

#[cfg(feature = "postgres")]
async fn connect(
    config: &DatabaseConfig,
    auto_migrate: bool,
) -> Result<DatabaseConnections, migration::DbErr> {
    use migration::{Migrator, MigratorTrait};

    let connections = DatabaseConnections::init(config).await?;
    if auto_migrate {
        Migrator::up(&connections.main, None).await?;
        tracing::info!("Database migrations applied");
    }
    Ok(connections)
}
