use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio_util::sync::CancellationToken;

use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::{MenuRepository, OrderRepository, SalesRepository};
use crate::orders::FeedService;
use crate::utils::AppError;

/// Server state — shared handles for every service
///
/// Cloning is shallow; all fields are cheap reference copies.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
    /// Live status feed service
    pub feeds: Arc<FeedService>,
    /// Cancellation for background tasks, fired on shutdown
    pub shutdown: CancellationToken,
}

impl ServerState {
    /// Initialize the server state: open the database, seed the menu if
    /// configured, and start the live feed watcher.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        std::fs::create_dir_all(config.database_dir()).map_err(|e| {
            AppError::internal(format!("Failed to create work directory: {e}"))
        })?;

        let db_path = config.database_dir().join("comanda.db");
        let db_service = DbService::new(&db_path).await?;
        let db = db_service.db;

        let shutdown = CancellationToken::new();
        let feeds = FeedService::new(db.clone(), config.status_flow());
        feeds.spawn(shutdown.clone());

        let state = Self {
            config: config.clone(),
            db,
            feeds,
            shutdown,
        };

        if state.config.seed_menu {
            state
                .menu_repository()
                .seed_defaults()
                .await
                .map_err(AppError::from)?;
        }

        Ok(state)
    }

    pub fn menu_repository(&self) -> MenuRepository {
        MenuRepository::new(self.db.clone())
    }

    pub fn order_repository(&self) -> OrderRepository {
        OrderRepository::new(self.db.clone(), self.config.status_flow())
    }

    pub fn sales_repository(&self) -> SalesRepository {
        SalesRepository::new(self.db.clone())
    }
}
