//! Comanda Server - restaurant order management
//!
//! # Architecture
//!
//! - **Database** (`db`): embedded SurrealDB storage; repositories own the
//!   transactional order numbering and sales-counter folds
//! - **Orders** (`orders`): live status feeds over SurrealDB live queries
//! - **HTTP API** (`api`): axum routers per resource
//! - **Core** (`core`): configuration, shared state, server loop
//!
//! # Module structure
//!
//! ```text
//! comanda-server/src/
//! ├── core/          # config, state, server
//! ├── db/            # database layer and repositories
//! ├── orders/        # live status feeds
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # errors, logging
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod orders;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, Server, ServerState};
pub use crate::db::DbService;
pub use crate::db::repository::{MenuRepository, OrderRepository, RepoError, SalesRepository};
pub use crate::orders::FeedService;
pub use crate::utils::{AppError, AppResult};
pub use crate::utils::logger::{init_logger, init_logger_with_file};

/// Load .env and initialize logging from LOG_LEVEL / LOG_DIR.
pub fn setup_environment() {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}

pub fn print_banner() {
    println!(
        r#"
   ______                                __
  / ____/___  ____ ___  ____ _____  ____/ /___ _
 / /   / __ \/ __ `__ \/ __ `/ __ \/ __  / __ `/
/ /___/ /_/ / / / / / / /_/ / / / / /_/ / /_/ /
\____/\____/_/ /_/ /_/\__,_/_/ /_/\__,_/\__,_/
    "#
    );
}
