//! Database Module
//!
//! Embedded SurrealDB (RocksDB backend) storage. Multi-statement queries
//! run as a single transaction, which is what the repository layer relies
//! on for order numbering and sales-counter folds.

pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "comanda";
const DATABASE: &str = "comanda";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone, Debug)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the database at `path` and apply schema definitions.
    pub async fn new(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(path.as_ref())
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        define_schema(&db).await?;

        tracing::info!("Database connection established (SurrealDB RocksDB)");

        Ok(Self { db })
    }
}

/// Idempotent table and index definitions.
async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(
        r#"
        DEFINE TABLE IF NOT EXISTS order SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS order_number ON order FIELDS number;
        DEFINE INDEX IF NOT EXISTS order_status ON order FIELDS status;
        DEFINE INDEX IF NOT EXISTS order_created_at ON order FIELDS created_at;

        DEFINE TABLE IF NOT EXISTS menu_item SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS sales_counter SCHEMALESS;
        DEFINE TABLE IF NOT EXISTS counters SCHEMALESS;
    "#,
    )
    .await
    .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?
    .check()
    .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;

    Ok(())
}
