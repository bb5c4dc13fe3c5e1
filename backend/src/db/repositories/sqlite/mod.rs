//! SQLite repository implementation using Diesel.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Parameterized statements built with the Diesel query builder
//! - Table bootstrap on startup (`CREATE TABLE IF NOT EXISTS`)
//! - Query statistics for health reporting
//!
//! Failures are reported once and never retried.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::sql_query;
use diesel::sqlite::{Sqlite, SqliteConnection};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task;

use crate::api::{NewPet, Pet, PetId, QueryCondition};
use crate::db::config::DatabaseConfig;
use crate::db::repository::{ErrorContext, PetStoreRepository, RepositoryError, RepositoryResult};

mod models;
mod schema;

use models::*;
use schema::*;

type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

const CREATE_PETS_TABLE: &str = "CREATE TABLE IF NOT EXISTS pets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    tag TEXT
)";

const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Per-connection setup applied when the pool opens a connection.
///
/// Every new connection gets the busy timeout and the `pets` table, so an
/// in-memory database is usable from whichever connection serves a request.
#[derive(Debug, Clone, Copy)]
struct ConnectionOptions {
    busy_timeout_ms: u32,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        sql_query(format!("PRAGMA busy_timeout = {}", self.busy_timeout_ms))
            .execute(conn)
            .map_err(diesel::r2d2::Error::QueryError)?;
        sql_query(CREATE_PETS_TABLE)
            .execute(conn)
            .map_err(diesel::r2d2::Error::QueryError)?;
        Ok(())
    }
}

/// Pool health statistics.
#[derive(Debug, Clone, Default)]
pub struct PoolStats {
    /// Number of connections currently in use
    pub connections_in_use: u32,
    /// Number of idle connections
    pub idle_connections: u32,
    /// Maximum pool size
    pub max_size: u32,
    /// Total statements executed
    pub total_queries: u64,
    /// Total failed statements
    pub failed_queries: u64,
}

/// Diesel-backed repository for SQLite.
#[derive(Clone, Debug)]
pub struct SqliteRepository {
    pool: SqlitePool,
    config: DatabaseConfig,
    total_queries: Arc<AtomicU64>,
    failed_queries: Arc<AtomicU64>,
}

impl SqliteRepository {
    /// Open the database, build the pool and make sure the `pets` table exists.
    ///
    /// An in-memory data source (`:memory:`, `file::memory:`, `mode=memory`) is
    /// served by a single connection that is never recycled, since every
    /// SQLite connection to such a source may open its own private database.
    pub fn new(config: DatabaseConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<SqliteConnection>::new(&config.data_source);

        let builder = Pool::builder()
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .connection_customizer(Box::new(ConnectionOptions {
                busy_timeout_ms: BUSY_TIMEOUT_MS,
            }))
            .test_on_check_out(true);

        let builder = if config.is_in_memory() {
            builder
                .max_size(1)
                .min_idle(Some(1))
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            builder.max_size(config.max_pool_size)
        };

        let pool = builder.build(manager).map_err(|e| {
            RepositoryError::connection_with_context(
                e.to_string(),
                ErrorContext::new("create_pool")
                    .with_details(format!("data_source={}", config.data_source)),
            )
        })?;

        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection_for_bootstrap"),
                )
            })?;
            Self::create_table(&mut conn)?;
        }

        log::info!(
            "SQLite repository ready (data_source={}, max_pool_size={})",
            config.data_source,
            pool.max_size()
        );

        Ok(Self {
            pool,
            config,
            total_queries: Arc::new(AtomicU64::new(0)),
            failed_queries: Arc::new(AtomicU64::new(0)),
        })
    }

    fn create_table(conn: &mut SqliteConnection) -> RepositoryResult<()> {
        sql_query(CREATE_PETS_TABLE).execute(conn).map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Table bootstrap failed: {}", e),
                ErrorContext::new("create_table").with_entity("pet"),
            )
        })?;
        Ok(())
    }

    /// Run a blocking Diesel operation on a pooled connection.
    async fn with_conn<T, F>(&self, operation: &'static str, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> RepositoryResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        let total_queries = self.total_queries.clone();
        let failed_queries = self.failed_queries.clone();

        task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| {
                failed_queries.fetch_add(1, Ordering::Relaxed);
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new(operation).with_details("get_connection"),
                )
            })?;

            total_queries.fetch_add(1, Ordering::Relaxed);
            f(&mut conn).map_err(|e| {
                failed_queries.fetch_add(1, Ordering::Relaxed);
                e.with_operation(operation)
            })
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }

    /// Get pool health statistics.
    pub fn get_pool_stats(&self) -> PoolStats {
        let state = self.pool.state();
        PoolStats {
            connections_in_use: state.connections - state.idle_connections,
            idle_connections: state.idle_connections,
            max_size: self.pool.max_size(),
            total_queries: self.total_queries.load(Ordering::Relaxed),
            failed_queries: self.failed_queries.load(Ordering::Relaxed),
        }
    }

    /// The configuration this repository was opened with.
    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }
}

/// Build the list statement for a condition.
///
/// Produces `SELECT id, name, tag FROM pets [WHERE tag IN (?, ...)] LIMIT ?`
/// with every user-supplied value bound as a parameter. An absent or empty tag
/// set omits the `WHERE` clause.
pub(crate) fn pets_query(condition: &QueryCondition) -> pets::BoxedQuery<'static, Sqlite> {
    let mut query: pets::BoxedQuery<'static, Sqlite> = pets::table.into_boxed();
    if let Some(tags) = condition.tag_filter() {
        query = query.filter(pets::tag.eq_any(tags.to_vec()));
    }
    query.limit(condition.limit())
}

fn map_diesel_error(err: diesel::result::Error) -> RepositoryError {
    RepositoryError::from(err)
}

#[async_trait]
impl PetStoreRepository for SqliteRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn("health_check", |conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn query_pets(&self, condition: &QueryCondition) -> RepositoryResult<Vec<Pet>> {
        let query = pets_query(condition);
        log::debug!("query_pets: {}", diesel::debug_query::<Sqlite, _>(&query));

        self.with_conn("query_pets", move |conn| {
            let rows = query.load::<PetRow>(conn).map_err(map_diesel_error)?;
            Ok(rows.into_iter().map(Pet::from).collect())
        })
        .await
    }

    async fn query_pet(&self, id: PetId) -> RepositoryResult<Option<Pet>> {
        self.with_conn("query_pet", move |conn| {
            let row = pets::table
                .filter(pets::id.eq(id.value()))
                .select(PetRow::as_select())
                .first::<PetRow>(conn)
                .optional()
                .map_err(map_diesel_error)?;
            Ok(row.map(Pet::from))
        })
        .await
    }

    async fn create_pet(&self, pet: &NewPet) -> RepositoryResult<Pet> {
        let pet = pet.clone();
        self.with_conn("create_pet", move |conn| {
            let inserted: PetRow = diesel::insert_into(pets::table)
                .values(NewPetRow::from(&pet))
                .returning(PetRow::as_returning())
                .get_result(conn)
                .map_err(map_diesel_error)?;
            log::debug!("Inserted pet id={}", inserted.id);
            Ok(Pet::from(inserted))
        })
        .await
    }

    async fn delete_pet(&self, id: PetId) -> RepositoryResult<usize> {
        self.with_conn("delete_pet", move |conn| {
            let deleted = diesel::delete(pets::table.filter(pets::id.eq(id.value())))
                .execute(conn)
                .map_err(map_diesel_error)?;
            log::debug!("delete_pet id={} affected={}", id, deleted);
            Ok(deleted)
        })
        .await
    }
}
