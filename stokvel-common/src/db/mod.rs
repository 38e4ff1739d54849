use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use std::fmt;
use std::time::Duration;

pub mod group;
pub mod meeting;
pub mod user;

pub type DbThreadPool = diesel::r2d2::Pool<ConnectionManager<PgConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<PgConnection>>;

pub fn create_db_thread_pool(
    database_uri: &str,
    max_db_connections: u32,
    idle_timeout: Duration,
) -> DbThreadPool {
    r2d2::Pool::builder()
        .max_size(max_db_connections)
        .idle_timeout(Some(idle_timeout))
        .build(ConnectionManager::<PgConnection>::new(database_uri))
        .expect("Failed to create DB thread pool")
}

#[derive(Debug)]
pub enum DaoError {
    DbThreadPoolFailure(r2d2::Error),
    QueryFailure(diesel::result::Error),
}

impl std::error::Error for DaoError {}

impl fmt::Display for DaoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DaoError::DbThreadPoolFailure(e) => {
                write!(f, "DaoError: Failed to obtain DB connection: {e}")
            }
            DaoError::QueryFailure(e) => {
                write!(f, "DaoError: Query failed: {e}")
            }
        }
    }
}

impl From<r2d2::Error> for DaoError {
    fn from(error: r2d2::Error) -> Self {
        DaoError::DbThreadPoolFailure(error)
    }
}

impl From<diesel::result::Error> for DaoError {
    fn from(error: diesel::result::Error) -> Self {
        DaoError::QueryFailure(error)
    }
}

#[cfg(test)]
pub mod test_utils {
    use once_cell::sync::Lazy;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use super::{create_db_thread_pool, DbConnection, DbThreadPool};
    use crate::db::user;

    const DB_URI_VAR: &str = "STOKVEL_TEST_DB_URI";
    const DB_MAX_CONNECTIONS_VAR: &str = "STOKVEL_TEST_DB_MAX_CONNECTIONS";

    static DB_THREAD_POOL: Lazy<DbThreadPool> = Lazy::new(|| {
        let db_uri = std::env::var(DB_URI_VAR)
            .unwrap_or_else(|_| panic!("Environment variable {DB_URI_VAR} must be set"));

        let max_connections = std::env::var(DB_MAX_CONNECTIONS_VAR)
            .ok()
            .and_then(|val| val.parse().ok())
            .unwrap_or(48u32);

        create_db_thread_pool(&db_uri, max_connections, Duration::from_secs(30))
    });

    static USER_NUMBER: AtomicU32 = AtomicU32::new(0);

    pub fn db_thread_pool() -> &'static DbThreadPool {
        &DB_THREAD_POOL
    }

    pub fn db_connection() -> DbConnection {
        DB_THREAD_POOL
            .get()
            .expect("Failed to obtain pooled DB connection for tests")
    }

    pub fn unique_tag() -> String {
        let sequence_number = USER_NUMBER.fetch_add(1, Ordering::SeqCst);
        format!("{}-{sequence_number}", std::process::id())
    }

    pub fn unique_email() -> String {
        format!("db-test-{}@stokvel.test", unique_tag())
    }

    pub fn create_test_user(user_dao: &user::Dao) -> i32 {
        user_dao
            .create_user(
                "Test",
                "User",
                &unique_email(),
                "0820000000",
                None,
                "English",
            )
            .expect("Failed to create test user")
    }
}
