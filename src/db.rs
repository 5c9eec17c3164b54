//! Database pool types and lifecycle.
//!
//! The pool is established once at startup and injected into
//! [`DieselRepository`](crate::repository::DieselRepository); nothing in this
//! crate reaches for ambient global state.

use diesel::SqliteConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError, PooledConnection};

/// Connection pool shared across request handlers.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// A single connection checked out of [`DbPool`].
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Build an r2d2 pool for the given SQLite database URL.
pub fn establish_connection_pool(database_url: &str) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder().build(manager)
}
