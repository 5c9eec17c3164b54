//! Shared fixtures for the integration suite.

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use storefront_catalog::db::{DbPool, establish_connection_pool};
use storefront_catalog::repository::DieselRepository;
use tempfile::NamedTempFile;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// A migrated SQLite catalog backed by a temp file.
///
/// Keep the fixture alive for the duration of the test; dropping it removes
/// the database file out from under the pool.
pub struct TestCatalog {
    _db_file: NamedTempFile,
    pool: DbPool,
}

impl TestCatalog {
    pub fn new() -> Self {
        let db_file = NamedTempFile::new().expect("temp database file");
        let url = db_file.path().to_str().expect("utf-8 temp path");
        let pool = establish_connection_pool(url).expect("connection pool");
        let mut conn = pool.get().expect("pooled connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("catalog migrations");
        TestCatalog {
            _db_file: db_file,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    /// A repository over this catalog's pool.
    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool.clone())
    }
}
