//! Helpers for integration tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::TempDir;

use frostline_catalog::db::{DbPool, establish_connection_pool};
use frostline_catalog::domain::category::{Category, NewCategory};
use frostline_catalog::domain::translation::{Language, Translation};
use frostline_catalog::repository::{CategoryWriter, DieselRepository};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// SQLite database living in its own temporary directory.
pub struct TestDb {
    path: PathBuf,
    pool: DbPool,
    // Removes the database together with its -wal/-shm files.
    _dir: TempDir,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir.");
        let path = dir.path().join(filename);
        let url = path.to_str().expect("utf-8 temp path").to_string();

        let pool = establish_connection_pool(&url).expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");

        TestDb {
            path,
            pool,
            _dir: dir,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

pub fn uk(name: &str) -> Vec<Translation> {
    vec![Translation::new(Language::Uk, name)]
}

/// Insert a category with a single Ukrainian name.
pub fn category(repo: &DieselRepository, name: &str, parent_id: Option<i32>) -> Category {
    let mut new_category = NewCategory::new(frostline_catalog::slug::slugify(name), uk(name));
    if let Some(parent_id) = parent_id {
        new_category = new_category.with_parent_id(parent_id);
    }
    repo.create_category(&new_category)
        .expect("create category")
}
