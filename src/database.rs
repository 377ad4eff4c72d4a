//! Database operations and data access layer.
//!
//! Preferences live in four two-column tables, one per preference kind, each
//! mapping a subject id (guild or user) to a stored value. The repository
//! opens a connection per operation on a blocking task.

use crate::error::{MinbarError, Result};
use rusqlite::Connection;
use std::path::Path;

pub const GUILD_TRANSLATIONS: &str = "guild_translations";
pub const GUILD_TAFSIRS: &str = "guild_tafsirs";
pub const GUILD_ARABIC_TAFSIRS: &str = "guild_arabic_tafsirs";
pub const USER_CALCULATION_METHODS: &str = "user_calculation_methods";

const PREFERENCE_TABLES: [&str; 4] = [
    GUILD_TRANSLATIONS,
    GUILD_TAFSIRS,
    GUILD_ARABIC_TAFSIRS,
    USER_CALCULATION_METHODS,
];

/// Initialize the database schema.
///
/// Creates the preference tables if they don't already exist, along with the
/// parent directory of the database file.
///
/// # Errors
///
/// Returns an error if the database cannot be created or initialized.
pub async fn init_db(path: &str) -> Result<()> {
    let path = path.to_string();
    tokio::task::spawn_blocking(move || init_db_sync(&path))
        .await
        .map_err(|e| MinbarError::Database(format!("Task join error: {}", e)))??;
    Ok(())
}

fn init_db_sync(path: &str) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    let conn = Connection::open(path)?;

    for table in PREFERENCE_TABLES {
        conn.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS {} (
                    subject_id INTEGER NOT NULL PRIMARY KEY,
                    value TEXT NOT NULL
                )",
                table
            ),
            [],
        )?;
    }

    Ok(())
}

/// Repository for preference rows.
///
/// Callers name the table with one of the constants above; the schema is the
/// same for all four.
#[derive(Debug, Clone)]
pub struct PreferenceRepository {
    db_path: String,
}

impl PreferenceRepository {
    pub fn new(db_path: String) -> Self {
        Self { db_path }
    }

    /// Get the stored value for a subject.
    ///
    /// # Returns
    ///
    /// Returns `Some(value)` if a row exists, `None` otherwise.
    pub async fn get(&self, table: &'static str, subject_id: u64) -> Result<Option<String>> {
        let db_path = self.db_path.clone();
        tokio::task::spawn_blocking(move || {
            let conn = Connection::open(&db_path)?;
            let mut stmt = conn.prepare(&format!(
                "SELECT value FROM {} WHERE subject_id = ?1",
                table
            ))?;

            let mut rows = stmt.query(rusqlite::params![subject_id as i64])?;

            if let Some(row) = rows.next()? {
                Ok(Some(row.get(0)?))
            } else {
                Ok(None)
            }
        })
        .await
        .map_err(|e| MinbarError::Database(format!("Task join error: {}", e)))?
    }

    /// Insert or update the value for a subject.
    pub async fn set(&self, table: &'static str, subject_id: u64, value: String) -> Result<()> {
        let db_path = self.db_path.clone();
        tokio::task::spawn_blocking(move || {
            let conn = Connection::open(&db_path)?;
            conn.execute(
                &format!(
                    "INSERT INTO {} (subject_id, value)
                     VALUES (?1, ?2)
                     ON CONFLICT(subject_id) DO UPDATE SET value = ?2",
                    table
                ),
                rusqlite::params![subject_id as i64, value],
            )?;
            Ok::<_, MinbarError>(())
        })
        .await
        .map_err(|e| MinbarError::Database(format!("Task join error: {}", e)))??;
        Ok(())
    }

    /// Delete the row for a subject. Deleting a missing row is not an error.
    pub async fn delete(&self, table: &'static str, subject_id: u64) -> Result<()> {
        let db_path = self.db_path.clone();
        tokio::task::spawn_blocking(move || {
            let conn = Connection::open(&db_path)?;
            conn.execute(
                &format!("DELETE FROM {} WHERE subject_id = ?1", table),
                rusqlite::params![subject_id as i64],
            )?;
            Ok::<_, MinbarError>(())
        })
        .await
        .map_err(|e| MinbarError::Database(format!("Task join error: {}", e)))??;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Helper function to create a test database in a temporary directory
    async fn setup_test_db() -> (TempDir, PreferenceRepository) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_path_str = db_path.to_str().expect("Invalid path").to_string();

        init_db(&db_path_str).await.expect("Failed to initialize database");

        let repo = PreferenceRepository::new(db_path_str);
        (temp_dir, repo)
    }

    #[tokio::test]
    async fn test_get_missing_row() {
        let (_temp_dir, repo) = setup_test_db().await;

        let value = repo.get(GUILD_TRANSLATIONS, 1).await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let (_temp_dir, repo) = setup_test_db().await;

        repo.set(GUILD_TRANSLATIONS, 42, "khattab".to_string())
            .await
            .unwrap();

        let value = repo.get(GUILD_TRANSLATIONS, 42).await.unwrap();
        assert_eq!(value.as_deref(), Some("khattab"));
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let (_temp_dir, repo) = setup_test_db().await;

        repo.set(GUILD_TAFSIRS, 42, "maarifulquran".to_string())
            .await
            .unwrap();
        repo.set(GUILD_TAFSIRS, 42, "ibnkathir".to_string())
            .await
            .unwrap();

        let value = repo.get(GUILD_TAFSIRS, 42).await.unwrap();
        assert_eq!(value.as_deref(), Some("ibnkathir"));
    }

    #[tokio::test]
    async fn test_tables_are_independent() {
        let (_temp_dir, repo) = setup_test_db().await;

        repo.set(GUILD_TRANSLATIONS, 7, "haleem".to_string())
            .await
            .unwrap();

        assert!(repo.get(GUILD_TAFSIRS, 7).await.unwrap().is_none());
        assert!(repo.get(GUILD_ARABIC_TAFSIRS, 7).await.unwrap().is_none());
        assert!(repo
            .get(USER_CALCULATION_METHODS, 7)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let (_temp_dir, repo) = setup_test_db().await;

        repo.set(USER_CALCULATION_METHODS, 9, "2".to_string())
            .await
            .unwrap();
        repo.delete(USER_CALCULATION_METHODS, 9).await.unwrap();

        assert!(repo
            .get(USER_CALCULATION_METHODS, 9)
            .await
            .unwrap()
            .is_none());

        // Deleting a missing row should not error
        assert!(repo.delete(USER_CALCULATION_METHODS, 9).await.is_ok());
    }

    #[tokio::test]
    async fn test_large_discord_ids_round_trip() {
        let (_temp_dir, repo) = setup_test_db().await;

        // Discord snowflakes exceed i64::MAX in principle; the cast must be
        // reversible
        let id = u64::MAX - 3;
        repo.set(GUILD_TRANSLATIONS, id, "sahih".to_string())
            .await
            .unwrap();

        let value = repo.get(GUILD_TRANSLATIONS, id).await.unwrap();
        assert_eq!(value.as_deref(), Some("sahih"));
    }
}
