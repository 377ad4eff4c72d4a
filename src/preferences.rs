//! Stored preferences with defaults, validation and a read cache.
//!
//! Reads are tolerant: a missing row, an unreachable database or a stored
//! value that no longer resolves all come back as the built-in default, so
//! content commands keep working when the store does not. Writes are strict:
//! the value must resolve exactly (key or alias, no fuzzy matching) before it
//! is persisted.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::database::{self, PreferenceRepository};
use crate::error::{MinbarError, Result};
use crate::{aladhan, quran_com, tafsir, tafsir_app};

/// How long a cached read stays fresh. Preferences change rarely; five
/// minutes of staleness across processes is acceptable.
const CACHE_TTL: Duration = Duration::from_secs(300);

/// The four preference kinds, each backed by its own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKind {
    /// Guild-scoped Qur'an translation key
    Translation,
    /// Guild-scoped English tafsir key
    Tafsir,
    /// Guild-scoped Arabic tafsir key
    ArabicTafsir,
    /// User-scoped prayer-time calculation method id
    CalculationMethod,
}

impl PreferenceKind {
    pub fn table(self) -> &'static str {
        match self {
            Self::Translation => database::GUILD_TRANSLATIONS,
            Self::Tafsir => database::GUILD_TAFSIRS,
            Self::ArabicTafsir => database::GUILD_ARABIC_TAFSIRS,
            Self::CalculationMethod => database::USER_CALCULATION_METHODS,
        }
    }

    /// Value used when no row exists or the store is unreachable.
    pub fn default_value(self) -> &'static str {
        match self {
            Self::Translation => "haleem",
            Self::Tafsir => "maarifulquran",
            Self::ArabicTafsir => "tabari",
            Self::CalculationMethod => "4",
        }
    }

    /// Resolve user input to the canonical stored form. Exact keys and
    /// aliases only; fuzzy matching would let typos become persistent state.
    ///
    /// # Errors
    ///
    /// The kind's `Invalid*` error when the input does not resolve.
    fn canonicalize(self, input: &str) -> Result<String> {
        match self {
            Self::Translation => quran_com::translation_table()
                .resolve_exact(input)?
                .map(|hit| hit.key.to_string())
                .ok_or_else(|| MinbarError::InvalidTranslation(input.to_string())),
            Self::Tafsir => tafsir::tafsir_table()
                .resolve_exact(input)?
                .map(|hit| hit.key.to_string())
                .ok_or_else(|| MinbarError::InvalidTafsir(input.to_string())),
            Self::ArabicTafsir => tafsir_app::arabic_tafsir_table()
                .resolve_exact(input)?
                .map(|hit| hit.key.to_string())
                .ok_or_else(|| MinbarError::InvalidTafsir(input.to_string())),
            Self::CalculationMethod => {
                aladhan::validate_method(input).map(|id| id.to_string())
            }
        }
    }

    /// Whether a stored value still resolves. Keys can go stale when a source
    /// is retired from the static tables.
    fn is_valid(self, stored: &str) -> bool {
        match self {
            Self::Translation => quran_com::translation_table().get(stored).is_some(),
            Self::Tafsir => tafsir::tafsir_table().get(stored).is_some(),
            Self::ArabicTafsir => tafsir_app::arabic_tafsir_table().get(stored).is_some(),
            Self::CalculationMethod => aladhan::validate_method(stored).is_ok(),
        }
    }
}

/// A failed write means the store, not the user; surface it as the backing
/// store being down rather than a generic database fault.
fn store_unavailable(err: MinbarError) -> MinbarError {
    match err {
        MinbarError::Database(msg) => MinbarError::UpstreamUnavailable(msg),
        other => other,
    }
}

struct CacheEntry {
    value: String,
    stored_at: Instant,
}

/// Preference reads and writes over the repository, with a per-process cache.
pub struct PreferenceStore {
    repo: PreferenceRepository,
    cache: Mutex<HashMap<(PreferenceKind, u64), CacheEntry>>,
    fallback_reads: AtomicU64,
}

impl PreferenceStore {
    pub fn new(repo: PreferenceRepository) -> Self {
        Self {
            repo,
            cache: Mutex::new(HashMap::new()),
            fallback_reads: AtomicU64::new(0),
        }
    }

    /// Get the effective value for a subject. `None` (a DM, for guild-scoped
    /// kinds) short-circuits to the default without touching the store.
    ///
    /// Never fails: database and validity problems degrade to the default.
    pub async fn get(&self, kind: PreferenceKind, subject: Option<u64>) -> String {
        let Some(subject) = subject else {
            return kind.default_value().to_string();
        };

        if let Some(value) = self.cached(kind, subject) {
            return value;
        }

        let stored = match self.repo.get(kind.table(), subject).await {
            Ok(stored) => stored,
            Err(err) => {
                self.fallback_reads.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(?kind, subject, %err, "preference read failed, using default");
                return kind.default_value().to_string();
            }
        };

        let value = match stored {
            Some(stored) if kind.is_valid(&stored) => stored,
            Some(stored) => {
                // Stale key from a retired source: drop the row so the
                // subject is back on the default for good.
                tracing::warn!(?kind, subject, value = %stored, "stored preference no longer resolves, clearing");
                if let Err(err) = self.repo.delete(kind.table(), subject).await {
                    tracing::warn!(?kind, subject, %err, "failed to clear stale preference");
                }
                kind.default_value().to_string()
            }
            None => kind.default_value().to_string(),
        };

        self.remember(kind, subject, value.clone());
        value
    }

    /// Validate and persist a preference. Returns the canonical stored form.
    ///
    /// # Errors
    ///
    /// The kind's `Invalid*` error when the input does not resolve, or a
    /// database error when the store rejects the write. Unlike reads, a
    /// failed write must surface: the user asked for a state change.
    pub async fn set(&self, kind: PreferenceKind, subject: u64, input: &str) -> Result<String> {
        let canonical = kind.canonicalize(input)?;
        self.repo
            .set(kind.table(), subject, canonical.clone())
            .await
            .map_err(store_unavailable)?;
        self.remember(kind, subject, canonical.clone());
        Ok(canonical)
    }

    /// Remove a subject's stored preference, restoring the default. Clearing
    /// an absent preference succeeds.
    ///
    /// # Errors
    ///
    /// Database errors only.
    pub async fn clear(&self, kind: PreferenceKind, subject: u64) -> Result<()> {
        self.repo
            .delete(kind.table(), subject)
            .await
            .map_err(store_unavailable)?;
        if let Ok(mut cache) = self.cache.lock() {
            cache.remove(&(kind, subject));
        }
        Ok(())
    }

    /// How many reads have degraded to the default because the store was
    /// unreachable. Exposed for logging on shutdown.
    pub fn fallback_read_count(&self) -> u64 {
        self.fallback_reads.load(Ordering::Relaxed)
    }

    fn cached(&self, kind: PreferenceKind, subject: u64) -> Option<String> {
        let cache = self.cache.lock().ok()?;
        let entry = cache.get(&(kind, subject))?;
        if entry.stored_at.elapsed() < CACHE_TTL {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    fn remember(&self, kind: PreferenceKind, subject: u64, value: String) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(
                (kind, subject),
                CacheEntry {
                    value,
                    stored_at: Instant::now(),
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::init_db;
    use tempfile::TempDir;

    async fn setup_store() -> (TempDir, PreferenceStore) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_path_str = db_path.to_str().expect("Invalid path").to_string();

        init_db(&db_path_str).await.expect("Failed to initialize database");

        let store = PreferenceStore::new(PreferenceRepository::new(db_path_str));
        (temp_dir, store)
    }

    #[tokio::test]
    async fn test_default_when_no_row() {
        let (_temp_dir, store) = setup_store().await;

        assert_eq!(
            store.get(PreferenceKind::Translation, Some(1)).await,
            "haleem"
        );
        assert_eq!(
            store.get(PreferenceKind::Tafsir, Some(1)).await,
            "maarifulquran"
        );
        assert_eq!(
            store.get(PreferenceKind::ArabicTafsir, Some(1)).await,
            "tabari"
        );
        assert_eq!(
            store.get(PreferenceKind::CalculationMethod, Some(1)).await,
            "4"
        );
    }

    #[tokio::test]
    async fn test_no_subject_is_default_without_store() {
        let (_temp_dir, store) = setup_store().await;
        assert_eq!(store.get(PreferenceKind::Translation, None).await, "haleem");
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let (_temp_dir, store) = setup_store().await;

        let stored = store
            .set(PreferenceKind::Translation, 42, "khattab")
            .await
            .unwrap();
        assert_eq!(stored, "khattab");
        assert_eq!(
            store.get(PreferenceKind::Translation, Some(42)).await,
            "khattab"
        );
    }

    #[tokio::test]
    async fn test_set_canonicalizes_aliases_and_case() {
        let (_temp_dir, store) = setup_store().await;

        let stored = store
            .set(PreferenceKind::Tafsir, 42, " SAADI ")
            .await
            .unwrap();
        assert_eq!(stored, "saddi");
        assert_eq!(store.get(PreferenceKind::Tafsir, Some(42)).await, "saddi");
    }

    #[tokio::test]
    async fn test_set_rejects_unknown_values() {
        let (_temp_dir, store) = setup_store().await;

        assert!(matches!(
            store.set(PreferenceKind::Translation, 42, "klingon").await,
            Err(MinbarError::InvalidTranslation(_))
        ));
        assert!(matches!(
            store.set(PreferenceKind::Tafsir, 42, "klingon").await,
            Err(MinbarError::InvalidTafsir(_))
        ));
        assert!(matches!(
            store.set(PreferenceKind::CalculationMethod, 42, "99").await,
            Err(MinbarError::InvalidCalculationMethod(_))
        ));

        // A rejected write must leave the default intact
        assert_eq!(
            store.get(PreferenceKind::Translation, Some(42)).await,
            "haleem"
        );
    }

    #[tokio::test]
    async fn test_set_does_not_fuzzy_match() {
        let (_temp_dir, store) = setup_store().await;

        // "khatab" fuzzy-resolves in lookups, but persisting it would store a
        // guess
        assert!(matches!(
            store.set(PreferenceKind::Translation, 42, "khatab").await,
            Err(MinbarError::InvalidTranslation(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_store_reads_default_writes_error() {
        // A directory is not a usable database file
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let dir_path = temp_dir.path().to_str().expect("Invalid path").to_string();
        let store = PreferenceStore::new(PreferenceRepository::new(dir_path));

        assert_eq!(
            store.get(PreferenceKind::Translation, Some(1)).await,
            "haleem"
        );
        assert_eq!(store.fallback_read_count(), 1);

        assert!(matches!(
            store.set(PreferenceKind::Translation, 1, "khattab").await,
            Err(MinbarError::UpstreamUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_stale_value_self_heals() {
        let (_temp_dir, store) = setup_store().await;

        // Plant a key that no longer exists in the translation table
        store
            .repo
            .set(database::GUILD_TRANSLATIONS, 7, "retiredkey".to_string())
            .await
            .unwrap();

        assert_eq!(
            store.get(PreferenceKind::Translation, Some(7)).await,
            "haleem"
        );

        // The row is gone, not just masked
        let row = store.repo.get(database::GUILD_TRANSLATIONS, 7).await.unwrap();
        assert!(row.is_none());
    }

    #[tokio::test]
    async fn test_cache_serves_reads_after_row_removal() {
        let (_temp_dir, store) = setup_store().await;

        store
            .set(PreferenceKind::Translation, 42, "sahih")
            .await
            .unwrap();
        store
            .repo
            .delete(database::GUILD_TRANSLATIONS, 42)
            .await
            .unwrap();

        // Still fresh in cache
        assert_eq!(
            store.get(PreferenceKind::Translation, Some(42)).await,
            "sahih"
        );
    }

    #[tokio::test]
    async fn test_clear_restores_default() {
        let (_temp_dir, store) = setup_store().await;

        store
            .set(PreferenceKind::CalculationMethod, 9, "2")
            .await
            .unwrap();
        store
            .clear(PreferenceKind::CalculationMethod, 9)
            .await
            .unwrap();

        assert_eq!(
            store.get(PreferenceKind::CalculationMethod, Some(9)).await,
            "4"
        );

        // Clearing again is fine
        assert!(store
            .clear(PreferenceKind::CalculationMethod, 9)
            .await
            .is_ok());
    }
}
