//! Free-text name resolution against static tables.
//!
//! Translation keys, tafsir keys, surah names, hadith collections and dua
//! topics all resolve through the same routine: exact key match first, then
//! the alias table, then fuzzy matching over the table's keys. Lookups are
//! uniformly case-insensitive. Fuzzy matching is deliberately permissive:
//! the closest match is returned no matter how weak, because call sites like
//! free-text dua lookup rely on always getting some answer.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::error::{MinbarError, Result};

/// How a resolution was obtained. Callers can use this to tell the user the
/// corrected value when the input only matched fuzzily.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Alias,
    Fuzzy,
}

/// A successful resolution: the canonical key and its entry.
#[derive(Debug)]
pub struct Resolution<'a, T> {
    pub key: &'a str,
    pub entry: &'a T,
    pub matched: MatchKind,
}

/// A static key→entry table with an alias table.
#[derive(Debug, Clone, Copy)]
pub struct NameTable<'a, T> {
    /// What the table contains, used in error messages ("translation", "dua")
    what: &'static str,
    entries: &'a [(&'a str, T)],
    aliases: &'a [(&'a str, &'a str)],
}

impl<'a, T> NameTable<'a, T> {
    pub const fn new(
        what: &'static str,
        entries: &'a [(&'a str, T)],
        aliases: &'a [(&'a str, &'a str)],
    ) -> Self {
        Self {
            what,
            entries,
            aliases,
        }
    }

    /// Iterate over the canonical keys.
    pub fn keys(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }

    /// Look up an exact canonical key (case-insensitive).
    pub fn get(&self, key: &str) -> Option<&'a T> {
        let key = key.trim().to_lowercase();
        self.entries
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(&key))
            .map(|(_, entry)| entry)
    }

    /// Resolve input through exact and alias matching only.
    ///
    /// Returns `Ok(None)` when neither matches. A matching alias whose target
    /// is missing from the main table is a static-data bug and yields
    /// `BadAlias`; this must never happen for a table that passes
    /// `validate_aliases`.
    pub fn resolve_exact(&self, input: &str) -> Result<Option<Resolution<'a, T>>> {
        let normalized = input.trim().to_lowercase();

        if let Some((key, entry)) = self.find_key(&normalized) {
            return Ok(Some(Resolution {
                key,
                entry,
                matched: MatchKind::Exact,
            }));
        }

        if let Some((alias, target)) = self
            .aliases
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(&normalized))
        {
            return match self.find_key(&target.to_lowercase()) {
                Some((key, entry)) => Ok(Some(Resolution {
                    key,
                    entry,
                    matched: MatchKind::Alias,
                })),
                None => {
                    tracing::error!(
                        table = self.what,
                        alias,
                        target,
                        "alias points to a missing entry"
                    );
                    Err(MinbarError::BadAlias {
                        alias: (*alias).to_string(),
                        target: (*target).to_string(),
                    })
                }
            };
        }

        Ok(None)
    }

    /// Resolve input to an entry: exact match, then alias, then the fuzzy
    /// best match over the table's keys.
    ///
    /// # Errors
    ///
    /// `NotFound` if the table is empty, `BadAlias` on a dangling alias.
    pub fn resolve(&self, input: &str) -> Result<Resolution<'a, T>> {
        if let Some(hit) = self.resolve_exact(input)? {
            return Ok(hit);
        }

        let normalized = input.trim().to_lowercase();
        let matcher = SkimMatcherV2::default();
        self.entries
            .iter()
            .max_by_key(|(key, _)| {
                // Unmatchable keys score zero so a non-empty table always
                // produces a best candidate.
                matcher
                    .fuzzy_match(&key.to_lowercase(), &normalized)
                    .unwrap_or(0)
            })
            .map(|(key, entry)| Resolution {
                key,
                entry,
                matched: MatchKind::Fuzzy,
            })
            .ok_or_else(|| MinbarError::NotFound(self.what.to_string()))
    }

    /// Verify that every alias resolves to a key present in the main table.
    /// Run by tests for every static table; a dangling alias is a logic bug.
    pub fn validate_aliases(&self) -> Result<()> {
        for (alias, target) in self.aliases {
            if self.find_key(&target.to_lowercase()).is_none() {
                return Err(MinbarError::BadAlias {
                    alias: (*alias).to_string(),
                    target: (*target).to_string(),
                });
            }
        }
        Ok(())
    }

    fn find_key(&self, normalized: &str) -> Option<(&'a str, &'a T)> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(normalized))
            .map(|(key, entry)| (*key, entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &[(&str, u32)] = &[("khattab", 131), ("haleem", 85), ("sahih", 20)];
    const ALIASES: &[(&str, &str)] = &[("clearquran", "khattab")];
    const DANGLING: &[(&str, &str)] = &[("ghost", "missing")];

    fn table() -> NameTable<'static, u32> {
        NameTable::new("translation", TABLE, ALIASES)
    }

    #[test]
    fn test_exact_match() {
        let hit = table().resolve("khattab").unwrap();
        assert_eq!(*hit.entry, 131);
        assert_eq!(hit.matched, MatchKind::Exact);
    }

    #[test]
    fn test_exact_match_is_case_insensitive() {
        let hit = table().resolve("  KhAtTaB ").unwrap();
        assert_eq!(hit.key, "khattab");
        assert_eq!(hit.matched, MatchKind::Exact);
    }

    #[test]
    fn test_alias_match() {
        let hit = table().resolve("clearquran").unwrap();
        assert_eq!(hit.key, "khattab");
        assert_eq!(hit.matched, MatchKind::Alias);
    }

    #[test]
    fn test_fuzzy_match_one_character_off() {
        let hit = table().resolve("khatab").unwrap();
        assert_eq!(hit.key, "khattab");
        assert_eq!(hit.matched, MatchKind::Fuzzy);
    }

    #[test]
    fn test_fuzzy_always_answers_on_nonempty_table() {
        // No threshold: even a weak input resolves to something
        let hit = table().resolve("zzzz").unwrap();
        assert_eq!(hit.matched, MatchKind::Fuzzy);
    }

    #[test]
    fn test_empty_table_is_not_found() {
        let empty: NameTable<'_, u32> = NameTable::new("translation", &[], &[]);
        assert!(matches!(
            empty.resolve("anything"),
            Err(MinbarError::NotFound(_))
        ));
    }

    #[test]
    fn test_dangling_alias_is_bad_alias() {
        let broken = NameTable::new("translation", TABLE, DANGLING);
        assert!(matches!(
            broken.resolve("ghost"),
            Err(MinbarError::BadAlias { .. })
        ));
        assert!(broken.validate_aliases().is_err());
    }

    #[test]
    fn test_validate_aliases_accepts_good_table() {
        assert!(table().validate_aliases().is_ok());
    }

    #[test]
    fn test_resolve_exact_misses_cleanly() {
        assert!(table().resolve_exact("khatab").unwrap().is_none());
    }
}
