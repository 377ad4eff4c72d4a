//! English tafsir sources.
//!
//! Static table of the tafsir works served through the quran.com API, keyed
//! by the short names users type. The Arabic works scraped from tafsir.app
//! live in [`crate::tafsir_app`].

use crate::resolver::NameTable;

/// One English tafsir source on quran.com.
#[derive(Debug, Clone, Copy)]
pub struct TafsirInfo {
    /// quran.com tafsir resource id
    pub id: u16,
    /// Display name for embeds
    pub name: &'static str,
}

macro_rules! tafsir {
    ($id:expr, $name:expr) => {
        TafsirInfo {
            id: $id,
            name: $name,
        }
    };
}

pub const TAFSIRS: &[(&str, TafsirInfo)] = &[
    ("maarifulquran", tafsir!(168, "Maarif-ul-Quran")),
    ("ibnkathir", tafsir!(169, "Tafsīr Ibn Kathīr")),
    ("jalalayn", tafsir!(74, "Tafsīr al-Jalālayn")),
    ("saddi", tafsir!(170, "Tafsīr al-Sa'di (Russian)")),
    ("mukhtasar", tafsir!(171, "Al-Mukhtasar")),
    ("ahsanul", tafsir!(165, "Tafsir Ahsanul Bayaan")),
    ("zakaria", tafsir!(166, "Tafsir Abu Bakr Zakaria (Bengali)")),
    ("israr", tafsir!(159, "تفسیر بیان القرآن")),
    ("ibnkathir.ur", tafsir!(160, "تفسیر ابنِ کثیر")),
    ("ibnkathir.bn", tafsir!(164, "তাফসীর ইবনে কাছী")),
];

/// Aliases for keys users habitually type differently.
pub const TAFSIR_ALIASES: &[(&str, &str)] = &[("saadi", "saddi"), ("sadi", "saddi")];

/// Source tried when a verse has no entry in the requested tafsir. Several
/// works skip verses; al-Jalalayn covers everything.
pub const FALLBACK_TAFSIR: &str = "jalalayn";

pub fn tafsir_table() -> NameTable<'static, TafsirInfo> {
    NameTable::new("tafsir", TAFSIRS, TAFSIR_ALIASES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::MatchKind;

    #[test]
    fn test_alias_integrity() {
        assert!(tafsir_table().validate_aliases().is_ok());
    }

    #[test]
    fn test_saadi_alias_resolves_to_saddi() {
        let hit = tafsir_table().resolve("saadi").unwrap();
        assert_eq!(hit.key, "saddi");
        assert_eq!(hit.matched, MatchKind::Alias);
    }

    #[test]
    fn test_fallback_key_exists() {
        assert!(tafsir_table().get(FALLBACK_TAFSIR).is_some());
    }

    #[test]
    fn test_default_guild_tafsir_exists() {
        assert!(tafsir_table().get("maarifulquran").is_some());
    }
}
