//! quran.com API integration.
//!
//! Fetches translated verse text, Uthmani Arabic text and English tafsir
//! content from the quran.com v4 API, and owns the static translation table
//! (canonical key → quran.com translation id + display name).

use serde::Deserialize;

use crate::error::{MinbarError, Result};
use crate::resolver::NameTable;

/// A translation available on quran.com.
#[derive(Debug, Clone, Copy)]
pub struct TranslationInfo {
    /// quran.com resource id
    pub id: u16,
    /// Human-readable name shown in embed footers
    pub name: &'static str,
}

macro_rules! translation {
    ($id:expr, $name:expr) => {
        TranslationInfo {
            id: $id,
            name: $name,
        }
    };
}

// Translations no longer in the quran.com api ('suhel', 'serbian', 'georgian')
// are intentionally absent.
pub const TRANSLATIONS: &[(&str, TranslationInfo)] = &[
    ("khattab", translation!(131, "Dr. Mustafa Khattab, the Clear Quran (English)")),
    ("bridges", translation!(149, "Fadel Soliman, Bridges' translation (English)")),
    ("sahih", translation!(20, "Saheeh International (English)")),
    ("maarifulquran", translation!(167, "Maarif-ul-Quran (English)")),
    ("haleem", translation!(85, "Abdul Haleem (English)")),
    ("taqiusmani", translation!(84, "Mufti Taqi Usmani (English)")),
    ("ghali", translation!(17, "Dr. Ghali (English)")),
    ("hilali", translation!(203, "Hilali-Khan (English)")),
    ("pickthall", translation!(19, "English Translation (Pickthall)")),
    ("yusufali", translation!(22, "Yusuf Ali (English)")),
    ("ruwwad", translation!(206, "Ruwwad Center (English)")),
    ("maududi.en", translation!(95, "Tafheem-ul-Quran - Abul Ala Maududi (English)")),
    ("transliteration", translation!(57, "Transliteration")),
    ("jalandhari", translation!(234, "Fatah Muhammad Jalandhari (Urdu)")),
    ("junagarri", translation!(54, "Maulana Muhammad Junagarhi (Urdu)")),
    ("maududi", translation!(97, "Tafheem e Qur'an - Syed Abu Ali Maududi (Urdu)")),
    ("israrahmad", translation!(158, "Bayan-ul-Quran (Urdu)")),
    ("awqaf", translation!(78, "Ministry of Awqaf, Egypt (Russian)")),
    ("abuadel", translation!(79, "Abu Adel (Russian)")),
    ("kuliev", translation!(45, "Russian Translation (Elmir Kuliev)")),
    ("musayev", translation!(75, "Alikhan Musayev (Azeri)")),
    ("montada", translation!(136, "Montada Islamic Foundation (French)")),
    ("hamidullah", translation!(31, "Muhammad Hamidullah (French)")),
    ("french", translation!(31, "French")),
    ("rashid", translation!(779, "Rashid Maash (French)")),
    ("diyanet", translation!(77, "Diyanet (Turkish)")),
    ("turkish", translation!(77, "Turkish")),
    ("shahin", translation!(124, "Muslim Shahin (Turkish)")),
    ("yazir", translation!(52, "Elmalili Hamdi Yazir (Turkish)")),
    ("bubenheim", translation!(27, "Frank Bubenheim and Nadeem (German)")),
    ("aburida", translation!(208, "Abu Reda Muhammad ibn Ahmad (German)")),
    ("isagarcia", translation!(83, "Sheikh Isa Garcia (Spanish)")),
    ("cortes", translation!(28, "Cortes (Spanish)")),
    ("piccardo", translation!(153, "Hamza Roberto Piccardo (Italian)")),
    ("othman", translation!(209, "Othman al-Sharif (Italian)")),
    ("siregar", translation!(144, "Sofian S. Siregar (Dutch)")),
    ("indonesian", translation!(33, "Indonesian Islamic Affairs Ministry (Indonesian)")),
    ("sabiq", translation!(141, "The Sabiq Company (Indonesian)")),
    ("basmeih", translation!(39, "Abdullah Muhammad Basmeih (Malay)")),
    ("malay", translation!(39, "Malay")),
    ("taisirulquran", translation!(161, "Taisirul Quran (Bengali)")),
    ("mujibur", translation!(163, "Sheikh Mujibur Rahman (Bengali)")),
    ("zakaria", translation!(213, "Dr. Abu Bakr Muhammad Zakaria (Bengali)")),
    ("umari", translation!(122, "Maulana Azizul Haque al-Umari (Hindi)")),
    ("omar", translation!(229, "Sheikh Omar Sharif bin Abdul Salam (Tamil)")),
    ("jantrust", translation!(50, "Jan Trust Foundation (Tamil)")),
    ("karakunnu", translation!(80, "Muhammad Karakunnu and Vanidas Elayavoor (Malayalam)")),
    ("persian", translation!(29, "Persian")),
    ("farsi", translation!(29, "Farsi")),
    ("korean", translation!(219, "Hamed Choi (Korean)")),
    ("sato", translation!(218, "Saeed Sato (Japanese)")),
    ("ryoichi", translation!(35, "Ryoichi Mita (Japanese)")),
    ("makin", translation!(109, "Muhammad Makin (Chinese)")),
    ("majian", translation!(56, "Ma Jain - Chinese (Simplified)")),
    ("khamis", translation!(231, "Dr. Abu Bakr and Sheikh Nasir Khamis (Swahili)")),
    ("barwani", translation!(49, "Ali Muhsin Al-Barwani (Somali)")),
    ("hausa", translation!(32, "Abubakar Gumi (Hausa)")),
    ("yoruba", translation!(125, "Shaykh Abu Rahimah Mikael Aykyuni (Yoruba)")),
    ("amharic", translation!(87, "Sadiq and Sani (Amharic)")),
    ("swedish", translation!(48, "Knut Bernstrom (Swedish)")),
    ("norwegian", translation!(41, "Norwegian")),
    ("finnish", translation!(30, "Finnish")),
    ("czech", translation!(26, "Czech")),
    ("polish", translation!(42, "Jozef Bielawski (Polish)")),
    ("romanian", translation!(44, "Grigore (Romanian)")),
    ("bulgarian", translation!(237, "Tzvetan Theophanov (Bulgarian)")),
    ("ukrainian", translation!(217, "Dr. Mikhailo Yaqubovic (Ukrainian)")),
    ("hebrew", translation!(233, "Dar Al-Salam Center (Hebrew)")),
    ("tagalog", translation!(211, "Dar Al-Salam Center (Tagalog)")),
    ("thai", translation!(230, "Society of Institutes and Universities (Thai)")),
    ("khmer", translation!(128, "Cambodian Muslim Community Development (Khmer)")),
    ("abdulkarim", translation!(221, "Hasan Abdul-Karim (Vietnamese)")),
    ("kazakh", translation!(222, "Khalifa Altai (Kazakh)")),
    ("uyghur", translation!(76, "Muhammad Saleh (Uyghur)")),
    ("divehi", translation!(86, "Divehi")),
    ("sinhalese", translation!(228, "Ruwwad Center (Sinhala/Sinhalese)")),
    ("nepali", translation!(108, "Ahl Al-Hadith Central Society of Nepal (Nepali)")),
    ("pashto", translation!(118, "Zakaria Abulsalam (Pashto)")),
    ("sindhi", translation!(238, "Taj Mehmood Amroti (Sindhi)")),
    ("mehanovic", translation!(25, "Muhamed Mehanovic (Bosnian)")),
    ("korkut", translation!(126, "Besim Korkut (Bosnian)")),
    ("hasanefendi", translation!(88, "Hasan Efendi Nahi (Albanian)")),
    ("nasr", translation!(103, "Helmi Nasr (Portuguese)")),
    ("elhayek", translation!(43, "Samir (Portuguese)")),
    ("mansour", translation!(101, "Alauddin Mansour (Uzbek)")),
    ("sodik", translation!(127, "Muhammad Sodik Muhammad Yusuf (Uzbek)")),
    ("burhan", translation!(81, "Burhan Muhammad-Amin (Kurdish)")),
    ("bamoki", translation!(143, "Muhammad Saleh Bamoki (Kurdish)")),
    ("amazigh", translation!(236, "Ramdane At Mansour (Amazigh)")),
];

/// The translation name table. No aliases: duplicate languages are entered as
/// their own keys with the same upstream id, as quran.com lists them.
pub fn translation_table() -> NameTable<'static, TranslationInfo> {
    NameTable::new("translation", TRANSLATIONS, &[])
}

/// Text of a translated verse.
#[derive(Debug, Clone)]
pub struct TranslatedVerse {
    pub text: String,
    /// Name of the translation, as reported by the API
    pub translation_name: String,
}

#[derive(Deserialize)]
struct TranslationsResponse {
    translations: Vec<TranslationText>,
    meta: TranslationMeta,
}

#[derive(Deserialize)]
struct TranslationText {
    text: String,
}

#[derive(Deserialize)]
struct TranslationMeta {
    translation_name: String,
}

#[derive(Deserialize)]
struct UthmaniResponse {
    verses: Vec<UthmaniVerse>,
}

#[derive(Deserialize)]
struct UthmaniVerse {
    text_uthmani: String,
}

#[derive(Deserialize)]
struct TafsirsResponse {
    tafsirs: Vec<TafsirText>,
    meta: TafsirMeta,
}

#[derive(Deserialize)]
struct TafsirText {
    text: String,
}

#[derive(Deserialize)]
struct TafsirMeta {
    author_name: String,
}

/// English tafsir content for one verse.
#[derive(Debug, Clone)]
pub struct TafsirContent {
    pub text: String,
    pub author: String,
}

const BASE_URL: &str = "https://api.quran.com/api/v4";

/// Discord embed field limit; longer verse text is cut with an ellipsis.
const FIELD_LIMIT: usize = 1024;

/// Fetch one translated verse.
///
/// # Errors
///
/// `NotFound` if the API has no text for the verse, `UpstreamUnavailable` or
/// `Network` on connectivity problems.
pub async fn fetch_verse(
    client: &reqwest::Client,
    translation_id: u16,
    surah: u16,
    verse: u16,
) -> Result<TranslatedVerse> {
    let url = format!(
        "{}/quran/translations/{}?verse_key={}:{}",
        BASE_URL, translation_id, surah, verse
    );
    let resp = checked(client.get(&url).send().await?)?;
    let body: TranslationsResponse = resp.json().await?;
    let raw = body
        .translations
        .first()
        .ok_or_else(|| MinbarError::NotFound(format!("verse {}:{}", surah, verse)))?;

    Ok(TranslatedVerse {
        text: truncate_field(&strip_html(&raw.text)),
        translation_name: body.meta.translation_name,
    })
}

/// Fetch the Uthmani Arabic text of one verse.
pub async fn fetch_arabic_verse(client: &reqwest::Client, surah: u16, verse: u16) -> Result<String> {
    let url = format!(
        "{}/quran/verses/uthmani?verse_key={}:{}",
        BASE_URL, surah, verse
    );
    let resp = checked(client.get(&url).send().await?)?;
    let body: UthmaniResponse = resp.json().await?;
    let raw = body
        .verses
        .first()
        .ok_or_else(|| MinbarError::NotFound(format!("verse {}:{}", surah, verse)))?;

    Ok(truncate_field(&raw.text_uthmani))
}

/// Fetch English tafsir text for one verse from a quran.com tafsir source.
///
/// # Errors
///
/// `NotFound` when the source has no entry for the verse; the caller may
/// fall back to another source.
pub async fn fetch_tafsir(
    client: &reqwest::Client,
    tafsir_id: u16,
    surah: u16,
    verse: u16,
) -> Result<TafsirContent> {
    let url = format!(
        "{}/quran/tafsirs/{}?verse_key={}:{}",
        BASE_URL, tafsir_id, surah, verse
    );
    let resp = checked(client.get(&url).send().await?)?;
    let body: TafsirsResponse = resp.json().await?;
    let raw = body
        .tafsirs
        .first()
        .ok_or_else(|| MinbarError::NotFound(format!("tafsir for {}:{}", surah, verse)))?;

    let text = strip_html(&raw.text).replace('`', "ʿ");
    if text.trim().is_empty() {
        return Err(MinbarError::NotFound(format!(
            "tafsir for {}:{}",
            surah, verse
        )));
    }

    Ok(TafsirContent {
        text,
        author: body.meta.author_name,
    })
}

fn checked(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else if status.as_u16() == 404 {
        Err(MinbarError::NotFound("quran.com resource".to_string()))
    } else {
        Err(MinbarError::UpstreamUnavailable(format!(
            "quran.com returned {}",
            status
        )))
    }
}

/// Remove HTML tags and any footnote digits glued to them, and unescape the
/// quote entity the API emits. Mirrors the upstream text closely enough for
/// chat display; this is not a general HTML parser.
pub fn strip_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '<' {
            for inner in chars.by_ref() {
                if inner == '>' {
                    break;
                }
            }
            // Footnote markers appear as digits right after a tag
            while matches!(chars.peek(), Some(d) if d.is_ascii_digit()) {
                chars.next();
            }
            out.push(' ');
        } else {
            out.push(c);
        }
    }
    out.replace("&quot;", "\"").trim().to_string()
}

/// Cut text to the embed field limit, appending an ellipsis marker.
pub fn truncate_field(text: &str) -> String {
    if text.chars().count() <= FIELD_LIMIT {
        return text.to_string();
    }
    let cut: String = text.chars().take(FIELD_LIMIT - 6).collect();
    format!("{} [...]", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_table_resolves_khattab() {
        let table = translation_table();
        let hit = table.resolve("khattab").unwrap();
        assert_eq!(hit.entry.id, 131);
    }

    #[test]
    fn test_translation_table_fuzzy_typo() {
        let table = translation_table();
        let hit = table.resolve("khatab").unwrap();
        assert_eq!(hit.key, "khattab");
    }

    #[test]
    fn test_translation_alias_integrity() {
        assert!(translation_table().validate_aliases().is_ok());
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("plain text"), "plain text");
        assert_eq!(strip_html("a <b>bold</b> word"), "a  bold  word");
        // Footnote digits glued to a tag are dropped with it
        assert_eq!(strip_html("text<sup>1</sup>2 more"), "text   more");
        assert_eq!(strip_html("say &quot;hi&quot;"), "say \"hi\"");
    }

    #[test]
    fn test_truncate_field() {
        let short = "abc";
        assert_eq!(truncate_field(short), "abc");

        let long = "x".repeat(2000);
        let cut = truncate_field(&long);
        assert!(cut.chars().count() <= 1024);
        assert!(cut.ends_with("[...]"));
    }
}
