//! Hadith lookup through the sunnah.com API.
//!
//! Collections are keyed by the short names users type; the API itself is
//! keyed the same way, so the resolved key doubles as the URL segment. The
//! API wants an `X-API-Key` header on every request.

use serde::Deserialize;

use crate::error::{MinbarError, Result};
use crate::reference::{HadithRefKind, HadithReference};
use crate::resolver::NameTable;

/// Display names for one hadith collection.
#[derive(Debug, Clone, Copy)]
pub struct CollectionInfo {
    pub english: &'static str,
    pub arabic: &'static str,
}

macro_rules! collection {
    ($english:expr, $arabic:expr) => {
        CollectionInfo {
            english: $english,
            arabic: $arabic,
        }
    };
}

pub const COLLECTIONS: &[(&str, CollectionInfo)] = &[
    ("bukhari", collection!("Sahīh al-Bukhārī", "صحيح البخاري")),
    ("muslim", collection!("Sahīh Muslim", "صحيح مسلم")),
    ("tirmidhi", collection!("Jamiʿ at-Tirmidhī", "جامع الترمذي")),
    ("abudawud", collection!("Sunan Abī Dāwūd", "سنن أبي داود")),
    ("nasai", collection!("Sunan an-Nāsaʿī", "سنن النسائي")),
    ("ibnmajah", collection!("Sunan Ibn Mājah", "سنن ابن ماجه")),
    ("malik", collection!("Muwatta Mālik", "موطأ مالك")),
    ("ahmad", collection!("Musnad Ahmad ibn Hanbal", "مسند أحمد بن حنبل")),
    ("riyadussalihin", collection!("Riyadh as-Salihīn", "رياض الصالحين")),
    ("adab", collection!("Al-Adab al-Mufrad", "الأدب المفرد")),
    ("bulugh", collection!("Bulugh al-Maram", "بلوغ المرام")),
    ("shamail", collection!("Shamā'il Muhammadiyyah", "الشمائل المحمدية")),
    ("mishkat", collection!("Mishkat al-Masabih", "مشكاة المصابيح")),
    ("forty", collection!("Al-Arbaʿīn al-Nawawiyyah", "الأربعون النووية")),
    ("hisn", collection!("Fortress of the Muslim", "حصن المسلم")),
];

pub const COLLECTION_ALIASES: &[(&str, &str)] = &[("nawawi", "forty")];

/// Collection and upper bound used by the random-hadith command. Riyadh
/// as-Salihīn numbers its entries 1..=1896 collection-globally.
pub const RANDOM_COLLECTION: &str = "riyadussalihin";
pub const RANDOM_MAX_HADITH: u32 = 1896;

pub fn collection_table() -> NameTable<'static, CollectionInfo> {
    NameTable::new("hadith collection", COLLECTIONS, COLLECTION_ALIASES)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HadithLang {
    English,
    Arabic,
}

impl HadithLang {
    fn code(self) -> &'static str {
        match self {
            HadithLang::English => "en",
            HadithLang::Arabic => "ar",
        }
    }

    /// Pick the right display name for the collection header.
    pub fn collection_name(self, info: &CollectionInfo) -> &'static str {
        match self {
            HadithLang::English => info.english,
            HadithLang::Arabic => info.arabic,
        }
    }
}

/// One fetched hadith, ready for embedding.
#[derive(Debug, Clone)]
pub struct Hadith {
    pub text: String,
    pub chapter_title: Option<String>,
    /// The collection-global number as sunnah.com reports it; kept as a
    /// string because sub-numbered entries exist ("1a").
    pub hadith_number: String,
    pub grading: Option<String>,
    pub graded_by: Option<String>,
}

// The API numbers hadiths as strings for sub-numbered entries and as
// integers otherwise.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberField {
    Text(String),
    Number(u64),
}

impl NumberField {
    fn into_string(self) -> String {
        match self {
            NumberField::Text(s) => s,
            NumberField::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GradeEntry {
    graded_by: Option<String>,
    grade: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HadithBody {
    lang: String,
    body: String,
    #[serde(rename = "chapterTitle")]
    chapter_title: Option<String>,
    #[serde(default)]
    grades: Vec<GradeEntry>,
}

#[derive(Debug, Deserialize)]
struct HadithEntry {
    #[serde(rename = "hadithNumber")]
    hadith_number: NumberField,
    hadith: Vec<HadithBody>,
}

#[derive(Debug, Deserialize)]
struct BookHadithsResponse {
    data: Vec<HadithEntry>,
}

/// sunnah.com API access. Carries the key and the base URL so tests can point
/// it at a local server.
#[derive(Debug, Clone)]
pub struct SunnahApi {
    base_url: String,
    api_key: String,
}

impl SunnahApi {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: "https://api.sunnah.com/v1".to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Fetch one hadith. `book:hadith` references list the book and index
    /// into it; bare numbers hit the collection-global endpoint.
    ///
    /// # Errors
    ///
    /// `NotFound` when the API has no such hadith, `UpstreamUnavailable` or
    /// `Network` on transport and server failures.
    pub async fn fetch_hadith(
        &self,
        client: &reqwest::Client,
        collection_key: &str,
        reference: &HadithReference,
        lang: HadithLang,
    ) -> Result<Hadith> {
        let entry = match reference.kind {
            HadithRefKind::BookAndHadith => {
                let book = reference.book_number.unwrap_or(1);
                let url = format!(
                    "{}/collections/{}/books/{}/hadiths",
                    self.base_url, collection_key, book
                );
                let resp: BookHadithsResponse = self.get_json(client, &url).await?;
                let index = reference.hadith_number as usize;
                resp.data
                    .into_iter()
                    .nth(index.saturating_sub(1))
                    .ok_or_else(|| {
                        MinbarError::NotFound(format!(
                            "hadith {}:{} in {}",
                            book, reference.hadith_number, collection_key
                        ))
                    })?
            }
            HadithRefKind::HadithNumber => {
                let url = format!(
                    "{}/collections/{}/hadiths/{}",
                    self.base_url, collection_key, reference.hadith_number
                );
                self.get_json(client, &url).await?
            }
        };

        let hadith_number = entry.hadith_number.into_string();
        let body = entry
            .hadith
            .into_iter()
            .find(|b| b.lang == lang.code())
            .ok_or_else(|| {
                MinbarError::NotFound(format!(
                    "hadith {} in {} ({})",
                    hadith_number,
                    collection_key,
                    lang.code()
                ))
            })?;

        let (grading, graded_by) = body
            .grades
            .into_iter()
            .next()
            .map(|g| (g.grade, g.graded_by))
            .unwrap_or((None, None));

        Ok(Hadith {
            text: format_hadith_text(&body.body),
            chapter_title: body.chapter_title.filter(|t| !t.trim().is_empty()),
            hadith_number,
            grading: grading.filter(|g| !g.trim().is_empty()),
            graded_by: graded_by.filter(|g| !g.trim().is_empty()),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        client: &reqwest::Client,
        url: &str,
    ) -> Result<T> {
        let resp = client
            .get(url)
            .header("X-API-Key", &self.api_key)
            .send()
            .await?;
        let status = resp.status();
        if status.as_u16() == 404 {
            return Err(MinbarError::NotFound("hadith".to_string()));
        }
        if !status.is_success() {
            return Err(MinbarError::UpstreamUnavailable(format!(
                "sunnah.com returned {}",
                status
            )));
        }
        Ok(resp.json().await?)
    }
}

/// sunnah.com bodies arrive as HTML with stray backticks standing in for
/// ʿayn. Italics become Discord markdown, everything else is dropped.
fn format_hadith_text(html: &str) -> String {
    let html = html
        .replace('`', "ʿ")
        .replace("<i>", "*")
        .replace("</i>", "*")
        .replace("<br>", "\n")
        .replace("<br/>", "\n")
        .replace("<br />", "\n");
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::parse_hadith_ref;
    use crate::resolver::MatchKind;

    #[test]
    fn test_alias_integrity() {
        assert!(collection_table().validate_aliases().is_ok());
    }

    #[test]
    fn test_nawawi_alias_resolves_to_forty() {
        let hit = collection_table().resolve("nawawi").unwrap();
        assert_eq!(hit.key, "forty");
        assert_eq!(hit.matched, MatchKind::Alias);
    }

    #[test]
    fn test_random_collection_exists() {
        assert!(collection_table().get(RANDOM_COLLECTION).is_some());
    }

    #[test]
    fn test_format_hadith_text() {
        let formatted = format_hadith_text("Narrated <i>`Umar</i>:<br>I heard <b>him</b> say");
        assert_eq!(formatted, "Narrated *ʿUmar*:\nI heard him say");
    }

    fn book_payload() -> &'static str {
        r#"{"data": [
            {"hadithNumber": "1",
             "hadith": [
                {"lang": "en", "body": "<b>Narrated</b> something first",
                 "chapterTitle": "Revelation",
                 "grades": [{"graded_by": "Al-Albani", "grade": "Sahih"}]},
                {"lang": "ar", "body": "نص أول", "chapterTitle": "الوحي", "grades": []}
             ]},
            {"hadithNumber": 2,
             "hadith": [
                {"lang": "en", "body": "Second hadith", "chapterTitle": null, "grades": []},
                {"lang": "ar", "body": "نص ثان", "chapterTitle": null, "grades": []}
             ]}
        ]}"#
    }

    #[tokio::test]
    async fn test_fetch_by_book_and_number() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/collections/bukhari/books/1/hadiths")
            .match_header("X-API-Key", "test-key")
            .with_status(200)
            .with_body(book_payload())
            .create_async()
            .await;

        let api = SunnahApi::with_base_url("test-key", server.url());
        let client = reqwest::Client::new();
        let reference = parse_hadith_ref("1:2").unwrap();
        let hadith = api
            .fetch_hadith(&client, "bukhari", &reference, HadithLang::English)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(hadith.text, "Second hadith");
        assert_eq!(hadith.hadith_number, "2");
        assert!(hadith.chapter_title.is_none());
        assert!(hadith.grading.is_none());
    }

    #[tokio::test]
    async fn test_fetch_arabic_body_and_grading() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/collections/bukhari/books/1/hadiths")
            .with_status(200)
            .with_body(book_payload())
            .create_async()
            .await;

        let api = SunnahApi::with_base_url("test-key", server.url());
        let client = reqwest::Client::new();
        let reference = parse_hadith_ref("1:1").unwrap();

        let arabic = api
            .fetch_hadith(&client, "bukhari", &reference, HadithLang::Arabic)
            .await
            .unwrap();
        assert_eq!(arabic.text, "نص أول");
        assert_eq!(arabic.chapter_title.as_deref(), Some("الوحي"));

        let english = api
            .fetch_hadith(&client, "bukhari", &reference, HadithLang::English)
            .await
            .unwrap();
        assert_eq!(english.grading.as_deref(), Some("Sahih"));
        assert_eq!(english.graded_by.as_deref(), Some("Al-Albani"));
    }

    #[tokio::test]
    async fn test_fetch_by_global_number() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/collections/muslim/hadiths/1051")
            .with_status(200)
            .with_body(
                r#"{"hadithNumber": "1051",
                    "hadith": [
                        {"lang": "en", "body": "Global form", "chapterTitle": "Zakat", "grades": []},
                        {"lang": "ar", "body": "نص", "chapterTitle": "الزكاة", "grades": []}
                    ]}"#,
            )
            .create_async()
            .await;

        let api = SunnahApi::with_base_url("test-key", server.url());
        let client = reqwest::Client::new();
        let reference = parse_hadith_ref("1051").unwrap();
        let hadith = api
            .fetch_hadith(&client, "muslim", &reference, HadithLang::English)
            .await
            .unwrap();
        assert_eq!(hadith.hadith_number, "1051");
        assert_eq!(hadith.text, "Global form");
    }

    #[tokio::test]
    async fn test_missing_hadith_is_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/collections/muslim/hadiths/999999")
            .with_status(404)
            .create_async()
            .await;

        let api = SunnahApi::with_base_url("test-key", server.url());
        let client = reqwest::Client::new();
        let reference = parse_hadith_ref("999999").unwrap();
        let result = api
            .fetch_hadith(&client, "muslim", &reference, HadithLang::English)
            .await;
        assert!(matches!(result, Err(MinbarError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_index_past_book_end_is_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/collections/bukhari/books/1/hadiths")
            .with_status(200)
            .with_body(book_payload())
            .create_async()
            .await;

        let api = SunnahApi::with_base_url("test-key", server.url());
        let client = reqwest::Client::new();
        let reference = parse_hadith_ref("1:3").unwrap();
        let result = api
            .fetch_hadith(&client, "bukhari", &reference, HadithLang::English)
            .await;
        assert!(matches!(result, Err(MinbarError::NotFound(_))));
    }
}
