//! Arabic tafsir scraping from tafsir.app.
//!
//! tafsir.app serves each work as an HTML page with the commentary inside a
//! `#preloaded` div. The munging here is source-specific by necessity: the
//! site mixes Qur'anic quotation braces, hadith guillemets and bracketed
//! footnotes that Discord renders poorly without fixing.

use crate::error::{MinbarError, Result};
use crate::resolver::NameTable;

/// One Arabic tafsir work on tafsir.app.
#[derive(Debug, Clone, Copy)]
pub struct ArabicTafsirInfo {
    /// Path segment on tafsir.app
    pub site_id: &'static str,
    /// Arabic title for embeds
    pub name: &'static str,
}

macro_rules! atafsir {
    ($site_id:expr, $name:expr) => {
        ArabicTafsirInfo {
            site_id: $site_id,
            name: $name,
        }
    };
}

pub const ARABIC_TAFSIRS: &[(&str, ArabicTafsirInfo)] = &[
    ("tabari", atafsir!("tabari", "جامع البيان — ابن جرير الطبري (٣١٠ هـ)")),
    ("ibnkathir", atafsir!("ibn-katheer", "تفسير القرآن العظيم — ابن كثير (٧٧٤ هـ)")),
    ("qurtubi", atafsir!("qurtubi", "الجامع لأحكام القرآن — القرطبي (٦٧١ هـ)")),
    ("razi", atafsir!("alrazi", "مفاتيح الغيب — فخر الدين الرازي (٦٠٦ هـ)")),
    ("zamakhshari", atafsir!("kashaf", "الكشاف — الزمخشري (٥٣٨ هـ)")),
    ("baghawi", atafsir!("baghawi", "معالم التنزيل — البغوي (٥١٦ هـ)")),
    ("baydawi", atafsir!("albaydawee", "أنوار التنزيل — البيضاوي (٦٨٥ هـ)")),
    ("jalalayn", atafsir!("jalalayn", "تفسير الجلالين — المحلّي والسيوطي (٨٦٤، ٩١١ هـ)")),
    ("alusi", atafsir!("alaloosi", "روح المعاني — الآلوسي (١٢٧٠ هـ)")),
    ("ibnashur", atafsir!("ibn-aashoor", "التحرير والتنوير — ابن عاشور (١٣٩٣ هـ)")),
    ("ibnuthaymeen", atafsir!("ibn-uthaymeen", "تفسير القرآن الكريم — ابن عثيمين (١٤٢١ هـ)")),
    ("ibnatiyah", atafsir!("ibn-atiyah", "المحرر الوجيز — ابن عطية (٥٤٦ هـ)")),
    ("muyassar", atafsir!("muyassar", "الميسر — مجمع الملك فهد")),
    ("shawkani", atafsir!("fath-alqadeer", "فتح القدير — الشوكاني (١٢٥٠ هـ)")),
    ("mukhtasar", atafsir!("mukhtasar", "المختصر — مركز تفسير")),
    ("saadi", atafsir!("saadi", "تيسير الكريم الرحمن — السعدي (١٣٧٦ هـ)")),
    ("ibnaljawzi", atafsir!("zad-almaseer", "زاد المسير — ابن الجوزي (٥٩٧ هـ)")),
    ("ibnalqayyim", atafsir!("ibn-alqayyim", "تفسير ابن قيّم الجوزيّة — ابن القيم (٧٥١ هـ)")),
    ("nasafi", atafsir!("alnasafi", "مدارك التنزيل — النسفي (٧١٠ هـ)")),
    ("samaani", atafsir!("samaani", "تفسير القرآن — السمعاني (٤٨٩ هـ)")),
    ("wahidi", atafsir!("alwajeez", "الوجيز — الواحدي (٤٦٨ هـ)")),
    ("abuhayyan", atafsir!("albahr-almuheet", "البحر المحيط — أبو حيان (٧٤٥ هـ)")),
    ("suyuti", atafsir!("aldur-almanthoor", "الدر المنثور — جلال الدين السيوطي (٩١١ هـ)")),
    ("samarqandi", atafsir!("samarqandi", "بحر العلوم — السمرقندي (٣٧٣ هـ)")),
    ("thalabi", atafsir!("althalabi", "الكشف والبيان — الثعلبي (٤٢٧ هـ)")),
];

pub fn arabic_tafsir_table() -> NameTable<'static, ArabicTafsirInfo> {
    NameTable::new("arabic tafsir", ARABIC_TAFSIRS, &[])
}

/// A page of Arabic tafsir text with its extracted footnotes.
#[derive(Debug, Clone)]
pub struct ArabicTafsirPage {
    pub text: String,
    /// Footnotes pulled out of the text, already numbered in Arabic-Indic
    /// digits; empty when the page has none.
    pub footnotes: String,
}

/// Fetch the commentary for one verse and return the cleaned text.
///
/// # Errors
///
/// `NotFound` when the page carries no commentary for the verse,
/// `UpstreamUnavailable`/`Network` on connectivity problems.
pub async fn fetch_tafsir(
    client: &reqwest::Client,
    tafsir: &ArabicTafsirInfo,
    surah: u16,
    verse: u16,
) -> Result<String> {
    let url = page_url(tafsir, surah, verse);
    let resp = client.get(&url).send().await?;
    let status = resp.status();
    if status.as_u16() == 404 {
        return Err(MinbarError::NotFound(format!(
            "tafsir {} for {}:{}",
            tafsir.site_id, surah, verse
        )));
    }
    if !status.is_success() {
        return Err(MinbarError::UpstreamUnavailable(format!(
            "tafsir.app returned {}",
            status
        )));
    }

    let html = resp.text().await?;
    let text = extract_preloaded(&html).ok_or_else(|| {
        MinbarError::NotFound(format!("tafsir {} for {}:{}", tafsir.site_id, surah, verse))
    })?;
    Ok(clean_text(&text))
}

/// The page URL for one verse of a work, also used as the embed link.
pub fn page_url(tafsir: &ArabicTafsirInfo, surah: u16, verse: u16) -> String {
    format!("https://tafsir.app/{}/{}/{}", tafsir.site_id, surah, verse)
}

/// Pull the text out of the `<div id="preloaded">` element.
fn extract_preloaded(html: &str) -> Option<String> {
    let start = html.find("id=\"preloaded\"")?;
    let body_start = html[start..].find('>')? + start + 1;
    let body_end = html[body_start..].find("</div>")? + body_start;
    let mut text = String::new();
    let mut in_tag = false;
    for c in html[body_start..body_end].chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => text.push(c),
            _ => {}
        }
    }
    let text = text.trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Fix the mixed Arabic/symbol text for Discord: quotation braces and
/// guillemets need pairing quotes, ornaments go, parentheticals (mostly
/// isnad interjections) go.
fn clean_text(text: &str) -> String {
    let text = text
        .replace('*', "")
        .replace('⁕', "")
        .replace('}', " ﴾\"")
        .replace('{', "\"﴿ ")
        .replace('«', "\"«")
        .replace('»', "»\"")
        .replace("]]", "]")
        .replace("[[", "[");
    strip_parentheticals(&text)
}

fn strip_parentheticals(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut depth = 0usize;
    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

/// Split bracketed footnotes out of one page of text. The text keeps an
/// Arabic-Indic reference number where each footnote stood; the footnotes are
/// returned as a numbered block for the embed footer.
pub fn split_footnotes(page: &str) -> ArabicTafsirPage {
    let mut text = String::with_capacity(page.len());
    let mut footnotes = String::new();
    let mut counter = 0usize;
    let mut rest = page;

    while let Some(open) = rest.find('[') {
        text.push_str(&rest[..open]);
        match rest[open + 1..].find(']') {
            Some(close) => {
                let note = &rest[open + 1..open + 1 + close];
                counter += 1;
                let number = crate::utils::arabic::to_arabic_digits(&counter.to_string());
                text.push_str(&format!("({})", number));
                footnotes.push_str(&format!("\n({}) {}", number, note));
                rest = &rest[open + 1 + close + 1..];
            }
            None => {
                text.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    text.push_str(rest);

    ArabicTafsirPage {
        text,
        footnotes: footnotes.trim_start().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_integrity() {
        assert!(arabic_tafsir_table().validate_aliases().is_ok());
    }

    #[test]
    fn test_default_guild_arabic_tafsir_exists() {
        assert!(arabic_tafsir_table().get("tabari").is_some());
    }

    #[test]
    fn test_extract_preloaded() {
        let html = r#"<html><div id="preloaded">قال <b>المفسر</b> كذا</div></html>"#;
        assert_eq!(extract_preloaded(html).unwrap(), "قال المفسر كذا");
        assert!(extract_preloaded("<html><div>no marker</div></html>").is_none());
    }

    #[test]
    fn test_clean_text_pairs_quotes() {
        let cleaned = clean_text("{الحمد لله}");
        assert!(cleaned.contains('﴿'));
        assert!(cleaned.contains('﴾'));
        assert!(!cleaned.contains('{'));
    }

    #[test]
    fn test_clean_text_strips_parentheticals() {
        assert_eq!(clean_text("قال (رحمه الله) كذا"), "قال  كذا");
    }

    #[test]
    fn test_split_footnotes() {
        let page = split_footnotes("نص[حاشية أولى] ونص[ثانية]");
        assert_eq!(page.text, "نص(١) ونص(٢)");
        assert!(page.footnotes.contains("(١) حاشية أولى"));
        assert!(page.footnotes.contains("(٢) ثانية"));
    }

    #[test]
    fn test_split_footnotes_without_brackets() {
        let page = split_footnotes("نص بلا حواشي");
        assert_eq!(page.text, "نص بلا حواشي");
        assert!(page.footnotes.is_empty());
    }

    #[test]
    fn test_page_url() {
        let (_, info) = ARABIC_TAFSIRS[0];
        assert_eq!(page_url(&info, 2, 255), "https://tafsir.app/tabari/2/255");
    }
}
