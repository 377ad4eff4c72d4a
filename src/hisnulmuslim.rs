//! Duas from Fortress of the Muslim (Hisn al-Muslim), scraped from
//! ahadith.co.uk.
//!
//! Topics map to page ids on the site. Two topics sharing a page is fine;
//! the site groups some duas together.

use crate::error::{MinbarError, Result};
use crate::resolver::NameTable;

/// One dua topic.
#[derive(Debug, Clone, Copy)]
pub struct DuaInfo {
    /// ahadith.co.uk page id
    pub page_id: u16,
    /// Display form for embed titles
    pub name: &'static str,
}

macro_rules! dua {
    ($page_id:expr, $name:expr) => {
        DuaInfo {
            page_id: $page_id,
            name: $name,
        }
    };
}

pub const DUAS: &[(&str, DuaInfo)] = &[
    ("afflictions", dua!(49, "Afflictions")),
    ("after eating", dua!(66, "After Eating")),
    ("after insulting", dua!(105, "After Insulting")),
    ("after sinning", dua!(41, "After Sinning")),
    ("after sneezing", dua!(72, "After Sneezing")),
    ("angriness", dua!(76, "Angriness")),
    ("anxiety", dua!(34, "Anxiety")),
    ("before eating", dua!(65, "Before Eating")),
    ("breaking fast", dua!(64, "Breaking Fast")),
    ("completing wudu", dua!(9, "Completing Wudu")),
    ("delight", dua!(115, "Delight")),
    ("distress", dua!(35, "Distress")),
    ("doubts", dua!(37, "Doubts")),
    ("during adhan", dua!(15, "During Adhan")),
    ("during rain", dua!(60, "During Rain")),
    ("after rain", dua!(61, "After Rain")),
    ("hearing thunder", dua!(58, "Hearing Thunder")),
    ("entering home", dua!(11, "Entering Home")),
    ("leaving home", dua!(10, "Leaving Home")),
    ("entering mosque", dua!(13, "Entering Mosque")),
    ("leaving mosque", dua!(14, "Leaving Mosque")),
    ("entering toilet", dua!(6, "Entering Toilet")),
    ("leaving toilet", dua!(7, "Leaving Toilet")),
    ("fear of people", dua!(114, "Fear Of People")),
    ("fear of shirk", dua!(86, "Fear Of Shirk")),
    ("forgiveness", dua!(127, "Forgiveness")),
    ("in ruku", dua!(17, "In Ruku")),
    ("pain", dua!(117, "Pain")),
    ("returning from travel", dua!(99, "Returning From Travel")),
    ("sorrow", dua!(34, "Sorrow")),
    ("travel", dua!(90, "Travel")),
    ("visiting graves", dua!(56, "Visiting Graves")),
    ("visiting sick", dua!(45, "Visiting Sick")),
];

pub fn dua_table() -> NameTable<'static, DuaInfo> {
    NameTable::new("dua topic", DUAS, &[])
}

/// Fetch and clean the duas for one topic.
///
/// # Errors
///
/// `NotFound` when the page carries no duas,
/// `UpstreamUnavailable`/`Network` on transport failures.
pub async fn fetch_duas(client: &reqwest::Client, dua: &DuaInfo) -> Result<String> {
    let url = format!("https://ahadith.co.uk/hisnulmuslim-dua-{}", dua.page_id);
    let resp = client.get(&url).send().await?;
    let status = resp.status();
    if status.as_u16() == 404 {
        return Err(MinbarError::NotFound(format!("duas for {}", dua.name)));
    }
    if !status.is_success() {
        return Err(MinbarError::UpstreamUnavailable(format!(
            "ahadith.co.uk returned {}",
            status
        )));
    }

    let html = resp.text().await?;
    let text = extract_duas(&html);
    if text.is_empty() {
        return Err(MinbarError::NotFound(format!("duas for {}", dua.name)));
    }
    Ok(text)
}

/// Collect the text of every `search-item` div. Reference numbers are
/// stripped; the source numbers duas within the page and the numbers mean
/// nothing out of context.
fn extract_duas(html: &str) -> String {
    let mut out = String::new();
    let mut rest = html;

    while let Some(marker) = rest.find("search-item") {
        let after = &rest[marker..];
        let Some(open_end) = after.find('>') else { break };
        let body = &after[open_end + 1..];
        let end = body.find("</div>").unwrap_or(body.len());

        let mut text = String::new();
        let mut in_tag = false;
        for c in body[..end].chars() {
            match c {
                '<' => {
                    in_tag = true;
                    text.push(' ');
                }
                '>' => in_tag = false,
                c if !in_tag && !c.is_ascii_digit() => text.push(c),
                _ => {}
            }
        }
        let text = text.replace("(saw)", "ﷺ");
        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if !collapsed.is_empty() {
            out.push('\n');
            out.push_str(&collapsed);
        }

        rest = &body[end..];
    }

    out.trim_start().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_integrity() {
        assert!(dua_table().validate_aliases().is_ok());
    }

    #[test]
    fn test_topic_resolution_is_forgiving() {
        let hit = dua_table().resolve("Breaking Fast").unwrap();
        assert_eq!(hit.entry.page_id, 64);

        // Typos land on the nearest topic
        let hit = dua_table().resolve("breking fast").unwrap();
        assert_eq!(hit.key, "breaking fast");
    }

    #[test]
    fn test_extract_duas() {
        let html = concat!(
            r#"<html><div class="search-item"><p>First dua (saw) text 12</p></div>"#,
            r#"<div class="search-item"><p>Second dua</p></div></html>"#,
        );
        let text = extract_duas(html);
        assert_eq!(text, "First dua ﷺ text\nSecond dua");
    }

    #[test]
    fn test_extract_duas_empty_page() {
        assert!(extract_duas("<html><body>nothing here</body></html>").is_empty());
    }
}
