//! Scripture and hadith reference parsing.
//!
//! Turns user-typed references like `2:255`, `1:1-7` or `bukhari 1:1` into
//! validated structures. Parsing is pure and synchronous; all range checks go
//! through the static surah table.

use crate::error::{MinbarError, Result};
use crate::surah;

/// A validated reference to one or more verses of a surah.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptureReference {
    /// Canonical surah number, 1..=114
    pub surah: u16,
    /// First verse of the range (>= 1)
    pub start_verse: u16,
    /// Last verse of the range (<= the surah's verse count)
    pub end_verse: u16,
}

impl ScriptureReference {
    /// Iterate over the verse numbers in the range.
    pub fn verses(&self) -> impl Iterator<Item = u16> {
        self.start_verse..=self.end_verse
    }

    /// Whether this reference spans more than one verse.
    pub fn is_range(&self) -> bool {
        self.start_verse != self.end_verse
    }
}

/// Which form a hadith reference was typed in. The two forms hit different
/// sunnah.com endpoints, so the tag must survive parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HadithRefKind {
    /// `book:hadith`, numbered within a book
    BookAndHadith,
    /// A collection-global hadith number
    HadithNumber,
}

/// A parsed hadith reference. The collection is supplied separately by the
/// caller; this only carries the numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HadithReference {
    pub book_number: Option<u32>,
    pub hadith_number: u32,
    pub kind: HadithRefKind,
}

/// Parse a `surah:verse` or `surah:first-last` reference.
///
/// The surah part must be an integer; set `reveal_order` to interpret it as a
/// chronological revelation-order position instead of the canonical number.
/// When `allow_range` is false a true range (`min != max`) is rejected;
/// call sites like morphology lookup address a single verse.
///
/// Inverted bounds (`1:7-1`) are swapped, not rejected; users transpose the
/// numbers often enough that rejecting them would be churlish.
///
/// # Errors
///
/// * `BadReference`: missing `:`, non-integer parts, or a range where none
///   is allowed.
/// * `InvalidSurah`: surah (after reveal-order translation) outside 1..=114.
/// * `InvalidAyah`: verse beyond the surah's verse count; carries the true
///   count of the resolved surah.
pub fn parse_scripture_ref(
    text: &str,
    allow_range: bool,
    reveal_order: bool,
) -> Result<ScriptureReference> {
    let bad = || MinbarError::BadReference(text.to_string());

    let mut parts = text.trim().split(':');
    let (surah_part, verse_part) = match (parts.next(), parts.next(), parts.next()) {
        (Some(surah), Some(verses), None) => (surah, verses),
        _ => return Err(bad()),
    };

    let mut surah_number: u16 = surah_part.trim().parse().map_err(|_| bad())?;
    if reveal_order {
        surah_number = surah::from_reveal_order(surah_number)?;
    }
    let num_verses = surah::verse_count(surah_number)?;

    let (min_part, max_part) = match verse_part.split_once('-') {
        Some((min, max)) => (min, max),
        None => (verse_part, verse_part),
    };
    let min: u16 = min_part.trim().parse().map_err(|_| bad())?;
    let max: u16 = max_part.trim().parse().map_err(|_| bad())?;
    if min == 0 || max == 0 {
        return Err(bad());
    }

    let (start_verse, end_verse) = if min > max { (max, min) } else { (min, max) };

    if !allow_range && start_verse != end_verse {
        return Err(bad());
    }
    if end_verse > num_verses {
        return Err(MinbarError::InvalidAyah { num_verses });
    }

    Ok(ScriptureReference {
        surah: surah_number,
        start_verse,
        end_verse,
    })
}

/// Parse a hadith reference: `book:hadith`, or a bare collection-global
/// hadith number. Only records which form was used; the fetcher picks the
/// endpoint.
///
/// # Errors
///
/// `BadReference` on non-integer components or extra separators.
pub fn parse_hadith_ref(text: &str) -> Result<HadithReference> {
    let bad = || MinbarError::BadReference(text.to_string());
    let text = text.trim();

    match text.split_once(':') {
        Some((book, hadith)) => {
            if hadith.contains(':') {
                return Err(bad());
            }
            let book_number: u32 = book.trim().parse().map_err(|_| bad())?;
            let hadith_number: u32 = hadith.trim().parse().map_err(|_| bad())?;
            Ok(HadithReference {
                book_number: Some(book_number),
                hadith_number,
                kind: HadithRefKind::BookAndHadith,
            })
        }
        None => {
            let hadith_number: u32 = text.parse().map_err(|_| bad())?;
            Ok(HadithReference {
                book_number: None,
                hadith_number,
                kind: HadithRefKind::HadithNumber,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surah::SURAHS;

    #[test]
    fn test_single_verse() {
        let parsed = parse_scripture_ref("2:255", false, false).unwrap();
        assert_eq!(parsed.surah, 2);
        assert_eq!(parsed.start_verse, 255);
        assert_eq!(parsed.end_verse, 255);
        assert!(!parsed.is_range());
    }

    #[test]
    fn test_every_first_and_last_verse_parses() {
        for surah in &SURAHS {
            let first = format!("{}:1", surah.number);
            let last = format!("{}:{}", surah.number, surah.verse_count);
            assert!(parse_scripture_ref(&first, false, false).is_ok());
            assert!(parse_scripture_ref(&last, false, false).is_ok());
        }
    }

    #[test]
    fn test_verse_past_end_reports_true_count() {
        for surah in &SURAHS {
            let over = format!("{}:{}", surah.number, surah.verse_count + 1);
            match parse_scripture_ref(&over, false, false) {
                Err(MinbarError::InvalidAyah { num_verses }) => {
                    assert_eq!(num_verses, surah.verse_count)
                }
                other => panic!("expected InvalidAyah, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_inverted_range_is_swapped_not_rejected() {
        let parsed = parse_scripture_ref("1:7-1", true, false).unwrap();
        assert_eq!(parsed.start_verse, 1);
        assert_eq!(parsed.end_verse, 7);
    }

    #[test]
    fn test_range_rejected_when_not_allowed() {
        assert!(matches!(
            parse_scripture_ref("1:1-7", false, false),
            Err(MinbarError::BadReference(_))
        ));
        // A degenerate range is still a single verse
        assert!(parse_scripture_ref("1:3-3", false, false).is_ok());
    }

    #[test]
    fn test_invalid_surah_number() {
        assert!(matches!(
            parse_scripture_ref("115:1", false, false),
            Err(MinbarError::InvalidSurah)
        ));
        assert!(matches!(
            parse_scripture_ref("0:1", false, false),
            Err(MinbarError::InvalidSurah)
        ));
    }

    #[test]
    fn test_malformed_references() {
        for text in ["2", "2:255:3", "abc:1", "2:xyz", "2:1-x", "2:0", ":", ""] {
            assert!(
                matches!(
                    parse_scripture_ref(text, true, false),
                    Err(MinbarError::BadReference(_))
                ),
                "{:?} should be BadReference",
                text
            );
        }
    }

    #[test]
    fn test_reveal_order_translation() {
        // Revelation order 1 is Al-'Alaq (96), which has 19 verses
        let parsed = parse_scripture_ref("1:19", false, true).unwrap();
        assert_eq!(parsed.surah, 96);
        // Verse-count validation applies to the resolved surah
        match parse_scripture_ref("1:20", false, true) {
            Err(MinbarError::InvalidAyah { num_verses }) => assert_eq!(num_verses, 19),
            other => panic!("expected InvalidAyah, got {:?}", other),
        }
    }

    #[test]
    fn test_hadith_book_and_number_form() {
        let parsed = parse_hadith_ref("1:5").unwrap();
        assert_eq!(parsed.book_number, Some(1));
        assert_eq!(parsed.hadith_number, 5);
        assert_eq!(parsed.kind, HadithRefKind::BookAndHadith);
    }

    #[test]
    fn test_hadith_global_number_form() {
        let parsed = parse_hadith_ref("1051").unwrap();
        assert_eq!(parsed.book_number, None);
        assert_eq!(parsed.hadith_number, 1051);
        assert_eq!(parsed.kind, HadithRefKind::HadithNumber);
    }

    #[test]
    fn test_hadith_malformed() {
        for text in ["a:1", "1:b", "1:2:3", "", "one"] {
            assert!(
                matches!(parse_hadith_ref(text), Err(MinbarError::BadReference(_))),
                "{:?} should be BadReference",
                text
            );
        }
    }
}
