//! Splitting long content into embed-sized pages and stepping through them.
//!
//! The state machine is pure; the command layer owns the buttons and feeds
//! presses in. Both directions wrap around.

use std::time::{Duration, Instant};

/// How long a paginated message keeps responding to its buttons.
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(300);

/// Discord's limit for an embed description is higher, but 2048 keeps the
/// message readable; field values cap at 1024.
pub const PAGE_WIDTH: usize = 2048;

/// Greedy word wrap. Words longer than `width` are split mid-word rather
/// than overflowing a page.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut pages = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word;
        while word.chars().count() > width {
            // Pathological single word, hard-split it
            if !current.is_empty() {
                pages.push(std::mem::take(&mut current));
            }
            let cut = word
                .char_indices()
                .nth(width)
                .map(|(i, _)| i)
                .unwrap_or(word.len());
            pages.push(word[..cut].to_string());
            word = &word[cut..];
        }
        if word.is_empty() {
            continue;
        }

        let needed = word.chars().count() + if current.is_empty() { 0 } else { 1 };
        if current.chars().count() + needed > width && !current.is_empty() {
            pages.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        pages.push(current);
    }
    pages
}

/// Paging state for one message, owned by the user who invoked the command.
pub struct Paginator {
    pages: Vec<String>,
    page: usize,
    owner_id: u64,
    created_at: Instant,
}

impl Paginator {
    /// Build a paginator over pre-split pages. An empty input still yields
    /// one (empty) page so callers never index into nothing.
    pub fn new(pages: Vec<String>, owner_id: u64) -> Self {
        let pages = if pages.is_empty() {
            vec![String::new()]
        } else {
            pages
        };
        Self {
            pages,
            page: 0,
            owner_id,
            created_at: Instant::now(),
        }
    }

    /// Wrap `text` into pages of `width` and build a paginator over them.
    pub fn from_text(text: &str, width: usize, owner_id: u64) -> Self {
        Self::new(wrap(text, width), owner_id)
    }

    pub fn current(&self) -> &str {
        &self.pages[self.page]
    }

    /// 1-based, for footers
    pub fn page_number(&self) -> usize {
        self.page + 1
    }

    pub fn total_pages(&self) -> usize {
        self.pages.len()
    }

    pub fn is_single_page(&self) -> bool {
        self.pages.len() == 1
    }

    /// Whether `user_id` may turn the pages.
    pub fn owned_by(&self, user_id: u64) -> bool {
        self.owner_id == user_id
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= IDLE_TIMEOUT
    }

    /// Advance to the next page, wrapping to the first past the end.
    pub fn next_page(&mut self) -> &str {
        self.page = (self.page + 1) % self.pages.len();
        self.current()
    }

    /// Step back a page, wrapping to the last from the first.
    pub fn previous_page(&mut self) -> &str {
        self.page = self.page.checked_sub(1).unwrap_or(self.pages.len() - 1);
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_short_text_is_one_page() {
        assert_eq!(wrap("hello world", 100), vec!["hello world"]);
    }

    #[test]
    fn test_wrap_splits_on_word_boundaries() {
        let pages = wrap("aaa bbb ccc ddd", 7);
        assert_eq!(pages, vec!["aaa bbb", "ccc ddd"]);
    }

    #[test]
    fn test_wrap_never_exceeds_width() {
        let text = "lorem ipsum dolor sit amet consectetur adipiscing elit sed do";
        for page in wrap(text, 10) {
            assert!(page.chars().count() <= 10, "{:?} too wide", page);
        }
    }

    #[test]
    fn test_wrap_hard_splits_long_words() {
        let pages = wrap("abcdefghij", 4);
        assert_eq!(pages, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wrap_counts_chars_not_bytes() {
        // Multi-byte text must split on character boundaries
        let pages = wrap("ٱلْحَمْدُ لِلَّهِ رَبِّ ٱلْعَٰلَمِينَ", 12);
        assert!(!pages.is_empty());
        for page in &pages {
            assert!(page.chars().count() <= 12);
        }
    }

    #[test]
    fn test_paginator_wraps_around_both_ways() {
        let mut p = Paginator::new(vec!["a".into(), "b".into(), "c".into()], 1);
        assert_eq!(p.current(), "a");
        assert_eq!(p.next_page(), "b");
        assert_eq!(p.next_page(), "c");
        assert_eq!(p.next_page(), "a");
        assert_eq!(p.previous_page(), "c");
    }

    #[test]
    fn test_paginator_empty_input_is_one_empty_page() {
        let p = Paginator::new(vec![], 1);
        assert_eq!(p.total_pages(), 1);
        assert_eq!(p.current(), "");
        assert!(p.is_single_page());
    }

    #[test]
    fn test_fresh_paginator_is_not_expired() {
        let p = Paginator::new(vec!["a".into()], 1);
        assert!(!p.is_expired());
    }

    #[test]
    fn test_paginator_ownership() {
        let p = Paginator::new(vec!["a".into()], 42);
        assert!(p.owned_by(42));
        assert!(!p.owned_by(7));
    }

    #[test]
    fn test_page_numbering() {
        let mut p = Paginator::from_text("one two three", 5, 1);
        assert_eq!(p.total_pages(), 3);
        assert_eq!(p.page_number(), 1);
        p.next_page();
        assert_eq!(p.page_number(), 2);
    }
}
