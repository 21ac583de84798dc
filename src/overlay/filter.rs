//! Fuzzy row filtering.

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Matcher, Utf32Str};

/// Matches row values against the typed query, reusing buffers across rows.
pub struct RowMatcher {
    pattern: Option<Pattern>,
    matcher: Matcher,
    buf: Vec<char>,
}

impl RowMatcher {
    /// A blank query matches every row.
    ///
    /// Every typed character is matched literally; `!`, `^`, `$` and `'` carry
    /// no operator meaning.
    pub fn new(query: &str) -> Self {
        let pattern = if query.trim().is_empty() {
            None
        } else {
            Some(Pattern::new(query, CaseMatching::Ignore, Normalization::Smart, AtomKind::Fuzzy))
        };
        Self {
            pattern,
            matcher: Matcher::new(nucleo_matcher::Config::DEFAULT),
            buf: Vec::with_capacity(64),
        }
    }

    #[inline]
    pub fn score(&mut self, value: &str) -> Option<u32> {
        let Some(pattern) = &self.pattern else {
            return Some(0);
        };
        self.buf.clear();
        let utf32 = Utf32Str::new(value, &mut self.buf);
        pattern.score(utf32, &mut self.matcher)
    }

    pub fn is_match(&mut self, value: &str) -> bool {
        self.score(value).is_some()
    }
}
