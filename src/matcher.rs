//! Exact nucleotide matcher
//!
//! [`LiteralMatcher`] is a reference [`PatternMatcher`]: it finds exact, case-insensitive
//! occurrences of a nucleotide string on the positive strand and of its reverse complement on
//! the negative strand. Occurrences may overlap one another.

use memchr::memmem::Finder;

use crate::{
    error::{RequestError, Result},
    utils::reverse_complement,
    PatternMatch, PatternMatcher, Strand,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralMatcher;
impl LiteralMatcher {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Upper-cases the pattern and checks that it only holds `A`, `C`, `G`, `T` or `N`
    fn normalize(pattern: &str) -> Result<Vec<u8>> {
        let needle = pattern.as_bytes().to_ascii_uppercase();
        if needle.is_empty() {
            return Err(RequestError::EmptyPattern.into());
        }
        if let Some(&base) = needle
            .iter()
            .find(|b| !matches!(b, b'A' | b'C' | b'G' | b'T' | b'N'))
        {
            return Err(RequestError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: format!("unsupported base {:?}", base as char),
            }
            .into());
        }
        Ok(needle)
    }
}

/// Positions of every (possibly overlapping) occurrence of `needle` in `haystack`
fn find_overlapping(haystack: &[u8], needle: &[u8]) -> Vec<usize> {
    let finder = Finder::new(needle);
    let mut hits = Vec::new();
    let mut from = 0;
    while from + needle.len() <= haystack.len() {
        let Some(pos) = finder.find(&haystack[from..]) else {
            break;
        };
        hits.push(from + pos);
        from += pos + 1;
    }
    hits
}

impl PatternMatcher for LiteralMatcher {
    fn check_pattern(&self, pattern: &str) -> Result<()> {
        Self::normalize(pattern).map(|_| ())
    }

    fn find_matches(
        &self,
        window: &[u8],
        pattern: &str,
        strand: Option<Strand>,
        offset: u64,
    ) -> Result<Vec<PatternMatch>> {
        let needle = Self::normalize(pattern)?;
        if needle.len() > window.len() {
            return Ok(Vec::new());
        }
        let haystack = window.to_ascii_uppercase();
        let span = needle.len() as u64;
        let to_match = |pos: usize, strand| {
            let start = offset + pos as u64;
            PatternMatch::new(start, start + span - 1, strand)
        };

        let mut matches = Vec::new();
        if strand != Some(Strand::Negative) {
            matches.extend(
                find_overlapping(&haystack, &needle)
                    .into_iter()
                    .map(|pos| to_match(pos, Strand::Positive)),
            );
        }
        if strand != Some(Strand::Positive) {
            let reverse = reverse_complement(&needle);
            matches.extend(
                find_overlapping(&haystack, &reverse)
                    .into_iter()
                    .map(|pos| to_match(pos, Strand::Negative)),
            );
        }
        matches.sort_unstable();
        Ok(matches)
    }
}
