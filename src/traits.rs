use auto_impl::auto_impl;

use crate::{Chromosome, PatternMatch, Result, Strand};

/// Source of raw reference bytes.
///
/// Implementations own all I/O concerns (files, object stores, caching, retries).
#[auto_impl(&, Box, Arc)]
pub trait SequenceReader {
    /// Reads the bases of `[start, end)` on the named chromosome.
    ///
    /// Must return exactly `end - start` bytes for a valid range.
    fn read_bytes(
        &self,
        reference_id: u64,
        chromosome: &str,
        start: u64,
        end: u64,
    ) -> anyhow::Result<Vec<u8>>;
}

/// Locates occurrences of a pattern within an in-memory window.
#[auto_impl(&, Box, Arc)]
pub trait PatternMatcher {
    /// Rejects patterns the matcher cannot search for.
    ///
    /// Called once per search, before any bytes are fetched.
    #[allow(unused_variables)]
    fn check_pattern(&self, pattern: &str) -> Result<()> {
        Ok(())
    }

    /// Finds every occurrence of `pattern` lying entirely within `window`.
    ///
    /// `offset` is the absolute position of the first byte of `window`; the returned matches
    /// are expressed in absolute coordinates, ordered by position. A `strand` of `None`
    /// searches both strands.
    fn find_matches(
        &self,
        window: &[u8],
        pattern: &str,
        strand: Option<Strand>,
        offset: u64,
    ) -> Result<Vec<PatternMatch>>;
}

/// Read-only chromosome metadata of the available references.
#[auto_impl(&, Box, Arc)]
pub trait GenomeMetadata {
    /// Chromosomes of a reference, in a stable order
    fn chromosomes_of(&self, reference_id: u64) -> Vec<Chromosome>;

    fn chromosome_by_id(&self, chromosome_id: u64) -> Option<Chromosome>;
}
