//! # scanner
//!
//! The [`MotifScanner`] answers paginated motif searches over sequences far larger than a
//! single in-memory buffer. It is layered, leaves first:
//!
//! * the region scanner fetches one explicit `[start, end)` window and hands it to the
//!   [`PatternMatcher`],
//! * the chromosome scanner walks a chromosome in overlapping buffers of at most
//!   [`SearchConfig::max_buffer_size`] bases, de-duplicating matches seen twice in an overlap,
//! * the genome scanner stitches chromosome pages together in metadata order.
//!
//! Every call is sequential and keeps no state between calls: a page ends with a cursor that
//! the caller passes back to continue where the previous page stopped.
//!
//! ## Usage
//!
//! ```rust
//! use motifscan::{InMemoryReference, LiteralMatcher, MotifScanner, SearchConfig, SearchRequest};
//!
//! let reference = InMemoryReference::new(1)
//!     .with_chromosome("chr1", "GGATGGGGGGATGGG")
//!     .with_chromosome("chr2", "ATGAAAAAAAAAAAA");
//!
//! let config = SearchConfig::default();
//! let scanner = MotifScanner::new(config, &reference, LiteralMatcher, &reference)?;
//!
//! let mut request = Some(SearchRequest::whole_genome(1, "ATG").with_page_size(2));
//! let mut found = Vec::new();
//! while let Some(current) = request {
//!     let page = scanner.search(&current)?;
//!     found.extend(page.motifs.iter().map(|m| (m.chromosome_id, m.start)));
//!     request = page.resume(&current);
//! }
//! assert_eq!(found, vec![(1, 2), (1, 10), (2, 0)]);
//! # Ok::<(), motifscan::Error>(())
//! ```

mod chromosome;
mod genome;
mod region;

use log::debug;

use crate::{
    error::{RequestError, Result},
    Chromosome, GenomeMetadata, Motif, PatternMatcher, SearchConfig, SearchRequest, SearchResult,
    SearchScope, SequenceReader, Strand,
};

/// The validated, scope-independent part of a request
#[derive(Debug, Clone, Copy)]
pub(crate) struct Query<'a> {
    pub reference_id: u64,
    pub pattern: &'a str,
    pub strand: Option<Strand>,
    pub include_sequence: bool,
    pub sliding_window: Option<u64>,
}

/// Paginated motif search over a reference genome
///
/// The scanner only holds its configuration and read-only collaborators, so a single instance
/// can serve concurrent searches whenever the collaborators are `Sync`.
#[derive(Debug, Clone)]
pub struct MotifScanner<R, M, G> {
    config: SearchConfig,
    reader: R,
    matcher: M,
    metadata: G,
}
impl<R, M, G> MotifScanner<R, M, G>
where
    R: SequenceReader,
    M: PatternMatcher,
    G: GenomeMetadata,
{
    /// Creates a scanner from a configuration and its three collaborators
    ///
    /// # Arguments
    ///
    /// * `config` - Buffer limit and request defaults
    /// * `reader` - Source of reference bytes
    /// * `matcher` - Pattern matcher applied to each buffer
    /// * `metadata` - Chromosome lookup and ordering
    ///
    /// # Errors
    ///
    /// * `InvalidConfig` - if the buffer or page size is zero
    pub fn new(config: SearchConfig, reader: R, matcher: M, metadata: G) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            reader,
            matcher,
            metadata,
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Runs a search, dispatching on the request scope
    ///
    /// The request is validated once, before any bytes are fetched.
    ///
    /// # Errors
    ///
    /// * `InvalidRequest` - if the request is malformed for its scope, names an unknown
    ///   chromosome, or carries a pattern the matcher rejects
    /// * `OutOfRange` - if the coordinates exceed the chromosome
    /// * `SequenceUnavailable` - if a buffer could not be read
    pub fn search(&self, request: &SearchRequest) -> Result<SearchResult> {
        request.validate()?;
        let scope = request.scope.ok_or(RequestError::MissingScope)?;
        let query = Query {
            reference_id: request.reference_id.ok_or(RequestError::MissingReference)?,
            pattern: request
                .pattern
                .as_deref()
                .ok_or(RequestError::MissingPattern)?,
            strand: request.strand,
            include_sequence: self.config.include_sequence(request.include_sequence),
            sliding_window: request.sliding_window,
        };
        self.matcher.check_pattern(query.pattern)?;
        debug!(
            "{scope:?} search for {} on reference {} (chromosome {:?}, start {:?}, end {:?})",
            query.pattern, query.reference_id, request.chromosome_id, request.start, request.end
        );

        match scope {
            SearchScope::Region => {
                let chromosome = self.require_chromosome(request.chromosome_id)?;
                let start = request.start.ok_or(RequestError::MissingStart)?;
                let page = self.scan_region(&query, &chromosome, start, request.end)?;
                Ok(cap_region_page(
                    page,
                    self.config.page_size(request.page_size),
                    &chromosome,
                ))
            }
            SearchScope::Chromosome => {
                let chromosome = self.require_chromosome(request.chromosome_id)?;
                self.scan_chromosome(
                    &query,
                    &chromosome,
                    request.start,
                    request.end,
                    request.page_size,
                )
            }
            SearchScope::WholeGenome => self.scan_genome(
                &query,
                request.chromosome_id,
                request.start,
                request.end,
                request.page_size,
            ),
        }
    }

    /// Finds every occurrence of `pattern` within `[start, end)` of a chromosome
    ///
    /// The window is read in one piece and the matches are not paginated.
    pub fn fill_region(
        &self,
        reference_id: u64,
        chromosome: &Chromosome,
        start: u64,
        end: u64,
        pattern: &str,
        strand: Option<Strand>,
    ) -> Result<Vec<Motif>> {
        if pattern.is_empty() {
            return Err(RequestError::EmptyPattern.into());
        }
        if end <= start {
            return Err(RequestError::EmptyRange { start, end }.into());
        }
        self.matcher.check_pattern(pattern)?;
        let query = Query {
            reference_id,
            pattern,
            strand,
            include_sequence: self.config.include_sequence,
            sliding_window: None,
        };
        Ok(self
            .scan_region(&query, chromosome, start, Some(end))?
            .motifs)
    }

    fn require_chromosome(&self, chromosome_id: Option<u64>) -> Result<Chromosome> {
        let id = chromosome_id.ok_or(RequestError::MissingChromosome)?;
        self.resolve_chromosome(id)
    }

    fn resolve_chromosome(&self, chromosome_id: u64) -> Result<Chromosome> {
        self.metadata
            .chromosome_by_id(chromosome_id)
            .ok_or_else(|| RequestError::UnknownChromosome(chromosome_id).into())
    }
}

/// Caps a region page at the page size
///
/// A truncated page resumes one base after the start of the last motif it returns, so
/// matches overlapping that motif are not skipped.
fn cap_region_page(
    mut page: SearchResult,
    page_size: usize,
    chromosome: &Chromosome,
) -> SearchResult {
    if page.motifs.len() <= page_size {
        return page;
    }
    page.motifs.truncate(page_size);
    page.page_size = page.motifs.len();
    page.position = page
        .motifs
        .last()
        .map(|m| m.start + 1)
        .filter(|&next| next <= chromosome.size);
    page
}

#[cfg(test)]
pub(crate) mod fixtures {
    use anyhow::bail;
    use parking_lot::Mutex;

    use super::MotifScanner;
    use crate::{InMemoryReference, LiteralMatcher, SearchConfig, SequenceReader};

    pub type TestScanner<'a> =
        MotifScanner<&'a InMemoryReference, LiteralMatcher, &'a InMemoryReference>;

    /// A `G`-only sequence of `size` bases with `motif` written at each position
    pub fn planted(size: usize, positions: &[usize], motif: &[u8]) -> Vec<u8> {
        let mut sequence = vec![b'G'; size];
        for &pos in positions {
            sequence[pos..pos + motif.len()].copy_from_slice(motif);
        }
        sequence
    }

    /// Reference 1 holding a single chromosome `chr1`
    pub fn single(sequence: impl Into<Vec<u8>>) -> InMemoryReference {
        InMemoryReference::new(1).with_chromosome("chr1", sequence)
    }

    pub fn scanner_with(config: SearchConfig, reference: &InMemoryReference) -> TestScanner<'_> {
        MotifScanner::new(config, reference, LiteralMatcher, reference)
            .expect("test configurations are valid")
    }

    pub struct FailingReader;
    impl SequenceReader for FailingReader {
        fn read_bytes(&self, _: u64, _: &str, _: u64, _: u64) -> anyhow::Result<Vec<u8>> {
            bail!("connection reset by peer")
        }
    }

    /// Returns one base less than requested
    pub struct ShortReader;
    impl SequenceReader for ShortReader {
        fn read_bytes(&self, _: u64, _: &str, start: u64, end: u64) -> anyhow::Result<Vec<u8>> {
            Ok(vec![b'G'; (end - start).saturating_sub(1) as usize])
        }
    }

    /// Records every window requested from the wrapped reference
    pub struct RecordingReader<'a> {
        inner: &'a InMemoryReference,
        windows: Mutex<Vec<(u64, u64)>>,
    }
    impl<'a> RecordingReader<'a> {
        pub fn new(inner: &'a InMemoryReference) -> Self {
            Self {
                inner,
                windows: Mutex::new(Vec::new()),
            }
        }

        pub fn windows(&self) -> Vec<(u64, u64)> {
            self.windows.lock().clone()
        }
    }
    impl SequenceReader for RecordingReader<'_> {
        fn read_bytes(
            &self,
            reference_id: u64,
            chromosome: &str,
            start: u64,
            end: u64,
        ) -> anyhow::Result<Vec<u8>> {
            self.windows.lock().push((start, end));
            self.inner.read_bytes(reference_id, chromosome, start, end)
        }
    }
}
