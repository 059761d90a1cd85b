use std::collections::BTreeSet;

use log::{debug, trace};

use super::{region::check_bounds, MotifScanner, Query};
use crate::{
    error::Result, Chromosome, GenomeMetadata, Motif, PatternMatcher, SearchResult, SequenceReader,
};

impl<R, M, G> MotifScanner<R, M, G>
where
    R: SequenceReader,
    M: PatternMatcher,
    G: GenomeMetadata,
{
    /// Collects up to a page of motifs from `[start, end)` of a chromosome
    ///
    /// The range is scanned in buffers of at most [`max_buffer_size`] bases. Each buffer starts
    /// `overlap` bases before the end of the previous one, so a motif no longer than the overlap
    /// that straddles a buffer boundary lies whole within the next buffer. Motifs seen in two
    /// buffers are kept once, and the page is ordered by position. Scanning stops once a page
    /// worth of motifs has been collected or the range is covered.
    ///
    /// The cursor is exhausted when the page is empty, or when the range runs to the end of the
    /// chromosome and was covered without dropping any motif past the page. Otherwise the next
    /// page starts one base after the start of the last motif returned, unless that lies at or
    /// past the end of the range.
    ///
    /// [`max_buffer_size`]: crate::SearchConfig::max_buffer_size
    pub(crate) fn scan_chromosome(
        &self,
        query: &Query,
        chromosome: &Chromosome,
        start: Option<u64>,
        end: Option<u64>,
        page_size: Option<usize>,
    ) -> Result<SearchResult> {
        let page_size = self.config.page_size(page_size);
        let start = start.unwrap_or(0);
        let end = end.unwrap_or(chromosome.size);
        check_bounds(chromosome, start, end)?;
        if start == end {
            return Ok(SearchResult::exhausted(Some(chromosome.id)));
        }

        let buffer = self.config.max_buffer_size.min(end - start);
        let overlap = self.config.overlap(query.sliding_window, buffer);
        let step = buffer - overlap;
        debug!(
            "Scanning {}:{start}-{end} in buffers of {buffer} with overlap {overlap} (page size {page_size})",
            chromosome.name
        );

        let mut found = BTreeSet::new();
        let mut current_start = start;
        let mut current_end = start + buffer;
        while found.len() < page_size && current_start < end {
            trace!("Buffer {}:{current_start}-{current_end}", chromosome.name);
            let window = self.scan_region(query, chromosome, current_start, Some(current_end))?;
            found.extend(window.motifs);
            current_start += step;
            current_end = (current_end + step).min(end);
        }

        let covered = current_start >= end;
        let truncated = found.len() > page_size;
        let motifs: Vec<Motif> = found.into_iter().take(page_size).collect();
        let exhausted = motifs.is_empty() || (end == chromosome.size && covered && !truncated);
        let position = if exhausted {
            None
        } else {
            motifs.last().map(|m| m.start + 1).filter(|&next| next < end)
        };
        Ok(SearchResult::new(motifs, Some(chromosome.id), position))
    }
}
