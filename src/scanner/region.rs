use log::trace;

use super::{MotifScanner, Query};
use crate::{
    error::{RangeError, Result, SequenceError},
    utils::reverse_complement,
    Chromosome, GenomeMetadata, Motif, PatternMatch, PatternMatcher, SearchResult, SequenceReader,
    Strand,
};

/// Checks that `[start, end)` lies on the chromosome
pub(crate) fn check_bounds(chromosome: &Chromosome, start: u64, end: u64) -> Result<()> {
    if end > chromosome.size {
        return Err(RangeError::EndBeyondChromosome {
            chromosome: chromosome.name.clone(),
            end,
            size: chromosome.size,
        }
        .into());
    }
    if start > end {
        return Err(RangeError::StartBeyondEnd {
            chromosome: chromosome.name.clone(),
            start,
            end,
        }
        .into());
    }
    Ok(())
}

impl<R, M, G> MotifScanner<R, M, G>
where
    R: SequenceReader,
    M: PatternMatcher,
    G: GenomeMetadata,
{
    /// Searches a single window `[start, end)` of a chromosome
    ///
    /// A missing `end` defaults to the end of the chromosome. Every match the matcher reports
    /// in the window is returned.
    ///
    /// The cursor is exhausted when the window reaches the end of the chromosome. Otherwise it
    /// points one base past the last match (or at the window start when nothing matched), and
    /// is exhausted if that lies beyond the chromosome.
    pub(crate) fn scan_region(
        &self,
        query: &Query,
        chromosome: &Chromosome,
        start: u64,
        end: Option<u64>,
    ) -> Result<SearchResult> {
        let end = end.unwrap_or(chromosome.size);
        check_bounds(chromosome, start, end)?;

        let window = self.read_window(query.reference_id, chromosome, start, end)?;
        let motifs: Vec<Motif> = self
            .matcher
            .find_matches(&window, query.pattern, query.strand, start)?
            .into_iter()
            .map(|m| to_motif(m, chromosome, &window, start, query.include_sequence))
            .collect();
        trace!(
            "{}:{start}-{end} yielded {} matches",
            chromosome.name,
            motifs.len()
        );

        let position = if end == chromosome.size {
            None
        } else {
            let next = motifs.last().map_or(start, |m| m.end + 1);
            (next <= chromosome.size).then_some(next)
        };
        Ok(SearchResult::new(motifs, Some(chromosome.id), position))
    }

    /// Reads `[start, end)` through the sequence reader, translating failures
    fn read_window(
        &self,
        reference_id: u64,
        chromosome: &Chromosome,
        start: u64,
        end: u64,
    ) -> Result<Vec<u8>> {
        let window = self
            .reader
            .read_bytes(reference_id, &chromosome.name, start, end)
            .map_err(|source| SequenceError::ReadFailed {
                chromosome: chromosome.name.clone(),
                start,
                end,
                source,
            })?;
        if window.len() as u64 != end - start {
            return Err(SequenceError::ShortRead {
                chromosome: chromosome.name.clone(),
                expected: end - start,
                got: window.len() as u64,
            }
            .into());
        }
        Ok(window)
    }
}

/// Tags a raw match with its chromosome and, if requested, the matched bases
///
/// Negative-strand sequences are reported as read on that strand.
fn to_motif(
    m: PatternMatch,
    chromosome: &Chromosome,
    window: &[u8],
    offset: u64,
    include_sequence: bool,
) -> Motif {
    let sequence = if include_sequence {
        let from = m.start.saturating_sub(offset) as usize;
        let to = (m.end + 1).saturating_sub(offset) as usize;
        window.get(from..to).map(|bases| {
            let bases = match m.strand {
                Strand::Positive => bases.to_vec(),
                Strand::Negative => reverse_complement(bases),
            };
            String::from_utf8_lossy(&bases).into_owned()
        })
    } else {
        None
    };
    Motif {
        chromosome_id: chromosome.id,
        start: m.start,
        end: m.end,
        strand: m.strand,
        sequence,
    }
}
