use log::{debug, trace};

use super::{MotifScanner, Query};
use crate::{
    error::{RangeError, Result},
    Chromosome, GenomeMetadata, PatternMatcher, SearchResult, SequenceReader,
};

/// The chromosome following `current` in metadata order
fn next_chromosome<'c>(
    chromosomes: &'c [Chromosome],
    current: &Chromosome,
) -> Option<&'c Chromosome> {
    chromosomes
        .iter()
        .position(|c| c.id == current.id)
        .and_then(|i| chromosomes.get(i + 1))
}

impl<R, M, G> MotifScanner<R, M, G>
where
    R: SequenceReader,
    M: PatternMatcher,
    G: GenomeMetadata,
{
    /// Collects up to a page of motifs across the chromosomes of a reference
    ///
    /// The scan starts at `start` on the given chromosome (or on the first chromosome of the
    /// reference) and continues from position 0 on each following chromosome until the page
    /// is full. An `end` inside the starting chromosome restricts the search to
    /// `[start, end)` of that chromosome alone.
    ///
    /// The result names the chromosome its cursor refers to. When every chromosome has been
    /// scanned the cursor is exhausted and the last chromosome scanned is reported.
    pub(crate) fn scan_genome(
        &self,
        query: &Query,
        chromosome_id: Option<u64>,
        start: Option<u64>,
        end: Option<u64>,
        page_size: Option<usize>,
    ) -> Result<SearchResult> {
        let page_size = self.config.page_size(page_size);
        let mut start = start.unwrap_or(0);

        let resolved = match chromosome_id {
            Some(id) => Some(self.resolve_chromosome(id)?),
            None => self
                .metadata
                .chromosomes_of(query.reference_id)
                .into_iter()
                .next(),
        };
        let Some(first) = resolved else {
            debug!("Reference {} has no chromosomes", query.reference_id);
            return Ok(SearchResult::exhausted(None));
        };

        if let Some(end) = end {
            if end > first.size {
                return Err(RangeError::EndBeyondChromosome {
                    chromosome: first.name.clone(),
                    end,
                    size: first.size,
                }
                .into());
            }
            if end < first.size {
                debug!("End {end} lies within {}, searching it alone", first.name);
                return self.scan_chromosome(
                    query,
                    &first,
                    Some(start),
                    Some(end),
                    Some(page_size),
                );
            }
        }

        let chromosomes = self.metadata.chromosomes_of(query.reference_id);
        let mut motifs = Vec::with_capacity(page_size.min(1024));
        let mut current = Some(first);
        let mut last: Option<(Chromosome, Option<u64>)> = None;
        while motifs.len() < page_size {
            let Some(chromosome) = current.take() else {
                break;
            };
            trace!(
                "Scanning {} from {start} with {} motifs left to find",
                chromosome.name,
                page_size - motifs.len()
            );
            let page = self.scan_chromosome(
                query,
                &chromosome,
                Some(start),
                None,
                Some(page_size - motifs.len()),
            )?;
            motifs.extend(page.motifs);
            current = next_chromosome(&chromosomes, &chromosome).cloned();
            last = Some((chromosome, page.position));
            start = 0;
        }

        let (chromosome_id, position) = match (last, current) {
            // the page filled part way through a chromosome
            (Some((chromosome, Some(position))), _) => (Some(chromosome.id), Some(position)),
            // the page filled exactly at the end of a chromosome
            (Some(_), Some(next)) if motifs.len() >= page_size => (Some(next.id), Some(0)),
            (Some((chromosome, None)), _) => (Some(chromosome.id), None),
            (None, _) => (None, None),
        };
        Ok(SearchResult::new(motifs, chromosome_id, position))
    }
}

#[cfg(test)]
mod testing {
    use super::super::fixtures::{planted, scanner_with};
    use super::*;
    use crate::{Error, InMemoryReference, RequestError, SearchConfig, Strand};
    use anyhow::Result;

    fn query(pattern: &str) -> Query<'_> {
        Query {
            reference_id: 1,
            pattern,
            strand: Some(Strand::Positive),
            include_sequence: false,
            sliding_window: None,
        }
    }

    fn hits(page: &SearchResult) -> Vec<(u64, u64)> {
        page.motifs.iter().map(|m| (m.chromosome_id, m.start)).collect()
    }

    fn three_chromosomes() -> InMemoryReference {
        InMemoryReference::new(1)
            .with_chromosome("chr1", planted(50, &[10, 30], b"ACCA"))
            .with_chromosome("chr2", planted(50, &[], b"ACCA"))
            .with_chromosome("chr3", planted(50, &[5], b"ACCA"))
    }

    #[test]
    fn test_next_chromosome() {
        let reference = three_chromosomes();
        let chromosomes = reference.chromosomes();
        assert_eq!(next_chromosome(chromosomes, &chromosomes[0]).map(|c| c.id), Some(2));
        assert_eq!(next_chromosome(chromosomes, &chromosomes[1]).map(|c| c.id), Some(3));
        assert!(next_chromosome(chromosomes, &chromosomes[2]).is_none());
    }

    #[test]
    fn test_crosses_chromosomes() -> Result<()> {
        let reference = three_chromosomes();
        let scanner = scanner_with(SearchConfig::default(), &reference);

        let page = scanner.scan_genome(&query("ACCA"), None, None, None, Some(10))?;
        assert_eq!(hits(&page), vec![(1, 10), (1, 30), (3, 5)]);
        assert!(page.is_exhausted());
        assert_eq!(page.chromosome_id, Some(3));
        Ok(())
    }

    #[test]
    fn test_cursor_within_chromosome() -> Result<()> {
        let reference = three_chromosomes();
        let scanner = scanner_with(SearchConfig::default(), &reference);

        let page = scanner.scan_genome(&query("ACCA"), None, None, None, Some(1))?;
        assert_eq!(hits(&page), vec![(1, 10)]);
        assert_eq!(page.chromosome_id, Some(1));
        assert_eq!(page.position, Some(11));
        Ok(())
    }

    #[test]
    fn test_cursor_moves_to_next_chromosome() -> Result<()> {
        let reference = three_chromosomes();
        let scanner = scanner_with(SearchConfig::default(), &reference);

        // the page fills on the last motif of chr1
        let page = scanner.scan_genome(&query("ACCA"), None, None, None, Some(2))?;
        assert_eq!(hits(&page), vec![(1, 10), (1, 30)]);
        assert_eq!(page.chromosome_id, Some(2));
        assert_eq!(page.position, Some(0));

        let page = scanner.scan_genome(&query("ACCA"), Some(2), Some(0), None, Some(2))?;
        assert_eq!(hits(&page), vec![(3, 5)]);
        assert!(page.is_exhausted());
        Ok(())
    }

    #[test]
    fn test_resume_from_chromosome_and_position() -> Result<()> {
        let reference = three_chromosomes();
        let scanner = scanner_with(SearchConfig::default(), &reference);

        let page = scanner.scan_genome(&query("ACCA"), Some(1), Some(11), None, Some(10))?;
        assert_eq!(hits(&page), vec![(1, 30), (3, 5)]);
        Ok(())
    }

    #[test]
    fn test_end_within_chromosome_searches_it_alone() -> Result<()> {
        let reference = three_chromosomes();
        let scanner = scanner_with(SearchConfig::default(), &reference);

        let page = scanner.scan_genome(&query("ACCA"), Some(1), Some(0), Some(20), Some(10))?;
        assert_eq!(hits(&page), vec![(1, 10)]);
        assert_eq!(page.chromosome_id, Some(1));

        let err = scanner
            .scan_genome(&query("ACCA"), Some(1), Some(0), Some(51), Some(10))
            .unwrap_err();
        assert!(err.is_out_of_range());
        Ok(())
    }

    #[test]
    fn test_empty_genome() -> Result<()> {
        let reference = InMemoryReference::new(1);
        let scanner = scanner_with(SearchConfig::default(), &reference);

        let page = scanner.scan_genome(&query("ACCA"), None, None, None, None)?;
        assert!(page.motifs.is_empty());
        assert!(page.is_exhausted());
        assert_eq!(page.chromosome_id, None);
        Ok(())
    }

    #[test]
    fn test_no_matches_anywhere() -> Result<()> {
        let reference = three_chromosomes();
        let scanner = scanner_with(SearchConfig::default(), &reference);

        let page = scanner.scan_genome(&query("TTTT"), None, None, None, None)?;
        assert!(page.motifs.is_empty());
        assert!(page.is_exhausted());
        assert_eq!(page.chromosome_id, Some(3));
        Ok(())
    }

    #[test]
    fn test_unknown_chromosome() {
        let reference = three_chromosomes();
        let scanner = scanner_with(SearchConfig::default(), &reference);

        let err = scanner
            .scan_genome(&query("ACCA"), Some(9), None, None, None)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidRequest(RequestError::UnknownChromosome(9))
        ));
    }
}
