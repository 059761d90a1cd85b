//! Search requests and their validation
//!
//! A [`SearchRequest`] mirrors the loosely-typed request a service receives: every field is
//! optional and the required set depends on the [`SearchScope`]. [`SearchRequest::validate`]
//! checks the request once, before any scanning begins.

use serde::{Deserialize, Serialize};

use crate::error::{RequestError, Result};

/// Orientation of a match relative to the reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Strand {
    Positive,
    Negative,
}

/// Granularity of a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchScope {
    /// An explicit `[start, end)` window on one chromosome
    Region,
    /// One chromosome (or a sub-range of it), scanned in buffers
    Chromosome,
    /// Every chromosome of a reference, in metadata order
    WholeGenome,
}

/// A motif search request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub reference_id: Option<u64>,
    pub chromosome_id: Option<u64>,
    pub start: Option<u64>,
    pub end: Option<u64>,
    #[serde(rename = "motif")]
    pub pattern: Option<String>,
    pub strand: Option<Strand>,
    #[serde(rename = "searchType")]
    pub scope: Option<SearchScope>,
    pub page_size: Option<usize>,
    pub sliding_window: Option<u64>,
    pub include_sequence: Option<bool>,
}
impl SearchRequest {
    /// Creates a request for the `[start, end)` window of one chromosome
    #[must_use]
    pub fn region(
        reference_id: u64,
        chromosome_id: u64,
        start: u64,
        end: u64,
        pattern: impl Into<String>,
    ) -> Self {
        Self {
            reference_id: Some(reference_id),
            chromosome_id: Some(chromosome_id),
            start: Some(start),
            end: Some(end),
            pattern: Some(pattern.into()),
            scope: Some(SearchScope::Region),
            ..Self::default()
        }
    }

    /// Creates a request for an entire chromosome
    #[must_use]
    pub fn chromosome(reference_id: u64, chromosome_id: u64, pattern: impl Into<String>) -> Self {
        Self {
            reference_id: Some(reference_id),
            chromosome_id: Some(chromosome_id),
            pattern: Some(pattern.into()),
            scope: Some(SearchScope::Chromosome),
            ..Self::default()
        }
    }

    /// Creates a request for an entire genome, starting at its first chromosome
    #[must_use]
    pub fn whole_genome(reference_id: u64, pattern: impl Into<String>) -> Self {
        Self {
            reference_id: Some(reference_id),
            pattern: Some(pattern.into()),
            scope: Some(SearchScope::WholeGenome),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_chromosome(mut self, chromosome_id: u64) -> Self {
        self.chromosome_id = Some(chromosome_id);
        self
    }
    #[must_use]
    pub fn with_start(mut self, start: u64) -> Self {
        self.start = Some(start);
        self
    }
    #[must_use]
    pub fn with_end(mut self, end: u64) -> Self {
        self.end = Some(end);
        self
    }
    #[must_use]
    pub fn with_strand(mut self, strand: Strand) -> Self {
        self.strand = Some(strand);
        self
    }
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }
    #[must_use]
    pub fn with_sliding_window(mut self, overlap: u64) -> Self {
        self.sliding_window = Some(overlap);
        self
    }
    #[must_use]
    pub fn with_sequence(mut self, include: bool) -> Self {
        self.include_sequence = Some(include);
        self
    }

    /// Checks that the request is well-formed for its declared scope
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] when:
    /// * the scope, pattern or reference is missing, or the pattern is empty
    /// * both `start` and `end` are given and `end <= start`
    /// * a region or chromosome request, or a whole-genome request with an `end`, has no
    ///   chromosome
    /// * a region request is missing `start` or `end`
    pub fn validate(&self) -> Result<()> {
        let scope = self.scope.ok_or(RequestError::MissingScope)?;
        match self.pattern.as_deref() {
            None => return Err(RequestError::MissingPattern.into()),
            Some("") => return Err(RequestError::EmptyPattern.into()),
            Some(_) => {}
        }
        if self.reference_id.is_none() {
            return Err(RequestError::MissingReference.into());
        }
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if end <= start {
                return Err(RequestError::EmptyRange { start, end }.into());
            }
        }
        if scope == SearchScope::WholeGenome && self.end.is_none() {
            return Ok(());
        }
        if self.chromosome_id.is_none() {
            return Err(RequestError::MissingChromosome.into());
        }
        if scope != SearchScope::Region {
            return Ok(());
        }
        if self.start.is_none() {
            return Err(RequestError::MissingStart.into());
        }
        if self.end.is_none() {
            return Err(RequestError::MissingEnd.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::Error;

    fn request_error(request: &SearchRequest) -> RequestError {
        match request.validate() {
            Err(Error::InvalidRequest(err)) => err,
            other => panic!("expected an invalid request, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_requests() {
        assert!(SearchRequest::region(1, 2, 0, 10, "ATG").validate().is_ok());
        assert!(SearchRequest::chromosome(1, 2, "ATG").validate().is_ok());
        assert!(SearchRequest::chromosome(1, 2, "ATG")
            .with_start(5)
            .validate()
            .is_ok());
        assert!(SearchRequest::whole_genome(1, "ATG").validate().is_ok());
    }

    #[test]
    fn test_missing_fields() {
        let mut request = SearchRequest::region(1, 2, 0, 10, "ATG");
        request.scope = None;
        assert_eq!(request_error(&request), RequestError::MissingScope);

        let mut request = SearchRequest::region(1, 2, 0, 10, "ATG");
        request.pattern = None;
        assert_eq!(request_error(&request), RequestError::MissingPattern);

        let request = SearchRequest::region(1, 2, 0, 10, "");
        assert_eq!(request_error(&request), RequestError::EmptyPattern);

        let mut request = SearchRequest::whole_genome(1, "ATG");
        request.reference_id = None;
        assert_eq!(request_error(&request), RequestError::MissingReference);
    }

    #[test]
    fn test_chromosome_required_outside_whole_genome() {
        let mut request = SearchRequest::chromosome(1, 2, "ATG");
        request.chromosome_id = None;
        assert_eq!(request_error(&request), RequestError::MissingChromosome);

        let mut request = SearchRequest::region(1, 2, 0, 10, "ATG");
        request.chromosome_id = None;
        assert_eq!(request_error(&request), RequestError::MissingChromosome);
    }

    #[test]
    fn test_empty_range() {
        let request = SearchRequest::region(1, 2, 10, 10, "ATG");
        assert_eq!(
            request_error(&request),
            RequestError::EmptyRange { start: 10, end: 10 }
        );

        let request = SearchRequest::chromosome(1, 2, "ATG")
            .with_start(20)
            .with_end(5);
        assert_eq!(
            request_error(&request),
            RequestError::EmptyRange { start: 20, end: 5 }
        );
    }

    #[test]
    fn test_region_needs_both_bounds() {
        let mut request = SearchRequest::region(1, 2, 0, 10, "ATG");
        request.start = None;
        assert_eq!(request_error(&request), RequestError::MissingStart);

        let mut request = SearchRequest::region(1, 2, 0, 10, "ATG");
        request.end = None;
        assert_eq!(request_error(&request), RequestError::MissingEnd);
    }

    #[test]
    fn test_whole_genome_range() {
        let request = SearchRequest::whole_genome(1, "ATG")
            .with_start(20)
            .with_end(5);
        assert_eq!(
            request_error(&request),
            RequestError::EmptyRange { start: 20, end: 5 }
        );

        // no chromosome is needed to start from the first one
        let request = SearchRequest::whole_genome(1, "ATG").with_start(20);
        assert!(request.validate().is_ok());

        // an end bounds a named chromosome
        let request = SearchRequest::whole_genome(1, "ATG").with_end(20);
        assert_eq!(request_error(&request), RequestError::MissingChromosome);
        assert!(request.with_chromosome(3).validate().is_ok());
    }

    #[test]
    fn test_wire_names() -> anyhow::Result<()> {
        let request: SearchRequest = serde_json::from_str(
            r#"{
                "referenceId": 1,
                "chromosomeId": 2,
                "start": 0,
                "end": 100,
                "motif": "tata",
                "strand": "NEGATIVE",
                "searchType": "WHOLE_GENOME",
                "pageSize": 10,
                "slidingWindow": 20,
                "includeSequence": true
            }"#,
        )?;
        assert_eq!(request.scope, Some(SearchScope::WholeGenome));
        assert_eq!(request.strand, Some(Strand::Negative));
        assert_eq!(request.pattern.as_deref(), Some("tata"));
        assert_eq!(request.page_size, Some(10));
        assert_eq!(request.sliding_window, Some(20));
        assert_eq!(request.include_sequence, Some(true));
        Ok(())
    }
}
