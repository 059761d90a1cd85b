//! Matches and result pages
//!
//! Coordinates are 0-based. Windows are half-open (`[start, end)`) while a motif's `end` is the
//! last base it covers, so `end + 1` is the first base past the match.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::request::{SearchRequest, SearchScope, Strand};

/// Reference metadata for one chromosome
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chromosome {
    pub id: u64,
    pub name: String,
    /// Sequence length in bases
    pub size: u64,
}
impl Chromosome {
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>, size: u64) -> Self {
        Self {
            id,
            name: name.into(),
            size,
        }
    }
}

/// A raw match reported by a [`PatternMatcher`](crate::PatternMatcher)
///
/// Coordinates are absolute on the chromosome and `end` is inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PatternMatch {
    pub start: u64,
    pub end: u64,
    pub strand: Strand,
}
impl PatternMatch {
    #[must_use]
    pub fn new(start: u64, end: u64, strand: Strand) -> Self {
        Self { start, end, strand }
    }
}

/// An occurrence of a motif on a chromosome
///
/// Identity is `(start, end, strand)`: two motifs covering the same bases on the same strand
/// are equal regardless of the chromosome tag or attached sequence. Ordering follows the same
/// key, by start position first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Motif {
    pub chromosome_id: u64,
    pub start: u64,
    pub end: u64,
    pub strand: Strand,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sequence: Option<String>,
}
impl Motif {
    #[must_use]
    pub fn key(&self) -> (u64, u64, Strand) {
        (self.start, self.end, self.strand)
    }

    /// Number of bases covered by the motif
    #[must_use]
    pub fn span(&self) -> u64 {
        self.end - self.start + 1
    }
}
impl PartialEq for Motif {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}
impl Eq for Motif {}
impl Hash for Motif {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}
impl PartialOrd for Motif {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Motif {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// One page of search results
///
/// `position` is the resumption cursor: the start to pass with the next request, or `None`
/// once no further matches exist. For whole-genome searches `chromosome_id` names the
/// chromosome the cursor refers to; when the genome is exhausted it still names the last
/// chromosome scanned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(rename = "result")]
    pub motifs: Vec<Motif>,
    pub chromosome_id: Option<u64>,
    /// Number of motifs in this page
    pub page_size: usize,
    pub position: Option<u64>,
}
impl SearchResult {
    #[must_use]
    pub fn new(motifs: Vec<Motif>, chromosome_id: Option<u64>, position: Option<u64>) -> Self {
        Self {
            page_size: motifs.len(),
            motifs,
            chromosome_id,
            position,
        }
    }

    /// An empty page with no cursor
    #[must_use]
    pub fn exhausted(chromosome_id: Option<u64>) -> Self {
        Self::new(Vec::new(), chromosome_id, None)
    }

    /// Whether the search has no further matches to offer
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.position.is_none()
    }

    /// Builds the request fetching the page after this one
    ///
    /// Returns `None` when the cursor is exhausted or has reached the `end` of the request. A
    /// region search also ends once a page comes back empty, since the rest of the region was
    /// read in full. A whole-genome cursor that moves to another chromosome drops the `end`,
    /// which only bounded the chromosome it was given for.
    #[must_use]
    pub fn resume(&self, request: &SearchRequest) -> Option<SearchRequest> {
        let position = self.position?;
        let past_end = request.end.is_some_and(|end| position >= end);
        let mut next = request.clone();
        match request.scope? {
            SearchScope::Region => {
                if self.motifs.is_empty() || past_end {
                    return None;
                }
            }
            SearchScope::Chromosome => {
                if past_end {
                    return None;
                }
            }
            SearchScope::WholeGenome => {
                if self.chromosome_id != request.chromosome_id {
                    next.end = None;
                } else if past_end {
                    return None;
                }
                next.chromosome_id = self.chromosome_id;
            }
        }
        next.start = Some(position);
        Some(next)
    }
}
