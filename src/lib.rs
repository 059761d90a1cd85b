//! # motifscan
//!
//! Paginated motif search over reference genomes too large to scan in one pass.
//!
//! A [`MotifScanner`] answers three shapes of [`SearchRequest`]: an explicit region, a whole
//! chromosome, or an entire genome. Results come back as bounded [`SearchResult`] pages whose
//! cursor resumes the search on the next call. Byte retrieval, pattern matching and chromosome
//! metadata are delegated to the [`SequenceReader`], [`PatternMatcher`] and [`GenomeMetadata`]
//! collaborators; [`InMemoryReference`] and [`LiteralMatcher`] are ready-made implementations.
//!
//! See the [`scanner`] module for a usage example.

mod config;
mod error;
mod matcher;
mod memory;
mod motif;
mod request;
pub mod scanner;
mod traits;
pub mod utils;

pub use config::{
    SearchConfig, SearchConfigBuilder, DEFAULT_BUFFER_SIZE, DEFAULT_OVERLAP, DEFAULT_PAGE_SIZE,
};
pub use error::{BuilderError, Error, RangeError, RequestError, Result, SequenceError};
pub use matcher::LiteralMatcher;
pub use memory::InMemoryReference;
pub use motif::{Chromosome, Motif, PatternMatch, SearchResult};
pub use request::{SearchRequest, SearchScope, Strand};
pub use scanner::MotifScanner;
pub use traits::{GenomeMetadata, PatternMatcher, SequenceReader};
