/// Custom Result type for motif search operations, wrapping the custom [`Error`] type
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the motifscan library, encompassing every way a search can fail.
///
/// A search either produces a complete [`SearchResult`](crate::SearchResult) or one of these
/// errors; partial pages are never returned alongside an error.
#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub enum Error {
    /// The request is malformed for its declared scope
    InvalidRequest(#[from] RequestError),
    /// The requested coordinates fall outside of the chromosome
    OutOfRange(#[from] RangeError),
    /// The sequence reader could not supply a window of bytes
    SequenceUnavailable(#[from] SequenceError),
    /// The scanner configuration is unusable
    InvalidConfig(#[from] BuilderError),
}
impl Error {
    #[must_use]
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, Self::InvalidRequest(_))
    }

    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange(_))
    }

    #[must_use]
    pub fn is_sequence_unavailable(&self) -> bool {
        matches!(self, Self::SequenceUnavailable(_))
    }
}

/// Errors raised while validating a search request, before any scanning begins
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum RequestError {
    #[error("Search type is empty")]
    MissingScope,

    #[error("Motif is empty")]
    MissingPattern,

    #[error("Motif must contain at least one base")]
    EmptyPattern,

    #[error("Genome id is empty")]
    MissingReference,

    #[error("Chromosome not provided")]
    MissingChromosome,

    #[error("Start position is empty")]
    MissingStart,

    #[error("End position is empty")]
    MissingEnd,

    /// The end of the requested range does not lie after its start
    ///
    /// # Fields
    /// * `start` - The requested start position
    /// * `end` - The requested end position
    #[error("Provided end and start are not valid: {end} <= {start}")]
    EmptyRange { start: u64, end: u64 },

    /// No chromosome with this id is known to the genome metadata
    #[error("Chromosome {0} does not exist")]
    UnknownChromosome(u64),

    /// The pattern matcher rejected the pattern
    ///
    /// # Fields
    /// * `pattern` - The offending pattern
    /// * `reason` - Why the matcher cannot search for it
    #[error("Motif {pattern:?} is not supported: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

/// Errors raised when coordinates exceed the bounds of a chromosome
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum RangeError {
    #[error("End position {end} is out of range for chromosome {chromosome} of size {size}")]
    EndBeyondChromosome {
        chromosome: String,
        end: u64,
        size: u64,
    },

    #[error("Start position {start} lies beyond end {end} on chromosome {chromosome}")]
    StartBeyondEnd {
        chromosome: String,
        start: u64,
        end: u64,
    },
}

/// Errors raised when the reference bytes for a window could not be fetched
#[derive(thiserror::Error, Debug)]
pub enum SequenceError {
    /// The sequence reader failed to read the window
    ///
    /// # Fields
    /// * `chromosome` - Name of the chromosome being read
    /// * `start` - Start of the window (inclusive)
    /// * `end` - End of the window (exclusive)
    /// * `source` - The underlying reader failure
    #[error("Failed to read reference sequence {chromosome}:{start}-{end}")]
    ReadFailed {
        chromosome: String,
        start: u64,
        end: u64,
        #[source]
        source: anyhow::Error,
    },

    /// The sequence reader returned fewer or more bytes than the window spans
    #[error("Reference sequence read of {chromosome} returned {got} bytes. Expected: {expected}")]
    ShortRead {
        chromosome: String,
        expected: u64,
        got: u64,
    },
}

/// Errors that can occur while building a [`SearchConfig`](crate::SearchConfig)
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum BuilderError {
    #[error("Maximum buffer size must be positive")]
    ZeroBufferSize,

    #[error("Default page size must be positive")]
    ZeroPageSize,
}
