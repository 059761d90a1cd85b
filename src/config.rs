//! Scanner configuration
//!
//! The configuration bounds the memory used by a single search (the maximum buffer size) and
//! supplies defaults for the per-request knobs. Every value except the buffer size may be
//! overridden by an individual [`SearchRequest`](crate::SearchRequest).

use serde::Deserialize;

use crate::error::{BuilderError, Result};

/// Default upper bound on the number of bases fetched into memory at once
pub const DEFAULT_BUFFER_SIZE: u64 = 16_000_000;

/// Default number of bases re-scanned between adjacent buffers
pub const DEFAULT_OVERLAP: u64 = 1000;

/// Default number of motifs per page
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Configuration of a [`MotifScanner`](crate::MotifScanner)
///
/// Passed to the scanner at construction so that every test or service instance can use its
/// own limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchConfig {
    /// Maximum number of bases held in memory for a single matcher call
    pub max_buffer_size: u64,

    /// Overlap between adjacent buffers when the request does not set one
    pub default_overlap: u64,

    /// Page size when the request does not set one
    pub default_page_size: usize,

    /// Whether matched bases are attached to motifs when the request does not say
    pub include_sequence: bool,
}
impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_buffer_size: DEFAULT_BUFFER_SIZE,
            default_overlap: DEFAULT_OVERLAP,
            default_page_size: DEFAULT_PAGE_SIZE,
            include_sequence: false,
        }
    }
}
impl SearchConfig {
    #[must_use]
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder::new()
    }

    /// Checks that the configuration can drive a scan
    ///
    /// Values produced by [`SearchConfigBuilder::build`] are already validated; this is meant
    /// for configurations deserialized from service settings.
    pub fn validate(&self) -> Result<()> {
        if self.max_buffer_size == 0 {
            return Err(BuilderError::ZeroBufferSize.into());
        }
        if self.default_page_size == 0 {
            return Err(BuilderError::ZeroPageSize.into());
        }
        Ok(())
    }

    /// Resolves the effective page size for a request
    ///
    /// Absent or zero page sizes fall back to the configured default.
    #[must_use]
    pub fn page_size(&self, requested: Option<usize>) -> usize {
        match requested {
            Some(size) if size > 0 => size,
            _ => self.default_page_size,
        }
    }

    /// Resolves whether matched bases are attached to motifs
    #[must_use]
    pub fn include_sequence(&self, requested: Option<bool>) -> bool {
        requested.unwrap_or(self.include_sequence)
    }

    /// Resolves the overlap for a scan over buffers of `buffer` bases
    ///
    /// A buffer shorter than the configured maximum covers the rest of the range in one pass,
    /// so there is nothing to overlap with and the overlap is zero. Otherwise the requested
    /// overlap (or the default when absent or zero) is clamped below the buffer length so
    /// that every step advances.
    #[must_use]
    pub fn overlap(&self, requested: Option<u64>, buffer: u64) -> u64 {
        if buffer < self.max_buffer_size {
            return 0;
        }
        let overlap = match requested {
            Some(overlap) if overlap > 0 => overlap,
            _ => self.default_overlap,
        };
        overlap.min(buffer.saturating_sub(1))
    }
}

/// Builder for [`SearchConfig`]
///
/// Unset values take the crate defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchConfigBuilder {
    max_buffer_size: Option<u64>,
    default_overlap: Option<u64>,
    default_page_size: Option<usize>,
    include_sequence: Option<bool>,
}
impl SearchConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    #[must_use]
    pub fn max_buffer_size(mut self, size: u64) -> Self {
        self.max_buffer_size = Some(size);
        self
    }
    #[must_use]
    pub fn default_overlap(mut self, overlap: u64) -> Self {
        self.default_overlap = Some(overlap);
        self
    }
    #[must_use]
    pub fn default_page_size(mut self, size: usize) -> Self {
        self.default_page_size = Some(size);
        self
    }
    #[must_use]
    pub fn include_sequence(mut self, include: bool) -> Self {
        self.include_sequence = Some(include);
        self
    }
    pub fn build(self) -> Result<SearchConfig> {
        let config = SearchConfig {
            max_buffer_size: self.max_buffer_size.unwrap_or(DEFAULT_BUFFER_SIZE),
            default_overlap: self.default_overlap.unwrap_or(DEFAULT_OVERLAP),
            default_page_size: self.default_page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            include_sequence: self.include_sequence.unwrap_or(false),
        };
        config.validate()?;
        Ok(config)
    }
}
