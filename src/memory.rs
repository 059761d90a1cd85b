//! In-memory reference genome
//!
//! [`InMemoryReference`] holds the full sequence of every chromosome and serves both as a
//! [`SequenceReader`] and as [`GenomeMetadata`]. It suits small genomes, embedding and tests;
//! genome-scale deployments implement the traits over indexed files instead.

use std::collections::HashMap;

use anyhow::{bail, Context};

use crate::{Chromosome, GenomeMetadata, SequenceReader};

#[derive(Debug, Clone, Default)]
pub struct InMemoryReference {
    reference_id: u64,
    /// Chromosomes in insertion order
    chromosomes: Vec<Chromosome>,
    /// Sequences keyed by chromosome name
    sequences: HashMap<String, Vec<u8>>,
}
impl InMemoryReference {
    #[must_use]
    pub fn new(reference_id: u64) -> Self {
        Self {
            reference_id,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn reference_id(&self) -> u64 {
        self.reference_id
    }

    /// Appends a chromosome, assigning it the next id (starting at 1)
    ///
    /// Adding a name that already exists replaces its sequence and keeps its id and position.
    pub fn add_chromosome(&mut self, name: &str, sequence: impl Into<Vec<u8>>) -> Chromosome {
        let sequence = sequence.into();
        let size = sequence.len() as u64;
        self.sequences.insert(name.to_string(), sequence);

        if let Some(existing) = self.chromosomes.iter_mut().find(|c| c.name == name) {
            existing.size = size;
            return existing.clone();
        }
        let chromosome = Chromosome::new(self.chromosomes.len() as u64 + 1, name, size);
        self.chromosomes.push(chromosome.clone());
        chromosome
    }

    #[must_use]
    pub fn with_chromosome(mut self, name: &str, sequence: impl Into<Vec<u8>>) -> Self {
        self.add_chromosome(name, sequence);
        self
    }

    #[must_use]
    pub fn chromosome(&self, name: &str) -> Option<&Chromosome> {
        self.chromosomes.iter().find(|c| c.name == name)
    }

    #[must_use]
    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.chromosomes
    }
}

impl SequenceReader for InMemoryReference {
    fn read_bytes(
        &self,
        reference_id: u64,
        chromosome: &str,
        start: u64,
        end: u64,
    ) -> anyhow::Result<Vec<u8>> {
        if reference_id != self.reference_id {
            bail!("Unknown reference {reference_id}");
        }
        let sequence = self
            .sequences
            .get(chromosome)
            .with_context(|| format!("Unknown chromosome {chromosome}"))?;
        if start > end || end > sequence.len() as u64 {
            bail!(
                "Range {start}-{end} is invalid for {chromosome} of length {}",
                sequence.len()
            );
        }
        Ok(sequence[start as usize..end as usize].to_vec())
    }
}

impl GenomeMetadata for InMemoryReference {
    fn chromosomes_of(&self, reference_id: u64) -> Vec<Chromosome> {
        if reference_id == self.reference_id {
            self.chromosomes.clone()
        } else {
            Vec::new()
        }
    }

    fn chromosome_by_id(&self, chromosome_id: u64) -> Option<Chromosome> {
        self.chromosomes
            .iter()
            .find(|c| c.id == chromosome_id)
            .cloned()
    }
}
