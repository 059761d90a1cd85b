use anyhow::Result;
use motifscan::{InMemoryReference, LiteralMatcher, MotifScanner, SearchConfig, SearchRequest};
use rand::{rngs::SmallRng, Rng, SeedableRng};

/// Builds a reference of random chromosomes
fn random_reference(n_chromosomes: usize, size: usize, seed: u64) -> InMemoryReference {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut reference = InMemoryReference::new(1);
    for i in 0..n_chromosomes {
        let sequence: Vec<u8> = (0..size).map(|_| b"ACGT"[rng.random_range(0..4)]).collect();
        reference.add_chromosome(&format!("chr{}", i + 1), sequence);
    }
    reference
}

fn main() -> Result<()> {
    let pattern = std::env::args().nth(1).unwrap_or("TATAAA".to_string());
    let page_size: usize = std::env::args().nth(2).unwrap_or("5".to_string()).parse()?;
    let buffer_size: u64 = std::env::args()
        .nth(3)
        .unwrap_or("4096".to_string())
        .parse()?;

    let reference = random_reference(3, 20_000, 42);
    let config = SearchConfig::builder()
        .max_buffer_size(buffer_size)
        .default_overlap(64)
        .include_sequence(true)
        .build()?;
    let scanner = MotifScanner::new(config, &reference, LiteralMatcher, &reference)?;

    let mut request = Some(SearchRequest::whole_genome(1, pattern).with_page_size(page_size));
    let mut n_pages = 0;
    let mut n_motifs = 0;
    while let Some(current) = request {
        let page = scanner.search(&current)?;
        n_pages += 1;
        n_motifs += page.page_size;
        println!("{}", serde_json::to_string(&page)?);
        request = page.resume(&current);
    }
    println!("Pages: {n_pages}, motifs: {n_motifs}");

    Ok(())
}
