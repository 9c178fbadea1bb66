// Batch normalization: sequential, or fanned out over blocking tasks
use crate::config::AppConfig;
use crate::model::{NormalizedOffer, RawOfferRecord};
use crate::normalizer::{normalize_all, standardize_offer};
use futures::future::join_all;
use std::ops::Range;
use std::sync::Arc;
use tracing::{info, warn};

pub const DEFAULT_CHUNK_SIZE: usize = 32;

/// Normalizes a single ad-hoc record, e.g. an offer matched to a list item.
pub fn normalize_one(record: &RawOfferRecord) -> NormalizedOffer {
    standardize_offer(record)
}

/// One normalized offer per record, in input order.
pub fn normalize_batch(records: &[RawOfferRecord]) -> Vec<NormalizedOffer> {
    normalize_all(records)
}

pub struct NormalizationPipeline {
    parallel: bool,
    chunk_size: usize,
}

impl NormalizationPipeline {
    pub fn new(parallel: bool, chunk_size: usize) -> Self {
        Self {
            parallel,
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.parallel, config.chunk_size)
    }

    pub async fn run(&self, records: Vec<RawOfferRecord>) -> Vec<NormalizedOffer> {
        info!("Normalizing {} offers (parallel: {})", records.len(), self.parallel);
        if self.parallel && records.len() > self.chunk_size {
            normalize_batch_parallel(records, self.chunk_size).await
        } else {
            normalize_batch(&records)
        }
    }
}

impl Default for NormalizationPipeline {
    fn default() -> Self {
        Self::new(true, DEFAULT_CHUNK_SIZE)
    }
}

/// Splits the batch into chunks, normalizes each on the blocking pool and
/// gathers the results back in submission order.
pub async fn normalize_batch_parallel(
    records: Vec<RawOfferRecord>,
    chunk_size: usize,
) -> Vec<NormalizedOffer> {
    let records = Arc::new(records);
    let ranges = chunk_ranges(records.len(), chunk_size);

    let tasks: Vec<_> = ranges
        .iter()
        .cloned()
        .map(|range| {
            let records = Arc::clone(&records);
            tokio::task::spawn_blocking(move || normalize_batch(&records[range]))
        })
        .collect();
    let results = join_all(tasks).await;

    let mut normalized = Vec::with_capacity(records.len());
    for (range, result) in ranges.into_iter().zip(results) {
        match result {
            Ok(chunk) => normalized.extend(chunk),
            Err(e) => {
                warn!("Worker for offers {:?} failed: {}. Normalizing inline.", range, e);
                normalized.extend(normalize_batch(&records[range]));
            }
        }
    }
    normalized
}

fn chunk_ranges(len: usize, chunk_size: usize) -> Vec<Range<usize>> {
    let step = chunk_size.max(1);
    (0..len)
        .step_by(step)
        .map(|start| start..(start + step).min(len))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(n: usize) -> Vec<RawOfferRecord> {
        (0..n)
            .map(|i| RawOfferRecord::new(&format!("Artikel {}", i), &format!("{},99", i), "500g", ""))
            .collect()
    }

    #[test]
    fn chunk_ranges_cover_everything() {
        assert_eq!(chunk_ranges(0, 4), Vec::<Range<usize>>::new());
        assert_eq!(chunk_ranges(5, 2), vec![0..2, 2..4, 4..5]);
        assert_eq!(chunk_ranges(3, 0), vec![0..1, 1..2, 2..3]);
    }

    #[test]
    fn batch_preserves_length_and_order() {
        let input = records(7);
        let output = normalize_batch(&input);
        assert_eq!(output.len(), input.len());
        for (raw, normalized) in input.iter().zip(&output) {
            assert_eq!(&normalized.raw, raw);
        }
    }

    #[test]
    fn normalize_one_matches_batch() {
        let input = records(3);
        let batch = normalize_batch(&input);
        assert_eq!(normalize_one(&input[1]), batch[1]);
    }

    #[tokio::test]
    async fn parallel_equals_sequential() {
        let input = records(101);
        let sequential = normalize_batch(&input);
        let parallel = normalize_batch_parallel(input, 8).await;
        assert_eq!(parallel, sequential);
    }

    #[tokio::test]
    async fn pipeline_runs_small_batches_inline() {
        let pipeline = NormalizationPipeline::new(true, 64);
        let output = pipeline.run(records(2)).await;
        assert_eq!(output.len(), 2);
        assert_eq!(output[0].raw.product_name, "Artikel 0");
    }
}
