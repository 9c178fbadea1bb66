pub mod analyzer;
pub mod config;
pub mod model;
pub mod normalizer;
pub mod parser;
pub mod pipeline;
pub mod report;
pub mod source;
pub mod utils;

pub use model::{CanonicalUnit, MeasureUnit, NormalizedOffer, RawOfferRecord};
pub use normalizer::standardize_offer;
pub use pipeline::{normalize_batch, normalize_batch_parallel, normalize_one, NormalizationPipeline};
