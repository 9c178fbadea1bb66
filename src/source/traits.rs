use crate::model::{RawOfferRecord, ShoppingMatch, SourceError};

/// Supplies raw offers produced by the upstream extraction step.
#[async_trait::async_trait]
pub trait OfferSource: Send + Sync {
    async fn load_offers(&self) -> Result<Vec<RawOfferRecord>, SourceError>;
}

/// Supplies shopping-list matches produced by the upstream matcher.
#[async_trait::async_trait]
pub trait MatchSource: Send + Sync {
    async fn load_matches(&self) -> Result<Vec<ShoppingMatch>, SourceError>;
}
