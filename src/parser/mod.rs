// Free-text parsers for the raw offer fields

pub mod condition;
pub mod price;
pub mod quantity;

pub use condition::{resolve_condition, BulkPrice};
pub use price::parse_price;
pub use quantity::{classify, extract_quantity, QuantityRule};
