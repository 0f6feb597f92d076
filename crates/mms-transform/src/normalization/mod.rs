//! Value normalization functions used by the transformer library.
//!
//! - **numeric**: number and price parsing
//! - **datetime**: timestamp parsing from the formats scrapers produce
//! - **url**: absolute URL validation and normalization
//! - **text**: scalar-to-text coercion and truncation

pub mod datetime;
pub mod numeric;
pub mod text;
pub mod url;

pub use datetime::parse_timestamp;
pub use numeric::{parse_number, parse_price};
pub use text::{scalar_to_text, truncate_chars};
pub use url::normalize_url;
