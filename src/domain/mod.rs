// Domain types and value objects
pub mod candle;
pub mod query;
pub mod resolution;

// Re-export commonly used types
pub use candle::{CandleData, CandleType};
pub use query::{ChartFormData, OhlcQueryParams};
pub use resolution::Resolution;
