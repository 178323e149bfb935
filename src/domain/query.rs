use chrono::NaiveDate;

use crate::domain::Resolution;

/// Parameters of one history request. `from`/`to` are Unix seconds.
/// Built fresh for every request and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OhlcQueryParams {
    pub symbol: String,
    pub resolution: Resolution,
    pub from: i64,
    pub to: i64,
}

impl OhlcQueryParams {
    /// The four query pairs, in wire order
    pub fn to_query_pairs(&self) -> [(&'static str, String); 4] {
        [
            ("symbol", self.symbol.clone()),
            ("resolution", self.resolution.as_api_str().to_string()),
            ("from", self.from.to_string()),
            ("to", self.to.to_string()),
        ]
    }
}

/// Immutable snapshot of the form taken at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartFormData {
    pub symbol: String,
    pub resolution: Resolution,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}
