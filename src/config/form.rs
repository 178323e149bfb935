//! Initial values for the chart form

use crate::domain::Resolution;

pub struct FormDefaults {
    /// Netuid shown on first launch (symbol becomes `SUB-32`)
    pub netuid: &'static str,
    pub resolution: Resolution,
    /// The default range ends today and starts this many days earlier
    pub lookback_days: i64,
    /// Prefix glued in front of the netuid to form the traded symbol
    pub symbol_prefix: &'static str,
}

pub const FORM_DEFAULTS: FormDefaults = FormDefaults {
    netuid: "32",
    resolution: Resolution::OneDay,
    lookback_days: 30,
    symbol_prefix: "SUB-",
};
