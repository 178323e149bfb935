use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Candle bucket width accepted by the history endpoint.
/// `Display` gives the human label used in the selector.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter, Display,
)]
pub enum Resolution {
    #[serde(rename = "1min")]
    #[strum(to_string = "1 Minute")]
    OneMinute,
    #[serde(rename = "5min")]
    #[strum(to_string = "5 Minutes")]
    FiveMinutes,
    #[serde(rename = "15min")]
    #[strum(to_string = "15 Minutes")]
    FifteenMinutes,
    #[serde(rename = "60min")]
    #[strum(to_string = "1 Hour")]
    OneHour,
    #[default]
    #[serde(rename = "1day")]
    #[strum(to_string = "1 Day")]
    OneDay,
}

impl Resolution {
    pub const SECS_IN_MIN: i64 = 60;
    pub const SECS_IN_H: i64 = Self::SECS_IN_MIN * 60;
    pub const SECS_IN_D: i64 = Self::SECS_IN_H * 24;

    /// Wire value sent as the `resolution` query parameter
    pub fn as_api_str(&self) -> &'static str {
        match self {
            Resolution::OneMinute => "1min",
            Resolution::FiveMinutes => "5min",
            Resolution::FifteenMinutes => "15min",
            Resolution::OneHour => "60min",
            Resolution::OneDay => "1day",
        }
    }

    /// Width of one bucket in seconds
    pub fn interval_secs(&self) -> i64 {
        match self {
            Resolution::OneMinute => Self::SECS_IN_MIN,
            Resolution::FiveMinutes => Self::SECS_IN_MIN * 5,
            Resolution::FifteenMinutes => Self::SECS_IN_MIN * 15,
            Resolution::OneHour => Self::SECS_IN_H,
            Resolution::OneDay => Self::SECS_IN_D,
        }
    }

    pub fn is_intraday(&self) -> bool {
        self.interval_secs() < Self::SECS_IN_D
    }
}
