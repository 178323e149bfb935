use serde::{Deserialize, Serialize};

use crate::domain::CandleData;
use crate::utils::time_utils::TimeUtils;

/// Status value the history endpoint uses for a usable payload
pub const STATUS_OK: &str = "ok";

/// Raw history payload: parallel arrays positionally aligned with `t`.
/// Arrays that the server omits (e.g. on `no_data`) decode as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OhlcApiResponse {
    pub s: String,
    /// Bucket start times, Unix seconds
    #[serde(default)]
    pub t: Vec<i64>,
    #[serde(default)]
    pub o: Vec<f64>,
    #[serde(default)]
    pub h: Vec<f64>,
    #[serde(default)]
    pub l: Vec<f64>,
    #[serde(default)]
    pub c: Vec<f64>,
    /// Hint for the next bar with data when `s == "no_data"`
    #[serde(rename = "nextTime", default, skip_serializing_if = "Option::is_none")]
    pub next_time: Option<i64>,
    /// Error text accompanying `s == "error"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errmsg: Option<String>,
}

impl OhlcApiResponse {
    pub fn is_ok(&self) -> bool {
        self.s == STATUS_OK
    }

    /// Number of rows that are present in every array
    pub fn aligned_len(&self) -> usize {
        [self.o.len(), self.h.len(), self.l.len(), self.c.len()]
            .into_iter()
            .fold(self.t.len(), usize::min)
    }

    pub fn is_ragged(&self) -> bool {
        let len = self.t.len();
        [self.o.len(), self.h.len(), self.l.len(), self.c.len()]
            .iter()
            .any(|&other| other != len)
    }
}

/// Converts the parallel-array payload into candle records.
///
/// A non-ok status or an empty timestamp array gives an empty vector ("no
/// data" is not an error). Ragged arrays are clamped to the shortest one so
/// no candle is ever built from a missing value.
pub fn transform_api_response(response: &OhlcApiResponse) -> Vec<CandleData> {
    if !response.is_ok() || response.t.is_empty() {
        return Vec::new();
    }

    let len = response.aligned_len();
    if response.is_ragged() {
        log::warn!(
            "History arrays are ragged (t={}, o={}, h={}, l={}, c={}); keeping {} aligned rows",
            response.t.len(),
            response.o.len(),
            response.h.len(),
            response.l.len(),
            response.c.len(),
            len
        );
    }

    let candles: Vec<CandleData> = (0..len)
        .filter_map(|i| {
            let time = response.t[i].checked_mul(TimeUtils::MS_IN_S)?;
            Some(CandleData {
                time,
                open: response.o[i],
                high: response.h[i],
                low: response.l[i],
                close: response.c[i],
            })
        })
        .collect();

    if candles.len() < len {
        log::warn!(
            "Dropped {} history rows with out-of-range timestamps",
            len - candles.len()
        );
    }
    candles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OhlcApiResponse {
        OhlcApiResponse {
            s: "ok".to_string(),
            t: vec![1000, 1010],
            o: vec![1.0, 2.0],
            h: vec![1.5, 2.5],
            l: vec![0.9, 1.9],
            c: vec![1.2, 2.2],
            ..Default::default()
        }
    }

    #[test]
    fn ok_response_becomes_candles_in_millis() {
        let candles = transform_api_response(&sample());

        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0], CandleData::new(1_000_000, 1.0, 1.5, 0.9, 1.2));
        assert_eq!(candles[1], CandleData::new(1_010_000, 2.0, 2.5, 1.9, 2.2));
    }

    #[test]
    fn non_ok_or_empty_gives_no_candles() {
        let no_data: OhlcApiResponse = serde_json::from_str(r#"{"s":"no_data"}"#).unwrap();
        assert!(transform_api_response(&no_data).is_empty());

        let empty: OhlcApiResponse = serde_json::from_str(r#"{"s":"ok","t":[]}"#).unwrap();
        assert!(transform_api_response(&empty).is_empty());

        // Arrays present but status not ok must not be read
        let mut errored = sample();
        errored.s = "error".to_string();
        assert!(transform_api_response(&errored).is_empty());
    }

    #[test]
    fn ragged_arrays_are_clamped_to_shortest() {
        let mut ragged = sample();
        ragged.t.push(1020);
        ragged.o.push(3.0);
        ragged.c.truncate(1);

        assert!(ragged.is_ragged());
        assert_eq!(ragged.aligned_len(), 1);

        let candles = transform_api_response(&ragged);
        assert_eq!(candles.len(), 1);
        assert_eq!(candles[0].time, 1_000_000);
    }

    #[test]
    fn decodes_udf_payload_with_optional_fields() {
        let json = r#"{
            "s": "no_data",
            "nextTime": 1699999200
        }"#;
        let response: OhlcApiResponse = serde_json::from_str(json).unwrap();
        assert!(!response.is_ok());
        assert_eq!(response.next_time, Some(1_699_999_200));
        assert!(response.t.is_empty());

        let json = r#"{"s":"error","errmsg":"unknown symbol"}"#;
        let response: OhlcApiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.errmsg.as_deref(), Some("unknown symbol"));
    }

    #[test]
    fn out_of_range_timestamps_are_dropped_not_overflowed() {
        let huge: OhlcApiResponse = serde_json::from_str(
            r#"{"s":"ok","t":[9223372036854776],"o":[1],"h":[1],"l":[1],"c":[1]}"#,
        )
        .unwrap();
        assert!(transform_api_response(&huge).is_empty());

        let mut mixed = sample();
        mixed.t[0] = i64::MIN / 10;
        let candles = transform_api_response(&mixed);
        assert_eq!(candles, vec![CandleData::new(1_010_000, 2.0, 2.5, 1.9, 2.2)]);
    }
}
