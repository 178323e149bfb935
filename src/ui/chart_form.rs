use chrono::{Duration, NaiveDate};
use thiserror::Error;

use crate::config::FORM_DEFAULTS;
use crate::domain::{ChartFormData, Resolution};
use crate::utils::time_utils::{format_iso_date, parse_iso_date};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please enter a NETUID")]
    MissingNetuid,
}

/// Editable form fields. The symbol is never stored: it is derived from the
/// netuid whenever it is read.
#[derive(Debug, Clone)]
pub struct ChartForm {
    netuid: String,
    resolution: Resolution,
    from_date: NaiveDate,
    to_date: NaiveDate,
    // In-progress text of the date inputs, committed on focus loss
    pub(super) from_text: String,
    pub(super) to_text: String,
}

impl ChartForm {
    /// Defaults: netuid 32, daily candles, the 30 days ending `today`.
    pub fn new(today: NaiveDate) -> Self {
        let from_date = today - Duration::days(FORM_DEFAULTS.lookback_days);
        Self {
            netuid: FORM_DEFAULTS.netuid.to_string(),
            resolution: FORM_DEFAULTS.resolution,
            from_date,
            to_date: today,
            from_text: format_iso_date(from_date),
            to_text: format_iso_date(today),
        }
    }

    pub fn netuid(&self) -> &str {
        &self.netuid
    }

    pub fn symbol(&self) -> String {
        format!("{}{}", FORM_DEFAULTS.symbol_prefix, self.netuid)
    }

    /// Accepts only all-digit strings (or empty, as an in-progress state).
    /// Anything else is ignored and the previous value kept.
    pub fn set_netuid(&mut self, value: &str) -> bool {
        if !value.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        self.netuid = value.to_string();
        true
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn set_resolution(&mut self, resolution: Resolution) {
        self.resolution = resolution;
    }

    pub fn from_date(&self) -> NaiveDate {
        self.from_date
    }

    pub fn to_date(&self) -> NaiveDate {
        self.to_date
    }

    /// Smallest date the end input will accept
    pub fn min_to_date(&self) -> NaiveDate {
        self.from_date
    }

    /// Moving the start past the end drags the end along with it.
    pub fn set_from_date(&mut self, date: NaiveDate) {
        self.from_date = date;
        self.from_text = format_iso_date(date);
        if self.to_date < date {
            self.set_to_date(date);
        }
    }

    /// The end date is clamped so it never precedes the start date.
    pub fn set_to_date(&mut self, date: NaiveDate) {
        self.to_date = date.max(self.min_to_date());
        self.to_text = format_iso_date(self.to_date);
    }

    /// Commits the start-date text; unparsable text reverts to the last valid date.
    pub fn commit_from_text(&mut self) -> bool {
        match parse_iso_date(&self.from_text) {
            Some(date) => {
                self.set_from_date(date);
                true
            }
            None => {
                self.from_text = format_iso_date(self.from_date);
                false
            }
        }
    }

    pub fn commit_to_text(&mut self) -> bool {
        match parse_iso_date(&self.to_text) {
            Some(date) => {
                self.set_to_date(date);
                true
            }
            None => {
                self.to_text = format_iso_date(self.to_date);
                false
            }
        }
    }

    /// First reason the form cannot be submitted, if any
    pub fn validation_error(&self) -> Option<FormError> {
        self.netuid.is_empty().then_some(FormError::MissingNetuid)
    }

    pub fn can_submit(&self) -> bool {
        self.validation_error().is_none()
    }

    /// Snapshot of the form for the caller. No network access happens here.
    pub fn submit(&self) -> Result<ChartFormData, FormError> {
        if let Some(e) = self.validation_error() {
            return Err(e);
        }
        Ok(ChartFormData {
            symbol: self.symbol(),
            resolution: self.resolution,
            from_date: self.from_date,
            to_date: self.to_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn defaults_cover_last_thirty_days() {
        let form = ChartForm::new(date(2024, 3, 31));
        assert_eq!(form.netuid(), "32");
        assert_eq!(form.symbol(), "SUB-32");
        assert_eq!(form.resolution(), Resolution::OneDay);
        assert_eq!(form.from_date(), date(2024, 3, 1));
        assert_eq!(form.to_date(), date(2024, 3, 31));
        assert_eq!(form.from_text, "2024-03-01");
    }

    #[test]
    fn netuid_rejects_non_digits() {
        let mut form = ChartForm::new(date(2024, 3, 31));
        assert!(form.set_netuid("123"));
        assert_eq!(form.netuid(), "123");
        assert_eq!(form.symbol(), "SUB-123");

        assert!(!form.set_netuid("12a"));
        assert_eq!(form.netuid(), "123");
        assert_eq!(form.symbol(), "SUB-123");

        assert!(!form.set_netuid("-1"));
        assert!(!form.set_netuid("1 2"));
        assert_eq!(form.netuid(), "123");
    }

    #[test]
    fn empty_netuid_is_editable_but_not_submittable() {
        let mut form = ChartForm::new(date(2024, 3, 31));
        assert!(form.set_netuid(""));
        assert_eq!(form.symbol(), "SUB-");
        assert!(!form.can_submit());
        assert_eq!(form.validation_error(), Some(FormError::MissingNetuid));
        assert_eq!(form.submit(), Err(FormError::MissingNetuid));

        assert!(form.set_netuid("7"));
        assert_eq!(form.validation_error(), None);
    }

    #[test]
    fn end_date_never_precedes_start_date() {
        let mut form = ChartForm::new(date(2024, 3, 31));

        form.set_to_date(date(2024, 2, 1));
        assert_eq!(form.to_date(), date(2024, 3, 1));
        assert_eq!(form.to_text, "2024-03-01");

        form.set_from_date(date(2024, 4, 10));
        assert_eq!(form.min_to_date(), date(2024, 4, 10));
        assert_eq!(form.to_date(), date(2024, 4, 10));
    }

    #[test]
    fn invalid_date_text_reverts() {
        let mut form = ChartForm::new(date(2024, 3, 31));
        form.from_text = "2024-13-01".to_string();
        assert!(!form.commit_from_text());
        assert_eq!(form.from_text, "2024-03-01");

        form.to_text = "2024-03-15".to_string();
        assert!(form.commit_to_text());
        assert_eq!(form.to_date(), date(2024, 3, 15));
    }

    #[test]
    fn submit_snapshots_the_fields() {
        let mut form = ChartForm::new(date(2024, 1, 31));
        form.set_netuid("7");
        form.set_resolution(Resolution::FifteenMinutes);

        let data = form.submit().unwrap();
        assert_eq!(data.symbol, "SUB-7");
        assert_eq!(data.resolution, Resolution::FifteenMinutes);
        assert_eq!(data.from_date, date(2024, 1, 1));
        assert_eq!(data.to_date, date(2024, 1, 31));

        // Later edits do not reach an already-submitted snapshot
        form.set_netuid("8");
        assert_eq!(data.symbol, "SUB-7");
    }
}
