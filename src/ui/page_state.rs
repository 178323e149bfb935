//! Page-level state: chart data, the loading flag and the status banner.
//!
//! Kept free of egui so the submit/complete cycle can be driven from tests.

use chrono::TimeZone;

use crate::data::OhlcSource;
use crate::domain::{CandleData, ChartFormData, OhlcQueryParams, Resolution};
use crate::ui::notification::{NotificationKind, NotificationState};
use crate::ui::ui_text::UI_TEXT;
use crate::utils::app_time::AppInstant;
use crate::utils::time_utils::{next_day_timestamp, start_of_day_timestamp};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// One accepted form submission, tagged with the generation it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub generation: u64,
    pub params: OhlcQueryParams,
}

#[derive(Debug, Default)]
pub struct PageState {
    chart_data: Vec<CandleData>,
    chart_resolution: Resolution,
    /// Bumped on every replacement of `chart_data`
    data_version: u64,
    is_loading: bool,
    notification: NotificationState,
    generation: u64,
    in_flight: Option<Submission>,
}

impl PageState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chart_data(&self) -> &[CandleData] {
        &self.chart_data
    }

    pub fn chart_resolution(&self) -> Resolution {
        self.chart_resolution
    }

    pub fn data_version(&self) -> u64 {
        self.data_version
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn notification(&self) -> &NotificationState {
        &self.notification
    }

    pub fn notification_mut(&mut self) -> &mut NotificationState {
        &mut self.notification
    }

    /// Starts a load for `form`, with dates interpreted as calendar days in `tz`.
    ///
    /// `from` is the start of the first day and `to` the start of the day after
    /// the last one, so the final day is fully included. Returns `None` while a
    /// previous submission is still loading.
    ///
    /// The app passes `Local`, so a range starts at local midnight rather than
    /// UTC midnight; both bounds then use the same calendar.
    pub fn begin_submission<Tz: TimeZone>(
        &mut self,
        form: &ChartFormData,
        tz: &Tz,
    ) -> Option<Submission> {
        if self.is_loading {
            log::debug!("Submission ignored: a load is already in progress");
            return None;
        }

        self.is_loading = true;
        self.notification.dismiss();
        self.generation += 1;

        let submission = Submission {
            generation: self.generation,
            params: OhlcQueryParams {
                symbol: form.symbol.clone(),
                resolution: form.resolution,
                from: start_of_day_timestamp(form.from_date, tz),
                to: next_day_timestamp(form.to_date, tz),
            },
        };

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_fetch_requests {
            log::info!(
                "[page] submission #{} {} {} {}..{}",
                submission.generation,
                submission.params.symbol,
                submission.params.resolution,
                submission.params.from,
                submission.params.to
            );
        }

        self.in_flight = Some(submission.clone());
        Some(submission)
    }

    /// Applies the outcome of a fetch. Returns false for a stale generation,
    /// which leaves the state untouched.
    pub fn complete_submission(
        &mut self,
        generation: u64,
        result: anyhow::Result<Vec<CandleData>>,
        now: AppInstant,
    ) -> bool {
        let Some(submission) = self.in_flight.take_if(|s| s.generation == generation) else {
            log::debug!("Discarding stale fetch result (generation {generation})");
            return false;
        };

        match result {
            Ok(data) => {
                let count = data.len();
                self.replace_chart_data(data, submission.params.resolution);
                if count > 0 {
                    let message = format!(
                        "{}{}{}",
                        UI_TEXT.loaded_prefix, count, UI_TEXT.loaded_suffix
                    );
                    self.notification.show(NotificationKind::Success, message, now);
                } else {
                    self.notification
                        .show(NotificationKind::Info, UI_TEXT.no_data_for_params, now);
                }
            }
            Err(e) => {
                log::error!("Error loading chart data: {e:#}");
                self.replace_chart_data(Vec::new(), submission.params.resolution);
                let message = e.to_string();
                let message = if message.trim().is_empty() {
                    UI_TEXT.fetch_failed_fallback.to_string()
                } else {
                    message
                };
                self.notification.show(NotificationKind::Error, message, now);
            }
        }

        // Cleared last so the UI never sees "not loading" with stale data
        self.is_loading = false;
        true
    }

    /// Advances the banner timer
    pub fn tick(&mut self, now: AppInstant) -> bool {
        self.notification.tick(now)
    }

    fn replace_chart_data(&mut self, data: Vec<CandleData>, resolution: Resolution) {
        self.chart_data = data;
        self.chart_resolution = resolution;
        self.data_version += 1;
    }
}

/// Runs one submission against `source`, lifting the typed error into
/// `anyhow` for the page boundary.
pub async fn run_submission<S: OhlcSource + ?Sized>(
    source: &S,
    submission: &Submission,
) -> anyhow::Result<Vec<CandleData>> {
    let data = source.fetch_ohlc_data(&submission.params).await?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::FetchError;
    use crate::utils::app_time::now;
    use async_trait::async_trait;
    use chrono::{NaiveDate, Utc};

    fn form() -> ChartFormData {
        ChartFormData {
            symbol: "SUB-32".to_string(),
            resolution: Resolution::OneDay,
            from_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            to_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        }
    }

    fn candle(time: i64) -> CandleData {
        CandleData::new(time, 1.0, 1.5, 0.9, 1.2)
    }

    enum StubSource {
        Rows(Vec<CandleData>),
        Status(u16),
    }

    #[async_trait]
    impl OhlcSource for StubSource {
        async fn fetch_ohlc_data(
            &self,
            _params: &OhlcQueryParams,
        ) -> Result<Vec<CandleData>, FetchError> {
            match self {
                StubSource::Rows(rows) => Ok(rows.clone()),
                StubSource::Status(status) => Err(FetchError::Transport { status: *status }),
            }
        }
    }

    #[test]
    fn submission_covers_whole_days() {
        let mut page = PageState::new();
        let submission = page.begin_submission(&form(), &Utc).unwrap();

        assert!(page.is_loading());
        assert_eq!(submission.params.symbol, "SUB-32");
        assert_eq!(submission.params.from, 1_704_067_200);
        assert_eq!(submission.params.to, 1_706_745_600);
    }

    #[test]
    fn submission_is_refused_while_loading() {
        let mut page = PageState::new();
        assert!(page.begin_submission(&form(), &Utc).is_some());
        assert!(page.begin_submission(&form(), &Utc).is_none());
    }

    #[test]
    fn submission_clears_previous_notification() {
        let mut page = PageState::new();
        page.notification_mut()
            .show(NotificationKind::Error, "old", now());
        page.begin_submission(&form(), &Utc);
        assert!(!page.notification().is_visible());
    }

    #[test]
    fn success_replaces_data_and_reports_count() {
        let mut page = PageState::new();
        let submission = page.begin_submission(&form(), &Utc).unwrap();
        let version = page.data_version();

        assert!(page.complete_submission(
            submission.generation,
            Ok(vec![candle(1_000), candle(2_000)]),
            now()
        ));

        assert!(!page.is_loading());
        assert_eq!(page.chart_data().len(), 2);
        assert!(page.data_version() > version);
        let banner = page.notification().current().unwrap();
        assert_eq!(banner.kind, NotificationKind::Success);
        assert_eq!(banner.message, "Successfully loaded 2 data points.");
    }

    #[test]
    fn empty_success_is_informational() {
        let mut page = PageState::new();
        let submission = page.begin_submission(&form(), &Utc).unwrap();
        page.complete_submission(submission.generation, Ok(Vec::new()), now());

        assert!(page.chart_data().is_empty());
        let banner = page.notification().current().unwrap();
        assert_eq!(banner.kind, NotificationKind::Info);
        assert_eq!(banner.message, UI_TEXT.no_data_for_params);
    }

    #[test]
    fn failure_clears_chart_and_shows_error() {
        let mut page = PageState::new();
        let first = page.begin_submission(&form(), &Utc).unwrap();
        page.complete_submission(first.generation, Ok(vec![candle(1_000)]), now());

        let second = page.begin_submission(&form(), &Utc).unwrap();
        page.complete_submission(
            second.generation,
            Err(FetchError::Transport { status: 500 }.into()),
            now(),
        );

        assert!(!page.is_loading());
        assert!(page.chart_data().is_empty());
        let banner = page.notification().current().unwrap();
        assert_eq!(banner.kind, NotificationKind::Error);
        assert_eq!(banner.message, "API request failed with status: 500");
    }

    #[test]
    fn blank_error_message_uses_fallback() {
        let mut page = PageState::new();
        let submission = page.begin_submission(&form(), &Utc).unwrap();
        page.complete_submission(submission.generation, Err(anyhow::anyhow!("  ")), now());

        let banner = page.notification().current().unwrap();
        assert_eq!(banner.message, UI_TEXT.fetch_failed_fallback);
    }

    #[test]
    fn stale_generation_is_ignored() {
        let mut page = PageState::new();
        let submission = page.begin_submission(&form(), &Utc).unwrap();

        assert!(!page.complete_submission(submission.generation + 1, Ok(vec![candle(1)]), now()));
        assert!(page.is_loading());
        assert!(page.chart_data().is_empty());

        assert!(page.complete_submission(submission.generation, Ok(vec![candle(1)]), now()));
        // A duplicate completion for the same generation is also stale
        assert!(!page.complete_submission(submission.generation, Ok(Vec::new()), now()));
        assert_eq!(page.chart_data().len(), 1);
    }

    #[tokio::test]
    async fn run_submission_maps_source_results() {
        let mut page = PageState::new();
        let submission = page.begin_submission(&form(), &Utc).unwrap();

        let rows = StubSource::Rows(vec![candle(1_000)]);
        let data = run_submission(&rows, &submission).await.unwrap();
        assert_eq!(data.len(), 1);

        let failing = StubSource::Status(503);
        let err = run_submission(&failing, &submission).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FetchError>(),
            Some(FetchError::Transport { status: 503 })
        ));
    }
}
