//! Candlestick chart with an owned, data-scoped chart instance.
//!
//! `ChartView` moves through `NoChart -> Chart(instance) -> Disposed`. Each new
//! data version tears the current instance down and builds a fresh one, so
//! the plot's pan/zoom memory never leaks from one data set into the next.

use eframe::egui::{self, Align, Frame, Layout, RichText, Stroke, Ui};
use egui_plot::{AxisHints, GridInput, GridMark, HPlacement, Plot};
use thiserror::Error;

use crate::config::plot::PLOT_CONFIG;
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::domain::{CandleData, CandleType, Resolution};
use crate::ui::plot_layers::{
    BodyLayer, HoverLayer, LayerContext, PlotLayer, WickLayer, candle_colors,
};
use crate::ui::ui_text::UI_TEXT;
use crate::ui::utils::format_price;
use crate::utils::time_utils::epoch_sec_to_label;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    #[error("chart instance #{0} is already disposed")]
    AlreadyDisposed(u64),
}

/// Plot-ready geometry for one candle. `x` is the bucket start in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct CandleBar {
    pub x: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub body_bottom: f64,
    pub body_top: f64,
    pub color: egui::Color32,
    pub wick_color: egui::Color32,
}

impl From<&CandleData> for CandleBar {
    fn from(candle: &CandleData) -> Self {
        let (body_bottom, body_top) = candle.body_range();
        let (color, wick_color) = candle_colors(candle.candle_type() == CandleType::Bullish);
        Self {
            x: candle.time_secs(),
            open: candle.open,
            high: candle.high,
            low: candle.low,
            close: candle.close,
            body_bottom,
            body_top,
            color,
            wick_color,
        }
    }
}

/// Plot bounds that show every loaded candle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl FitBounds {
    pub fn from_bars(bars: &[CandleBar], body_width: f64) -> Option<Self> {
        let first = bars.first()?;
        let last = bars.last()?;

        let (y_min, y_max) = bars.iter().fold((f64::MAX, f64::MIN), |(lo, hi), bar| {
            (lo.min(bar.low), hi.max(bar.high))
        });

        // Flat series still need some vertical room
        let span = (y_max - y_min).max(y_max.abs() * 0.01).max(f64::EPSILON);
        let margin = span * PLOT_CONFIG.price_margin_fraction;

        Some(Self {
            x_min: first.x - body_width,
            x_max: last.x + body_width,
            y_min: y_min - margin,
            y_max: y_max + margin,
        })
    }
}

/// One live chart: candle geometry, fitted bounds and the container width.
#[derive(Debug)]
pub struct ChartInstance {
    id: u64,
    resolution: Resolution,
    bars: Vec<CandleBar>,
    body_width: f64,
    bounds: Option<FitBounds>,
    width: f32,
    height: f32,
    needs_fit: bool,
    disposed: bool,
}

impl ChartInstance {
    pub fn create(id: u64, resolution: Resolution, width: f32) -> Self {
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_chart_lifecycle {
            log::info!("[chart] create #{id} ({resolution}, width {width:.0})");
        }
        Self {
            id,
            resolution,
            bars: Vec::new(),
            body_width: resolution.interval_secs() as f64 * PLOT_CONFIG.body_width_fraction,
            bounds: None,
            width,
            height: PLOT_CONFIG.chart_height,
            needs_fit: false,
            disposed: false,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn bars(&self) -> &[CandleBar] {
        &self.bars
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn bounds(&self) -> Option<FitBounds> {
        self.bounds
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Loads the full series, converting millisecond times to seconds.
    pub fn set_data(&mut self, data: &[CandleData]) {
        let mut bars: Vec<CandleBar> = data.iter().map(CandleBar::from).collect();
        bars.sort_by(|a, b| a.x.total_cmp(&b.x));

        let spacing = min_spacing(&bars).unwrap_or(self.resolution.interval_secs() as f64);
        let interval = (self.resolution.interval_secs() as f64).min(spacing);
        self.body_width = interval * PLOT_CONFIG.body_width_fraction;
        self.bars = bars;
        self.bounds = None;
    }

    /// Scales both axes to show every loaded point on the next frame.
    pub fn fit_content(&mut self) {
        self.bounds = FitBounds::from_bars(&self.bars, self.body_width);
        self.needs_fit = self.bounds.is_some();
    }

    /// Keeps the plot width in sync with its container.
    pub fn resize(&mut self, width: f32) {
        if (self.width - width).abs() < 0.5 {
            return;
        }
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_chart_lifecycle {
            log::info!("[chart] resize #{} {:.0} -> {:.0}", self.id, self.width, width);
        }
        self.width = width;
    }

    pub fn dispose(&mut self) -> Result<(), ChartError> {
        if self.disposed {
            return Err(ChartError::AlreadyDisposed(self.id));
        }
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_chart_lifecycle {
            log::info!("[chart] dispose #{}", self.id);
        }
        self.disposed = true;
        self.bars = Vec::new();
        self.bounds = None;
        self.needs_fit = false;
        Ok(())
    }

    fn show(&mut self, ui: &mut Ui) {
        if self.disposed {
            return;
        }

        let resolution = self.resolution;
        let fit = if self.needs_fit { self.bounds } else { None };

        let ctx = LayerContext {
            bars: &self.bars,
            body_width: self.body_width,
        };

        Plot::new(("ohlc_chart", self.id))
            .width(self.width)
            .height(self.height)
            .show_background(false)
            .custom_x_axes(vec![create_time_axis(resolution)])
            .custom_y_axes(vec![create_price_axis()])
            .x_grid_spacer(move |input| time_grid_marks(input, resolution))
            // Suppress the default coordinate readout, the hover layer owns tooltips
            .label_formatter(|_, _| String::new())
            .allow_boxed_zoom(false)
            .show(ui, |plot_ui| {
                if let Some(bounds) = fit {
                    plot_ui.set_plot_bounds_x(bounds.x_min..=bounds.x_max);
                    plot_ui.set_plot_bounds_y(bounds.y_min..=bounds.y_max);
                }

                // Back to front
                let layers: Vec<Box<dyn PlotLayer>> =
                    vec![Box::new(WickLayer), Box::new(BodyLayer), Box::new(HoverLayer)];
                for layer in layers {
                    layer.render(plot_ui, &ctx);
                }
            });

        self.needs_fit = false;
    }
}

#[derive(Debug, Default)]
pub enum ChartState {
    #[default]
    NoChart,
    Chart(ChartInstance),
    Disposed,
}

#[derive(Debug, Default)]
pub struct ChartView {
    state: ChartState,
    data_version: Option<u64>,
    next_instance_id: u64,
}

impl ChartView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ChartState {
        &self.state
    }

    pub fn instance(&self) -> Option<&ChartInstance> {
        match &self.state {
            ChartState::Chart(instance) => Some(instance),
            _ => None,
        }
    }

    /// Rebuilds the chart when `data_version` changed. Returns true on rebuild.
    pub fn sync(
        &mut self,
        data_version: u64,
        data: &[CandleData],
        resolution: Resolution,
        width: f32,
    ) -> bool {
        if self.data_version == Some(data_version) {
            return false;
        }
        self.data_version = Some(data_version);
        self.teardown();

        if data.is_empty() {
            self.state = ChartState::NoChart;
            return true;
        }

        self.next_instance_id += 1;
        let mut instance = ChartInstance::create(self.next_instance_id, resolution, width);
        instance.set_data(data);
        instance.fit_content();
        self.state = ChartState::Chart(instance);
        true
    }

    /// Releases the current instance. Disposal failures are not fatal.
    fn teardown(&mut self) {
        if let ChartState::Chart(instance) = &mut self.state {
            if let Err(e) = instance.dispose() {
                log::debug!("Chart already disposed: {e}");
            }
        }
        self.state = ChartState::NoChart;
    }

    /// Final teardown (app exit / drop). Safe to call more than once.
    pub fn dispose(&mut self) {
        self.teardown();
        self.state = ChartState::Disposed;
        self.data_version = None;
    }

    pub fn show(&mut self, ui: &mut Ui) {
        let frame = Frame::new()
            .fill(PLOT_CONFIG.background_color)
            .stroke(Stroke::new(1.0, PLOT_CONFIG.border_color))
            .corner_radius(4);

        frame.show(ui, |ui| {
            ui.visuals_mut().override_text_color = Some(PLOT_CONFIG.text_color);
            match &mut self.state {
                ChartState::Chart(instance) => {
                    instance.resize(ui.available_width());
                    instance.show(ui);
                }
                ChartState::NoChart | ChartState::Disposed => show_placeholder(ui),
            }
        });
    }
}

impl Drop for ChartView {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn show_placeholder(ui: &mut Ui) {
    let size = egui::vec2(ui.available_width(), PLOT_CONFIG.chart_height);
    ui.allocate_ui_with_layout(size, Layout::top_down(Align::Center), |ui| {
        ui.add_space(PLOT_CONFIG.chart_height / 2.0 - 10.0);
        ui.label(RichText::new(UI_TEXT.no_chart_data).color(egui::Color32::GRAY));
    });
}

fn min_spacing(bars: &[CandleBar]) -> Option<f64> {
    bars.windows(2)
        .map(|pair| pair[1].x - pair[0].x)
        .filter(|gap| *gap > 0.0)
        .min_by(|a, b| a.total_cmp(b))
}

fn create_time_axis(resolution: Resolution) -> AxisHints<'static> {
    AxisHints::new_x().formatter(move |grid_mark, _range| {
        epoch_sec_to_label(grid_mark.value as i64, resolution)
    })
}

fn create_price_axis() -> AxisHints<'static> {
    AxisHints::new_y()
        .formatter(|grid_mark, _range| format_price(grid_mark.value))
        .placement(HPlacement::Right)
}

/// Calendar-friendly steps for the time axis, in seconds
const TIME_STEPS: [f64; 12] = [
    60.0,
    300.0,
    900.0,
    1_800.0,
    3_600.0,
    4.0 * 3_600.0,
    12.0 * 3_600.0,
    86_400.0,
    2.0 * 86_400.0,
    7.0 * 86_400.0,
    30.0 * 86_400.0,
    365.0 * 86_400.0,
];

/// Aim for roughly this many labelled marks across the visible range
const TARGET_TIME_MARKS: f64 = 8.0;

/// Hard ceiling on marks per frame, whatever the zoom level
const MAX_TIME_MARKS: i64 = 64;

/// Picks the smallest calendar step (never finer than one candle) that keeps
/// the label count readable. Past one year the step grows by decades.
pub fn time_grid_step(span_secs: f64, resolution: Resolution) -> f64 {
    let floor = resolution.interval_secs() as f64;
    if let Some(step) = TIME_STEPS
        .iter()
        .copied()
        .filter(|step| *step >= floor)
        .find(|step| span_secs / step <= TARGET_TIME_MARKS)
    {
        return step;
    }

    let mut step = TIME_STEPS[TIME_STEPS.len() - 1].max(floor);
    while step.is_finite() && span_secs / step > TARGET_TIME_MARKS {
        step *= 10.0;
    }
    step
}

fn time_grid_marks(input: GridInput, resolution: Resolution) -> Vec<GridMark> {
    time_grid_marks_between(input.bounds, resolution)
}

/// Marks on multiples of the chosen step inside `(min, max)`.
fn time_grid_marks_between((min, max): (f64, f64), resolution: Resolution) -> Vec<GridMark> {
    if !min.is_finite() || !max.is_finite() || max <= min {
        return Vec::new();
    }

    let step = time_grid_step(max - min, resolution);
    if !step.is_finite() {
        return Vec::new();
    }
    let start = (min / step).ceil() as i64;
    let end = (max / step).floor() as i64;
    if end.saturating_sub(start) >= MAX_TIME_MARKS {
        return Vec::new();
    }

    (start..=end)
        .map(|i| GridMark {
            value: i as f64 * step,
            step_size: step,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candles() -> Vec<CandleData> {
        vec![
            CandleData::new(86_400_000, 1.0, 1.5, 0.9, 1.2),
            CandleData::new(2 * 86_400_000, 1.2, 1.3, 0.8, 1.0),
        ]
    }

    #[test]
    fn bars_use_seconds_and_direction_colors() {
        let data = candles();
        let up = CandleBar::from(&data[0]);
        let down = CandleBar::from(&data[1]);

        assert_eq!(up.x, 86_400.0);
        assert_eq!(up.color, PLOT_CONFIG.up_color);
        assert_eq!((up.body_bottom, up.body_top), (1.0, 1.2));
        assert_eq!(down.color, PLOT_CONFIG.down_color);
        assert_eq!((down.body_bottom, down.body_top), (1.0, 1.2));
    }

    #[test]
    fn empty_data_shows_placeholder_state() {
        let mut view = ChartView::new();
        assert!(view.sync(1, &[], Resolution::OneDay, 800.0));
        assert!(matches!(view.state(), ChartState::NoChart));
        assert!(view.instance().is_none());
    }

    #[test]
    fn each_data_version_builds_a_fresh_instance() {
        let mut view = ChartView::new();
        let data = candles();

        assert!(view.sync(1, &data, Resolution::OneDay, 800.0));
        let first_id = view.instance().map(ChartInstance::id).unwrap();
        assert_eq!(view.instance().unwrap().bars().len(), 2);

        // Same version: nothing happens
        assert!(!view.sync(1, &data, Resolution::OneDay, 800.0));
        assert_eq!(view.instance().map(ChartInstance::id), Some(first_id));

        assert!(view.sync(2, &data[..1], Resolution::OneDay, 800.0));
        let second = view.instance().unwrap();
        assert_ne!(second.id(), first_id);
        assert_eq!(second.bars().len(), 1);

        // Back to no data: instance released
        assert!(view.sync(3, &[], Resolution::OneDay, 800.0));
        assert!(view.instance().is_none());
    }

    #[test]
    fn fit_content_covers_all_points() {
        let mut instance = ChartInstance::create(1, Resolution::OneDay, 640.0);
        instance.set_data(&candles());
        instance.fit_content();

        let bounds = instance.bounds().unwrap();
        assert!(bounds.x_min < 86_400.0);
        assert!(bounds.x_max > 2.0 * 86_400.0);
        assert!(bounds.y_min < 0.8);
        assert!(bounds.y_max > 1.5);
    }

    #[test]
    fn resize_tracks_container_width() {
        let mut instance = ChartInstance::create(1, Resolution::OneHour, 640.0);
        instance.resize(1024.0);
        assert_eq!(instance.width(), 1024.0);
    }

    #[test]
    fn double_dispose_is_reported_not_fatal() {
        let mut instance = ChartInstance::create(9, Resolution::OneDay, 640.0);
        instance.set_data(&candles());

        assert_eq!(instance.dispose(), Ok(()));
        assert!(instance.is_disposed());
        assert!(instance.bars().is_empty());
        assert_eq!(instance.dispose(), Err(ChartError::AlreadyDisposed(9)));

        let mut view = ChartView::new();
        view.sync(1, &candles(), Resolution::OneDay, 640.0);
        view.dispose();
        view.dispose();
        assert!(matches!(view.state(), ChartState::Disposed));

        // A remount after disposal starts over
        assert!(view.sync(1, &candles(), Resolution::OneDay, 640.0));
        assert!(view.instance().is_some());
    }

    #[test]
    fn time_steps_never_go_below_one_candle() {
        assert_eq!(time_grid_step(30.0 * 86_400.0, Resolution::OneDay), 7.0 * 86_400.0);
        assert_eq!(time_grid_step(3_600.0, Resolution::OneMinute), 900.0);
        assert_eq!(time_grid_step(3_600.0, Resolution::OneDay), 86_400.0);
    }

    #[test]
    fn extreme_zoom_out_keeps_mark_count_small() {
        for span in [1e9, 1e11, 1e13, 1e300] {
            let marks = time_grid_marks_between((0.0, span), Resolution::OneDay);
            assert!(!marks.is_empty(), "no marks for span {span}");
            assert!(marks.len() <= 10, "{} marks for span {span}", marks.len());
        }

        let year = 365.0 * 86_400.0;
        assert_eq!(time_grid_step(100.0 * year, Resolution::OneDay), 100.0 * year);
        assert!(time_grid_marks_between((0.0, f64::INFINITY), Resolution::OneDay).is_empty());
        assert!(time_grid_marks_between((f64::MIN, f64::MAX), Resolution::OneDay).is_empty());
    }
}
