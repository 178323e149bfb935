use eframe::egui::{Color32, Id, LayerId, Order::Tooltip, RichText, Stroke, Ui};

#[allow(deprecated)]
use eframe::egui::show_tooltip_at_pointer;

use egui_plot::{Line, PlotPoints, PlotUi, Polygon};

use crate::config::plot::PLOT_CONFIG;
use crate::ui::chart_view::CandleBar;
use crate::ui::ui_text::UI_TEXT;
use crate::ui::utils::format_price;
use crate::utils::time_utils::epoch_sec_to_local;

/// Context passed to every layer during rendering.
pub struct LayerContext<'a> {
    pub bars: &'a [CandleBar],
    /// Body width in plot units (seconds)
    pub body_width: f64,
}

/// A standardized layer in the plot stack.
pub trait PlotLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext);
}

// ============================================================================
// 1. WICK LAYER (high/low lines)
// ============================================================================
pub struct WickLayer;

impl PlotLayer for WickLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        for bar in ctx.bars {
            let points = PlotPoints::new(vec![[bar.x, bar.low], [bar.x, bar.high]]);
            plot_ui.line(
                Line::new("Wicks", points)
                    .color(bar.wick_color)
                    .width(PLOT_CONFIG.wick_width),
            );
        }
    }
}

// ============================================================================
// 2. BODY LAYER (open/close boxes)
// ============================================================================
pub struct BodyLayer;

impl PlotLayer for BodyLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        let half_w = ctx.body_width / 2.0;

        for bar in ctx.bars {
            let (bottom, top) = (bar.body_bottom, bar.body_top);

            // Open == close has no area to fill, draw it as a tick instead
            if top <= bottom {
                let points = PlotPoints::new(vec![[bar.x - half_w, top], [bar.x + half_w, top]]);
                plot_ui.line(Line::new("Candles", points).color(bar.color).width(1.0));
                continue;
            }

            let points = PlotPoints::new(vec![
                [bar.x - half_w, bottom],
                [bar.x + half_w, bottom],
                [bar.x + half_w, top],
                [bar.x - half_w, top],
            ]);

            let stroke = if PLOT_CONFIG.body_border_visible {
                Stroke::new(1.0, bar.color)
            } else {
                Stroke::NONE
            };

            plot_ui.polygon(
                Polygon::new("Candles", points)
                    .fill_color(bar.color)
                    .stroke(stroke),
            );
        }
    }
}

// ============================================================================
// 3. HOVER LAYER (OHLC tooltip)
// ============================================================================
pub struct HoverLayer;

impl PlotLayer for HoverLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        let Some(pointer) = plot_ui.pointer_coordinate() else {
            return;
        };
        let Some(bar) = bar_at(ctx.bars, pointer.x, ctx.body_width / 2.0) else {
            return;
        };

        let tooltip_layer = LayerId::new(Tooltip, Id::new("candle_tooltips"));
        let color = bar.color;
        let time_label = epoch_sec_to_local(bar.x as i64);

        #[allow(deprecated)]
        show_tooltip_at_pointer(
            plot_ui.ctx(),
            tooltip_layer,
            Id::new(("candle_tooltip", bar.x.to_bits())),
            |ui: &mut Ui| {
                ui.label(RichText::new(time_label).strong().color(PLOT_CONFIG.text_color));
                ui.separator();
                for (label, value) in [
                    (UI_TEXT.tooltip_open, bar.open),
                    (UI_TEXT.tooltip_high, bar.high),
                    (UI_TEXT.tooltip_low, bar.low),
                    (UI_TEXT.tooltip_close, bar.close),
                ] {
                    ui.label(RichText::new(format!("{label}: {}", format_price(value))).color(color));
                }
            },
        );
    }
}

/// Bar whose body spans `x`. Bars are sorted by time.
pub fn bar_at(bars: &[CandleBar], x: f64, half_width: f64) -> Option<&CandleBar> {
    let idx = bars.partition_point(|bar| bar.x + half_width < x);
    bars.get(idx).filter(|bar| (bar.x - x).abs() <= half_width)
}

// Keeps the legend/tooltip palette in one place
pub fn candle_colors(bullish: bool) -> (Color32, Color32) {
    if bullish {
        (PLOT_CONFIG.up_color, PLOT_CONFIG.wick_up_color)
    } else {
        (PLOT_CONFIG.down_color, PLOT_CONFIG.wick_down_color)
    }
}
