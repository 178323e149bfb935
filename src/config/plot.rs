//! Plot visualization configuration

use eframe::egui::Color32;

pub struct PlotConfig {
    /// Chart area fill
    pub background_color: Color32,
    /// Axis label / tooltip text
    pub text_color: Color32,
    /// Border drawn around the chart frame (time scale + price scale edges)
    pub border_color: Color32,
    /// Close >= open
    pub up_color: Color32,
    /// Close < open
    pub down_color: Color32,
    pub wick_up_color: Color32,
    pub wick_down_color: Color32,
    /// Draw an outline around candle bodies
    pub body_border_visible: bool,
    /// Chart height in points
    pub chart_height: f32,
    /// Fraction of one bar interval occupied by a candle body
    pub body_width_fraction: f64,
    /// Width of the high/low wick line
    pub wick_width: f32,
    /// Fraction of the price range added above and below when fitting content
    pub price_margin_fraction: f64,
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    background_color: Color32::WHITE,
    text_color: Color32::from_rgb(0x33, 0x33, 0x33),
    border_color: Color32::from_rgb(0xd1, 0xd1, 0xd1),
    up_color: Color32::from_rgb(0x26, 0xa6, 0x9a), // Teal
    down_color: Color32::from_rgb(0xef, 0x53, 0x50), // Red
    wick_up_color: Color32::from_rgb(0x26, 0xa6, 0x9a),
    wick_down_color: Color32::from_rgb(0xef, 0x53, 0x50),
    body_border_visible: false,
    chart_height: 500.0,
    body_width_fraction: 0.7,
    wick_width: 1.0,
    price_margin_fraction: 0.05,
};
