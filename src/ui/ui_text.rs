/// All user-facing strings in one place
pub struct UiText {
    pub app_title: &'static str,
    pub app_subtitle: &'static str,
    pub netuid_label: &'static str,
    pub netuid_hint: &'static str,
    pub resolution_label: &'static str,
    pub from_date_label: &'static str,
    pub to_date_label: &'static str,
    pub date_hint: &'static str,
    pub submit_button: &'static str,
    pub submit_button_loading: &'static str,
    pub loading_chart: &'static str,
    pub no_chart_data: &'static str,
    pub no_data_for_params: &'static str,
    pub loaded_prefix: &'static str,
    pub loaded_suffix: &'static str,
    pub fetch_failed_fallback: &'static str,
    pub close_notification: &'static str,
    pub tooltip_open: &'static str,
    pub tooltip_high: &'static str,
    pub tooltip_low: &'static str,
    pub tooltip_close: &'static str,
}

pub const UI_TEXT: UiText = UiText {
    app_title: "OHLC Chart",
    app_subtitle: "Select parameters and load candlestick chart data",
    netuid_label: "SUB NETUID",
    netuid_hint: "Enter NETUID",
    resolution_label: "Resolution",
    from_date_label: "From Date",
    to_date_label: "To Date",
    date_hint: "YYYY-MM-DD",
    submit_button: "Load Chart",
    submit_button_loading: "Loading...",
    loading_chart: "Loading chart data...",
    no_chart_data: "No data available. Please load chart data.",
    no_data_for_params: "No data available for the selected parameters.",
    loaded_prefix: "Successfully loaded ",
    loaded_suffix: " data points.",
    fetch_failed_fallback: "Failed to load chart data.",
    close_notification: "✖",
    tooltip_open: "O",
    tooltip_high: "H",
    tooltip_low: "L",
    tooltip_close: "C",
};
