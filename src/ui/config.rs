use eframe::egui::Color32;

pub use crate::ui::ui_text::{UI_TEXT, UiText};

/// Banner palette for one notification kind
#[derive(Clone, Copy)]
pub struct BannerColors {
    pub fill: Color32,
    pub text: Color32,
    pub border: Color32,
}

/// UI Colors for consistent theming
#[derive(Clone, Copy)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub subdued: Color32,
    pub central_panel: Color32,
    pub header_panel: Color32,
    pub form_panel: Color32,
    pub form_border: Color32,
    pub success: BannerColors,
    pub error: BannerColors,
    pub info: BannerColors,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    /// Width of each form input column
    pub form_field_width: f32,
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::from_rgb(55, 65, 81),
        heading: Color32::from_rgb(17, 24, 39),
        subdued: Color32::from_rgb(75, 85, 99),
        central_panel: Color32::from_rgb(249, 250, 251),
        header_panel: Color32::WHITE,
        form_panel: Color32::WHITE,
        form_border: Color32::from_rgb(229, 231, 235),
        success: BannerColors {
            fill: Color32::from_rgb(240, 253, 244),
            text: Color32::from_rgb(22, 101, 52),
            border: Color32::from_rgb(134, 239, 172),
        },
        error: BannerColors {
            fill: Color32::from_rgb(254, 242, 242),
            text: Color32::from_rgb(153, 27, 27),
            border: Color32::from_rgb(252, 165, 165),
        },
        info: BannerColors {
            fill: Color32::from_rgb(239, 246, 255),
            text: Color32::from_rgb(30, 64, 175),
            border: Color32::from_rgb(147, 197, 253),
        },
    },
    form_field_width: 160.0,
};
