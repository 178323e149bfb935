use eframe::egui::{Color32, RichText, Ui};
use crate::ui::config::UI_CONFIG;

/// Extension trait to add semantic styling methods directly to `egui::Ui`.
pub trait UiStyleExt {
    /// Renders small, subdued text (good for hints like "min 2024-01-01").
    fn label_subdued(&mut self, text: impl Into<String>);

    /// Renders a form field label using the configured label color.
    fn label_field(&mut self, text: impl Into<String>);

    /// Renders the page title.
    fn label_header(&mut self, text: impl Into<String>);

    /// Renders an error message (Red).
    fn label_error(&mut self, text: impl Into<String>);
}

impl UiStyleExt for Ui {
    fn label_subdued(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).small().color(UI_CONFIG.colors.subdued));
    }

    fn label_field(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).strong().color(UI_CONFIG.colors.label));
    }

    fn label_header(&mut self, text: impl Into<String>) {
        self.heading(RichText::new(text).strong().color(UI_CONFIG.colors.heading));
    }

    fn label_error(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).small().color(Color32::from_rgb(220, 38, 38)));
    }
}
