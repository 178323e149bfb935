use eframe::egui::{Button, ComboBox, TextEdit, Ui};
use strum::IntoEnumIterator;

use crate::domain::{ChartFormData, Resolution};
use crate::ui::chart_form::{ChartForm, FormError};
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::UiStyleExt;
use crate::utils::time_utils::format_iso_date;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Trait for UI panels that can be rendered
pub trait Panel {
    type Event;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event>;
}

#[derive(Debug)]
pub enum ChartFormEvent {
    Submitted(ChartFormData),
    Rejected(FormError),
}

/// Netuid, resolution and date range inputs plus the load button
pub struct ChartFormPanel<'a> {
    form: &'a mut ChartForm,
    is_loading: bool,
}

impl<'a> ChartFormPanel<'a> {
    pub fn new(form: &'a mut ChartForm, is_loading: bool) -> Self {
        Self { form, is_loading }
    }

    fn render_netuid_input(&mut self, ui: &mut Ui) {
        ui.vertical(|ui| {
            ui.label_field(UI_TEXT.netuid_label);

            // Edit a scratch copy so a rejected keystroke leaves the field unchanged
            let mut text = self.form.netuid().to_string();
            let response = ui.add(
                TextEdit::singleline(&mut text)
                    .hint_text(UI_TEXT.netuid_hint)
                    .desired_width(UI_CONFIG.form_field_width),
            );

            if response.changed() && !self.form.set_netuid(&text) {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_ui_interactions {
                    log::info!("Rejected netuid input {text:?}");
                }
            }

            match self.form.validation_error() {
                Some(e) => ui.label_error(e.to_string()),
                None => ui.label_subdued(self.form.symbol()),
            }
        });
    }

    fn render_resolution_selector(&mut self, ui: &mut Ui) {
        ui.vertical(|ui| {
            ui.label_field(UI_TEXT.resolution_label);

            let mut selected = self.form.resolution();
            ComboBox::from_id_salt("resolution")
                .width(UI_CONFIG.form_field_width)
                .selected_text(selected.to_string())
                .show_ui(ui, |ui| {
                    for resolution in Resolution::iter() {
                        ui.selectable_value(&mut selected, resolution, resolution.to_string());
                    }
                });

            if selected != self.form.resolution() {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_ui_interactions {
                    log::info!("Resolution changed to {}", selected.as_api_str());
                }
                self.form.set_resolution(selected);
            }
        });
    }

    fn render_date_inputs(&mut self, ui: &mut Ui) {
        ui.vertical(|ui| {
            ui.label_field(UI_TEXT.from_date_label);
            let response = ui.add(
                TextEdit::singleline(&mut self.form.from_text)
                    .hint_text(UI_TEXT.date_hint)
                    .desired_width(UI_CONFIG.form_field_width),
            );
            if response.lost_focus() {
                self.form.commit_from_text();
            }
        });

        ui.vertical(|ui| {
            ui.label_field(UI_TEXT.to_date_label);
            let response = ui.add(
                TextEdit::singleline(&mut self.form.to_text)
                    .hint_text(UI_TEXT.date_hint)
                    .desired_width(UI_CONFIG.form_field_width),
            );
            if response.lost_focus() {
                self.form.commit_to_text();
            }
            ui.label_subdued(format!("min {}", format_iso_date(self.form.min_to_date())));
        });
    }

    fn render_submit_button(&mut self, ui: &mut Ui) -> Option<ChartFormEvent> {
        let label = if self.is_loading {
            UI_TEXT.submit_button_loading
        } else {
            UI_TEXT.submit_button
        };

        let enabled = !self.is_loading && self.form.can_submit();
        let clicked = ui
            .vertical(|ui| {
                // Line the button up with the inputs, not their labels
                ui.label_field(" ");
                ui.add_enabled(enabled, Button::new(label)).clicked()
            })
            .inner;

        if !clicked {
            return None;
        }

        // Text edits only commit on focus loss, so flush them before reading
        self.form.commit_from_text();
        self.form.commit_to_text();

        Some(match self.form.submit() {
            Ok(data) => ChartFormEvent::Submitted(data),
            Err(e) => ChartFormEvent::Rejected(e),
        })
    }
}

impl<'a> Panel for ChartFormPanel<'a> {
    type Event = ChartFormEvent;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();

        ui.horizontal_wrapped(|ui| {
            self.render_netuid_input(ui);
            ui.add_space(12.0);
            self.render_resolution_selector(ui);
            ui.add_space(12.0);
            self.render_date_inputs(ui);
            ui.add_space(12.0);
            if let Some(event) = self.render_submit_button(ui) {
                events.push(event);
            }
        });

        events
    }
}
