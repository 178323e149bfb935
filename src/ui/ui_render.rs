use chrono::Local;
use eframe::egui::{
    Align, Button, CentralPanel, Context, Frame, Layout, Margin, RichText, Spinner, Stroke,
    TopBottomPanel, Ui,
};

use crate::config::plot::PLOT_CONFIG;
use crate::ui::config::{BannerColors, UI_CONFIG, UI_TEXT};
use crate::ui::notification::NotificationKind;
use crate::ui::styles::UiStyleExt;
use crate::ui::ui_panels::{ChartFormEvent, ChartFormPanel, Panel};
use crate::utils::app_time::now;

use super::app::ChartApp;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

fn banner_colors(kind: NotificationKind) -> BannerColors {
    match kind {
        NotificationKind::Success => UI_CONFIG.colors.success,
        NotificationKind::Error => UI_CONFIG.colors.error,
        NotificationKind::Info => UI_CONFIG.colors.info,
    }
}

impl ChartApp {
    pub(super) fn render_header_panel(&mut self, ctx: &Context) {
        let header_frame = Frame::new()
            .fill(UI_CONFIG.colors.header_panel)
            .inner_margin(Margin::symmetric(16, 10));
        TopBottomPanel::top("header_panel")
            .frame(header_frame)
            .show(ctx, |ui| {
                ui.label_header(UI_TEXT.app_title);
                ui.label_subdued(UI_TEXT.app_subtitle);
            });
    }

    pub(super) fn render_central_panel(&mut self, ctx: &Context) {
        let central_panel_frame = Frame::new()
            .fill(UI_CONFIG.colors.central_panel)
            .inner_margin(Margin::same(16));
        CentralPanel::default()
            .frame(central_panel_frame)
            .show(ctx, |ui| {
                self.render_notification(ui);
                self.render_form(ui);
                ui.add_space(16.0);
                self.render_chart_area(ui);
            });
    }

    fn render_notification(&mut self, ui: &mut Ui) {
        let Some(notification) = self.page.notification().current() else {
            return;
        };
        let colors = banner_colors(notification.kind);
        let message = notification.message.clone();

        let mut close_clicked = false;
        Frame::new()
            .fill(colors.fill)
            .stroke(Stroke::new(1.0, colors.border))
            .corner_radius(4)
            .inner_margin(Margin::symmetric(12, 8))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(RichText::new(message).color(colors.text));
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let close = Button::new(
                            RichText::new(UI_TEXT.close_notification).color(colors.text),
                        )
                        .frame(false);
                        close_clicked = ui.add(close).clicked();
                    });
                });
            });
        ui.add_space(12.0);

        if close_clicked {
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_notification_events {
                log::info!("[notification] dismissed by user");
            }
            self.page.notification_mut().dismiss();
        }
    }

    fn render_form(&mut self, ui: &mut Ui) {
        let is_loading = self.page.is_loading() || self.is_fetching();

        let events = Frame::new()
            .fill(UI_CONFIG.colors.form_panel)
            .stroke(Stroke::new(1.0, UI_CONFIG.colors.form_border))
            .corner_radius(6)
            .inner_margin(Margin::same(12))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ChartFormPanel::new(&mut self.form, is_loading).render(ui)
            })
            .inner;

        for event in events {
            match event {
                ChartFormEvent::Submitted(form_data) => {
                    let Some(submission) = self.page.begin_submission(&form_data, &Local) else {
                        continue;
                    };
                    self.start_fetch(submission);
                }
                ChartFormEvent::Rejected(e) => {
                    self.page
                        .notification_mut()
                        .show(NotificationKind::Error, e.to_string(), now());
                }
            }
        }
    }

    fn render_chart_area(&mut self, ui: &mut Ui) {
        if self.page.is_loading() {
            ui.allocate_ui_with_layout(
                eframe::egui::vec2(ui.available_width(), PLOT_CONFIG.chart_height),
                Layout::top_down(Align::Center),
                |ui| {
                    ui.add_space(PLOT_CONFIG.chart_height / 2.0 - 24.0);
                    ui.add(Spinner::new().size(32.0));
                    ui.label_subdued(UI_TEXT.loading_chart);
                },
            );
            return;
        }

        self.chart_view.sync(
            self.page.data_version(),
            self.page.chart_data(),
            self.page.chart_resolution(),
            ui.available_width(),
        );
        self.chart_view.show(ui);
    }
}
