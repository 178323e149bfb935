use eframe::{Frame, egui};
use poll_promise::Promise;

use crate::data::HttpOhlcClient;
use crate::ui::app_async::FetchCompletion;
use crate::ui::chart_form::ChartForm;
use crate::ui::chart_view::ChartView;
use crate::ui::page_state::PageState;
use crate::ui::utils::setup_custom_visuals;
use crate::utils::app_time::now;
use crate::utils::time_utils::local_today;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

pub struct ChartApp {
    pub(super) form: ChartForm,
    pub(super) page: PageState,
    pub(super) chart_view: ChartView,
    pub(super) client: HttpOhlcClient,
    pub(super) fetch_promise: Option<Promise<FetchCompletion>>,
}

impl ChartApp {
    pub fn new(cc: &eframe::CreationContext<'_>, client: HttpOhlcClient) -> Self {
        setup_custom_visuals(&cc.egui_ctx);

        log::info!("Loading history from {}", client.config().history_url());

        Self {
            form: ChartForm::new(local_today()),
            page: PageState::new(),
            chart_view: ChartView::new(),
            client,
            fetch_promise: None,
        }
    }

    pub(super) fn is_fetching(&self) -> bool {
        self.fetch_promise.is_some()
    }
}

impl eframe::App for ChartApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        // Drop the promise first to prevent "Sender dropped" noise from the worker
        self.fetch_promise = None;
        self.chart_view.dispose();

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_shutdown {
            log::info!("Application shutdown complete.");
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        setup_custom_visuals(ctx);

        self.poll_fetch(ctx);

        let current = now();
        self.page.tick(current);
        if let Some(remaining) = self.page.notification().repaint_after(current) {
            ctx.request_repaint_after(remaining);
        }

        self.render_header_panel(ctx);
        self.render_central_panel(ctx);
    }
}
