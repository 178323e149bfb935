use eframe::egui;
use poll_promise::Promise;
use std::time::Duration;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::domain::CandleData;
use crate::ui::app::ChartApp;
use crate::ui::page_state::{Submission, run_submission};
use crate::utils::app_time::now;

pub(super) struct FetchCompletion {
    pub(super) submission: Submission,
    pub(super) result: anyhow::Result<Vec<CandleData>>,
    elapsed_time: Duration,
}

impl FetchCompletion {
    pub(super) fn elapsed_time(&self) -> Duration {
        self.elapsed_time
    }
}

impl ChartApp {
    /// Kicks off the fetch for an accepted submission. Only one runs at a time.
    pub(super) fn start_fetch(&mut self, submission: Submission) {
        if self.fetch_promise.is_some() {
            return;
        }

        let client = self.client.clone();

        #[cfg(not(target_arch = "wasm32"))]
        let promise = Promise::spawn_thread("ohlc_fetch", move || {
            let started = now();
            let result = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime.block_on(run_submission(&client, &submission)),
                Err(e) => Err(anyhow::Error::new(e).context("Failed to start fetch runtime")),
            };
            FetchCompletion {
                submission,
                result,
                elapsed_time: started.elapsed(),
            }
        });

        #[cfg(target_arch = "wasm32")]
        let promise = {
            let (sender, promise) = Promise::new();
            wasm_bindgen_futures::spawn_local(async move {
                let started = now();
                let result = run_submission(&client, &submission).await;
                sender.send(FetchCompletion {
                    submission,
                    result,
                    elapsed_time: started.elapsed(),
                });
            });
            promise
        };

        self.fetch_promise = Some(promise);
    }

    pub(super) fn poll_fetch(&mut self, ctx: &egui::Context) {
        let Some(promise) = self.fetch_promise.take() else {
            return;
        };

        match promise.try_take() {
            Ok(completion) => {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_fetch_requests {
                    log::info!(
                        "Fetch #{} finished in {:.2}s",
                        completion.submission.generation,
                        completion.elapsed_time().as_secs_f32()
                    );
                }

                self.page.complete_submission(
                    completion.submission.generation,
                    completion.result,
                    now(),
                );
                ctx.request_repaint();
            }
            Err(pending) => {
                self.fetch_promise = Some(pending);
                ctx.request_repaint();
            }
        }
    }
}
