use async_trait::async_trait;
use reqwest::{Client, Request};

use crate::config::ApiConfig;
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::api_response::{OhlcApiResponse, transform_api_response};
use crate::data::error::FetchError;
use crate::domain::{CandleData, OhlcQueryParams};

/// Anything that can answer a history query.
/// Browser futures are not `Send`, so the bound is dropped on WASM.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait OhlcSource {
    async fn fetch_ohlc_data(
        &self,
        params: &OhlcQueryParams,
    ) -> Result<Vec<CandleData>, FetchError>;
}

/// History client over HTTP. One GET per call, no caching, no retries.
#[derive(Debug, Clone)]
pub struct HttpOhlcClient {
    client: Client,
    config: ApiConfig,
}

impl HttpOhlcClient {
    pub fn new(config: ApiConfig) -> Result<Self, FetchError> {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = {
            let builder = builder.timeout(config.timeout);
            if config.use_system_proxy {
                builder
            } else {
                builder.no_proxy()
            }
        };

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// `GET {base_url}/udf/history?symbol=..&resolution=..&from=..&to=..`
    pub fn history_request(&self, params: &OhlcQueryParams) -> Result<Request, FetchError> {
        let request = self
            .client
            .get(self.config.history_url())
            .query(&params.to_query_pairs())
            .build()?;
        Ok(request)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl OhlcSource for HttpOhlcClient {
    async fn fetch_ohlc_data(
        &self,
        params: &OhlcQueryParams,
    ) -> Result<Vec<CandleData>, FetchError> {
        let request = self.history_request(params)?;

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_fetch_requests {
            log::info!("GET {}", request.url());
        }

        let response = self.client.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Transport {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        decode_history_body(&body)
    }
}

/// Decodes a 2xx body, rejecting any payload whose status is not "ok".
pub fn decode_history_body(body: &str) -> Result<Vec<CandleData>, FetchError> {
    let payload: OhlcApiResponse = serde_json::from_str(body)?;

    if !payload.is_ok() {
        if let Some(next_time) = payload.next_time {
            log::debug!("History has no data; server suggests next bar at {next_time}");
        }
        return Err(FetchError::Upstream {
            status: payload.s,
            message: payload.errmsg,
        });
    }

    Ok(transform_api_response(&payload))
}
