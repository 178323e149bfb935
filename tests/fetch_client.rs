//! End-to-end fetch behaviour against a loopback HTTP stub.

use chrono::{NaiveDate, Utc};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use ohlc_chart::app_time::now;
use ohlc_chart::ui::notification::NotificationKind;
use ohlc_chart::ui::page_state::{PageState, run_submission};
use ohlc_chart::{ApiConfig, ChartFormData, FetchError, HttpOhlcClient, OhlcSource, Resolution};

/// Serves one canned response and hands back the request line it received.
async fn serve_once(status_line: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        let request = String::from_utf8_lossy(&request);
        let request_line = request.lines().next().unwrap_or_default().to_string();

        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        let _ = tx.send(request_line);
    });

    (format!("http://{addr}"), rx)
}

fn client_for(base_url: String) -> HttpOhlcClient {
    let mut api = ApiConfig::with_base_url(base_url);
    api.use_system_proxy = false;
    HttpOhlcClient::new(api).unwrap()
}

fn form() -> ChartFormData {
    ChartFormData {
        symbol: "SUB-32".to_string(),
        resolution: Resolution::OneDay,
        from_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        to_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
    }
}

#[tokio::test]
async fn server_error_clears_chart_and_reports_status() {
    let (base_url, _request) = serve_once("500 Internal Server Error", "{}").await;
    let client = client_for(base_url);

    let mut page = PageState::new();
    let submission = page.begin_submission(&form(), &Utc).unwrap();

    let err = client.fetch_ohlc_data(&submission.params).await.unwrap_err();
    assert!(matches!(err, FetchError::Transport { status: 500 }));

    page.complete_submission(submission.generation, Err(err.into()), now());

    assert!(!page.is_loading());
    assert!(page.chart_data().is_empty());
    let banner = page.notification().current().unwrap();
    assert_eq!(banner.kind, NotificationKind::Error);
    assert_eq!(banner.message, "API request failed with status: 500");
}

#[tokio::test]
async fn ok_without_rows_is_informational() {
    let (base_url, _request) =
        serve_once("200 OK", r#"{"s":"ok","t":[],"o":[],"h":[],"l":[],"c":[]}"#).await;
    let client = client_for(base_url);

    let mut page = PageState::new();
    let submission = page.begin_submission(&form(), &Utc).unwrap();
    let result = run_submission(&client, &submission).await;
    page.complete_submission(submission.generation, result, now());

    assert!(page.chart_data().is_empty());
    let banner = page.notification().current().unwrap();
    assert_eq!(banner.kind, NotificationKind::Info);
    assert_eq!(banner.message, "No data available for the selected parameters.");
}

#[tokio::test]
async fn ok_rows_load_and_request_carries_query() {
    let (base_url, request) = serve_once(
        "200 OK",
        r#"{"s":"ok","t":[1000,1010],"o":[1,2],"h":[1.5,2.5],"l":[0.9,1.9],"c":[1.2,2.2]}"#,
    )
    .await;
    let client = client_for(base_url);

    let mut page = PageState::new();
    let submission = page.begin_submission(&form(), &Utc).unwrap();
    let result = run_submission(&client, &submission).await;
    page.complete_submission(submission.generation, result, now());

    let request_line = request.await.unwrap();
    assert!(request_line.starts_with(
        "GET /udf/history?symbol=SUB-32&resolution=1day&from=1704067200&to=1706745600 "
    ));

    let data = page.chart_data();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0].time, 1_000_000);
    assert_eq!(data[1].close, 2.2);
    let banner = page.notification().current().unwrap();
    assert_eq!(banner.kind, NotificationKind::Success);
    assert_eq!(banner.message, "Successfully loaded 2 data points.");
}

#[tokio::test]
async fn upstream_error_status_is_surfaced() {
    let (base_url, _request) =
        serve_once("200 OK", r#"{"s":"error","errmsg":"Unknown symbol"}"#).await;
    let client = client_for(base_url);

    let mut page = PageState::new();
    let submission = page.begin_submission(&form(), &Utc).unwrap();
    let result = run_submission(&client, &submission).await;
    page.complete_submission(submission.generation, result, now());

    assert!(page.chart_data().is_empty());
    let banner = page.notification().current().unwrap();
    assert_eq!(banner.kind, NotificationKind::Error);
    assert!(banner.message.contains("Unknown symbol"));
}
