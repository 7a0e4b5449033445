//! OKX public market-data client
//!
//! Implements the single call the dashboard needs:
//! - `GET /api/v5/market/candles` (no auth)
//!
//! The response is newest-first with every number encoded as a string;
//! parsing is kept separate from the transport so it can be tested offline.
//! No retries: a failed fetch fails that symbol only.

use chrono::DateTime;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::{AnalyzerError, Result};
use crate::types::{Candle, CandleSeries, Interval};

const CANDLES_PATH: &str = "/api/v5/market/candles";

/// Number of leading fields every candle row must carry:
/// `[ts, o, h, l, c, vol, volCcy]`
const CANDLE_ROW_FIELDS: usize = 7;

/// Anything that can produce a candle series for a symbol
#[allow(async_fn_in_trait)] // Single-threaded worker, futures need not be Send
pub trait CandleSource {
    async fn fetch_candles(
        &self,
        symbol: &str,
        interval: Interval,
        limit: u32,
    ) -> Result<CandleSeries>;
}

/// OKX API client
pub struct OkxClient {
    base_url: String,
    http: reqwest::Client,
}

/// Candles response envelope from OKX
#[derive(Debug, Deserialize)]
pub struct CandlesResponse {
    pub code: String,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub data: Vec<Vec<String>>,
}

impl OkxClient {
    /// Create new client against the given host
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Perform the GET and decode the envelope
    async fn get_candles(
        &self,
        symbol: &str,
        interval: Interval,
        limit: u32,
    ) -> Result<CandlesResponse> {
        let url = format!("{}{CANDLES_PATH}", self.base_url);
        let limit = limit.to_string();

        let response = self
            .http
            .get(&url)
            .query(&[
                ("instId", symbol),
                ("bar", interval.okx_bar()),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        Self::handle_response(response).await
    }

    /// Handle API response, checking for errors
    async fn handle_response(response: reqwest::Response) -> Result<CandlesResponse> {
        let status = response.status();

        if !status.is_success() {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".into());
            return Err(status_error(status, retry_after.as_deref(), &error_text));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Error for a non-2xx response; 429 honours `Retry-After` (seconds, default 1)
fn status_error(status: StatusCode, retry_after: Option<&str>, body: &str) -> AnalyzerError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        let wait = retry_after
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(1);
        return AnalyzerError::RateLimit(wait);
    }
    AnalyzerError::ExchangeApi(format!("HTTP {status}: {body}"))
}

impl CandleSource for OkxClient {
    async fn fetch_candles(
        &self,
        symbol: &str,
        interval: Interval,
        limit: u32,
    ) -> Result<CandleSeries> {
        let response = self.get_candles(symbol, interval, limit).await?;
        parse_candles(symbol, interval, limit, response)
    }
}

/// Turn an OKX envelope into an oldest-first series of at most `limit` candles
pub fn parse_candles(
    symbol: &str,
    interval: Interval,
    limit: u32,
    response: CandlesResponse,
) -> Result<CandleSeries> {
    if response.code != "0" {
        return Err(AnalyzerError::ExchangeApi(format!(
            "{}: {}",
            response.code, response.msg
        )));
    }

    let mut candles = response
        .data
        .iter()
        .map(|row| parse_row(row))
        .collect::<Result<Vec<_>>>()?;

    // Newest-first on the wire; keep the newest `limit` bars
    candles.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
    candles.reverse();

    Ok(CandleSeries::new(symbol, interval, candles))
}

fn parse_row(row: &[String]) -> Result<Candle> {
    if row.len() < CANDLE_ROW_FIELDS {
        return Err(AnalyzerError::MalformedResponse(format!(
            "candle row has {} fields, expected at least {CANDLE_ROW_FIELDS}",
            row.len()
        )));
    }

    let number = |idx: usize, name: &str| -> Result<f64> {
        row[idx].parse::<f64>().map_err(|_| {
            AnalyzerError::MalformedResponse(format!("invalid {name} {:?}", row[idx]))
        })
    };

    let timestamp_ms: i64 = row[0]
        .parse()
        .map_err(|_| AnalyzerError::MalformedResponse(format!("invalid timestamp {:?}", row[0])))?;
    let time = DateTime::from_timestamp_millis(timestamp_ms).ok_or_else(|| {
        AnalyzerError::MalformedResponse(format!("timestamp out of range: {timestamp_ms}"))
    })?;

    Ok(Candle {
        timestamp_ms,
        time,
        open: number(1, "open")?,
        high: number(2, "high")?,
        low: number(3, "low")?,
        close: number(4, "close")?,
        volume: number(5, "volume")?,
        volume_ccy: number(6, "volCcy")?,
    })
}
