//! Crypto Analyzer Worker - technical-analysis dashboard on Cloudflare Workers
//!
//! Fetches OKX candles, computes indicators and serves an interactive
//! dashboard with CSV export.
//!
//! # Architecture
//! - Main entry point routes HTTP requests; every request is one render
//! - OKX public API client for candles (no auth, no state)
//! - Pure indicator pipeline: RSI, MACD, Bollinger, EMA, ADX, Supertrend
//!
//! # Features
//! - Multi-symbol dashboard with candlestick and oscillator charts
//! - RSI overbought/oversold alerts
//! - Per-symbol CSV download
//! - Short series skipped with a warning instead of failing the page

// Clippy configuration for indicator code patterns
#![allow(clippy::cast_precision_loss)] // Window sizes as f64 divisors
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::doc_markdown)] // Doc style flexibility
#![allow(clippy::needless_pass_by_value)] // Worker framework patterns
#![allow(clippy::float_cmp)] // Exact zero checks guard divisions
#![allow(clippy::needless_range_loop)] // Index loops read closer to the formulas

mod analysis;
mod client;
mod config;
mod dashboard;
mod error;
mod export;
mod indicators;
mod params;
mod report;
mod supertrend;
mod types;

use worker::{
    Context, Env, Headers, Request, Response, RouteContext, Router, console_error, console_log,
    console_warn, event,
};

pub use analysis::{AnalysisParams, EnrichedSeries, compute_indicators, rsi_alert};
pub use client::{CandleSource, OkxClient};
pub use config::Config;
pub use error::AnalyzerError;
pub use export::{csv_filename, to_csv};
pub use params::DashboardParams;
pub use report::{DashboardReport, SymbolReport, render_dashboard};
pub use supertrend::{SupertrendPoint, supertrend, supertrend_bands};
pub use types::*;

/// Result type alias for worker operations
type WResult<T> = std::result::Result<T, worker::Error>;

/// Main Worker entry point
#[event(fetch)]
async fn fetch(req: Request, env: Env, _ctx: Context) -> WResult<Response> {
    console_error_panic_hook::set_once();

    let router = Router::new();

    router
        // Health check
        .get("/health", |_req, ctx| {
            let config = match Config::from_env(&ctx.env) {
                Ok(c) => c,
                Err(e) => return Response::error(format!("Config error: {e}"), 500),
            };

            Response::from_json(&HealthResponse {
                status: "healthy".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                environment: config.environment,
                timestamp: chrono::Utc::now().to_rfc3339(),
            })
        })
        // Dashboard UI
        .get("/", |_req, _ctx| Response::from_html(dashboard::dashboard_html()))
        .get("/dashboard", |_req, _ctx| {
            Response::from_html(dashboard::dashboard_html())
        })
        // Sidebar choices and defaults
        .get("/api/config", |_req, ctx| match Config::from_env(&ctx.env) {
            Ok(config) => Response::from_json(&config_view(&config)),
            Err(e) => error_response(&e),
        })
        // Full dashboard render
        .get_async("/api/analysis", |req, ctx| async move {
            match analysis_report(&req, &ctx).await {
                Ok(report) => Response::from_json(&report),
                Err(e) => error_response(&e),
            }
        })
        // CSV download for one symbol
        .get_async("/api/csv", |req, ctx| async move {
            match csv_export(&req, &ctx).await {
                Ok((filename, csv)) => {
                    let headers = Headers::new();
                    headers.set("Content-Type", "text/csv; charset=utf-8")?;
                    headers.set(
                        "Content-Disposition",
                        &format!("attachment; filename=\"{filename}\""),
                    )?;
                    Ok(Response::ok(csv)?.with_headers(headers))
                }
                Err(e) => error_response(&e),
            }
        })
        // Fallback
        .run(req, env)
        .await
}

/// Render the dashboard for the request's selections
async fn analysis_report(
    req: &Request,
    ctx: &RouteContext<()>,
) -> std::result::Result<DashboardReport, AnalyzerError> {
    let started = chrono::Utc::now().timestamp_millis();
    let config = Config::from_env(&ctx.env)?;
    let url = req.url()?;
    let params = DashboardParams::from_query(url.query_pairs(), &config)?;

    let client = OkxClient::new(config.okx_base_url.clone());
    let report = render_dashboard(&client, &config, &params).await;

    for symbol in &report.symbols {
        match symbol {
            SymbolReport::Skipped { warning, .. } => {
                console_warn!("[{}] {}", report.render_id, warning);
            }
            SymbolReport::Failed { symbol, error } => {
                console_error!("[{}] {} failed: {}", report.render_id, symbol, error);
            }
            SymbolReport::Ready { symbol, alert, .. } => {
                if config.is_debug() {
                    console_log!("[{}] {} ready, alert: {:?}", report.render_id, symbol, alert);
                }
            }
        }
    }
    console_log!(
        "[{}] rendered {}/{} symbols ({} {}) in {}ms",
        report.render_id,
        report.count_ready(),
        report.symbols.len(),
        params.interval,
        params.limit,
        chrono::Utc::now().timestamp_millis() - started
    );

    Ok(report)
}

/// Build one symbol's CSV export
async fn csv_export(
    req: &Request,
    ctx: &RouteContext<()>,
) -> std::result::Result<(String, String), AnalyzerError> {
    let config = Config::from_env(&ctx.env)?;
    let url = req.url()?;
    let params = DashboardParams::from_query(url.query_pairs(), &config)?;

    let symbol = match params.symbols.as_slice() {
        [symbol] => symbol.clone(),
        _ => {
            return Err(AnalyzerError::InvalidParameter(
                "exactly one symbol is required".into(),
            ));
        }
    };

    let client = OkxClient::new(config.okx_base_url.clone());
    let enriched = report::analyze_symbol(
        &client,
        &symbol,
        params.interval,
        params.limit,
        &AnalysisParams::from(&config),
    )
    .await?;

    Ok((csv_filename(&symbol), to_csv(&enriched)?))
}

/// Sidebar choices served to the page
fn config_view(config: &Config) -> serde_json::Value {
    serde_json::json!({
        "symbols": config.symbols,
        "default_symbols": config.default_symbols,
        "intervals": Interval::ALL.iter().map(|i| i.as_str()).collect::<Vec<_>>(),
        "default_interval": config.default_interval.as_str(),
        "min_limit": config.min_limit,
        "max_limit": config.max_limit,
        "default_limit": config.default_limit,
        "dark_mode": config.dark_mode,
        "min_candles": config.min_candles,
    })
}

/// JSON error body with the error's status code
fn error_response(err: &AnalyzerError) -> WResult<Response> {
    if err.status_code() >= 500 {
        console_error!("Request failed: {}", err);
    }
    Ok(Response::from_json(&serde_json::json!({
        "error": true,
        "message": err.to_string(),
    }))?
    .with_status(err.status_code()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_view_lists_choices() {
        let view = config_view(&Config::default());
        assert_eq!(view["intervals"].as_array().map(Vec::len), Some(6));
        assert_eq!(view["default_interval"], "1h");
        assert_eq!(view["min_limit"], 50);
        assert_eq!(view["symbols"][4], "XRP-USDT");
    }
}
