//! Dashboard report - the render output for one request
//!
//! Turns enriched series into chart payloads the page hands to Plotly:
//! - price chart: candlesticks with Bollinger bands and EMA 20/50 overlays
//! - indicator charts: RSI & ADX, MACD & signal
//! - CSV blob for the download button
//!
//! `render_dashboard` is a pure function of (source, config, params): symbols
//! are processed one after another and a failing symbol never stops the rest.

use serde::Serialize;

use crate::analysis::{AnalysisParams, EnrichedSeries, compute_indicators, rsi_alert};
use crate::client::CandleSource;
use crate::config::Config;
use crate::error::{AnalyzerError, Result};
use crate::export::{csv_filename, to_csv};
use crate::params::DashboardParams;
use crate::types::{ChartStyle, Interval, RsiAlert, TrendDirection};

/// Line overlay or oscillator trace
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineTrace {
    pub name: String,
    pub values: Vec<Option<f64>>,
    pub color: Option<&'static str>,
    pub dash: Option<&'static str>,
}

impl LineTrace {
    fn new(name: &str, values: &[Option<f64>]) -> Self {
        Self {
            name: name.to_string(),
            values: values.to_vec(),
            color: None,
            dash: None,
        }
    }

    fn styled(mut self, color: &'static str, dash: Option<&'static str>) -> Self {
        self.color = Some(color);
        self.dash = dash;
        self
    }
}

/// Candlestick chart with overlays
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceChart {
    pub time: Vec<String>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub overlays: Vec<LineTrace>,
}

/// Secondary line chart sharing the price chart's time axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub title: String,
    pub traces: Vec<LineTrace>,
}

/// Latest values shown above the charts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatestSummary {
    pub time: String,
    pub close: f64,
    pub rsi: Option<f64>,
    pub adx: Option<f64>,
    pub macd: Option<f64>,
    pub trend: TrendDirection,
}

/// Per-symbol render result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SymbolReport {
    Ready {
        symbol: String,
        alert: Option<RsiAlert>,
        latest: LatestSummary,
        price_chart: PriceChart,
        indicator_charts: Vec<LineChart>,
        csv_filename: String,
        csv: String,
    },
    Skipped {
        symbol: String,
        warning: String,
    },
    Failed {
        symbol: String,
        error: String,
    },
}

/// Full dashboard render
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub render_id: String,
    pub generated_at: String,
    pub interval: Interval,
    pub limit: u32,
    pub chart_style: ChartStyle,
    pub rsi_overbought: f64,
    pub rsi_oversold: f64,
    pub symbols: Vec<SymbolReport>,
}

impl DashboardReport {
    pub fn count_ready(&self) -> usize {
        self.symbols
            .iter()
            .filter(|s| matches!(s, SymbolReport::Ready { .. }))
            .count()
    }
}

/// Candlestick chart with BB High/Low, EMA 20 and EMA 50
pub fn price_chart(enriched: &EnrichedSeries) -> PriceChart {
    let candles = enriched.candles();
    PriceChart {
        time: candles
            .iter()
            .map(|c| c.time.format("%Y-%m-%d %H:%M:%S").to_string())
            .collect(),
        open: candles.iter().map(|c| c.open).collect(),
        high: candles.iter().map(|c| c.high).collect(),
        low: candles.iter().map(|c| c.low).collect(),
        close: candles.iter().map(|c| c.close).collect(),
        overlays: vec![
            LineTrace::new("BB High", &enriched.bb_high).styled("gray", Some("dot")),
            LineTrace::new("BB Low", &enriched.bb_low).styled("gray", Some("dot")),
            LineTrace::new("EMA 20", &enriched.ema20).styled("orange", None),
            LineTrace::new("EMA 50", &enriched.ema50).styled("blue", None),
        ],
    }
}

/// "RSI & ADX" and "MACD" charts
pub fn indicator_charts(enriched: &EnrichedSeries) -> Vec<LineChart> {
    vec![
        LineChart {
            title: "RSI & ADX".to_string(),
            traces: vec![
                LineTrace::new("RSI", &enriched.rsi),
                LineTrace::new("ADX", &enriched.adx),
            ],
        },
        LineChart {
            title: "MACD".to_string(),
            traces: vec![
                LineTrace::new("MACD", &enriched.macd),
                LineTrace::new("MACD_signal", &enriched.macd_signal),
            ],
        },
    ]
}

/// Build the ready report for an enriched series
pub fn symbol_report(enriched: &EnrichedSeries, params: &AnalysisParams) -> Result<SymbolReport> {
    let last = enriched.candles().last().ok_or_else(|| AnalyzerError::InsufficientData {
        symbol: enriched.symbol().to_string(),
        available: 0,
        required: params.min_candles,
    })?;

    let latest = LatestSummary {
        time: last.time.format("%Y-%m-%d %H:%M:%S").to_string(),
        close: last.close,
        rsi: enriched.last_rsi(),
        adx: enriched.adx.last().copied().flatten(),
        macd: enriched.macd.last().copied().flatten(),
        trend: enriched
            .supertrend
            .last()
            .copied()
            .unwrap_or(TrendDirection::Up),
    };

    Ok(SymbolReport::Ready {
        symbol: enriched.symbol().to_string(),
        alert: rsi_alert(latest.rsi, params.rsi_overbought, params.rsi_oversold),
        latest,
        price_chart: price_chart(enriched),
        indicator_charts: indicator_charts(enriched),
        csv_filename: csv_filename(enriched.symbol()),
        csv: to_csv(enriched)?,
    })
}

/// Fetch and enrich one symbol
pub async fn analyze_symbol<S: CandleSource>(
    source: &S,
    symbol: &str,
    interval: Interval,
    limit: u32,
    params: &AnalysisParams,
) -> Result<EnrichedSeries> {
    let series = source.fetch_candles(symbol, interval, limit).await?;
    compute_indicators(series, params)
}

/// Render every selected symbol sequentially
pub async fn render_dashboard<S: CandleSource>(
    source: &S,
    config: &Config,
    params: &DashboardParams,
) -> DashboardReport {
    let analysis_params = AnalysisParams::from(config);
    let mut symbols = Vec::with_capacity(params.symbols.len());

    for symbol in &params.symbols {
        let report = match analyze_symbol(
            source,
            symbol,
            params.interval,
            params.limit,
            &analysis_params,
        )
        .await
        .and_then(|enriched| symbol_report(&enriched, &analysis_params))
        {
            Ok(report) => report,
            Err(AnalyzerError::InsufficientData { available, .. }) => SymbolReport::Skipped {
                symbol: symbol.clone(),
                warning: format!(
                    "Insufficient data for {symbol} ({available} candles). Try increasing the number of candles."
                ),
            },
            Err(e) => SymbolReport::Failed {
                symbol: symbol.clone(),
                error: e.to_string(),
            },
        };
        symbols.push(report);
    }

    DashboardReport {
        render_id: uuid::Uuid::new_v4().to_string(),
        generated_at: chrono::Utc::now().to_rfc3339(),
        interval: params.interval,
        limit: params.limit,
        chart_style: params.theme.chart_style(),
        rsi_overbought: analysis_params.rsi_overbought,
        rsi_oversold: analysis_params.rsi_oversold,
        symbols,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CandleSeries, Theme, fixtures};
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// In-memory candle source recording each call
    struct StaticSource {
        series: HashMap<String, CandleSeries>,
        calls: RefCell<Vec<(String, Interval, u32)>>,
    }

    impl StaticSource {
        fn new(entries: Vec<(&str, CandleSeries)>) -> Self {
            Self {
                series: entries
                    .into_iter()
                    .map(|(symbol, mut series)| {
                        series.symbol = symbol.to_string();
                        (symbol.to_string(), series)
                    })
                    .collect(),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl CandleSource for StaticSource {
        async fn fetch_candles(
            &self,
            symbol: &str,
            interval: Interval,
            limit: u32,
        ) -> Result<CandleSeries> {
            self.calls
                .borrow_mut()
                .push((symbol.to_string(), interval, limit));
            self.series
                .get(symbol)
                .cloned()
                .ok_or_else(|| AnalyzerError::ExchangeApi(format!("51001: no {symbol}")))
        }
    }

    fn params(symbols: &[&str]) -> DashboardParams {
        DashboardParams {
            symbols: symbols.iter().map(|s| (*s).to_string()).collect(),
            interval: Interval::OneHour,
            limit: 300,
            theme: Theme::Dark,
        }
    }

    #[tokio::test]
    async fn test_render_mixed_outcomes_in_order() {
        let source = StaticSource::new(vec![
            ("BTC-USDT", fixtures::uptrend(60)),
            ("ETH-USDT", fixtures::uptrend(12)),
        ]);
        let config = Config::default();

        let report = render_dashboard(
            &source,
            &config,
            &params(&["BTC-USDT", "ETH-USDT", "SOL-USDT"]),
        )
        .await;

        assert_eq!(report.symbols.len(), 3);
        assert_eq!(report.count_ready(), 1);
        assert_eq!(report.chart_style.template, "plotly_dark");
        assert!(matches!(report.symbols[0], SymbolReport::Ready { .. }));
        assert!(
            matches!(&report.symbols[1], SymbolReport::Skipped { warning, .. } if warning.contains("12 candles"))
        );
        assert!(
            matches!(&report.symbols[2], SymbolReport::Failed { error, .. } if error.contains("51001"))
        );

        let calls = source.calls.borrow();
        let order: Vec<&str> = calls.iter().map(|(s, _, _)| s.as_str()).collect();
        assert_eq!(order, vec!["BTC-USDT", "ETH-USDT", "SOL-USDT"]);
        assert!(calls.iter().all(|(_, i, l)| *i == Interval::OneHour && *l == 300));
    }

    #[tokio::test]
    async fn test_ready_report_contents() {
        let source = StaticSource::new(vec![("BTC-USDT", fixtures::uptrend(60))]);
        let report = render_dashboard(&source, &Config::default(), &params(&["BTC-USDT"])).await;

        let SymbolReport::Ready {
            alert,
            latest,
            price_chart,
            indicator_charts,
            csv_filename,
            csv,
            ..
        } = &report.symbols[0]
        else {
            panic!("expected a ready report");
        };

        assert_eq!(*alert, Some(RsiAlert::Overbought));
        assert_eq!(latest.trend, TrendDirection::Up);
        assert_eq!(price_chart.close.len(), 60);
        let names: Vec<&str> = price_chart.overlays.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["BB High", "BB Low", "EMA 20", "EMA 50"]);
        assert_eq!(indicator_charts.len(), 2);
        assert_eq!(indicator_charts[0].title, "RSI & ADX");
        assert_eq!(indicator_charts[1].traces[1].name, "MACD_signal");
        assert_eq!(csv_filename, "BTC-USDT_data.csv");
        assert_eq!(csv.lines().count(), 61);
    }

    #[tokio::test]
    async fn test_render_nothing_selected() {
        let source = StaticSource::new(vec![]);
        let report = render_dashboard(&source, &Config::default(), &params(&[])).await;
        assert!(report.symbols.is_empty());
        assert!(source.calls.borrow().is_empty());
    }

    #[test]
    fn test_report_serializes_status_tag() {
        let report = SymbolReport::Skipped {
            symbol: "XRP-USDT".to_string(),
            warning: "short".to_string(),
        };
        let json = serde_json::to_value(&report).expect("report serializes");
        assert_eq!(json["status"], "skipped");
        assert_eq!(json["symbol"], "XRP-USDT");
    }

    #[tokio::test]
    async fn test_dashboard_json_carries_times_style_and_thresholds() {
        let source = StaticSource::new(vec![("BTC-USDT", fixtures::uptrend(40))]);
        let config = Config {
            rsi_overbought: 80.0,
            rsi_oversold: 20.0,
            ..Config::default()
        };
        let mut light = params(&["BTC-USDT"]);
        light.theme = Theme::Light;

        let report = render_dashboard(&source, &config, &light).await;
        let json = serde_json::to_value(&report).expect("report serializes");

        assert_eq!(json["symbols"][0]["price_chart"]["time"][0], "2024-01-01 00:00:00");
        assert_eq!(json["symbols"][0]["latest"]["trend"], "up");
        assert_eq!(json["chart_style"]["template"], "plotly_white");
        assert_eq!(json["chart_style"]["paper_bgcolor"], "#ffffff");
        assert_eq!(json["rsi_overbought"], 80.0);
        assert_eq!(json["rsi_oversold"], 20.0);
    }
}
