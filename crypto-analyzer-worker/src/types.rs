//! Common types for the analyzer
//!
//! All shared data structures used across modules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AnalyzerError, Result};

/// One OHLCV bar
#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    /// Bar open time in milliseconds since epoch, as sent by the exchange
    pub timestamp_ms: i64,
    pub time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Volume in base currency
    pub volume: f64,
    /// Volume in quote currency
    pub volume_ccy: f64,
}

impl Candle {
    /// Midpoint of the bar's range
    pub fn hl2(&self) -> f64 {
        (self.high + self.low) / 2.0
    }
}

/// Ordered candles for one symbol, oldest first
#[derive(Debug, Clone, PartialEq)]
pub struct CandleSeries {
    pub symbol: String,
    pub interval: Interval,
    pub candles: Vec<Candle>,
}

impl CandleSeries {
    pub fn new(symbol: impl Into<String>, interval: Interval, candles: Vec<Candle>) -> Self {
        Self {
            symbol: symbol.into(),
            interval,
            candles,
        }
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.low).collect()
    }
}

/// Bar interval selectable on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "4h")]
    FourHours,
    #[serde(rename = "1d")]
    OneDay,
}

impl Interval {
    pub const ALL: [Interval; 6] = [
        Interval::OneMinute,
        Interval::FiveMinutes,
        Interval::FifteenMinutes,
        Interval::OneHour,
        Interval::FourHours,
        Interval::OneDay,
    ];

    /// Tag shown to the user and accepted in query strings
    pub fn as_str(self) -> &'static str {
        match self {
            Interval::OneMinute => "1m",
            Interval::FiveMinutes => "5m",
            Interval::FifteenMinutes => "15m",
            Interval::OneHour => "1h",
            Interval::FourHours => "4h",
            Interval::OneDay => "1d",
        }
    }

    /// OKX `bar` parameter (hour and day units are upper case)
    pub fn okx_bar(self) -> &'static str {
        match self {
            Interval::OneMinute => "1m",
            Interval::FiveMinutes => "5m",
            Interval::FifteenMinutes => "15m",
            Interval::OneHour => "1H",
            Interval::FourHours => "4H",
            Interval::OneDay => "1D",
        }
    }
}

impl std::str::FromStr for Interval {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self> {
        Interval::ALL
            .into_iter()
            .find(|i| i.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                AnalyzerError::InvalidParameter(format!(
                    "interval must be one of 1m, 5m, 15m, 1h, 4h, 1d (got {s:?})"
                ))
            })
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chart theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn from_dark_mode(dark_mode: bool) -> Self {
        if dark_mode { Theme::Dark } else { Theme::Light }
    }

    /// Plotly layout template
    pub fn chart_template(self) -> &'static str {
        match self {
            Theme::Dark => "plotly_dark",
            Theme::Light => "plotly_white",
        }
    }

    /// Layout colors of the template, for Plotly.js which has no named templates
    pub fn chart_style(self) -> ChartStyle {
        match self {
            Theme::Dark => ChartStyle {
                template: self.chart_template(),
                paper_bgcolor: "#111111",
                plot_bgcolor: "#111111",
                font_color: "#f2f5fa",
                grid_color: "#283442",
            },
            Theme::Light => ChartStyle {
                template: self.chart_template(),
                paper_bgcolor: "#ffffff",
                plot_bgcolor: "#ffffff",
                font_color: "#2a3f5f",
                grid_color: "#ebf0f8",
            },
        }
    }
}

/// Chart colors applied to every Plotly layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartStyle {
    pub template: &'static str,
    pub paper_bgcolor: &'static str,
    pub plot_bgcolor: &'static str,
    pub font_color: &'static str,
    pub grid_color: &'static str,
}

impl std::str::FromStr for Theme {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "dark" | "true" | "1" => Ok(Theme::Dark),
            "light" | "false" | "0" => Ok(Theme::Light),
            other => Err(AnalyzerError::InvalidParameter(format!(
                "theme must be dark or light (got {other:?})"
            ))),
        }
    }
}

/// Supertrend direction for one candle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
}

impl TrendDirection {
    pub fn is_up(self) -> bool {
        self == TrendDirection::Up
    }
}

/// RSI threshold alert on the latest candle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RsiAlert {
    Overbought,
    Oversold,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub timestamp: String,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::TimeZone;

    /// Hourly candles starting 2024-01-01, one per (open, high, low, close)
    pub fn series_from(bars: &[(f64, f64, f64, f64)]) -> CandleSeries {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let candles = bars
            .iter()
            .enumerate()
            .map(|(i, &(open, high, low, close))| {
                let time = start + chrono::Duration::hours(i as i64);
                Candle {
                    timestamp_ms: time.timestamp_millis(),
                    time,
                    open,
                    high,
                    low,
                    close,
                    volume: 10.0,
                    volume_ccy: 10.0 * close,
                }
            })
            .collect();
        CandleSeries::new("BTC-USDT", Interval::OneHour, candles)
    }

    /// Steady uptrend: close rises by 1.0 per bar with a 1.0 wide range
    pub fn uptrend(len: usize) -> CandleSeries {
        let bars: Vec<_> = (0..len)
            .map(|i| {
                let close = 100.0 + i as f64;
                (close - 0.2, close + 0.5, close - 0.5, close)
            })
            .collect();
        series_from(&bars)
    }

    /// Steady downtrend, mirror of `uptrend`
    pub fn downtrend(len: usize) -> CandleSeries {
        let bars: Vec<_> = (0..len)
            .map(|i| {
                let close = 500.0 - i as f64;
                (close + 0.2, close + 0.5, close - 0.5, close)
            })
            .collect();
        series_from(&bars)
    }

    /// Oscillating series that trends up then down
    pub fn zigzag(len: usize) -> CandleSeries {
        let bars: Vec<_> = (0..len)
            .map(|i| {
                let x = i as f64;
                let drift = if i < len / 2 { x * 0.8 } else { (len - i) as f64 * 0.8 };
                let close = 200.0 + drift + (x * 0.9).sin() * 3.0;
                (close - 0.4, close + 1.2, close - 1.1, close)
            })
            .collect();
        series_from(&bars)
    }
}
