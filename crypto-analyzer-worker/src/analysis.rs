//! Indicator orchestration
//!
//! Appends every dashboard indicator to a candle series with fixed
//! parameters, and derives the RSI alert from the latest value.

use crate::config::Config;
use crate::error::{AnalyzerError, Result};
use crate::indicators::{adx, bollinger, ema_adjusted, macd, rsi};
use crate::supertrend::supertrend;
use crate::types::{Candle, CandleSeries, RsiAlert, TrendDirection};

pub const RSI_WINDOW: usize = 14;
pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;
pub const BOLLINGER_WINDOW: usize = 20;
pub const BOLLINGER_STD: f64 = 2.0;
pub const EMA_FAST: usize = 20;
pub const EMA_SLOW: usize = 50;
pub const ADX_WINDOW: usize = 14;

/// Parameters that vary per deployment
#[derive(Debug, Clone, Copy)]
pub struct AnalysisParams {
    pub min_candles: usize,
    pub supertrend_period: usize,
    pub supertrend_multiplier: f64,
    pub rsi_overbought: f64,
    pub rsi_oversold: f64,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            min_candles: 30,
            supertrend_period: crate::supertrend::DEFAULT_PERIOD,
            supertrend_multiplier: crate::supertrend::DEFAULT_MULTIPLIER,
            rsi_overbought: 70.0,
            rsi_oversold: 30.0,
        }
    }
}

impl From<&Config> for AnalysisParams {
    fn from(config: &Config) -> Self {
        Self {
            min_candles: config.min_candles,
            supertrend_period: config.supertrend_period,
            supertrend_multiplier: config.supertrend_multiplier,
            rsi_overbought: config.rsi_overbought,
            rsi_oversold: config.rsi_oversold,
        }
    }
}

/// Candle series with indicator columns aligned by index
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedSeries {
    pub series: CandleSeries,
    pub rsi: Vec<Option<f64>>,
    pub macd: Vec<Option<f64>>,
    pub macd_signal: Vec<Option<f64>>,
    pub bb_high: Vec<Option<f64>>,
    pub bb_low: Vec<Option<f64>>,
    pub ema20: Vec<Option<f64>>,
    pub ema50: Vec<Option<f64>>,
    pub adx: Vec<Option<f64>>,
    pub supertrend: Vec<TrendDirection>,
}

impl EnrichedSeries {
    pub fn symbol(&self) -> &str {
        &self.series.symbol
    }

    pub fn candles(&self) -> &[Candle] {
        &self.series.candles
    }

    pub fn last_rsi(&self) -> Option<f64> {
        self.rsi.last().copied().flatten()
    }
}

/// Reject series too short for meaningful indicators
pub fn require_min_candles(series: &CandleSeries, min_candles: usize) -> Result<()> {
    if series.len() < min_candles {
        return Err(AnalyzerError::InsufficientData {
            symbol: series.symbol.clone(),
            available: series.len(),
            required: min_candles,
        });
    }
    Ok(())
}

/// Compute all indicator columns for a series
pub fn compute_indicators(series: CandleSeries, params: &AnalysisParams) -> Result<EnrichedSeries> {
    require_min_candles(&series, params.min_candles)?;

    let closes = series.closes();
    let highs = series.highs();
    let lows = series.lows();

    let macd = macd(&closes, MACD_FAST, MACD_SLOW, MACD_SIGNAL);
    let bands = bollinger(&closes, BOLLINGER_WINDOW, BOLLINGER_STD);
    let supertrend = supertrend(
        &series,
        params.supertrend_period,
        params.supertrend_multiplier,
    )?;

    Ok(EnrichedSeries {
        rsi: rsi(&closes, RSI_WINDOW),
        macd: macd.line,
        macd_signal: macd.signal,
        bb_high: bands.upper,
        bb_low: bands.lower,
        ema20: ema_adjusted(&closes, EMA_FAST),
        ema50: ema_adjusted(&closes, EMA_SLOW),
        adx: adx(&highs, &lows, &closes, ADX_WINDOW),
        supertrend,
        series,
    })
}

/// Threshold check on the latest RSI value
pub fn rsi_alert(last_rsi: Option<f64>, overbought: f64, oversold: f64) -> Option<RsiAlert> {
    match last_rsi {
        Some(value) if value > overbought => Some(RsiAlert::Overbought),
        Some(value) if value < oversold => Some(RsiAlert::Oversold),
        _ => None,
    }
}
