//! Supertrend indicator
//!
//! Trend-following overlay built from ATR bands around the bar midpoint:
//! - basic upper/lower band = hl2 ± multiplier × ATR(period)
//! - a close above the previous upper band turns the trend up, a close below
//!   the previous lower band turns it down
//! - otherwise the trend holds and the band on its side trails: the lower
//!   band never falls during an uptrend, the upper band never rises during
//!   a downtrend
//!
//! Implemented as a fold producing a fresh series; nothing is mutated in place.

use crate::error::{AnalyzerError, Result};
use crate::indicators::atr;
use crate::types::{CandleSeries, TrendDirection};

pub const DEFAULT_PERIOD: usize = 10;
pub const DEFAULT_MULTIPLIER: f64 = 3.0;

/// Supertrend state at one candle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupertrendPoint {
    pub direction: TrendDirection,
    /// Effective (trailed) upper band
    pub upper_band: f64,
    /// Effective (trailed) lower band
    pub lower_band: f64,
}

/// Direction per candle; see [`supertrend_bands`]
pub fn supertrend(
    series: &CandleSeries,
    period: usize,
    multiplier: f64,
) -> Result<Vec<TrendDirection>> {
    Ok(supertrend_bands(series, period, multiplier)?
        .into_iter()
        .map(|p| p.direction)
        .collect())
}

/// Direction and effective bands per candle.
///
/// Requires `period >= 1`, a positive multiplier and at least `period + 1`
/// candles. The first candle is always `Up`. Before the ATR is defined it
/// counts as zero, so warm-up bands sit on hl2 and a close across the
/// previous midpoint already flips the trend.
pub fn supertrend_bands(
    series: &CandleSeries,
    period: usize,
    multiplier: f64,
) -> Result<Vec<SupertrendPoint>> {
    if period == 0 || !multiplier.is_finite() || multiplier <= 0.0 {
        return Err(AnalyzerError::InvalidParameter(format!(
            "supertrend needs period >= 1 and multiplier > 0 (got {period}, {multiplier})"
        )));
    }
    if series.len() < period + 1 {
        return Err(AnalyzerError::InsufficientData {
            symbol: series.symbol.clone(),
            available: series.len(),
            required: period + 1,
        });
    }

    let atr = atr(&series.highs(), &series.lows(), &series.closes(), period);
    let basic: Vec<(f64, f64)> = series
        .candles
        .iter()
        .zip(&atr)
        .map(|(candle, atr)| {
            let hl2 = candle.hl2();
            let offset = multiplier * atr.unwrap_or(0.0);
            (hl2 + offset, hl2 - offset)
        })
        .collect();

    let first = SupertrendPoint {
        direction: TrendDirection::Up,
        upper_band: basic[0].0,
        lower_band: basic[0].1,
    };

    let points = series.candles[1..].iter().zip(&basic[1..]).fold(
        vec![first],
        |mut points, (candle, &(basic_upper, basic_lower))| {
            let prev = points[points.len() - 1];
            points.push(step(prev, candle.close, basic_upper, basic_lower));
            points
        },
    );

    Ok(points)
}

fn step(prev: SupertrendPoint, close: f64, basic_upper: f64, basic_lower: f64) -> SupertrendPoint {
    if close > prev.upper_band {
        return SupertrendPoint {
            direction: TrendDirection::Up,
            upper_band: basic_upper,
            lower_band: basic_lower,
        };
    }
    if close < prev.lower_band {
        return SupertrendPoint {
            direction: TrendDirection::Down,
            upper_band: basic_upper,
            lower_band: basic_lower,
        };
    }

    let direction = prev.direction;
    let (upper_band, lower_band) = match direction {
        TrendDirection::Up => (basic_upper, basic_lower.max(prev.lower_band)),
        TrendDirection::Down => (basic_upper.min(prev.upper_band), basic_lower),
    };

    SupertrendPoint {
        direction,
        upper_band,
        lower_band,
    }
}
