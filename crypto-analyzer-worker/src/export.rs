//! CSV export of an enriched series
//!
//! One row per candle: raw OHLCV fields, the derived time, then every
//! indicator column. Undefined values are written as empty cells.

use crate::analysis::EnrichedSeries;
use crate::error::{AnalyzerError, Result};

pub const CSV_HEADER: [&str; 17] = [
    "ts",
    "open",
    "high",
    "low",
    "close",
    "volume",
    "volCcy",
    "time",
    "RSI",
    "MACD",
    "MACD_signal",
    "BB_high",
    "BB_low",
    "EMA20",
    "EMA50",
    "ADX",
    "Supertrend",
];

/// Download name for a symbol's export
pub fn csv_filename(symbol: &str) -> String {
    format!("{symbol}_data.csv")
}

/// Serialize the full series to UTF-8 CSV
pub fn to_csv(enriched: &EnrichedSeries) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for (i, candle) in enriched.candles().iter().enumerate() {
        let optional = |column: &[Option<f64>]| {
            column
                .get(i)
                .copied()
                .flatten()
                .map(|v| v.to_string())
                .unwrap_or_default()
        };
        let supertrend = match enriched.supertrend.get(i) {
            Some(direction) if direction.is_up() => "True",
            Some(_) => "False",
            None => "",
        };

        writer.write_record([
            candle.timestamp_ms.to_string(),
            candle.open.to_string(),
            candle.high.to_string(),
            candle.low.to_string(),
            candle.close.to_string(),
            candle.volume.to_string(),
            candle.volume_ccy.to_string(),
            candle.time.format("%Y-%m-%d %H:%M:%S").to_string(),
            optional(&enriched.rsi),
            optional(&enriched.macd),
            optional(&enriched.macd_signal),
            optional(&enriched.bb_high),
            optional(&enriched.bb_low),
            optional(&enriched.ema20),
            optional(&enriched.ema50),
            optional(&enriched.adx),
            supertrend.to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AnalyzerError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| AnalyzerError::Csv(e.to_string()))
}
