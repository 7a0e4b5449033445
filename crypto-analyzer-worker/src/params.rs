//! Dashboard selections from the query string
//!
//! Mirrors the sidebar: symbol multi-select, interval, candle-count slider
//! and theme toggle. Missing values fall back to the configured defaults.

use serde::Serialize;

use crate::config::Config;
use crate::error::{AnalyzerError, Result};
use crate::types::{Interval, Theme};

/// One render's user selections
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardParams {
    pub symbols: Vec<String>,
    pub interval: Interval,
    pub limit: u32,
    pub theme: Theme,
}

impl DashboardParams {
    /// Defaults from configuration
    pub fn defaults(config: &Config) -> Self {
        Self {
            symbols: config.default_symbols.clone(),
            interval: config.default_interval,
            limit: config.default_limit,
            theme: config.default_theme(),
        }
    }

    /// Parse `symbols`, `symbol`, `interval`, `limit`, `theme` pairs.
    ///
    /// `symbols` may be comma separated or repeated; an explicitly empty
    /// value selects nothing. The limit is clamped to the slider bounds.
    pub fn from_query<I, K, V>(pairs: I, config: &Config) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut params = Self::defaults(config);
        let mut selected: Option<Vec<String>> = None;

        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                "symbols" | "symbol" => {
                    let list = selected.get_or_insert_with(Vec::new);
                    for symbol in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                        let symbol = symbol.to_uppercase();
                        if !config.symbols.contains(&symbol) {
                            return Err(AnalyzerError::InvalidParameter(format!(
                                "unknown symbol {symbol}"
                            )));
                        }
                        if !list.contains(&symbol) {
                            list.push(symbol);
                        }
                    }
                }
                "interval" => params.interval = value.parse()?,
                "limit" => {
                    let limit: u32 = value.trim().parse().map_err(|_| {
                        AnalyzerError::InvalidParameter(format!("limit must be a number (got {value:?})"))
                    })?;
                    params.limit = limit.clamp(config.min_limit, config.max_limit);
                }
                "theme" | "dark" => params.theme = value.parse()?,
                _ => {}
            }
        }

        if let Some(symbols) = selected {
            params.symbols = symbols;
        }
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_empty() {
        let config = Config::default();
        let params = DashboardParams::from_query(Vec::<(&str, &str)>::new(), &config)
            .expect("no params is valid");
        assert_eq!(params, DashboardParams::defaults(&config));
        assert_eq!(params.symbols, vec!["BTC-USDT".to_string()]);
        assert_eq!(params.limit, 300);
    }

    #[test]
    fn test_full_selection() {
        let config = Config::default();
        let params = DashboardParams::from_query(
            [
                ("symbols", "eth-usdt,SOL-USDT"),
                ("symbols", "ETH-USDT"),
                ("interval", "15m"),
                ("limit", "120"),
                ("theme", "light"),
            ],
            &config,
        )
        .expect("valid params");
        assert_eq!(params.symbols, vec!["ETH-USDT".to_string(), "SOL-USDT".to_string()]);
        assert_eq!(params.interval, Interval::FifteenMinutes);
        assert_eq!(params.limit, 120);
        assert_eq!(params.theme, Theme::Light);
    }

    #[test]
    fn test_limit_clamped_to_slider() {
        let config = Config::default();
        let low = DashboardParams::from_query([("limit", "5")], &config).expect("valid");
        assert_eq!(low.limit, 50);
        let high = DashboardParams::from_query([("limit", "5000")], &config).expect("valid");
        assert_eq!(high.limit, 1000);

        let mut narrow = Config::default();
        narrow.min_limit = 100;
        let low = DashboardParams::from_query([("limit", "60")], &narrow).expect("valid");
        assert_eq!(low.limit, 100);
    }

    #[test]
    fn test_explicit_empty_selection() {
        let config = Config::default();
        let params = DashboardParams::from_query([("symbols", "")], &config).expect("valid");
        assert!(params.symbols.is_empty());
    }

    #[test]
    fn test_rejects_bad_values() {
        let config = Config::default();
        assert!(DashboardParams::from_query([("symbols", "DOGE-USDT")], &config).is_err());
        assert!(DashboardParams::from_query([("interval", "3h")], &config).is_err());
        assert!(DashboardParams::from_query([("limit", "many")], &config).is_err());
    }
}
