//! Configuration management for the analyzer

use crate::error::{AnalyzerError, Result};
use crate::types::{Interval, Theme};
use worker::Env;

/// Analyzer configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment (production, staging, development)
    pub environment: String,

    /// Log level
    pub log_level: String,

    /// OKX REST host
    pub okx_base_url: String,

    /// Symbols selectable on the dashboard
    pub symbols: Vec<String>,
    /// Symbols rendered when the request does not choose any
    pub default_symbols: Vec<String>,

    pub default_interval: Interval,

    /// Candle-count slider
    pub default_limit: u32,
    pub min_limit: u32,
    pub max_limit: u32,

    /// Series shorter than this are skipped with a warning
    pub min_candles: usize,

    pub dark_mode: bool,

    /// Supertrend parameters
    pub supertrend_period: usize,
    pub supertrend_multiplier: f64,

    /// RSI alert thresholds
    pub rsi_overbought: f64,
    pub rsi_oversold: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    /// Load configuration from Cloudflare environment variables
    pub fn from_env(env: &Env) -> Result<Self> {
        let config = Self::from_lookup(|key| env.var(key).ok().map(|v| v.to_string()));
        config.validate()?;
        Ok(config)
    }

    /// Build configuration from a variable lookup; missing or unparseable
    /// values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse_or = |key: &str, default: f64| {
            lookup(key)
                .and_then(|v| v.trim().parse::<f64>().ok())
                .unwrap_or(default)
        };
        let parse_u32_or = |key: &str, default: u32| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u32>().ok())
                .unwrap_or(default)
        };
        let list_or = |key: &str, default: &[&str]| {
            lookup(key)
                .map(|v| split_list(&v))
                .unwrap_or_else(|| default.iter().map(|s| (*s).to_string()).collect())
        };

        Self {
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "production".to_string()),

            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),

            okx_base_url: lookup("OKX_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|| "https://www.okx.com".to_string()),

            symbols: list_or(
                "SYMBOLS",
                &["BTC-USDT", "ETH-USDT", "SOL-USDT", "AVAX-USDT", "XRP-USDT"],
            ),

            default_symbols: list_or("DEFAULT_SYMBOLS", &["BTC-USDT"]),

            default_interval: lookup("DEFAULT_INTERVAL")
                .and_then(|v| v.parse().ok())
                .unwrap_or(Interval::OneHour),

            default_limit: parse_u32_or("DEFAULT_LIMIT", 300),
            min_limit: parse_u32_or("MIN_LIMIT", 50),
            max_limit: parse_u32_or("MAX_LIMIT", 1000),

            min_candles: lookup("MIN_CANDLES")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(30),

            dark_mode: lookup("DARK_MODE")
                .map(|v| v.to_lowercase() == "true")
                .unwrap_or(true),

            supertrend_period: lookup("SUPERTREND_PERIOD")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(10),
            supertrend_multiplier: parse_or("SUPERTREND_MULTIPLIER", 3.0),

            rsi_overbought: parse_or("RSI_OVERBOUGHT", 70.0),
            rsi_oversold: parse_or("RSI_OVERSOLD", 30.0),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.symbols.is_empty() {
            return Err(AnalyzerError::Config("At least one symbol required".into()));
        }
        if let Some(unknown) = self
            .default_symbols
            .iter()
            .find(|s| !self.symbols.contains(s))
        {
            return Err(AnalyzerError::Config(format!(
                "default symbol {unknown} is not in SYMBOLS"
            )));
        }
        if self.min_limit == 0
            || self.min_limit > self.default_limit
            || self.default_limit > self.max_limit
        {
            return Err(AnalyzerError::Config(
                "limits must satisfy 0 < MIN_LIMIT <= DEFAULT_LIMIT <= MAX_LIMIT".into(),
            ));
        }
        if self.supertrend_period == 0
            || !self.supertrend_multiplier.is_finite()
            || self.supertrend_multiplier <= 0.0
        {
            return Err(AnalyzerError::Config("supertrend parameters must be positive".into()));
        }
        if self.min_candles < self.supertrend_period + 1 {
            return Err(AnalyzerError::Config(format!(
                "MIN_CANDLES must be at least SUPERTREND_PERIOD + 1 ({})",
                self.supertrend_period + 1
            )));
        }
        if !self.rsi_oversold.is_finite() || !self.rsi_overbought.is_finite() {
            return Err(AnalyzerError::Config("RSI thresholds must be finite numbers".into()));
        }
        if self.rsi_oversold >= self.rsi_overbought {
            return Err(AnalyzerError::Config("RSI_OVERSOLD must be below RSI_OVERBOUGHT".into()));
        }
        Ok(())
    }

    pub fn default_theme(&self) -> Theme {
        Theme::from_dark_mode(self.dark_mode)
    }

    pub fn is_debug(&self) -> bool {
        self.log_level.eq_ignore_ascii_case("debug")
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.symbols.len(), 5);
        assert_eq!(config.default_symbols, vec!["BTC-USDT".to_string()]);
        assert_eq!(config.default_interval, Interval::OneHour);
        assert_eq!((config.min_limit, config.default_limit, config.max_limit), (50, 300, 1000));
        assert_eq!(config.min_candles, 30);
        assert_eq!(config.supertrend_period, 10);
        assert!((config.supertrend_multiplier - 3.0).abs() < f64::EPSILON);
        assert_eq!(config.default_theme(), Theme::Dark);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_overrides_and_fallbacks() {
        let config = Config::from_lookup(lookup_from(&[
            ("SYMBOLS", "BTC-USDT, ETH-USDT,,"),
            ("MIN_LIMIT", "100"),
            ("DEFAULT_INTERVAL", "4h"),
            ("DARK_MODE", "false"),
            ("MAX_LIMIT", "lots"),
            ("OKX_BASE_URL", "http://localhost:8080/"),
            ("LOG_LEVEL", "DEBUG"),
        ]));
        assert_eq!(config.symbols, vec!["BTC-USDT".to_string(), "ETH-USDT".to_string()]);
        assert_eq!(config.min_limit, 100);
        assert_eq!(config.max_limit, 1000);
        assert_eq!(config.default_interval, Interval::FourHours);
        assert_eq!(config.default_theme(), Theme::Light);
        assert_eq!(config.okx_base_url, "http://localhost:8080");
        assert!(config.is_debug());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.default_symbols = vec!["DOGE-USDT".to_string()];
        assert!(matches!(config.validate(), Err(AnalyzerError::Config(_))));

        let mut config = Config::default();
        config.min_limit = 500;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.min_candles = 5;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.rsi_oversold = 80.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.symbols.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_finite_numbers_rejected() {
        let config = Config::from_lookup(lookup_from(&[("SUPERTREND_MULTIPLIER", "NaN")]));
        assert!(config.supertrend_multiplier.is_nan());
        assert!(matches!(config.validate(), Err(AnalyzerError::Config(_))));

        let config = Config::from_lookup(lookup_from(&[("SUPERTREND_MULTIPLIER", "inf")]));
        assert!(config.validate().is_err());

        let config = Config::from_lookup(lookup_from(&[("RSI_OVERBOUGHT", "NaN")]));
        assert!(config.validate().is_err());

        let config = Config::from_lookup(lookup_from(&[("RSI_OVERSOLD", "nan")]));
        assert!(config.validate().is_err());
    }
}
