//! Dashboard module - analyzer web interface
//!
//! Provides a single-page dashboard for the indicator charts.
//! Separated into HTML, CSS, and JS submodules for maintainability.
//!
//! # Architecture
//! - `html.rs`: Sidebar controls and report container
//! - `css.rs`: Styling with CSS custom properties, dark and light themes
//! - `js.rs`: Reads `/api/config`, requests `/api/analysis`, draws Plotly charts
//!
//! # Features
//! - Symbol multi-select, interval, candle-count slider, theme toggle
//! - Candlestick chart with Bollinger bands and EMA 20/50
//! - RSI & ADX and MACD charts
//! - RSI overbought/oversold alerts and per-symbol CSV download

mod css;
mod html;
mod js;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Generate the complete dashboard HTML page
pub fn dashboard_html() -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Crypto Analyzer PRO</title>
    <script src="{plotly}"></script>
    <style>
{css}
    </style>
</head>
<body class="theme-dark">
{html}
    <script>
{js}
    </script>
</body>
</html>"#,
        plotly = PLOTLY_CDN,
        css = css::STYLES,
        html = html::TEMPLATE,
        js = js::SCRIPT
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_is_assembled() {
        let page = dashboard_html();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains(PLOTLY_CDN));
        assert!(page.contains(r#"id="symbolList""#));
        assert!(page.contains("/api/analysis"));
        assert!(page.contains("--bg:"));
    }

    #[test]
    fn test_charts_follow_report_style_and_thresholds() {
        let page = dashboard_html();
        assert!(page.contains("report.chart_style"));
        assert!(page.contains("paper_bgcolor: style.paper_bgcolor"));
        assert!(page.contains("lastReport.rsi_overbought"));
        assert!(!page.contains("RSI &gt; 70"));
    }
}
