//! Dashboard CSS styles
//!
//! Contains all styling for the analyzer UI.
//! Uses CSS custom properties (variables) for theming; the light theme
//! only overrides the palette.

pub const STYLES: &str = r"
* { box-sizing: border-box; margin: 0; padding: 0; }

:root, .theme-dark {
    --bg: #0d1117;
    --card: #161b22;
    --border: #30363d;
    --text: #c9d1d9;
    --text-dim: #8b949e;
    --green: #3fb950;
    --red: #f85149;
    --blue: #58a6ff;
    --yellow: #d29922;
}

.theme-light {
    --bg: #f6f8fa;
    --card: #ffffff;
    --border: #d0d7de;
    --text: #1f2328;
    --text-dim: #656d76;
    --green: #1a7f37;
    --red: #cf222e;
    --blue: #0969da;
    --yellow: #9a6700;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    background: var(--bg);
    color: var(--text);
    min-height: 100vh;
}

.dim { color: var(--text-dim); }

/* Layout */
.layout { display: flex; min-height: 100vh; }

.sidebar {
    width: 260px;
    flex-shrink: 0;
    padding: 20px;
    background: var(--card);
    border-right: 1px solid var(--border);
}

.sidebar h2 { font-size: 16px; margin-bottom: 20px; }

.container { flex: 1; padding: 20px; max-width: 1400px; }

/* Controls */
.control { margin-bottom: 18px; }
.control-inline { display: flex; align-items: center; gap: 8px; }

.control-label {
    display: block;
    font-size: 12px;
    color: var(--text-dim);
    text-transform: uppercase;
    margin-bottom: 6px;
}

.symbol-list label { display: block; padding: 3px 0; font-size: 14px; }

select, input[type=range] { width: 100%; }

select {
    padding: 6px;
    border-radius: 6px;
    border: 1px solid var(--border);
    background: var(--bg);
    color: var(--text);
}

/* Header */
header {
    display: flex;
    justify-content: space-between;
    align-items: center;
    margin-bottom: 24px;
    padding-bottom: 16px;
    border-bottom: 1px solid var(--border);
}

h1 { font-size: 24px; font-weight: 600; }

.header-controls {
    display: flex;
    align-items: center;
    gap: 12px;
}

.refresh-time { font-size: 12px; color: var(--text-dim); }

/* Buttons */
.btn {
    padding: 8px 16px;
    border-radius: 6px;
    border: none;
    font-size: 13px;
    font-weight: 500;
    cursor: pointer;
    transition: all 0.2s;
}

.btn:disabled { opacity: 0.6; cursor: not-allowed; }
.btn-primary { background: var(--blue); color: #fff; width: 100%; }
.btn-primary:hover:not(:disabled) { filter: brightness(0.9); }
.btn-secondary { background: var(--border); color: var(--text); }

/* Cards */
.card {
    background: var(--card);
    border: 1px solid var(--border);
    border-radius: 12px;
    padding: 20px;
    margin-bottom: 16px;
}

.card-header {
    display: flex;
    justify-content: space-between;
    align-items: center;
    margin-bottom: 12px;
}

.card-title { font-size: 18px; font-weight: 600; }

/* Metrics */
.metrics {
    display: flex;
    flex-wrap: wrap;
    gap: 16px;
    margin-bottom: 12px;
}

.metric { flex: 1; min-width: 100px; }
.metric-label { font-size: 11px; color: var(--text-dim); text-transform: uppercase; }
.metric-value { font-size: 18px; font-weight: 600; margin-top: 2px; }

.positive { color: var(--green); }
.negative { color: var(--red); }

/* Alerts */
.alert {
    padding: 10px 14px;
    border-radius: 8px;
    font-size: 14px;
    margin-bottom: 12px;
}

.alert-overbought { background: rgba(248, 81, 73, 0.15); color: var(--red); }
.alert-oversold { background: rgba(63, 185, 80, 0.15); color: var(--green); }
.alert-warning { background: rgba(210, 153, 34, 0.15); color: var(--yellow); }

/* Tabs */
.tabs { display: flex; gap: 4px; border-bottom: 1px solid var(--border); margin-bottom: 12px; }

.tab {
    padding: 8px 14px;
    cursor: pointer;
    font-size: 13px;
    color: var(--text-dim);
    border-bottom: 2px solid transparent;
    background: none;
    border-top: none;
    border-left: none;
    border-right: none;
}

.tab.active { color: var(--text); border-bottom-color: var(--blue); }
.tab-panel { display: none; }
.tab-panel.active { display: block; }

.chart { width: 100%; min-height: 420px; }
.chart-small { width: 100%; min-height: 280px; }

/* Responsive */
@media (max-width: 800px) {
    .layout { flex-direction: column; }
    .sidebar { width: 100%; border-right: none; border-bottom: 1px solid var(--border); }
    header { flex-direction: column; gap: 12px; }
}
";
