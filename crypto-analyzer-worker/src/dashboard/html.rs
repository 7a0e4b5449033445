//! Dashboard HTML template
//!
//! Contains the page structure including:
//! - Sidebar with symbol, interval, candle-count and theme controls
//! - Header with render time and refresh button
//! - Report container filled per symbol by the script

pub const TEMPLATE: &str = r#"
    <div class="layout">
        <aside class="sidebar">
            <h2>⚙️ Settings</h2>

            <div class="control">
                <label class="control-label">Pairs</label>
                <div class="symbol-list" id="symbolList">
                    <span class="dim">Loading...</span>
                </div>
            </div>

            <div class="control">
                <label class="control-label" for="intervalSelect">Interval</label>
                <select id="intervalSelect"></select>
            </div>

            <div class="control">
                <label class="control-label" for="limitSlider">
                    Candles <span id="limitValue">--</span>
                </label>
                <input type="range" id="limitSlider" min="50" max="1000" value="300">
            </div>

            <div class="control control-inline">
                <input type="checkbox" id="darkMode" checked>
                <label for="darkMode">Dark mode</label>
            </div>

            <button class="btn btn-primary" onclick="renderDashboard()" id="renderBtn">📊 Analyze</button>
        </aside>

        <main class="container">
            <header>
                <div>
                    <h1>📈 Crypto Analyzer PRO</h1>
                    <span class="refresh-time" id="refreshTime">Loading...</span>
                </div>
                <div class="header-controls">
                    <button class="btn btn-secondary" onclick="renderDashboard()" id="refreshBtn">🔄 Refresh</button>
                </div>
            </header>

            <div id="reports">
                <div class="card"><span class="dim">Select at least one pair.</span></div>
            </div>
        </main>
    </div>
"#;
