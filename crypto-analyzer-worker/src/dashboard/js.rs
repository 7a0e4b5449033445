//! Dashboard JavaScript
//!
//! Client-side logic for the analyzer:
//! - Builds the sidebar from `/api/config`
//! - Requests `/api/analysis` with the current selections
//! - Draws Plotly charts per symbol, shows alerts and warnings
//! - CSV download from the report's embedded blob

pub const SCRIPT: &str = r#"
// ============================================================================
// State
// ============================================================================
let appConfig = null;
let lastReport = null;

// ============================================================================
// API Functions
// ============================================================================
async function fetchJSON(endpoint) {
    try {
        const res = await fetch(endpoint);
        return await res.json();
    } catch (e) {
        console.error(`Error fetching ${endpoint}:`, e);
        return null;
    }
}

// ============================================================================
// Formatting Utilities
// ============================================================================
function formatNumber(value, digits) {
    if (value == null || isNaN(value)) return '--';
    return parseFloat(value).toFixed(digits);
}

function escapeHtml(text) {
    const div = document.createElement('div');
    div.textContent = text;
    return div.innerHTML;
}

function domId(symbol) {
    return symbol.replace(/[^A-Za-z0-9]/g, '_');
}

// ============================================================================
// Sidebar
// ============================================================================
function buildSidebar(config) {
    const list = document.getElementById('symbolList');
    list.innerHTML = config.symbols.map(s => {
        const checked = config.default_symbols.includes(s) ? 'checked' : '';
        return `<label><input type="checkbox" name="symbol" value="${s}" ${checked}> ${s}</label>`;
    }).join('');

    const select = document.getElementById('intervalSelect');
    select.innerHTML = config.intervals.map(i => {
        const selected = i === config.default_interval ? 'selected' : '';
        return `<option value="${i}" ${selected}>${i}</option>`;
    }).join('');

    const slider = document.getElementById('limitSlider');
    slider.min = config.min_limit;
    slider.max = config.max_limit;
    slider.value = config.default_limit;
    document.getElementById('limitValue').textContent = slider.value;
    slider.oninput = () => { document.getElementById('limitValue').textContent = slider.value; };

    const dark = document.getElementById('darkMode');
    dark.checked = config.dark_mode;
    applyTheme(dark.checked);
    dark.onchange = () => { applyTheme(dark.checked); renderDashboard(); };
}

function applyTheme(dark) {
    document.body.className = dark ? 'theme-dark' : 'theme-light';
}

function currentQuery() {
    const symbols = Array.from(document.querySelectorAll('input[name=symbol]:checked')).map(el => el.value);
    const params = new URLSearchParams({
        symbols: symbols.join(','),
        interval: document.getElementById('intervalSelect').value,
        limit: document.getElementById('limitSlider').value,
        theme: document.getElementById('darkMode').checked ? 'dark' : 'light',
    });
    return params.toString();
}

// ============================================================================
// Rendering
// ============================================================================
function alertHtml(alert, symbol) {
    if (alert === 'overbought') {
        return `<div class="alert alert-overbought">⚠️ ${symbol} RSI &gt; ${lastReport.rsi_overbought} (overbought)</div>`;
    }
    if (alert === 'oversold') {
        return `<div class="alert alert-oversold">✅ ${symbol} RSI &lt; ${lastReport.rsi_oversold} (oversold)</div>`;
    }
    return '';
}

function readyCard(r) {
    const id = domId(r.symbol);
    const trendClass = r.latest.trend === 'up' ? 'positive' : 'negative';
    return `<div class="card" id="card-${id}">
        <div class="card-header"><span class="card-title">📈 ${r.symbol}</span></div>
        ${alertHtml(r.alert, r.symbol)}
        <div class="metrics">
            <div class="metric"><div class="metric-label">Close</div><div class="metric-value">${formatNumber(r.latest.close, 4)}</div></div>
            <div class="metric"><div class="metric-label">RSI</div><div class="metric-value">${formatNumber(r.latest.rsi, 1)}</div></div>
            <div class="metric"><div class="metric-label">ADX</div><div class="metric-value">${formatNumber(r.latest.adx, 1)}</div></div>
            <div class="metric"><div class="metric-label">MACD</div><div class="metric-value">${formatNumber(r.latest.macd, 4)}</div></div>
            <div class="metric"><div class="metric-label">Supertrend</div><div class="metric-value ${trendClass}">${r.latest.trend.toUpperCase()}</div></div>
        </div>
        <div class="tabs">
            <button class="tab active" onclick="showTab('${id}', 'price', this)">Price Chart</button>
            <button class="tab" onclick="showTab('${id}', 'indicators', this)">Indicators</button>
            <button class="tab" onclick="showTab('${id}', 'download', this)">Download</button>
        </div>
        <div class="tab-panel active" id="${id}-price"><div class="chart" id="${id}-price-chart"></div></div>
        <div class="tab-panel" id="${id}-indicators">
            <div class="chart-small" id="${id}-ind-0"></div>
            <div class="chart-small" id="${id}-ind-1"></div>
        </div>
        <div class="tab-panel" id="${id}-download">
            <button class="btn btn-secondary" onclick="downloadCsv('${r.symbol}')">Download ${r.symbol} data</button>
        </div>
    </div>`;
}

function messageCard(r) {
    if (r.status === 'skipped') {
        return `<div class="card"><div class="card-header"><span class="card-title">📈 ${r.symbol}</span></div>
            <div class="alert alert-warning">${escapeHtml(r.warning)}</div></div>`;
    }
    return `<div class="card"><div class="card-header"><span class="card-title">📈 ${r.symbol}</span></div>
        <div class="alert alert-overbought">❌ ${escapeHtml(r.error)}</div></div>`;
}

function lineTrace(trace, x) {
    const line = {};
    if (trace.color) line.color = trace.color;
    if (trace.dash) line.dash = trace.dash;
    return { type: 'scatter', mode: 'lines', x: x, y: trace.values, name: trace.name, line: line };
}

function themedLayout(style, extra) {
    const axis = { gridcolor: style.grid_color, zerolinecolor: style.grid_color };
    return Object.assign({
        paper_bgcolor: style.paper_bgcolor,
        plot_bgcolor: style.plot_bgcolor,
        font: { color: style.font_color },
        xaxis: Object.assign({}, axis),
        yaxis: Object.assign({}, axis),
    }, extra);
}

function drawCharts(r, style) {
    const id = domId(r.symbol);
    const pc = r.price_chart;
    const candles = {
        type: 'candlestick', x: pc.time, open: pc.open, high: pc.high, low: pc.low, close: pc.close, name: 'Price'
    };
    const traces = [candles].concat(pc.overlays.map(t => lineTrace(t, pc.time)));
    const layout = themedLayout(style, { margin: { t: 30 } });
    layout.xaxis.rangeslider = { visible: false };
    Plotly.newPlot(`${id}-price-chart`, traces, layout, { responsive: true });

    r.indicator_charts.forEach((chart, idx) => {
        Plotly.newPlot(`${id}-ind-${idx}`, chart.traces.map(t => lineTrace(t, pc.time)),
            themedLayout(style, { title: chart.title, margin: { t: 40 } }), { responsive: true });
    });
}

function showTab(id, name, button) {
    ['price', 'indicators', 'download'].forEach(tab => {
        document.getElementById(`${id}-${tab}`).classList.toggle('active', tab === name);
    });
    button.parentElement.querySelectorAll('.tab').forEach(b => b.classList.toggle('active', b === button));
    // Plotly sizes hidden charts at zero width
    window.dispatchEvent(new Event('resize'));
}

function downloadCsv(symbol) {
    if (!lastReport) return;
    const r = lastReport.symbols.find(s => s.symbol === symbol && s.status === 'ready');
    if (!r) return;
    const blob = new Blob([r.csv], { type: 'text/csv;charset=utf-8' });
    const link = document.createElement('a');
    link.href = URL.createObjectURL(blob);
    link.download = r.csv_filename;
    link.click();
    URL.revokeObjectURL(link.href);
}

// ============================================================================
// Main Update Function
// ============================================================================
async function renderDashboard() {
    const btn = document.getElementById('renderBtn');
    const container = document.getElementById('reports');
    btn.disabled = true;
    btn.textContent = '⏳ Loading...';

    const report = await fetchJSON('/api/analysis?' + currentQuery());

    btn.disabled = false;
    btn.textContent = '📊 Analyze';

    if (!report || report.error) {
        container.innerHTML = `<div class="card"><div class="alert alert-overbought">❌ ${escapeHtml(report?.message || 'Request failed')}</div></div>`;
        return;
    }

    lastReport = report;
    document.getElementById('refreshTime').textContent =
        'Updated: ' + new Date(report.generated_at).toLocaleTimeString() + ' · ' + report.interval + ' · ' + report.limit + ' candles';

    if (report.symbols.length === 0) {
        container.innerHTML = '<div class="card"><span class="dim">Select at least one pair.</span></div>';
        return;
    }

    container.innerHTML = report.symbols.map(r => r.status === 'ready' ? readyCard(r) : messageCard(r)).join('');
    report.symbols.filter(r => r.status === 'ready').forEach(r => drawCharts(r, report.chart_style));
}

// ============================================================================
// Initialization
// ============================================================================
(async function init() {
    appConfig = await fetchJSON('/api/config');
    if (!appConfig) {
        document.getElementById('reports').innerHTML = '<div class="card"><div class="alert alert-overbought">❌ Could not load configuration</div></div>';
        return;
    }
    buildSidebar(appConfig);
    renderDashboard();
})();
"#;
