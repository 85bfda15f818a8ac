//! Embedded HTML/CSS/JS frontend for the rideboard dashboard.
//!
//! The entire SPA is compiled into the binary as a string constant.
//! No external assets, no build tools, no CDN dependencies.
//!
//! Assistant messages flagged `html: true` by the API are injected into the
//! page as raw markup, unescaped — the webhook endpoint is trusted by
//! configuration (see `chat::TrustedHtml`).

/// The complete single-page dashboard HTML.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Ride Analytics Dashboard</title>
<style>
:root {
  --bg: #f9fafb;
  --card: #ffffff;
  --border: #e5e7eb;
  --text: #111827;
  --text-muted: #6b7280;
  --ink: #111827;
  --green: #059669;
  --green-line: #10b981;
  --red: #dc2626;
  --blue: #2563eb;
  --purple: #7c3aed;
  --radius: 12px;
  --font: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
}

* { margin: 0; padding: 0; box-sizing: border-box; }
body {
  background: var(--bg);
  color: var(--text);
  font-family: var(--font);
  font-size: 14px;
  line-height: 1.5;
}

/* Header */
header {
  background: #000;
  color: #fff;
  padding: 16px 24px;
}

.header-inner {
  max-width: 1120px;
  margin: 0 auto;
  display: flex;
  align-items: center;
  justify-content: space-between;
}

header h1 { font-size: 22px; font-weight: 700; }
header .updated { font-size: 13px; color: #d1d5db; }

/* Layout */
.app {
  max-width: 1120px;
  margin: 0 auto;
  padding: 32px 24px 96px;
}

.card {
  background: var(--card);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 24px;
  box-shadow: 0 1px 2px rgba(0, 0, 0, 0.04);
  margin-bottom: 24px;
}

.card h2 {
  font-size: 16px;
  font-weight: 600;
  margin-bottom: 16px;
}

/* Metric cards */
.metrics-grid {
  display: grid;
  grid-template-columns: repeat(4, 1fr);
  gap: 24px;
  margin-bottom: 24px;
}

.metric-card {
  background: var(--card);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 24px;
  box-shadow: 0 1px 2px rgba(0, 0, 0, 0.04);
}

.metric-card .label {
  font-size: 13px;
  font-weight: 500;
  color: var(--text-muted);
}

.metric-card .value {
  font-size: 26px;
  font-weight: 700;
  margin: 2px 0;
}

.metric-card .delta {
  font-size: 12px;
  display: inline-flex;
  align-items: center;
  gap: 4px;
}

.metric-card .delta.up { color: var(--green); }
.metric-card .delta.down { color: var(--red); }
.metric-card .delta .arrow { font-size: 11px; }

/* Two-column section */
.columns {
  display: grid;
  grid-template-columns: 1fr 1fr;
  gap: 24px;
}

.columns .card { margin-bottom: 24px; }

/* Chart */
.chart-wrap { width: 100%; }
.chart-wrap svg { width: 100%; height: auto; display: block; }

.chart-legend {
  display: flex;
  gap: 20px;
  justify-content: center;
  margin-top: 8px;
  font-size: 12px;
  color: var(--text-muted);
}

.chart-legend .key {
  display: inline-flex;
  align-items: center;
  gap: 6px;
}

.chart-legend .swatch {
  width: 10px;
  height: 10px;
  border-radius: 50%;
}

/* Locations */
.location-row {
  display: flex;
  align-items: center;
  justify-content: space-between;
  padding: 8px 0;
}

.location-row .name {
  display: inline-flex;
  align-items: center;
  gap: 10px;
  font-weight: 500;
}

.location-row .dot {
  width: 10px;
  height: 10px;
  border-radius: 50%;
  background: #3b82f6;
}

.location-row .rides { font-weight: 600; text-align: right; }
.location-row .pct {
  font-size: 12px;
  color: var(--text-muted);
  text-align: right;
}

/* Segments */
.segment-row {
  display: flex;
  justify-content: space-between;
  padding: 6px 0;
}

.segment-row .share { font-weight: 600; }

/* Performance */
.perf-grid {
  display: grid;
  grid-template-columns: repeat(3, 1fr);
  gap: 24px;
  text-align: center;
}

.perf-grid .big {
  font-size: 30px;
  font-weight: 700;
  margin-bottom: 4px;
}

.perf-grid .big.blue { color: var(--blue); }
.perf-grid .big.green { color: var(--green); }
.perf-grid .big.purple { color: var(--purple); }
.perf-grid .caption { font-size: 13px; color: var(--text-muted); }

/* Chat launcher */
.chat-launcher {
  position: fixed;
  bottom: 24px;
  right: 24px;
  width: 56px;
  height: 56px;
  border: none;
  border-radius: 50%;
  background: #000;
  color: #fff;
  cursor: pointer;
  box-shadow: 0 10px 20px rgba(0, 0, 0, 0.25);
  display: flex;
  align-items: center;
  justify-content: center;
  transition: transform 0.2s;
  z-index: 50;
}

.chat-launcher:hover { background: #1f2937; }
.chat-launcher.hidden { transform: scale(0); }

/* Chat panel */
.chat-panel {
  position: fixed;
  bottom: 24px;
  right: 24px;
  width: 384px;
  height: 480px;
  background: var(--card);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  box-shadow: 0 20px 40px rgba(0, 0, 0, 0.25);
  display: none;
  flex-direction: column;
  overflow: hidden;
  z-index: 50;
}

.chat-panel.open { display: flex; }

.chat-header {
  background: #000;
  color: #fff;
  padding: 14px 16px;
  display: flex;
  align-items: center;
  justify-content: space-between;
}

.chat-header .who {
  display: flex;
  align-items: center;
  gap: 10px;
}

.chat-header .avatar {
  width: 32px;
  height: 32px;
  border-radius: 50%;
  background: #22c55e;
  display: flex;
  align-items: center;
  justify-content: center;
}

.chat-header h3 { font-size: 14px; font-weight: 600; }
.chat-header .sub { font-size: 11px; color: #d1d5db; }

.chat-close {
  background: none;
  border: none;
  color: #d1d5db;
  font-size: 18px;
  cursor: pointer;
}

.chat-close:hover { color: #fff; }

.chat-messages {
  flex: 1;
  padding: 16px;
  overflow-y: auto;
  display: flex;
  flex-direction: column;
  gap: 12px;
}

.bubble-row { display: flex; }
.bubble-row.user { justify-content: flex-end; }
.bubble-row.assistant { justify-content: flex-start; }

.bubble {
  max-width: 75%;
  padding: 8px 14px;
  border-radius: 10px;
  font-size: 13px;
}

.bubble-row.user .bubble { background: #000; color: #fff; }
.bubble-row.assistant .bubble { background: #f3f4f6; color: var(--text); }

.bubble .time {
  font-size: 11px;
  margin-top: 4px;
}

.bubble-row.user .time { color: #d1d5db; }
.bubble-row.assistant .time { color: var(--text-muted); }

.bubble .rich p { margin-bottom: 6px; }
.bubble .rich p:last-child { margin-bottom: 0; }
.bubble .rich ul, .bubble .rich ol { padding-left: 18px; }

.thinking {
  display: inline-flex;
  align-items: center;
  gap: 8px;
  background: #f3f4f6;
  padding: 8px 14px;
  border-radius: 10px;
  font-size: 13px;
}

.spinner {
  width: 14px;
  height: 14px;
  border: 2px solid var(--border);
  border-top-color: var(--text-muted);
  border-radius: 50%;
  animation: spin 0.6s linear infinite;
}

@keyframes spin { to { transform: rotate(360deg); } }

.chat-input-row {
  border-top: 1px solid var(--border);
  padding: 12px;
  display: flex;
  gap: 8px;
}

.chat-input-row input {
  flex: 1;
  padding: 8px 12px;
  border: 1px solid #d1d5db;
  border-radius: 8px;
  font-size: 13px;
  outline: none;
}

.chat-input-row input:focus { border-color: #000; }
.chat-input-row input:disabled { opacity: 0.5; }

.chat-send {
  background: #000;
  color: #fff;
  border: none;
  border-radius: 8px;
  padding: 8px 12px;
  cursor: pointer;
  display: flex;
  align-items: center;
}

.chat-send:hover { background: #1f2937; }
.chat-send:disabled { opacity: 0.5; cursor: not-allowed; }

/* Responsive */
@media (max-width: 900px) {
  .metrics-grid { grid-template-columns: repeat(2, 1fr); }
  .columns { grid-template-columns: 1fr; }
}

@media (max-width: 480px) {
  .metrics-grid { grid-template-columns: 1fr; }
  .chat-panel { width: calc(100vw - 24px); right: 12px; }
}
</style>
</head>
<body>

<!-- Header -->
<header>
  <div class="header-inner">
    <h1>Ride Analytics Dashboard</h1>
    <span class="updated">Last updated: <span id="last-updated"></span></span>
  </div>
</header>

<main class="app">

  <!-- Key metrics -->
  <div class="metrics-grid" id="metrics-grid"></div>

  <!-- Customer segments -->
  <div class="card">
    <h2>Customer Segments</h2>
    <div id="segments"></div>
  </div>

  <!-- Chart + locations -->
  <div class="columns">
    <div class="card">
      <h2>Rides Over Time</h2>
      <div class="chart-wrap" id="rides-chart"></div>
      <div class="chart-legend">
        <span class="key"><span class="swatch" style="background:#111827"></span>Rides</span>
        <span class="key"><span class="swatch" style="background:#10b981"></span>Surge Trips</span>
      </div>
    </div>
    <div class="card">
      <h2>Top Locations</h2>
      <div id="locations"></div>
    </div>
  </div>

  <!-- Performance overview -->
  <div class="card">
    <h2>Performance Overview</h2>
    <div class="perf-grid" id="performance"></div>
  </div>

</main>

<!-- Chat launcher -->
<button class="chat-launcher" id="chat-launcher" title="Analytics Assistant">
  <svg width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="currentColor"
       stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
    <path d="M21 11.5a8.38 8.38 0 0 1-.9 3.8 8.5 8.5 0 0 1-7.6 4.7 8.38 8.38 0 0 1-3.8-.9L3 21l1.9-5.7a8.38 8.38 0 0 1-.9-3.8 8.5 8.5 0 0 1 4.7-7.6 8.38 8.38 0 0 1 3.8-.9h.5a8.48 8.48 0 0 1 8 8v.5z"/>
  </svg>
</button>

<!-- Chat panel -->
<div class="chat-panel" id="chat-panel">
  <div class="chat-header">
    <div class="who">
      <div class="avatar">
        <svg width="14" height="14" viewBox="0 0 24 24" fill="none" stroke="#fff"
             stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
          <path d="M21 11.5a8.38 8.38 0 0 1-.9 3.8 8.5 8.5 0 0 1-7.6 4.7 8.38 8.38 0 0 1-3.8-.9L3 21l1.9-5.7a8.38 8.38 0 0 1-.9-3.8 8.5 8.5 0 0 1 4.7-7.6 8.38 8.38 0 0 1 3.8-.9h.5a8.48 8.48 0 0 1 8 8v.5z"/>
        </svg>
      </div>
      <div>
        <h3>Analytics Assistant</h3>
        <div class="sub">Ask me about your data</div>
      </div>
    </div>
    <button class="chat-close" id="chat-close">&#10005;</button>
  </div>
  <div class="chat-messages" id="chat-messages"></div>
  <div class="chat-input-row">
    <input type="text" id="chat-input" placeholder="Ask about your analytics..." autocomplete="off">
    <button class="chat-send" id="chat-send" title="Send">
      <svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor"
           stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
        <line x1="22" y1="2" x2="11" y2="13"/>
        <polygon points="22 2 15 22 11 13 2 9 22 2"/>
      </svg>
    </button>
  </div>
</div>

<script>
// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------
function esc(s) {
  const div = document.createElement('div');
  div.textContent = s;
  return div.innerHTML;
}

function fmt(n) { return n.toLocaleString(); }

function clock(iso) {
  return new Date(iso).toLocaleTimeString([], { hour: '2-digit', minute: '2-digit' });
}

async function api(method, path, body) {
  const opts = { method, headers: {} };
  if (body !== undefined) {
    opts.headers['Content-Type'] = 'application/json';
    opts.body = JSON.stringify(body);
  }
  const res = await fetch(path, opts);
  if (!res.ok) throw new Error('HTTP ' + res.status);
  return res.json();
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------
async function loadDashboard() {
  const data = await api('GET', '/api/dashboard');

  document.getElementById('metrics-grid').innerHTML = data.metrics.map(m => `
    <div class="metric-card">
      <div class="label">${esc(m.label)}</div>
      <div class="value">${esc(m.value)}</div>
      <div class="delta ${m.trend}">
        <span class="arrow">${m.trend === 'up' ? '&#9650;' : '&#9660;'}</span>
        ${esc(m.delta)}
      </div>
    </div>
  `).join('');

  document.getElementById('segments').innerHTML = data.customer_segments.map(s => `
    <div class="segment-row">
      <span>${esc(s.name)}</span>
      <span class="share">${s.share_pct}%</span>
    </div>
  `).join('');

  renderChart(data.rides_over_time);

  document.getElementById('locations').innerHTML = data.top_locations.map(l => `
    <div class="location-row">
      <span class="name"><span class="dot"></span>${esc(l.name)}</span>
      <span>
        <div class="rides">${fmt(l.rides)}</div>
        <div class="pct">${l.percentage}%</div>
      </span>
    </div>
  `).join('');

  const p = data.performance;
  document.getElementById('performance').innerHTML = `
    <div><div class="big blue">${p.average_rating}</div><div class="caption">Average Rating</div></div>
    <div><div class="big green">${p.completion_rate_pct}%</div><div class="caption">Completion Rate</div></div>
    <div><div class="big purple">${p.avg_wait_minutes}min</div><div class="caption">Avg. Wait Time</div></div>
  `;
}

// Two-series line chart drawn as plain SVG — no charting library.
function renderChart(points) {
  const W = 560, H = 240;
  const padL = 44, padR = 16, padT = 12, padB = 30;
  const innerW = W - padL - padR;
  const innerH = H - padT - padB;

  const yMax = Math.ceil(Math.max(...points.map(p => p.rides)) / 100) * 100;
  const x = i => padL + (i / (points.length - 1)) * innerW;
  const y = v => padT + innerH - (v / yMax) * innerH;

  const gridSteps = 4;
  let grid = '';
  for (let g = 0; g <= gridSteps; g++) {
    const val = (yMax / gridSteps) * g;
    const gy = y(val);
    grid += `<line x1="${padL}" y1="${gy}" x2="${W - padR}" y2="${gy}"
                   stroke="#e5e7eb" stroke-dasharray="3 3"/>`;
    grid += `<text x="${padL - 8}" y="${gy + 4}" text-anchor="end"
                   font-size="11" fill="#6b7280">${val}</text>`;
  }

  const labels = points.map((p, i) =>
    `<text x="${x(i)}" y="${H - 8}" text-anchor="middle"
           font-size="11" fill="#6b7280">${esc(p.date)}</text>`).join('');

  const line = key => points.map((p, i) => `${x(i)},${y(p[key])}`).join(' ');

  const dots = points.map((p, i) => `
    <circle cx="${x(i)}" cy="${y(p.rides)}" r="3" fill="#111827">
      <title>${esc(p.date)}: ${fmt(p.rides)} rides, ${fmt(p.surge)} surge</title>
    </circle>
  `).join('');

  document.getElementById('rides-chart').innerHTML = `
    <svg viewBox="0 0 ${W} ${H}" role="img" aria-label="Rides over time">
      ${grid}
      <polyline points="${line('rides')}" fill="none" stroke="#111827" stroke-width="3"
                stroke-linejoin="round" stroke-linecap="round"/>
      <polyline points="${line('surge')}" fill="none" stroke="#10b981" stroke-width="2"
                stroke-linejoin="round" stroke-linecap="round"/>
      ${dots}
      ${labels}
    </svg>
  `;
}

// ---------------------------------------------------------------------------
// Chat widget
// ---------------------------------------------------------------------------
let pending = false;

function renderTranscript(t) {
  const box = document.getElementById('chat-messages');
  box.innerHTML = t.messages.map(m => `
    <div class="bubble-row ${m.sender}">
      <div class="bubble">
        ${m.html ? `<div class="rich">${m.text}</div>` : `<div>${esc(m.text)}</div>`}
        <div class="time">${clock(m.timestamp)}</div>
      </div>
    </div>
  `).join('');
  if (pending) {
    box.insertAdjacentHTML('beforeend', `
      <div class="bubble-row assistant">
        <div class="thinking"><span class="spinner"></span>Thinking...</div>
      </div>
    `);
  }
  box.scrollTop = box.scrollHeight;
}

function setPending(value) {
  pending = value;
  document.getElementById('chat-input').disabled = value;
  document.getElementById('chat-send').disabled = value;
}

async function loadTranscript() {
  try {
    renderTranscript(await api('GET', '/api/chat'));
  } catch (e) {
    console.error('failed to load transcript', e);
  }
}

async function sendMessage() {
  const input = document.getElementById('chat-input');
  const text = input.value;
  if (!text.trim() || pending) return;

  input.value = '';
  setPending(true);

  // Echo the prompt locally right away; the server response replaces the
  // whole transcript once the webhook answers.
  const box = document.getElementById('chat-messages');
  box.insertAdjacentHTML('beforeend', `
    <div class="bubble-row user"><div class="bubble"><div>${esc(text)}</div></div></div>
    <div class="bubble-row assistant">
      <div class="thinking"><span class="spinner"></span>Thinking...</div>
    </div>
  `);
  box.scrollTop = box.scrollHeight;

  try {
    const t = await api('POST', '/api/chat', { message: text });
    setPending(false);
    renderTranscript(t);
  } catch (e) {
    console.error('chat request failed', e);
    setPending(false);
    loadTranscript();
  }
  input.focus();
}

// ---------------------------------------------------------------------------
// Wiring
// ---------------------------------------------------------------------------
document.getElementById('last-updated').textContent = new Date().toLocaleTimeString();

document.getElementById('chat-launcher').addEventListener('click', () => {
  document.getElementById('chat-panel').classList.add('open');
  document.getElementById('chat-launcher').classList.add('hidden');
  document.getElementById('chat-input').focus();
});

document.getElementById('chat-close').addEventListener('click', () => {
  document.getElementById('chat-panel').classList.remove('open');
  document.getElementById('chat-launcher').classList.remove('hidden');
});

document.getElementById('chat-send').addEventListener('click', sendMessage);
document.getElementById('chat-input').addEventListener('keydown', e => {
  if (e.key === 'Enter' && !e.shiftKey) {
    e.preventDefault();
    sendMessage();
  }
});

loadDashboard().catch(e => console.error('failed to load dashboard', e));
loadTranscript();
</script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frontend_is_self_contained() {
        assert!(INDEX_HTML.contains("<!DOCTYPE html>"));
        // No external resources — everything ships in the binary.
        assert!(!INDEX_HTML.contains("src=\"http"));
        assert!(!INDEX_HTML.contains("href=\"http"));
    }

    #[test]
    fn frontend_talks_to_the_json_api() {
        assert!(INDEX_HTML.contains("/api/dashboard"));
        assert!(INDEX_HTML.contains("/api/chat"));
    }
}
