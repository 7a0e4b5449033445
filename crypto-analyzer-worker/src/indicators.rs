//! Standard technical indicators
//!
//! Every function returns a column the same length as its input, with
//! `None` for warm-up positions where the window is not yet filled.
//!
//! Smoothing conventions:
//! - `ewm`: recursive exponential mean (`y = (1-a)·y + a·x`), seeded at the
//!   first defined input, emitted once `min_periods` inputs were seen
//! - `ema_adjusted`: bias-corrected exponential mean, defined from the start
//! - Wilder smoothing for ATR and ADX

/// Recursive exponentially weighted mean over an optional column
pub fn ewm(values: &[Option<f64>], alpha: f64, min_periods: usize) -> Vec<Option<f64>> {
    let mut state: Option<f64> = None;
    let mut seen = 0usize;

    values
        .iter()
        .map(|value| {
            if let Some(x) = *value {
                seen += 1;
                state = Some(match state {
                    Some(prev) => (1.0 - alpha) * prev + alpha * x,
                    None => x,
                });
            }
            if seen >= min_periods.max(1) { state } else { None }
        })
        .collect()
}

/// EMA with smoothing `2 / (span + 1)`, emitted after `span` values
pub fn ema(values: &[f64], span: usize) -> Vec<Option<f64>> {
    let column: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
    ewm(&column, 2.0 / (span as f64 + 1.0), span)
}

/// Bias-adjusted EMA: each point is the exponentially weighted average of all
/// values so far, weights `(1-a)^k`. Defined from the first value.
pub fn ema_adjusted(values: &[f64], span: usize) -> Vec<Option<f64>> {
    let decay = 1.0 - 2.0 / (span as f64 + 1.0);
    let mut numerator = 0.0;
    let mut denominator = 0.0;

    values
        .iter()
        .map(|&x| {
            numerator = x + decay * numerator;
            denominator = 1.0 + decay * denominator;
            Some(numerator / denominator)
        })
        .collect()
}

/// Relative Strength Index with Wilder-style smoothing (`a = 1/window`)
pub fn rsi(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; closes.len()];
    }

    // The first bar has no previous close and counts as a zero move
    let diffs: Vec<f64> = std::iter::once(0.0)
        .chain(closes.windows(2).map(|w| w[1] - w[0]))
        .take(closes.len())
        .collect();
    let gains: Vec<Option<f64>> = diffs.iter().map(|&d| Some(d.max(0.0))).collect();
    let losses: Vec<Option<f64>> = diffs.iter().map(|&d| Some((-d).max(0.0))).collect();

    let alpha = 1.0 / window as f64;
    let avg_gain = ewm(&gains, alpha, window);
    let avg_loss = ewm(&losses, alpha, window);

    avg_gain
        .iter()
        .zip(&avg_loss)
        .map(|(gain, loss)| match (*gain, *loss) {
            (Some(_), Some(loss)) if loss == 0.0 => Some(100.0),
            (Some(gain), Some(loss)) => Some(100.0 - 100.0 / (1.0 + gain / loss)),
            _ => None,
        })
        .collect()
}

/// MACD line and signal line
#[derive(Debug, Clone, PartialEq)]
pub struct Macd {
    pub line: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
}

/// MACD(fast, slow, signal)
pub fn macd(closes: &[f64], fast: usize, slow: usize, signal: usize) -> Macd {
    let fast_ema = ema(closes, fast);
    let slow_ema = ema(closes, slow);

    let line: Vec<Option<f64>> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| Some((*f)? - (*s)?))
        .collect();
    let signal = ewm(&line, 2.0 / (signal as f64 + 1.0), signal);

    Macd { line, signal }
}

/// Upper and lower Bollinger bands
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerBands {
    pub upper: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// Bollinger bands: rolling mean ± `num_std` population standard deviations
pub fn bollinger(closes: &[f64], window: usize, num_std: f64) -> BollingerBands {
    let mut upper = vec![None; closes.len()];
    let mut lower = vec![None; closes.len()];

    if window == 0 {
        return BollingerBands { upper, lower };
    }

    for (end, slice) in closes.windows(window).enumerate() {
        let idx = end + window - 1;
        let n = window as f64;
        let mean = slice.iter().sum::<f64>() / n;
        let variance = slice.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        let std = variance.sqrt();
        upper[idx] = Some(mean + num_std * std);
        lower[idx] = Some(mean - num_std * std);
    }

    BollingerBands { upper, lower }
}

/// True range; the first bar uses its own high-low range
pub fn true_range(highs: &[f64], lows: &[f64], closes: &[f64]) -> Vec<f64> {
    (0..closes.len())
        .map(|i| {
            let range = highs[i] - lows[i];
            if i == 0 {
                range
            } else {
                let prev_close = closes[i - 1];
                range
                    .max((highs[i] - prev_close).abs())
                    .max((lows[i] - prev_close).abs())
            }
        })
        .collect()
}

/// Average True Range with Wilder smoothing. First value at `window - 1`.
pub fn atr(highs: &[f64], lows: &[f64], closes: &[f64], window: usize) -> Vec<Option<f64>> {
    let tr = true_range(highs, lows, closes);
    let mut out = vec![None; tr.len()];

    if window == 0 || tr.len() < window {
        return out;
    }

    let w = window as f64;
    let mut current = tr[..window].iter().sum::<f64>() / w;
    out[window - 1] = Some(current);
    for i in window..tr.len() {
        current = (current * (w - 1.0) + tr[i]) / w;
        out[i] = Some(current);
    }
    out
}

/// Average Directional Index (Wilder). First value at `2 * window - 1`.
pub fn adx(highs: &[f64], lows: &[f64], closes: &[f64], window: usize) -> Vec<Option<f64>> {
    let len = closes.len();
    let mut out = vec![None; len];

    if window == 0 || len < 2 * window {
        return out;
    }

    let tr = true_range(highs, lows, closes);
    let mut plus_dm = vec![0.0; len];
    let mut minus_dm = vec![0.0; len];
    for i in 1..len {
        let up = highs[i] - highs[i - 1];
        let down = lows[i - 1] - lows[i];
        if up > down && up > 0.0 {
            plus_dm[i] = up;
        }
        if down > up && down > 0.0 {
            minus_dm[i] = down;
        }
    }

    let w = window as f64;
    let mut smoothed_tr: f64 = tr[1..=window].iter().sum();
    let mut smoothed_plus: f64 = plus_dm[1..=window].iter().sum();
    let mut smoothed_minus: f64 = minus_dm[1..=window].iter().sum();

    let dx = |tr: f64, plus: f64, minus: f64| -> f64 {
        if tr == 0.0 {
            return 0.0;
        }
        let plus_di = 100.0 * plus / tr;
        let minus_di = 100.0 * minus / tr;
        let sum = plus_di + minus_di;
        if sum == 0.0 { 0.0 } else { 100.0 * (plus_di - minus_di).abs() / sum }
    };

    // DX from index `window` onward
    let mut dx_values = Vec::with_capacity(len - window);
    dx_values.push(dx(smoothed_tr, smoothed_plus, smoothed_minus));
    for i in window + 1..len {
        smoothed_tr = smoothed_tr - smoothed_tr / w + tr[i];
        smoothed_plus = smoothed_plus - smoothed_plus / w + plus_dm[i];
        smoothed_minus = smoothed_minus - smoothed_minus / w + minus_dm[i];
        dx_values.push(dx(smoothed_tr, smoothed_plus, smoothed_minus));
    }

    let first = 2 * window - 1;
    let mut current = dx_values[..window].iter().sum::<f64>() / w;
    out[first] = Some(current);
    for i in first + 1..len {
        current = (current * (w - 1.0) + dx_values[i - window]) / w;
        out[i] = Some(current);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Option<f64>, b: f64) -> bool {
        a.is_some_and(|a| (a - b).abs() < 1e-9)
    }

    fn leading_none(column: &[Option<f64>]) -> usize {
        column.iter().take_while(|v| v.is_none()).count()
    }

    #[test]
    fn test_ewm_seeds_at_first_value() {
        let out = ewm(&[None, Some(10.0), Some(20.0)], 0.5, 1);
        assert_eq!(out[0], None);
        assert!(approx(out[1], 10.0));
        assert!(approx(out[2], 15.0));
    }

    #[test]
    fn test_ema_adjusted_known_values() {
        // span 3 -> a = 0.5: [1, (2 + 0.5)/1.5, (3 + 1 + 0.25)/1.75]
        let out = ema_adjusted(&[1.0, 2.0, 3.0], 3);
        assert!(approx(out[0], 1.0));
        assert!(approx(out[1], 2.5 / 1.5));
        assert!(approx(out[2], 4.25 / 1.75));
    }

    #[test]
    fn test_rsi_warmup_and_extremes() {
        let rising: Vec<f64> = (0..30).map(|i| 100.0 + f64::from(i)).collect();
        let out = rsi(&rising, 14);
        assert_eq!(out.len(), 30);
        assert_eq!(leading_none(&out), 13);
        assert!(approx(out[29], 100.0));

        let falling: Vec<f64> = rising.iter().rev().copied().collect();
        let out = rsi(&falling, 14);
        assert!(out[29].is_some_and(|v| v < 1e-9));
    }

    #[test]
    fn test_rsi_is_bounded() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + (f64::from(i) * 0.7).sin() * 5.0).collect();
        for value in rsi(&closes, 14).into_iter().flatten() {
            assert!((0.0..=100.0).contains(&value));
        }
    }

    #[test]
    fn test_macd_warmup() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + f64::from(i)).collect();
        let out = macd(&closes, 12, 26, 9);
        assert_eq!(leading_none(&out.line), 25);
        assert_eq!(leading_none(&out.signal), 33);
        // Rising prices: fast EMA above slow EMA
        assert!(out.line[59].is_some_and(|v| v > 0.0));
    }

    #[test]
    fn test_bollinger_constant_series() {
        let closes = vec![50.0; 25];
        let bands = bollinger(&closes, 20, 2.0);
        assert_eq!(leading_none(&bands.upper), 19);
        assert!(approx(bands.upper[24], 50.0));
        assert!(approx(bands.lower[24], 50.0));
    }

    #[test]
    fn test_bollinger_population_std() {
        let bands = bollinger(&[1.0, 3.0], 2, 2.0);
        // mean 2, population std 1
        assert!(approx(bands.upper[1], 4.0));
        assert!(approx(bands.lower[1], 0.0));
    }

    #[test]
    fn test_true_range_uses_previous_close() {
        let tr = true_range(&[10.0, 12.0], &[9.0, 11.0], &[9.5, 11.5]);
        assert!((tr[0] - 1.0).abs() < 1e-12);
        assert!((tr[1] - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_atr_wilder() {
        let highs = [2.0, 2.0, 2.0, 4.0];
        let lows = [1.0, 1.0, 1.0, 1.0];
        let closes = [1.5, 1.5, 1.5, 1.5];
        let out = atr(&highs, &lows, &closes, 3);
        assert_eq!(leading_none(&out), 2);
        assert!(approx(out[2], 1.0));
        assert!(approx(out[3], (1.0 * 2.0 + 3.0) / 3.0));
    }

    #[test]
    fn test_adx_strong_trend() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + f64::from(i)).collect();
        let highs: Vec<f64> = closes.iter().map(|c| c + 0.5).collect();
        let lows: Vec<f64> = closes.iter().map(|c| c - 0.5).collect();
        let out = adx(&highs, &lows, &closes, 14);
        assert_eq!(out.len(), 60);
        assert_eq!(leading_none(&out), 27);
        // Only upward movement: DX is 100 every bar
        assert!(approx(out[59], 100.0));
    }

    #[test]
    fn test_short_inputs_yield_no_values() {
        let closes = [1.0, 2.0, 3.0];
        assert!(adx(&closes, &closes, &closes, 14).iter().all(Option::is_none));
        assert!(atr(&closes, &closes, &closes, 14).iter().all(Option::is_none));
        assert!(bollinger(&closes, 20, 2.0).upper.iter().all(Option::is_none));
    }
}
