//! Rank Correlation Index.
//!
//! Spearman rank correlation between time order and price order over the
//! most recent `window` closes, scaled to [-100, 100].
//!
//! ```text
//! d_i = date_rank_i - price_rank_i
//! rci = (1 - 6 * sum(d_i^2) / (n * (n^2 - 1))) * 100
//! ```
//!
//! Ranking conventions:
//! - date rank: oldest point in the window is 1, the most recent is `n`
//! - price rank: ascending (lowest close is 1), ties broken by first
//!   occurrence, never averaged
//!
//! With these conventions a strictly rising window reads +100 and a strictly
//! falling one reads -100.

use crate::types::PriceSeries;

/// Windows below this size have a zero denominator.
pub const MIN_WINDOW: usize = 2;

/// RCI over the last `window` points of `series`.
///
/// Returns `None` when the series is shorter than `window` or the window is
/// degenerate.
pub fn rci(series: &PriceSeries, window: usize) -> Option<f64> {
    rci_closes(&series.closes(), window)
}

/// Same as [`rci`] over a bare slice of closes, oldest first.
pub fn rci_closes(closes: &[f64], window: usize) -> Option<f64> {
    if window < MIN_WINDOW || closes.len() < window {
        return None;
    }

    let tail = &closes[closes.len() - window..];

    // `sort_by` is stable, so equal closes keep their chronological order.
    let mut by_price: Vec<usize> = (0..window).collect();
    by_price.sort_by(|&a, &b| tail[a].total_cmp(&tail[b]));

    let sum_d2: f64 = by_price
        .iter()
        .enumerate()
        .map(|(price_idx, &date_idx)| {
            let d = date_idx as f64 - price_idx as f64;
            d * d
        })
        .sum();

    let n = window as f64;
    let value = (1.0 - 6.0 * sum_d2 / (n * (n * n - 1.0))) * 100.0;

    Some(value.clamp(-100.0, 100.0))
}
