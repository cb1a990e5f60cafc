//! Outlier-aware legend binning.
//!
//! The displayed range is the raw min/max unless the sample has heavy tails:
//! when the full range is more than ten times the 1st–99th percentile range,
//! the range is clipped to the 0.1st and 99.4th percentiles. Values outside
//! the clipped range still land in the first/last bin.

use mosaic_model::LegendModel;

use crate::palette::discrete_colors;

pub const OUTLIER_RATIO: f64 = 10.0;
const CORE_LOW_Q: f64 = 0.01;
const CORE_HIGH_Q: f64 = 0.99;
const CLIP_LOW_Q: f64 = 0.001;
const CLIP_HIGH_Q: f64 = 0.994;
const EPS: f64 = 1e-12;

/// Builds a legend with `bin_count` bins (at least one) over `values`.
pub fn build_legend(values: &[f64], bin_count: usize) -> LegendModel {
    let bins = bin_count.max(1);

    if values.is_empty() {
        return LegendModel {
            bin_count: bins,
            min: 0.0,
            max: 0.0,
            boundaries: vec![0.0; bins + 1],
            colors: discrete_colors(bins),
            percent_text: vec![String::new(); bins],
        };
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let (min, max) = display_range(&sorted);

    let boundaries = (0..=bins)
        .map(|i| min + (max - min) * i as f64 / bins as f64)
        .collect();

    let mut counts = vec![0usize; bins];
    for &v in values {
        counts[bin_index(v, min, max, bins)] += 1;
    }
    let percent_text = counts
        .iter()
        .map(|&c| format_percent(100.0 * c as f64 / values.len() as f64))
        .collect();

    LegendModel {
        bin_count: bins,
        min,
        max,
        boundaries,
        colors: discrete_colors(bins),
        percent_text,
    }
}

/// Bin of `v` among `bin_count` equal bins over `[min, max]`.
///
/// Values are clamped into range, so the result is always in
/// `0..bin_count` and `max` itself falls into the last bin. A degenerate
/// range (`max <= min`) puts everything in bin 0.
pub fn bin_index(v: f64, min: f64, max: f64, bin_count: usize) -> usize {
    if max <= min || bin_count == 0 {
        return 0;
    }
    let t = ((v - min) / (max - min)).clamp(0.0, 1.0);
    if t.is_nan() {
        return 0;
    }
    let bin = (t * bin_count as f64).floor() as usize;
    bin.min(bin_count - 1)
}

/// Linear-interpolation quantile of an ascending slice.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    match sorted {
        [] => 0.0,
        [only] => *only,
        _ => {
            let q = q.clamp(0.0, 1.0);
            let pos = (sorted.len() - 1) as f64 * q;
            let i = pos.floor() as usize;
            let j = pos.ceil() as usize;
            if i == j {
                return sorted[i];
            }
            let w = pos - i as f64;
            sorted[i] * (1.0 - w) + sorted[j] * w
        }
    }
}

fn display_range(sorted: &[f64]) -> (f64, f64) {
    let raw_min = sorted[0];
    let raw_max = sorted[sorted.len() - 1];

    let core = quantile_sorted(sorted, CORE_HIGH_Q) - quantile_sorted(sorted, CORE_LOW_Q);
    let full = raw_max - raw_min;
    let heavy_outliers = core > EPS && full / core > OUTLIER_RATIO;

    let (min, mut max) = if heavy_outliers {
        log::debug!("legend range clipped: full {full:.4e} vs core {core:.4e}");
        (
            quantile_sorted(sorted, CLIP_LOW_Q),
            quantile_sorted(sorted, CLIP_HIGH_Q),
        )
    } else {
        (raw_min, raw_max)
    };

    if (max - min).abs() < EPS {
        max = min + 1.0;
    }
    (min, max)
}

fn format_percent(pct: f64) -> String {
    if pct > 0.0 && pct < 1.0 {
        "<1%".to_string()
    } else {
        format!("{}%", pct.round_ties_even())
    }
}
