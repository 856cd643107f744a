//! Sub-score calculations. Every function here is total: non-finite input
//! collapses to 0 before clamping, so callers never observe NaN.

use super::domain::{Competition, KeywordMetrics};

const DEFAULT_MARGIN_RATIO: f64 = 0.30;
const FLAT_STABILITY: u8 = 50;

/// Profit per sale used for the whole run.
pub fn effective_margin(product_price: f64, profit_margin: Option<f64>) -> f64 {
    match profit_margin {
        Some(margin) if margin.is_finite() && margin > 0.0 => margin,
        _ => {
            let price = finite_or_zero(product_price);
            if price > 0.0 {
                price * DEFAULT_MARGIN_RATIO
            } else {
                0.0
            }
        }
    }
}

/// Mean CPC over the batch, falling back to 1 when it cannot normalize anything.
pub fn batch_average_cpc(keywords: &[KeywordMetrics]) -> f64 {
    if keywords.is_empty() {
        return 1.0;
    }

    let total: f64 = keywords.iter().map(|k| finite_or_zero(k.cpc_avg)).sum();
    let average = total / keywords.len() as f64;
    if average.is_finite() && average != 0.0 {
        average
    } else {
        1.0
    }
}

pub fn stability_score(trend: &[f64]) -> u8 {
    if trend.len() < 2 {
        return FLAT_STABILITY;
    }

    let count = trend.len() as f64;
    let mean = trend.iter().copied().map(finite_or_zero).sum::<f64>() / count;
    let variance = trend
        .iter()
        .copied()
        .map(finite_or_zero)
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / count;

    clamp_score(100.0 - variance.sqrt() * 2.0)
}

/// Return on ad spend per 100 clicks, as an unrounded percentage.
pub fn roi_ratio(competition: Competition, cpc_avg: f64, margin: f64) -> f64 {
    let cost_per_100_clicks = finite_or_zero(cpc_avg) * 100.0;
    if cost_per_100_clicks <= 0.0 {
        return 0.0;
    }

    let profit_per_100_clicks = 100.0 * competition.conversion_rate() * finite_or_zero(margin);
    let roi = (profit_per_100_clicks - cost_per_100_clicks) / cost_per_100_clicks * 100.0;
    finite_or_zero(roi)
}

pub fn roi_estimate(competition: Competition, cpc_avg: f64, margin: f64) -> i64 {
    round_half_up(roi_ratio(competition, cpc_avg, margin)) as i64
}

/// Maps signed ROI onto 0..=100 with break-even at 50.
pub fn roi_score(roi: f64) -> u8 {
    clamp_score(50.0 + finite_or_zero(roi) / 2.0)
}

/// Half the batch average scores 100, double scores 0.
pub fn cpc_score(cpc: f64, batch_average: f64) -> u8 {
    let ratio = finite_or_zero(cpc) / batch_average;
    clamp_score((2.0 - ratio) * 50.0)
}

pub fn volume_score(volume: u64) -> u8 {
    if volume == 0 {
        return 0;
    }
    clamp_score(20.0 * (volume as f64 + 1.0).log10())
}

pub fn competition_score(competition_index: u8) -> u8 {
    clamp_score(100.0 - f64::from(competition_index))
}

pub(crate) fn clamp_score(value: f64) -> u8 {
    round_half_up(finite_or_zero(value).clamp(0.0, 100.0)) as u8
}

/// Halves round toward positive infinity, so -2.5 becomes -2.
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margin_prefers_explicit_profit() {
        assert_eq!(effective_margin(100.0, Some(45.0)), 45.0);
        assert!((effective_margin(100.0, None) - 30.0).abs() < 1e-9);
        assert!((effective_margin(100.0, Some(0.0)) - 30.0).abs() < 1e-9);
        assert!((effective_margin(100.0, Some(f64::NAN)) - 30.0).abs() < 1e-9);
    }

    #[test]
    fn margin_is_zero_for_non_positive_price() {
        assert_eq!(effective_margin(0.0, None), 0.0);
        assert_eq!(effective_margin(-15.0, None), 0.0);
        assert_eq!(effective_margin(f64::INFINITY, None), 0.0);
    }

    #[test]
    fn roi_matches_worked_example() {
        assert_eq!(roi_estimate(Competition::Low, 1.0, 30.0), 20);
        assert_eq!(roi_score(20.0), 60);
    }

    #[test]
    fn roi_guards_zero_cost() {
        assert_eq!(roi_estimate(Competition::High, 0.0, 30.0), 0);
        assert_eq!(roi_estimate(Competition::High, f64::NAN, 30.0), 0);
    }

    #[test]
    fn negative_roi_rounds_toward_positive_infinity() {
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(roi_estimate(Competition::High, 1.0, 0.0), -100);
        assert_eq!(roi_score(-100.0), 0);
    }

    #[test]
    fn stability_handles_degenerate_trends() {
        assert_eq!(stability_score(&[]), 50);
        assert_eq!(stability_score(&[80.0]), 50);
        assert_eq!(stability_score(&[60.0; 12]), 100);
    }

    #[test]
    fn stability_clamps_alternating_trend() {
        let trend: Vec<f64> = (0..12)
            .map(|i| if i % 2 == 0 { 0.0 } else { 100.0 })
            .collect();
        assert_eq!(stability_score(&trend), 0);
    }

    #[test]
    fn stability_treats_nan_points_as_zero() {
        assert_eq!(stability_score(&[f64::NAN, 0.0, 0.0]), 100);
    }

    #[test]
    fn cpc_score_spans_half_to_double_average() {
        assert_eq!(cpc_score(0.5, 1.0), 100);
        assert_eq!(cpc_score(1.0, 1.0), 50);
        assert_eq!(cpc_score(2.0, 1.0), 0);
        assert_eq!(cpc_score(5.0, 1.0), 0);
    }

    #[test]
    fn batch_average_falls_back_to_one() {
        assert_eq!(batch_average_cpc(&[]), 1.0);
        let free = KeywordMetrics::new("gratis", 10, Competition::Low, 5, 0.0, 0.0, vec![]);
        assert_eq!(batch_average_cpc(&[free]), 1.0);
    }

    #[test]
    fn volume_score_uses_log_scale() {
        assert_eq!(volume_score(0), 0);
        assert_eq!(volume_score(99), 40);
        assert_eq!(volume_score(9_999), 80);
        assert_eq!(volume_score(u64::MAX), 100);
    }

    #[test]
    fn competition_score_inverts_index() {
        assert_eq!(competition_score(0), 100);
        assert_eq!(competition_score(35), 65);
        assert_eq!(competition_score(100), 0);
        assert_eq!(competition_score(255), 0);
    }
}
