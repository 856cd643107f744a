use super::domain::{Competition, RecommendationLevel, ScoredKeyword};
use super::metrics::finite_or_zero;
use serde::Serialize;

const STRONG_ROI_PCT: i64 = 30;

/// Margin-dependent cut-offs shared by every keyword in a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TierThresholds {
    pub volume_excellent: u64,
    pub volume_good: u64,
    pub volume_minimum: u64,
    pub cpc_sustainable: f64,
    pub cpc_acceptable: f64,
}

impl TierThresholds {
    /// High-margin products need less volume to be worthwhile.
    pub fn for_margin(margin: f64) -> Self {
        let (volume_excellent, volume_good, volume_minimum) = if margin > 50.0 {
            (200, 100, 50)
        } else if margin > 20.0 {
            (500, 250, 100)
        } else {
            (1000, 500, 200)
        };

        let cpc_sustainable = margin * 0.03;

        Self {
            volume_excellent,
            volume_good,
            volume_minimum,
            cpc_sustainable,
            cpc_acceptable: cpc_sustainable * 2.0,
        }
    }
}

/// Facts about one keyword that the cascade predicates read.
#[derive(Debug, Clone, Copy)]
struct TierSignals {
    score: u8,
    roi_positive: bool,
    roi_strong: bool,
    volume_excellent: bool,
    volume_good: bool,
    volume_minimum: bool,
    cpc_sustainable: bool,
    cpc_acceptable: bool,
    competition_soft: bool,
}

impl TierSignals {
    fn collect(keyword: &ScoredKeyword, thresholds: &TierThresholds) -> Self {
        let metrics = &keyword.metrics;
        let cpc = finite_or_zero(metrics.cpc_avg);
        Self {
            score: keyword.profitability_score,
            roi_positive: keyword.roi_estimate > 0,
            roi_strong: keyword.roi_estimate > STRONG_ROI_PCT,
            volume_excellent: metrics.volume >= thresholds.volume_excellent,
            volume_good: metrics.volume >= thresholds.volume_good,
            volume_minimum: metrics.volume >= thresholds.volume_minimum,
            cpc_sustainable: cpc <= thresholds.cpc_sustainable,
            cpc_acceptable: cpc <= thresholds.cpc_acceptable,
            competition_soft: matches!(metrics.competition, Competition::Low | Competition::Medium),
        }
    }
}

struct TierRule {
    level: RecommendationLevel,
    applies: fn(&TierSignals) -> bool,
}

// Evaluated top to bottom; the first matching rule decides the tier.
// Rule one tests excellent volume in both of its clauses.
const CASCADE: &[TierRule] = &[
    TierRule {
        level: RecommendationLevel::Excellent,
        applies: |s| {
            s.score >= 60
                && (s.roi_positive || s.volume_excellent)
                && (s.cpc_sustainable || s.volume_excellent)
        },
    },
    TierRule {
        level: RecommendationLevel::Excellent,
        applies: |s| s.score >= 50 && s.roi_strong && s.volume_good,
    },
    TierRule {
        level: RecommendationLevel::Good,
        applies: |s| s.score >= 50 && (s.roi_positive || s.volume_good),
    },
    TierRule {
        level: RecommendationLevel::Good,
        applies: |s| s.score >= 45 && s.volume_good && s.cpc_acceptable,
    },
    TierRule {
        level: RecommendationLevel::Good,
        applies: |s| s.score >= 40 && s.roi_strong,
    },
    TierRule {
        level: RecommendationLevel::Moderate,
        applies: |s| s.score >= 35 && (s.volume_minimum || s.roi_positive || s.competition_soft),
    },
    TierRule {
        level: RecommendationLevel::Moderate,
        applies: |s| s.score >= 30 && s.volume_good,
    },
    TierRule {
        level: RecommendationLevel::Moderate,
        applies: |s| s.volume_minimum && s.cpc_acceptable,
    },
];

pub fn classify(keyword: &ScoredKeyword, thresholds: &TierThresholds) -> RecommendationLevel {
    let signals = TierSignals::collect(keyword, thresholds);
    CASCADE
        .iter()
        .find(|rule| (rule.applies)(&signals))
        .map(|rule| rule.level)
        .unwrap_or(RecommendationLevel::Poor)
}

/// Assigns a recommendation level to every keyword in place.
pub fn assign_levels(keywords: &mut [ScoredKeyword], margin: f64) {
    let thresholds = TierThresholds::for_margin(margin);
    for keyword in keywords.iter_mut() {
        keyword.recommendation_level = classify(keyword, &thresholds);
    }
}
