use super::domain::{RecommendationLevel, ScoredKeyword};
use super::metrics::round_half_up;
use serde::{Deserialize, Serialize};

pub const TOP_RECOMMENDATIONS: usize = 10;

/// Aggregate view over a ranked keyword list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordSummary {
    pub total_keywords: usize,
    pub avg_volume: u64,
    /// Rounded to two decimals.
    pub avg_cpc: f64,
    pub avg_score: u8,
    pub excellent_count: usize,
    pub good_count: usize,
    pub top_recommendations: Vec<ScoredKeyword>,
}

impl KeywordSummary {
    fn empty() -> Self {
        Self {
            total_keywords: 0,
            avg_volume: 0,
            avg_cpc: 0.0,
            avg_score: 0,
            excellent_count: 0,
            good_count: 0,
            top_recommendations: Vec::new(),
        }
    }
}

/// Expects `keywords` already ranked; the top slice is taken as-is.
pub fn summarize(keywords: &[ScoredKeyword]) -> KeywordSummary {
    if keywords.is_empty() {
        return KeywordSummary::empty();
    }

    let count = keywords.len() as f64;
    let total_volume: f64 = keywords.iter().map(|k| k.metrics.volume as f64).sum();
    let total_cpc: f64 = keywords
        .iter()
        .map(|k| k.metrics.cpc_avg)
        .filter(|cpc| cpc.is_finite())
        .sum();
    let total_score: f64 = keywords
        .iter()
        .map(|k| f64::from(k.profitability_score))
        .sum();

    let count_level = |level: RecommendationLevel| {
        keywords
            .iter()
            .filter(|k| k.recommendation_level == level)
            .count()
    };

    KeywordSummary {
        total_keywords: keywords.len(),
        avg_volume: round_half_up(total_volume / count) as u64,
        avg_cpc: round_half_up(total_cpc / count * 100.0) / 100.0,
        avg_score: round_half_up(total_score / count) as u8,
        excellent_count: count_level(RecommendationLevel::Excellent),
        good_count: count_level(RecommendationLevel::Good),
        top_recommendations: keywords.iter().take(TOP_RECOMMENDATIONS).cloned().collect(),
    }
}
