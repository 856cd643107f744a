use super::domain::{CampaignConfig, KeywordMetrics, RecommendationLevel, ScoredKeyword};
use super::metrics::{
    batch_average_cpc, clamp_score, competition_score, cpc_score, effective_margin, roi_ratio,
    roi_score, round_half_up, stability_score, volume_score,
};
use super::reasoning::explain;
use super::tiers::assign_levels;
use super::weights::GoalWeights;
use tracing::debug;

/// Stateless scorer that applies one campaign configuration to keyword batches.
#[derive(Debug, Clone)]
pub struct KeywordScorer {
    config: CampaignConfig,
    weights: GoalWeights,
    margin: f64,
}

impl KeywordScorer {
    pub fn new(config: CampaignConfig) -> Self {
        let weights = GoalWeights::for_goal(config.goal);
        let margin = effective_margin(config.product_price, config.profit_margin);
        Self {
            config,
            weights,
            margin,
        }
    }

    pub fn config(&self) -> &CampaignConfig {
        &self.config
    }

    /// Profit per sale applied to every keyword in a run.
    pub fn margin(&self) -> f64 {
        self.margin
    }

    pub fn weights(&self) -> GoalWeights {
        self.weights
    }

    /// Scores a batch and returns it ranked, with tiers and reasoning filled in.
    ///
    /// The result is sorted by descending profitability score; equal scores
    /// keep their input order.
    pub fn score(&self, keywords: &[KeywordMetrics]) -> Vec<ScoredKeyword> {
        let average_cpc = batch_average_cpc(keywords);

        let mut scored: Vec<ScoredKeyword> = keywords
            .iter()
            .map(|metrics| self.score_one(metrics, average_cpc))
            .collect();

        scored.sort_by(|a, b| b.profitability_score.cmp(&a.profitability_score));

        assign_levels(&mut scored, self.margin);

        for keyword in scored.iter_mut() {
            keyword.reasoning = explain(keyword, self.config.goal);
        }

        debug!(
            keywords = scored.len(),
            goal = self.config.goal.as_str(),
            margin = self.margin,
            average_cpc,
            "scored keyword batch"
        );

        scored
    }

    fn score_one(&self, metrics: &KeywordMetrics, average_cpc: f64) -> ScoredKeyword {
        let weights = &self.weights;
        let roi = roi_ratio(metrics.competition, metrics.cpc_avg, self.margin);

        let stability = stability_score(&metrics.trend);
        let weighted = f64::from(roi_score(roi)) * weights.roi
            + f64::from(volume_score(metrics.volume)) * weights.volume
            + f64::from(cpc_score(metrics.cpc_avg, average_cpc)) * weights.cpc
            + f64::from(stability) * weights.stability
            + f64::from(competition_score(metrics.competition_index)) * weights.competition;

        ScoredKeyword {
            metrics: metrics.clone(),
            profitability_score: clamp_score(weighted),
            roi_estimate: round_half_up(roi) as i64,
            stability_score: stability,
            recommendation_level: RecommendationLevel::Moderate,
            reasoning: String::new(),
        }
    }
}

pub fn score_keywords(keywords: &[KeywordMetrics], config: &CampaignConfig) -> Vec<ScoredKeyword> {
    KeywordScorer::new(config.clone()).score(keywords)
}
