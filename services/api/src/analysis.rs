use crate::infra::apply_campaign_defaults;
use chrono::{DateTime, Utc};
use keyword_scout::config::CampaignDefaults;
use keyword_scout::error::AppError;
use keyword_scout::scoring::{
    dedupe_keywords, dedupe_seeds, summarize, CampaignConfig, CampaignGoal, CampaignType,
    KeywordMetrics, KeywordScorer, KeywordSummary, ScoredKeyword,
};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Where the keyword metrics in a batch came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum DataSource {
    GoogleAds,
    #[default]
    GeminiEstimate,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnalyzeRequest {
    pub(crate) campaign_config: CampaignConfig,
    pub(crate) keywords: Vec<KeywordMetrics>,
    #[serde(default)]
    pub(crate) seed_keywords: Vec<String>,
    #[serde(default)]
    pub(crate) data_source: DataSource,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnalysisSummary {
    #[serde(flatten)]
    pub(crate) stats: KeywordSummary,
    pub(crate) campaign_goal: CampaignGoal,
    pub(crate) campaign_type: CampaignType,
    pub(crate) data_source: DataSource,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnalysisResponse {
    pub(crate) seed_keywords: Vec<String>,
    pub(crate) keywords: Vec<ScoredKeyword>,
    pub(crate) summary: AnalysisSummary,
    pub(crate) generated_at: DateTime<Utc>,
}

pub(crate) fn validate_campaign(config: &CampaignConfig) -> Result<(), AppError> {
    if config.product_price.is_finite() && config.product_price > 0.0 {
        Ok(())
    } else {
        Err(AppError::InvalidRequest(format!(
            "productPrice must be a positive amount, got {}",
            config.product_price
        )))
    }
}

/// Validates, deduplicates, scores and summarizes one keyword batch.
pub(crate) fn analyze(
    request: AnalyzeRequest,
    defaults: &CampaignDefaults,
    generated_at: DateTime<Utc>,
) -> Result<AnalysisResponse, AppError> {
    let AnalyzeRequest {
        mut campaign_config,
        keywords,
        seed_keywords,
        data_source,
    } = request;

    validate_campaign(&campaign_config)?;

    let received = keywords.len();
    let keywords = dedupe_keywords(keywords);
    if keywords.is_empty() {
        return Err(AppError::InvalidRequest(
            "at least one keyword with a non-empty name is required".to_string(),
        ));
    }

    apply_campaign_defaults(&mut campaign_config, defaults);
    let campaign_goal = campaign_config.goal;
    let campaign_type = campaign_config.campaign_type;

    let scorer = KeywordScorer::new(campaign_config);
    let scored = scorer.score(&keywords);
    let stats = summarize(&scored);

    info!(
        received,
        scored = scored.len(),
        goal = campaign_goal.as_str(),
        excellent = stats.excellent_count,
        "keyword batch analyzed"
    );

    Ok(AnalysisResponse {
        seed_keywords: dedupe_seeds(seed_keywords),
        keywords: scored,
        summary: AnalysisSummary {
            stats,
            campaign_goal,
            campaign_type,
            data_source,
        },
        generated_at,
    })
}
