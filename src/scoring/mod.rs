//! Keyword profitability scoring.
//!
//! [`KeywordScorer`] turns a batch of [`KeywordMetrics`] into ranked
//! [`ScoredKeyword`]s for one [`CampaignConfig`]; [`summarize`] aggregates the
//! ranked list. Everything here is pure and synchronous.

mod dedupe;
pub mod domain;
mod engine;
pub mod export;
pub mod import;
pub mod metrics;
pub mod query;
mod reasoning;
mod summary;
pub mod tiers;
mod weights;

pub use dedupe::{dedupe_keywords, dedupe_seeds};
pub use domain::{
    CampaignConfig, CampaignGoal, CampaignType, Competition, KeywordMetrics, ParseEnumError,
    RecommendationLevel, ScoredKeyword,
};
pub use engine::{score_keywords, KeywordScorer};
pub use export::{export_csv, export_filename, ExportError};
pub use import::{import_keywords, import_keywords_from_path, KeywordImportError};
pub use query::{KeywordQuery, SortDirection, SortField};
pub use summary::{summarize, KeywordSummary, TOP_RECOMMENDATIONS};
pub use tiers::TierThresholds;
pub use weights::GoalWeights;
