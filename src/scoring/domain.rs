use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Competition bucket reported by the metrics provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Competition {
    Low,
    Medium,
    High,
}

impl Competition {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Assumed click-to-sale rate for the bucket.
    pub const fn conversion_rate(self) -> f64 {
        match self {
            Self::Low => 0.04,
            Self::Medium => 0.03,
            Self::High => 0.02,
        }
    }
}

impl FromStr for Competition {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParseEnumError::new("competition", value)),
        }
    }
}

/// Campaign objective; selects the weighting profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignGoal {
    Conversions,
    Traffic,
    Awareness,
    Engagement,
}

impl CampaignGoal {
    pub const fn all() -> [Self; 4] {
        [
            Self::Conversions,
            Self::Traffic,
            Self::Awareness,
            Self::Engagement,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Conversions => "conversions",
            Self::Traffic => "traffic",
            Self::Awareness => "awareness",
            Self::Engagement => "engagement",
        }
    }
}

impl FromStr for CampaignGoal {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|goal| goal.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ParseEnumError::new("campaign goal", value))
    }
}

/// Ad network campaign format. Carried through for display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignType {
    Search,
    Shopping,
    Display,
    PerformanceMax,
    DemandGen,
}

impl CampaignType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Shopping => "shopping",
            Self::Display => "display",
            Self::PerformanceMax => "performance_max",
            Self::DemandGen => "demand_gen",
        }
    }
}

impl FromStr for CampaignType {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        [
            Self::Search,
            Self::Shopping,
            Self::Display,
            Self::PerformanceMax,
            Self::DemandGen,
        ]
        .into_iter()
        .find(|kind| kind.as_str() == normalized)
        .ok_or_else(|| ParseEnumError::new("campaign type", value))
    }
}

/// Per-run campaign settings supplied alongside the keyword batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignConfig {
    pub goal: CampaignGoal,
    #[serde(rename = "type")]
    pub campaign_type: CampaignType,
    pub product_price: f64,
    /// Absolute profit per sale, not a percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit_margin: Option<f64>,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub country: String,
}

/// Estimated search metrics for a single keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordMetrics {
    pub keyword: String,
    pub volume: u64,
    pub competition: Competition,
    pub competition_index: u8,
    pub cpc_low: f64,
    pub cpc_high: f64,
    pub cpc_avg: f64,
    /// Relative monthly interest, oldest first.
    #[serde(default)]
    pub trend: Vec<f64>,
}

impl KeywordMetrics {
    pub fn new(
        keyword: impl Into<String>,
        volume: u64,
        competition: Competition,
        competition_index: u8,
        cpc_low: f64,
        cpc_high: f64,
        trend: Vec<f64>,
    ) -> Self {
        Self {
            keyword: keyword.into(),
            volume,
            competition,
            competition_index,
            cpc_low,
            cpc_high,
            cpc_avg: (cpc_low + cpc_high) / 2.0,
            trend,
        }
    }
}

/// Coarse bucket assigned by the tier cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecommendationLevel {
    #[serde(rename = "eccellente")]
    Excellent,
    #[serde(rename = "buona")]
    Good,
    #[serde(rename = "moderata")]
    Moderate,
    #[serde(rename = "scarsa")]
    Poor,
}

impl RecommendationLevel {
    pub const fn ordered() -> [Self; 4] {
        [Self::Excellent, Self::Good, Self::Moderate, Self::Poor]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::Poor => "Poor",
        }
    }

    /// Identifier used on the wire and in CSV exports.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Excellent => "eccellente",
            Self::Good => "buona",
            Self::Moderate => "moderata",
            Self::Poor => "scarsa",
        }
    }
}

impl FromStr for RecommendationLevel {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ordered()
            .into_iter()
            .find(|level| {
                level.code().eq_ignore_ascii_case(trimmed)
                    || level.label().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| ParseEnumError::new("recommendation level", value))
    }
}

/// Keyword metrics enriched with the profitability assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredKeyword {
    #[serde(flatten)]
    pub metrics: KeywordMetrics,
    pub profitability_score: u8,
    pub roi_estimate: i64,
    pub stability_score: u8,
    pub recommendation_level: RecommendationLevel,
    pub reasoning: String,
}

impl ScoredKeyword {
    pub fn keyword(&self) -> &str {
        &self.metrics.keyword
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for ParseEnumError {}
