use super::domain::{ParseEnumError, RecommendationLevel, ScoredKeyword};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Keyword,
    #[default]
    ProfitabilityScore,
    Volume,
    CpcAvg,
    RoiEstimate,
    StabilityScore,
    CompetitionIndex,
}

impl FromStr for SortField {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "keyword" => Ok(Self::Keyword),
            "profitabilityscore" | "score" => Ok(Self::ProfitabilityScore),
            "volume" => Ok(Self::Volume),
            "cpcavg" | "cpc" => Ok(Self::CpcAvg),
            "roiestimate" | "roi" => Ok(Self::RoiEstimate),
            "stabilityscore" | "stability" => Ok(Self::StabilityScore),
            "competitionindex" | "competition" => Ok(Self::CompetitionIndex),
            _ => Err(ParseEnumError::new("sort field", value)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Search, tier filter and ordering applied to a scored keyword table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeywordQuery {
    pub search: Option<String>,
    pub level: Option<RecommendationLevel>,
    pub sort_by: SortField,
    pub direction: SortDirection,
}

impl KeywordQuery {
    pub fn apply<'a>(&self, keywords: &'a [ScoredKeyword]) -> Vec<&'a ScoredKeyword> {
        let needle = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|needle| !needle.is_empty())
            .map(str::to_lowercase);

        let mut view: Vec<&ScoredKeyword> = keywords
            .iter()
            .filter(|k| match &needle {
                Some(needle) => k.keyword().to_lowercase().contains(needle.as_str()),
                None => true,
            })
            .filter(|k| self.level.map_or(true, |level| k.recommendation_level == level))
            .collect();

        view.sort_by(|a, b| {
            let ordering = compare(a, b, self.sort_by);
            match self.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        view
    }
}

fn compare(a: &ScoredKeyword, b: &ScoredKeyword, field: SortField) -> Ordering {
    match field {
        SortField::Keyword => a.keyword().to_lowercase().cmp(&b.keyword().to_lowercase()),
        SortField::ProfitabilityScore => a.profitability_score.cmp(&b.profitability_score),
        SortField::Volume => a.metrics.volume.cmp(&b.metrics.volume),
        SortField::CpcAvg => a.metrics.cpc_avg.total_cmp(&b.metrics.cpc_avg),
        SortField::RoiEstimate => a.roi_estimate.cmp(&b.roi_estimate),
        SortField::StabilityScore => a.stability_score.cmp(&b.stability_score),
        SortField::CompetitionIndex => a.metrics.competition_index.cmp(&b.metrics.competition_index),
    }
}
