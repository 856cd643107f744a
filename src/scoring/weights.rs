use super::domain::CampaignGoal;
use serde::Serialize;

/// Relative importance of each sub-score for a campaign goal. Sums to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalWeights {
    pub volume: f64,
    pub roi: f64,
    pub cpc: f64,
    pub stability: f64,
    pub competition: f64,
}

impl GoalWeights {
    pub const fn for_goal(goal: CampaignGoal) -> Self {
        match goal {
            CampaignGoal::Conversions => Self {
                volume: 0.35,
                roi: 0.30,
                cpc: 0.15,
                stability: 0.10,
                competition: 0.10,
            },
            CampaignGoal::Traffic => Self {
                volume: 0.40,
                roi: 0.10,
                cpc: 0.30,
                stability: 0.10,
                competition: 0.10,
            },
            CampaignGoal::Awareness => Self {
                volume: 0.50,
                roi: 0.05,
                cpc: 0.15,
                stability: 0.15,
                competition: 0.15,
            },
            CampaignGoal::Engagement => Self {
                volume: 0.35,
                roi: 0.20,
                cpc: 0.20,
                stability: 0.15,
                competition: 0.10,
            },
        }
    }

    pub fn total(&self) -> f64 {
        self.volume + self.roi + self.cpc + self.stability + self.competition
    }
}
