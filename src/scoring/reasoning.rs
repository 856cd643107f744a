use super::domain::{CampaignGoal, Competition, ScoredKeyword};
use super::metrics::finite_or_zero;

/// One-line explanation built from the metric thresholds a keyword crosses.
pub fn explain(keyword: &ScoredKeyword, goal: CampaignGoal) -> String {
    let metrics = &keyword.metrics;
    let mut parts: Vec<&'static str> = Vec::with_capacity(5);

    parts.push(if metrics.volume > 5_000 {
        "High search volume"
    } else if metrics.volume > 1_000 {
        "Solid search volume"
    } else {
        "Limited but targeted volume"
    });

    let cpc = finite_or_zero(metrics.cpc_avg);
    if cpc < 0.5 {
        parts.push("very affordable CPC");
    } else if cpc > 2.0 {
        parts.push("high CPC");
    }

    match metrics.competition {
        Competition::Low => parts.push("low competition"),
        Competition::High => parts.push("high competition"),
        Competition::Medium => {}
    }

    if goal == CampaignGoal::Conversions {
        if keyword.roi_estimate > 50 {
            parts.push("potentially high ROI");
        } else if keyword.roi_estimate < 0 {
            parts.push("watch the ROI");
        }
    }

    if keyword.stability_score > 70 {
        parts.push("stable trend");
    } else if keyword.stability_score < 40 {
        parts.push("unstable trend");
    }

    format!("{}.", parts.join(", "))
}
