use keyword_scout::config::CampaignDefaults;
use keyword_scout::scoring::{
    CampaignConfig, CampaignGoal, CampaignType, RecommendationLevel, SortField,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) defaults: Arc<CampaignDefaults>,
}

/// Fills blank descriptive fields from the configured defaults.
pub(crate) fn apply_campaign_defaults(config: &mut CampaignConfig, defaults: &CampaignDefaults) {
    if config.currency.trim().is_empty() {
        config.currency = defaults.currency.clone();
    }
    if config.country.trim().is_empty() {
        config.country = defaults.country.clone();
    }
}

pub(crate) fn parse_goal(raw: &str) -> Result<CampaignGoal, String> {
    raw.parse().map_err(|err| {
        format!(
            "{err}; expected one of {}",
            CampaignGoal::all()
                .iter()
                .map(|goal| goal.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    })
}

pub(crate) fn parse_campaign_type(raw: &str) -> Result<CampaignType, String> {
    raw.parse().map_err(|err| format!("{err}"))
}

pub(crate) fn parse_level(raw: &str) -> Result<RecommendationLevel, String> {
    raw.parse().map_err(|err| format!("{err}"))
}

pub(crate) fn parse_sort_field(raw: &str) -> Result<SortField, String> {
    raw.parse().map_err(|err| format!("{err}"))
}

pub(crate) fn parse_price(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|err| format!("failed to parse '{raw}' as an amount ({err})"))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("'{raw}' must be a positive amount"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn campaign(currency: &str) -> CampaignConfig {
        CampaignConfig {
            goal: CampaignGoal::Conversions,
            campaign_type: CampaignType::Search,
            product_price: 10.0,
            profit_margin: None,
            currency: currency.to_string(),
            country: String::new(),
        }
    }

    #[test]
    fn blank_fields_take_configured_defaults() {
        let defaults = CampaignDefaults::default();
        let mut config = campaign(" ");
        apply_campaign_defaults(&mut config, &defaults);
        assert_eq!(config.currency, "EUR");
        assert_eq!(config.country, "IT");

        let mut config = campaign("USD");
        apply_campaign_defaults(&mut config, &defaults);
        assert_eq!(config.currency, "USD");
    }

    #[test]
    fn price_must_be_positive() {
        assert_eq!(parse_price("12.5"), Ok(12.5));
        assert!(parse_price("0").is_err());
        assert!(parse_price("-3").is_err());
        assert!(parse_price("NaN").is_err());
        assert!(parse_price("cheap").is_err());
    }

    #[test]
    fn goal_errors_list_the_options() {
        let error = parse_goal("reach").expect_err("unknown goal");
        assert!(error.contains("conversions, traffic, awareness, engagement"));
    }
}
