use keyword_scout::scoring::metrics::stability_score;
use keyword_scout::scoring::{
    score_keywords, summarize, CampaignConfig, CampaignGoal, CampaignType, Competition,
    GoalWeights, KeywordMetrics,
};
use proptest::prelude::*;

// --- STRATEGIES ---

fn arb_competition() -> impl Strategy<Value = Competition> {
    prop_oneof![
        Just(Competition::Low),
        Just(Competition::Medium),
        Just(Competition::High),
    ]
}

fn arb_goal() -> impl Strategy<Value = CampaignGoal> {
    prop_oneof![
        Just(CampaignGoal::Conversions),
        Just(CampaignGoal::Traffic),
        Just(CampaignGoal::Awareness),
        Just(CampaignGoal::Engagement),
    ]
}

prop_compose! {
    fn arb_keyword()(
        volume in 0u64..2_000_000,
        competition in arb_competition(),
        competition_index in 0u8..=100,
        cpc_low in 0.0..20.0f64,
        spread in 0.0..20.0f64,
        trend in proptest::collection::vec(0.0..100.0f64, 0..13)
    ) -> KeywordMetrics {
        KeywordMetrics::new(
            format!("kw-{volume}"),
            volume,
            competition,
            competition_index,
            cpc_low,
            cpc_low + spread,
            trend,
        )
    }
}

prop_compose! {
    fn arb_campaign()(
        goal in arb_goal(),
        product_price in -50.0..2_000.0f64,
        profit_margin in proptest::option::of(-10.0..500.0f64)
    ) -> CampaignConfig {
        CampaignConfig {
            goal,
            campaign_type: CampaignType::Search,
            product_price,
            profit_margin,
            currency: "EUR".to_string(),
            country: "IT".to_string(),
        }
    }
}

proptest! {
    #[test]
    fn scores_stay_within_bounds(
        keywords in proptest::collection::vec(arb_keyword(), 0..40),
        campaign in arb_campaign()
    ) {
        let scored = score_keywords(&keywords, &campaign);
        prop_assert_eq!(scored.len(), keywords.len());
        for keyword in &scored {
            prop_assert!(keyword.profitability_score <= 100);
            prop_assert!(keyword.stability_score <= 100);
        }
    }

    #[test]
    fn ranking_never_ascends(
        keywords in proptest::collection::vec(arb_keyword(), 0..40),
        campaign in arb_campaign()
    ) {
        let scored = score_keywords(&keywords, &campaign);
        for pair in scored.windows(2) {
            prop_assert!(pair[0].profitability_score >= pair[1].profitability_score);
        }
    }

    #[test]
    fn summary_is_consistent_with_batch(
        keywords in proptest::collection::vec(arb_keyword(), 0..40),
        campaign in arb_campaign()
    ) {
        let scored = score_keywords(&keywords, &campaign);
        let summary = summarize(&scored);
        prop_assert_eq!(summary.total_keywords, scored.len());
        prop_assert!(summary.top_recommendations.len() <= 10);
        prop_assert!(summary.excellent_count + summary.good_count <= scored.len());
        prop_assert!(summary.avg_score <= 100);
    }

    #[test]
    fn constant_trends_are_fully_stable(value in 0.0..100.0f64, months in 2usize..24) {
        prop_assert_eq!(stability_score(&vec![value; months]), 100);
    }

    #[test]
    fn weights_sum_to_one(goal in arb_goal()) {
        let total = GoalWeights::for_goal(goal).total();
        prop_assert!((total - 1.0).abs() < 1e-9);
    }
}
