use crate::analysis::validate_campaign;
use crate::infra::apply_campaign_defaults;
use clap::Args;
use keyword_scout::config::CampaignDefaults;
use keyword_scout::error::AppError;
use keyword_scout::scoring::{
    dedupe_keywords, export_csv, import_keywords_from_path, summarize, CampaignConfig,
    CampaignGoal, CampaignType, Competition, KeywordMetrics, KeywordQuery, KeywordScorer,
    KeywordSummary, RecommendationLevel, ScoredKeyword, SortDirection, SortField,
};
use std::path::PathBuf;

const DEFAULT_TABLE_ROWS: usize = 20;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Keyword CSV export (keyword, volume, competition, cpc_low, cpc_high, ...)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Campaign goal: conversions, traffic, awareness or engagement
    #[arg(long, value_parser = crate::infra::parse_goal)]
    pub(crate) goal: CampaignGoal,
    /// Product price in the campaign currency
    #[arg(long, value_parser = crate::infra::parse_price)]
    pub(crate) price: f64,
    /// Absolute profit per sale. Defaults to 30% of the price.
    #[arg(long)]
    pub(crate) margin: Option<f64>,
    /// Campaign type (search, shopping, display, performance_max, demand_gen)
    #[arg(long, value_parser = crate::infra::parse_campaign_type, default_value = "search")]
    pub(crate) campaign_type: CampaignType,
    /// Currency code shown in the report and CSV header
    #[arg(long)]
    pub(crate) currency: Option<String>,
    /// Target country code
    #[arg(long)]
    pub(crate) country: Option<String>,
    /// Only show keywords containing this text
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Only show keywords with this recommendation level
    #[arg(long, value_parser = crate::infra::parse_level)]
    pub(crate) level: Option<RecommendationLevel>,
    /// Column used to order the table
    #[arg(long, value_parser = crate::infra::parse_sort_field)]
    pub(crate) sort_by: Option<SortField>,
    /// Sort the table in ascending order
    #[arg(long)]
    pub(crate) ascending: bool,
    /// Maximum number of table rows to print
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Write the filtered table to this CSV file
    #[arg(long)]
    pub(crate) export: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Campaign goal used for the sample batch (defaults to conversions)
    #[arg(long, value_parser = crate::infra::parse_goal)]
    pub(crate) goal: Option<CampaignGoal>,
    /// Product price used for the sample batch (defaults to 89.90)
    #[arg(long, value_parser = crate::infra::parse_price)]
    pub(crate) price: Option<f64>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let defaults = CampaignDefaults::load();

    let mut campaign = CampaignConfig {
        goal: args.goal,
        campaign_type: args.campaign_type,
        product_price: args.price,
        profit_margin: args.margin,
        currency: args.currency.unwrap_or_default().trim().to_uppercase(),
        country: args.country.unwrap_or_default().trim().to_uppercase(),
    };
    validate_campaign(&campaign)?;
    apply_campaign_defaults(&mut campaign, &defaults);

    let keywords = dedupe_keywords(import_keywords_from_path(&args.input)?);
    if keywords.is_empty() {
        return Err(AppError::InvalidRequest(format!(
            "{} contains no keywords",
            args.input.display()
        )));
    }

    let scorer = KeywordScorer::new(campaign);
    let scored = scorer.score(&keywords);
    let summary = summarize(&scored);

    let query = KeywordQuery {
        search: args.search,
        level: args.level,
        sort_by: args.sort_by.unwrap_or_default(),
        direction: if args.ascending {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        },
    };
    let view = query.apply(&scored);

    println!("Keyword profitability report");
    println!("Source: {}", args.input.display());
    render_report(
        &scorer,
        &summary,
        &view,
        args.limit.unwrap_or(DEFAULT_TABLE_ROWS),
    );

    if let Some(path) = args.export {
        let csv = export_csv(view.iter().copied(), &scorer.config().currency)?;
        std::fs::write(&path, csv)?;
        println!("\nExported {} keywords to {}", view.len(), path.display());
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let defaults = CampaignDefaults::load();

    let mut campaign = CampaignConfig {
        goal: args.goal.unwrap_or(CampaignGoal::Conversions),
        campaign_type: CampaignType::Search,
        product_price: args.price.unwrap_or(89.90),
        profit_margin: None,
        currency: String::new(),
        country: String::new(),
    };
    apply_campaign_defaults(&mut campaign, &defaults);

    let scorer = KeywordScorer::new(campaign);
    let scored = scorer.score(&sample_batch());
    let summary = summarize(&scored);
    let view: Vec<&ScoredKeyword> = scored.iter().collect();

    println!("Keyword scoring demo");
    println!("Source: built-in trekking gear sample");
    render_report(&scorer, &summary, &view, DEFAULT_TABLE_ROWS);

    println!("\nGoal comparison (top keyword per goal)");
    for goal in CampaignGoal::all() {
        let mut config = scorer.config().clone();
        config.goal = goal;
        let ranked = KeywordScorer::new(config).score(&sample_batch());
        if let Some(leader) = ranked.first() {
            println!(
                "- {}: {} (score {}, {})",
                goal.as_str(),
                leader.keyword(),
                leader.profitability_score,
                leader.recommendation_level.label()
            );
        }
    }

    Ok(())
}

pub(crate) fn render_report(
    scorer: &KeywordScorer,
    summary: &KeywordSummary,
    view: &[&ScoredKeyword],
    limit: usize,
) {
    let config = scorer.config();
    println!(
        "Campaign: {} goal, {} campaign, {} market",
        config.goal.as_str(),
        config.campaign_type.as_str(),
        config.country
    );
    println!(
        "Product price {:.2} {} | margin per sale {:.2} {}",
        config.product_price, config.currency, scorer.margin(), config.currency
    );
    let weights = scorer.weights();
    println!(
        "Weights: volume {:.0}% | ROI {:.0}% | CPC {:.0}% | stability {:.0}% | competition {:.0}%",
        weights.volume * 100.0,
        weights.roi * 100.0,
        weights.cpc * 100.0,
        weights.stability * 100.0,
        weights.competition * 100.0
    );

    println!("\nSummary");
    println!(
        "- {} keywords | avg volume {} | avg CPC {:.2} {} | avg score {}",
        summary.total_keywords,
        summary.avg_volume,
        summary.avg_cpc,
        config.currency,
        summary.avg_score
    );
    println!(
        "- {} excellent | {} good",
        summary.excellent_count, summary.good_count
    );

    if view.is_empty() {
        println!("\nKeywords: none match the current filters");
        return;
    }

    println!("\nKeywords ({} shown of {})", view.len().min(limit), view.len());
    for keyword in view.iter().take(limit) {
        println!(
            "- {} [{}] score {} | volume {} | CPC {:.2} | {} competition | ROI {}% | stability {}",
            keyword.keyword(),
            keyword.recommendation_level.label(),
            keyword.profitability_score,
            keyword.metrics.volume,
            keyword.metrics.cpc_avg,
            keyword.metrics.competition.label(),
            keyword.roi_estimate,
            keyword.stability_score
        );
        println!("  {}", keyword.reasoning);
    }
}

pub(crate) fn sample_batch() -> Vec<KeywordMetrics> {
    vec![
        KeywordMetrics::new(
            "scarpe trekking uomo",
            14_800,
            Competition::High,
            82,
            0.55,
            1.90,
            vec![48.0, 52.0, 61.0, 74.0, 88.0, 100.0, 97.0, 90.0, 76.0, 60.0, 50.0, 45.0],
        ),
        KeywordMetrics::new(
            "zaino trekking 40 litri",
            2_900,
            Competition::Medium,
            47,
            0.35,
            0.95,
            vec![62.0, 64.0, 66.0, 70.0, 74.0, 78.0, 80.0, 78.0, 72.0, 68.0, 65.0, 63.0],
        ),
        KeywordMetrics::new(
            "bastoncini nordic walking",
            1_300,
            Competition::Low,
            21,
            0.15,
            0.45,
            vec![70.0, 71.0, 69.0, 72.0, 70.0, 71.0, 73.0, 70.0, 69.0, 71.0, 70.0, 72.0],
        ),
        KeywordMetrics::new(
            "giacca impermeabile montagna",
            6_600,
            Competition::High,
            76,
            0.80,
            2.60,
            vec![90.0, 85.0, 70.0, 55.0, 40.0, 30.0, 28.0, 35.0, 50.0, 72.0, 88.0, 100.0],
        ),
        KeywordMetrics::new(
            "calze merino trekking",
            720,
            Competition::Low,
            18,
            0.10,
            0.30,
            vec![50.0; 12],
        ),
        KeywordMetrics::new(
            "tenda ultraleggera 1 posto",
            210,
            Competition::Medium,
            55,
            0.90,
            2.10,
            vec![20.0, 25.0, 40.0, 65.0, 90.0, 100.0, 95.0, 70.0, 40.0, 22.0, 18.0, 15.0],
        ),
        KeywordMetrics::new(
            "lampada frontale ricaricabile",
            3_600,
            Competition::Medium,
            39,
            0.25,
            0.70,
            vec![55.0, 57.0, 60.0, 63.0, 66.0, 70.0, 72.0, 70.0, 68.0, 64.0, 60.0, 58.0],
        ),
        KeywordMetrics::new(
            "sentieri dolomiti",
            27_100,
            Competition::Low,
            8,
            0.05,
            0.15,
            vec![30.0, 32.0, 40.0, 58.0, 80.0, 100.0, 98.0, 86.0, 60.0, 42.0, 33.0, 30.0],
        ),
    ]
}
