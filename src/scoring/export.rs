use super::domain::ScoredKeyword;
use chrono::NaiveDate;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write keyword CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush keyword CSV: {0}")]
    Io(#[from] std::io::Error),
    #[error("keyword CSV is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Renders keywords as CSV, one row per keyword in the given order.
pub fn export_csv<'a, I>(keywords: I, currency: &str) -> Result<String, ExportError>
where
    I: IntoIterator<Item = &'a ScoredKeyword>,
{
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let cpc_header = format!("Avg CPC ({currency})");
    writer.write_record([
        "Keyword",
        "Score",
        "Recommendation",
        "Volume",
        cpc_header.as_str(),
        "Competition",
        "Estimated ROI %",
        "Stability",
        "Notes",
    ])?;

    for keyword in keywords {
        let metrics = &keyword.metrics;
        writer.write_record([
            metrics.keyword.clone(),
            keyword.profitability_score.to_string(),
            keyword.recommendation_level.code().to_string(),
            metrics.volume.to_string(),
            format!("{:.2}", metrics.cpc_avg),
            metrics.competition.label().to_string(),
            keyword.roi_estimate.to_string(),
            keyword.stability_score.to_string(),
            keyword.reasoning.clone(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

pub fn export_filename(date: NaiveDate) -> String {
    format!("keywords_{}.csv", date.format("%Y-%m-%d"))
}
