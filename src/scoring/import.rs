use super::domain::{Competition, KeywordMetrics};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;

const TREND_MONTHS: usize = 12;
const FLAT_TREND_VALUE: f64 = 50.0;

#[derive(Debug)]
pub enum KeywordImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidField {
        row: usize,
        field: &'static str,
        value: String,
    },
}

impl std::fmt::Display for KeywordImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeywordImportError::Io(err) => write!(f, "failed to read keyword export: {}", err),
            KeywordImportError::Csv(err) => write!(f, "invalid keyword CSV data: {}", err),
            KeywordImportError::InvalidField { row, field, value } => {
                write!(f, "row {row}: invalid {field} '{value}'")
            }
        }
    }
}

impl std::error::Error for KeywordImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            KeywordImportError::Io(err) => Some(err),
            KeywordImportError::Csv(err) => Some(err),
            KeywordImportError::InvalidField { .. } => None,
        }
    }
}

impl From<std::io::Error> for KeywordImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for KeywordImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub fn import_keywords_from_path<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<KeywordMetrics>, KeywordImportError> {
    let file = std::fs::File::open(path)?;
    import_keywords(file)
}

/// Reads keyword metrics from a CSV export. Rows without a keyword are skipped.
pub fn import_keywords<R: Read>(reader: R) -> Result<Vec<KeywordMetrics>, KeywordImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut keywords = Vec::new();

    for (index, record) in csv_reader.deserialize::<KeywordRow>().enumerate() {
        let row = record?;
        // header is line 1
        let line = index + 2;

        if row.keyword.trim().is_empty() {
            continue;
        }

        keywords.push(row.into_metrics(line)?);
    }

    Ok(keywords)
}

#[derive(Debug, Deserialize)]
struct KeywordRow {
    keyword: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    volume: Option<String>,
    competition: String,
    #[serde(default)]
    competition_index: Option<u8>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    cpc_low: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    cpc_high: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    cpc_avg: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    trend: Option<String>,
}

impl KeywordRow {
    fn into_metrics(self, line: usize) -> Result<KeywordMetrics, KeywordImportError> {
        let competition: Competition =
            self.competition
                .parse()
                .map_err(|_| KeywordImportError::InvalidField {
                    row: line,
                    field: "competition",
                    value: self.competition.clone(),
                })?;

        let volume = match self.volume.as_deref() {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|_| KeywordImportError::InvalidField {
                    row: line,
                    field: "volume",
                    value: raw.to_string(),
                })?,
            None => 0,
        };
        let cpc_low = parse_amount(self.cpc_low.as_deref(), line, "cpc_low")?.unwrap_or(0.0);
        let cpc_high = parse_amount(self.cpc_high.as_deref(), line, "cpc_high")?.unwrap_or(0.0);

        let competition_index = self
            .competition_index
            .unwrap_or_else(|| default_competition_index(competition));

        let trend = match self.trend.as_deref() {
            Some(raw) => parse_trend(raw).ok_or_else(|| KeywordImportError::InvalidField {
                row: line,
                field: "trend",
                value: raw.to_string(),
            })?,
            None => vec![FLAT_TREND_VALUE; TREND_MONTHS],
        };

        let mut metrics = KeywordMetrics::new(
            self.keyword.trim(),
            volume,
            competition,
            competition_index,
            cpc_low,
            cpc_high,
            trend,
        );

        if let Some(cpc_avg) = parse_amount(self.cpc_avg.as_deref(), line, "cpc_avg")? {
            metrics.cpc_avg = cpc_avg;
        }

        Ok(metrics)
    }
}

/// Parses an optional money cell; blanks are `None`, non-finite values are rejected.
fn parse_amount(
    raw: Option<&str>,
    line: usize,
    field: &'static str,
) -> Result<Option<f64>, KeywordImportError> {
    raw.map(|raw| {
        raw.parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| KeywordImportError::InvalidField {
                row: line,
                field,
                value: raw.to_string(),
            })
    })
    .transpose()
}

/// Index used when the export only carries the competition bucket.
fn default_competition_index(competition: Competition) -> u8 {
    match competition {
        Competition::Low => 25,
        Competition::Medium => 50,
        Competition::High => 75,
    }
}

fn parse_trend(raw: &str) -> Option<Vec<f64>> {
    raw.split(';')
        .map(str::trim)
        .filter(|point| !point.is_empty())
        .map(|point| point.parse::<f64>().ok().filter(|value| value.is_finite()))
        .collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "keyword,volume,competition,competition_index,cpc_low,cpc_high,cpc_avg,trend\n";

    #[test]
    fn imports_rows_and_derives_missing_fields() {
        let csv = format!(
            "{HEADER}scarpe trail,2400,MEDIUM,,0.40,1.20,,\"40;50;60\"\nborraccia,90,low,12,0.1,0.3,0.25,\n"
        );
        let keywords = import_keywords(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(keywords.len(), 2);
        let trail = &keywords[0];
        assert_eq!(trail.competition, Competition::Medium);
        assert_eq!(trail.competition_index, 50);
        assert!((trail.cpc_avg - 0.8).abs() < 1e-9);
        assert_eq!(trail.trend, vec![40.0, 50.0, 60.0]);

        let bottle = &keywords[1];
        assert_eq!(bottle.competition_index, 12);
        assert!((bottle.cpc_avg - 0.25).abs() < 1e-9);
        assert_eq!(bottle.trend, vec![50.0; 12]);
    }

    #[test]
    fn skips_rows_without_keyword() {
        let csv = format!("{HEADER} ,100,low,10,0.1,0.2,,\n");
        let keywords = import_keywords(Cursor::new(csv)).expect("import succeeds");
        assert!(keywords.is_empty());
    }

    #[test]
    fn reports_row_of_invalid_trend() {
        let csv = format!("{HEADER}tenda,100,low,10,0.1,0.2,,\"10;abc\"\n");
        match import_keywords(Cursor::new(csv)) {
            Err(KeywordImportError::InvalidField { row, field, .. }) => {
                assert_eq!(row, 2);
                assert_eq!(field, "trend");
            }
            other => panic!("expected invalid trend, got {other:?}"),
        }
    }

    #[test]
    fn blank_numeric_cells_default_to_zero() {
        let csv = format!("{HEADER}tenda,,low,,,0.2,,\n");
        let keywords = import_keywords(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(keywords.len(), 1);
        assert_eq!(keywords[0].volume, 0);
        assert_eq!(keywords[0].cpc_low, 0.0);
        assert!((keywords[0].cpc_high - 0.2).abs() < 1e-9);
        assert!((keywords[0].cpc_avg - 0.1).abs() < 1e-9);
    }

    #[test]
    fn rejects_non_finite_cpc_bounds() {
        for (cells, field) in [("inf,0.2", "cpc_low"), ("0.1,NaN", "cpc_high")] {
            let csv = format!("{HEADER}tenda,100,low,10,{cells},,\n");
            match import_keywords(Cursor::new(csv)) {
                Err(KeywordImportError::InvalidField { row, field: rejected, .. }) => {
                    assert_eq!(row, 2);
                    assert_eq!(rejected, field);
                }
                other => panic!("expected invalid {field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_fractional_volume() {
        let csv = format!("{HEADER}tenda,12.5,low,10,0.1,0.2,,\n");
        let error = import_keywords(Cursor::new(csv)).expect_err("volume must be whole");
        assert!(error.to_string().contains("volume"));
    }

    #[test]
    fn rejects_unknown_competition() {
        let csv = format!("{HEADER}tenda,100,extreme,10,0.1,0.2,,\n");
        let error = import_keywords(Cursor::new(csv)).expect_err("competition must be known");
        assert!(error.to_string().contains("competition"));
    }

    #[test]
    fn propagates_io_errors_for_missing_files() {
        let error = import_keywords_from_path("./does-not-exist.csv").expect_err("expected io error");
        assert!(matches!(error, KeywordImportError::Io(_)));
    }
}
