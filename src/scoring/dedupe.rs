use super::domain::KeywordMetrics;
use std::collections::HashMap;

/// Collapses keywords that differ only by case or surrounding whitespace.
///
/// The record with the larger volume wins and takes the slot of the first
/// occurrence. Blank keywords are dropped.
pub fn dedupe_keywords(keywords: Vec<KeywordMetrics>) -> Vec<KeywordMetrics> {
    let mut slots: HashMap<String, usize> = HashMap::with_capacity(keywords.len());
    let mut unique: Vec<KeywordMetrics> = Vec::with_capacity(keywords.len());

    for metrics in keywords {
        let key = metrics.keyword.trim().to_lowercase();
        if key.is_empty() {
            continue;
        }

        match slots.get(&key) {
            Some(&index) => {
                if metrics.volume > unique[index].volume {
                    unique[index] = metrics;
                }
            }
            None => {
                slots.insert(key, unique.len());
                unique.push(metrics);
            }
        }
    }

    unique
}

/// Distinct seed phrases, first spelling kept, blanks dropped.
pub fn dedupe_seeds(seeds: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::with_capacity(seeds.len());
    seeds
        .into_iter()
        .map(|seed| seed.trim().to_string())
        .filter(|seed| !seed.is_empty() && seen.insert(seed.clone()))
        .collect()
}
