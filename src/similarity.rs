//! "Jobs like this one": a heuristic closeness score over department, title
//! words and weekly hours. Scores are only meaningful relative to each other.

use crate::job::JobRecord;
use crate::utils::{lowered, parse_weekly_hours, title_words};

const SAME_DEPARTMENT: u32 = 40;
const PER_SHARED_TITLE_WORD: u32 = 10;
const CLOSE_HOURS: u32 = 20;
const NEAR_HOURS: u32 = 10;
/// Candidates must score strictly above this to be listed.
const MIN_SIMILARITY: u32 = 20;

pub const DEFAULT_SIMILAR_COUNT: usize = 5;

/// Raw similarity between two records.
pub fn similarity(reference: &JobRecord, candidate: &JobRecord) -> u32 {
    let mut score = 0;

    if reference.department().unwrap_or_default() == candidate.department().unwrap_or_default() {
        score += SAME_DEPARTMENT;
    }

    let reference_title = lowered(reference.title());
    let candidate_title = lowered(candidate.title());
    let candidate_words = title_words(&candidate_title);
    let shared = title_words(&reference_title)
        .iter()
        .filter(|word| candidate_words.contains(*word))
        .count() as u32;
    score += shared * PER_SHARED_TITLE_WORD;

    let hours = (
        parse_weekly_hours(reference.weekly_hours()),
        parse_weekly_hours(candidate.weekly_hours()),
    );
    if let (Some(a), Some(b)) = hours {
        let diff = a.abs_diff(b);
        if diff <= 2 {
            score += CLOSE_HOURS;
        } else if diff <= 5 {
            score += NEAR_HOURS;
        }
    }

    score
}

/// The `top_n` records most similar to `reference`, best first. Records equal
/// to the reference field-for-field are never listed, even when they are
/// separate entries in the catalog.
pub fn similar<'a>(
    reference: &JobRecord,
    catalog: &'a [JobRecord],
    top_n: usize,
) -> Vec<&'a JobRecord> {
    let mut candidates: Vec<(u32, &'a JobRecord)> = catalog
        .iter()
        .filter(|job| *job != reference)
        .map(|job| (similarity(reference, job), job))
        .filter(|(score, _)| *score > MIN_SIMILARITY)
        .collect();
    candidates.sort_by(|a, b| b.0.cmp(&a.0));

    tracing::debug!(
        title = reference.title().unwrap_or("?"),
        matches = candidates.len(),
        "similar jobs found"
    );

    candidates
        .into_iter()
        .take(top_n)
        .map(|(_, job)| job)
        .collect()
}
