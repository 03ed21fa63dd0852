use csv::WriterBuilder;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use crate::error::ExportError;
use crate::scoring::ScoredJob;

#[derive(Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "Rank")]
    rank: usize,
    #[serde(rename = "Score")]
    score: String,
    #[serde(rename = "Title")]
    title: &'a str,
    #[serde(rename = "Department")]
    department: &'a str,
    #[serde(rename = "Hours")]
    hours: &'a str,
    #[serde(rename = "Pay")]
    pay: &'a str,
    #[serde(rename = "Location")]
    location: &'a str,
    #[serde(rename = "Url")]
    url: &'a str,
}

/// Writes a ranking as CSV with a header row.
pub fn write_ranking<W: Write>(writer: W, ranking: &[ScoredJob<'_>]) -> Result<(), ExportError> {
    let mut wtr = WriterBuilder::new().has_headers(true).from_writer(writer);
    for (i, scored) in ranking.iter().enumerate() {
        let job = scored.job;
        wtr.serialize(ExportRow {
            rank: i + 1,
            score: format!("{:.1}", scored.score),
            title: job.title().unwrap_or_default(),
            department: job.department().unwrap_or_default(),
            hours: job.weekly_hours().unwrap_or_default(),
            pay: job.pay_text().unwrap_or_default(),
            location: job.location.as_deref().unwrap_or_default(),
            url: job.url.as_deref().unwrap_or_default(),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn export_ranking(path: &Path, ranking: &[ScoredJob<'_>]) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    write_ranking(file, ranking)?;
    tracing::info!(path = %path.display(), rows = ranking.len(), "ranking exported");
    Ok(())
}
