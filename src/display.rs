use std::io::{self, Write};

use crate::job::JobRecord;
use crate::scoring::ScoredJob;

const DESCRIPTION_PREVIEW_CHARS: usize = 100;

fn field_or<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => fallback,
    }
}

/// Shortens long descriptions to a preview, on a character boundary.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Prints ranked jobs numbered from `first_rank`.
pub fn render_recommendations<W: Write>(
    out: &mut W,
    recommendations: &[ScoredJob<'_>],
    first_rank: usize,
) -> io::Result<()> {
    let title = if first_rank == 1 {
        format!("YOUR TOP {} JOB RECOMMENDATIONS", recommendations.len())
    } else {
        format!(
            "RECOMMENDATIONS #{}-#{}",
            first_rank,
            first_rank + recommendations.len().saturating_sub(1)
        )
    };
    writeln!(out, "\n{title}")?;
    writeln!(out, "{}", "=".repeat(60))?;

    for (offset, rec) in recommendations.iter().enumerate() {
        let job = rec.job;
        writeln!(
            out,
            "\n#{} - {} (Match: {:.0}%)",
            first_rank + offset,
            field_or(job.title(), "Unknown Title"),
            rec.score
        )?;
        writeln!(out, "Department: {}", field_or(job.department(), "Unknown Department"))?;
        writeln!(out, "Hours:      {} hours/week", field_or(job.weekly_hours(), "?"))?;
        writeln!(out, "Pay:        {}", field_or(job.pay_text(), "Pay not specified"))?;
        writeln!(
            out,
            "Location:   {}",
            field_or(job.location.as_deref(), "Location not specified")
        )?;
        let description = job.description().unwrap_or_default();
        writeln!(out, "About:      {}", preview(description, DESCRIPTION_PREVIEW_CHARS))?;
        writeln!(out, "Link:       {}", job.url.as_deref().unwrap_or_default())?;
        if offset + 1 < recommendations.len() {
            writeln!(out, "{}", "-".repeat(40))?;
        }
    }
    Ok(())
}

pub fn render_similar<W: Write>(
    out: &mut W,
    reference: &JobRecord,
    similar: &[&JobRecord],
) -> io::Result<()> {
    writeln!(
        out,
        "\nFinding jobs similar to: {}",
        field_or(reference.title(), "Unknown")
    )?;
    if similar.is_empty() {
        writeln!(out, "No similar jobs found.")?;
        return Ok(());
    }
    writeln!(out, "\nSIMILAR JOBS:")?;
    writeln!(out, "{}", "=".repeat(40))?;
    for (i, job) in similar.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, field_or(job.title(), "Unknown"))?;
        writeln!(out, "   {}", field_or(job.department(), "Unknown Department"))?;
        writeln!(
            out,
            "   {} hrs/week, {}",
            field_or(job.weekly_hours(), "?"),
            field_or(job.pay_text(), "Pay TBD")
        )?;
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_cuts_on_char_boundary() {
        assert_eq!(preview("héllo wörld", 4), "héll...");
        assert_eq!(preview("short", 100), "short");
    }

    #[test]
    fn test_missing_fields_use_placeholders() {
        let job = JobRecord::default();
        let recs = [ScoredJob { score: 47.0, job: &job }];
        let mut out = Vec::new();
        render_recommendations(&mut out, &recs, 1).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("#1 - Unknown Title (Match: 47%)"));
        assert!(text.contains("Pay not specified"));
    }

    #[test]
    fn test_later_pages_show_rank_span() {
        let job = JobRecord::default();
        let recs = [ScoredJob { score: 10.0, job: &job }, ScoredJob { score: 9.0, job: &job }];
        let mut out = Vec::new();
        render_recommendations(&mut out, &recs, 11).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("RECOMMENDATIONS #11-#12"));
        assert!(text.contains("#12 - Unknown Title"));
    }

    #[test]
    fn test_no_similar_jobs_message() {
        let mut out = Vec::new();
        render_similar(&mut out, &JobRecord::default(), &[]).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("No similar jobs found."));
    }
}
