//! Builds a catalog from job-posting pages saved to disk.
//!
//! Posting pages lay out each field as a label line followed by its value, so
//! extraction walks the visible text line by line. Nothing here touches the
//! network; pages are read from a local directory.

use chrono::Local;
use scraper::{Html, Selector};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::HarvestError;
use crate::job::{Catalog, JobRecord};

const PAGE_EXTENSIONS: &[&str] = &["html", "htm", "txt"];
/// How far past "Hourly Range:" to look for the minimum/maximum pair.
const RANGE_LOOKAHEAD: usize = 6;

/// Visible text lines of an HTML page, taken from `<main>` when present and
/// from `<body>` otherwise.
pub fn page_lines(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    for container in ["main", "body"] {
        let Ok(selector) = Selector::parse(container) else {
            continue;
        };
        if let Some(element) = document.select(&selector).next() {
            let lines: Vec<String> = element
                .text()
                .flat_map(str::lines)
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect();
            if !lines.is_empty() {
                return lines;
            }
        }
    }
    Vec::new()
}

/// The posting URL recorded in a saved page, if the page carries one.
pub fn page_url(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let candidates = [
        ("link[rel='canonical']", "href"),
        ("meta[property='og:url']", "content"),
    ];
    candidates.iter().find_map(|(css, attr)| {
        let selector = Selector::parse(css).ok()?;
        let element = document.select(&selector).next()?;
        element.value().attr(attr).map(str::to_string)
    })
}

/// Pulls the labeled fields out of a posting's text lines.
pub fn extract_record<S: AsRef<str>>(lines: &[S]) -> JobRecord {
    let lines: Vec<&str> = lines.iter().map(|l| l.as_ref()).collect();
    let mut job = JobRecord::default();

    for (i, pair) in lines.windows(2).enumerate() {
        let (label, value) = (pair[0], pair[1]);
        match label {
            "Job Posting Title:" => job.job_title = Some(value.to_string()),
            "Job Description:" => job.job_description = Some(value.to_string()),
            "Recruiting Start Date:" => job.recruiting_start_date = Some(value.to_string()),
            "Location" if job.location.is_none() => job.location = Some(value.to_string()),
            "Department:" => job.department = Some(value.to_string()),
            "Scheduled Weekly Hours:" => job.scheduled_weekly_hours = Some(value.to_string()),
            "Hourly Rate:" => job.hourly_range = Some(value.to_string()),
            "Hourly Range:" => {
                if let Some(range) = hourly_range_after(&lines, i) {
                    job.hourly_range = Some(range);
                }
            }
            _ => {}
        }
    }

    if job.job_title.is_none() && lines.len() > 3 {
        job.job_title = Some(lines[2].to_string());
    }
    job
}

fn hourly_range_after(lines: &[&str], label_at: usize) -> Option<String> {
    let end = (label_at + 1 + RANGE_LOOKAHEAD).min(lines.len());
    let mut minimum = None;
    for j in label_at + 1..end {
        match (lines[j], lines.get(j + 1)) {
            ("Minimum:", Some(value)) => minimum = Some(*value),
            ("Maximum:", Some(value)) => {
                return minimum.map(|min| format!("${min} - ${value}"));
            }
            _ => {}
        }
    }
    None
}

/// Reads one saved page into a record.
pub fn harvest_page(path: &Path) -> Result<JobRecord, HarvestError> {
    let raw = fs::read_to_string(path).map_err(|source| HarvestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let is_text = path.extension().is_some_and(|ext| ext == "txt");
    let (lines, url) = if is_text {
        let lines: Vec<String> = raw
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect();
        (lines, None)
    } else {
        (page_lines(&raw), page_url(&raw))
    };
    if lines.is_empty() {
        return Err(HarvestError::NoContent(path.to_path_buf()));
    }

    let mut job = extract_record(&lines);
    job.url = url;
    job.full_text = Some(lines.join("\n"));
    job.scraped_at = Some(Local::now().to_rfc3339());
    Ok(job)
}

fn page_files(dir: &Path) -> Result<Vec<PathBuf>, HarvestError> {
    let io_err = |source| HarvestError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        let wanted = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| PAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()));
        if wanted && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Harvests every page in `dir` (in file-name order). Pages with no text are
/// skipped with a warning; the rest are numbered from 1.
pub fn harvest_dir(dir: &Path) -> Result<Catalog, HarvestError> {
    let files = page_files(dir)?;
    if files.is_empty() {
        return Err(HarvestError::Empty(dir.to_path_buf()));
    }

    let mut catalog = Catalog::default();
    for path in files {
        match harvest_page(&path) {
            Ok(mut job) => {
                job.index = Some(catalog.jobs.len() as u64 + 1);
                tracing::debug!(
                    path = %path.display(),
                    title = job.title().unwrap_or("?"),
                    "page harvested"
                );
                catalog.jobs.push(job);
            }
            Err(HarvestError::NoContent(path)) => {
                tracing::warn!(path = %path.display(), "skipping page with no text");
            }
            Err(e) => return Err(e),
        }
    }
    tracing::info!(jobs = catalog.jobs.len(), dir = %dir.display(), "harvest complete");
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><head>
        <link rel="canonical" href="https://jobs.example.edu/posting/42">
        </head><body>
        <nav>Menu</nav>
        <main>
          <h1>Student Job</h1>
          <div>Posting</div>
          <div>Library Circulation Aide</div>
          <p>Job Posting Title:</p><p>Circulation Aide</p>
          <p>Department:</p><p>University Library</p>
          <p>Location</p><p>Rockefeller Library</p>
          <p>Location</p><p>Somewhere Else</p>
          <p>Scheduled Weekly Hours:</p><p>10</p>
          <p>Hourly Range:</p><p>Minimum:</p><p>16.00</p><p>Maximum:</p><p>17.50</p>
          <p>Job Description:</p><p>Shelve books and help patrons.</p>
        </main></body></html>"#;

    #[test]
    fn test_page_lines_prefer_main() {
        let lines = page_lines(PAGE);
        assert_eq!(lines[0], "Student Job");
        assert!(!lines.iter().any(|l| l == "Menu"));
    }

    #[test]
    fn test_extracts_labeled_fields() {
        let job = extract_record(&page_lines(PAGE));
        assert_eq!(job.title(), Some("Circulation Aide"));
        assert_eq!(job.department(), Some("University Library"));
        assert_eq!(job.location.as_deref(), Some("Rockefeller Library"));
        assert_eq!(job.weekly_hours(), Some("10"));
        assert_eq!(job.pay_text(), Some("$16.00 - $17.50"));
        assert_eq!(job.description(), Some("Shelve books and help patrons."));
    }

    #[test]
    fn test_canonical_url_is_read() {
        assert_eq!(
            page_url(PAGE).as_deref(),
            Some("https://jobs.example.edu/posting/42")
        );
    }

    #[test]
    fn test_hourly_rate_label() {
        let job = extract_record(&["Hourly Rate:", "$15.75"]);
        assert_eq!(job.pay_text(), Some("$15.75"));
    }

    #[test]
    fn test_title_falls_back_to_third_line() {
        let job = extract_record(&["Header", "Sub", "Peer Tutor", "Department:", "Math"]);
        assert_eq!(job.title(), Some("Peer Tutor"));
        let short = extract_record(&["a", "b", "c"]);
        assert_eq!(short.title(), None);
    }

    #[test]
    fn test_range_without_minimum_is_ignored() {
        let job = extract_record(&["Hourly Range:", "Maximum:", "18.00"]);
        assert_eq!(job.pay_text(), None);
    }
}
