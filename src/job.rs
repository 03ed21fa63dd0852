use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::error::CatalogError;

/// One harvested job posting. Every field is optional; the scoring and
/// similarity code treat a missing field as unknown rather than as an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(
        default,
        deserialize_with = "lenient_index",
        skip_serializing_if = "Option::is_none"
    )]
    pub index: Option<u64>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub job_description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub scheduled_weekly_hours: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub hourly_range: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub recruiting_start_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub scraped_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub full_text: Option<String>,
}

/// Text fields accept strings and numbers (`"scheduled_weekly_hours": 10`);
/// any other JSON value reads as missing.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    })
}

fn lenient_index<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    })
}

impl JobRecord {
    pub fn title(&self) -> Option<&str> {
        self.job_title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.job_description.as_deref()
    }

    pub fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }

    pub fn weekly_hours(&self) -> Option<&str> {
        self.scheduled_weekly_hours.as_deref()
    }

    pub fn pay_text(&self) -> Option<&str> {
        self.hourly_range.as_deref()
    }
}

/// On-disk catalog shape written by `harvest`.
#[derive(Debug, Default, Serialize)]
pub struct Catalog {
    pub jobs: Vec<JobRecord>,
}

impl Catalog {
    /// Reads `{"jobs": [...]}` or a bare array of records. A record that is
    /// not a JSON object is reported by its 1-based position.
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let root: Value = serde_json::from_str(text).map_err(CatalogError::Parse)?;
        let records = match root {
            Value::Array(records) => records,
            Value::Object(mut fields) => match fields.remove("jobs") {
                Some(Value::Array(records)) => records,
                _ => return Err(CatalogError::Shape("expected a \"jobs\" array")),
            },
            _ => return Err(CatalogError::Shape("expected an object or an array of jobs")),
        };
        let jobs = records
            .into_iter()
            .enumerate()
            .map(|(i, record)| {
                serde_json::from_value(record).map_err(|source| CatalogError::Record {
                    position: i + 1,
                    source,
                })
            })
            .collect::<Result<Vec<JobRecord>, _>>()?;
        Ok(Catalog { jobs })
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&text)?;
        tracing::info!(path = %path.display(), jobs = catalog.jobs.len(), "catalog loaded");
        Ok(catalog)
    }

    pub fn save(&self, path: &Path) -> Result<(), CatalogError> {
        let text = serde_json::to_string_pretty(self).map_err(CatalogError::Encode)?;
        fs::write(path, text).map_err(|source| CatalogError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_catalog_parses() {
        let catalog = Catalog::from_json(
            r#"{"jobs": [{"job_title": "Lab Assistant", "scheduled_weekly_hours": "10"}]}"#,
        )
        .unwrap();
        assert_eq!(catalog.jobs.len(), 1);
        assert_eq!(catalog.jobs[0].title(), Some("Lab Assistant"));
        assert_eq!(catalog.jobs[0].weekly_hours(), Some("10"));
    }

    #[test]
    fn test_bare_array_parses() {
        let catalog = Catalog::from_json(r#"[{"department": "Library"}, {}]"#).unwrap();
        assert_eq!(catalog.jobs.len(), 2);
        assert_eq!(catalog.jobs[1], JobRecord::default());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let catalog =
            Catalog::from_json(r#"{"jobs": [{"job_title": "Grader", "company": "Brown"}]}"#)
                .unwrap();
        assert_eq!(catalog.jobs[0].title(), Some("Grader"));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Catalog::from_json("{\"jobs\": [").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_numeric_and_odd_typed_fields_are_tolerated() {
        let catalog = Catalog::from_json(
            r#"{"jobs": [
                {"job_title": "Lab Aide", "scheduled_weekly_hours": 10, "index": "3"},
                {"job_title": 42, "department": ["Library"], "hourly_range": null},
                {"job_title": "Tutor", "scheduled_weekly_hours": "8"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(catalog.jobs.len(), 3);
        assert_eq!(catalog.jobs[0].weekly_hours(), Some("10"));
        assert_eq!(catalog.jobs[0].index, Some(3));
        assert_eq!(catalog.jobs[1].title(), Some("42"));
        assert_eq!(catalog.jobs[1].department(), None);
        assert_eq!(catalog.jobs[1].pay_text(), None);
        assert_eq!(catalog.jobs[2].weekly_hours(), Some("8"));
    }

    #[test]
    fn test_non_object_title_reads_as_missing() {
        let catalog = Catalog::from_json(r#"[{"job_title": {"text": "Grader"}}, {"job_title": true}]"#)
            .unwrap();
        assert_eq!(catalog.jobs[0].title(), None);
        assert_eq!(catalog.jobs[1], JobRecord::default());
    }

    #[test]
    fn test_wrong_shape_is_reported() {
        let err = Catalog::from_json(r#"{"postings": []}"#).unwrap_err();
        assert!(matches!(err, CatalogError::Shape(_)));
        let err = Catalog::from_json(r#"[{"job_title": "Grader"}, 7]"#).unwrap_err();
        assert!(matches!(err, CatalogError::Record { position: 2, .. }));
        assert!(err.to_string().contains("#2"));
    }
}
