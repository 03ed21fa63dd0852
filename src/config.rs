use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::keywords::MatchMode;
use crate::session::DEFAULT_PAGE_SIZE;
use crate::similarity::DEFAULT_SIMILAR_COUNT;

pub const DEFAULT_CATALOG: &str = "brown_jobs_2025_final.json";

/// Settings loaded from the environment (and `.env` when present).
/// Command-line flags override these in `main`.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub catalog_path: PathBuf,
    pub page_size: usize,
    pub similar_count: usize,
    pub match_mode: MatchMode,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG),
            page_size: DEFAULT_PAGE_SIZE,
            similar_count: DEFAULT_SIMILAR_COUNT,
            match_mode: MatchMode::Substring,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. Unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        Ok(Config {
            catalog_path: lookup("JOB_FINDER_CATALOG")
                .map(PathBuf::from)
                .unwrap_or(defaults.catalog_path),
            page_size: parse_count(&lookup, "JOB_FINDER_PAGE_SIZE", defaults.page_size)?,
            similar_count: parse_count(
                &lookup,
                "JOB_FINDER_SIMILAR_COUNT",
                defaults.similar_count,
            )?,
            match_mode: match lookup("JOB_FINDER_MATCH_MODE") {
                Some(raw) => raw
                    .parse::<MatchMode>()
                    .map_err(anyhow::Error::msg)
                    .context("JOB_FINDER_MATCH_MODE must be 'substring' or 'whole-word'")?,
                None => defaults.match_mode,
            },
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }
}

fn parse_count<F>(lookup: &F, key: &str, default: usize) -> Result<usize>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => {
            let value = raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("{key} must be a positive integer"))?;
            anyhow::ensure!(value > 0, "{key} must be a positive integer");
            Ok(value)
        }
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(config_from(&[]).unwrap(), Config::default());
    }

    #[test]
    fn test_overrides_are_read() {
        let config = config_from(&[
            ("JOB_FINDER_CATALOG", "data/jobs.json"),
            ("JOB_FINDER_PAGE_SIZE", "20"),
            ("JOB_FINDER_MATCH_MODE", "whole-word"),
        ])
        .unwrap();
        assert_eq!(config.catalog_path, PathBuf::from("data/jobs.json"));
        assert_eq!(config.page_size, 20);
        assert_eq!(config.similar_count, DEFAULT_SIMILAR_COUNT);
        assert_eq!(config.match_mode, MatchMode::WholeWord);
    }

    #[test]
    fn test_bad_values_are_rejected() {
        assert!(config_from(&[("JOB_FINDER_PAGE_SIZE", "ten")]).is_err());
        assert!(config_from(&[("JOB_FINDER_SIMILAR_COUNT", "0")]).is_err());
        assert!(config_from(&[("JOB_FINDER_MATCH_MODE", "fuzzy")]).is_err());
    }
}
