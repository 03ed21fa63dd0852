//! Keyword tables and the matcher shared by the type, department and
//! experience criteria.
//!
//! Matching defaults to plain substring search, so short keywords such as
//! "it" also hit inside longer words ("write", "digital"). `MatchMode::WholeWord`
//! is available for callers who want the stricter reading; switching modes
//! changes scores, so it is never applied implicitly.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::preferences::JobType;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
    #[default]
    Substring,
    WholeWord,
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "substring" => Ok(MatchMode::Substring),
            "whole-word" | "whole_word" | "word" => Ok(MatchMode::WholeWord),
            other => Err(format!("unknown match mode '{other}'")),
        }
    }
}

impl MatchMode {
    /// True if `keyword` occurs in `text`. Both are expected lowercased.
    pub fn matches(&self, text: &str, keyword: &str) -> bool {
        match self {
            MatchMode::Substring => text.contains(keyword),
            MatchMode::WholeWord => contains_word(text, keyword.trim()),
        }
    }
}

fn contains_word(text: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    text.match_indices(word).any(|(start, _)| {
        let end = start + word.len();
        let before = text[..start].chars().next_back();
        let after = text[end..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

/// Lowercase keyword list searched with one `MatchMode`.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordSet {
    terms: Vec<String>,
    mode: MatchMode,
}

impl KeywordSet {
    pub fn new<I, S>(terms: I, mode: MatchMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            terms: terms.into_iter().map(|t| t.as_ref().to_lowercase()).collect(),
            mode,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Number of distinct terms found in any of `texts`.
    pub fn count_in(&self, texts: &[&str]) -> usize {
        self.terms
            .iter()
            .filter(|term| texts.iter().any(|text| self.mode.matches(text, term)))
            .count()
    }

    pub fn any_in(&self, text: &str) -> bool {
        self.terms.iter().any(|term| self.mode.matches(text, term))
    }
}

pub fn type_terms(job_type: JobType) -> &'static [&'static str] {
    match job_type {
        JobType::Research => &["research", "ra ", "lab", "experiment", "data", "analysis"],
        JobType::Teaching => &["teaching", "tutor", "ta ", "grader", "mentor", "peer"],
        JobType::Administrative => &["admin", "assistant", "coordinator", "clerk", "office"],
        JobType::Technical => &["tech", "it", "computer", "web", "software", "digital"],
        JobType::Creative => &["library", "writing", "media", "creative", "design", "art"],
        JobType::Any => &[],
    }
}

pub const BEGINNER_FRIENDLY: &[&str] = &["entry", "beginner", "training", "learn"];
pub const BEGINNER_UNFRIENDLY: &[&str] = &["experience required", "advanced", "expert"];
pub const EXPERIENCED_SIGNALS: &[&str] = &["advanced", "independent", "leadership", "manage"];
