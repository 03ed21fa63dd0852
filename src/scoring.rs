//! Preference match scoring.
//!
//! Each criterion is an independent `Evaluator` that awards between 0 and its
//! weight in points. `ScoreCalculator` applies every evaluator with the weight
//! from its `Weights` table and normalizes the sum to a percentage.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::job::JobRecord;
use crate::keywords::{
    type_terms, KeywordSet, MatchMode, BEGINNER_FRIENDLY, BEGINNER_UNFRIENDLY,
    EXPERIENCED_SIGNALS,
};
use crate::preferences::{ExperienceLevel, Interval, JobType, PreferenceSet};
use crate::utils::{extract_min_pay, lowered, parse_weekly_hours};

/// Credit awarded when the hours or pay field cannot be read.
const UNKNOWN_CREDIT: f64 = 0.5;
const HOURS_SHORTFALL_PENALTY: f64 = 3.0;
const HOURS_EXCESS_PENALTY: f64 = 2.0;
const PAY_DISTANCE_PENALTY: f64 = 5.0;
const ANY_TYPE_CREDIT: f64 = 0.7;
const TYPE_CREDIT_PER_MATCH: f64 = 0.4;
const NO_TYPE_MATCH_CREDIT: f64 = 0.2;
const NO_DEPARTMENT_PREFERENCE_CREDIT: f64 = 0.7;
const DEPARTMENT_MISS_CREDIT: f64 = 0.3;
const BEGINNER_NEUTRAL_CREDIT: f64 = 0.7;
const BEGINNER_MISMATCH_CREDIT: f64 = 0.3;
const EXPERIENCE_DEFAULT_CREDIT: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    Hours,
    Pay,
    JobType,
    Department,
    Experience,
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Criterion::Hours => "hours",
            Criterion::Pay => "pay",
            Criterion::JobType => "type",
            Criterion::Department => "department",
            Criterion::Experience => "experience",
        };
        f.write_str(name)
    }
}

/// Points per criterion. The defaults sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub hours: f64,
    pub pay: f64,
    pub job_type: f64,
    pub department: f64,
    pub experience: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            hours: 25.0,
            pay: 20.0,
            job_type: 30.0,
            department: 15.0,
            experience: 10.0,
        }
    }
}

impl Weights {
    pub fn for_criterion(&self, criterion: Criterion) -> f64 {
        let weight = match criterion {
            Criterion::Hours => self.hours,
            Criterion::Pay => self.pay,
            Criterion::JobType => self.job_type,
            Criterion::Department => self.department,
            Criterion::Experience => self.experience,
        };
        weight.max(0.0)
    }

    pub fn sum(&self) -> f64 {
        ALL_CRITERIA.iter().map(|c| self.for_criterion(*c)).sum()
    }
}

const ALL_CRITERIA: [Criterion; 5] = [
    Criterion::Hours,
    Criterion::Pay,
    Criterion::JobType,
    Criterion::Department,
    Criterion::Experience,
];

/// Lowercased views of the text fields, computed once per job.
pub struct JobText<'a> {
    pub job: &'a JobRecord,
    pub title: String,
    pub description: String,
    pub department: String,
}

impl<'a> JobText<'a> {
    pub fn new(job: &'a JobRecord) -> Self {
        Self {
            job,
            title: lowered(job.title()),
            description: lowered(job.description()),
            department: lowered(job.department()),
        }
    }
}

/// One criterion of the match score. Returns points in `[0, weight]`.
pub trait Evaluator {
    fn criterion(&self) -> Criterion;
    fn evaluate(&self, job: &JobText<'_>, prefs: &PreferenceSet, weight: f64) -> f64;
}

pub struct HoursFit;

impl Evaluator for HoursFit {
    fn criterion(&self) -> Criterion {
        Criterion::Hours
    }

    fn evaluate(&self, job: &JobText<'_>, prefs: &PreferenceSet, weight: f64) -> f64 {
        hours_points(parse_weekly_hours(job.job.weekly_hours()), prefs.hours_range, weight)
    }
}

fn hours_points(hours: Option<i64>, range: Interval<i64>, weight: f64) -> f64 {
    let Some(hours) = hours else {
        return weight * UNKNOWN_CREDIT;
    };
    if range.contains(hours) {
        return weight;
    }
    let penalty = if hours < range.min {
        (range.min as f64 - hours as f64) * HOURS_SHORTFALL_PENALTY
    } else {
        (hours as f64 - range.max as f64) * HOURS_EXCESS_PENALTY
    };
    (weight - penalty.min(weight)).max(0.0)
}

pub struct PayFit;

impl Evaluator for PayFit {
    fn criterion(&self) -> Criterion {
        Criterion::Pay
    }

    fn evaluate(&self, job: &JobText<'_>, prefs: &PreferenceSet, weight: f64) -> f64 {
        let Some(pay) = extract_min_pay(job.job.pay_text()) else {
            return weight * UNKNOWN_CREDIT;
        };
        let range = prefs.pay_range;
        if range.contains(pay) {
            return weight;
        }
        let distance = (pay - range.min).abs().min((pay - range.max).abs());
        (weight - distance * PAY_DISTANCE_PENALTY).max(0.0)
    }
}

pub struct TypeFit {
    pub mode: MatchMode,
}

impl Evaluator for TypeFit {
    fn criterion(&self) -> Criterion {
        Criterion::JobType
    }

    fn evaluate(&self, job: &JobText<'_>, prefs: &PreferenceSet, weight: f64) -> f64 {
        if prefs.job_type == JobType::Any {
            return weight * ANY_TYPE_CREDIT;
        }
        let keywords = KeywordSet::new(type_terms(prefs.job_type), self.mode);
        let matches = keywords.count_in(&[job.title.as_str(), job.description.as_str()]);
        if matches > 0 {
            weight * (matches as f64 * TYPE_CREDIT_PER_MATCH).min(1.0)
        } else {
            weight * NO_TYPE_MATCH_CREDIT
        }
    }
}

pub struct DepartmentFit {
    pub mode: MatchMode,
}

impl Evaluator for DepartmentFit {
    fn criterion(&self) -> Criterion {
        Criterion::Department
    }

    fn evaluate(&self, job: &JobText<'_>, prefs: &PreferenceSet, weight: f64) -> f64 {
        let keywords = KeywordSet::new(prefs.department_keywords(), self.mode);
        if keywords.is_empty() {
            weight * NO_DEPARTMENT_PREFERENCE_CREDIT
        } else if keywords.any_in(&job.department) {
            weight
        } else {
            weight * DEPARTMENT_MISS_CREDIT
        }
    }
}

pub struct ExperienceFit {
    pub mode: MatchMode,
}

impl Evaluator for ExperienceFit {
    fn criterion(&self) -> Criterion {
        Criterion::Experience
    }

    fn evaluate(&self, job: &JobText<'_>, prefs: &PreferenceSet, weight: f64) -> f64 {
        let text = format!("{} {}", job.description, job.title);
        let any = |terms: &[&str]| KeywordSet::new(terms, self.mode).any_in(&text);
        match prefs.experience_level {
            ExperienceLevel::Beginner => {
                if any(BEGINNER_FRIENDLY) {
                    weight
                } else if any(BEGINNER_UNFRIENDLY) {
                    weight * BEGINNER_MISMATCH_CREDIT
                } else {
                    weight * BEGINNER_NEUTRAL_CREDIT
                }
            }
            ExperienceLevel::Experienced => {
                if any(EXPERIENCED_SIGNALS) {
                    weight
                } else {
                    weight * EXPERIENCE_DEFAULT_CREDIT
                }
            }
            ExperienceLevel::Intermediate => weight * EXPERIENCE_DEFAULT_CREDIT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubScore {
    pub criterion: Criterion,
    pub value: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub parts: Vec<SubScore>,
}

impl ScoreBreakdown {
    /// Sum of sub-scores over sum of weights, as a percentage.
    pub fn total(&self) -> f64 {
        let weight: f64 = self.parts.iter().map(|p| p.weight).sum();
        if weight <= 0.0 {
            return 0.0;
        }
        let points: f64 = self.parts.iter().map(|p| p.value).sum();
        points / weight * 100.0
    }

    pub fn get(&self, criterion: Criterion) -> Option<&SubScore> {
        self.parts.iter().find(|p| p.criterion == criterion)
    }
}

/// A job paired with its match percentage for one ranking pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredJob<'a> {
    pub score: f64,
    pub job: &'a JobRecord,
}

pub struct ScoreCalculator {
    weights: Weights,
    evaluators: Vec<Box<dyn Evaluator>>,
}

impl Default for ScoreCalculator {
    fn default() -> Self {
        Self::new(Weights::default(), MatchMode::default())
    }
}

impl ScoreCalculator {
    pub fn new(weights: Weights, mode: MatchMode) -> Self {
        Self {
            weights,
            evaluators: vec![
                Box::new(HoursFit),
                Box::new(PayFit),
                Box::new(TypeFit { mode }),
                Box::new(DepartmentFit { mode }),
                Box::new(ExperienceFit { mode }),
            ],
        }
    }

    pub fn breakdown(&self, job: &JobRecord, prefs: &PreferenceSet) -> ScoreBreakdown {
        let text = JobText::new(job);
        let parts = self
            .evaluators
            .iter()
            .map(|evaluator| {
                let criterion = evaluator.criterion();
                let weight = self.weights.for_criterion(criterion);
                let value = evaluator.evaluate(&text, prefs, weight).max(0.0).min(weight);
                SubScore {
                    criterion,
                    value,
                    weight,
                }
            })
            .collect();
        ScoreBreakdown { parts }
    }

    /// Match percentage in `[0, 100]`. Never fails; unreadable fields earn
    /// partial credit.
    pub fn score(&self, job: &JobRecord, prefs: &PreferenceSet) -> f64 {
        self.breakdown(job, prefs).total()
    }

    /// Scores every job and returns the best `limit`, highest first. Equal
    /// scores keep catalog order.
    pub fn rank<'a>(
        &self,
        jobs: &'a [JobRecord],
        prefs: &PreferenceSet,
        limit: usize,
    ) -> Vec<ScoredJob<'a>> {
        if !prefs.hours_range.is_ordered() || !prefs.pay_range.is_ordered() {
            tracing::warn!(?prefs, "preference range has min above max");
        }
        let mut scored: Vec<ScoredJob<'a>> = jobs
            .iter()
            .map(|job| ScoredJob {
                score: self.score(job, prefs),
                job,
            })
            .collect();
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(limit);
        tracing::debug!(catalog = jobs.len(), returned = scored.len(), "ranked catalog");
        scored
    }
}
