use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Inclusive interval. `min <= max` is expected but not enforced; scoring
/// stays finite when it is violated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> Interval<T> {
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobType {
    Research,
    Teaching,
    Administrative,
    Technical,
    Creative,
    Any,
}

impl JobType {
    pub const ALL: [JobType; 6] = [
        JobType::Research,
        JobType::Teaching,
        JobType::Administrative,
        JobType::Technical,
        JobType::Creative,
        JobType::Any,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::Research => "research",
            JobType::Teaching => "teaching",
            JobType::Administrative => "administrative",
            JobType::Technical => "technical",
            JobType::Creative => "creative",
            JobType::Any => "any",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        JobType::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| format!("unknown job type '{s}'"))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Beginner,
    #[default]
    Intermediate,
    Experienced,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => "beginner",
            ExperienceLevel::Intermediate => "intermediate",
            ExperienceLevel::Experienced => "experienced",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExperienceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(ExperienceLevel::Beginner),
            "intermediate" => Ok(ExperienceLevel::Intermediate),
            "experienced" => Ok(ExperienceLevel::Experienced),
            other => Err(format!("unknown experience level '{other}'")),
        }
    }
}

/// One user's constraints for one ranking pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceSet {
    pub hours_range: Interval<i64>,
    pub pay_range: Interval<f64>,
    pub job_type: JobType,
    department_keywords: Vec<String>,
    pub experience_level: ExperienceLevel,
}

impl Default for PreferenceSet {
    /// The "I'm flexible" answer to every question.
    fn default() -> Self {
        Self {
            hours_range: Interval::new(0, 40),
            pay_range: Interval::new(0.0, 25.0),
            job_type: JobType::Any,
            department_keywords: Vec::new(),
            experience_level: ExperienceLevel::Intermediate,
        }
    }
}

impl PreferenceSet {
    pub fn new(
        hours_range: Interval<i64>,
        pay_range: Interval<f64>,
        job_type: JobType,
        experience_level: ExperienceLevel,
    ) -> Self {
        Self {
            hours_range,
            pay_range,
            job_type,
            department_keywords: Vec::new(),
            experience_level,
        }
    }

    /// Replaces the department keywords. Keywords are lowercased and
    /// de-duplicated; blank ones are dropped.
    pub fn with_department_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cleaned: Vec<String> = Vec::new();
        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if !keyword.is_empty() && !cleaned.contains(&keyword) {
                cleaned.push(keyword);
            }
        }
        self.department_keywords = cleaned;
        self
    }

    pub fn department_keywords(&self) -> &[String] {
        &self.department_keywords
    }
}
