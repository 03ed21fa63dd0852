//! Ranks a catalog of student job postings against a user's preferences and
//! finds postings similar to a chosen one.
//!
//! The scoring and similarity functions are pure and synchronous; everything
//! else in the crate (prompts, rendering, export, harvesting, the terminal
//! browser) is glue around them.

pub mod config;
pub mod dashboard;
pub mod display;
pub mod error;
pub mod export;
pub mod harvest;
pub mod job;
pub mod keywords;
pub mod preferences;
pub mod prompts;
pub mod scoring;
pub mod session;
pub mod similarity;
pub mod utils;

pub use job::{Catalog, JobRecord};
pub use keywords::MatchMode;
pub use preferences::{ExperienceLevel, Interval, JobType, PreferenceSet};
pub use scoring::{ScoreCalculator, ScoredJob, Weights};
pub use similarity::similar;
