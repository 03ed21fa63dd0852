//! Interactive recommendation loop.
//!
//! The session owns no scoring logic: it collects preferences, asks the
//! `ScoreCalculator` for a ranking, shows a page of it and hands a chosen
//! result to the similarity ranker.

use std::io::{self, BufRead, Write};

use crate::display::{render_recommendations, render_similar};
use crate::job::JobRecord;
use crate::preferences::PreferenceSet;
use crate::prompts::{ask_preferences, read_answer};
use crate::scoring::{ScoreCalculator, ScoredJob};
use crate::similarity::{similar, DEFAULT_SIMILAR_COUNT};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// "See more" reaches the second page (ranks 11-20 by default) and no further.
pub const MAX_PAGES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    CollectingPreferences,
    ShowingResults,
    ShowingSimilar { rank: usize },
    AdjustingPreferences,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ShowMore,
    FindSimilar(Option<usize>),
    Adjust,
    Exit,
    Invalid,
}

impl MenuChoice {
    /// Parses one menu answer. "2" may carry the job number on the same line
    /// ("2 7"); without it the session asks for one.
    pub fn parse(answer: &str) -> Self {
        let mut parts = answer.split_whitespace();
        let command = parts.next().unwrap_or_default();
        let argument = parts.next();
        if parts.next().is_some() {
            return MenuChoice::Invalid;
        }
        match (command, argument) {
            ("1" | "more", None) => MenuChoice::ShowMore,
            ("2" | "similar", None) => MenuChoice::FindSimilar(None),
            ("2" | "similar", Some(n)) => match n.trim_start_matches('#').parse() {
                Ok(rank) => MenuChoice::FindSimilar(Some(rank)),
                Err(_) => MenuChoice::Invalid,
            },
            ("3" | "adjust", None) => MenuChoice::Adjust,
            ("4" | "exit" | "quit" | "q", None) => MenuChoice::Exit,
            _ => MenuChoice::Invalid,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub page_size: usize,
    pub similar_count: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            similar_count: DEFAULT_SIMILAR_COUNT,
        }
    }
}

pub struct RecommendationSession<'c, R, W> {
    catalog: &'c [JobRecord],
    calculator: &'c ScoreCalculator,
    options: SessionOptions,
    input: R,
    out: W,
    state: SessionState,
    prefs: Option<PreferenceSet>,
    pages_shown: usize,
    first_displayed_rank: usize,
    displayed: Vec<ScoredJob<'c>>,
}

impl<'c, R: BufRead, W: Write> RecommendationSession<'c, R, W> {
    pub fn new(
        catalog: &'c [JobRecord],
        calculator: &'c ScoreCalculator,
        options: SessionOptions,
        input: R,
        out: W,
    ) -> Self {
        Self {
            catalog,
            calculator,
            options: SessionOptions {
                page_size: options.page_size.max(1),
                similar_count: options.similar_count,
            },
            input,
            out,
            state: SessionState::CollectingPreferences,
            prefs: None,
            pages_shown: 0,
            first_displayed_rank: 1,
            displayed: Vec::new(),
        }
    }

    /// Starts from an already known preference set instead of asking.
    pub fn with_preferences(mut self, prefs: PreferenceSet) -> Self {
        self.prefs = Some(prefs);
        self.state = SessionState::ShowingResults;
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Drives the session until the user exits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        tracing::info!(jobs = self.catalog.len(), "recommendation session started");
        if self.state == SessionState::ShowingResults {
            self.show_first_page()?;
        }
        while self.state != SessionState::Exit {
            self.state = self.step()?;
            tracing::debug!(state = ?self.state, "session transition");
        }
        writeln!(self.out, "\nGood luck with your job search!")?;
        self.out.flush()
    }

    fn step(&mut self) -> io::Result<SessionState> {
        match self.state {
            SessionState::CollectingPreferences => {
                match ask_preferences(&mut self.input, &mut self.out)? {
                    Some(prefs) => {
                        self.prefs = Some(prefs);
                        self.show_first_page()?;
                        Ok(SessionState::ShowingResults)
                    }
                    None => Ok(SessionState::Exit),
                }
            }
            SessionState::ShowingResults => self.menu(),
            SessionState::ShowingSimilar { rank } => {
                self.show_similar(rank)?;
                Ok(SessionState::ShowingResults)
            }
            SessionState::AdjustingPreferences => {
                writeln!(self.out, "\nLet's update your preferences.\n")?;
                self.prefs = None;
                Ok(SessionState::CollectingPreferences)
            }
            SessionState::Exit => Ok(SessionState::Exit),
        }
    }

    fn menu(&mut self) -> io::Result<SessionState> {
        writeln!(self.out, "\nOPTIONS:")?;
        writeln!(self.out, "1. See more recommendations")?;
        writeln!(self.out, "2. Find jobs similar to one above (2 <job number>)")?;
        writeln!(self.out, "3. Adjust preferences")?;
        writeln!(self.out, "4. Exit")?;
        write!(self.out, "\nWhat would you like to do? ")?;
        self.out.flush()?;

        let Some(answer) = read_answer(&mut self.input)? else {
            return Ok(SessionState::Exit);
        };
        match MenuChoice::parse(&answer) {
            MenuChoice::ShowMore => {
                self.show_next_page()?;
                Ok(SessionState::ShowingResults)
            }
            MenuChoice::FindSimilar(Some(rank)) => self.select(rank),
            MenuChoice::FindSimilar(None) => {
                write!(self.out, "Job number: ")?;
                self.out.flush()?;
                let Some(answer) = read_answer(&mut self.input)? else {
                    return Ok(SessionState::Exit);
                };
                match answer.trim_start_matches('#').parse() {
                    Ok(rank) => self.select(rank),
                    Err(_) => {
                        writeln!(self.out, "Invalid job number.")?;
                        Ok(SessionState::ShowingResults)
                    }
                }
            }
            MenuChoice::Adjust => Ok(SessionState::AdjustingPreferences),
            MenuChoice::Exit => Ok(SessionState::Exit),
            MenuChoice::Invalid => {
                writeln!(self.out, "Invalid choice. Please try again.")?;
                Ok(SessionState::ShowingResults)
            }
        }
    }

    fn select(&mut self, rank: usize) -> io::Result<SessionState> {
        if self.displayed_at(rank).is_some() {
            Ok(SessionState::ShowingSimilar { rank })
        } else {
            writeln!(self.out, "Invalid job number.")?;
            Ok(SessionState::ShowingResults)
        }
    }

    /// The displayed result carrying rank `rank`, if it is on screen.
    fn displayed_at(&self, rank: usize) -> Option<&ScoredJob<'c>> {
        let offset = rank.checked_sub(self.first_displayed_rank)?;
        self.displayed.get(offset)
    }

    fn ranking(&self, limit: usize) -> Vec<ScoredJob<'c>> {
        match &self.prefs {
            Some(prefs) => self.calculator.rank(self.catalog, prefs, limit),
            None => Vec::new(),
        }
    }

    fn show_first_page(&mut self) -> io::Result<()> {
        self.pages_shown = 0;
        self.displayed.clear();
        if self.catalog.is_empty() {
            writeln!(self.out, "\nThere are no job postings in the catalog.")?;
            return Ok(());
        }
        self.show_next_page()
    }

    fn show_next_page(&mut self) -> io::Result<()> {
        let page_size = self.options.page_size;
        let start = self.pages_shown * page_size;
        if self.pages_shown >= MAX_PAGES {
            writeln!(self.out, "\nNo more recommendations.")?;
            return Ok(());
        }
        let ranked = self.ranking(start + page_size);
        if ranked.len() <= start {
            writeln!(self.out, "\nNo more recommendations.")?;
            return Ok(());
        }
        self.pages_shown += 1;
        self.first_displayed_rank = start + 1;
        self.displayed = ranked[start..].to_vec();
        render_recommendations(&mut self.out, &self.displayed, self.first_displayed_rank)
    }

    fn show_similar(&mut self, rank: usize) -> io::Result<()> {
        let Some(reference) = self.displayed_at(rank).map(|s| s.job) else {
            return Ok(());
        };
        let found = similar(reference, self.catalog, self.options.similar_count);
        render_similar(&mut self.out, reference, &found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::{ExperienceLevel, Interval, JobType};
    use std::io::Cursor;

    #[test]
    fn test_menu_parsing() {
        assert_eq!(MenuChoice::parse("1"), MenuChoice::ShowMore);
        assert_eq!(MenuChoice::parse("2"), MenuChoice::FindSimilar(None));
        assert_eq!(MenuChoice::parse("2 7"), MenuChoice::FindSimilar(Some(7)));
        assert_eq!(MenuChoice::parse("similar #3"), MenuChoice::FindSimilar(Some(3)));
        assert_eq!(MenuChoice::parse("3"), MenuChoice::Adjust);
        assert_eq!(MenuChoice::parse("4"), MenuChoice::Exit);
        assert_eq!(MenuChoice::parse("2 x"), MenuChoice::Invalid);
        assert_eq!(MenuChoice::parse("1 2 3"), MenuChoice::Invalid);
        assert_eq!(MenuChoice::parse(""), MenuChoice::Invalid);
    }

    fn catalog(n: usize) -> Vec<JobRecord> {
        (0..n)
            .map(|i| JobRecord {
                index: Some(i as u64),
                job_title: Some(format!("Job{i} Assistant")),
                department: Some("Library".to_string()),
                scheduled_weekly_hours: Some((i % 20).to_string()),
                ..Default::default()
            })
            .collect()
    }

    fn prefs() -> PreferenceSet {
        PreferenceSet::new(
            Interval::new(0, 40),
            Interval::new(0.0, 25.0),
            JobType::Any,
            ExperienceLevel::Intermediate,
        )
    }

    fn run(jobs: &[JobRecord], input: &str) -> String {
        let calculator = ScoreCalculator::default();
        let mut out = Vec::new();
        let mut session = RecommendationSession::new(
            jobs,
            &calculator,
            SessionOptions::default(),
            Cursor::new(input.to_string()),
            &mut out,
        )
        .with_preferences(prefs());
        session.run().unwrap();
        assert_eq!(session.state(), SessionState::Exit);
        drop(session);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_show_more_displays_ranks_eleven_to_twenty() {
        let text = run(&catalog(25), "1\n4\n");
        assert!(text.contains("YOUR TOP 10 JOB RECOMMENDATIONS"));
        assert!(text.contains("RECOMMENDATIONS #11-#20"));
        assert!(text.contains("#20 - "));
        assert!(!text.contains("#21 - "));
    }

    #[test]
    fn test_show_more_stops_after_rank_twenty() {
        let text = run(&catalog(35), "1\n1\n2 15\n4\n");
        assert_eq!(text.matches("RECOMMENDATIONS #11-#20").count(), 1);
        assert!(!text.contains("#21 - "));
        assert!(text.contains("No more recommendations."));
        assert!(text.contains("Finding jobs similar to: Job"));
    }

    #[test]
    fn test_show_more_past_the_end() {
        let text = run(&catalog(5), "1\n4\n");
        assert!(text.contains("No more recommendations."));
    }

    #[test]
    fn test_pick_refers_to_displayed_rank() {
        let text = run(&catalog(25), "2 3\n1\n2 3\n2 12\n4\n");
        assert_eq!(text.matches("Finding jobs similar to").count(), 2);
        assert_eq!(text.matches("Invalid job number.").count(), 1);
        assert!(text.contains("SIMILAR JOBS:"));
    }

    #[test]
    fn test_pick_with_prompted_number() {
        let text = run(&catalog(3), "2\n1\n4\n");
        assert!(text.contains("Job number: "));
        assert!(text.contains("Finding jobs similar to"));
    }

    #[test]
    fn test_adjust_then_end_of_input_exits() {
        let text = run(&catalog(3), "3\nb\n");
        assert!(text.contains("Let's update your preferences."));
        assert!(text.contains("Good luck with your job search!"));
    }

    #[test]
    fn test_invalid_choice_keeps_menu() {
        let text = run(&catalog(3), "9\n4\n");
        assert!(text.contains("Invalid choice. Please try again."));
    }

    #[test]
    fn test_empty_catalog_is_reported() {
        let text = run(&[], "2 1\n4\n");
        assert!(text.contains("There are no job postings in the catalog."));
        assert!(text.contains("Invalid job number."));
    }

    #[test]
    fn test_full_flow_from_questionnaire() {
        let jobs = catalog(4);
        let calculator = ScoreCalculator::default();
        let mut out = Vec::new();
        let mut session = RecommendationSession::new(
            &jobs,
            &calculator,
            SessionOptions::default(),
            Cursor::new("d\nd\nf\nx\nb\n4\n"),
            &mut out,
        );
        session.run().unwrap();
        drop(session);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("YOUR TOP 4 JOB RECOMMENDATIONS"));
    }
}
