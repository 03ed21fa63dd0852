use std::io::Cursor;
use std::path::{Path, PathBuf};

use job_finder::export::export_ranking;
use job_finder::harvest::harvest_dir;
use job_finder::session::{RecommendationSession, SessionOptions};
use job_finder::{
    similar, Catalog, ExperienceLevel, Interval, JobRecord, JobType, MatchMode, PreferenceSet,
    ScoreCalculator, Weights,
};

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/catalog.json")
}

fn fixture() -> Catalog {
    Catalog::load(&fixture_path()).unwrap()
}

fn research_prefs() -> PreferenceSet {
    PreferenceSet::new(
        Interval::new(9, 15),
        Interval::new(16.0, 17.0),
        JobType::Research,
        ExperienceLevel::Beginner,
    )
    .with_department_keywords(["neuroscience"])
}

fn by_index(catalog: &Catalog, index: u64) -> &JobRecord {
    catalog.jobs.iter().find(|j| j.index == Some(index)).unwrap()
}

#[test]
fn test_fixture_loads_every_record() {
    let catalog = fixture();
    assert_eq!(catalog.jobs.len(), 7);
    assert_eq!(by_index(&catalog, 6).title(), None);
}

#[test]
fn test_well_matched_job_scores_one_hundred() {
    let catalog = fixture();
    let calculator = ScoreCalculator::default();
    let score = calculator.score(by_index(&catalog, 1), &research_prefs());
    assert!((score - 100.0).abs() < 1e-9, "got {score}");
}

#[test]
fn test_empty_record_scores_fallback_credit() {
    let catalog = fixture();
    let calculator = ScoreCalculator::default();
    // hours 12.5, pay 10, type 6, department miss 4.5, beginner neutral 7
    let score = calculator.score(by_index(&catalog, 6), &research_prefs());
    assert!((score - 40.0).abs() < 1e-9, "got {score}");
}

#[test]
fn test_ranking_is_descending_and_led_by_best_match() {
    let catalog = fixture();
    let calculator = ScoreCalculator::default();
    let ranking = calculator.rank(&catalog.jobs, &research_prefs(), 10);
    assert_eq!(ranking.len(), catalog.jobs.len());
    assert_eq!(ranking[0].job.index, Some(1));
    assert!(ranking.windows(2).all(|w| w[0].score >= w[1].score));
    assert!(ranking.iter().all(|s| (0.0..=100.0).contains(&s.score)));
}

#[test]
fn test_ranking_is_repeatable() {
    let catalog = fixture();
    let calculator = ScoreCalculator::default();
    let prefs = PreferenceSet::default();
    let first: Vec<_> = calculator
        .rank(&catalog.jobs, &prefs, 10)
        .iter()
        .map(|s| s.job.index)
        .collect();
    let second: Vec<_> = calculator
        .rank(&catalog.jobs, &prefs, 10)
        .iter()
        .map(|s| s.job.index)
        .collect();
    assert_eq!(first, second);
}

#[test]
fn test_technical_preference_pins_it_substring_match() {
    let catalog = fixture();
    let prefs = PreferenceSet::new(
        Interval::new(9, 15),
        Interval::new(17.0, 25.0),
        JobType::Technical,
        ExperienceLevel::Intermediate,
    );
    let substring = ScoreCalculator::default();
    let whole_word = ScoreCalculator::new(Weights::default(), MatchMode::WholeWord);
    let job = by_index(&catalog, 3);
    // "it" is a whole word in this title, so both modes agree here.
    assert_eq!(substring.score(job, &prefs), whole_word.score(job, &prefs));
    // 25 + 20 + 12 + 10.5 + 8
    assert!((substring.score(job, &prefs) - 75.5).abs() < 1e-9);
}

#[test]
fn test_similar_jobs_for_lab_assistant() {
    let catalog = fixture();
    let reference = by_index(&catalog, 1);
    let found = similar(reference, &catalog.jobs, 5);
    let indexes: Vec<_> = found.iter().map(|j| j.index).collect();
    // #2: department 40 + two shared words 20 + one hour apart 20
    // #3: one shared word 10 + two hours apart 20
    // #7: two shared words only, not above the cut-off
    assert_eq!(indexes, vec![Some(2), Some(3)]);
    assert!(found.iter().all(|j| *j != reference));
}

#[test]
fn test_similar_honors_top_n() {
    let catalog = fixture();
    let found = similar(by_index(&catalog, 1), &catalog.jobs, 1);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].index, Some(2));
}

#[test]
fn test_empty_inputs_give_empty_results() {
    let calculator = ScoreCalculator::default();
    assert!(calculator.rank(&[], &PreferenceSet::default(), 10).is_empty());
    let only = vec![JobRecord::default()];
    assert!(similar(&only[0], &only, 5).is_empty());
}

#[test]
fn test_export_writes_one_row_per_result() {
    let catalog = fixture();
    let calculator = ScoreCalculator::default();
    let ranking = calculator.rank(&catalog.jobs, &research_prefs(), 3);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ranking.csv");
    export_ranking(&path, &ranking).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 4);
    assert!(text.lines().nth(1).unwrap().starts_with("1,100.0,Research Lab Assistant,"));
}

#[test]
fn test_harvest_directory_into_catalog() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("a_posting.html"),
        "<html><body><main><p>Job Posting Title:</p><p>Peer Tutor</p>\
         <p>Department:</p><p>Mathematics</p>\
         <p>Scheduled Weekly Hours:</p><p>6</p></main></body></html>",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("b_posting.txt"),
        "Job Posting Title:\nWriting Fellow\nHourly Rate:\n$16.25\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("c_blank.html"), "<html><body></body></html>").unwrap();
    std::fs::write(dir.path().join("notes.md"), "ignored").unwrap();

    let catalog = harvest_dir(dir.path()).unwrap();
    assert_eq!(catalog.jobs.len(), 2);
    assert_eq!(catalog.jobs[0].index, Some(1));
    assert_eq!(catalog.jobs[0].title(), Some("Peer Tutor"));
    assert_eq!(catalog.jobs[0].weekly_hours(), Some("6"));
    assert_eq!(catalog.jobs[1].index, Some(2));
    assert_eq!(catalog.jobs[1].pay_text(), Some("$16.25"));
    assert!(catalog.jobs[1].scraped_at.is_some());

    let out = dir.path().join("catalog.json");
    catalog.save(&out).unwrap();
    let reloaded = Catalog::load(&out).unwrap();
    assert_eq!(reloaded.jobs, catalog.jobs);
}

#[test]
fn test_harvest_empty_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(harvest_dir(dir.path()).is_err());
}

#[test]
fn test_session_over_fixture() {
    let catalog = fixture();
    let calculator = ScoreCalculator::default();
    let mut out = Vec::new();
    // hours b, pay b, research, neuroscience, beginner; then similar to #1 and exit
    let input = Cursor::new("b\nb\na\na\na\n2 1\n4\n");
    let mut session = RecommendationSession::new(
        &catalog.jobs,
        &calculator,
        SessionOptions::default(),
        input,
        &mut out,
    );
    session.run().unwrap();
    drop(session);
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("#1 - Research Lab Assistant (Match: 100%)"));
    assert!(text.contains("Finding jobs similar to: Research Lab Assistant"));
    assert!(text.contains("1. Lab Assistant"));
}
