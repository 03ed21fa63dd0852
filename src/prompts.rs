//! The questionnaire. Menu letters live here and nowhere else; the engine only
//! ever sees the resulting `PreferenceSet`.

use std::io::{self, BufRead, Write};

use crate::preferences::{ExperienceLevel, Interval, JobType, PreferenceSet};

pub struct InterestArea {
    pub letter: char,
    pub label: &'static str,
    pub keywords: &'static [&'static str],
}

const fn area(
    letter: char,
    label: &'static str,
    keywords: &'static [&'static str],
) -> InterestArea {
    InterestArea {
        letter,
        label,
        keywords,
    }
}

pub const INTEREST_GROUPS: &[(&str, &[InterestArea])] = &[
    (
        "STEM & Sciences",
        &[
            area('a', "Biology/Life Sciences", &["biology", "life sciences", "neuroscience"]),
            area('b', "Chemistry", &["chemistry", "chemical"]),
            area('c', "Physics/Astronomy", &["physics", "astronomy"]),
            area('d', "Computer Science", &["computer science", "computational"]),
            area('e', "Engineering", &["engineering", "applied"]),
            area('f', "Math/Statistics", &["mathematics", "statistics"]),
            area('g', "Earth/Environmental", &["earth", "environmental", "planetary"]),
            area('h', "Medicine/Health", &["medicine", "health", "medical"]),
        ],
    ),
    (
        "Social Sciences & Humanities",
        &[
            area('i', "Psychology", &["psychology", "cognitive"]),
            area('j', "History", &["history", "historical"]),
            area('k', "English/Literature", &["english", "literature", "writing"]),
            area('l', "Philosophy/Religion", &["philosophy", "religious"]),
            area('m', "Sociology/Anthro", &["sociology", "anthropology"]),
            area('n', "Political Science", &["political science", "international"]),
            area('o', "Economics/Business", &["economics", "business"]),
            area('p', "Art/Visual Arts", &["art", "visual arts", "studio"]),
            area('q', "Music/Theatre", &["music", "theatre", "performing"]),
        ],
    ),
    (
        "Professional & Applied",
        &[
            area('r', "Education/Teaching", &["education", "teaching"]),
            area('s', "Public Health", &["public health", "community"]),
            area('t', "Library/Info", &["library", "information"]),
            area('u', "Athletics/Recreation", &["athletics", "sports", "recreation"]),
            area('v', "Administration", &["administration", "student services"]),
            area('w', "Research Centers", &["research", "institute", "center"]),
        ],
    ),
];

/// Letter that means "no department preference".
pub const OPEN_TO_ANYTHING: char = 'x';

pub fn hours_for(choice: &str) -> Interval<i64> {
    match choice {
        "a" => Interval::new(1, 8),
        "b" => Interval::new(9, 15),
        "c" => Interval::new(16, 40),
        _ => Interval::new(0, 40),
    }
}

pub fn pay_for(choice: &str) -> Interval<f64> {
    match choice {
        "a" => Interval::new(15.0, 16.0),
        "b" => Interval::new(16.0, 17.0),
        "c" => Interval::new(17.0, 25.0),
        _ => Interval::new(0.0, 25.0),
    }
}

pub fn job_type_for(choice: &str) -> JobType {
    match choice {
        "a" => JobType::Research,
        "b" => JobType::Teaching,
        "c" => JobType::Administrative,
        "d" => JobType::Technical,
        "e" => JobType::Creative,
        _ => JobType::Any,
    }
}

pub fn experience_for(choice: &str) -> ExperienceLevel {
    match choice {
        "a" => ExperienceLevel::Beginner,
        "c" => ExperienceLevel::Experienced,
        _ => ExperienceLevel::Intermediate,
    }
}

/// Department keywords for a comma-separated letter list such as "a,d,i".
/// Any selection containing the open-to-anything letter means no preference.
pub fn interests_for(choice: &str) -> Vec<&'static str> {
    if choice.contains(OPEN_TO_ANYTHING) {
        return Vec::new();
    }
    let selected: Vec<&str> = choice
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    INTEREST_GROUPS
        .iter()
        .flat_map(|(_, areas)| areas.iter())
        .filter(|area| selected.iter().any(|s| s.chars().eq([area.letter])))
        .flat_map(|area| area.keywords.iter().copied())
        .collect()
}

/// Reads one trimmed, lowercased line. `None` at end of input.
pub fn read_answer<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_lowercase()))
}

fn ask<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> io::Result<Option<String>> {
    write!(out, "\n{prompt}")?;
    out.flush()?;
    read_answer(input)
}

/// Runs the five-question questionnaire. Unrecognized answers fall back to
/// the most permissive option. Returns `None` if input ends early.
pub fn ask_preferences<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> io::Result<Option<PreferenceSet>> {
    writeln!(out, "BROWN JOB FINDER - Let's find your perfect job!")?;
    writeln!(out, "{}", "=".repeat(55))?;
    writeln!(out, "Answer a few quick questions to get personalized recommendations:")?;

    writeln!(out, "\n1. How many hours per week do you want to work?")?;
    writeln!(out, "   a) Light commitment (1-8 hours)")?;
    writeln!(out, "   b) Moderate commitment (9-15 hours)")?;
    writeln!(out, "   c) Heavy commitment (16+ hours)")?;
    writeln!(out, "   d) I'm flexible")?;
    let Some(hours) = ask(input, out, "Your choice (a/b/c/d): ")? else {
        return Ok(None);
    };

    writeln!(out, "\n2. What's your preferred hourly pay range?")?;
    writeln!(out, "   a) Budget-friendly ($15-16/hr)")?;
    writeln!(out, "   b) Fair wage ($16-17/hr)")?;
    writeln!(out, "   c) Premium pay ($17+/hr)")?;
    writeln!(out, "   d) Pay doesn't matter")?;
    let Some(pay) = ask(input, out, "Your choice (a/b/c/d): ")? else {
        return Ok(None);
    };

    writeln!(out, "\n3. What type of work interests you most?")?;
    writeln!(out, "   a) Research (labs, data analysis, experiments)")?;
    writeln!(out, "   b) Teaching/Tutoring (helping other students)")?;
    writeln!(out, "   c) Administrative (office work, organization)")?;
    writeln!(out, "   d) Technical/IT (computers, web, software)")?;
    writeln!(out, "   e) Creative/Library (writing, media, books)")?;
    writeln!(out, "   f) I'm open to anything")?;
    let Some(work_type) = ask(input, out, "Your choice (a/b/c/d/e/f): ")? else {
        return Ok(None);
    };

    writeln!(out, "\n4. What academic areas interest you? (Select multiple)")?;
    for (group, areas) in INTEREST_GROUPS {
        writeln!(out, "\n   {group}:")?;
        for row in areas.chunks(3) {
            let cells: Vec<String> = row
                .iter()
                .map(|a| format!("{}) {:<24}", a.letter, a.label))
                .collect();
            writeln!(out, "      {}", cells.join("").trim_end())?;
        }
    }
    writeln!(out, "\n   {OPEN_TO_ANYTHING}) I'm open to anything")?;
    let Some(interests) = ask(input, out, "Enter letters for your interests (e.g., 'a,d,i'): ")?
    else {
        return Ok(None);
    };

    writeln!(out, "\n5. What's your experience level?")?;
    writeln!(out, "   a) Beginner (new to work/research)")?;
    writeln!(out, "   b) Some experience (done similar work before)")?;
    writeln!(out, "   c) Experienced (confident in my abilities)")?;
    let Some(experience) = ask(input, out, "Your choice (a/b/c): ")? else {
        return Ok(None);
    };

    let prefs = PreferenceSet::new(
        hours_for(&hours),
        pay_for(&pay),
        job_type_for(&work_type),
        experience_for(&experience),
    )
    .with_department_keywords(interests_for(&interests));
    tracing::debug!(?prefs, "preferences collected");
    Ok(Some(prefs))
}
