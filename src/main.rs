use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use job_finder::config::Config;
use job_finder::display::{render_recommendations, render_similar};
use job_finder::export::export_ranking;
use job_finder::harvest::harvest_dir;
use job_finder::session::{RecommendationSession, SessionOptions};
use job_finder::{
    dashboard, similar, Catalog, ExperienceLevel, Interval, JobType, MatchMode, PreferenceSet,
    ScoreCalculator, Weights,
};

/// Find student jobs that match your preferences
#[derive(Parser, Debug)]
#[command(name = "job-finder", version)]
#[command(about = "Rank job postings against your preferences and find similar ones", long_about = None)]
struct Cli {
    /// Catalog file ({"jobs": [...]} or a bare array)
    #[arg(short, long, global = true)]
    catalog: Option<PathBuf>,

    /// JSON file overriding the criterion weights
    #[arg(long, global = true)]
    weights: Option<PathBuf>,

    /// Keyword matching: substring or whole-word
    #[arg(long, global = true)]
    match_mode: Option<MatchMode>,

    /// Log level (overrides RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Answer the questionnaire and browse recommendations (default)
    Interactive {
        /// Recommendations per page
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// Print the best matches for preferences given as flags
    Rank {
        #[command(flatten)]
        prefs: PreferenceArgs,
        /// Number of results
        #[arg(short = 'n', long, default_value_t = 10)]
        top: usize,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
        /// Also write the ranking to a CSV file
        #[arg(long)]
        export: Option<PathBuf>,
        /// Show the per-criterion breakdown of each score
        #[arg(long)]
        explain: bool,
    },
    /// List jobs similar to the job at a catalog position (1-based)
    Similar {
        position: usize,
        /// Number of similar jobs
        #[arg(short = 'n', long)]
        top: Option<usize>,
    },
    /// Browse a ranking in a full-screen terminal view
    Browse {
        #[command(flatten)]
        prefs: PreferenceArgs,
        /// Number of results
        #[arg(short = 'n', long, default_value_t = 50)]
        top: usize,
    },
    /// Build a catalog from saved job pages (.html, .htm, .txt)
    Harvest {
        /// Directory holding the saved pages
        dir: PathBuf,
        /// Where to write the catalog
        #[arg(short, long, default_value = job_finder::config::DEFAULT_CATALOG)]
        output: PathBuf,
    },
}

#[derive(Args, Debug)]
struct PreferenceArgs {
    #[arg(long, default_value_t = 0)]
    hours_min: i64,
    #[arg(long, default_value_t = 40)]
    hours_max: i64,
    #[arg(long, default_value_t = 0.0)]
    pay_min: f64,
    #[arg(long, default_value_t = 25.0)]
    pay_max: f64,
    /// research, teaching, administrative, technical, creative or any
    #[arg(long, default_value = "any")]
    job_type: JobType,
    /// Comma-separated department keywords
    #[arg(long, value_delimiter = ',')]
    departments: Vec<String>,
    /// beginner, intermediate or experienced
    #[arg(long, default_value = "intermediate")]
    experience: ExperienceLevel,
}

impl PreferenceArgs {
    fn to_preferences(&self) -> Result<PreferenceSet> {
        anyhow::ensure!(
            self.hours_min <= self.hours_max,
            "--hours-min must not exceed --hours-max"
        );
        anyhow::ensure!(
            self.pay_min <= self.pay_max,
            "--pay-min must not exceed --pay-max"
        );
        Ok(PreferenceSet::new(
            Interval::new(self.hours_min, self.hours_max),
            Interval::new(self.pay_min, self.pay_max),
            self.job_type,
            self.experience,
        )
        .with_department_keywords(&self.departments))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(path) = &cli.catalog {
        config.catalog_path = path.clone();
    }
    if let Some(mode) = cli.match_mode {
        config.match_mode = mode;
    }
    if let Some(level) = &cli.log_level {
        config.rust_log = level.clone();
    }

    // Logs go to stderr so they never interleave with menus on stdout
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.rust_log).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    info!("Starting job-finder v{}", env!("CARGO_PKG_VERSION"));

    match cli.command.unwrap_or(Command::Interactive { page_size: None }) {
        Command::Harvest { dir, output } => {
            let catalog = harvest_dir(&dir)?;
            catalog.save(&output)?;
            println!("Harvested {} jobs into {}", catalog.jobs.len(), output.display());
            Ok(())
        }
        Command::Interactive { page_size } => {
            let catalog = load_catalog(&config.catalog_path)?;
            let calculator = build_calculator(cli.weights.as_deref(), config.match_mode)?;
            let options = SessionOptions {
                page_size: page_size.unwrap_or(config.page_size),
                similar_count: config.similar_count,
            };
            let stdin = io::stdin();
            let stdout = io::stdout();
            let mut session = RecommendationSession::new(
                &catalog.jobs,
                &calculator,
                options,
                stdin.lock(),
                stdout.lock(),
            );
            session.run()?;
            Ok(())
        }
        Command::Rank {
            prefs,
            top,
            json,
            export,
            explain,
        } => {
            let catalog = load_catalog(&config.catalog_path)?;
            let calculator = build_calculator(cli.weights.as_deref(), config.match_mode)?;
            let prefs = prefs.to_preferences()?;
            let ranking = calculator.rank(&catalog.jobs, &prefs, top);

            let stdout = io::stdout();
            let mut out = stdout.lock();
            if json {
                serde_json::to_writer_pretty(&mut out, &ranking)?;
                writeln!(out)?;
            } else if ranking.is_empty() {
                writeln!(out, "There are no job postings in the catalog.")?;
            } else {
                render_recommendations(&mut out, &ranking, 1)?;
            }
            if explain {
                for (i, scored) in ranking.iter().enumerate() {
                    let breakdown = calculator.breakdown(scored.job, &prefs);
                    let parts: Vec<String> = breakdown
                        .parts
                        .iter()
                        .map(|p| format!("{} {:.1}/{:.0}", p.criterion, p.value, p.weight))
                        .collect();
                    writeln!(out, "#{}: {}", i + 1, parts.join(", "))?;
                }
            }
            if let Some(path) = export {
                export_ranking(&path, &ranking)
                    .with_context(|| format!("failed to export to {}", path.display()))?;
                writeln!(out, "Exported {} rows to {}", ranking.len(), path.display())?;
            }
            Ok(())
        }
        Command::Similar { position, top } => {
            let catalog = load_catalog(&config.catalog_path)?;
            let reference = position
                .checked_sub(1)
                .and_then(|i| catalog.jobs.get(i))
                .with_context(|| {
                    format!(
                        "no job at position {position}; the catalog has {} jobs",
                        catalog.jobs.len()
                    )
                })?;
            let found = similar(reference, &catalog.jobs, top.unwrap_or(config.similar_count));
            render_similar(&mut io::stdout().lock(), reference, &found)?;
            Ok(())
        }
        Command::Browse { prefs, top } => {
            let catalog = load_catalog(&config.catalog_path)?;
            let calculator = build_calculator(cli.weights.as_deref(), config.match_mode)?;
            let prefs = prefs.to_preferences()?;
            let ranking = calculator.rank(&catalog.jobs, &prefs, top);
            dashboard::run_dashboard(&ranking, &catalog.jobs, config.similar_count)?;
            Ok(())
        }
    }
}

fn load_catalog(path: &Path) -> Result<Catalog> {
    Catalog::load(path).with_context(|| {
        format!(
            "could not load the job catalog; make sure {} exists or pass --catalog",
            path.display()
        )
    })
}

fn build_calculator(weights_path: Option<&Path>, mode: MatchMode) -> Result<ScoreCalculator> {
    let weights = match weights_path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read weights file {}", path.display()))?;
            let weights: Weights = serde_json::from_str(&text)
                .with_context(|| format!("invalid weights file {}", path.display()))?;
            if weights.sum() <= 0.0 {
                tracing::warn!("all criterion weights are zero; every job will score 0");
            }
            weights
        }
        None => Weights::default(),
    };
    info!(?weights, ?mode, "score calculator ready");
    Ok(ScoreCalculator::new(weights, mode))
}
