use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

use crate::display::preview;
use crate::job::JobRecord;
use crate::scoring::ScoredJob;
use crate::similarity::similar;

/// Index after `current` in a list of `len` rows, wrapping to the top.
pub fn next_row(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match current {
        Some(i) if i + 1 < len => i + 1,
        _ => 0,
    })
}

/// Index before `current`, wrapping to the bottom.
pub fn previous_row(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match current {
        Some(0) | None => len - 1,
        Some(i) => (i - 1).min(len - 1),
    })
}

/// Text for the detail pane: the selected posting followed by its
/// similar jobs.
pub fn detail_lines(job: &JobRecord, similar_jobs: &[&JobRecord]) -> Vec<String> {
    let mut lines = vec![
        job.title().unwrap_or("Unknown Title").to_string(),
        format!(
            "{} | {} hrs/week | {}",
            job.department().unwrap_or("Unknown Department"),
            job.weekly_hours().unwrap_or("?"),
            job.pay_text().unwrap_or("Pay not specified")
        ),
        preview(job.description().unwrap_or_default(), 200),
        job.url.clone().unwrap_or_default(),
        String::new(),
    ];
    if similar_jobs.is_empty() {
        lines.push("No similar jobs found.".to_string());
    } else {
        lines.push("Similar jobs:".to_string());
        for other in similar_jobs {
            lines.push(format!(
                "  - {} ({}, {} hrs/week)",
                other.title().unwrap_or("Unknown"),
                other.department().unwrap_or("Unknown Department"),
                other.weekly_hours().unwrap_or("?")
            ));
        }
    }
    lines
}

/// Full-screen browser over a ranking. Up/Down (or j/k) move, q/Esc quits.
pub fn run_dashboard(
    ranking: &[ScoredJob<'_>],
    catalog: &[JobRecord],
    similar_count: usize,
) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut table_state = TableState::default();
    table_state.select(next_row(None, ranking.len()));

    let result = (|| -> io::Result<()> {
        loop {
            let detail = match table_state.selected().and_then(|i| ranking.get(i)) {
                Some(scored) => detail_lines(
                    scored.job,
                    &similar(scored.job, catalog, similar_count),
                ),
                None => vec!["No job postings to show.".to_string()],
            };
            terminal.draw(|f| ui(f, ranking, &detail, &mut table_state))?;

            if event::poll(Duration::from_millis(250))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Down | KeyCode::Char('j') => {
                            table_state.select(next_row(table_state.selected(), ranking.len()));
                        }
                        KeyCode::Up | KeyCode::Char('k') => {
                            table_state
                                .select(previous_row(table_state.selected(), ranking.len()));
                        }
                        _ => {}
                    }
                }
            }
        }
    })();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    result
}

fn ui(f: &mut Frame, ranking: &[ScoredJob<'_>], detail: &[String], table_state: &mut TableState) {
    let rects = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .margin(1)
        .split(f.size());

    let selected_style = Style::default().add_modifier(Modifier::REVERSED).fg(Color::Yellow);
    let normal_style = Style::default().fg(Color::White);
    let header_cells = ["#", "Match", "Title", "Department", "Hours", "Pay"]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)));
    let header = Row::new(header_cells)
        .style(normal_style)
        .height(1)
        .bottom_margin(1);

    let rows = ranking.iter().enumerate().map(|(i, scored)| {
        let job = scored.job;
        Row::new(vec![
            Cell::from((i + 1).to_string()),
            Cell::from(format!("{:.0}%", scored.score)),
            Cell::from(job.title().unwrap_or("Unknown Title").to_string()),
            Cell::from(job.department().unwrap_or_default().to_string()),
            Cell::from(job.weekly_hours().unwrap_or("?").to_string()),
            Cell::from(job.pay_text().unwrap_or_default().to_string()),
        ])
        .style(normal_style)
    });

    let col_widths = [
        Constraint::Length(4),  // Rank
        Constraint::Length(6),  // Match
        Constraint::Min(28),    // Title
        Constraint::Min(20),    // Department
        Constraint::Length(6),  // Hours
        Constraint::Min(16),    // Pay
    ];

    let table = Table::new(rows, col_widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Recommendations"))
        .highlight_style(selected_style)
        .highlight_symbol(">> ");
    f.render_stateful_widget(table, rects[0], table_state);

    let text: Vec<Line> = detail.iter().map(|l| Line::from(l.as_str())).collect();
    let details = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Details (q to quit)"))
        .wrap(Wrap { trim: true });
    f.render_widget(details, rects[1]);
}
