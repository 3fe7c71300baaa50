use std::sync::LazyLock;

use gist_fetcher::CONTENT_PLACEHOLDER;
use gist_sampler::Round;
use regex::Regex;

use crate::game::{Game, Outcome};

const PANEL_LINES: usize = 40;
const PANEL_WIDTH: usize = 100;

static C_STYLE_COMMENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)/\*[\s\S]*?\*/|//.*").expect("comment pattern is valid"));

/// Remove `/* ... */` and `// ...` comments, which often name the language outright.
pub fn strip_comments(content: &str) -> String {
    C_STYLE_COMMENTS.replace_all(content, "").into_owned()
}

/// The text to put in the code panel. A snippet that is nothing but comments shows the
/// placeholder rather than an empty frame.
pub fn display_content(content: &str, keep_comments: bool) -> String {
    if keep_comments || content == CONTENT_PLACEHOLDER {
        return content.to_string();
    }
    let stripped = strip_comments(content);
    if stripped.trim().is_empty() {
        CONTENT_PLACEHOLDER.to_string()
    } else {
        stripped
    }
}

/// Frame the snippet, cutting it down to a size that fits a terminal.
pub fn code_panel(content: &str) -> String {
    let lines: Vec<&str> = content.trim_matches('\n').lines().collect();
    let shown = &lines[..lines.len().min(PANEL_LINES)];
    let mut rows: Vec<String> = shown
        .iter()
        .map(|line| line.chars().take(PANEL_WIDTH).collect())
        .collect();
    if lines.len() > shown.len() {
        rows.push(format!("… {} more lines", lines.len() - shown.len()));
    }

    let width = rows
        .iter()
        .map(|row| row.chars().count())
        .max()
        .unwrap_or(0);

    let mut panel = format!("┌{}┐\n", "─".repeat(width + 2));
    for row in &rows {
        let padding = width - row.chars().count();
        panel.push_str(&format!("│ {row}{} │\n", " ".repeat(padding)));
    }
    panel.push_str(&format!("└{}┘", "─".repeat(width + 2)));
    panel
}

pub fn buttons(round: &Round) -> String {
    round
        .answers
        .iter()
        .enumerate()
        .map(|(i, language)| format!("[{}] {language}", i + 1))
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn status_line(game: &Game, round_seconds: u64) -> String {
    format!(
        "Score: {}  Lives: {}  Streak: {}  ({round_seconds}s per round)",
        game.score, game.lives, game.streak
    )
}

pub fn outcome_line(outcome: &Outcome, round: &Round) -> String {
    let button = round.correct_index() + 1;
    match outcome {
        Outcome::Correct { points: 1 } => "✓ Correct!".to_string(),
        Outcome::Correct { points } => format!("✓ Correct! +{points} (streak bonus)"),
        Outcome::Wrong { expected } => format!("✗ Wrong, it was [{button}] {expected}."),
        Outcome::TimedOut { expected } => format!("⏱ Time's up, it was [{button}] {expected}."),
        Outcome::Stale => "Round expired.".to_string(),
    }
}

pub fn summary(game: &Game) -> String {
    format!(
        "Game over! Final score: {} over {} rounds (best streak: {}).",
        game.score, game.rounds_played, game.best_streak
    )
}
