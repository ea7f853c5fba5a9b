//! Console rendering of the coach state

use coach_domain::{Board, Category, CoachState, Fallacy, Role, Score, Turn};
use colored::Colorize;

/// Empty-column hints, matching the board's three categories.
fn empty_hint(category: Category) -> &'static str {
    match category {
        Category::Pro => "No pro points yet",
        Category::Con => "No con points yet",
        Category::Sources => "No sources yet",
    }
}

/// Formats the coach state for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render the full post-turn view: board, score, fallacies.
    pub fn format_panels(state: &CoachState) -> String {
        let mut output = String::new();
        output.push_str(&Self::format_board(&state.board));
        output.push('\n');
        output.push_str(&Self::format_score(state.score.as_ref()));
        if !state.fallacies.is_empty() {
            output.push('\n');
            output.push_str(&Self::format_fallacies(&state.fallacies));
        }
        output
    }

    /// Render the three argument columns.
    pub fn format_board(board: &Board) -> String {
        let mut output = String::new();
        for category in Category::ALL {
            output.push_str(&format!("{}\n", category.as_str().cyan().bold()));
            let items = board.items(category);
            if items.is_empty() {
                output.push_str(&format!("  {}\n", empty_hint(category).dimmed()));
            } else {
                for item in items {
                    output.push_str(&format!("  • {}\n", item.display_text()));
                }
            }
        }
        output
    }

    /// Render the score line; the score is sticky, so absence means
    /// "none seen yet this session".
    pub fn format_score(score: Option<&Score>) -> String {
        match score {
            Some(score) => {
                let mut line = format!("{} {}", "Score:".yellow().bold(), score.value());
                if let Some(reason) = score.primary_reason() {
                    line.push_str(&format!(" ({reason})"));
                }
                line.push('\n');
                line
            }
            None => format!("{}\n", "Score will appear here".dimmed()),
        }
    }

    /// Render detected fallacies, one per line.
    pub fn format_fallacies(fallacies: &[Fallacy]) -> String {
        let mut output = format!("{}\n", "Fallacies:".red().bold());
        for fallacy in fallacies {
            let mut line = String::from("  ");
            if let Some(emoji) = &fallacy.emoji {
                line.push_str(emoji);
                line.push(' ');
            }
            line.push_str(&fallacy.label);
            if let Some(why) = &fallacy.why {
                line.push_str(&format!(": {why}"));
            }
            output.push_str(&line);
            output.push('\n');
        }
        output
    }

    /// Render one conversation turn.
    pub fn format_turn(turn: &Turn) -> String {
        match turn.role {
            Role::User => format!("{} {}", "you>".green().bold(), turn.text),
            Role::Assistant => format!("{} {}", "coach>".blue().bold(), turn.text),
        }
    }

    /// One-line session status for the prompt header.
    pub fn format_session_line(state: &CoachState) -> String {
        match &state.session {
            Some(session) => format!(
                "Session: {}  |  Mode: {}",
                session.id,
                session.mode
            ),
            None => "Session: —".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coach_domain::BoardItem;
    use serde_json::json;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_empty_board_shows_hints() {
        plain();
        let output = ConsoleFormatter::format_board(&Board::empty());
        assert!(output.contains("No pro points yet"));
        assert!(output.contains("No con points yet"));
        assert!(output.contains("No sources yet"));
    }

    #[test]
    fn test_mixed_item_shapes_render() {
        plain();
        let board = Board {
            pro: vec![
                BoardItem::from_value(json!("plain point")),
                BoardItem::from_value(json!({"payload": {"claim": "structured point"}})),
            ],
            ..Board::empty()
        };
        let output = ConsoleFormatter::format_board(&board);
        assert!(output.contains("• plain point"));
        assert!(output.contains("• structured point"));
    }

    #[test]
    fn test_score_line() {
        plain();
        let score = Score::new(72.0, vec!["strong evidence".to_string()]);
        let output = ConsoleFormatter::format_score(Some(&score));
        assert!(output.contains("72"));
        assert!(output.contains("strong evidence"));

        let output = ConsoleFormatter::format_score(None);
        assert!(output.contains("Score will appear here"));
    }

    #[test]
    fn test_turn_prefixes() {
        plain();
        assert!(ConsoleFormatter::format_turn(&Turn::user("hi")).contains("you>"));
        assert!(ConsoleFormatter::format_turn(&Turn::assistant("yo")).contains("coach>"));
    }
}
