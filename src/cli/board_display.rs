use std::fmt::Display;
use std::fmt::Write as _;

use crate::board::{HexLayout, slot_rows};
use crate::game::{DraftPhase, DraftState, PLAYER_COUNT, Placement};
use crate::types::Color;

/// Render the five tile rows as an indented text grid, one token per
/// hex: the terrain code letter and the number, e.g. `F5` or `D`.
pub fn render_board(layout: &HexLayout) -> String {
    let mut output = String::new();
    for row in slot_rows() {
        let indent = "  ".repeat(5 - row.len());
        let tokens: Vec<String> = row
            .iter()
            .map(|&slot| {
                let hex = layout.hex(slot);
                let code = hex.terrain.code().to_ascii_uppercase();
                match hex.number {
                    Some(number) => format!("{code}{number:<2}"),
                    None => format!("{code}  "),
                }
            })
            .collect();
        let _ = writeln!(output, "{indent}{}", tokens.join(" "));
    }
    output
}

/// Placements grouped by seat, for the summary under the grid.
pub fn render_placements(state: &DraftState) -> String {
    let mut output = String::new();
    for player in 0..PLAYER_COUNT {
        let mut settlements = Vec::new();
        let mut roads = Vec::new();
        for action in state.history() {
            if action.player != player {
                continue;
            }
            match &action.placement {
                Placement::Settlement(vertex) => settlements.push(vertex.to_string()),
                Placement::Road(edge) => roads.push(edge.to_string()),
            }
        }
        if settlements.is_empty() && roads.is_empty() {
            continue;
        }
        let _ = writeln!(
            output,
            "  {}: settlements [{}] roads [{}]",
            player_label(player),
            settlements.join(", "),
            roads.join(", "),
        );
    }
    output
}

/// Numbered hint list the placement commands index into.
pub fn render_hints<T: Display>(hints: &[T]) -> String {
    let mut output = String::new();
    for (index, hint) in hints.iter().enumerate() {
        let _ = writeln!(output, "  [{index}] {hint}");
    }
    output
}

/// "Player 1 (Red)" for seat 0, matching the original status labels.
pub fn player_label(player: usize) -> String {
    format!("Player {} ({})", player + 1, color_label(Color::ORDERED[player]))
}

/// The phase banner: what the current actor has to do next.
pub fn phase_info(state: &DraftState) -> String {
    match state.phase() {
        DraftPhase::PlacingSettlement { round, player } => format!(
            "{}: place {} settlement",
            player_label(player),
            round.ordinal()
        ),
        DraftPhase::PlacingRoad { player, .. } => {
            format!("{}: place a road", player_label(player))
        }
        DraftPhase::Complete => "Setup Complete!".to_string(),
    }
}

fn color_label(color: Color) -> &'static str {
    match color {
        Color::Red => "Red",
        Color::Blue => "Blue",
        Color::Orange => "Orange",
        Color::Green => "Green",
    }
}
