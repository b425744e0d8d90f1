use crate::board::{HexLayout, board_graph};

/// Highest tolerated pip-weight sum at a single vertex. A vertex whose
/// incident tokens reach this bound makes an early settlement there too
/// strong, so the generator rejects the layout.
const VERTEX_PIP_CAP: u32 = 13;

/// A layout is placement-valid when all three independent checks hold.
pub fn is_valid_board(layout: &HexLayout) -> bool {
    no_shared_adjacent_numbers(layout)
        && no_adjacent_red_numbers(layout)
        && pip_weight_under_cap(layout)
}

/// No two edge-adjacent hexes show the same number token.
pub fn no_shared_adjacent_numbers(layout: &HexLayout) -> bool {
    let graph = board_graph();
    layout.iter().all(|hex| {
        let Some(number) = hex.number else {
            return true;
        };
        graph
            .adjacent_hexes(hex.slot)
            .iter()
            .all(|&neighbor| layout.hex(neighbor).number != Some(number))
    })
}

/// The red tokens (6 and 8) never sit on edge-adjacent hexes.
pub fn no_adjacent_red_numbers(layout: &HexLayout) -> bool {
    let graph = board_graph();
    layout.iter().all(|hex| {
        if !is_red(hex.number) {
            return true;
        }
        graph
            .adjacent_hexes(hex.slot)
            .iter()
            .all(|&neighbor| !is_red(layout.hex(neighbor).number))
    })
}

/// Every vertex stays below the pip-weight cap.
pub fn pip_weight_under_cap(layout: &HexLayout) -> bool {
    board_graph()
        .vertices()
        .iter()
        .all(|vertex| layout.vertex_pip_weight(vertex) < VERTEX_PIP_CAP)
}

fn is_red(number: Option<u8>) -> bool {
    matches!(number, Some(6) | Some(8))
}
