use rand::Rng;
use rand::seq::SliceRandom;

use crate::game::{DraftAction, DraftPhase, DraftState};

/// Pick a uniformly random legal placement for the current actor and
/// apply it. Returns the applied action, or `None` once the draft is
/// complete.
pub fn auto_place(state: &mut DraftState, rng: &mut impl Rng) -> Option<DraftAction> {
    match state.phase() {
        DraftPhase::PlacingSettlement { .. } => {
            let hints = state.legal_settlement_vertices();
            let vertex = hints.choose(rng)?.clone();
            state
                .place_settlement(&vertex)
                .expect("hinted vertex is placeable");
        }
        DraftPhase::PlacingRoad { .. } => {
            let hints = state.legal_road_edges();
            let edge = hints.choose(rng)?.clone();
            state.place_road(&edge).expect("hinted edge is placeable");
        }
        DraftPhase::Complete => return None,
    }
    state.history().last().cloned()
}
