use std::collections::HashMap;

use rand::Rng;
use rand::thread_rng;

use crate::board::{BoardError, EdgeKey, HexLayout, VertexKey, board_graph, generate_board};
use crate::types::{Color, DraftRound, PlacementKind};

use super::action::{DraftAction, Placement};

/// The practice draft always seats a full table.
pub const PLAYER_COUNT: usize = Color::ORDERED.len();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DraftConfig {
    /// When set, every turn is settlement-only. Fixed for the lifetime
    /// of the draft; toggling mid-sequence is not supported.
    pub skip_roads: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftPhase {
    PlacingSettlement { round: DraftRound, player: usize },
    PlacingRoad { round: DraftRound, player: usize },
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DraftStep {
    player: usize,
    round: DraftRound,
    kind: PlacementKind,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("the draft is already complete")]
    DraftComplete,
    #[error("a road placement is pending")]
    RoadPending,
    #[error("a settlement placement is pending")]
    SettlementPending,
    #[error("vertex {0} is not a legal settlement spot")]
    IllegalSettlement(VertexKey),
    #[error("edge {0} is not a legal road spot")]
    IllegalRoad(EdgeKey),
}

/// The whole draft: board, occupancy, snake schedule and undo history.
///
/// The schedule is precomputed; the position in it always equals the
/// history length, so undo is a plain pop. Every operation validates
/// fully before mutating, so a rejection leaves the state untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftState {
    config: DraftConfig,
    layout: HexLayout,
    settlements: HashMap<VertexKey, usize>,
    roads: HashMap<EdgeKey, usize>,
    schedule: Vec<DraftStep>,
    history: Vec<DraftAction>,
}

impl DraftState {
    /// Fresh draft over a newly generated board (thread-local RNG).
    pub fn new(config: DraftConfig) -> Result<Self, BoardError> {
        let mut rng = thread_rng();
        Self::new_with_rng(config, &mut rng)
    }

    pub fn new_with_rng(config: DraftConfig, rng: &mut impl Rng) -> Result<Self, BoardError> {
        Ok(Self::with_layout(config, generate_board(rng)?))
    }

    /// Fresh draft over a caller-supplied board (e.g. a loaded save).
    pub fn with_layout(config: DraftConfig, layout: HexLayout) -> Self {
        Self {
            config,
            layout,
            settlements: HashMap::new(),
            roads: HashMap::new(),
            schedule: build_schedule(config.skip_roads),
            history: Vec::new(),
        }
    }

    pub fn config(&self) -> DraftConfig {
        self.config
    }

    pub fn layout(&self) -> &HexLayout {
        &self.layout
    }

    pub fn settlements(&self) -> &HashMap<VertexKey, usize> {
        &self.settlements
    }

    pub fn roads(&self) -> &HashMap<EdgeKey, usize> {
        &self.roads
    }

    pub fn history(&self) -> &[DraftAction] {
        &self.history
    }

    pub fn settlement_count(&self) -> usize {
        self.settlements.len()
    }

    pub fn road_count(&self) -> usize {
        self.roads.len()
    }

    pub fn phase(&self) -> DraftPhase {
        match self.schedule.get(self.history.len()) {
            None => DraftPhase::Complete,
            Some(step) => match step.kind {
                PlacementKind::Settlement => DraftPhase::PlacingSettlement {
                    round: step.round,
                    player: step.player,
                },
                PlacementKind::Road => DraftPhase::PlacingRoad {
                    round: step.round,
                    player: step.player,
                },
            },
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.phase(), DraftPhase::Complete)
    }

    pub fn current_player(&self) -> Option<usize> {
        self.schedule.get(self.history.len()).map(|step| step.player)
    }

    pub fn current_color(&self) -> Option<Color> {
        self.current_player().map(|player| Color::ORDERED[player])
    }

    /// Every vertex with no settlement on it or one edge away. The set
    /// is recomputed per call, never cached across mutations.
    pub fn legal_settlement_vertices(&self) -> Vec<VertexKey> {
        board_graph()
            .vertices()
            .iter()
            .filter(|vertex| self.settlement_allowed(vertex))
            .cloned()
            .collect()
    }

    /// Unoccupied edges touching the settlement placed this turn.
    /// Empty outside a road phase.
    pub fn legal_road_edges(&self) -> Vec<EdgeKey> {
        let Some(anchor) = self.road_anchor() else {
            return Vec::new();
        };
        board_graph()
            .vertex_edges(anchor)
            .iter()
            .filter(|edge| !self.roads.contains_key(edge))
            .cloned()
            .collect()
    }

    pub fn place_settlement(&mut self, vertex: &VertexKey) -> Result<(), DraftError> {
        let (round, player) = match self.phase() {
            DraftPhase::PlacingSettlement { round, player } => (round, player),
            DraftPhase::PlacingRoad { .. } => return Err(DraftError::RoadPending),
            DraftPhase::Complete => return Err(DraftError::DraftComplete),
        };
        if !board_graph().contains_vertex(vertex) || !self.settlement_allowed(vertex) {
            return Err(DraftError::IllegalSettlement(vertex.clone()));
        }
        self.settlements.insert(vertex.clone(), player);
        self.history.push(DraftAction {
            player,
            round,
            placement: Placement::Settlement(vertex.clone()),
        });
        Ok(())
    }

    pub fn place_road(&mut self, edge: &EdgeKey) -> Result<(), DraftError> {
        let (round, player) = match self.phase() {
            DraftPhase::PlacingRoad { round, player } => (round, player),
            DraftPhase::PlacingSettlement { .. } => return Err(DraftError::SettlementPending),
            DraftPhase::Complete => return Err(DraftError::DraftComplete),
        };
        if !self.legal_road_edges().contains(edge) {
            return Err(DraftError::IllegalRoad(edge.clone()));
        }
        self.roads.insert(edge.clone(), player);
        self.history.push(DraftAction {
            player,
            round,
            placement: Placement::Road(edge.clone()),
        });
        Ok(())
    }

    /// Strict inverse of the most recent placement. Silent no-op when
    /// the history is empty.
    pub fn undo(&mut self) -> Option<DraftAction> {
        let action = self.history.pop()?;
        match &action.placement {
            Placement::Settlement(vertex) => {
                self.settlements.remove(vertex);
            }
            Placement::Road(edge) => {
                self.roads.remove(edge);
            }
        }
        Some(action)
    }

    pub fn settlements_of(&self, player: usize) -> usize {
        self.settlements
            .values()
            .filter(|&&owner| owner == player)
            .count()
    }

    pub fn roads_of(&self, player: usize) -> usize {
        self.roads.values().filter(|&&owner| owner == player).count()
    }

    fn settlement_allowed(&self, vertex: &VertexKey) -> bool {
        !self.settlements.contains_key(vertex)
            && board_graph()
                .vertex_neighbors(vertex)
                .iter()
                .all(|neighbor| !self.settlements.contains_key(neighbor))
    }

    /// The settlement placed this turn. During a road phase the last
    /// history entry is always that settlement.
    fn road_anchor(&self) -> Option<&VertexKey> {
        if !matches!(self.phase(), DraftPhase::PlacingRoad { .. }) {
            return None;
        }
        match self.history.last() {
            Some(DraftAction {
                placement: Placement::Settlement(vertex),
                ..
            }) => Some(vertex),
            _ => None,
        }
    }
}

fn build_schedule(skip_roads: bool) -> Vec<DraftStep> {
    let turn_len = if skip_roads { 1 } else { 2 };
    let mut steps = Vec::with_capacity(PLAYER_COUNT * 2 * turn_len);
    let mut push_turn = |steps: &mut Vec<DraftStep>, player: usize, round: DraftRound| {
        steps.push(DraftStep {
            player,
            round,
            kind: PlacementKind::Settlement,
        });
        if !skip_roads {
            steps.push(DraftStep {
                player,
                round,
                kind: PlacementKind::Road,
            });
        }
    };

    for player in 0..PLAYER_COUNT {
        push_turn(&mut steps, player, DraftRound::First);
    }
    for player in (0..PLAYER_COUNT).rev() {
        push_turn(&mut steps, player, DraftRound::Second);
    }
    steps
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::board::board_graph;

    fn seeded_state(skip_roads: bool, seed: u64) -> DraftState {
        let mut rng = StdRng::seed_from_u64(seed);
        DraftState::new_with_rng(DraftConfig { skip_roads }, &mut rng)
            .expect("board generation succeeds")
    }

    fn place_first_legal_settlement(state: &mut DraftState) -> VertexKey {
        let vertex = state.legal_settlement_vertices()[0].clone();
        state
            .place_settlement(&vertex)
            .expect("hinted vertex is placeable");
        vertex
    }

    fn place_first_legal_road(state: &mut DraftState) -> EdgeKey {
        let edge = state.legal_road_edges()[0].clone();
        state.place_road(&edge).expect("hinted edge is placeable");
        edge
    }

    #[test]
    fn draft_opens_with_player_zero_placing_a_settlement() {
        let state = seeded_state(false, 0);
        assert_eq!(
            state.phase(),
            DraftPhase::PlacingSettlement {
                round: DraftRound::First,
                player: 0
            }
        );
        assert_eq!(state.current_color(), Some(Color::Red));
        assert_eq!(state.settlement_count(), 0);
        assert_eq!(state.road_count(), 0);
    }

    #[test]
    fn settlement_transitions_to_road_for_the_same_player() {
        let mut state = seeded_state(false, 1);
        place_first_legal_settlement(&mut state);
        assert_eq!(
            state.phase(),
            DraftPhase::PlacingRoad {
                round: DraftRound::First,
                player: 0
            }
        );
    }

    #[test]
    fn snake_order_visits_players_forward_then_backward() {
        let mut state = seeded_state(false, 2);
        let mut visited = Vec::new();
        while let DraftPhase::PlacingSettlement { round, player } = state.phase() {
            visited.push((player, round));
            place_first_legal_settlement(&mut state);
            place_first_legal_road(&mut state);
        }
        assert_eq!(
            visited,
            vec![
                (0, DraftRound::First),
                (1, DraftRound::First),
                (2, DraftRound::First),
                (3, DraftRound::First),
                (3, DraftRound::Second),
                (2, DraftRound::Second),
                (1, DraftRound::Second),
                (0, DraftRound::Second),
            ]
        );
        assert!(state.is_complete());
        assert_eq!(state.settlement_count(), 8);
        assert_eq!(state.road_count(), 8);
        for player in 0..PLAYER_COUNT {
            assert_eq!(state.settlements_of(player), 2);
            assert_eq!(state.roads_of(player), 2);
        }
    }

    #[test]
    fn skip_roads_draft_is_settlement_only() {
        let mut state = seeded_state(true, 3);
        let mut visited = Vec::new();
        while let DraftPhase::PlacingSettlement { player, .. } = state.phase() {
            visited.push(player);
            place_first_legal_settlement(&mut state);
        }
        assert_eq!(visited, vec![0, 1, 2, 3, 3, 2, 1, 0]);
        assert!(state.is_complete());
        assert_eq!(state.settlement_count(), 8);
        assert_eq!(state.road_count(), 0);
    }

    #[test]
    fn distance_rule_excludes_neighbors_of_a_settlement() {
        let mut state = seeded_state(false, 4);
        let vertex = place_first_legal_settlement(&mut state);
        let legal = state.legal_settlement_vertices();
        assert!(!legal.contains(&vertex));
        for neighbor in board_graph().vertex_neighbors(&vertex) {
            assert!(!legal.contains(neighbor), "{neighbor} is one edge away");
        }
    }

    #[test]
    fn road_hints_all_touch_the_settlement_just_placed() {
        let mut state = seeded_state(false, 5);
        let vertex = place_first_legal_settlement(&mut state);
        let hints = state.legal_road_edges();
        assert!(!hints.is_empty());
        for edge in &hints {
            assert!(edge.touches(&vertex));
        }
    }

    #[test]
    fn road_not_touching_the_anchor_is_rejected() {
        let mut state = seeded_state(false, 6);
        let vertex = place_first_legal_settlement(&mut state);
        let elsewhere = board_graph()
            .edges()
            .iter()
            .find(|edge| !edge.touches(&vertex))
            .expect("some edge avoids the anchor")
            .clone();
        let before = state.clone();
        assert_eq!(
            state.place_road(&elsewhere),
            Err(DraftError::IllegalRoad(elsewhere.clone()))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn wrong_phase_placements_are_rejected_without_mutation() {
        let mut state = seeded_state(false, 7);
        let some_edge = board_graph().edges()[0].clone();
        let before = state.clone();
        assert_eq!(
            state.place_road(&some_edge),
            Err(DraftError::SettlementPending)
        );
        assert_eq!(state, before);

        let vertex = place_first_legal_settlement(&mut state);
        let before = state.clone();
        assert_eq!(
            state.place_settlement(&vertex),
            Err(DraftError::RoadPending)
        );
        assert_eq!(state, before);
    }

    #[test]
    fn illegal_vertex_is_rejected_without_mutation() {
        let mut state = seeded_state(false, 8);
        let vertex = place_first_legal_settlement(&mut state);
        place_first_legal_road(&mut state);

        let neighbor = board_graph().vertex_neighbors(&vertex)[0].clone();
        let before = state.clone();
        assert_eq!(
            state.place_settlement(&neighbor),
            Err(DraftError::IllegalSettlement(neighbor.clone()))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn undo_is_a_strict_inverse_of_both_placement_kinds() {
        let mut state = seeded_state(false, 9);

        let before_settlement = state.clone();
        place_first_legal_settlement(&mut state);
        let undone = state.undo().expect("one settlement to undo");
        assert_eq!(undone.placement.kind(), PlacementKind::Settlement);
        assert_eq!(state, before_settlement);

        place_first_legal_settlement(&mut state);
        let before_road = state.clone();
        place_first_legal_road(&mut state);
        let undone = state.undo().expect("one road to undo");
        assert_eq!(undone.placement.kind(), PlacementKind::Road);
        assert_eq!(state, before_road);
    }

    #[test]
    fn undo_reverts_turn_and_phase_pointers() {
        let mut state = seeded_state(false, 10);
        place_first_legal_settlement(&mut state);
        place_first_legal_road(&mut state);
        assert_eq!(state.current_player(), Some(1));

        state.undo();
        assert_eq!(
            state.phase(),
            DraftPhase::PlacingRoad {
                round: DraftRound::First,
                player: 0
            }
        );
        state.undo();
        assert_eq!(
            state.phase(),
            DraftPhase::PlacingSettlement {
                round: DraftRound::First,
                player: 0
            }
        );
    }

    #[test]
    fn undo_on_empty_history_is_a_silent_no_op() {
        let mut state = seeded_state(false, 11);
        let before = state.clone();
        assert_eq!(state.undo(), None);
        assert_eq!(state, before);
    }

    #[test]
    fn completed_draft_rejects_further_placements() {
        let mut state = seeded_state(true, 12);
        while !state.is_complete() {
            place_first_legal_settlement(&mut state);
        }
        let vertex = state.legal_settlement_vertices()[0].clone();
        assert_eq!(
            state.place_settlement(&vertex),
            Err(DraftError::DraftComplete)
        );
    }

    #[test]
    fn undo_after_completion_reopens_the_last_turn() {
        let mut state = seeded_state(false, 13);
        while !state.is_complete() {
            place_first_legal_settlement(&mut state);
            place_first_legal_road(&mut state);
        }
        state.undo();
        assert_eq!(
            state.phase(),
            DraftPhase::PlacingRoad {
                round: DraftRound::Second,
                player: 0
            }
        );
    }
}
