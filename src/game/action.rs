use serde::{Deserialize, Serialize};

use crate::board::{EdgeKey, VertexKey};
use crate::types::{DraftRound, PlacementKind};

/// One applied placement, as recorded in the undo history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftAction {
    pub player: usize,
    pub round: DraftRound,
    pub placement: Placement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    Settlement(VertexKey),
    Road(EdgeKey),
}

impl Placement {
    pub fn kind(&self) -> PlacementKind {
        match self {
            Placement::Settlement(_) => PlacementKind::Settlement,
            Placement::Road(_) => PlacementKind::Road,
        }
    }
}
