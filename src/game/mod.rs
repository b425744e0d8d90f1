pub mod action;
pub mod state;

pub use action::{DraftAction, Placement};
pub use state::{DraftConfig, DraftError, DraftPhase, DraftState, PLAYER_COUNT};
