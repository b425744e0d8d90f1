#![warn(clippy::all)]
#![deny(rust_2018_idioms)]

pub mod board;
pub mod cli;
pub mod coords;
pub mod game;
pub mod types;

pub use board::{
    BoardError, DecodeError, EdgeKey, Hex, HexLayout, VertexKey, board_graph, decode_board,
    encode_board, generate_board, generate_board_default, is_valid_board,
};
pub use game::{DraftAction, DraftConfig, DraftError, DraftPhase, DraftState, Placement};
pub use types::{Color, Terrain};
