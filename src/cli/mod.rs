pub mod auto_player;
pub mod board_display;

pub use auto_player::auto_place;
pub use board_display::{phase_info, player_label, render_board, render_hints};
