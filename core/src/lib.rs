pub mod board;
pub mod board_state;
pub mod commit;
pub mod move_gen;
pub mod perft;
pub mod piece;
pub mod player;
pub mod types;

pub use board::*;
pub use board_state::{positions, BoardStateError};
pub use commit::*;
pub use move_gen::*;
pub use perft::{perft, perft_detailed, perft_divide, PerftResults};
pub use piece::*;
pub use player::*;
pub use types::*;
