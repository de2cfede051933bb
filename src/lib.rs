pub mod board;
pub mod error;
pub mod game;
pub mod moves;
pub mod piece;
pub mod snapshot;
pub mod square;

#[cfg(target_arch = "wasm32")]
mod wasm_api;

pub use board::Board;
pub use error::ChessError;
pub use game::{ClickOutcome, Game, GameConfig, Selection};
pub use moves::{generate_moves, Move};
pub use piece::{Color, Piece, PieceType};
pub use snapshot::{GameSnapshot, SquareView};
pub use square::Square;
