use serde::{Deserialize, Serialize};

use crate::game::Game;
use crate::piece::Color;
use crate::square::Square;

/// One board tile as a view draws it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquareView {
    pub square: Square,
    /// Image code of the occupying piece (`"wP"`, `"bH"`, ...).
    pub piece: Option<String>,
    pub light: bool,
    pub selected: bool,
    pub highlighted: bool,
}

/// Everything a front end needs to redraw after a click.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub turn: Color,
    pub selected: Option<Square>,
    pub candidates: Vec<Square>,
    /// Display order: rank 8 first, files a to h within each rank.
    pub squares: Vec<SquareView>,
}

impl GameSnapshot {
    pub(crate) fn capture(game: &Game) -> Self {
        let board = game.board();
        let selected = game.selected();
        let candidates: Vec<Square> = game.candidates().collect();

        let squares = (0..8u8)
            .rev()
            .flat_map(|rank| (0..8u8).filter_map(move |file| Square::new(file, rank)))
            .map(|square| SquareView {
                square,
                piece: board.piece_at(square).map(|p| p.code()),
                light: square.is_light(),
                selected: selected == Some(square),
                highlighted: candidates.contains(&square),
            })
            .collect();

        GameSnapshot {
            turn: board.turn(),
            selected,
            candidates,
            squares,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
