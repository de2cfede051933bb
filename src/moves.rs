// Pseudo-legal destination generation for a single piece.
//
// Pieces move by geometry alone: a destination is rejected only when it is
// off the board or holds a piece of the mover's own color. Nothing here looks
// at checks, pins, castling, en passant or promotion.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::ChessError;
use crate::piece::{Color, PieceType};
use crate::square::Square;

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const ROOK_DIRS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl fmt::Display for Move {
    /// Coordinate notation, e.g. "e2e4".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

impl FromStr for Move {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ChessError::InvalidMove(s.to_string());
        if s.len() != 4 || !s.is_ascii() {
            return Err(invalid());
        }
        let from = s[..2].parse().map_err(|_| invalid())?;
        let to = s[2..].parse().map_err(|_| invalid())?;
        Ok(Move { from, to })
    }
}

/// Destinations the piece on `from` may move to. Empty when `from` is empty.
pub fn generate_moves(board: &Board, from: Square) -> BTreeSet<Square> {
    let mut moves = BTreeSet::new();
    let Some(piece) = board.piece_at(from) else {
        return moves;
    };
    let color = piece.color;

    match piece.piece_type {
        PieceType::Pawn => generate_pawn_moves(board, from, color, &mut moves),
        PieceType::Knight => generate_step_moves(board, from, color, &KNIGHT_OFFSETS, &mut moves),
        PieceType::King => generate_step_moves(board, from, color, &KING_OFFSETS, &mut moves),
        PieceType::Rook => generate_sliding_moves(board, from, color, &ROOK_DIRS, &mut moves),
        PieceType::Bishop => generate_sliding_moves(board, from, color, &BISHOP_DIRS, &mut moves),
        PieceType::Queen => {
            generate_sliding_moves(board, from, color, &ROOK_DIRS, &mut moves);
            generate_sliding_moves(board, from, color, &BISHOP_DIRS, &mut moves);
        }
    }

    moves
}

fn generate_pawn_moves(board: &Board, from: Square, color: Color, moves: &mut BTreeSet<Square>) {
    let dir = color.forward();

    // Single push, then double push from the start rank through an empty square
    if let Some(one) = from.offset(0, dir) {
        if board.piece_at(one).is_none() {
            moves.insert(one);
            if from.rank() == color.pawn_start_rank() {
                if let Some(two) = one.offset(0, dir) {
                    if board.piece_at(two).is_none() {
                        moves.insert(two);
                    }
                }
            }
        }
    }

    for df in [-1, 1] {
        if let Some(target) = from.offset(df, dir) {
            if board.piece_at(target).is_some_and(|p| p.color != color) {
                moves.insert(target);
            }
        }
    }
}

fn generate_step_moves(
    board: &Board,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
    moves: &mut BTreeSet<Square>,
) {
    for &(df, dr) in offsets {
        let Some(target) = from.offset(df, dr) else {
            continue;
        };
        if board.piece_at(target).is_some_and(|p| p.color == color) {
            continue;
        }
        moves.insert(target);
    }
}

fn generate_sliding_moves(
    board: &Board,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    moves: &mut BTreeSet<Square>,
) {
    for &(df, dr) in directions {
        let mut cursor = from.offset(df, dr);
        while let Some(target) = cursor {
            if let Some(p) = board.piece_at(target) {
                if p.color != color {
                    moves.insert(target);
                }
                break;
            }
            moves.insert(target);
            cursor = target.offset(df, dr);
        }
    }
}
