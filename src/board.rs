use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ChessError;
use crate::moves::{generate_moves, Move};
use crate::piece::{Color, Piece, PieceType};
use crate::square::Square;

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// Piece placement plus the side to move. Indexed `squares[rank][file]`,
/// rank 0 = rank 1, file 0 = file a.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
    current_turn: Color,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board with no pieces, white to move. Useful for setting
    /// up test positions.
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
            current_turn: Color::White,
        }
    }

    /// Standard starting position.
    pub fn new() -> Self {
        let mut board = Board::empty();

        for (file, &piece_type) in BACK_RANK.iter().enumerate() {
            board.squares[0][file] = Some(Piece::new(piece_type, Color::White));
            board.squares[7][file] = Some(Piece::new(piece_type, Color::Black));
        }
        for file in 0..8 {
            board.squares[1][file] = Some(Piece::new(PieceType::Pawn, Color::White));
            board.squares[6][file] = Some(Piece::new(PieceType::Pawn, Color::Black));
        }

        board
    }

    /// Parse the piece-placement field of a FEN string, e.g.
    /// `"8/8/8/3p4/8/8/8/3R4"`. An optional second field (`w` or `b`) sets the
    /// side to move; anything after it is ignored.
    pub fn from_placement(fen: &str) -> Result<Self, ChessError> {
        let mut fields = fen.split_whitespace();
        let placement = fields
            .next()
            .ok_or_else(|| ChessError::InvalidPlacement("empty string".to_string()))?;

        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != 8 {
            return Err(ChessError::InvalidPlacement(format!(
                "expected 8 ranks, found {}",
                rows.len()
            )));
        }

        let mut board = Board::empty();
        for (i, row) in rows.iter().enumerate() {
            let rank = 7 - i;
            let mut file = 0usize;
            for c in row.chars() {
                if let Some(skip) = c.to_digit(10) {
                    if !(1..=8).contains(&skip) {
                        return Err(ChessError::InvalidPlacement(format!(
                            "bad empty-run {c:?} on rank {}",
                            rank + 1
                        )));
                    }
                    file += skip as usize;
                } else {
                    let piece = Piece::from_fen_char(c).ok_or_else(|| {
                        ChessError::InvalidPlacement(format!("unknown piece letter {c:?}"))
                    })?;
                    if file < 8 {
                        board.squares[rank][file] = Some(piece);
                    }
                    file += 1;
                }
            }
            if file != 8 {
                return Err(ChessError::InvalidPlacement(format!(
                    "rank {} does not cover 8 files",
                    rank + 1
                )));
            }
        }

        board.current_turn = match fields.next() {
            None | Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(other) => {
                return Err(ChessError::InvalidPlacement(format!(
                    "side to move must be 'w' or 'b', found {other:?}"
                )))
            }
        };

        Ok(board)
    }

    /// Inverse of [`Board::from_placement`], placement field only.
    pub fn placement(&self) -> String {
        let mut out = String::new();
        for rank in (0..8).rev() {
            let mut run = 0;
            for file in 0..8 {
                match self.squares[rank][file] {
                    Some(p) => {
                        if run > 0 {
                            out.push_str(&run.to_string());
                            run = 0;
                        }
                        out.push(p.fen_char());
                    }
                    None => run += 1,
                }
            }
            if run > 0 {
                out.push_str(&run.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }
        out
    }

    pub fn turn(&self) -> Color {
        self.current_turn
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.rank() as usize][sq.file() as usize]
    }

    /// Put a piece on a square, replacing whatever was there. For building
    /// positions before play starts.
    pub fn place(&mut self, sq: Square, piece: Piece) {
        self.squares[sq.rank() as usize][sq.file() as usize] = Some(piece);
    }

    /// Occupied squares with their pieces, a1 through h8.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    /// Every pseudo-legal move for `color`, ordered by origin then destination.
    pub fn pseudo_legal_moves(&self, color: Color) -> Vec<Move> {
        self.pieces()
            .filter(|(_, p)| p.color == color)
            .flat_map(|(from, _)| {
                generate_moves(self, from)
                    .into_iter()
                    .map(move |to| Move { from, to })
            })
            .collect()
    }

    /// Relocate the piece on `m.from` to `m.to`, capturing anything there, and
    /// hand the turn to the other side. Returns the captured piece.
    pub(crate) fn apply_move(&mut self, m: Move) -> Option<Piece> {
        let (fr, ff) = (m.from.rank() as usize, m.from.file() as usize);
        let (tr, tf) = (m.to.rank() as usize, m.to.file() as usize);

        let piece = self.squares[fr][ff].take()?;
        let captured = self.squares[tr][tf].replace(piece);
        self.current_turn = self.current_turn.opposite();
        captured
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let c = self.squares[rank][file].map_or('.', |p| p.fen_char());
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square::sq;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    #[test]
    fn starting_position_layout() {
        let board = Board::new();
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(board.turn(), Color::White);
        assert_eq!(
            board.piece_at(sq("e1")),
            Some(Piece::new(PieceType::King, Color::White))
        );
        assert_eq!(
            board.piece_at(sq("d8")),
            Some(Piece::new(PieceType::Queen, Color::Black))
        );
        assert_eq!(
            board.piece_at(sq("g7")),
            Some(Piece::new(PieceType::Pawn, Color::Black))
        );
        assert_eq!(board.piece_at(sq("e4")), None);
        let pawns = board
            .pieces()
            .filter(|(_, p)| p.piece_type == PieceType::Pawn)
            .count();
        assert_eq!(pawns, 16);
    }

    #[test]
    fn placement_parses_to_start() {
        assert_eq!(Board::from_placement(START).unwrap(), Board::new());
        assert_eq!(Board::new().placement(), START);
    }

    #[test]
    fn placement_reads_side_to_move() {
        let board = Board::from_placement("8/8/8/8/8/8/8/4K3 b - - 0 1").unwrap();
        assert_eq!(board.turn(), Color::Black);
        assert_eq!(board.pieces().count(), 1);
        assert_eq!(board.placement(), "8/8/8/8/8/8/8/4K3");
    }

    #[test]
    fn placement_rejects_malformed_input() {
        for bad in [
            "",
            "8/8/8/8/8/8/8",
            "8/8/8/8/8/8/8/9",
            "8/8/8/8/8/8/8/7",
            "8/8/8/8/8/8/8/RNBQKBNRR",
            "8/8/8/8/8/8/8/4X3",
            "8/8/8/8/8/8/8/8 x",
        ] {
            assert!(
                matches!(Board::from_placement(bad), Err(ChessError::InvalidPlacement(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn apply_move_relocates_and_flips_turn() {
        let mut board = Board::new();
        let captured = board.apply_move(Move {
            from: sq("e2"),
            to: sq("e4"),
        });
        assert_eq!(captured, None);
        assert_eq!(board.piece_at(sq("e2")), None);
        assert_eq!(
            board.piece_at(sq("e4")),
            Some(Piece::new(PieceType::Pawn, Color::White))
        );
        assert_eq!(board.turn(), Color::Black);
    }

    #[test]
    fn apply_move_reports_capture() {
        let mut board = Board::from_placement("8/8/8/3p4/8/8/8/3R4").unwrap();
        let captured = board.apply_move(Move {
            from: sq("d1"),
            to: sq("d5"),
        });
        assert_eq!(captured, Some(Piece::new(PieceType::Pawn, Color::Black)));
        assert_eq!(board.pieces().count(), 1);
    }

    #[test]
    fn start_has_twenty_moves_per_side() {
        let board = Board::new();
        assert_eq!(board.pseudo_legal_moves(Color::White).len(), 20);
        assert_eq!(board.pseudo_legal_moves(Color::Black).len(), 20);
    }

    #[test]
    fn diagram_puts_rank_eight_on_top() {
        let text = Board::new().to_string();
        let first = text.lines().next().unwrap();
        assert_eq!(first, "8  r n b q k b n r");
        assert_eq!(text.lines().last().unwrap(), "   a b c d e f g h");
    }
}
