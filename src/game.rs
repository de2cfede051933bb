// =============================================================================
// Turn / selection controller
//
// A click either picks up a piece of the side to move (Idle -> Selected) or,
// with a piece already picked up, drops it on one of its candidate squares
// (Selected -> Idle, turn flips). Any other click while selected just drops
// the selection. By default that includes clicking another of your own pieces:
// the click deselects without picking the new piece up. Set
// `GameConfig::reselect_own_piece` to pick it up in the same click instead.
// =============================================================================

use std::collections::BTreeSet;

use crate::board::Board;
use crate::error::ChessError;
use crate::moves::{generate_moves, Move};
use crate::piece::{Color, Piece};
use crate::snapshot::GameSnapshot;
use crate::square::Square;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GameConfig {
    /// Clicking a piece of the side to move while another is selected selects
    /// the new piece instead of only clearing the selection.
    pub reselect_own_piece: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Idle,
    Selected {
        square: Square,
        candidates: BTreeSet<Square>,
    },
}

/// What a single click did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Idle click on an empty square or an opponent piece.
    Ignored,
    /// A piece of the side to move is now selected.
    Selected,
    /// The previous selection was dropped.
    Deselected,
    /// A move was played; the turn has passed to the other side.
    Moved {
        mv: Move,
        captured: Option<Piece>,
    },
}

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    selection: Selection,
    config: GameConfig,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Standard starting position, white to move, nothing selected.
    pub fn new() -> Self {
        Self::with_board(Board::new())
    }

    pub fn with_board(board: Board) -> Self {
        Game {
            board,
            selection: Selection::Idle,
            config: GameConfig::default(),
        }
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.board.turn()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected(&self) -> Option<Square> {
        match &self.selection {
            Selection::Selected { square, .. } => Some(*square),
            Selection::Idle => None,
        }
    }

    /// Candidate destinations for the current selection; empty when idle.
    pub fn candidates(&self) -> impl Iterator<Item = Square> + '_ {
        let set = match &self.selection {
            Selection::Selected { candidates, .. } => Some(candidates),
            Selection::Idle => None,
        };
        set.into_iter().flatten().copied()
    }

    /// Feed one square click through the state machine.
    pub fn handle_click(&mut self, clicked: Square) -> ClickOutcome {
        match std::mem::take(&mut self.selection) {
            Selection::Selected { square, candidates } => {
                if candidates.contains(&clicked) {
                    let mv = Move {
                        from: square,
                        to: clicked,
                    };
                    let captured = self.board.apply_move(mv);
                    ClickOutcome::Moved { mv, captured }
                } else if self.config.reselect_own_piece && self.select(clicked) {
                    ClickOutcome::Selected
                } else {
                    ClickOutcome::Deselected
                }
            }
            Selection::Idle => {
                if self.select(clicked) {
                    ClickOutcome::Selected
                } else {
                    ClickOutcome::Ignored
                }
            }
        }
    }

    /// Same as [`Game::handle_click`] for a square given as text, e.g. `"e2"`.
    pub fn handle_square_str(&mut self, square: &str) -> Result<ClickOutcome, ChessError> {
        let square: Square = square.parse()?;
        Ok(self.handle_click(square))
    }

    /// Read-only view for rendering.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(self)
    }

    fn select(&mut self, square: Square) -> bool {
        let owns = self
            .board
            .piece_at(square)
            .is_some_and(|p| p.color == self.board.turn());
        if owns {
            self.selection = Selection::Selected {
                square,
                candidates: generate_moves(&self.board, square),
            };
        }
        owns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::PieceType;
    use crate::square::sq;

    fn click(game: &mut Game, square: &str) -> ClickOutcome {
        game.handle_click(sq(square))
    }

    #[test]
    fn starts_idle_with_white_to_move() {
        let game = Game::new();
        assert_eq!(game.selection(), &Selection::Idle);
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.candidates().count(), 0);
    }

    #[test]
    fn select_then_move_pawn() {
        let mut game = Game::new();
        assert_eq!(click(&mut game, "e2"), ClickOutcome::Selected);
        assert_eq!(game.selected(), Some(sq("e2")));
        assert_eq!(game.candidates().collect::<Vec<_>>(), vec![sq("e3"), sq("e4")]);

        let outcome = click(&mut game, "e4");
        assert_eq!(
            outcome,
            ClickOutcome::Moved {
                mv: Move { from: sq("e2"), to: sq("e4") },
                captured: None,
            }
        );
        assert_eq!(game.board().piece_at(sq("e2")), None);
        assert_eq!(
            game.board().piece_at(sq("e4")),
            Some(Piece::new(PieceType::Pawn, Color::White))
        );
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.selection(), &Selection::Idle);
    }

    #[test]
    fn non_candidate_click_deselects() {
        let mut game = Game::new();
        click(&mut game, "e2");
        assert_eq!(click(&mut game, "a5"), ClickOutcome::Deselected);
        assert_eq!(game.selection(), &Selection::Idle);
        assert_eq!(game.board(), &Board::new());
        assert_eq!(game.turn(), Color::White);
    }

    #[test]
    fn clicking_another_own_piece_only_deselects_by_default() {
        let mut game = Game::new();
        click(&mut game, "e2");
        assert_eq!(click(&mut game, "d2"), ClickOutcome::Deselected);
        assert_eq!(game.selected(), None);
        // A second click is needed to pick it up.
        assert_eq!(click(&mut game, "d2"), ClickOutcome::Selected);
        assert_eq!(game.selected(), Some(sq("d2")));
    }

    #[test]
    fn reselect_config_switches_pieces_in_one_click() {
        let mut game = Game::new().with_config(GameConfig {
            reselect_own_piece: true,
        });
        click(&mut game, "e2");
        assert_eq!(click(&mut game, "g1"), ClickOutcome::Selected);
        assert_eq!(game.selected(), Some(sq("g1")));
        assert_eq!(game.candidates().collect::<Vec<_>>(), vec![sq("f3"), sq("h3")]);

        // Opponent pieces and empty squares still just deselect.
        assert_eq!(click(&mut game, "e7"), ClickOutcome::Deselected);
        click(&mut game, "g1");
        assert_eq!(click(&mut game, "e5"), ClickOutcome::Deselected);
    }

    #[test]
    fn idle_clicks_on_empty_or_enemy_are_ignored() {
        let mut game = Game::new();
        assert_eq!(click(&mut game, "e4"), ClickOutcome::Ignored);
        assert_eq!(click(&mut game, "e7"), ClickOutcome::Ignored);
        assert_eq!(game.selection(), &Selection::Idle);
    }

    #[test]
    fn boxed_in_piece_can_be_selected_with_no_candidates() {
        let mut game = Game::new();
        assert_eq!(click(&mut game, "a1"), ClickOutcome::Selected);
        assert_eq!(game.candidates().count(), 0);
        assert_eq!(click(&mut game, "a2"), ClickOutcome::Deselected);
    }

    #[test]
    fn turn_alternates_and_captures_are_reported() {
        let mut game = Game::new();
        for (from, to) in [("e2", "e4"), ("d7", "d5")] {
            click(&mut game, from);
            assert!(matches!(click(&mut game, to), ClickOutcome::Moved { .. }));
        }
        assert_eq!(game.turn(), Color::White);

        click(&mut game, "e4");
        let outcome = click(&mut game, "d5");
        assert_eq!(
            outcome,
            ClickOutcome::Moved {
                mv: Move { from: sq("e4"), to: sq("d5") },
                captured: Some(Piece::new(PieceType::Pawn, Color::Black)),
            }
        );
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.board().pieces().count(), 31);
    }

    #[test]
    fn black_cannot_move_on_whites_turn() {
        let mut game = Game::new();
        assert_eq!(click(&mut game, "e7"), ClickOutcome::Ignored);
        click(&mut game, "e2");
        click(&mut game, "e3");
        assert_eq!(click(&mut game, "e2"), ClickOutcome::Ignored);
        assert_eq!(click(&mut game, "e7"), ClickOutcome::Selected);
    }

    #[test]
    fn square_text_is_validated() {
        let mut game = Game::new();
        assert_eq!(game.handle_square_str("e2"), Ok(ClickOutcome::Selected));
        assert_eq!(
            game.handle_square_str("k9"),
            Err(ChessError::InvalidSquare("k9".to_string()))
        );
        // A rejected string is not a click: the selection survives.
        assert_eq!(game.selected(), Some(sq("e2")));
    }
}
