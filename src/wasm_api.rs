use crate::error::ChessError;
use crate::game::{ClickOutcome, Game, GameConfig};
use crate::moves::generate_moves;
use crate::snapshot::GameSnapshot;
use crate::square::Square;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct ClickResult {
    #[serde(flatten)]
    state: Option<GameSnapshot>,
    outcome: Option<&'static str>,
    error: Option<String>,
}

fn outcome_name(outcome: ClickOutcome) -> &'static str {
    match outcome {
        ClickOutcome::Ignored => "ignored",
        ClickOutcome::Selected => "selected",
        ClickOutcome::Deselected => "deselected",
        ClickOutcome::Moved { captured: Some(_), .. } => "captured",
        ClickOutcome::Moved { captured: None, .. } => "moved",
    }
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

fn error_result(err: ChessError) -> JsValue {
    to_js(&ClickResult {
        state: None,
        outcome: None,
        error: Some(err.to_string()),
    })
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        WebGame { game: Game::new() }
    }

    /// Toggle whether clicking another own piece switches the selection.
    pub fn with_reselect(&mut self, enabled: bool) {
        let config = GameConfig {
            reselect_own_piece: enabled,
        };
        self.game = self.game.clone().with_config(config);
    }

    pub fn state(&self) -> JsValue {
        to_js(&self.game.snapshot())
    }

    /// Handle a tile click by its `data-position` value, e.g. `"e2"`.
    pub fn click(&mut self, square: &str) -> JsValue {
        match self.game.handle_square_str(square) {
            Ok(outcome) => to_js(&ClickResult {
                state: Some(self.game.snapshot()),
                outcome: Some(outcome_name(outcome)),
                error: None,
            }),
            Err(err) => error_result(err),
        }
    }

    /// Destination squares for the piece on `square`, regardless of turn.
    pub fn moves_from(&self, square: &str) -> JsValue {
        match square.parse::<Square>() {
            Ok(from) => {
                let moves: Vec<Square> = generate_moves(self.game.board(), from)
                    .into_iter()
                    .collect();
                to_js(&moves)
            }
            Err(err) => error_result(err),
        }
    }

    pub fn build_info() -> String {
        format!(
            "{} {} ({})",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            env!("BUILD_TIMESTAMP")
        )
    }
}
