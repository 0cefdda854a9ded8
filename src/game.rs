use log::{debug, info};

use crate::board::{BOARD_SIZE, Board, Interior};
use crate::error::GameError;
use crate::types::{
    Cell, Color, FinalReport, Outcome, Player, Position, Score, TurnReport, TurnState,
};

const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// One Othello game: board, turn state and registered players.
///
/// Black always moves first. Every applied move or pass re-checks whether
/// either side can still move; once neither can, the engine is `Ended` and
/// only the scoring accessors remain meaningful.
#[derive(Debug, Clone)]
pub struct GameEngine {
    board: Board,
    state: TurnState,
    black_player: Option<Player>,
    white_player: Option<Player>,
    flipped: Vec<Position>,
    registration_open: bool,
}

impl GameEngine {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            state: TurnState::WaitingForBlack,
            black_player: None,
            white_player: None,
            flipped: Vec::new(),
            registration_open: true,
        }
    }

    /// Continues play from an arbitrary position with `to_move` on turn.
    /// Registration is closed; the engine starts `Ended` when neither side
    /// has a move.
    pub fn from_position(board: Board, to_move: Color) -> Self {
        let mut engine = Self {
            board,
            state: TurnState::waiting_for(to_move),
            black_player: None,
            white_player: None,
            flipped: Vec::new(),
            registration_open: false,
        };
        if engine.end_of_game() {
            engine.state = TurnState::Ended;
        }
        engine
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn side_to_move(&self) -> Option<Color> {
        self.state.side_to_move()
    }

    pub fn is_over(&self) -> bool {
        self.state == TurnState::Ended
    }

    /// Pieces flipped by the last applied move. Empty after a pass.
    pub fn last_flipped(&self) -> &[Position] {
        &self.flipped
    }

    pub fn player(&self, color: Color) -> Option<&Player> {
        match color {
            Color::Black => self.black_player.as_ref(),
            Color::White => self.white_player.as_ref(),
        }
    }

    /// Registers the player for `color` and seeds that color's opening pieces.
    pub fn register_player(&mut self, name: &str, color: Color) -> Result<&Player, GameError> {
        if !self.registration_open {
            return Err(GameError::RegistrationClosed);
        }
        let slot = match color {
            Color::Black => &mut self.black_player,
            Color::White => &mut self.white_player,
        };
        if slot.is_some() {
            return Err(GameError::ColorTaken(color));
        }

        self.board.assign_initial_color(color);
        info!("registered {color} player {name:?}");
        Ok(&*slot.insert(Player::new(name, color)))
    }

    /// Legal moves for `color` in row-major order, each cell at most once.
    pub fn legal_moves(&self, color: Color) -> Vec<Position> {
        let mut moves = Vec::new();
        for row in 1..=BOARD_SIZE {
            for col in 1..=BOARD_SIZE {
                if self.board.get(row, col) != Some(Cell::Empty) {
                    continue;
                }
                if DIRECTIONS
                    .iter()
                    .any(|&dir| !self.flip_run(row, col, dir, color).is_empty())
                {
                    moves.push(Position::at(row, col));
                }
            }
        }
        moves
    }

    /// Legal moves for the side to move; empty once the game has ended.
    pub fn current_legal_moves(&self) -> Vec<Position> {
        self.side_to_move()
            .map(|color| self.legal_moves(color))
            .unwrap_or_default()
    }

    pub fn is_legal(&self, color: Color, pos: Position) -> bool {
        let (row, col) = (pos.row() as usize, pos.col() as usize);
        self.board.get(row, col) == Some(Cell::Empty)
            && DIRECTIONS
                .iter()
                .any(|&dir| !self.flip_run(row, col, dir, color).is_empty())
    }

    /// Places `color` at `pos`, flips every bracketed run and advances the
    /// turn. Nothing changes when the move is refused.
    pub fn apply_move(&mut self, color: Color, pos: Position) -> Result<Interior, GameError> {
        let expected = self.side_to_move().ok_or(GameError::GameOver)?;
        if color != expected {
            return Err(GameError::WrongTurn {
                expected,
                got: color,
            });
        }
        if !self.is_legal(color, pos) {
            return Err(GameError::InvalidMove {
                color,
                position: pos,
                legal: self.legal_moves(color),
            });
        }

        let (row, col) = (pos.row() as usize, pos.col() as usize);
        let flips: Vec<Position> = DIRECTIONS
            .iter()
            .flat_map(|&dir| self.flip_run(row, col, dir, color))
            .collect();

        self.board.set(row, col, color)?;
        for flip in &flips {
            self.board.set(flip.row() as usize, flip.col() as usize, color)?;
        }
        debug!("{color} played {pos}, flipped {}", flips.len());

        self.flipped = flips;
        self.registration_open = false;
        self.advance(color);
        Ok(self.board.interior())
    }

    /// Hands the turn over. Only allowed while the side to move has no
    /// legal move.
    pub fn pass(&mut self, color: Color) -> Result<(), GameError> {
        let expected = self.side_to_move().ok_or(GameError::GameOver)?;
        if color != expected {
            return Err(GameError::WrongTurn {
                expected,
                got: color,
            });
        }
        if !self.legal_moves(color).is_empty() {
            return Err(GameError::PassNotAllowed(color));
        }

        debug!("{color} passed");
        self.flipped.clear();
        self.advance(color);
        Ok(())
    }

    /// True when neither side has a legal move.
    pub fn end_of_game(&self) -> bool {
        self.legal_moves(Color::Black).is_empty() && self.legal_moves(Color::White).is_empty()
    }

    pub fn score(&self) -> Score {
        self.board.count()
    }

    /// Compares the counts on the current board. A fresh board is a 2-2 tie.
    pub fn winner(&self) -> Outcome {
        let score = self.score();
        let color = if score.black > score.white {
            Color::Black
        } else if score.white > score.black {
            Color::White
        } else {
            return Outcome::Tie;
        };
        Outcome::Win {
            color,
            player: self.player(color).cloned(),
        }
    }

    /// Final counts and winner, once the game has ended.
    pub fn final_report(&self) -> Option<FinalReport> {
        self.is_over().then(|| FinalReport {
            score: self.score(),
            outcome: self.winner(),
        })
    }

    /// Token-level move submission: `"black"`/`"white"` plus a 1-based
    /// coordinate. Rejections carry the legal moves of the side to move.
    pub fn submit(&mut self, color: &str, row: i32, col: i32) -> TurnReport {
        let result = color
            .parse::<Color>()
            .and_then(|color| Ok((color, Position::new(row, col)?)))
            .and_then(|(color, pos)| self.apply_move(color, pos));

        match result {
            Ok(board) => TurnReport::Moved {
                board,
                flipped: self.flipped.clone(),
                state: self.state,
                final_report: self.final_report(),
            },
            Err(error) => {
                debug!("rejected {color} ({row}, {col}): {error}");
                TurnReport::Rejected {
                    error,
                    legal: self.current_legal_moves(),
                }
            }
        }
    }

    fn advance(&mut self, mover: Color) {
        self.state = TurnState::waiting_for(mover.opponent());
        if self.end_of_game() {
            self.state = TurnState::Ended;
            let score = self.score();
            info!(
                "game over: black {} white {} ({})",
                score.black,
                score.white,
                self.winner()
            );
        }
    }

    /// Opponent pieces bracketed by `color` when stepping from (row, col)
    /// along `dir`. Empty unless the run ends on `color`'s own piece.
    fn flip_run(
        &self,
        row: usize,
        col: usize,
        (dr, dc): (isize, isize),
        color: Color,
    ) -> Vec<Position> {
        let mut run = Vec::new();
        let (mut r, mut c) = (row, col);

        loop {
            let (Some(nr), Some(nc)) = (r.checked_add_signed(dr), c.checked_add_signed(dc)) else {
                return Vec::new();
            };
            (r, c) = (nr, nc);
            match self.board.get(r, c).and_then(Cell::color) {
                Some(piece) if piece == color => return run,
                Some(_) => run.push(Position::at(r, c)),
                None => return Vec::new(),
            }
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::board::GRID_SIZE;
    use proptest::prelude::*;
    use proptest::test_runner::TestCaseError;

    /// Plays `choices` as indices into the legal move list, passing when forced.
    fn play(
        choices: &[usize],
        mut visit: impl FnMut(&GameEngine, &GameEngine, Color) -> Result<(), TestCaseError>,
    ) -> Result<GameEngine, TestCaseError> {
        let mut game = GameEngine::new();
        for &choice in choices {
            let Some(color) = game.side_to_move() else {
                break;
            };
            let moves = game.legal_moves(color);
            let before = game.clone();
            if moves.is_empty() {
                game.pass(color).unwrap();
            } else {
                game.apply_move(color, moves[choice % moves.len()]).unwrap();
            }
            visit(&before, &game, color)?;
        }
        Ok(game)
    }

    proptest! {
        #[test]
        fn prop_move_adds_one_piece_and_shifts_by_flips(choices in prop::collection::vec(0usize..32, 0..70)) {
            play(&choices, |before, after, color| {
                let (b, a) = (before.score(), after.score());
                if after.last_flipped().is_empty() {
                    prop_assert_eq!(a, b, "pass must not change the board");
                    return Ok(());
                }
                let flipped = after.last_flipped().len() as u8;
                prop_assert_eq!(a.total(), b.total() + 1);
                prop_assert_eq!(a.of(color), b.of(color) + 1 + flipped);
                prop_assert_eq!(a.of(color.opponent()), b.of(color.opponent()) - flipped);
                Ok(())
            })?;
        }

        #[test]
        fn prop_border_ring_never_changes(choices in prop::collection::vec(0usize..32, 0..70)) {
            let game = play(&choices, |_, _, _| Ok(()))?;
            for i in 0..GRID_SIZE {
                for (row, col) in [(0, i), (GRID_SIZE - 1, i), (i, 0), (i, GRID_SIZE - 1)] {
                    prop_assert_eq!(game.board().get(row, col), Some(Cell::Border));
                }
            }
        }

        #[test]
        fn prop_legal_moves_are_unique_and_empty_cells(choices in prop::collection::vec(0usize..32, 0..70)) {
            let game = play(&choices, |_, _, _| Ok(()))?;
            for color in [Color::Black, Color::White] {
                let moves = game.legal_moves(color);
                let mut sorted = moves.clone();
                sorted.sort();
                sorted.dedup();
                prop_assert_eq!(&sorted, &moves, "row-major order without duplicates");
                prop_assert!(moves.iter().all(|&mv| game.board().cell(mv) == Cell::Empty));
                prop_assert_eq!(moves, game.legal_moves(color));
            }
            prop_assert_eq!(game.is_over(), game.end_of_game());
        }
    }
}
