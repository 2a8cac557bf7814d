use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::board::{Board, Position};
use super::gravity::Gravity;
use super::player::Player;
use super::scheduler::GravitySchedule;
use super::win::{find_win, WinLine};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won(WinLine),
    Drawn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("the game is over")]
    GameOver,

    #[error("line {line} does not exist while gravity points {gravity}")]
    InvalidLine { line: usize, gravity: Gravity },

    #[error("line {0} is full")]
    LineFull(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GravityChange {
    pub from: Gravity,
    pub to: Gravity,
    /// Turn counter value that triggered the resample.
    pub turn: u32,
}

/// Signals emitted by an accepted move, in the order they happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PiecePlaced {
        player: Player,
        position: Position,
        turn: u32,
    },
    GravityChanged(GravityChange),
    Won(WinLine),
    Drawn,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    current_player: Player,
    status: GameStatus,
    turn: u32,
    gravity: Gravity,
    schedule: GravitySchedule,
    last_gravity_change: Option<GravityChange>,
}

impl GameState {
    /// Create initial game state
    pub fn new(schedule: GravitySchedule) -> Self {
        GameState {
            board: Board::new(),
            current_player: Player::Red, // Red starts
            status: GameStatus::InProgress,
            turn: 0,
            gravity: Gravity::Down,
            schedule,
            last_gravity_change: None,
        }
    }

    /// Initial state with the default gravity schedule
    pub fn initial() -> Self {
        Self::new(GravitySchedule::default())
    }

    /// Get current player. Frozen on the winner once the game is won.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    pub fn winner(&self) -> Option<Player> {
        match &self.status {
            GameStatus::Won(line) => Some(line.player),
            _ => None,
        }
    }

    /// Cells of the winning run; empty unless the game is won.
    pub fn winning_cells(&self) -> &[Position] {
        match &self.status {
            GameStatus::Won(line) => &line.cells,
            _ => &[],
        }
    }

    /// Number of accepted placements this game.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn gravity(&self) -> Gravity {
        self.gravity
    }

    pub fn schedule(&self) -> GravitySchedule {
        self.schedule
    }

    /// Set by the placement that resampled gravity, cleared by the next one.
    pub fn last_gravity_change(&self) -> Option<GravityChange> {
        self.last_gravity_change
    }

    pub fn gravity_just_changed(&self) -> bool {
        self.last_gravity_change.is_some()
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    /// Get list of lines that accept a piece under the current gravity
    pub fn legal_lines(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }

        (0..self.gravity.line_count())
            .filter(|&line| !self.board.is_line_full(line, self.gravity))
            .collect()
    }

    /// Apply a move and return new state (immutable)
    pub fn apply_move<R: Rng + ?Sized>(
        &self,
        line: usize,
        rng: &mut R,
    ) -> Result<(GameState, Vec<GameEvent>), MoveError> {
        let mut next = self.clone();
        let events = next.apply_move_mut(line, rng)?;
        Ok((next, events))
    }

    /// Apply move in place. A rejected move leaves the state untouched.
    pub fn apply_move_mut<R: Rng + ?Sized>(
        &mut self,
        line: usize,
        rng: &mut R,
    ) -> Result<Vec<GameEvent>, MoveError> {
        let position = self.landing_for(line).inspect_err(|err| {
            debug!(line, gravity = %self.gravity, %err, "move rejected");
        })?;

        let player = self.current_player;
        self.board
            .place(position, player.to_cell())
            .map_err(|_| MoveError::LineFull(line))?;
        self.turn += 1;
        self.last_gravity_change = None;
        debug!(player = player.number(), %position, turn = self.turn, "piece placed");

        let mut events = vec![GameEvent::PiecePlaced {
            player,
            position,
            turn: self.turn,
        }];

        if let Some(to) = self.schedule.next_gravity(self.turn, rng) {
            let change = GravityChange {
                from: self.gravity,
                to,
                turn: self.turn,
            };
            info!(from = %change.from, to = %change.to, turn = self.turn, "gravity changed");
            self.gravity = to;
            self.last_gravity_change = Some(change);
            events.push(GameEvent::GravityChanged(change));
        }

        if let Some(win) = find_win(&self.board, position) {
            info!(player = player.number(), cells = win.len(), turn = self.turn, "game won");
            self.status = GameStatus::Won(win.clone());
            events.push(GameEvent::Won(win));
        } else if self.board.is_full() {
            info!(turn = self.turn, "game drawn");
            self.status = GameStatus::Drawn;
            events.push(GameEvent::Drawn);
        } else {
            self.current_player = player.other();
        }

        Ok(events)
    }

    /// Back to the initial configuration, keeping the gravity schedule.
    pub fn reset(&mut self) {
        *self = GameState::new(self.schedule);
    }

    fn landing_for(&self, line: usize) -> Result<Position, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if line >= self.gravity.line_count() {
            return Err(MoveError::InvalidLine {
                line,
                gravity: self.gravity,
            });
        }
        self.board
            .landing_position(line, self.gravity)
            .ok_or(MoveError::LineFull(line))
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
