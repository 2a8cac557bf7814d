use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use super::board::{Board, Position};
use super::gravity::Gravity;
use super::player::Player;
use super::scheduler::GravitySchedule;
use super::state::{GameEvent, GameState, GameStatus, GravityChange, MoveError};

/// A game session: the rules state plus the randomness that drives gravity.
///
/// The presentation layer owns one of these, calls [`Game::drop_at`] and
/// [`Game::reset`], and reacts to the returned [`GameEvent`]s.
#[derive(Debug, Clone)]
pub struct Game<R = StdRng> {
    state: GameState,
    rng: R,
}

impl Game<StdRng> {
    /// Gravity draws seeded from OS entropy.
    pub fn new(schedule: GravitySchedule) -> Self {
        Self::with_rng(schedule, StdRng::from_os_rng())
    }

    /// Reproducible gravity draws.
    pub fn seeded(schedule: GravitySchedule, seed: u64) -> Self {
        Self::with_rng(schedule, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Game<R> {
    pub fn with_rng(schedule: GravitySchedule, rng: R) -> Self {
        Game {
            state: GameState::new(schedule),
            rng,
        }
    }

    /// Drop a piece for the current player into `line`. Rejected moves
    /// change nothing.
    pub fn drop_at(&mut self, line: usize) -> Result<Vec<GameEvent>, MoveError> {
        self.state.apply_move_mut(line, &mut self.rng)
    }

    /// Start over. The randomness source keeps its position.
    pub fn reset(&mut self) {
        info!(turn = self.state.turn(), "game reset");
        self.state.reset();
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn board(&self) -> &Board {
        self.state.board()
    }

    pub fn current_player(&self) -> Player {
        self.state.current_player()
    }

    pub fn status(&self) -> &GameStatus {
        self.state.status()
    }

    pub fn winning_cells(&self) -> &[Position] {
        self.state.winning_cells()
    }

    pub fn turn(&self) -> u32 {
        self.state.turn()
    }

    pub fn gravity(&self) -> Gravity {
        self.state.gravity()
    }

    pub fn last_gravity_change(&self) -> Option<GravityChange> {
        self.state.last_gravity_change()
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn legal_lines(&self) -> Vec<usize> {
        self.state.legal_lines()
    }
}
