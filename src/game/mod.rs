//! Connect Four rules engine: board, gravity resolution, win detection,
//! gravity scheduling, and the game state machine with pure transitions.

mod board;
mod controller;
mod gravity;
mod player;
mod scheduler;
mod state;
mod win;

pub use board::{Board, Cell, PlaceError, Position, COLS, ROWS};
pub use controller::Game;
pub use gravity::Gravity;
pub use player::Player;
pub use scheduler::{GravitySchedule, DEFAULT_GRAVITY_INTERVAL};
pub use state::{GameEvent, GameState, GameStatus, GravityChange, MoveError};
pub use win::{find_win, Axis, WinLine, WIN_LENGTH};
