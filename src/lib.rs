//! # Gravity Four
//!
//! Two-player Connect Four on a 6×7 grid where, every tenth move, gravity
//! may swing to a new direction. The rules engine is synchronous and owns no
//! presentation concerns; a Ratatui terminal front-end consumes its state
//! and events.
//!
//! ## Modules
//!
//! - [`game`]: Rules engine: board, gravity, win detection, scheduler, state machine
//! - [`ui`]: Terminal UI: game screen, fall animation, outcome reveal, confetti
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod ui;
