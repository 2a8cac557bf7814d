//! Terminal UI: the game screen plus the presentation-only effects that
//! react to engine events (fall animation, delayed outcome, gravity notice,
//! confetti).

mod animation;
mod app;
pub mod board_widget;
mod celebration;
mod game_view;
mod reveal;

pub use app::App;
pub use celebration::Celebration;
pub use reveal::{Outcome, Reveal, TimedNotice};
