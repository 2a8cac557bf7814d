use super::animation::FallAnimation;
use super::board_widget::BoardView;
use super::celebration::Celebration;
use super::game_view::{self, GameView};
use super::reveal::{Outcome, Reveal, TimedNotice};
use crate::config::UiConfig;
use crate::game::{Game, GameEvent, Gravity, MoveError};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::Instant;
use tracing::debug;

/// Terminal front-end. Owns the game session and the purely visual state
/// layered on top of it.
pub struct App {
    game: Game,
    config: UiConfig,
    selected_line: usize,
    should_quit: bool,
    message: Option<String>,
    fall: Option<FallAnimation>,
    reveal: Reveal,
    notice: TimedNotice,
    celebration: Option<Celebration>,
}

impl App {
    pub fn new(game: Game, config: UiConfig) -> Self {
        App {
            game,
            config,
            selected_line: 3, // Start in middle
            should_quit: false,
            message: None,
            fall: None,
            reveal: Reveal::default(),
            notice: TimedNotice::default(),
            celebration: None,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            self.tick(Instant::now());
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(self.config.tick_rate())? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key, Instant::now());
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left | KeyCode::Up => {
                self.selected_line = self.selected_line.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Down => {
                let last = self.game.gravity().line_count() - 1;
                self.selected_line = (self.selected_line + 1).min(last);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece(now);
            }
            KeyCode::Char(c @ '1'..='9') => {
                let line = c as usize - '1' as usize;
                if line >= self.game.gravity().line_count() {
                    self.message = Some("Invalid line!".to_string());
                    return;
                }
                self.selected_line = line;
                self.drop_piece(now);
            }
            KeyCode::Char('r') => {
                self.reset();
            }
            _ => {}
        }
    }

    /// Drop piece in the selected line
    fn drop_piece(&mut self, now: Instant) {
        let gravity = self.game.gravity();
        let line = self.selected_line;

        match self.game.drop_at(line) {
            Ok(events) => {
                for event in events {
                    self.on_game_event(event, gravity, line, now);
                }
            }
            Err(err) => {
                debug!(%err, "drop ignored");
                // The outcome stays hidden until its reveal.
                if err == MoveError::GameOver && self.reveal.is_pending() {
                    return;
                }
                self.message = Some(match err {
                    MoveError::GameOver => "Game over! Press 'r' to restart.".to_string(),
                    MoveError::LineFull(_) => "That line is full!".to_string(),
                    MoveError::InvalidLine { .. } => "Invalid line!".to_string(),
                });
            }
        }
    }

    /// React to an engine signal. `gravity` is the direction the piece was
    /// dropped under.
    fn on_game_event(
        &mut self,
        event: GameEvent,
        gravity: Gravity,
        line: usize,
        now: Instant,
    ) {
        match event {
            GameEvent::PiecePlaced {
                player, position, ..
            } => {
                self.fall = Some(FallAnimation::new(
                    gravity,
                    line,
                    position,
                    player,
                    now,
                    self.config.fall_duration(),
                ));
            }
            GameEvent::GravityChanged(change) => {
                self.notice.show(
                    format!(
                        "Gravity shifted {} {}!",
                        change.to,
                        change.to.arrow()
                    ),
                    now,
                    self.config.gravity_notice(),
                );
                let last = change.to.line_count() - 1;
                self.selected_line = self.selected_line.min(last);
            }
            GameEvent::Won(win) => {
                self.reveal.schedule(Outcome::Won(win), self.reveal_due(now));
            }
            GameEvent::Drawn => {
                self.reveal.schedule(Outcome::Drawn, self.reveal_due(now));
            }
        }
    }

    /// Outcomes wait for the last piece to land.
    fn reveal_due(&self, now: Instant) -> Instant {
        let landed = self.fall.as_ref().map_or(now, FallAnimation::ends_at);
        landed + self.config.reveal_delay()
    }

    /// Advance animations and timed effects.
    fn tick(&mut self, now: Instant) {
        if self.fall.as_ref().is_some_and(|f| f.is_finished(now)) {
            self.fall = None;
        }

        if let Some(outcome) = self.reveal.poll(now) {
            if matches!(outcome, Outcome::Won(_)) && !self.config.celebration().is_zero() {
                self.celebration = Some(Celebration::start(
                    now,
                    self.config.celebration(),
                    self.config.celebration_interval(),
                ));
            }
        }

        let celebration_over = match &mut self.celebration {
            Some(celebration) => {
                celebration.tick(now);
                !celebration.is_active(now)
            }
            None => false,
        };
        if celebration_over {
            self.celebration = None;
        }
    }

    /// New game. Pending reveals and effects are cancelled.
    fn reset(&mut self) {
        self.game.reset();
        self.selected_line = 3;
        self.fall = None;
        self.reveal.cancel();
        self.notice.clear();
        self.celebration = None;
        self.message = Some("New game started!".to_string());
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        let now = Instant::now();
        let outcome = self.reveal.shown();
        let highlight = match outcome {
            Some(Outcome::Won(win)) => win.cells.as_slice(),
            _ => &[],
        };
        let falling = self
            .fall
            .as_ref()
            .and_then(|f| f.current(now).map(|at| (at, f.landing(), f.player())));

        let view = GameView {
            state: self.game.state(),
            board: BoardView {
                board: self.game.board(),
                gravity: self.game.gravity(),
                selected_line: self.selected_line,
                highlight,
                falling,
            },
            outcome,
            message: self.message.as_deref(),
            notice: self.notice.active(now),
            celebration: self.celebration.as_ref(),
        };
        game_view::render(frame, &view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GravitySchedule;
    use crossterm::event::KeyModifiers;
    use std::time::Duration;

    fn new_app() -> App {
        App::new(
            Game::seeded(GravitySchedule::classic(), 0),
            UiConfig::default(),
        )
    }

    fn press(app: &mut App, code: KeyCode, now: Instant) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE), now);
    }

    #[test]
    fn test_digit_drops_into_line() {
        let mut app = new_app();
        let now = Instant::now();
        press(&mut app, KeyCode::Char('1'), now);

        assert_eq!(app.selected_line, 0);
        assert_eq!(app.game.turn(), 1);
        assert!(app.fall.is_some());
    }

    #[test]
    fn test_digit_past_last_line_is_rejected() {
        let mut app = new_app();
        let now = Instant::now();
        press(&mut app, KeyCode::Char('8'), now);

        assert_eq!(app.game.turn(), 0);
        assert_eq!(app.selected_line, 3);
        assert_eq!(app.game.board().piece_count(), 0);
        assert_eq!(app.message.as_deref(), Some("Invalid line!"));
        assert!(app.fall.is_none());
    }

    #[test]
    fn test_digit_seven_rejected_under_horizontal_gravity() {
        let now = Instant::now();
        // With an interval of one the first move resamples gravity.
        let mut app = (0..64)
            .map(|seed| {
                let mut app = App::new(
                    Game::seeded(GravitySchedule::new(1), seed),
                    UiConfig::default(),
                );
                press(&mut app, KeyCode::Enter, now);
                app
            })
            .find(|app| !app.game.gravity().is_vertical())
            .unwrap();
        press(&mut app, KeyCode::Char('7'), now);

        assert_eq!(app.game.turn(), 1);
        assert_eq!(app.game.board().piece_count(), 1);
        assert_eq!(app.message.as_deref(), Some("Invalid line!"));
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut app = new_app();
        let now = Instant::now();
        for _ in 0..10 {
            press(&mut app, KeyCode::Right, now);
        }
        assert_eq!(app.selected_line, 6);
        for _ in 0..10 {
            press(&mut app, KeyCode::Left, now);
        }
        assert_eq!(app.selected_line, 0);
    }

    #[test]
    fn test_win_revealed_after_fall() {
        let mut app = new_app();
        let now = Instant::now();
        for key in ['1', '2', '1', '2', '1', '2', '1'] {
            press(&mut app, KeyCode::Char(key), now);
        }
        assert!(app.game.is_terminal());

        app.tick(now);
        assert!(app.reveal.shown().is_none());
        assert!(app.reveal.is_pending());

        let config = UiConfig::default();
        let due = now + config.fall_duration() + config.reveal_delay();
        app.tick(due);
        assert!(matches!(app.reveal.shown(), Some(Outcome::Won(_))));
        assert!(app.celebration.is_some());
        assert!(app.fall.is_none());
    }

    #[test]
    fn test_drop_during_pending_reveal_keeps_outcome_hidden() {
        let mut app = new_app();
        let now = Instant::now();
        for key in ['1', '2', '1', '2', '1', '2', '1'] {
            press(&mut app, KeyCode::Char(key), now);
        }
        press(&mut app, KeyCode::Enter, now);
        assert!(app.reveal.is_pending());
        assert_eq!(app.message, None);

        let config = UiConfig::default();
        let due = now + config.fall_duration() + config.reveal_delay();
        app.tick(due);
        press(&mut app, KeyCode::Enter, due);
        assert_eq!(
            app.message.as_deref(),
            Some("Game over! Press 'r' to restart.")
        );
    }

    #[test]
    fn test_reset_cancels_pending_reveal() {
        let mut app = new_app();
        let now = Instant::now();
        for key in ['1', '2', '1', '2', '1', '2', '1'] {
            press(&mut app, KeyCode::Char(key), now);
        }
        press(&mut app, KeyCode::Char('r'), now);

        app.tick(now + Duration::from_secs(5));
        assert!(app.reveal.shown().is_none());
        assert!(app.celebration.is_none());
        assert_eq!(app.game.turn(), 0);
    }

    #[test]
    fn test_rejected_drop_sets_message() {
        let mut app = new_app();
        let now = Instant::now();
        for _ in 0..6 {
            press(&mut app, KeyCode::Char('1'), now);
        }
        press(&mut app, KeyCode::Char('1'), now);

        assert_eq!(app.message.as_deref(), Some("That line is full!"));
        assert_eq!(app.game.turn(), 6);
    }

    #[test]
    fn test_gravity_change_shows_notice_and_clamps_selection() {
        let mut app = App::new(
            Game::seeded(GravitySchedule::new(1), 4),
            UiConfig::default(),
        );
        let now = Instant::now();
        app.selected_line = 6;
        press(&mut app, KeyCode::Enter, now);

        assert!(app.notice.active(now).is_some());
        assert!(app.selected_line < app.game.gravity().line_count());
        let later = now + UiConfig::default().gravity_notice();
        assert!(app.notice.active(later).is_none());
    }

    #[test]
    fn test_quit_keys() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char('q'), Instant::now());
        assert!(app.should_quit);

        let mut app = new_app();
        press(&mut app, KeyCode::Esc, Instant::now());
        assert!(app.should_quit);
        assert_eq!(app.game.gravity(), Gravity::Down);
    }
}
