use super::board_widget::BoardView;
use super::celebration::{Celebration, PALETTE_SIZE};
use super::reveal::Outcome;
use crate::game::{GameState, Gravity, Player};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Block, Borders, Paragraph,
    },
    Frame,
};

const CONFETTI: [Color; PALETTE_SIZE] = [
    Color::Red,
    Color::Yellow,
    Color::Green,
    Color::Cyan,
    Color::Magenta,
];

/// Snapshot of what the screen shows this frame.
pub struct GameView<'a> {
    pub state: &'a GameState,
    pub board: BoardView<'a>,
    /// Outcome once the UI has announced it; `None` while still hidden.
    pub outcome: Option<&'a Outcome>,
    pub message: Option<&'a str>,
    pub notice: Option<&'a str>,
    pub celebration: Option<&'a Celebration>,
}

pub fn render(frame: &mut Frame, view: &GameView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(12),   // Board
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, view, chunks[0]);
    render_board(frame, view, chunks[1]);
    render_message(frame, view, chunks[2]);
    render_controls(frame, view.board.gravity, chunks[3]);

    if let Some(celebration) = view.celebration {
        render_confetti(frame, celebration, frame.area());
    }
}

fn player_color(player: Player) -> Color {
    match player {
        Player::Red => Color::Red,
        Player::Yellow => Color::Yellow,
    }
}

fn render_header(frame: &mut Frame, view: &GameView, area: Rect) {
    let state = view.state;
    let line = match view.outcome {
        Some(Outcome::Won(win)) => Line::from(Span::styled(
            format!("{} wins!", win.player.name()),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
        )),
        Some(Outcome::Drawn) => Line::from(Span::styled(
            "It's a draw!",
            Style::default().fg(Color::LightYellow).add_modifier(Modifier::BOLD),
        )),
        None => {
            let player = state.current_player();
            Line::from(vec![
                Span::raw("Current player: "),
                Span::styled(
                    player.name(),
                    Style::default()
                        .fg(player_color(player))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(
                    "  |  Gravity {}  |  Turn {}",
                    state.gravity().arrow(),
                    state.turn()
                )),
            ])
        }
    };

    let header = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, view: &GameView, area: Rect) {
    let board_widget = Paragraph::new(view.board.lines()).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, view: &GameView, area: Rect) {
    // A gravity notice outranks ordinary messages while it lasts.
    let (text, color) = match (view.notice, view.message) {
        (Some(notice), _) => (notice, Color::Magenta),
        (None, Some(message)) => (message, Color::Yellow),
        (None, None) => ("", Color::Yellow),
    };
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn controls_text(gravity: Gravity) -> String {
    format!(
        "←↑/→↓: Select  |  1-{} or Enter: Drop  |  R: New game  |  Q: Quit",
        gravity.line_count()
    )
}

fn render_controls(frame: &mut Frame, gravity: Gravity, area: Rect) {
    let line = Line::from(controls_text(gravity));

    let controls = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}

fn render_confetti(frame: &mut Frame, celebration: &Celebration, area: Rect) {
    let mut layers: [Vec<(f64, f64)>; PALETTE_SIZE] = Default::default();
    for particle in celebration.particles() {
        layers[particle.color].push((particle.x, particle.y));
    }

    let canvas = Canvas::default()
        .marker(Marker::Dot)
        .x_bounds([0.0, 1.0])
        .y_bounds([0.0, 1.0])
        .paint(move |ctx| {
            for (coords, color) in layers.iter().zip(CONFETTI) {
                ctx.draw(&Points {
                    coords,
                    color,
                });
            }
        });

    frame.render_widget(canvas, area);
}
