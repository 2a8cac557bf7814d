use std::time::{Duration, Instant};

use crate::game::{Gravity, Player, Position};

/// A dropped piece travelling from the entry edge to its landing cell.
#[derive(Debug, Clone)]
pub struct FallAnimation {
    player: Player,
    path: Vec<Position>,
    started: Instant,
    duration: Duration,
}

impl FallAnimation {
    /// `gravity` must be the direction in force when the piece was dropped.
    pub fn new(
        gravity: Gravity,
        line: usize,
        landing: Position,
        player: Player,
        now: Instant,
        duration: Duration,
    ) -> Self {
        FallAnimation {
            player,
            path: fall_path(gravity, line, landing),
            started: now,
            duration,
        }
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn landing(&self) -> Position {
        // path always ends on the landing cell
        self.path[self.path.len() - 1]
    }

    pub fn ends_at(&self) -> Instant {
        self.started + self.duration
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now >= self.ends_at()
    }

    /// Where the piece is drawn at `now`; `None` once it has landed.
    pub fn current(&self, now: Instant) -> Option<Position> {
        if self.is_finished(now) {
            return None;
        }
        let elapsed = now.saturating_duration_since(self.started).as_secs_f64();
        let progress = elapsed / self.duration.as_secs_f64();
        let last = self.path.len() - 1;
        let index = ((progress * self.path.len() as f64) as usize).min(last);
        Some(self.path[index])
    }
}

/// Cells from the entry edge of `line` down to `landing`, inclusive.
fn fall_path(gravity: Gravity, line: usize, landing: Position) -> Vec<Position> {
    let (d_row, d_col) = match gravity {
        Gravity::Down => (1, 0),
        Gravity::Up => (-1, 0),
        Gravity::Left => (0, -1),
        Gravity::Right => (0, 1),
    };
    let mut path = vec![gravity.entry_cell(line)];
    let mut pos = path[0];
    while pos != landing {
        match pos.offset(d_row, d_col) {
            Some(next) => {
                path.push(next);
                pos = next;
            }
            None => break,
        }
    }
    if pos != landing {
        // landing not on the line: show it in place
        path = vec![landing];
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_follows_gravity() {
        let path = fall_path(Gravity::Down, 2, Position::new(3, 2));
        assert_eq!(
            path,
            vec![
                Position::new(0, 2),
                Position::new(1, 2),
                Position::new(2, 2),
                Position::new(3, 2)
            ]
        );

        let path = fall_path(Gravity::Left, 4, Position::new(4, 4));
        assert_eq!(path, vec![Position::new(4, 6), Position::new(4, 5), Position::new(4, 4)]);
    }

    #[test]
    fn test_path_for_cell_on_entry_edge() {
        let path = fall_path(Gravity::Up, 0, Position::new(5, 0));
        assert_eq!(path, vec![Position::new(5, 0)]);
    }

    #[test]
    fn test_mismatched_landing_shown_in_place() {
        let path = fall_path(Gravity::Down, 0, Position::new(3, 4));
        assert_eq!(path, vec![Position::new(3, 4)]);
    }

    #[test]
    fn test_progress_over_time() {
        let start = Instant::now();
        let duration = Duration::from_millis(400);
        let anim = FallAnimation::new(
            Gravity::Down,
            1,
            Position::new(3, 1),
            Player::Red,
            start,
            duration,
        );

        assert_eq!(anim.current(start), Some(Position::new(0, 1)));
        assert_eq!(anim.current(start + Duration::from_millis(390)), Some(Position::new(3, 1)));
        assert_eq!(anim.current(start + duration), None);
        assert!(anim.is_finished(start + duration));
        assert_eq!(anim.landing(), Position::new(3, 1));
    }
}
