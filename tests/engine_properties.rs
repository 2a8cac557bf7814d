//! Whole-game properties of the rules engine, checked over random move
//! sequences.

use gravity_four::game::{
    Cell, Game, GameEvent, GameState, GameStatus, GravitySchedule, MoveError, Player, Position,
    COLS, ROWS, WIN_LENGTH,
};
use proptest::prelude::*;

fn schedule_strategy() -> impl Strategy<Value = GravitySchedule> {
    prop_oneof![
        Just(GravitySchedule::classic()),
        Just(GravitySchedule::default()),
        (1u32..6).prop_map(GravitySchedule::new),
    ]
}

fn changed_cells(before: &GameState, after: &GameState) -> Vec<Position> {
    let mut changed = Vec::new();
    for row in 0..ROWS {
        for col in 0..COLS {
            if before.board().get(row, col) != after.board().get(row, col) {
                changed.push(Position::new(row, col));
            }
        }
    }
    changed
}

fn assert_valid_win_line(state: &GameState) {
    let GameStatus::Won(win) = state.status() else {
        return;
    };
    assert!(win.cells.len() >= WIN_LENGTH);
    assert!(win
        .cells
        .iter()
        .all(|&pos| state.board().at(pos) == win.player.to_cell()));

    let mut cells = win.cells.clone();
    cells.sort_by_key(|p| (p.row, p.col));
    let d_row = cells[1].row as isize - cells[0].row as isize;
    let d_col = cells[1].col as isize - cells[0].col as isize;
    for pair in cells.windows(2) {
        assert_eq!(pair[1].row as isize - pair[0].row as isize, d_row);
        assert_eq!(pair[1].col as isize - pair[0].col as isize, d_col);
    }
}

proptest! {
    #[test]
    fn prop_each_move_claims_exactly_one_empty_cell(
        schedule in schedule_strategy(),
        seed in any::<u64>(),
        lines in prop::collection::vec(0usize..8, 0..120),
    ) {
        let mut game = Game::seeded(schedule, seed);
        let mut accepted = 0u32;

        for line in lines {
            let before = game.state().clone();
            match game.drop_at(line) {
                Ok(events) => {
                    accepted += 1;
                    let changed = changed_cells(&before, game.state());
                    prop_assert_eq!(changed.len(), 1);
                    let pos = changed[0];
                    prop_assert_eq!(before.board().at(pos), Cell::Empty);
                    prop_assert_eq!(game.board().at(pos), before.current_player().to_cell());
                    let placed_at_pos = matches!(
                        events[0],
                        GameEvent::PiecePlaced { position, .. } if position == pos
                    );
                    prop_assert!(placed_at_pos);
                }
                Err(_) => prop_assert_eq!(game.state(), &before),
            }
            prop_assert_eq!(game.turn(), accepted);
            prop_assert_eq!(game.board().piece_count(), accepted as usize);
            prop_assert!(game.board().piece_count() <= ROWS * COLS);
        }
    }

    #[test]
    fn prop_turns_alternate_until_terminal(
        schedule in schedule_strategy(),
        seed in any::<u64>(),
        lines in prop::collection::vec(0usize..7, 0..100),
    ) {
        let mut game = Game::seeded(schedule, seed);

        for line in lines {
            let mover = game.current_player();
            let was_terminal = game.is_terminal();
            let result = game.drop_at(line);

            if was_terminal {
                prop_assert_eq!(result, Err(MoveError::GameOver));
                prop_assert_eq!(game.current_player(), mover);
            } else if result.is_ok() {
                if game.is_terminal() {
                    prop_assert_eq!(game.current_player(), mover);
                } else {
                    prop_assert_eq!(game.current_player(), mover.other());
                }
            }
        }
    }

    #[test]
    fn prop_gravity_only_changes_on_scheduled_turns(
        interval in 1u32..12,
        seed in any::<u64>(),
        lines in prop::collection::vec(0usize..7, 0..100),
    ) {
        let schedule = GravitySchedule::new(interval);
        let mut game = Game::seeded(schedule, seed);

        for line in lines {
            let before = game.gravity();
            if let Ok(events) = game.drop_at(line) {
                let announced = events
                    .iter()
                    .any(|e| matches!(e, GameEvent::GravityChanged(_)));
                let turn = game.turn();
                prop_assert_eq!(announced, turn % interval == 0);
                prop_assert_eq!(game.last_gravity_change().is_some(), announced);
                if !announced {
                    prop_assert_eq!(game.gravity(), before);
                }
            }
        }
    }

    #[test]
    fn prop_outcomes_are_consistent(
        schedule in schedule_strategy(),
        seed in any::<u64>(),
        lines in prop::collection::vec(0usize..7, 0..150),
    ) {
        let mut game = Game::seeded(schedule, seed);
        for line in lines {
            let _ = game.drop_at(line);
        }

        match game.status() {
            GameStatus::InProgress => {
                prop_assert!(!game.board().is_full());
                prop_assert!(!game.legal_lines().is_empty());
            }
            GameStatus::Drawn => prop_assert!(game.board().is_full()),
            GameStatus::Won(win) => {
                prop_assert_eq!(win.player, game.current_player());
                assert_valid_win_line(game.state());
            }
        }
    }

    #[test]
    fn prop_reset_always_yields_initial_state(
        schedule in schedule_strategy(),
        seed in any::<u64>(),
        lines in prop::collection::vec(0usize..7, 0..150),
    ) {
        let mut game = Game::seeded(schedule, seed);
        for line in lines {
            let _ = game.drop_at(line);
        }

        game.reset();
        prop_assert_eq!(game.state(), &GameState::new(schedule));
        game.reset();
        prop_assert_eq!(game.state(), &GameState::new(schedule));
    }
}

#[test]
fn classic_game_never_leaves_downward_gravity() {
    let mut game = Game::seeded(GravitySchedule::classic(), 0);
    while !game.is_terminal() {
        let line = game.legal_lines()[0];
        game.drop_at(line).unwrap();
        assert_eq!(game.gravity(), gravity_four::game::Gravity::Down);
    }
    assert_eq!(game.turn() as usize, game.board().piece_count());
}

#[test]
fn first_player_is_red() {
    let game = Game::seeded(GravitySchedule::default(), 0);
    assert_eq!(game.current_player(), Player::Red);
    assert_eq!(game.current_player().number(), 1);
}
