//! Pure movement rules and the single-tick state machine.

use std::time::Instant;

use log::{debug, info};

use crate::config::{GridSize, POINTS_PER_SPEED_LEVEL, REPLACEMENT_FOOD};
use crate::figure::Figure;
use crate::game::GameState;
use crate::grid::Grid;

/// What one tick did to the state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// Paused or already over; nothing changed.
    Idle,
    Moved,
    Ate,
    Collided,
}

/// Returns whether `new` is a legal successor of `old` on a board of `bounds`.
///
/// Every segment must lie on the board, the head must have travelled one
/// cardinal step, and the head must not overlap the rest of the new body.
/// Only the post-move body counts, so stepping into the cell the tail leaves
/// on this tick is allowed.
#[must_use]
pub fn is_valid_position(old: &Figure, new: &Figure, bounds: GridSize) -> bool {
    if !new
        .segments()
        .iter()
        .all(|segment| segment.is_within_bounds(bounds))
    {
        return false;
    }

    if !new.head().is_adjacent_to(old.head()) {
        return false;
    }

    !new.head_overlaps_body()
}

/// Returns true when the head of `figure` sits on food in `grid`.
#[must_use]
pub fn is_food(figure: &Figure, grid: &Grid) -> bool {
    grid.is_food(figure.head())
}

/// Speed level for a score: `max(1, ceil(score / 10))`.
#[must_use]
pub fn speed_for_score(score: u32) -> u32 {
    score.div_ceil(POINTS_PER_SPEED_LEVEL).max(1)
}

/// Advances `state` by one step of `(dx, dy)` at time `now`.
#[must_use]
pub fn tick(state: GameState, dx: i32, dy: i32, now: Instant) -> (GameState, TickOutcome) {
    if state.pause || state.game_over {
        return (state, TickOutcome::Idle);
    }

    let candidate = state.figure.moved(dx, dy, &state.field);

    if !is_valid_position(&state.figure, &candidate, state.field.size()) {
        info!(
            "game over at head ({}, {}) with score {}",
            candidate.head().x,
            candidate.head().y,
            state.score
        );
        return (
            GameState {
                game_over: true,
                ..state
            },
            TickOutcome::Collided,
        );
    }

    if !is_food(&candidate, &state.field) {
        return (
            GameState {
                figure: candidate,
                last_tick: now,
                ..state
            },
            TickOutcome::Moved,
        );
    }

    let GameState {
        field,
        score,
        speed,
        mut rng,
        ..
    } = state;

    let field = field
        .cleared(candidate.head())
        .with_food(&candidate, REPLACEMENT_FOOD, &mut rng);
    let score = score + 1;
    let next_speed = speed_for_score(score);
    if next_speed != speed {
        debug!("speed {speed} -> {next_speed} at score {score}");
    }

    (
        GameState {
            field,
            figure: candidate,
            score,
            speed: next_speed,
            pause: false,
            game_over: false,
            last_tick: now,
            rng,
        },
        TickOutcome::Ate,
    )
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crate::config::GridSize;
    use crate::figure::{Figure, Position};
    use crate::game::GameState;
    use crate::grid::Grid;

    use super::{is_food, is_valid_position, speed_for_score, tick, TickOutcome};

    const BOUNDS: GridSize = GridSize { rows: 10, cols: 10 };

    fn figure(segments: &[(i32, i32)]) -> Figure {
        Figure::from_segments(segments.iter().map(|&(x, y)| Position::new(x, y)).collect())
            .expect("test figure should be non-empty")
    }

    fn state_with(figure: Figure, field: Grid) -> GameState {
        let mut state = GameState::new_with_seed(BOUNDS, 0, 9, Instant::now());
        state.figure = figure;
        state.field = field;
        state
    }

    #[test]
    fn off_grid_heads_are_invalid() {
        let grid = Grid::empty(10, 10);
        let corner = figure(&[(0, 0)]);
        let far_corner = figure(&[(9, 9)]);

        let steps = [
            (&corner, -1, 0),
            (&corner, 0, -1),
            (&far_corner, 1, 0),
            (&far_corner, 0, 1),
        ];
        for (old, dx, dy) in steps {
            let new = old.moved(dx, dy, &grid);
            assert!(!is_valid_position(old, &new, BOUNDS));
        }

        let inside = corner.moved(1, 0, &grid);
        assert!(is_valid_position(&corner, &inside, BOUNDS));
    }

    #[test]
    fn moving_into_second_segment_is_invalid() {
        let grid = Grid::empty(10, 10);
        let old = figure(&[(5, 5), (6, 5), (7, 5)]);

        let reversed = old.moved(1, 0, &grid);

        assert!(!is_valid_position(&old, &reversed, BOUNDS));
    }

    #[test]
    fn chasing_the_tail_is_valid() {
        let grid = Grid::empty(10, 10);
        // A 2x2 loop: head at (1,1), tail at (1,2) just below it.
        let old = figure(&[(1, 1), (2, 1), (2, 2), (1, 2)]);

        let new = old.moved(0, 1, &grid);

        assert_eq!(new.head(), Position::new(1, 2));
        assert!(is_valid_position(&old, &new, BOUNDS));
    }

    #[test]
    fn chasing_the_tail_while_growing_is_invalid() {
        let grid = Grid::empty(10, 10).with_food_at(Position::new(1, 2));
        let old = figure(&[(1, 1), (2, 1), (2, 2), (1, 2)]);

        let new = old.moved(0, 1, &grid);

        assert!(!is_valid_position(&old, &new, BOUNDS));
    }

    #[test]
    fn jumps_are_invalid() {
        let grid = Grid::empty(10, 10);
        let old = figure(&[(3, 3)]);

        let new = old.moved(2, 0, &grid);

        assert!(!is_valid_position(&old, &new, BOUNDS));
    }

    #[test]
    fn food_is_detected_under_the_head() {
        let grid = Grid::empty(10, 10).with_food_at(Position::new(4, 4));

        assert!(is_food(&figure(&[(4, 4), (5, 4)]), &grid));
        assert!(!is_food(&figure(&[(5, 4), (4, 4)]), &grid));
    }

    #[test]
    fn speed_scales_with_score() {
        assert_eq!(speed_for_score(0), 1);
        assert_eq!(speed_for_score(1), 1);
        assert_eq!(speed_for_score(10), 1);
        assert_eq!(speed_for_score(11), 2);
        assert_eq!(speed_for_score(20), 2);
        assert_eq!(speed_for_score(21), 3);
    }

    #[test]
    fn paused_tick_changes_nothing() {
        let mut state = state_with(figure(&[(5, 5)]), Grid::empty(10, 10));
        state.pause = true;
        let before = state.clone();

        let (after, outcome) = tick(state, 1, 0, Instant::now());

        assert_eq!(outcome, TickOutcome::Idle);
        assert_eq!(after.figure, before.figure);
        assert_eq!(after.last_tick, before.last_tick);
    }

    #[test]
    fn plain_move_resets_tick_time_only() {
        let state = state_with(figure(&[(5, 5), (6, 5)]), Grid::empty(10, 10));
        let now = state.last_tick + Duration::from_millis(300);

        let (after, outcome) = tick(state, -1, 0, now);

        assert_eq!(outcome, TickOutcome::Moved);
        assert_eq!(after.figure.head(), Position::new(4, 5));
        assert_eq!(after.figure.len(), 2);
        assert_eq!(after.score, 0);
        assert_eq!(after.last_tick, now);
    }

    #[test]
    fn collision_freezes_everything_but_game_over() {
        let state = state_with(figure(&[(0, 0)]), Grid::empty(10, 10));
        let before = state.clone();

        let (after, outcome) = tick(state, 0, -1, before.last_tick + Duration::from_secs(1));

        assert_eq!(outcome, TickOutcome::Collided);
        assert!(after.game_over);
        assert_eq!(after.figure, before.figure);
        assert_eq!(after.field, before.field);
        assert_eq!(after.last_tick, before.last_tick);

        let (again, outcome) = tick(after, 1, 0, Instant::now());
        assert_eq!(outcome, TickOutcome::Idle);
        assert_eq!(again.figure, before.figure);
    }

    #[test]
    fn eating_grows_scores_and_replaces_food() {
        let food = Position::new(6, 5);
        let state = state_with(figure(&[(5, 5)]), Grid::empty(10, 10).with_food_at(food));

        let (after, outcome) = tick(state, 1, 0, Instant::now());

        assert_eq!(outcome, TickOutcome::Ate);
        assert_eq!(after.figure.head(), food);
        assert_eq!(after.figure.len(), 2);
        assert_eq!(after.score, 1);
        assert_eq!(after.speed, 1);
        assert_eq!(after.field.food_count(), 1);
        assert!(!after.field.is_food(food));
        for position in after.field.food_positions() {
            assert!(!after.figure.occupies(position));
        }
    }

    #[test]
    fn eleventh_meal_raises_speed() {
        let food = Position::new(6, 5);
        let mut state = state_with(figure(&[(5, 5)]), Grid::empty(10, 10).with_food_at(food));
        state.score = 10;

        let (after, _) = tick(state, 1, 0, Instant::now());

        assert_eq!(after.score, 11);
        assert_eq!(after.speed, 2);
    }
}
