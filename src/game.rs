use std::time::Instant;

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{Config, GameOverRecovery, GridSize};
use crate::engine::{self, TickOutcome};
use crate::error::Result;
use crate::figure::Figure;
use crate::grid::{CellColor, Grid};
use crate::input::{Action, PendingAction, Viewport};
use crate::render::RenderSnapshot;
use crate::scheduler::TimerDeps;

/// Complete board state for one session.
///
/// Transitions consume the state and return the next one.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Stored board; holds food only.
    pub field: Grid,
    pub figure: Figure,
    pub score: u32,
    pub speed: u32,
    pub pause: bool,
    pub game_over: bool,
    /// When the figure last moved.
    pub last_tick: Instant,
    pub(crate) rng: StdRng,
}

impl GameState {
    /// Creates a fresh board with the default figure and `initial_food` food
    /// items, drawn from an RNG seeded with `seed`.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, initial_food: usize, seed: u64, now: Instant) -> Self {
        Self::fresh(bounds, initial_food, StdRng::seed_from_u64(seed), now)
    }

    fn fresh(bounds: GridSize, initial_food: usize, mut rng: StdRng, now: Instant) -> Self {
        let figure = Figure::new(bounds).colored(CellColor::Head, CellColor::Body);
        let field =
            Grid::empty(bounds.rows, bounds.cols).with_food(&figure, initial_food, &mut rng);

        Self {
            field,
            figure,
            score: 0,
            speed: 1,
            pause: false,
            game_over: false,
            last_tick: now,
            rng,
        }
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.field.size()
    }
}

/// Session controller: board state, buffered input and the constants they run on.
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    pending: PendingAction,
    config: Config,
}

impl Game {
    /// Starts a session from `config`, seeding from entropy unless it pins a seed.
    #[must_use]
    pub fn new(config: Config, now: Instant) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let state = GameState::fresh(config.bounds(), config.initial_food, rng, now);

        Self::from_state(state, config)
    }

    /// Wraps an existing state, for tests and scripted scenarios.
    #[must_use]
    pub fn from_state(state: GameState, config: Config) -> Self {
        Self {
            state,
            pending: PendingAction::default(),
            config,
        }
    }

    /// Replaces the buffered input, for tests and scripted scenarios.
    #[must_use]
    pub fn with_pending(mut self, pending: PendingAction) -> Self {
        self.pending = pending;
        self
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn pending(&self) -> PendingAction {
        self.pending
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Applies one player action.
    ///
    /// Moves go through the axis-lock. `Pause` toggles pause and clears a game
    /// over; under [`GameOverRecovery::Restart`] clearing instead starts a fresh,
    /// running board.
    #[must_use]
    pub fn handle(mut self, action: Action, now: Instant) -> Self {
        if action != Action::Pause {
            self.pending.buffer(action);
            return self;
        }

        let GameState {
            pause, game_over, ..
        } = self.state;

        if game_over && self.config.game_over_recovery == GameOverRecovery::Restart {
            info!("restarting after game over with score {}", self.state.score);
            let rng = self.state.rng;
            let bounds = self.config.bounds();
            self.state = GameState::fresh(bounds, self.config.initial_food, rng, now);
            self.pending = PendingAction::default();
            return self;
        }

        self.state = GameState {
            pause: !pause,
            game_over: false,
            ..self.state
        };
        self
    }

    /// Runs one timer fire: promotes the buffered direction and ticks.
    #[must_use]
    pub fn on_timer(mut self, now: Instant) -> (Self, TickOutcome) {
        if self.is_idle() {
            return (self, TickOutcome::Idle);
        }

        let applied = self.pending.promote();
        let Some((dx, dy)) = applied.delta() else {
            return (self, TickOutcome::Idle);
        };

        let (state, outcome) = engine::tick(self.state, dx, dy, now);
        self.state = state;
        (self, outcome)
    }

    /// True while the timer has nothing to advance.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state.pause || self.state.game_over
    }

    /// Values the tick timer is armed against.
    #[must_use]
    pub fn timer_deps(&self) -> TimerDeps {
        TimerDeps {
            current: self.pending.current,
            next: self.pending.next,
            speed: self.state.speed,
            last_tick: self.state.last_tick,
        }
    }

    /// Builds the presentation snapshot for `viewport`.
    pub fn snapshot(&self, viewport: Viewport) -> Result<RenderSnapshot> {
        RenderSnapshot::new(&self.state, viewport)
    }
}
