use super::{
    action::Direction,
    config::GameConfig,
    food::spawn_food,
    state::{CollisionType, GameState, Phase, Position, Snake},
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, info};

/// What a single tick did to the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Head advanced, tail followed
    Moved,
    /// Head landed on food and the snake grew
    Ate,
    /// Wall or self collision; the state is now `Dead`
    Died(CollisionType),
    /// The snake filled the board; the state is now `Won`
    Won,
    /// Not running; nothing changed
    Idle(Phase),
}

impl TickOutcome {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TickOutcome::Died(_) | TickOutcome::Won)
    }
}

/// The game engine that owns the rules and the food RNG
pub struct GameEngine<R: Rng = StdRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create an engine, seeding from the config when a seed is set
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build a fresh game: centred snake heading right, score 0, running
    pub fn reset(&mut self) -> GameState {
        let center = (self.config.grid_size / 2) as i32;
        let snake = Snake::new(
            Position::new(center, center),
            Direction::Right,
            self.config.initial_snake_length,
        );

        let mut state = GameState::new(
            snake,
            Direction::Right,
            Position::new(0, 0),
            self.config.grid_size,
        );
        state.food = spawn_food(&mut self.rng, self.config.grid_size, &state.snake);
        if state.food.is_none() {
            state.phase = Phase::Won;
        }

        info!(grid_size = self.config.grid_size, food = ?state.food, "game reset");
        state
    }

    /// Advance the state by one cell.
    ///
    /// Only a `Running` state changes; anything else comes back untouched with
    /// `TickOutcome::Idle`.
    pub fn tick(&mut self, mut state: GameState) -> (GameState, TickOutcome) {
        if state.phase != Phase::Running {
            let phase = state.phase;
            return (state, TickOutcome::Idle(phase));
        }

        let new_head = state.snake.head().moved_in_direction(state.direction);

        if let Some(collision) = Self::check_collision(&state, new_head) {
            state.phase = Phase::Dead(collision);
            state.steps += 1;
            info!(?collision, score = state.score, steps = state.steps, "snake died");
            return (state, TickOutcome::Died(collision));
        }

        let ate_food = state.food == Some(new_head);
        state.snake.advance(new_head, ate_food);
        state.steps += 1;

        if !ate_food {
            return (state, TickOutcome::Moved);
        }

        state.score += 1;
        state.food = spawn_food(&mut self.rng, state.grid_size, &state.snake);
        debug!(score = state.score, food = ?state.food, "food eaten");

        match state.food {
            Some(_) => (state, TickOutcome::Ate),
            None => {
                state.phase = Phase::Won;
                info!(score = state.score, steps = state.steps, "board filled");
                (state, TickOutcome::Won)
            }
        }
    }

    /// The tail has not moved yet when this runs, so it counts as occupied
    fn check_collision(state: &GameState, pos: Position) -> Option<CollisionType> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if state.is_occupied_by_snake(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }
}

impl GameState {
    /// Change heading immediately, unless it is a straight reversal.
    ///
    /// Returns whether the new direction was taken. Turns made while paused
    /// take effect on the first tick after resuming.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if self.direction.is_opposite(direction) {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Flip between `Running` and `Paused`; terminal phases stay put
    pub fn toggle_pause(&mut self) -> Phase {
        self.phase = match self.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            terminal => terminal,
        };
        self.phase
    }
}
