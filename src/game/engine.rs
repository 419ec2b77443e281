use log::{debug, info};

use super::{
    config::GameConfig,
    direction::Direction,
    food::{FoodPlacer, RandomFood},
    state::{CollisionType, GameState, Phase, Snake},
};

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInfo {
    /// False when the tick was ignored because the round is over
    pub moved: bool,
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// The head left the grid
    pub hit_wall: bool,
    /// The head landed on the body
    pub hit_self: bool,
}

impl TickInfo {
    /// The collision that ended the round, wall first when both happened
    pub fn collision(&self) -> Option<CollisionType> {
        if self.hit_wall {
            Some(CollisionType::Wall)
        } else if self.hit_self {
            Some(CollisionType::SelfCollision)
        } else {
            None
        }
    }
}

/// The game engine that handles all game logic
///
/// The engine holds no game state of its own: every operation takes the
/// host's `GameState` by reference, so several rounds can run side by side.
pub struct GameEngine<F: FoodPlacer = RandomFood> {
    config: GameConfig,
    food: F,
}

impl GameEngine<RandomFood> {
    /// Create a new game engine with random food placement,
    /// reproducible when the configuration carries a seed
    pub fn new(config: GameConfig) -> Self {
        let food = match config.seed {
            Some(seed) => RandomFood::seeded(seed),
            None => RandomFood::from_entropy(),
        };
        Self::with_food_placer(config, food)
    }
}

impl<F: FoodPlacer> GameEngine<F> {
    pub fn with_food_placer(config: GameConfig, food: F) -> Self {
        Self { config, food }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// A fresh round: one-cell snake at the start cell heading right
    pub fn init(&mut self) -> GameState {
        let grid_width = self.config.grid_width();
        let grid_height = self.config.grid_height();

        let snake = Snake::new(self.config.start());
        let food = self.food.place(grid_width, grid_height);

        GameState::new(snake, food, grid_width, grid_height)
    }

    /// Reset the game to initial state. Valid from any phase.
    pub fn reset(&mut self, state: &mut GameState) {
        *state = self.init();
        info!("game reset, food at ({}, {})", state.food.x, state.food.y);
    }

    /// Store `requested` unless it would reverse the snake onto itself
    pub fn set_direction(&self, state: &mut GameState, requested: Direction) {
        if state.direction.is_opposite(requested) {
            debug!(
                "ignoring reversal from {:?} to {:?}",
                state.direction, requested
            );
            return;
        }
        state.direction = requested;
    }

    /// Advance the round by one step. A no-op once the game is over.
    ///
    /// Order: move, eat, wall check, body check. Both checks always run.
    pub fn tick(&mut self, state: &mut GameState) -> TickInfo {
        if state.phase == Phase::GameOver {
            return TickInfo::default();
        }

        let mut info = TickInfo {
            moved: true,
            ..Default::default()
        };

        let head = state.snake.advance(state.direction);

        if head == state.food {
            // The new segment goes right behind the head, not at the old tail.
            let segment = head.moved_in_direction(state.direction.opposite());
            state.snake.append(segment);
            state.food = self.food.place(state.grid_width, state.grid_height);
            state.score += 1;
            info.ate_food = true;
            debug!(
                "food eaten at ({}, {}), score {}, next food at ({}, {})",
                head.x, head.y, state.score, state.food.x, state.food.y
            );
        }

        if !state.is_in_bounds(head) {
            state.phase = Phase::GameOver;
            info.hit_wall = true;
        }

        if state.snake.len() > 1 && state.snake.collides_with_body(head) {
            state.phase = Phase::GameOver;
            info.hit_self = true;
        }

        state.ticks += 1;

        if let Some(collision) = info.collision() {
            info!(
                "game over after {} ticks: {:?} at ({}, {}), score {}",
                state.ticks, collision, head.x, head.y, state.score
            );
        }

        info
    }
}
