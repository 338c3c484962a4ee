use super::{
    action::Direction,
    config::GameConfig,
    state::{GameOverReason, GameState, Phase, Position, Snake},
};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use tracing::{debug, info};

/// Random samples tried before falling back to scanning for free tiles
const FOOD_SAMPLE_ATTEMPTS: usize = 64;

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Set when this tick ended the game
    pub game_over: Option<GameOverReason>,
}

impl TickOutcome {
    pub fn terminated(&self) -> bool {
        self.game_over.is_some()
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build a fresh game: centred snake heading right, food on a free tile
    pub fn init(&mut self) -> GameState {
        let tile_count = self.config.tile_count();
        let center = (tile_count / 2) as i32;

        let snake = Snake::new(
            Position::new(center, center),
            Direction::Right,
            self.config.initial_snake_length,
        );

        // A valid config always leaves free tiles around the starting snake.
        let food = self
            .generate_food(&snake)
            .unwrap_or(Position::new(0, 0));

        info!(tile_count, food_x = food.x, food_y = food.y, "game started");
        GameState::new(snake, food, tile_count)
    }

    /// Advance the game by one step
    pub fn tick(&mut self, state: &mut GameState) -> TickOutcome {
        if !state.is_running() {
            return TickOutcome::default();
        }

        if let Some(direction) = state.snake.pending_direction.take() {
            state.snake.direction = direction;
        }

        let new_head = state.snake.head().moved_in_direction(state.snake.direction);
        let ate_food = new_head == state.food;

        state.snake.advance(new_head, ate_food);
        state.steps += 1;

        if let Some(reason) = state.collision() {
            self.end_game(state, reason);
            return TickOutcome {
                ate_food: false,
                game_over: Some(reason),
            };
        }

        if ate_food {
            state.score = state.score.saturating_add(self.config.food_reward);
            debug!(score = state.score, length = state.snake.len(), "food eaten");

            match self.generate_food(&state.snake) {
                Some(food) => state.food = food,
                None => {
                    self.end_game(state, GameOverReason::BoardFull);
                    return TickOutcome {
                        ate_food: true,
                        game_over: Some(GameOverReason::BoardFull),
                    };
                }
            }
        }

        TickOutcome {
            ate_food,
            game_over: None,
        }
    }

    /// Pick a random tile not covered by the snake, `None` if the board is full
    pub fn generate_food(&mut self, snake: &Snake) -> Option<Position> {
        let tile_count = self.config.tile_count();
        if tile_count == 0 {
            return None;
        }

        for _ in 0..FOOD_SAMPLE_ATTEMPTS {
            let x = self.rng.gen_range(0..tile_count) as i32;
            let y = self.rng.gen_range(0..tile_count) as i32;
            let pos = Position::new(x, y);

            if !snake.occupies(pos) {
                return Some(pos);
            }
        }

        // Crowded board: choose directly among the free tiles.
        let free: Vec<Position> = (0..tile_count as i32)
            .flat_map(|y| (0..tile_count as i32).map(move |x| Position::new(x, y)))
            .filter(|pos| !snake.occupies(*pos))
            .collect();

        free.choose(&mut self.rng).copied()
    }

    /// Stop the game and hand back the final score
    pub fn end_game(&self, state: &mut GameState, reason: GameOverReason) -> u32 {
        state.phase = Phase::GameOver;
        state.game_over_reason = Some(reason);
        info!(?reason, score = state.score, steps = state.steps, "game over");
        state.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> GameEngine {
        GameEngine::with_seed(GameConfig::default(), 7)
    }

    /// Default 20x20 game with the food moved somewhere harmless
    fn state_with_food(engine: &mut GameEngine, food: Position) -> GameState {
        let mut state = engine.init();
        state.food = food;
        state
    }

    #[test]
    fn test_init() {
        let mut engine = engine();
        let state = engine.init();

        assert!(state.is_running());
        assert_eq!(state.score, 0);
        assert_eq!(state.steps, 0);
        assert_eq!(state.snake.direction, Direction::Right);
        assert_eq!(
            state.snake.body,
            vec![
                Position::new(10, 10),
                Position::new(9, 10),
                Position::new(8, 10)
            ]
        );
        assert!(!state.snake.occupies(state.food));
        assert!(state.is_in_bounds(state.food));
    }

    #[test]
    fn test_move_without_food() {
        let mut engine = engine();
        let mut state = state_with_food(&mut engine, Position::new(0, 0));

        let outcome = engine.tick(&mut state);

        assert_eq!(outcome, TickOutcome::default());
        assert_eq!(
            state.snake.body,
            vec![
                Position::new(11, 10),
                Position::new(10, 10),
                Position::new(9, 10)
            ]
        );
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = engine();
        let mut state = state_with_food(&mut engine, Position::new(11, 10));

        let outcome = engine.tick(&mut state);

        assert!(outcome.ate_food);
        assert!(!outcome.terminated());
        assert_eq!(
            state.snake.body,
            vec![
                Position::new(11, 10),
                Position::new(10, 10),
                Position::new(9, 10),
                Position::new(8, 10)
            ]
        );
        assert_eq!(state.score, 10);
        assert!(!state.snake.occupies(state.food));
    }

    #[test]
    fn test_length_invariant_over_many_ticks() {
        let mut engine = engine();
        let mut state = state_with_food(&mut engine, Position::new(0, 0));

        for _ in 0..5 {
            let tail = *state.snake.body.last().unwrap();
            engine.tick(&mut state);
            assert_eq!(state.snake.len(), 3);
            assert!(!state.snake.occupies(tail));
        }
    }

    #[test]
    fn test_direction_applies_on_next_tick() {
        let mut engine = engine();
        let mut state = state_with_food(&mut engine, Position::new(0, 0));

        assert!(state.set_direction(Direction::Up));
        assert_eq!(state.snake.direction, Direction::Right);

        engine.tick(&mut state);
        assert_eq!(state.snake.direction, Direction::Up);
        assert_eq!(state.snake.head(), Position::new(10, 9));
    }

    #[test]
    fn test_newest_request_wins() {
        let mut engine = engine();
        let mut state = state_with_food(&mut engine, Position::new(0, 0));

        state.set_direction(Direction::Up);
        state.set_direction(Direction::Down);
        engine.tick(&mut state);

        assert_eq!(state.snake.head(), Position::new(10, 11));
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = engine();
        let mut state = state_with_food(&mut engine, Position::new(0, 0));

        assert!(!state.set_direction(Direction::Left));
        engine.tick(&mut state);

        assert_eq!(state.snake.direction, Direction::Right);
        assert!(state.is_running());
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 1);
        let mut state = GameState::new(
            Snake::new(Position::new(0, 5), Direction::Left, 3),
            Position::new(5, 5),
            10,
        );

        let outcome = engine.tick(&mut state);

        assert_eq!(outcome.game_over, Some(GameOverReason::Wall));
        assert_eq!(state.phase, Phase::GameOver);
        assert_eq!(state.game_over_reason, Some(GameOverReason::Wall));
    }

    #[test]
    fn test_wall_collision_on_far_edges() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 1);
        let mut state = GameState::new(
            Snake::new(Position::new(9, 9), Direction::Down, 1),
            Position::new(0, 0),
            10,
        );

        assert!(engine.tick(&mut state).terminated());
    }

    #[test]
    fn test_self_collision() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 1);

        // Body: (5,5), (4,5), (3,5), (2,5), (1,5)
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 5);
        let mut state = GameState::new(snake, Position::new(8, 8), 10);

        // Down: (5,6), (5,5), (4,5), (3,5), (2,5)
        state.set_direction(Direction::Down);
        engine.tick(&mut state);
        // Left: (4,6), (5,6), (5,5), (4,5), (3,5)
        state.set_direction(Direction::Left);
        engine.tick(&mut state);
        // Up: (4,5) is still body
        state.set_direction(Direction::Up);
        let outcome = engine.tick(&mut state);

        assert_eq!(outcome.game_over, Some(GameOverReason::SelfCollision));
    }

    #[test]
    fn test_moving_into_vacated_tail_is_legal() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 1);

        // A 2x2 loop: the head chases the tail around
        let mut snake = Snake::new(Position::new(5, 5), Direction::Up, 1);
        snake.body = vec![
            Position::new(5, 5),
            Position::new(6, 5),
            Position::new(6, 6),
            Position::new(5, 6),
        ];
        snake.direction = Direction::Left;
        let mut state = GameState::new(snake, Position::new(0, 0), 10);

        // Down from (5,5) lands on (5,6), which the tail leaves this tick
        state.set_direction(Direction::Down);
        let outcome = engine.tick(&mut state);

        assert!(!outcome.terminated());
        assert_eq!(state.snake.head(), Position::new(5, 6));
        assert_eq!(state.snake.len(), 4);
    }

    #[test]
    fn test_score_saturates() {
        let mut config = GameConfig::default();
        config.food_reward = u32::MAX;
        let mut engine = GameEngine::with_seed(config, 5);
        let mut state = engine.init();
        state.score = 10;
        state.food = Position::new(11, 10);

        let outcome = engine.tick(&mut state);

        assert!(outcome.ate_food);
        assert_eq!(state.score, u32::MAX);
    }

    #[test]
    fn test_terminated_game_no_update() {
        let mut engine = engine();
        let mut state = engine.init();
        state.phase = Phase::GameOver;
        let before = state.clone();

        let outcome = engine.tick(&mut state);

        assert_eq!(outcome, TickOutcome::default());
        assert_eq!(state, before);
    }

    #[test]
    fn test_generate_food_on_crowded_board() {
        let config = GameConfig::new(60, 20);
        let mut engine = GameEngine::with_seed(config, 3);

        let mut snake = Snake::new(Position::new(0, 0), Direction::Right, 1);
        snake.body = (0..3)
            .flat_map(|y| (0..3).map(move |x| Position::new(x, y)))
            .filter(|pos| *pos != Position::new(2, 1))
            .collect();

        assert_eq!(engine.generate_food(&snake), Some(Position::new(2, 1)));

        snake.body.push(Position::new(2, 1));
        assert_eq!(engine.generate_food(&snake), None);
    }

    #[test]
    fn test_board_full_ends_game() {
        let config = GameConfig::new(40, 20);
        let mut engine = GameEngine::with_seed(config, 3);

        let mut snake = Snake::new(Position::new(1, 1), Direction::Up, 1);
        snake.body = vec![Position::new(1, 1), Position::new(1, 0), Position::new(0, 0)];
        snake.direction = Direction::Left;
        let mut state = GameState::new(snake, Position::new(0, 1), 2);

        let outcome = engine.tick(&mut state);

        assert!(outcome.ate_food);
        assert_eq!(outcome.game_over, Some(GameOverReason::BoardFull));
        assert_eq!(state.score, 10);
        assert_eq!(state.snake.len(), 4);
        assert_eq!(state.phase, Phase::GameOver);
    }

    #[test]
    fn test_fresh_game_after_game_over() {
        let mut engine = engine();
        let mut state = engine.init();
        state.score = 50;
        engine.end_game(&mut state, GameOverReason::Wall);

        let state = engine.init();

        assert!(state.is_running());
        assert_eq!(state.score, 0);
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.game_over_reason, None);
    }
}
