use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Direction applied on the last tick
    pub direction: Direction,
    /// Turn requested since the last tick, applied on the next one
    pub pending_direction: Option<Direction>,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        // Add initial body segments behind the head
        let (dx, dy) = direction.delta();
        let (back_dx, back_dy) = (-dx, -dy);

        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(back_dx, back_dy));
        }

        Self {
            body,
            direction,
            pending_direction: None,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Check if any segment, head included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Queue a turn for the next tick. Reversing onto the neck is refused.
    pub fn request_direction(&mut self, requested: Direction) -> bool {
        if self.direction.is_opposite(requested) {
            return false;
        }
        self.pending_direction = Some(requested);
        true
    }

    /// Push a new head, dropping the tail unless the snake grows
    pub fn advance(&mut self, new_head: Position, should_grow: bool) {
        if !should_grow {
            self.body.pop();
        }
        self.body.insert(0, new_head);
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    /// Snake left the board
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// Snake covers every tile, no room left for food
    BoardFull,
}

/// Lifecycle of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Running,
    GameOver,
}

/// Complete state of one game
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    /// Tiles along each side of the square board
    pub tile_count: usize,
    pub score: u32,
    pub steps: u32,
    pub phase: Phase,
    pub game_over_reason: Option<GameOverReason>,
}

impl GameState {
    /// Create a running game state
    pub fn new(snake: Snake, food: Position, tile_count: usize) -> Self {
        Self {
            snake,
            food,
            tile_count,
            score: 0,
            steps: 0,
            phase: Phase::Running,
            game_over_reason: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        let limit = self.tile_count as i32;
        pos.x >= 0 && pos.x < limit && pos.y >= 0 && pos.y < limit
    }

    /// Head outside the board, or on any later segment
    pub fn is_game_over(&self) -> bool {
        self.collision().is_some()
    }

    pub(crate) fn collision(&self) -> Option<GameOverReason> {
        let head = self.snake.head();
        if !self.is_in_bounds(head) {
            return Some(GameOverReason::Wall);
        }
        if self.snake.collides_with_body(head) {
            return Some(GameOverReason::SelfCollision);
        }
        None
    }

    /// Ask the snake to turn; ignored once the game is over
    pub fn set_direction(&mut self, requested: Direction) -> bool {
        if !self.is_running() {
            return false;
        }
        self.snake.request_direction(requested)
    }
}
