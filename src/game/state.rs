use super::direction::Direction;

/// A cell on the game grid
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

/// The snake's body, head at index 0
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: Vec<Position>,
}

impl Snake {
    /// A one-cell snake
    pub fn new(head: Position) -> Self {
        Self { body: vec![head] }
    }

    /// Build a snake from explicit cells, head first.
    ///
    /// Returns `None` for an empty list.
    pub fn from_cells(cells: Vec<Position>) -> Option<Self> {
        if cells.is_empty() {
            None
        } else {
            Some(Self { body: cells })
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// All cells, head first
    pub fn cells(&self) -> &[Position] {
        &self.body
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Push a new head one step in `direction` and drop the tail.
    ///
    /// The length is unchanged. Returns the new head.
    pub fn advance(&mut self, direction: Direction) -> Position {
        let new_head = self.head().moved_in_direction(direction);
        self.body.insert(0, new_head);

        if self.body.len() > 1 {
            self.body.pop();
        }

        new_head
    }

    /// Add a segment after the current tail
    pub fn append(&mut self, pos: Position) {
        self.body.push(pos);
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Coarse status of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    GameOver,
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the grid
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Complete game state, owned by the host and mutated by the engine
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub direction: Direction,
    pub food: Position,
    pub grid_width: i32,
    pub grid_height: i32,
    pub score: u32,
    pub ticks: u32,
    pub phase: Phase,
}

impl GameState {
    /// Create a running state heading right with a zero score
    pub fn new(snake: Snake, food: Position, grid_width: i32, grid_height: i32) -> Self {
        Self {
            snake,
            direction: Direction::Right,
            food,
            grid_width,
            grid_height,
            score: 0,
            ticks: 0,
            phase: Phase::Running,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.grid_width && pos.y >= 0 && pos.y < self.grid_height
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Read-only copy for renderers
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.cells().to_vec(),
            food: self.food,
            score: self.score,
            ticks: self.ticks,
            phase: self.phase,
            grid_width: self.grid_width,
            grid_height: self.grid_height,
        }
    }
}

/// What a render collaborator needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Snake cells, head first
    pub snake: Vec<Position>,
    pub food: Position,
    pub score: u32,
    pub ticks: u32,
    pub phase: Phase,
    pub grid_width: i32,
    pub grid_height: i32,
}

impl Snapshot {
    pub fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }
}
