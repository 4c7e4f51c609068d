use super::{action::Direction, config, grid::Grid};

/// A point on the playfield, in field units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
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

    /// Axis-aligned overlap of two squares with open intervals on both axes
    pub fn overlaps(&self, size: i32, other: Position, other_size: i32) -> bool {
        self.x < other.x + other_size
            && self.x + size > other.x
            && self.y < other.y + other_size
            && self.y + size > other.y
    }
}

/// Visual tag of a snake segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentTag {
    Head,
    Body,
}

/// One square of the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub position: Position,
    pub size: i32,
    pub tag: SegmentTag,
}

/// The snake as a fixed arena of segments.
///
/// All `capacity` slots are allocated up front; only the first `len` are
/// live. The trail buffer holds every segment's position from before the
/// current tick and drives the follow-the-leader update.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    segments: Vec<Segment>,
    trail: Vec<Position>,
    len: usize,
    /// Head movement per step in field units; zero until the first steer
    pub velocity: (i32, i32),
}

impl Snake {
    /// Create a one-segment, motionless snake
    pub fn new(head: Position, size: i32, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut segments = vec![
            Segment {
                position: head,
                size,
                tag: SegmentTag::Body,
            };
            capacity
        ];
        segments[0].tag = SegmentTag::Head;

        Self {
            segments,
            trail: vec![Position::default(); capacity],
            len: 1,
            velocity: (0, 0),
        }
    }

    /// Create a snake whose live segments sit on `body`, head first.
    ///
    /// Positions past `capacity` are dropped.
    pub fn with_body(body: &[Position], size: i32, capacity: usize) -> Self {
        let head = body.first().copied().unwrap_or_default();
        let mut snake = Self::new(head, size, capacity);
        let len = body.len().clamp(1, snake.capacity());
        for (segment, &pos) in snake.segments.iter_mut().zip(body) {
            segment.position = pos;
        }
        snake.len = len;
        snake
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.segments[0].position
    }

    pub fn set_head(&mut self, pos: Position) {
        self.segments[0].position = pos;
    }

    /// Get the tail position (last live segment)
    pub fn tail(&self) -> Position {
        self.segments[self.len - 1].position
    }

    pub fn size(&self) -> i32 {
        self.segments[0].size
    }

    /// Live segments, head first
    pub fn segments(&self) -> &[Segment] {
        &self.segments[..self.len]
    }

    /// Live segment positions, head first
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.segments().iter().map(|s| s.position)
    }

    /// Positions captured before the current tick's movement
    pub fn trail(&self) -> &[Position] {
        &self.trail[..self.len]
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the snake is empty (never true, length starts at one)
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.segments.len()
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.segments()[1..].iter().any(|s| s.position == pos)
    }

    /// Check if any live segment sits on pos
    pub fn occupies(&self, pos: Position) -> bool {
        self.positions().any(|p| p == pos)
    }

    /// Turn the head if the requested axis is currently idle.
    ///
    /// Reversing is impossible because the axis of a reversal is never idle.
    pub fn steer(&mut self, direction: Direction, cell_size: i32) -> bool {
        let idle = if direction.is_horizontal() {
            self.velocity.0 == 0
        } else {
            self.velocity.1 == 0
        };
        if !idle {
            return false;
        }

        let (dx, dy) = direction.delta();
        self.velocity = (dx * cell_size, dy * cell_size);
        true
    }

    /// Record every live segment's position in the trail buffer
    pub fn snapshot_trail(&mut self) {
        for i in 0..self.len {
            self.trail[i] = self.segments[i].position;
        }
    }

    /// Move the head by its velocity; each follower takes the trail position
    /// of the segment ahead of it. Call after `snapshot_trail`.
    pub fn advance(&mut self) {
        let (dx, dy) = self.velocity;
        self.segments[0].position = self.segments[0].position.moved_by(dx, dy);
        for i in 1..self.len {
            self.segments[i].position = self.trail[i - 1];
        }
    }

    /// Append a segment where the tail stood before this tick.
    ///
    /// Returns false and leaves the snake unchanged when it is at capacity.
    pub fn grow(&mut self) -> bool {
        if self.is_full() {
            return false;
        }
        self.segments[self.len].position = self.trail[self.len - 1];
        self.len += 1;
        true
    }
}

/// Kind of food, which decides its value and its visual tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoodKind {
    Regular,
    Bonus,
}

impl FoodKind {
    /// Points (and nothing else) awarded for eating this kind
    pub fn value(&self) -> u32 {
        match self {
            FoodKind::Regular => 1,
            FoodKind::Bonus => 2,
        }
    }
}

/// A food item on the field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub position: Position,
    pub size: i32,
    pub active: bool,
    pub kind: FoodKind,
}

impl Food {
    pub fn new(kind: FoodKind, size: i32) -> Self {
        Self {
            position: Position::default(),
            size,
            active: false,
            kind,
        }
    }

    /// Place the item and make it active
    pub fn place(&mut self, pos: Position) {
        self.position = pos;
        self.active = true;
    }
}

/// Difficulty tier; each tier changes wall lethality and the spawn region
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Difficulty {
    /// Every edge wraps around
    Easy = 1,
    /// Side walls kill, top and bottom wrap
    Medium = 2,
    /// All four walls kill
    Hard = 3,
}

impl Difficulty {
    pub fn level(&self) -> u8 {
        *self as u8
    }

    /// Tier a score entitles the player to
    pub fn for_score(score: u32) -> Self {
        if score >= config::TIER_THREE_SCORE {
            Difficulty::Hard
        } else if score >= config::TIER_TWO_SCORE {
            Difficulty::Medium
        } else {
            Difficulty::Easy
        }
    }
}

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Paused,
    GameOver,
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Complete session state, mutated only by `GameEngine::tick`
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub bonus: Food,
    pub grid: Grid,
    pub score: u32,
    pub difficulty: Difficulty,
    pub ticks: u64,
    pub phase: Phase,
    /// Cleared by an accepted steer, re-armed by each movement step
    pub allow_move: bool,
    pub food_gate: bool,
    pub bonus_gate: bool,
    pub collision: Option<CollisionType>,
}

impl GameState {
    /// Create a fresh session with the head in the top-left cell
    pub fn new(grid: Grid, max_length: usize) -> Self {
        let size = grid.cell_size;
        Self {
            snake: Snake::new(grid.cell_origin(0, 0), size, max_length),
            food: Food::new(FoodKind::Regular, size),
            bonus: Food::new(FoodKind::Bonus, size),
            grid,
            score: 0,
            difficulty: Difficulty::Easy,
            ticks: 0,
            phase: Phase::Playing,
            allow_move: true,
            food_gate: true,
            bonus_gate: false,
            collision: None,
        }
    }

    /// Live segments for drawing, head first
    pub fn segments(&self) -> &[Segment] {
        self.snake.segments()
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn bonus(&self) -> &Food {
        &self.bonus
    }

    pub fn food_of(&self, kind: FoodKind) -> &Food {
        match kind {
            FoodKind::Regular => &self.food,
            FoodKind::Bonus => &self.bonus,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn tick(&self) -> u64 {
        self.ticks
    }

    /// Whole seconds of play at the given tick rate
    pub fn elapsed_seconds(&self, tick_rate: u32) -> u64 {
        self.ticks / u64::from(tick_rate.max(1))
    }

    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }
}
