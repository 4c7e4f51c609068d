use super::{
    action::TickInput,
    config::GameConfig,
    grid::Grid,
    state::{CollisionType, Difficulty, FoodKind, GameState, Phase, Position},
};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use tracing::{debug, info, warn};

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickResult {
    /// Whether this tick was a movement step
    pub moved: bool,
    /// Food items eaten this tick, in processing order
    pub eaten: Vec<FoodKind>,
    /// Lethal collision that ended the session this tick
    pub collision: Option<CollisionType>,
    /// Whether a confirm press restarted the session
    pub restarted: bool,
    /// New tier if the score promoted the difficulty
    pub promoted: Option<Difficulty>,
}

/// The simulation core: owns the configuration and the food RNG, while all
/// session data lives in the `GameState` passed to each call
pub struct GameEngine {
    config: GameConfig,
    grid: Grid,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new engine, seeded from the config when it carries a seed
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            grid: Grid::new(&config),
            config,
            rng,
        }
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::new(GameConfig {
            seed: Some(seed),
            ..config
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Fresh session state
    pub fn reset(&mut self) -> GameState {
        GameState::new(self.grid, self.config.max_length)
    }

    /// Advance the session by one tick given this frame's key presses
    pub fn tick(&mut self, state: &mut GameState, input: &TickInput) -> TickResult {
        let mut result = TickResult::default();

        match state.phase {
            Phase::GameOver => {
                if input.confirm {
                    *state = self.reset();
                    result.restarted = true;
                    info!("session restarted");
                }
                return result;
            }
            Phase::Paused => {
                if input.toggle_pause {
                    state.phase = Phase::Playing;
                } else {
                    return result;
                }
            }
            Phase::Playing => {
                if input.toggle_pause {
                    state.phase = Phase::Paused;
                    return result;
                }
            }
        }

        for &direction in &input.directions {
            if state.allow_move && state.snake.steer(direction, self.grid.cell_size) {
                state.allow_move = false;
            }
        }

        state.ticks += 1;
        state.snake.snapshot_trail();

        if state.ticks % self.config.move_interval == 0 {
            state.snake.advance();
            state.allow_move = true;
            result.moved = true;
        }

        if let Some(collision) = self.check_collision(state) {
            state.phase = Phase::GameOver;
            state.collision = Some(collision);
            result.collision = Some(collision);
            info!(
                score = state.score,
                length = state.snake.len(),
                ?collision,
                "game over"
            );
            return result;
        }

        if state.difficulty >= Difficulty::Medium
            && state.ticks % self.config.bonus_interval == 0
        {
            state.bonus_gate = true;
        }

        if self.manage_food(state, FoodKind::Regular) {
            result.eaten.push(FoodKind::Regular);
        }
        state.food_gate = true;

        if self.manage_food(state, FoodKind::Bonus) {
            result.eaten.push(FoodKind::Bonus);
        }

        let earned = Difficulty::for_score(state.score);
        if earned > state.difficulty {
            state.difficulty = earned;
            result.promoted = Some(earned);
            info!(level = earned.level(), score = state.score, "difficulty up");
        }

        result
    }

    /// Apply the tier's wall policy to the head, then test self collision
    fn check_collision(&self, state: &mut GameState) -> Option<CollisionType> {
        let grid = self.grid;
        let inset = self.config.wall_inset;
        let mut head = state.snake.head();

        match state.difficulty {
            Difficulty::Easy => {
                head.x = wrap(head.x, grid.min_x(), grid.max_x());
                head.y = wrap(head.y, grid.min_y(), grid.max_y());
            }
            Difficulty::Medium => {
                if grid.in_side_wall(head.x, inset) {
                    return Some(CollisionType::Wall);
                }
                head.y = wrap(head.y, grid.min_y(), grid.max_y());
            }
            Difficulty::Hard => {
                if grid.in_side_wall(head.x, inset) || grid.in_end_wall(head.y, inset) {
                    return Some(CollisionType::Wall);
                }
            }
        }
        state.snake.set_head(head);

        if state.snake.collides_with_body(head) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Spawn the item if its gate allows, then test whether the head is on
    /// it. Returns true if it was eaten.
    fn manage_food(&mut self, state: &mut GameState, kind: FoodKind) -> bool {
        let gate_open = match kind {
            FoodKind::Regular => state.food_gate,
            FoodKind::Bonus => state.bonus_gate,
        };

        if !state.food_of(kind).active && gate_open {
            match self.find_free_cell(state, kind) {
                Some(pos) => {
                    debug!(?kind, x = pos.x, y = pos.y, "food spawned");
                    food_mut(state, kind).place(pos);
                }
                None => warn!(?kind, "no free cell for food"),
            }
        }

        let food = *state.food_of(kind);
        let head = state.snake.head();
        if !food.active || !head.overlaps(state.snake.size(), food.position, food.size) {
            return false;
        }

        if !state.snake.grow() {
            warn!(
                capacity = state.snake.capacity(),
                "snake at maximum length; not growing"
            );
        }
        state.score += kind.value();
        food_mut(state, kind).active = false;
        match kind {
            FoodKind::Regular => state.food_gate = false,
            FoodKind::Bonus => state.bonus_gate = false,
        }
        debug!(?kind, score = state.score, length = state.snake.len(), "food eaten");
        true
    }

    /// Pick a random cell in the tier's spawn region that is clear of the
    /// snake and of the other active food item.
    ///
    /// Random draws are capped; after that every free cell is collected and
    /// one is picked uniformly, so the result is None only on a full region.
    fn find_free_cell(&mut self, state: &GameState, kind: FoodKind) -> Option<Position> {
        let region = self
            .grid
            .spawn_region(state.difficulty, self.config.wall_inset);
        let other = match kind {
            FoodKind::Regular => state.bonus,
            FoodKind::Bonus => state.food,
        };
        let is_free = |pos: Position| {
            !state.is_occupied_by_snake(pos) && !(other.active && other.position == pos)
        };

        let attempts = region.cell_count() * 4;
        for _ in 0..attempts {
            let col = self.rng.gen_range(region.cols.clone());
            let row = self.rng.gen_range(region.rows.clone());
            let pos = self.grid.cell_origin(col, row);
            if is_free(pos) {
                return Some(pos);
            }
        }

        debug!(attempts, ?kind, "random placement exhausted; scanning");
        let free: Vec<Position> = region
            .cells()
            .map(|(col, row)| self.grid.cell_origin(col, row))
            .filter(|&pos| is_free(pos))
            .collect();
        free.choose(&mut self.rng).copied()
    }
}

fn food_mut(state: &mut GameState, kind: FoodKind) -> &mut super::state::Food {
    match kind {
        FoodKind::Regular => &mut state.food,
        FoodKind::Bonus => &mut state.bonus,
    }
}

/// Teleport a coordinate that left [min, max] to the opposite edge
fn wrap(value: i32, min: i32, max: i32) -> i32 {
    if value < min {
        max
    } else if value > max {
        min
    } else {
        value
    }
}
