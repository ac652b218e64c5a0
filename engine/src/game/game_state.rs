use crate::config::Validate;
use crate::{log, log_verbose};
use super::session_rng::SessionRng;
use super::settings::GameSettings;
use super::snake_body::SnakeBody;
use super::summary::StateSummary;
use super::types::{Cell, CollisionKind, CollisionPolicy, FieldSize, GameStatus, Heading, StepOutcome};

/// Random draws tried before falling back to scanning the field for a free cell.
pub const APPLE_PLACEMENT_ATTEMPTS: usize = 100;

#[derive(Clone, Debug)]
pub struct GameState {
    settings: GameSettings,
    field: FieldSize,
    body: SnakeBody,
    apple: Cell,
    status: GameStatus,
    rng: SessionRng,
    ticks: u64,
    resets: u64,
    apples_eaten: u64,
}

impl GameState {
    /// Starts a game with an unseeded random source.
    pub fn new(settings: GameSettings) -> Result<Self, String> {
        Self::with_rng(settings, SessionRng::from_random())
    }

    pub fn with_seed(settings: GameSettings, seed: u64) -> Result<Self, String> {
        Self::with_rng(settings, SessionRng::new(seed))
    }

    pub fn with_rng(settings: GameSettings, rng: SessionRng) -> Result<Self, String> {
        settings
            .validate()
            .map_err(|e| format!("Invalid game settings: {}", e))?;

        let body = Self::spawn_body(&settings);
        let mut state = Self {
            field: settings.field_size(),
            apple: body.head(),
            settings,
            body,
            status: GameStatus::Running,
            rng,
            ticks: 0,
            resets: 0,
            apples_eaten: 0,
        };

        if state.place_apple().is_none() {
            return Err("No free cell left for the apple".to_string());
        }
        log!(
            "Game started on {}x{} field (seed {})",
            state.field.width,
            state.field.height,
            state.rng.seed()
        );
        Ok(state)
    }

    fn spawn_body(settings: &GameSettings) -> SnakeBody {
        SnakeBody::new(
            settings.start_cell(),
            settings.start_heading,
            settings.initial_length as usize,
        )
    }

    /// Moves the apple to a random cell outside the body and returns it.
    /// Yields `None`, leaving the apple untouched, only when the body covers the whole field.
    pub fn place_apple(&mut self) -> Option<Cell> {
        let cell = self.find_free_cell()?;
        self.apple = cell;
        log_verbose!("Apple placed at {}", cell);
        Some(cell)
    }

    fn find_free_cell(&mut self) -> Option<Cell> {
        if self.body.len() >= self.field.area() {
            return None;
        }

        for _ in 0..APPLE_PLACEMENT_ATTEMPTS {
            let candidate = self.rng.random_cell(&self.field);
            if !self.body.contains(&candidate) {
                return Some(candidate);
            }
        }

        let FieldSize { width, height } = self.field;
        (0..height)
            .flat_map(|y| (0..width).map(move |x| Cell::new(x, y)))
            .find(|cell| !self.body.contains(cell))
    }

    pub fn is_colliding(&self) -> bool {
        self.collision_kind().is_some()
    }

    /// Checks the prospective head against the walls and the body as it is before the move,
    /// so the cell the tail is about to vacate still counts as occupied.
    pub fn collision_kind(&self) -> Option<CollisionKind> {
        let next_head = self.body.prospective_head();
        if !self.field.contains(next_head) {
            return Some(CollisionKind::Wall);
        }
        if self.body.contains(&next_head) {
            return Some(CollisionKind::SelfBite);
        }
        None
    }

    /// Advances the game by one tick.
    pub fn step(&mut self, input: Option<Heading>) -> StepOutcome {
        if self.status != GameStatus::Running {
            return StepOutcome::Halted;
        }
        self.ticks += 1;

        self.body.set_heading(input);

        if let Some(reason) = self.collision_kind() {
            return self.handle_collision(reason);
        }

        let grow = self.body.prospective_head() == self.apple;
        self.body.advance(grow);
        if !grow {
            return StepOutcome::Moved;
        }

        let eaten = self.apple;
        self.apples_eaten += 1;
        log!("Apple eaten at {}, length {}", eaten, self.body.len());

        if self.place_apple().is_none() {
            log!("Snake filled the field at length {}", self.body.len());
            match self.settings.collision_policy {
                CollisionPolicy::Respawn => self.respawn(),
                CollisionPolicy::Halt => self.status = GameStatus::Filled,
            }
            return StepOutcome::BoardFilled;
        }
        StepOutcome::Ate { apple: eaten }
    }

    fn handle_collision(&mut self, reason: CollisionKind) -> StepOutcome {
        log!(
            "Snake collided ({:?}) at {} heading {}, length {}",
            reason,
            self.body.prospective_head(),
            self.body.heading(),
            self.body.len()
        );

        match self.settings.collision_policy {
            CollisionPolicy::Respawn => {
                self.respawn();
                StepOutcome::Reset { reason }
            }
            CollisionPolicy::Halt => {
                self.status = GameStatus::Over(reason);
                StepOutcome::Collided { reason }
            }
        }
    }

    fn respawn(&mut self) {
        self.body = Self::spawn_body(&self.settings);
        self.resets += 1;
        self.place_apple()
            .expect("Validated settings always leave a free cell after respawn");
    }

    /// Leaves a halted or filled game and starts over with a fresh snake and apple.
    pub fn restart(&mut self) {
        self.status = GameStatus::Running;
        self.respawn();
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng.reseed(seed);
    }

    pub fn body(&self) -> &SnakeBody {
        &self.body
    }

    pub fn body_cells(&self) -> Vec<Cell> {
        self.body.to_vec()
    }

    pub fn apple(&self) -> Cell {
        self.apple
    }

    pub fn field(&self) -> FieldSize {
        self.field
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn resets(&self) -> u64 {
        self.resets
    }

    pub fn apples_eaten(&self) -> u64 {
        self.apples_eaten
    }

    pub fn summary(&self) -> StateSummary {
        StateSummary {
            length: self.body.len(),
            head: self.body.head(),
            apple: self.apple,
            ticks: self.ticks,
            resets: self.resets,
            apples_eaten: self.apples_eaten,
        }
    }

    #[cfg(test)]
    fn set_apple(&mut self, apple: Cell) {
        self.apple = apple;
    }

    #[cfg(test)]
    fn set_body(&mut self, body: SnakeBody) {
        self.body = body;
    }
}
