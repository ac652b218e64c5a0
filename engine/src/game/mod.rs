mod game_state;
mod session_rng;
mod settings;
mod snake_body;
mod summary;
mod types;

pub use game_state::{GameState, APPLE_PLACEMENT_ATTEMPTS};
pub use session_rng::SessionRng;
pub use settings::GameSettings;
pub use snake_body::SnakeBody;
pub use summary::StateSummary;
pub use types::{Cell, CollisionKind, CollisionPolicy, FieldSize, GameStatus, Heading, StepOutcome};
