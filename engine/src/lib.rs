pub mod config;
pub mod game;
pub mod logger;

pub use game::{
    Cell, CollisionKind, CollisionPolicy, FieldSize, GameSettings, GameState, GameStatus, Heading,
    SessionRng, SnakeBody, StateSummary, StepOutcome,
};
