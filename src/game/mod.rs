//! GUI-free game core: level table, player profile and the controller that
//! runs the flash-then-recall loop.

pub mod controller;
pub mod error;
pub mod levels;
pub mod profile;

pub use controller::{
    ClickOutcome, FinalReport, FlashPlan, FlashTiming, GameController, LevelStart, Phase,
    STARTING_LIVES, TileStatus,
};
pub use error::{GameError, ProfileError};
pub use levels::{LEVELS, LevelConfig, TileSize};
pub use profile::{Color, PlayerProfile};
