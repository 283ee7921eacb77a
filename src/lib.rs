//! Tile Recall: memorize the tiles that flash, then pick them back out before
//! running out of lives.
//!
//! - `game`: level table, player profile and the [`game::GameController`]
//!   state machine. No GUI dependencies.
//! - `settings`: timings and data directory, from defaults, `settings.toml`
//!   and the environment.
//! - `records`: history of finished sessions stored as JSON.
//! - `ui` (feature `gui`): the GTK 4 / libadwaita front end.

pub mod game;
pub mod records;
pub mod settings;

#[cfg(feature = "gui")]
pub mod ui;
