use std::collections::BTreeSet;
use std::time::Duration;

use rand::Rng;
use rand::rngs::ThreadRng;
use tracing::{debug, info};

use super::error::GameError;
use super::levels::{self, TileSize};
use super::profile::{Color, PlayerProfile};

pub const STARTING_LIVES: u8 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileStatus {
    Idle,
    Cleared,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No level has been started since the controller was built or restarted.
    Ready,
    Playing,
    /// Last armed tile was hit; the next level is waiting for `start()`.
    LevelCleared,
    Won,
    Lost,
}

impl Phase {
    pub fn is_over(self) -> bool {
        matches!(self, Phase::Won | Phase::Lost)
    }
}

/// Offsets, measured from the moment the board is built, at which a flashed
/// tile is highlighted and then reverted to idle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlashTiming {
    pub show_after: Duration,
    pub hide_after: Duration,
}

impl Default for FlashTiming {
    fn default() -> Self {
        FlashTiming {
            show_after: Duration::from_millis(100),
            hide_after: Duration::from_millis(750),
        }
    }
}

/// Everything the rendering surface needs to draw a fresh board and run its
/// flash timers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlashPlan {
    pub level: usize,
    pub grid_size: usize,
    pub tile_size: TileSize,
    pub tiles: Vec<usize>,
    pub color: Color,
    pub timing: FlashTiming,
}

/// How a session ended. `level` is the last level played, so a win reports
/// the final table level (10) rather than one past it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FinalReport {
    pub won: bool,
    pub level: usize,
    pub lives: u8,
    pub player: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LevelStart {
    Flash(FlashPlan),
    Won(FinalReport),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Click on a cleared tile, or while no level is in play.
    Ignored,
    Hit { remaining: usize },
    LevelCleared { next_level: usize },
    Miss { lives_left: u8 },
    Won(FinalReport),
    Lost(FinalReport),
}

pub struct GameController<R: Rng = ThreadRng> {
    profile: PlayerProfile,
    lives: u8,
    level: usize,
    grid_size: usize,
    tiles: Vec<TileStatus>,
    armed: BTreeSet<usize>,
    phase: Phase,
    timing: FlashTiming,
    rng: R,
}

impl GameController<ThreadRng> {
    pub fn with_thread_rng(profile: PlayerProfile) -> Self {
        GameController::new(profile, rand::rng())
    }
}

impl<R: Rng> GameController<R> {
    /// A controller at level 1 with full lives, in `Phase::Ready`. No board
    /// exists until `start()` is called.
    pub fn new(profile: PlayerProfile, rng: R) -> Self {
        GameController {
            profile,
            lives: STARTING_LIVES,
            level: 1,
            grid_size: 0,
            tiles: Vec::new(),
            armed: BTreeSet::new(),
            phase: Phase::Ready,
            timing: FlashTiming::default(),
            rng,
        }
    }

    pub fn with_flash_timing(mut self, timing: FlashTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn profile(&self) -> &PlayerProfile {
        &self.profile
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn tiles(&self) -> &[TileStatus] {
        &self.tiles
    }

    pub fn armed(&self) -> &BTreeSet<usize> {
        &self.armed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn report(&self) -> FinalReport {
        FinalReport {
            won: self.phase == Phase::Won,
            level: self.level,
            lives: self.lives,
            player: self.profile.name().to_string(),
        }
    }

    /// Starts whatever level the controller is currently on.
    pub fn start(&mut self) -> Result<LevelStart, GameError> {
        self.start_level(self.level)
    }

    /// Builds the board for `level`. A finished game stays finished until
    /// `restart()`.
    pub fn start_level(&mut self, level: usize) -> Result<LevelStart, GameError> {
        if self.phase.is_over() {
            return Err(GameError::GameOver {
                won: self.phase == Phase::Won,
            });
        }
        if level == 0 {
            return Err(GameError::InvalidLevel(level));
        }
        let Some(config) = levels::config_for(level) else {
            self.level = levels::level_count();
            self.armed.clear();
            self.phase = Phase::Won;
            info!(lives = self.lives, "all levels cleared");
            return Ok(LevelStart::Won(self.report()));
        };

        self.level = level;
        self.grid_size = config.grid_size;
        self.tiles = vec![TileStatus::Idle; config.tile_count()];
        self.armed = rand::seq::index::sample(&mut self.rng, config.tile_count(), config.flash_count)
            .into_iter()
            .collect();
        self.phase = Phase::Playing;
        debug!(
            level,
            grid_size = config.grid_size,
            flashes = config.flash_count,
            "level started"
        );

        Ok(LevelStart::Flash(FlashPlan {
            level,
            grid_size: config.grid_size,
            tile_size: config.tile_size(),
            tiles: self.armed.iter().copied().collect(),
            color: self.profile.color(),
            timing: self.timing,
        }))
    }

    pub fn handle_click(&mut self, index: usize) -> Result<ClickOutcome, GameError> {
        if index >= self.tiles.len() {
            return Err(GameError::TileOutOfRange {
                index,
                tiles: self.tiles.len(),
            });
        }
        if self.phase != Phase::Playing || self.tiles[index] == TileStatus::Cleared {
            return Ok(ClickOutcome::Ignored);
        }

        if self.armed.remove(&index) {
            self.tiles[index] = TileStatus::Cleared;
            debug!(index, remaining = self.armed.len(), "armed tile hit");
            if !self.armed.is_empty() {
                return Ok(ClickOutcome::Hit {
                    remaining: self.armed.len(),
                });
            }
            if self.level >= levels::level_count() {
                self.phase = Phase::Won;
                info!(level = self.level, lives = self.lives, "game won");
                return Ok(ClickOutcome::Won(self.report()));
            }
            self.level += 1;
            self.phase = Phase::LevelCleared;
            info!(next_level = self.level, "level cleared");
            return Ok(ClickOutcome::LevelCleared {
                next_level: self.level,
            });
        }

        self.lives = self.lives.saturating_sub(1);
        debug!(index, lives = self.lives, "wrong tile");
        if self.lives == 0 {
            self.phase = Phase::Lost;
            info!(level = self.level, "game lost");
            return Ok(ClickOutcome::Lost(self.report()));
        }
        Ok(ClickOutcome::Miss {
            lives_left: self.lives,
        })
    }

    /// Back to level 1 with full lives, keeping the same player.
    pub fn restart(&mut self) {
        self.lives = STARTING_LIVES;
        self.level = 1;
        self.grid_size = 0;
        self.tiles.clear();
        self.armed.clear();
        self.phase = Phase::Ready;
    }
}
