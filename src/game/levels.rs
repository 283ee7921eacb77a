/// Board side length and number of tiles flashed for one level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelConfig {
    pub grid_size: usize,
    pub flash_count: usize,
}

impl LevelConfig {
    const fn new(grid_size: usize, flash_count: usize) -> Self {
        LevelConfig {
            grid_size,
            flash_count,
        }
    }

    pub fn tile_count(self) -> usize {
        self.grid_size * self.grid_size
    }

    pub fn tile_size(self) -> TileSize {
        TileSize::for_grid(self.grid_size)
    }
}

pub const LEVELS: [LevelConfig; 10] = [
    LevelConfig::new(2, 1),
    LevelConfig::new(2, 2),
    LevelConfig::new(3, 3),
    LevelConfig::new(3, 4),
    LevelConfig::new(3, 5),
    LevelConfig::new(4, 3),
    LevelConfig::new(4, 4),
    LevelConfig::new(4, 5),
    LevelConfig::new(4, 6),
    LevelConfig::new(4, 7),
];

/// Levels are numbered from 1. `None` once the table is exhausted.
pub fn config_for(level: usize) -> Option<LevelConfig> {
    level.checked_sub(1).and_then(|idx| LEVELS.get(idx).copied())
}

pub fn level_count() -> usize {
    LEVELS.len()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileSize {
    Large,
    Medium,
    Small,
}

impl TileSize {
    pub fn for_grid(grid_size: usize) -> Self {
        match grid_size {
            0..=2 => TileSize::Large,
            3 => TileSize::Medium,
            _ => TileSize::Small,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            TileSize::Large => "large",
            TileSize::Medium => "medium",
            TileSize::Small => "small",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_numbered_from_one() {
        assert_eq!(config_for(0), None);
        assert_eq!(config_for(1), Some(LevelConfig::new(2, 1)));
        assert_eq!(config_for(10), Some(LevelConfig::new(4, 7)));
        assert_eq!(config_for(11), None);
    }

    #[test]
    fn every_level_fits_its_board() {
        for config in LEVELS {
            assert!(config.flash_count >= 1);
            assert!(config.flash_count <= config.tile_count());
        }
    }

    #[test]
    fn tile_size_follows_grid() {
        assert_eq!(TileSize::for_grid(2), TileSize::Large);
        assert_eq!(TileSize::for_grid(3), TileSize::Medium);
        assert_eq!(TileSize::for_grid(4), TileSize::Small);
        assert_eq!(config_for(6).map(LevelConfig::tile_size), Some(TileSize::Small));
    }
}
