use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("level {0} does not exist, levels start at 1")]
    InvalidLevel(usize),
    #[error("tile {index} is outside a board of {tiles} tiles")]
    TileOutOfRange { index: usize, tiles: usize },
    #[error("the game is over (won: {won}), restart to play again")]
    GameOver { won: bool },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProfileError {
    #[error("player name must not be empty")]
    EmptyName,
    #[error("invalid age {0:?}, expected a whole number above zero")]
    InvalidAge(String),
    #[error("invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),
}
