#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("a game needs at least one player")]
    NoPlayers,
    #[error("invalid game parameters: {0}")]
    InvalidParams(&'static str),
}
