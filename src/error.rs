use thiserror::Error;

pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("terminal too small: need {}x{}, have {}x{}", needed.0, needed.1, actual.0, actual.1)]
    TerminalTooSmall { needed: (u16, u16), actual: (u16, u16) },

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
