use thiserror::Error;

#[derive(Debug, Error)]
pub enum BencodeError {
    #[error("unexpected end of input at offset {0}")]
    UnexpectedEof(usize),

    #[error("invalid integer: {0}")]
    InvalidInteger(String),

    #[error("invalid string length at offset {0}")]
    InvalidStringLength(usize),

    #[error("unexpected character {found:?} at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },

    #[error("trailing data after value at offset {0}")]
    TrailingData(usize),

    #[error("nesting too deep")]
    NestingTooDeep,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
