use thiserror::Error;

/// Errors produced while decoding bencode.
///
/// Every variant records the byte offset at which decoding stopped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BencodeError {
    #[error("unexpected end of input at offset {0}")]
    UnexpectedEnd(usize),

    #[error("invalid integer at offset {pos}: {reason}")]
    InvalidInteger { pos: usize, reason: &'static str },

    #[error("invalid string length at offset {0}")]
    InvalidLength(usize),

    #[error("dictionary key at offset {0} is not a byte string")]
    InvalidKey(usize),

    #[error("duplicate dictionary key {key:?} at offset {pos}")]
    DuplicateKey { pos: usize, key: String },

    #[error("unexpected byte {byte:#04x} at offset {pos}")]
    InvalidFormat { pos: usize, byte: u8 },

    #[error("trailing data after value at offset {0}")]
    TrailingData(usize),

    #[error("nesting too deep at offset {0}")]
    NestingTooDeep(usize),
}

impl BencodeError {
    /// Byte offset into the input where the error was detected.
    pub fn position(&self) -> usize {
        match *self {
            BencodeError::UnexpectedEnd(pos)
            | BencodeError::InvalidLength(pos)
            | BencodeError::InvalidKey(pos)
            | BencodeError::TrailingData(pos)
            | BencodeError::NestingTooDeep(pos) => pos,
            BencodeError::InvalidInteger { pos, .. }
            | BencodeError::DuplicateKey { pos, .. }
            | BencodeError::InvalidFormat { pos, .. } => pos,
        }
    }
}
