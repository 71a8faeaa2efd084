use thiserror::Error;

/// Errors produced while decoding UDP tracker packets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("packet too short: expected at least {expected} bytes, got {actual}")]
    PacketTooShort { expected: usize, actual: usize },

    #[error("unexpected action {0}")]
    UnexpectedAction(u32),

    #[error("transaction id mismatch: sent {sent:#010x}, received {received:#010x}")]
    TransactionMismatch { sent: u32, received: u32 },

    #[error("tracker returned error: {0}")]
    TrackerFailure(String),
}
