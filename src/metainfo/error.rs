use std::path::PathBuf;

use thiserror::Error;

use crate::bencode::BencodeError;

/// Errors that can occur when parsing torrent files or magnet links.
#[derive(Debug, Error)]
pub enum MetainfoError {
    /// The torrent file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The torrent file contains invalid bencode.
    #[error("bencode error: {0}")]
    Bencode(#[from] BencodeError),

    /// A required field is missing from the torrent file.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// The magnet link is not a parseable URI.
    #[error("invalid magnet uri: {0}")]
    InvalidUri(#[from] url::ParseError),

    /// The magnet link has no `xt=urn:btih:` parameter.
    #[error("magnet link has no urn:btih info hash")]
    MissingHash,

    /// The info hash is not 40 hex characters.
    #[error("invalid info hash: {0}")]
    InvalidHash(String),
}
