//! btmeta - BitTorrent metadata codec
//!
//! Decoding and canonical encoding of bencode, torrent metainfo parsing with
//! info hash computation, and magnet link parsing.
//!
//! # Modules
//!
//! - [`bencode`] - BEP-3 Bencode encoding/decoding
//! - [`metainfo`] - BEP-3/9/12 Torrent files, info hashes, magnet links
//! - [`tracker`] - BEP-15 UDP tracker connect packets
//! - [`constants`] - Protocol constants

pub mod bencode;
pub mod constants;
pub mod metainfo;
pub mod tracker;

pub use bencode::{decode, encode, BencodeError, Value};
pub use metainfo::{File, Info, InfoHash, MagnetLink, Metainfo, MetainfoError};
pub use tracker::{ConnectRequest, ConnectResponse, TrackerError};
