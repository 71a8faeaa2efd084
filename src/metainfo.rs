//! Torrent metainfo handling ([BEP-3], [BEP-9], [BEP-12]).
//!
//! [`Metainfo`] represents a parsed `.torrent` file and [`MagnetLink`] a
//! parsed magnet URI. Both identify the content by the same [`InfoHash`].
//!
//! # Examples
//!
//! ## Parsing a torrent file
//!
//! ```no_run
//! use btmeta::metainfo::Metainfo;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let torrent = Metainfo::from_file("example.torrent")?;
//!
//! println!("Info hash: {}", torrent.info_hash);
//! println!("Total size: {} bytes", torrent.total_size);
//!
//! for file in &torrent.info.files {
//!     println!("  {} ({} bytes)", file.path.join("/"), file.length);
//! }
//!
//! for tracker in torrent.trackers() {
//!     println!("Tracker: {}", tracker);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Parsing a magnet link
//!
//! ```
//! use btmeta::metainfo::MagnetLink;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let magnet = MagnetLink::parse(
//!     "magnet:?xt=urn:btih:0123456789ABCDEF0123456789ABCDEF01234567\
//!      &dn=Test&tr=udp://tracker.example.com:80/announce",
//! )?;
//!
//! assert_eq!(magnet.info_hash.to_hex(), "0123456789abcdef0123456789abcdef01234567");
//! assert_eq!(magnet.display_name.as_deref(), Some("Test"));
//! assert_eq!(magnet.udp_trackers, vec!["tracker.example.com:80"]);
//! # Ok(())
//! # }
//! ```
//!
//! # Info hash
//!
//! The info hash is the SHA1 of the canonical bencoding of the `info`
//! dictionary exactly as it was decoded. Keys this crate does not model
//! (`private`, `source`, client extensions) are part of the hash.
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html
//! [BEP-9]: http://bittorrent.org/beps/bep_0009.html
//! [BEP-12]: http://bittorrent.org/beps/bep_0012.html

mod error;
mod info_hash;
mod magnet;
mod torrent;

pub use error::MetainfoError;
pub use info_hash::InfoHash;
pub use magnet::{udp_tracker_address, MagnetLink};
pub use torrent::{File, Info, Metainfo};

#[cfg(test)]
mod tests;
