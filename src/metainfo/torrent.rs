use super::error::MetainfoError;
use super::info_hash::InfoHash;
use super::magnet::{udp_tracker_address, MagnetLink};
use crate::bencode::{decode_prefix, encode, Value};
use crate::constants::PIECE_HASH_LEN;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, trace};

/// A parsed torrent file.
///
/// Top-level fields are projected leniently: a known key holding a value of
/// the wrong type is treated as absent rather than rejected, so files written
/// by unusual clients still load. Only a missing `info` dictionary is fatal.
///
/// # Examples
///
/// ```
/// use btmeta::metainfo::Metainfo;
///
/// let data = b"d4:infod6:lengthi1024e4:name8:file.txt12:piece lengthi16384e6:pieces0:ee";
/// let torrent = Metainfo::from_bytes(data).unwrap();
///
/// assert_eq!(torrent.info.name.as_deref(), Some("file.txt"));
/// assert_eq!(torrent.total_size, 1024);
/// assert_eq!(torrent.info_hash.to_hex().len(), 40);
/// ```
#[derive(Debug, Clone)]
pub struct Metainfo {
    /// The info dictionary containing file and piece information.
    pub info: Info,
    /// SHA1 of the canonical encoding of the info dictionary.
    pub info_hash: InfoHash,
    /// Primary tracker URL.
    pub announce: Option<String>,
    /// Multi-tier tracker list ([BEP-12](http://bittorrent.org/beps/bep_0012.html)).
    pub announce_list: Vec<Vec<String>>,
    /// Unix timestamp when the torrent was created.
    pub creation_date: Option<i64>,
    pub comment: Option<String>,
    /// Name/version of the program that created the torrent.
    pub created_by: Option<String>,
    /// Sum of all file lengths.
    pub total_size: u64,
    raw_info: Bytes,
}

/// The info dictionary from a torrent file.
///
/// Single-file torrents carry `length`; multi-file torrents carry `files`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Info {
    /// Suggested name for the file or directory.
    pub name: Option<String>,
    /// Size of the single file, in bytes.
    pub length: Option<u64>,
    pub md5sum: Option<String>,
    /// Number of bytes per piece.
    pub piece_length: Option<u64>,
    /// Concatenated SHA1 hashes of every piece.
    pub pieces: Bytes,
    pub files: Vec<File>,
}

/// A file within a multi-file torrent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct File {
    pub length: u64,
    pub md5sum: Option<String>,
    /// Path segments relative to the torrent's root directory.
    pub path: Vec<String>,
}

impl Metainfo {
    /// Reads and parses a torrent file.
    ///
    /// # Errors
    ///
    /// Returns [`MetainfoError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`Metainfo::from_bytes`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MetainfoError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| MetainfoError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), bytes = data.len(), "read torrent file");
        Self::from_bytes(&data)
    }

    /// Parses a torrent file from raw bytes.
    ///
    /// Bytes following the top-level dictionary are ignored.
    ///
    /// # Errors
    ///
    /// - [`MetainfoError::Bencode`] if the data is not valid bencode
    /// - [`MetainfoError::MissingField`] if the root is not a dictionary with
    ///   an `info` dictionary
    pub fn from_bytes(data: &[u8]) -> Result<Self, MetainfoError> {
        let (value, consumed) = decode_prefix(data)?;
        if consumed < data.len() {
            debug!(
                ignored = data.len() - consumed,
                "ignoring trailing bytes after torrent dictionary"
            );
        }
        Self::from_value(&value)
    }

    /// Projects an already decoded value into a torrent.
    pub fn from_value(value: &Value) -> Result<Self, MetainfoError> {
        let dict = value.as_dict().ok_or_else(|| {
            debug!(root = value.kind(), "torrent root is not a dictionary");
            MetainfoError::MissingField("info")
        })?;

        let info_value = dict
            .get(b"info".as_slice())
            .filter(|v| v.as_dict().is_some())
            .ok_or(MetainfoError::MissingField("info"))?;

        // Hash the decoded dictionary itself so keys `Info` does not model
        // still contribute to the hash.
        let raw_info = Bytes::from(encode(info_value));
        let info_hash = InfoHash::from_info_bytes(&raw_info);

        let info = Info::from_value(info_value);
        let total_size = info.total_size();

        let announce_list: Vec<Vec<String>> = dict
            .get(b"announce-list".as_slice())
            .and_then(|v| v.as_list())
            .map(|list| {
                list.iter()
                    .filter_map(|tier| {
                        tier.as_list()
                            .map(|urls| urls.iter().filter_map(text).collect())
                    })
                    .collect()
            })
            .unwrap_or_default();

        let metainfo = Self {
            info,
            info_hash,
            announce: text_field(dict, b"announce"),
            announce_list,
            creation_date: dict
                .get(b"creation date".as_slice())
                .and_then(|v| v.as_integer()),
            comment: text_field(dict, b"comment"),
            created_by: text_field(dict, b"created by"),
            total_size,
            raw_info,
        };

        debug!(
            info_hash = %metainfo.info_hash,
            name = metainfo.info.name.as_deref().unwrap_or_default(),
            total_size = metainfo.total_size,
            files = metainfo.info.files.len(),
            "parsed torrent"
        );

        Ok(metainfo)
    }

    /// Returns the canonical bencoding of the info dictionary.
    ///
    /// This is exactly the input of [`Metainfo::info_hash`].
    pub fn raw_info(&self) -> &Bytes {
        &self.raw_info
    }

    /// Returns all tracker URLs from both `announce` and `announce-list`.
    ///
    /// The primary tracker comes first, followed by the tiers in order.
    /// Duplicates are removed.
    pub fn trackers(&self) -> Vec<String> {
        let mut trackers: Vec<String> = Vec::new();

        let all = self.announce.iter().chain(self.announce_list.iter().flatten());
        for tracker in all {
            if !trackers.contains(tracker) {
                trackers.push(tracker.clone());
            }
        }

        trackers
    }

    /// Returns the `host:port` of every UDP tracker in [`Metainfo::trackers`].
    pub fn udp_trackers(&self) -> Vec<String> {
        self.trackers()
            .iter()
            .filter_map(|t| udp_tracker_address(t))
            .map(String::from)
            .collect()
    }

    /// Builds a magnet link for this torrent from its hash, name and the
    /// trackers of `announce-list`.
    pub fn to_magnet(&self) -> MagnetLink {
        let mut magnet = MagnetLink::new(self.info_hash);
        if let Some(ref name) = self.info.name {
            magnet = magnet.with_display_name(name.clone());
        }
        self.announce_list
            .iter()
            .flatten()
            .fold(magnet, |magnet, tracker| magnet.with_tracker(tracker.clone()))
    }
}

impl Info {
    fn from_value(value: &Value) -> Self {
        let Some(dict) = value.as_dict() else {
            return Self::default();
        };

        let files: Vec<File> = dict
            .get(b"files".as_slice())
            .and_then(|v| v.as_list())
            .map(|list| list.iter().filter_map(File::from_value).collect())
            .unwrap_or_default();

        Self {
            name: text_field(dict, b"name"),
            length: dict.get(b"length".as_slice()).and_then(|v| v.as_u64()),
            md5sum: text_field(dict, b"md5sum"),
            piece_length: dict
                .get(b"piece length".as_slice())
                .and_then(|v| v.as_u64()),
            pieces: dict
                .get(b"pieces".as_slice())
                .and_then(|v| v.as_bytes())
                .cloned()
                .unwrap_or_default(),
            files,
        }
    }

    /// Returns `true` if the torrent lists individual files.
    pub fn is_multi_file(&self) -> bool {
        !self.files.is_empty()
    }

    /// Total payload size: the sum of the file lengths for multi-file
    /// torrents, otherwise `length`.
    pub fn total_size(&self) -> u64 {
        if self.is_multi_file() {
            self.files
                .iter()
                .fold(0u64, |acc, f| acc.saturating_add(f.length))
        } else {
            self.length.unwrap_or(0)
        }
    }

    /// Number of complete piece hashes in `pieces`.
    pub fn piece_count(&self) -> usize {
        self.pieces.len() / PIECE_HASH_LEN
    }

    /// Iterates over the 20-byte piece hashes.
    pub fn piece_hashes(&self) -> std::slice::ChunksExact<'_, u8> {
        self.pieces.chunks_exact(PIECE_HASH_LEN)
    }
}

impl File {
    fn from_value(value: &Value) -> Option<Self> {
        let Some(dict) = value.as_dict() else {
            trace!(kind = value.kind(), "skipping malformed file entry");
            return None;
        };

        let path: Vec<String> = dict
            .get(b"path".as_slice())
            .and_then(|v| v.as_list())
            .map(|segments| segments.iter().filter_map(text).collect())
            .unwrap_or_default();

        Some(Self {
            length: dict
                .get(b"length".as_slice())
                .and_then(|v| v.as_u64())
                .unwrap_or(0),
            md5sum: text_field(dict, b"md5sum"),
            path,
        })
    }
}

fn text(value: &Value) -> Option<String> {
    value.to_str_lossy().map(|s| s.into_owned())
}

fn text_field(dict: &BTreeMap<Bytes, Value>, key: &[u8]) -> Option<String> {
    dict.get(key).and_then(text)
}
