//! Protocol constants.
//!
//! Values shared by the bencode decoder, the metainfo and magnet parsers and
//! the UDP tracker packet codec.

// ============================================================================
// Bencode
// ============================================================================

/// Maximum nesting of lists and dictionaries accepted by the decoder.
pub const MAX_BENCODE_DEPTH: usize = 64;

// ============================================================================
// Info hash
// ============================================================================

/// Length in bytes of a v1 info hash (SHA1 digest).
pub const INFO_HASH_LEN: usize = 20;

/// Length of each entry in the `pieces` field of an info dictionary.
pub const PIECE_HASH_LEN: usize = 20;

// ============================================================================
// Magnet links
// ============================================================================

/// Prefix of the `xt` parameter carrying a hex v1 info hash.
pub const MAGNET_HASH_PREFIX: &str = "urn:btih:";

/// Scheme marker of trackers reachable over UDP (BEP-15).
pub const UDP_TRACKER_SCHEME: &str = "udp://";

/// Path suffix stripped from UDP tracker URLs.
pub const ANNOUNCE_SUFFIX: &str = "/announce";

// ============================================================================
// UDP tracker protocol (BEP-15)
// ============================================================================

/// Magic connection id sent in every connect request.
pub const UDP_PROTOCOL_ID: u64 = 0x41727101980;

/// Action code of a connect request/response.
pub const UDP_ACTION_CONNECT: u32 = 0;

/// Action code of an error response.
pub const UDP_ACTION_ERROR: u32 = 3;
