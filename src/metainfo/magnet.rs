use super::error::MetainfoError;
use super::info_hash::InfoHash;
use crate::constants::{ANNOUNCE_SUFFIX, MAGNET_HASH_PREFIX, UDP_TRACKER_SCHEME};
use tracing::{debug, trace};
use url::form_urlencoded::byte_serialize;
use url::Url;

/// A parsed magnet link.
///
/// # Examples
///
/// ```
/// use btmeta::metainfo::MagnetLink;
///
/// let magnet = MagnetLink::parse(
///     "magnet:?xt=urn:btih:0123456789abcdef0123456789abcdef01234567\
///      &dn=Example%20File\
///      &tr=udp%3A%2F%2Ftracker.example.com%3A80%2Fannounce\
///      &tr=http%3A%2F%2Ftracker.example.com%2Fannounce",
/// ).unwrap();
///
/// assert_eq!(magnet.display_name.as_deref(), Some("Example File"));
/// assert_eq!(magnet.trackers.len(), 2);
/// assert_eq!(magnet.udp_trackers, vec!["tracker.example.com:80"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MagnetLink {
    pub info_hash: InfoHash,
    pub display_name: Option<String>,
    /// Every `tr` parameter, in order of appearance.
    pub trackers: Vec<String>,
    /// `host:port` of each `udp://` tracker, in order of appearance.
    pub udp_trackers: Vec<String>,
}

impl MagnetLink {
    /// Creates a link carrying only an info hash.
    pub fn new(info_hash: InfoHash) -> Self {
        Self {
            info_hash,
            display_name: None,
            trackers: Vec::new(),
            udp_trackers: Vec::new(),
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Appends a tracker URL, recording its address if it is a UDP tracker.
    pub fn with_tracker(mut self, tracker: impl Into<String>) -> Self {
        self.push_tracker(tracker.into());
        self
    }

    /// Parses a magnet URI.
    ///
    /// Only the first `xt` parameter is considered and it must carry a hex
    /// `urn:btih:` hash. Percent-encoding in `dn` and `tr` is decoded.
    ///
    /// # Errors
    ///
    /// - [`MetainfoError::InvalidUri`] if `uri` is not a URI
    /// - [`MetainfoError::MissingHash`] if there is no `xt` or it is not `urn:btih:`
    /// - [`MetainfoError::InvalidHash`] if the hash is not 40 hex characters
    pub fn parse(uri: &str) -> Result<Self, MetainfoError> {
        let url = Url::parse(uri)?;

        let mut xt = None;
        let mut display_name = None;
        let mut trackers = Vec::new();

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "xt" if xt.is_none() => xt = Some(value.into_owned()),
                "dn" if display_name.is_none() => display_name = Some(value.into_owned()),
                "tr" => trackers.push(value.into_owned()),
                _ => {}
            }
        }

        let hash = xt
            .as_deref()
            .and_then(|xt| xt.strip_prefix(MAGNET_HASH_PREFIX))
            .ok_or(MetainfoError::MissingHash)?;
        let info_hash = InfoHash::from_hex(hash)?;

        let mut magnet = Self::new(info_hash);
        magnet.display_name = display_name;
        for tracker in trackers {
            magnet.push_tracker(tracker);
        }

        debug!(
            info_hash = %magnet.info_hash,
            trackers = magnet.trackers.len(),
            udp_trackers = magnet.udp_trackers.len(),
            "parsed magnet link"
        );

        Ok(magnet)
    }

    /// Renders the link as a magnet URI.
    ///
    /// ```
    /// use btmeta::metainfo::{InfoHash, MagnetLink};
    ///
    /// let hash = InfoHash::new([0xab; 20]);
    /// let uri = MagnetLink::new(hash)
    ///     .with_display_name("My File")
    ///     .with_tracker("udp://tracker.example.com:80/announce")
    ///     .to_uri();
    ///
    /// let parsed = MagnetLink::parse(&uri).unwrap();
    /// assert_eq!(parsed.info_hash, hash);
    /// assert_eq!(parsed.display_name.as_deref(), Some("My File"));
    /// assert_eq!(parsed.udp_trackers, vec!["tracker.example.com:80"]);
    /// ```
    pub fn to_uri(&self) -> String {
        let mut uri = format!("magnet:?xt={}{}", MAGNET_HASH_PREFIX, self.info_hash.to_hex());

        if let Some(ref name) = self.display_name {
            uri.push_str("&dn=");
            uri.extend(byte_serialize(name.as_bytes()));
        }

        for tracker in &self.trackers {
            uri.push_str("&tr=");
            uri.extend(byte_serialize(tracker.as_bytes()));
        }

        uri
    }

    fn push_tracker(&mut self, tracker: String) {
        match udp_tracker_address(&tracker) {
            Some(addr) => self.udp_trackers.push(addr.to_string()),
            None => trace!(%tracker, "skipping non-udp tracker"),
        }
        self.trackers.push(tracker);
    }
}

/// Returns the `host:port` part of a `udp://` tracker URL.
///
/// The scheme and one trailing `/announce` are removed. Trackers using any
/// other scheme yield `None`.
///
/// ```
/// use btmeta::metainfo::udp_tracker_address;
///
/// assert_eq!(
///     udp_tracker_address("udp://tracker.example.com:1337/announce"),
///     Some("tracker.example.com:1337")
/// );
/// assert_eq!(udp_tracker_address("udp://10.0.0.1:6969"), Some("10.0.0.1:6969"));
/// assert_eq!(udp_tracker_address("http://tracker.example.com/announce"), None);
/// ```
pub fn udp_tracker_address(tracker: &str) -> Option<&str> {
    tracker
        .strip_prefix(UDP_TRACKER_SCHEME)
        .map(|rest| rest.strip_suffix(ANNOUNCE_SUFFIX).unwrap_or(rest))
}
