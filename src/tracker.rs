//! UDP tracker packet format ([BEP-15]).
//!
//! Only the connect exchange is modelled here; sockets, retries and announce
//! requests belong to the transfer engine.
//!
//! ```
//! use btmeta::tracker::{ConnectRequest, ConnectResponse};
//!
//! let request = ConnectRequest::new(7);
//! let mut reply = vec![0, 0, 0, 0, 0, 0, 0, 7];
//! reply.extend_from_slice(&42u64.to_be_bytes());
//!
//! let response = ConnectResponse::parse(&reply, &request).unwrap();
//! assert_eq!(response.connection_id, 42);
//! ```
//!
//! [BEP-15]: http://bittorrent.org/beps/bep_0015.html

mod error;
mod udp;

pub use error::TrackerError;
pub use udp::{ConnectRequest, ConnectResponse};
