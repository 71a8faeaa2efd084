use bytes::{Buf, BufMut, Bytes, BytesMut};

use super::error::TrackerError;
use crate::constants::{UDP_ACTION_CONNECT, UDP_ACTION_ERROR, UDP_PROTOCOL_ID};

const CONNECT_REQUEST_LEN: usize = 16;
const CONNECT_RESPONSE_LEN: usize = 16;
const HEADER_LEN: usize = 8;

/// The first packet sent to a UDP tracker.
///
/// # Examples
///
/// ```
/// use btmeta::tracker::ConnectRequest;
///
/// let packet = ConnectRequest::new(0xdeadbeef).encode();
/// assert_eq!(packet.len(), 16);
/// assert_eq!(&packet[12..], &[0xde, 0xad, 0xbe, 0xef]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectRequest {
    pub transaction_id: u32,
}

impl ConnectRequest {
    pub fn new(transaction_id: u32) -> Self {
        Self { transaction_id }
    }

    /// Serializes the request: protocol id, connect action, transaction id,
    /// all big-endian.
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(CONNECT_REQUEST_LEN);
        buf.put_u64(UDP_PROTOCOL_ID);
        buf.put_u32(UDP_ACTION_CONNECT);
        buf.put_u32(self.transaction_id);
        buf.freeze()
    }
}

/// A tracker's answer to a [`ConnectRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectResponse {
    pub transaction_id: u32,
    /// Id to present in subsequent announce requests.
    pub connection_id: u64,
}

impl ConnectResponse {
    /// Parses a connect response and checks it answers `request`.
    ///
    /// # Errors
    ///
    /// - [`TrackerError::TrackerFailure`] if the tracker sent an error packet
    /// - [`TrackerError::PacketTooShort`] if fewer than 16 bytes arrived
    /// - [`TrackerError::UnexpectedAction`] for any action other than connect
    /// - [`TrackerError::TransactionMismatch`] if the transaction id differs
    pub fn parse(mut data: &[u8], request: &ConnectRequest) -> Result<Self, TrackerError> {
        if data.len() < HEADER_LEN {
            return Err(TrackerError::PacketTooShort {
                expected: HEADER_LEN,
                actual: data.len(),
            });
        }

        let len = data.len();
        let action = data.get_u32();
        let transaction_id = data.get_u32();

        if transaction_id != request.transaction_id {
            return Err(TrackerError::TransactionMismatch {
                sent: request.transaction_id,
                received: transaction_id,
            });
        }

        match action {
            UDP_ACTION_CONNECT => {}
            UDP_ACTION_ERROR => {
                let message = String::from_utf8_lossy(data).into_owned();
                return Err(TrackerError::TrackerFailure(message));
            }
            other => return Err(TrackerError::UnexpectedAction(other)),
        }

        if len < CONNECT_RESPONSE_LEN {
            return Err(TrackerError::PacketTooShort {
                expected: CONNECT_RESPONSE_LEN,
                actual: len,
            });
        }

        Ok(Self {
            transaction_id,
            connection_id: data.get_u64(),
        })
    }
}
