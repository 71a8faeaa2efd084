//! Bencode encoding and decoding ([BEP-3]).
//!
//! Bencode is the serialization format used for `.torrent` files. It has four
//! data types:
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` → 42 |
//! | Byte String | `<length>:<data>` | `4:spam` → "spam" |
//! | List | `l<items>e` | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` → {"foo": "bar"} |
//!
//! # Examples
//!
//! ```
//! use btmeta::bencode::{decode, encode, Value};
//!
//! let value = decode(b"l4:spam4:eggse").unwrap();
//! let list = value.as_list().unwrap();
//! assert_eq!(list[0].as_str(), Some("spam"));
//! assert_eq!(list[1].as_str(), Some("eggs"));
//!
//! assert_eq!(encode(&value), b"l4:spam4:eggse");
//! ```
//!
//! The decoder is lenient about integer form (`i-0e` and `i007e` decode) but
//! strict about dictionaries: keys must be byte strings and, unless
//! [`DecodeOptions::allow_duplicate_keys`] is set, unique. The encoder always
//! emits the canonical form, so re-encoding is how callers normalize input.
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod decode;
mod encode;
mod error;
mod value;

pub use decode::{decode, decode_prefix, DecodeOptions, Decoder};
pub use encode::{encode, encode_into};
pub use error::BencodeError;
pub use value::Value;
