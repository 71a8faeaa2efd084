use super::error::BencodeError;
use super::value::Value;
use crate::constants::MAX_BENCODE_DEPTH;
use bytes::Bytes;
use std::collections::BTreeMap;

/// Tunables for [`Decoder`].
///
/// # Examples
///
/// ```
/// use btmeta::bencode::{DecodeOptions, Decoder};
///
/// let options = DecodeOptions::new().allow_duplicate_keys(true);
/// let mut decoder = Decoder::with_options(b"d1:ai1e1:ai2ee", options);
/// let value = decoder.decode_value().unwrap();
/// assert_eq!(value.get(b"a").and_then(|v| v.as_integer()), Some(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    max_depth: usize,
    allow_duplicate_keys: bool,
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum nesting of lists and dictionaries.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// When enabled, a repeated dictionary key overwrites the earlier entry
    /// instead of failing with [`BencodeError::DuplicateKey`].
    pub fn allow_duplicate_keys(mut self, allow: bool) -> Self {
        self.allow_duplicate_keys = allow;
        self
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: MAX_BENCODE_DEPTH,
            allow_duplicate_keys: false,
        }
    }
}

/// A cursor over a bencoded buffer.
///
/// The decoder keeps an explicit position into the input, so list and
/// dictionary terminators are found by peeking one byte without consuming it.
/// Each call to [`decode_value`](Decoder::decode_value) consumes exactly one
/// value.
///
/// # Examples
///
/// ```
/// use btmeta::bencode::{Decoder, Value};
///
/// let mut decoder = Decoder::new(b"i1e4:spam");
/// assert_eq!(decoder.decode_value().unwrap(), Value::Integer(1));
/// assert_eq!(decoder.position(), 3);
/// assert_eq!(decoder.decode_value().unwrap().as_str(), Some("spam"));
/// assert!(decoder.is_empty());
/// ```
#[derive(Debug)]
pub struct Decoder<'a> {
    data: &'a [u8],
    pos: usize,
    options: DecodeOptions,
}

impl<'a> Decoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_options(data, DecodeOptions::default())
    }

    pub fn with_options(data: &'a [u8], options: DecodeOptions) -> Self {
        Self {
            data,
            pos: 0,
            options,
        }
    }

    /// Offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The bytes not yet consumed.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos.min(self.data.len())..]
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Decodes one value starting at the current position.
    ///
    /// # Errors
    ///
    /// Returns the first grammar violation encountered; the decoder does not
    /// attempt to resynchronize afterwards.
    pub fn decode_value(&mut self) -> Result<Value, BencodeError> {
        self.value(0)
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn value(&mut self, depth: usize) -> Result<Value, BencodeError> {
        if depth > self.options.max_depth {
            return Err(BencodeError::NestingTooDeep(self.pos));
        }

        match self.peek() {
            None => Err(BencodeError::UnexpectedEnd(self.pos)),
            Some(b'i') => self.integer(),
            Some(b'l') => self.list(depth),
            Some(b'd') => self.dict(depth),
            Some(b'0'..=b'9') => self.byte_string().map(Value::Bytes),
            Some(byte) => Err(BencodeError::InvalidFormat {
                pos: self.pos,
                byte,
            }),
        }
    }

    fn integer(&mut self) -> Result<Value, BencodeError> {
        self.pos += 1;

        let negative = self.peek() == Some(b'-');
        if negative {
            self.pos += 1;
        }

        let digits_start = self.pos;
        let mut value: i64 = 0;

        loop {
            match self.peek() {
                None => return Err(BencodeError::UnexpectedEnd(self.pos)),
                Some(b'e') => break,
                Some(c @ b'0'..=b'9') => {
                    let digit = i64::from(c - b'0');
                    // Accumulate on the negative side so i64::MIN fits.
                    let next = value.checked_mul(10).and_then(|v| {
                        if negative {
                            v.checked_sub(digit)
                        } else {
                            v.checked_add(digit)
                        }
                    });
                    value = next.ok_or(BencodeError::InvalidInteger {
                        pos: digits_start,
                        reason: "out of range",
                    })?;
                    self.pos += 1;
                }
                Some(_) => {
                    return Err(BencodeError::InvalidInteger {
                        pos: self.pos,
                        reason: "expected digit",
                    })
                }
            }
        }

        if self.pos == digits_start {
            return Err(BencodeError::InvalidInteger {
                pos: digits_start,
                reason: "no digits",
            });
        }

        self.pos += 1;
        Ok(Value::Integer(value))
    }

    fn byte_string(&mut self) -> Result<Bytes, BencodeError> {
        let prefix_start = self.pos;
        let mut len: usize = 0;

        loop {
            match self.peek() {
                None => return Err(BencodeError::UnexpectedEnd(self.pos)),
                Some(b':') => break,
                Some(c @ b'0'..=b'9') => {
                    len = len
                        .checked_mul(10)
                        .and_then(|l| l.checked_add(usize::from(c - b'0')))
                        .ok_or(BencodeError::InvalidLength(prefix_start))?;
                    self.pos += 1;
                }
                Some(_) => return Err(BencodeError::InvalidLength(self.pos)),
            }
        }

        self.pos += 1;

        let end = match self.pos.checked_add(len) {
            Some(end) if end <= self.data.len() => end,
            _ => return Err(BencodeError::UnexpectedEnd(self.data.len())),
        };

        let bytes = Bytes::copy_from_slice(&self.data[self.pos..end]);
        self.pos = end;
        Ok(bytes)
    }

    fn list(&mut self, depth: usize) -> Result<Value, BencodeError> {
        self.pos += 1;
        let mut list = Vec::new();

        loop {
            match self.peek() {
                None => return Err(BencodeError::UnexpectedEnd(self.pos)),
                Some(b'e') => break,
                Some(_) => list.push(self.value(depth + 1)?),
            }
        }

        self.pos += 1;
        Ok(Value::List(list))
    }

    fn dict(&mut self, depth: usize) -> Result<Value, BencodeError> {
        self.pos += 1;
        let mut dict = BTreeMap::new();

        loop {
            let key_pos = self.pos;
            let key = match self.peek() {
                None => return Err(BencodeError::UnexpectedEnd(self.pos)),
                Some(b'e') => break,
                Some(b'0'..=b'9') => self.byte_string()?,
                Some(_) => return Err(BencodeError::InvalidKey(key_pos)),
            };

            if !self.options.allow_duplicate_keys && dict.contains_key(&key) {
                return Err(BencodeError::DuplicateKey {
                    pos: key_pos,
                    key: String::from_utf8_lossy(&key).into_owned(),
                });
            }

            let value = self.value(depth + 1)?;
            dict.insert(key, value);
        }

        self.pos += 1;
        Ok(Value::Dict(dict))
    }
}

/// Decodes a buffer holding exactly one bencoded value.
///
/// # Errors
///
/// Fails on any grammar violation, and with [`BencodeError::TrailingData`]
/// when bytes remain after the value.
///
/// # Examples
///
/// ```
/// use btmeta::bencode::{decode, BencodeError};
///
/// assert_eq!(decode(b"i42e").unwrap().as_integer(), Some(42));
/// assert_eq!(decode(b"i42ex"), Err(BencodeError::TrailingData(4)));
/// ```
pub fn decode(data: &[u8]) -> Result<Value, BencodeError> {
    let mut decoder = Decoder::new(data);
    let value = decoder.decode_value()?;

    if !decoder.is_empty() {
        return Err(BencodeError::TrailingData(decoder.position()));
    }

    Ok(value)
}

/// Decodes the first value in `data`, ignoring anything after it.
///
/// Returns the value together with the number of bytes it occupied.
pub fn decode_prefix(data: &[u8]) -> Result<(Value, usize), BencodeError> {
    let mut decoder = Decoder::new(data);
    let value = decoder.decode_value()?;
    Ok((value, decoder.position()))
}
