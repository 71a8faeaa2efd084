use super::value::Value;
use bytes::BufMut;

/// Encodes a value in canonical bencode form.
///
/// - Integers: `i<number>e`, no leading zeros
/// - Byte strings: `<length>:<data>`
/// - Lists: `l<items>e`
/// - Dictionaries: `d<key><value>...e`, keys in ascending byte order
///
/// Dictionary order does not depend on the order keys had in any input the
/// value was decoded from, so equal values always encode to equal bytes.
///
/// # Examples
///
/// ```
/// use btmeta::bencode::{decode, encode};
///
/// // Keys out of order on input come back sorted.
/// let value = decode(b"d4:spam4:eggs3:cow3:mooe").unwrap();
/// assert_eq!(encode(&value), b"d3:cow3:moo4:spam4:eggse");
/// ```
pub fn encode(value: &Value) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_into(value, &mut buf);
    buf
}

/// Appends the canonical encoding of `value` to `buf`.
pub fn encode_into<B: BufMut>(value: &Value, buf: &mut B) {
    match value {
        Value::Integer(i) => {
            buf.put_u8(b'i');
            buf.put_slice(i.to_string().as_bytes());
            buf.put_u8(b'e');
        }
        Value::Bytes(b) => put_byte_string(b, buf),
        Value::List(l) => {
            buf.put_u8(b'l');
            for item in l {
                encode_into(item, buf);
            }
            buf.put_u8(b'e');
        }
        Value::Dict(d) => {
            buf.put_u8(b'd');
            for (key, val) in d {
                put_byte_string(key, buf);
                encode_into(val, buf);
            }
            buf.put_u8(b'e');
        }
    }
}

fn put_byte_string<B: BufMut>(bytes: &[u8], buf: &mut B) {
    buf.put_slice(bytes.len().to_string().as_bytes());
    buf.put_u8(b':');
    buf.put_slice(bytes);
}
