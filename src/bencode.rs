//! Bencode encoding and decoding ([BEP-3]).
//!
//! Bencode is the serialization format of `.torrent` files. It has four data
//! types:
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` → 42 |
//! | Byte String | `<length>:<data>` | `4:spam` → "spam" |
//! | List | `l<items>e` | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` → {"foo": "bar"} |
//!
//! Dictionaries are kept in a [`BTreeMap`](std::collections::BTreeMap) keyed by
//! raw bytes, so encoding always emits keys in the sorted order the format
//! requires.
//!
//! # Examples
//!
//! ```
//! use torrent_builder::bencode::{decode, encode, Value};
//! use bytes::Bytes;
//! use std::collections::BTreeMap;
//!
//! let mut info = BTreeMap::new();
//! info.insert(Bytes::from_static(b"name"), Value::string("a.bin"));
//! info.insert(Bytes::from_static(b"length"), Value::Integer(0));
//!
//! let encoded = encode(&Value::Dict(info)).unwrap();
//! assert_eq!(encoded, b"d6:lengthi0e4:name5:a.bine");
//!
//! let decoded = decode(&encoded).unwrap();
//! assert_eq!(decoded.get(b"name").and_then(|v| v.as_str()), Some("a.bin"));
//! ```
//!
//! # Error Handling
//!
//! Decoding is strict:
//!
//! - [`BencodeError::UnexpectedEof`] - Input ended unexpectedly
//! - [`BencodeError::InvalidInteger`] - Malformed integer (e.g., leading zeros)
//! - [`BencodeError::UnexpectedChar`] - Unexpected character in input
//! - [`BencodeError::NestingTooDeep`] - Recursion limit exceeded
//! - [`BencodeError::TrailingData`] - Extra data after the value
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod decode;
mod encode;
mod error;
mod value;

pub use decode::decode;
pub use encode::{encode, encode_to};
pub use error::BencodeError;
pub use value::Value;

#[cfg(test)]
mod tests;
