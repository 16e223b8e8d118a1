use std::io::Write;

use super::error::BencodeError;
use super::value::Value;

/// Encodes a bencode value to a byte vector.
///
/// Dictionary keys come out in lexicographic byte order, which is the only
/// order the format allows.
///
/// # Examples
///
/// ```
/// use torrent_builder::bencode::{encode, Value};
///
/// let list = Value::List(vec![Value::Integer(1), Value::string("two")]);
/// assert_eq!(encode(&list).unwrap(), b"li1e3:twoe");
/// ```
pub fn encode(value: &Value) -> Result<Vec<u8>, BencodeError> {
    let mut buf = Vec::new();
    encode_to(value, &mut buf)?;
    Ok(buf)
}

/// Encodes a bencode value into any writer.
///
/// # Errors
///
/// Returns [`BencodeError::Io`] if the writer fails.
pub fn encode_to<W: Write>(value: &Value, writer: &mut W) -> Result<(), BencodeError> {
    match value {
        Value::Integer(i) => write!(writer, "i{i}e")?,
        Value::Bytes(b) => write_bytes(b, writer)?,
        Value::List(items) => {
            writer.write_all(b"l")?;
            for item in items {
                encode_to(item, writer)?;
            }
            writer.write_all(b"e")?;
        }
        Value::Dict(entries) => {
            writer.write_all(b"d")?;
            for (key, val) in entries {
                write_bytes(key, writer)?;
                encode_to(val, writer)?;
            }
            writer.write_all(b"e")?;
        }
    }
    Ok(())
}

fn write_bytes<W: Write>(bytes: &[u8], writer: &mut W) -> std::io::Result<()> {
    write!(writer, "{}:", bytes.len())?;
    writer.write_all(bytes)
}
