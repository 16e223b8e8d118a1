use std::collections::BTreeMap;

use bytes::Bytes;

use super::error::BencodeError;
use super::value::Value;

const MAX_DEPTH: usize = 64;

/// Decodes exactly one bencode value from `data`.
///
/// # Errors
///
/// Fails on malformed input, on nesting deeper than 64 levels, and when bytes
/// remain after the value.
pub fn decode(data: &[u8]) -> Result<Value, BencodeError> {
    let mut decoder = Decoder { data, pos: 0 };
    let value = decoder.value(0)?;

    if decoder.pos != data.len() {
        return Err(BencodeError::TrailingData(decoder.pos));
    }

    Ok(value)
}

struct Decoder<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    fn peek(&self) -> Result<u8, BencodeError> {
        self.data
            .get(self.pos)
            .copied()
            .ok_or(BencodeError::UnexpectedEof(self.pos))
    }

    /// Advances to the next `delim` and returns the bytes skipped over.
    fn take_until(&mut self, delim: u8) -> Result<&'a [u8], BencodeError> {
        let data = self.data;
        let start = self.pos;
        let len = data[start..]
            .iter()
            .position(|&b| b == delim)
            .ok_or(BencodeError::UnexpectedEof(data.len()))?;
        self.pos = start + len + 1;
        Ok(&data[start..start + len])
    }

    fn value(&mut self, depth: usize) -> Result<Value, BencodeError> {
        if depth > MAX_DEPTH {
            return Err(BencodeError::NestingTooDeep);
        }

        match self.peek()? {
            b'i' => self.integer(),
            b'l' => self.list(depth),
            b'd' => self.dict(depth),
            b'0'..=b'9' => self.bytes().map(Value::Bytes),
            c => Err(BencodeError::UnexpectedChar {
                found: c as char,
                offset: self.pos,
            }),
        }
    }

    fn integer(&mut self) -> Result<Value, BencodeError> {
        self.pos += 1;
        let raw = self.take_until(b'e')?;

        let text = std::str::from_utf8(raw)
            .map_err(|_| BencodeError::InvalidInteger("invalid utf8".into()))?;

        if text.is_empty() {
            return Err(BencodeError::InvalidInteger("empty".into()));
        }

        if text.starts_with("-0") || (text.starts_with('0') && text.len() > 1) {
            return Err(BencodeError::InvalidInteger(format!(
                "leading zeros: {text}"
            )));
        }

        text.parse()
            .map(Value::Integer)
            .map_err(|_| BencodeError::InvalidInteger(text.into()))
    }

    fn bytes(&mut self) -> Result<Bytes, BencodeError> {
        let at = self.pos;
        let raw = self.take_until(b':')?;

        let len: usize = std::str::from_utf8(raw)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or(BencodeError::InvalidStringLength(at))?;

        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .ok_or(BencodeError::UnexpectedEof(self.data.len()))?;

        let bytes = Bytes::copy_from_slice(&self.data[self.pos..end]);
        self.pos = end;
        Ok(bytes)
    }

    fn list(&mut self, depth: usize) -> Result<Value, BencodeError> {
        self.pos += 1;
        let mut list = Vec::new();

        while self.peek()? != b'e' {
            list.push(self.value(depth + 1)?);
        }

        self.pos += 1;
        Ok(Value::List(list))
    }

    fn dict(&mut self, depth: usize) -> Result<Value, BencodeError> {
        self.pos += 1;
        let mut dict = BTreeMap::new();

        while self.peek()? != b'e' {
            let c = self.peek()?;
            if !c.is_ascii_digit() {
                return Err(BencodeError::UnexpectedChar {
                    found: c as char,
                    offset: self.pos,
                });
            }
            let key = self.bytes()?;
            let value = self.value(depth + 1)?;
            dict.insert(key, value);
        }

        self.pos += 1;
        Ok(Value::Dict(dict))
    }
}
