use std::collections::BTreeMap;

use bytes::Bytes;

use super::*;

#[test]
fn test_decode_integer() {
    assert_eq!(decode(b"i33554432e").unwrap(), Value::Integer(33_554_432));
    assert_eq!(decode(b"i-7e").unwrap(), Value::Integer(-7));
    assert_eq!(decode(b"i0e").unwrap(), Value::Integer(0));
}

#[test]
fn test_decode_integer_invalid() {
    assert!(matches!(
        decode(b"i-0e"),
        Err(BencodeError::InvalidInteger(_))
    ));
    assert!(decode(b"i007e").is_err());
    assert!(decode(b"ie").is_err());
    assert!(matches!(decode(b"i12"), Err(BencodeError::UnexpectedEof(_))));
}

#[test]
fn test_decode_binary_string() {
    let digest = [0xffu8, 0x00, 0xda, 0x39];
    let mut data = b"4:".to_vec();
    data.extend_from_slice(&digest);

    let value = decode(&data).unwrap();
    assert_eq!(value.as_bytes().map(|b| b.as_ref()), Some(digest.as_slice()));
    assert_eq!(value.as_str(), None);
}

#[test]
fn test_decode_string_overrun() {
    assert!(matches!(
        decode(b"10:short"),
        Err(BencodeError::UnexpectedEof(_))
    ));
    assert!(matches!(
        decode(b"4x:spam"),
        Err(BencodeError::InvalidStringLength(0))
    ));
}

#[test]
fn test_decode_files_list() {
    let value = decode(b"ld6:lengthi40e4:pathl1:xeed6:lengthi10e4:pathl1:yeee").unwrap();
    let files = value.as_list().unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0].get(b"length").and_then(Value::as_integer), Some(40));
    assert_eq!(
        files[1].get(b"path").and_then(Value::as_list).map(|p| p.len()),
        Some(1)
    );
}

#[test]
fn test_decode_dict_rejects_non_string_key() {
    assert!(matches!(
        decode(b"di1ei2ee"),
        Err(BencodeError::UnexpectedChar { found: 'i', offset: 1 })
    ));
}

#[test]
fn test_decode_nesting_limit() {
    let mut data = vec![b'l'; 100];
    data.extend(std::iter::repeat(b'e').take(100));
    assert!(matches!(decode(&data), Err(BencodeError::NestingTooDeep)));
}

#[test]
fn test_trailing_data_error() {
    assert!(matches!(
        decode(b"i42eextra"),
        Err(BencodeError::TrailingData(4))
    ));
}

#[test]
fn test_encode_sorts_dict_keys() {
    let mut dict = BTreeMap::new();
    dict.insert(Bytes::from_static(b"pieces"), Value::string(""));
    dict.insert(Bytes::from_static(b"piece length"), Value::Integer(32));
    dict.insert(Bytes::from_static(b"name"), Value::string("d"));

    assert_eq!(
        encode(&Value::Dict(dict)).unwrap(),
        b"d4:name1:d12:piece lengthi32e6:pieces0:e"
    );
}

#[test]
fn test_encode_to_writer() {
    let mut out = Vec::new();
    encode_to(&Value::List(vec![Value::Integer(-1), "ab".into()]), &mut out).unwrap();
    assert_eq!(out, b"li-1e2:abe");
}

#[test]
fn test_roundtrip_preserves_bytes() {
    let original = b"d8:announce15:http://test.com4:infod4:name4:test12:piece lengthi16384eee";
    let decoded = decode(original).unwrap();
    assert_eq!(encode(&decoded).unwrap(), original);
}
