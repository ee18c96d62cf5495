//! RLP value tree over the `rlp` crate
//!
//! Encoding goes through [`RlpStream`]. Decoding walks an [`Rlp`] view and
//! additionally rejects what a lenient reader would accept: trailing bytes,
//! single bytes wrapped in a header, long-form lengths for short payloads
//! and list payloads that do not split into whole items.

use ::rlp::{DecoderError, Rlp, RlpStream};

use super::RlpError;

/// A decoded or to-be-encoded RLP value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RlpItem {
    Bytes(Vec<u8>),
    List(Vec<RlpItem>),
}

const SHORT_LIMIT: usize = 56;
const STRING_OFFSET: u8 = 0x80;

impl RlpItem {
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        RlpItem::Bytes(data.into())
    }

    /// Minimal big-endian integer; zero is the empty string
    pub fn uint(value: u64) -> Self {
        let be = value.to_be_bytes();
        let start = be.iter().position(|&b| b != 0).unwrap_or(be.len());
        RlpItem::Bytes(be[start..].to_vec())
    }

    pub fn list(items: Vec<RlpItem>) -> Self {
        RlpItem::List(items)
    }

    pub fn empty_list() -> Self {
        RlpItem::List(Vec::new())
    }

    /// Serialize to canonical bytes
    pub fn encode(&self) -> Vec<u8> {
        ::rlp::encode(self).to_vec()
    }

    /// Parse exactly one item spanning all of `bytes`
    pub fn decode(bytes: &[u8]) -> Result<Self, RlpError> {
        if bytes.is_empty() {
            return Err(RlpError::TooShort {
                needed: 1,
                available: 0,
            });
        }
        let (item, consumed) = decode_view(&Rlp::new(bytes))?;
        if consumed != bytes.len() {
            return Err(RlpError::TrailingBytes(bytes.len() - consumed));
        }
        Ok(item)
    }

    pub fn is_list(&self) -> bool {
        matches!(self, RlpItem::List(_))
    }

    pub fn as_bytes(&self) -> Result<&[u8], RlpError> {
        match self {
            RlpItem::Bytes(data) => Ok(data),
            RlpItem::List(_) => Err(RlpError::ExpectedBytes),
        }
    }

    pub fn as_list(&self) -> Result<&[RlpItem], RlpError> {
        match self {
            RlpItem::List(items) => Ok(items),
            RlpItem::Bytes(_) => Err(RlpError::ExpectedList),
        }
    }

    /// List with exactly `len` elements
    pub fn expect_list(&self, len: usize) -> Result<&[RlpItem], RlpError> {
        let items = self.as_list()?;
        if items.len() != len {
            return Err(RlpError::ListLength {
                expected: len,
                actual: items.len(),
            });
        }
        Ok(items)
    }

    /// Canonical integer bytes no wider than `max` bytes
    pub fn as_uint_bytes(&self, max: usize) -> Result<&[u8], RlpError> {
        let data = self.as_bytes()?;
        if data.first() == Some(&0) {
            return Err(RlpError::LeadingZero);
        }
        if data.len() > max {
            return Err(RlpError::IntegerOverflow { max });
        }
        Ok(data)
    }

    pub fn as_u64(&self) -> Result<u64, RlpError> {
        let data = self.as_uint_bytes(8)?;
        Ok(data.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b)))
    }

    pub fn as_u16(&self) -> Result<u16, RlpError> {
        let data = self.as_uint_bytes(2)?;
        Ok(data.iter().fold(0u16, |acc, b| (acc << 8) | u16::from(*b)))
    }
}

impl ::rlp::Encodable for RlpItem {
    fn rlp_append(&self, stream: &mut RlpStream) {
        match self {
            RlpItem::Bytes(data) => {
                stream.append(data);
            }
            RlpItem::List(items) => {
                stream.begin_list(items.len());
                for item in items {
                    stream.append(item);
                }
            }
        }
    }
}

impl From<DecoderError> for RlpError {
    fn from(err: DecoderError) -> Self {
        match err {
            DecoderError::RlpExpectedToBeList => RlpError::ExpectedList,
            DecoderError::RlpExpectedToBeData => RlpError::ExpectedBytes,
            DecoderError::RlpDataLenWithZeroPrefix | DecoderError::RlpListLenWithZeroPrefix => {
                RlpError::NonCanonical("length prefix with leading zero")
            }
            DecoderError::RlpInvalidIndirection => {
                RlpError::NonCanonical("long form used for short payload")
            }
            other => RlpError::Malformed(format!("{:?}", other)),
        }
    }
}

/// Decode the item at the front of `view`, returning it with its size
fn decode_view(view: &Rlp<'_>) -> Result<(RlpItem, usize), RlpError> {
    let raw = view.as_raw();
    let info = view.payload_info()?;
    let total = info
        .header_len
        .checked_add(info.value_len)
        .ok_or_else(|| RlpError::Malformed("length overflows usize".to_string()))?;
    if total > raw.len() {
        return Err(RlpError::TooShort {
            needed: total,
            available: raw.len(),
        });
    }
    if info.header_len > 1 {
        if raw[1] == 0 {
            return Err(RlpError::NonCanonical("length prefix with leading zero"));
        }
        if info.value_len < SHORT_LIMIT {
            return Err(RlpError::NonCanonical("long form used for short payload"));
        }
    }

    if !view.is_list() {
        if info.header_len == 1 && info.value_len == 1 && raw[1] < STRING_OFFSET {
            return Err(RlpError::NonCanonical("single byte below 0x80 wrapped in header"));
        }
        return Ok((RlpItem::Bytes(view.data()?.to_vec()), total));
    }

    let mut items = Vec::new();
    let mut consumed = 0usize;
    for index in 0..view.item_count()? {
        let (item, size) = decode_view(&view.at(index)?)?;
        items.push(item);
        consumed += size;
    }
    if consumed != info.value_len {
        return Err(RlpError::Malformed(
            "list payload does not split into whole items".to_string(),
        ));
    }
    Ok((RlpItem::List(items), total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_byte_is_itself() {
        assert_eq!(RlpItem::bytes(vec![0x7f]).encode(), vec![0x7f]);
        assert_eq!(RlpItem::bytes(vec![0x80]).encode(), vec![0x81, 0x80]);
    }

    #[test]
    fn test_empty_values() {
        assert_eq!(RlpItem::bytes(Vec::new()).encode(), vec![0x80]);
        assert_eq!(RlpItem::empty_list().encode(), vec![0xc0]);
        assert_eq!(RlpItem::uint(0).encode(), vec![0x80]);
    }

    #[test]
    fn test_known_vectors() {
        // "dog"
        assert_eq!(RlpItem::bytes(b"dog".to_vec()).encode(), vec![0x83, b'd', b'o', b'g']);
        // ["cat", "dog"]
        let list = RlpItem::list(vec![RlpItem::bytes(b"cat".to_vec()), RlpItem::bytes(b"dog".to_vec())]);
        assert_eq!(
            list.encode(),
            vec![0xc8, 0x83, b'c', b'a', b't', 0x83, b'd', b'o', b'g']
        );
        // 1024
        assert_eq!(RlpItem::uint(1024).encode(), vec![0x82, 0x04, 0x00]);
        // [[], [[]], [[], [[]]]]
        let nested = RlpItem::list(vec![
            RlpItem::empty_list(),
            RlpItem::list(vec![RlpItem::empty_list()]),
            RlpItem::list(vec![
                RlpItem::empty_list(),
                RlpItem::list(vec![RlpItem::empty_list()]),
            ]),
        ]);
        assert_eq!(nested.encode(), vec![0xc7, 0xc0, 0xc1, 0xc0, 0xc3, 0xc0, 0xc1, 0xc0]);
    }

    #[test]
    fn test_long_string() {
        let data = vec![b'a'; 56];
        let encoded = RlpItem::bytes(data.clone()).encode();
        assert_eq!(&encoded[..2], &[0xb8, 56]);
        assert_eq!(RlpItem::decode(&encoded).unwrap(), RlpItem::Bytes(data));
    }

    #[test]
    fn test_long_list() {
        let items: Vec<RlpItem> = (0..30).map(|i| RlpItem::uint(1000 + i)).collect();
        let list = RlpItem::list(items);
        let encoded = list.encode();
        assert_eq!(encoded[0], 0xf8);
        assert_eq!(RlpItem::decode(&encoded).unwrap(), list);
    }

    #[test]
    fn test_matches_stream_encoding() {
        let mut stream = RlpStream::new_list(3);
        stream.append(&vec![0x74u8, 0x63]);
        stream.begin_list(0);
        stream.append_empty_data();
        let item = RlpItem::list(vec![
            RlpItem::bytes(b"tc".to_vec()),
            RlpItem::empty_list(),
            RlpItem::uint(0),
        ]);
        assert_eq!(item.encode(), stream.out().to_vec());
        assert_eq!(item.encode(), vec![0xc5, 0x82, 0x74, 0x63, 0xc0, 0x80]);
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        assert_eq!(RlpItem::decode(&[0x80, 0x00]), Err(RlpError::TrailingBytes(1)));
    }

    #[test]
    fn test_truncated_rejected() {
        assert!(matches!(RlpItem::decode(&[0x83, b'd', b'o']), Err(RlpError::TooShort { .. })));
        assert!(matches!(RlpItem::decode(&[0xc2, 0x80]), Err(RlpError::TooShort { .. })));
        assert!(matches!(RlpItem::decode(&[]), Err(RlpError::TooShort { .. })));
    }

    #[test]
    fn test_non_canonical_rejected() {
        // single byte below 0x80 must not carry a header
        assert!(matches!(RlpItem::decode(&[0x81, 0x05]), Err(RlpError::NonCanonical(_))));
        // long form for a 3-byte string
        assert!(matches!(
            RlpItem::decode(&[0xb8, 0x03, 1, 2, 3]),
            Err(RlpError::NonCanonical(_))
        ));
        // length with leading zero
        let mut bad = vec![0xb9, 0x00, 0x38];
        bad.extend(vec![0u8; 56]);
        assert!(matches!(RlpItem::decode(&bad), Err(RlpError::NonCanonical(_))));
    }

    #[test]
    fn test_list_item_overrunning_payload_rejected() {
        // list claims 2 bytes of payload but inner string claims 3
        assert!(RlpItem::decode(&[0xc2, 0x83, 0x01]).is_err());
    }

    #[test]
    fn test_integer_accessors() {
        assert_eq!(RlpItem::uint(0x1234).as_u64().unwrap(), 0x1234);
        assert_eq!(RlpItem::bytes(Vec::new()).as_u16().unwrap(), 0);
        assert!(matches!(
            RlpItem::bytes(vec![1, 2, 3]).as_u16(),
            Err(RlpError::IntegerOverflow { max: 2 })
        ));
        assert_eq!(RlpItem::bytes(vec![0, 1]).as_u64(), Err(RlpError::LeadingZero));
        assert_eq!(RlpItem::empty_list().as_u64(), Err(RlpError::ExpectedBytes));
    }

    #[test]
    fn test_expect_list() {
        let list = RlpItem::list(vec![RlpItem::uint(1)]);
        assert!(list.expect_list(1).is_ok());
        assert_eq!(
            list.expect_list(2),
            Err(RlpError::ListLength { expected: 2, actual: 1 })
        );
    }
}
