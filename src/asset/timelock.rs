//! Input timelocks

use serde::{Deserialize, Serialize};

use crate::rlp::{Decodable, Encodable, RlpError, RlpItem};

/// Earliest point at which an input may be spent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Timelock {
    /// Absolute block number
    Block(u64),
    /// Blocks since the spent output was created
    BlockAge(u64),
    /// Absolute unix time
    Time(u64),
    /// Seconds since the spent output was created
    TimeAge(u64),
}

impl Timelock {
    pub fn type_code(&self) -> u8 {
        match self {
            Timelock::Block(_) => 1,
            Timelock::BlockAge(_) => 2,
            Timelock::Time(_) => 3,
            Timelock::TimeAge(_) => 4,
        }
    }

    pub fn value(&self) -> u64 {
        match *self {
            Timelock::Block(v) | Timelock::BlockAge(v) | Timelock::Time(v) | Timelock::TimeAge(v) => v,
        }
    }
}

/// `[typeCode, value]`; absence is encoded by the enclosing optional list
impl Encodable for Timelock {
    fn to_rlp(&self) -> RlpItem {
        RlpItem::list(vec![RlpItem::uint(u64::from(self.type_code())), RlpItem::uint(self.value())])
    }
}

impl Decodable for Timelock {
    fn from_rlp(item: &RlpItem) -> Result<Self, RlpError> {
        let fields = item.expect_list(2)?;
        let value = fields[1].as_u64()?;
        match fields[0].as_u64()? {
            1 => Ok(Timelock::Block(value)),
            2 => Ok(Timelock::BlockAge(value)),
            3 => Ok(Timelock::Time(value)),
            4 => Ok(Timelock::TimeAge(value)),
            other => Err(RlpError::UnexpectedTag(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rlp::{decode_optional, encode_optional};

    #[test]
    fn test_absent_is_empty_list() {
        assert_eq!(encode_optional::<Timelock>(None).encode(), vec![0xc0]);
    }

    #[test]
    fn test_present_is_nested_pair() {
        let item = encode_optional(Some(&Timelock::TimeAge(10)));
        assert_eq!(item.encode(), vec![0xc3, 0xc2, 0x04, 0x0a]);
        assert_eq!(decode_optional::<Timelock>(&item).unwrap(), Some(Timelock::TimeAge(10)));
    }

    #[test]
    fn test_unknown_code_rejected() {
        let item = RlpItem::list(vec![RlpItem::uint(5), RlpItem::uint(1)]);
        assert_eq!(Timelock::from_rlp(&item), Err(RlpError::UnexpectedTag(5)));
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(Timelock::BlockAge(3)).unwrap();
        assert_eq!(json, serde_json::json!({"type": "blockAge", "value": 3}));
        let none: Option<Timelock> = None;
        assert_eq!(serde_json::to_value(none).unwrap(), serde_json::Value::Null);
    }
}
