//! Account and shard management actions

use serde::{Deserialize, Serialize};

use super::expect_tag;
use crate::address::PlatformAddress;
use crate::constants::action_tag;
use crate::primitives::{hex_serde, NetworkId, H512, U64};
use crate::rlp::{decode_list_with, encode_list, Decodable, Encodable, RlpError, RlpItem};

/// Decode a list of account ids as addresses on `network_id`
fn decode_addresses(item: &RlpItem, network_id: NetworkId) -> Result<Vec<PlatformAddress>, RlpError> {
    decode_list_with(item, |account| PlatformAddress::from_rlp_on(account, network_id))
}

/// Transfer CCC to another account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pay {
    pub receiver: PlatformAddress,
    pub quantity: U64,
}

impl Pay {
    pub fn new(receiver: PlatformAddress, quantity: U64) -> Self {
        Self { receiver, quantity }
    }

    pub fn from_rlp_on(item: &RlpItem, network_id: NetworkId) -> Result<Self, RlpError> {
        let f = item.expect_list(3)?;
        expect_tag(&f[0], action_tag::PAY)?;
        Ok(Self::new(
            PlatformAddress::from_rlp_on(&f[1], network_id)?,
            U64::from_rlp(&f[2])?,
        ))
    }
}

impl Encodable for Pay {
    fn to_rlp(&self) -> RlpItem {
        RlpItem::list(vec![
            RlpItem::uint(u64::from(action_tag::PAY)),
            self.receiver.to_rlp(),
            self.quantity.to_rlp(),
        ])
    }
}

/// Register a secondary signing key for the sender's account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetRegularKey {
    pub key: H512,
}

impl Encodable for SetRegularKey {
    fn to_rlp(&self) -> RlpItem {
        RlpItem::list(vec![
            RlpItem::uint(u64::from(action_tag::SET_REGULAR_KEY)),
            self.key.to_rlp(),
        ])
    }
}

impl Decodable for SetRegularKey {
    fn from_rlp(item: &RlpItem) -> Result<Self, RlpError> {
        let f = item.expect_list(2)?;
        expect_tag(&f[0], action_tag::SET_REGULAR_KEY)?;
        Ok(Self {
            key: H512::from_rlp(&f[1])?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShard {
    pub users: Vec<PlatformAddress>,
}

impl CreateShard {
    pub fn from_rlp_on(item: &RlpItem, network_id: NetworkId) -> Result<Self, RlpError> {
        let f = item.expect_list(2)?;
        expect_tag(&f[0], action_tag::CREATE_SHARD)?;
        Ok(Self {
            users: decode_addresses(&f[1], network_id)?,
        })
    }
}

impl Encodable for CreateShard {
    fn to_rlp(&self) -> RlpItem {
        RlpItem::list(vec![
            RlpItem::uint(u64::from(action_tag::CREATE_SHARD)),
            encode_list(&self.users),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetShardOwners {
    pub shard_id: u16,
    pub owners: Vec<PlatformAddress>,
}

impl SetShardOwners {
    pub fn from_rlp_on(item: &RlpItem, network_id: NetworkId) -> Result<Self, RlpError> {
        let f = item.expect_list(3)?;
        expect_tag(&f[0], action_tag::SET_SHARD_OWNERS)?;
        Ok(Self {
            shard_id: u16::from_rlp(&f[1])?,
            owners: decode_addresses(&f[2], network_id)?,
        })
    }
}

impl Encodable for SetShardOwners {
    fn to_rlp(&self) -> RlpItem {
        RlpItem::list(vec![
            RlpItem::uint(u64::from(action_tag::SET_SHARD_OWNERS)),
            self.shard_id.to_rlp(),
            encode_list(&self.owners),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetShardUsers {
    pub shard_id: u16,
    pub users: Vec<PlatformAddress>,
}

impl SetShardUsers {
    pub fn from_rlp_on(item: &RlpItem, network_id: NetworkId) -> Result<Self, RlpError> {
        let f = item.expect_list(3)?;
        expect_tag(&f[0], action_tag::SET_SHARD_USERS)?;
        Ok(Self {
            shard_id: u16::from_rlp(&f[1])?,
            users: decode_addresses(&f[2], network_id)?,
        })
    }
}

impl Encodable for SetShardUsers {
    fn to_rlp(&self) -> RlpItem {
        RlpItem::list(vec![
            RlpItem::uint(u64::from(action_tag::SET_SHARD_USERS)),
            self.shard_id.to_rlp(),
            encode_list(&self.users),
        ])
    }
}

/// Opaque payload routed to a custom action handler on the node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Custom {
    pub handler_id: u64,
    #[serde(with = "hex_serde::bytes")]
    pub bytes: Vec<u8>,
}

impl Encodable for Custom {
    fn to_rlp(&self) -> RlpItem {
        RlpItem::list(vec![
            RlpItem::uint(u64::from(action_tag::CUSTOM)),
            self.handler_id.to_rlp(),
            RlpItem::bytes(self.bytes.clone()),
        ])
    }
}

impl Decodable for Custom {
    fn from_rlp(item: &RlpItem) -> Result<Self, RlpError> {
        let f = item.expect_list(3)?;
        expect_tag(&f[0], action_tag::CUSTOM)?;
        Ok(Self {
            handler_id: u64::from_rlp(&f[1])?,
            bytes: f[2].as_bytes()?.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::H160;
    use crate::transaction::Action;

    fn account(n: u8) -> PlatformAddress {
        PlatformAddress::from_account_id(NetworkId::TESTNET, H160([n; 20]))
    }

    fn roundtrip(action: Action) {
        assert_eq!(Action::decode_on(&action.rlp_bytes(), NetworkId::TESTNET).unwrap(), action);
        let json = action.to_json().unwrap();
        assert_eq!(json["type"], action.type_name());
        assert_eq!(Action::from_json(json).unwrap(), action);
    }

    #[test]
    fn test_pay_encoding() {
        let pay = Pay::new(account(0), U64::new(11));
        let mut expected = vec![0xd7, 0x02, 0x94];
        expected.extend_from_slice(&[0u8; 20]);
        expected.push(0x0b);
        assert_eq!(pay.rlp_bytes(), expected);
        roundtrip(pay.into());
    }

    #[test]
    fn test_pay_json_uses_bech32_receiver() {
        let receiver = account(4);
        let json = Action::from(Pay::new(receiver, U64::new(0x10))).to_json().unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "pay", "receiver": receiver.to_string(), "quantity": "0x10"})
        );
        assert!(json["receiver"].as_str().unwrap().starts_with("tcc1"));
    }

    #[test]
    fn test_receiver_takes_envelope_network() {
        let bytes = Pay::new(account(4), U64::new(1)).rlp_bytes();
        let item = RlpItem::decode(&bytes).unwrap();
        let decoded = Pay::from_rlp_on(&item, NetworkId::MAINNET).unwrap();
        assert_eq!(decoded.receiver.network_id, NetworkId::MAINNET);
        assert_eq!(decoded.receiver.account_id, H160([4; 20]));
    }

    #[test]
    fn test_platform_roundtrips() {
        roundtrip(SetRegularKey { key: H512([7; 64]) }.into());
        roundtrip(CreateShard { users: vec![account(1), account(2)] }.into());
        roundtrip(SetShardOwners { shard_id: 3, owners: vec![account(1)] }.into());
        roundtrip(SetShardUsers { shard_id: u16::MAX, users: vec![] }.into());
        roundtrip(Custom { handler_id: 2, bytes: vec![0xc0, 0x01] }.into());
    }

    #[test]
    fn test_tag_mismatch_rejected() {
        let item = SetShardUsers { shard_id: 1, users: vec![] }.to_rlp();
        assert_eq!(
            SetShardOwners::from_rlp_on(&item, NetworkId::TESTNET),
            Err(RlpError::UnexpectedTag(0x06))
        );
    }

    #[test]
    fn test_custom_json_bytes_hex() {
        let json = serde_json::to_value(Action::from(Custom { handler_id: 1, bytes: vec![0xab] })).unwrap();
        assert_eq!(json, serde_json::json!({"type": "custom", "handlerId": 1, "bytes": "ab"}));
    }
}
