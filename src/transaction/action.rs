//! The closed set of transaction actions

use serde::{Deserialize, Serialize};

use super::*;
use crate::address::PlatformAddress;
use crate::constants::action_tag;
use crate::crypto::EcdsaSignature;
use crate::primitives::{NetworkId, H256, U64};
use crate::rlp::{decode_list, decode_optional_with, encode_list, Decodable, Encodable, RlpError, RlpItem};

/// Every action a transaction can carry.
/// JSON is internally tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    #[serde(rename = "pay")]
    Pay(Pay),
    #[serde(rename = "setRegularKey")]
    SetRegularKey(SetRegularKey),
    #[serde(rename = "createShard")]
    CreateShard(CreateShard),
    #[serde(rename = "setShardOwners")]
    SetShardOwners(SetShardOwners),
    #[serde(rename = "setShardUsers")]
    SetShardUsers(SetShardUsers),
    #[serde(rename = "wrapCCC")]
    WrapCcc(WrapCcc),
    #[serde(rename = "store")]
    Store(Store),
    #[serde(rename = "remove")]
    Remove(Remove),
    #[serde(rename = "unwrapCCC")]
    UnwrapCcc(UnwrapCcc),
    #[serde(rename = "assetMint")]
    MintAsset(MintAsset),
    #[serde(rename = "assetTransfer")]
    TransferAsset(TransferAsset),
    #[serde(rename = "assetSchemeChange")]
    ChangeAssetScheme(ChangeAssetScheme),
    #[serde(rename = "assetCompose")]
    ComposeAsset(ComposeAsset),
    #[serde(rename = "assetDecompose")]
    DecomposeAsset(DecomposeAsset),
    #[serde(rename = "assetIncreaseSupply")]
    IncreaseAssetSupply(IncreaseAssetSupply),
    #[serde(rename = "custom")]
    Custom(Custom),
}

impl Action {
    /// JSON `type` string
    pub fn type_name(&self) -> &'static str {
        match self {
            Action::Pay(_) => "pay",
            Action::SetRegularKey(_) => "setRegularKey",
            Action::CreateShard(_) => "createShard",
            Action::SetShardOwners(_) => "setShardOwners",
            Action::SetShardUsers(_) => "setShardUsers",
            Action::WrapCcc(_) => "wrapCCC",
            Action::Store(_) => "store",
            Action::Remove(_) => "remove",
            Action::UnwrapCcc(_) => "unwrapCCC",
            Action::MintAsset(_) => "assetMint",
            Action::TransferAsset(_) => "assetTransfer",
            Action::ChangeAssetScheme(_) => "assetSchemeChange",
            Action::ComposeAsset(_) => "assetCompose",
            Action::DecomposeAsset(_) => "assetDecompose",
            Action::IncreaseAssetSupply(_) => "assetIncreaseSupply",
            Action::Custom(_) => "custom",
        }
    }

    /// RLP discriminant
    pub fn tag(&self) -> u8 {
        match self {
            Action::Pay(_) => action_tag::PAY,
            Action::SetRegularKey(_) => action_tag::SET_REGULAR_KEY,
            Action::CreateShard(_) => action_tag::CREATE_SHARD,
            Action::SetShardOwners(_) => action_tag::SET_SHARD_OWNERS,
            Action::SetShardUsers(_) => action_tag::SET_SHARD_USERS,
            Action::WrapCcc(_) => action_tag::WRAP_CCC,
            Action::Store(_) => action_tag::STORE,
            Action::Remove(_) => action_tag::REMOVE,
            Action::UnwrapCcc(_) => action_tag::UNWRAP_CCC,
            Action::MintAsset(_) => action_tag::MINT_ASSET,
            Action::TransferAsset(_) => action_tag::TRANSFER_ASSET,
            Action::ChangeAssetScheme(_) => action_tag::CHANGE_ASSET_SCHEME,
            Action::ComposeAsset(_) => action_tag::COMPOSE_ASSET,
            Action::DecomposeAsset(_) => action_tag::DECOMPOSE_ASSET,
            Action::IncreaseAssetSupply(_) => action_tag::INCREASE_ASSET_SUPPLY,
            Action::Custom(_) => action_tag::CUSTOM,
        }
    }

    /// Tracker of asset actions; `None` for platform actions
    pub fn tracker(&self) -> Option<H256> {
        match self {
            Action::UnwrapCcc(a) => Some(a.tracker()),
            Action::MintAsset(a) => Some(a.tracker()),
            Action::TransferAsset(a) => Some(a.tracker()),
            Action::ChangeAssetScheme(a) => Some(a.tracker()),
            Action::ComposeAsset(a) => Some(a.tracker()),
            Action::DecomposeAsset(a) => Some(a.tracker()),
            Action::IncreaseAssetSupply(a) => Some(a.tracker()),
            _ => None,
        }
    }

    /// Network id embedded in asset actions
    pub fn network_id(&self) -> Option<NetworkId> {
        match self {
            Action::UnwrapCcc(a) => Some(a.network_id),
            Action::MintAsset(a) => Some(a.network_id),
            Action::TransferAsset(a) => Some(a.network_id),
            Action::ChangeAssetScheme(a) => Some(a.network_id),
            Action::ComposeAsset(a) => Some(a.network_id),
            Action::DecomposeAsset(a) => Some(a.network_id),
            Action::IncreaseAssetSupply(a) => Some(a.network_id),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Result<serde_json::Value, TransactionError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn from_json(value: serde_json::Value) -> Result<Self, TransactionError> {
        Ok(serde_json::from_value(value)?)
    }
}

impl Encodable for Action {
    fn to_rlp(&self) -> RlpItem {
        match self {
            Action::Pay(a) => a.to_rlp(),
            Action::SetRegularKey(a) => a.to_rlp(),
            Action::CreateShard(a) => a.to_rlp(),
            Action::SetShardOwners(a) => a.to_rlp(),
            Action::SetShardUsers(a) => a.to_rlp(),
            Action::WrapCcc(a) => a.to_rlp(),
            Action::Store(a) => a.to_rlp(),
            Action::Remove(a) => a.to_rlp(),
            Action::UnwrapCcc(a) => a.to_rlp(),
            Action::MintAsset(a) => a.to_rlp(),
            Action::TransferAsset(a) => a.to_rlp(),
            Action::ChangeAssetScheme(a) => a.to_rlp(),
            Action::ComposeAsset(a) => a.to_rlp(),
            Action::DecomposeAsset(a) => a.to_rlp(),
            Action::IncreaseAssetSupply(a) => a.to_rlp(),
            Action::Custom(a) => a.to_rlp(),
        }
    }
}

impl Action {
    /// Decode an action. Platform actions carry bare account ids on the wire
    /// and take `network_id` from the enclosing transaction; asset actions
    /// use the network id they encode themselves.
    pub fn from_rlp_on(item: &RlpItem, network_id: NetworkId) -> Result<Self, RlpError> {
        let tag = item
            .as_list()?
            .first()
            .ok_or(RlpError::ListLength { expected: 1, actual: 0 })?
            .as_u64()?;
        let action = match u8::try_from(tag).map_err(|_| RlpError::UnexpectedTag(tag))? {
            action_tag::PAY => Action::Pay(Pay::from_rlp_on(item, network_id)?),
            action_tag::SET_REGULAR_KEY => Action::SetRegularKey(SetRegularKey::from_rlp(item)?),
            action_tag::CREATE_SHARD => Action::CreateShard(CreateShard::from_rlp_on(item, network_id)?),
            action_tag::SET_SHARD_OWNERS => {
                Action::SetShardOwners(SetShardOwners::from_rlp_on(item, network_id)?)
            }
            action_tag::SET_SHARD_USERS => {
                Action::SetShardUsers(SetShardUsers::from_rlp_on(item, network_id)?)
            }
            action_tag::WRAP_CCC => Action::WrapCcc(WrapCcc::from_rlp_on(item, network_id)?),
            action_tag::STORE => Action::Store(Store::from_rlp_on(item, network_id)?),
            action_tag::REMOVE => Action::Remove(Remove::from_rlp(item)?),
            action_tag::UNWRAP_CCC => Action::UnwrapCcc(UnwrapCcc::from_rlp(item)?),
            action_tag::MINT_ASSET => Action::MintAsset(MintAsset::from_rlp(item)?),
            action_tag::TRANSFER_ASSET => Action::TransferAsset(TransferAsset::from_rlp(item)?),
            action_tag::CHANGE_ASSET_SCHEME => {
                Action::ChangeAssetScheme(ChangeAssetScheme::from_rlp(item)?)
            }
            action_tag::COMPOSE_ASSET => Action::ComposeAsset(ComposeAsset::from_rlp(item)?),
            action_tag::DECOMPOSE_ASSET => Action::DecomposeAsset(DecomposeAsset::from_rlp(item)?),
            action_tag::INCREASE_ASSET_SUPPLY => {
                Action::IncreaseAssetSupply(IncreaseAssetSupply::from_rlp(item)?)
            }
            action_tag::CUSTOM => Action::Custom(Custom::from_rlp(item)?),
            _ => return Err(RlpError::UnexpectedTag(tag)),
        };
        Ok(action)
    }

    /// `from_rlp_on` over a complete byte string
    pub fn decode_on(bytes: &[u8], network_id: NetworkId) -> Result<Self, RlpError> {
        Self::from_rlp_on(&RlpItem::decode(bytes)?, network_id)
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Action {
                fn from(action: $variant) -> Self {
                    Action::$variant(action)
                }
            }
        )*
    };
}

impl_from_variant!(
    Pay,
    SetRegularKey,
    CreateShard,
    SetShardOwners,
    SetShardUsers,
    WrapCcc,
    Store,
    Remove,
    UnwrapCcc,
    MintAsset,
    TransferAsset,
    ChangeAssetScheme,
    ComposeAsset,
    DecomposeAsset,
    IncreaseAssetSupply,
    Custom,
);

/// Fail unless `item` is the discriminant `tag`
pub(crate) fn expect_tag(item: &RlpItem, tag: u8) -> Result<(), RlpError> {
    let found = item.as_u64()?;
    if found != u64::from(tag) {
        return Err(RlpError::UnexpectedTag(found));
    }
    Ok(())
}

/// `[]` or `[accountId]`, as an address on `network_id`
pub(crate) fn decode_optional_address(
    item: &RlpItem,
    network_id: NetworkId,
) -> Result<Option<PlatformAddress>, RlpError> {
    decode_optional_with(item, |account| PlatformAddress::from_rlp_on(account, network_id))
}

pub(crate) fn encode_text(text: &str) -> RlpItem {
    RlpItem::bytes(text.as_bytes().to_vec())
}

pub(crate) fn decode_text(item: &RlpItem) -> Result<String, RlpError> {
    String::from_utf8(item.as_bytes()?.to_vec())
        .map_err(|_| RlpError::InvalidValue("text is not UTF-8".to_string()))
}

/// Core fields followed by the approvals list
pub(crate) fn with_approvals(mut core: Vec<RlpItem>, approvals: &[EcdsaSignature]) -> RlpItem {
    core.push(encode_list(approvals));
    RlpItem::List(core)
}

/// Split `item` into `core_len` core fields (tag checked) and its approvals
pub(crate) fn split_approvals(
    item: &RlpItem,
    tag: u8,
    core_len: usize,
) -> Result<(&[RlpItem], Vec<EcdsaSignature>), RlpError> {
    let fields = item.expect_list(core_len + 1)?;
    expect_tag(&fields[0], tag)?;
    let approvals = decode_list(&fields[core_len])?;
    Ok((&fields[..core_len], approvals))
}

/// Checked sum of quantities
pub fn sum_quantities<I>(quantities: I) -> Result<U64, TransactionError>
where
    I: IntoIterator<Item = U64>,
{
    quantities
        .into_iter()
        .try_fold(U64::zero(), |acc, q| acc.checked_add(q))
        .ok_or(TransactionError::QuantityOverflow)
}
