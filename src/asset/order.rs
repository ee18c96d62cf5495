//! DEX orders carried by transfers

use serde::{Deserialize, Serialize};

use super::AssetOutPoint;
use crate::crypto::blake256;
use crate::primitives::{hex_serde, H160, H256, U256, U64};
use crate::rlp::{decode_bytes_list, decode_list, encode_bytes_list, encode_list, Decodable, Encodable, RlpError, RlpItem};
use crate::transaction::TransactionError;

/// Offer to exchange `asset_quantity_from` of one asset for
/// `asset_quantity_to` of another, paying `asset_quantity_fee` as fee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub asset_type_from: H256,
    pub asset_type_to: H256,
    pub asset_type_fee: H256,
    pub shard_id_from: u16,
    pub shard_id_to: u16,
    pub shard_id_fee: u16,
    pub asset_quantity_from: U64,
    pub asset_quantity_to: U64,
    pub asset_quantity_fee: U64,
    pub origin_outputs: Vec<AssetOutPoint>,
    pub expiration: U64,
    pub lock_script_hash_from: H160,
    #[serde(with = "hex_serde::bytes_list")]
    pub parameters_from: Vec<Vec<u8>>,
    pub lock_script_hash_fee: H160,
    #[serde(with = "hex_serde::bytes_list")]
    pub parameters_fee: Vec<Vec<u8>>,
}

impl Order {
    pub fn hash(&self) -> H256 {
        blake256(&self.rlp_bytes())
    }

    /// The order left after `quantity` of the offered asset is exchanged.
    /// The asked and fee quantities shrink in the same ratio, rounded down.
    pub fn consume(&self, quantity: U64) -> Result<Order, TransactionError> {
        let from = self.asset_quantity_from;
        if quantity > from {
            return Err(TransactionError::OrderExceeded { requested: quantity, available: from });
        }
        let spent_to = ratio_of(self.asset_quantity_to, quantity, from)?;
        let spent_fee = ratio_of(self.asset_quantity_fee, quantity, from)?;
        let shrink = |total: U64, spent: U64| {
            total.checked_sub(spent).ok_or(TransactionError::QuantityOverflow)
        };
        Ok(Order {
            asset_quantity_from: shrink(from, quantity)?,
            asset_quantity_to: shrink(self.asset_quantity_to, spent_to)?,
            asset_quantity_fee: shrink(self.asset_quantity_fee, spent_fee)?,
            ..self.clone()
        })
    }
}

/// `total * part / whole`, computed in 256 bits
fn ratio_of(total: U64, part: U64, whole: U64) -> Result<U64, TransactionError> {
    if whole.is_zero() {
        return Ok(U64::zero());
    }
    U256::from(total)
        .checked_mul(U256::from(part))
        .and_then(|product| product.checked_div(U256::from(whole)))
        .and_then(|q| q.to_u64())
        .map(U64::new)
        .ok_or(TransactionError::QuantityOverflow)
}

impl Encodable for Order {
    fn to_rlp(&self) -> RlpItem {
        RlpItem::list(vec![
            self.asset_type_from.to_rlp(),
            self.asset_type_to.to_rlp(),
            self.asset_type_fee.to_rlp(),
            self.shard_id_from.to_rlp(),
            self.shard_id_to.to_rlp(),
            self.shard_id_fee.to_rlp(),
            self.asset_quantity_from.to_rlp(),
            self.asset_quantity_to.to_rlp(),
            self.asset_quantity_fee.to_rlp(),
            encode_list(&self.origin_outputs),
            self.expiration.to_rlp(),
            self.lock_script_hash_from.to_rlp(),
            encode_bytes_list(&self.parameters_from),
            self.lock_script_hash_fee.to_rlp(),
            encode_bytes_list(&self.parameters_fee),
        ])
    }
}

impl Decodable for Order {
    fn from_rlp(item: &RlpItem) -> Result<Self, RlpError> {
        let f = item.expect_list(15)?;
        Ok(Self {
            asset_type_from: H256::from_rlp(&f[0])?,
            asset_type_to: H256::from_rlp(&f[1])?,
            asset_type_fee: H256::from_rlp(&f[2])?,
            shard_id_from: u16::from_rlp(&f[3])?,
            shard_id_to: u16::from_rlp(&f[4])?,
            shard_id_fee: u16::from_rlp(&f[5])?,
            asset_quantity_from: U64::from_rlp(&f[6])?,
            asset_quantity_to: U64::from_rlp(&f[7])?,
            asset_quantity_fee: U64::from_rlp(&f[8])?,
            origin_outputs: decode_list(&f[9])?,
            expiration: U64::from_rlp(&f[10])?,
            lock_script_hash_from: H160::from_rlp(&f[11])?,
            parameters_from: decode_bytes_list(&f[12])?,
            lock_script_hash_fee: H160::from_rlp(&f[13])?,
            parameters_fee: decode_bytes_list(&f[14])?,
        })
    }
}

/// An order applied to one transfer, with the inputs and outputs it covers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderOnTransfer {
    pub order: Order,
    pub spent_quantity: U64,
    pub input_from_indices: Vec<usize>,
    pub input_fee_indices: Vec<usize>,
    pub output_from_indices: Vec<usize>,
    pub output_to_indices: Vec<usize>,
    pub output_owned_fee_indices: Vec<usize>,
    pub output_transferred_fee_indices: Vec<usize>,
}

impl Encodable for OrderOnTransfer {
    fn to_rlp(&self) -> RlpItem {
        RlpItem::list(vec![
            self.order.to_rlp(),
            self.spent_quantity.to_rlp(),
            encode_list(&self.input_from_indices),
            encode_list(&self.input_fee_indices),
            encode_list(&self.output_from_indices),
            encode_list(&self.output_to_indices),
            encode_list(&self.output_owned_fee_indices),
            encode_list(&self.output_transferred_fee_indices),
        ])
    }
}

impl Decodable for OrderOnTransfer {
    fn from_rlp(item: &RlpItem) -> Result<Self, RlpError> {
        let f = item.expect_list(8)?;
        Ok(Self {
            order: Order::from_rlp(&f[0])?,
            spent_quantity: U64::from_rlp(&f[1])?,
            input_from_indices: decode_list(&f[2])?,
            input_fee_indices: decode_list(&f[3])?,
            output_from_indices: decode_list(&f[4])?,
            output_to_indices: decode_list(&f[5])?,
            output_owned_fee_indices: decode_list(&f[6])?,
            output_transferred_fee_indices: decode_list(&f[7])?,
        })
    }
}

#[cfg(test)]
pub(crate) fn sample_order() -> Order {
    Order {
        asset_type_from: H256([1; 32]),
        asset_type_to: H256([2; 32]),
        asset_type_fee: H256::zero(),
        shard_id_from: 0,
        shard_id_to: 0,
        shard_id_fee: 0,
        asset_quantity_from: U64::new(100),
        asset_quantity_to: U64::new(50),
        asset_quantity_fee: U64::zero(),
        origin_outputs: vec![AssetOutPoint::new(H256([3; 32]), 0, H256([1; 32]), 0, U64::new(100))],
        expiration: U64::new(1_700_000_000),
        lock_script_hash_from: H160([4; 20]),
        parameters_from: vec![vec![5; 20]],
        lock_script_hash_fee: H160::zero(),
        parameters_fee: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_roundtrip_and_hash() {
        let order = sample_order();
        assert_eq!(Order::decode(&order.rlp_bytes()).unwrap(), order);
        assert_eq!(order.hash(), blake256(&order.rlp_bytes()));

        let mut other = order.clone();
        other.asset_quantity_to = U64::new(51);
        assert_ne!(order.hash(), other.hash());
    }

    #[test]
    fn test_order_on_transfer_roundtrip() {
        let on_transfer = OrderOnTransfer {
            order: sample_order(),
            spent_quantity: U64::new(20),
            input_from_indices: vec![0],
            input_fee_indices: vec![],
            output_from_indices: vec![1],
            output_to_indices: vec![0],
            output_owned_fee_indices: vec![],
            output_transferred_fee_indices: vec![],
        };
        assert_eq!(OrderOnTransfer::decode(&on_transfer.rlp_bytes()).unwrap(), on_transfer);
        let json = serde_json::to_value(&on_transfer).unwrap();
        assert_eq!(json["spentQuantity"], "0x14");
        assert_eq!(serde_json::from_value::<OrderOnTransfer>(json).unwrap(), on_transfer);
    }

    #[test]
    fn test_order_field_count_enforced() {
        let item = RlpItem::list(vec![RlpItem::uint(0); 14]);
        assert!(matches!(
            Order::from_rlp(&item),
            Err(RlpError::ListLength { expected: 15, actual: 14 })
        ));
    }

    #[test]
    fn test_consume_shrinks_proportionally() {
        let mut order = sample_order();
        order.asset_quantity_from = U64::new(10);
        order.asset_quantity_to = U64::new(30);
        order.asset_quantity_fee = U64::new(5);

        let rest = order.consume(U64::new(4)).unwrap();
        assert_eq!(rest.asset_quantity_from, U64::new(6));
        assert_eq!(rest.asset_quantity_to, U64::new(18));
        assert_eq!(rest.asset_quantity_fee, U64::new(3));
        assert_eq!(rest.origin_outputs, order.origin_outputs);

        let empty = order.consume(U64::new(10)).unwrap();
        assert!(empty.asset_quantity_from.is_zero());
        assert!(empty.asset_quantity_to.is_zero());
        assert!(empty.asset_quantity_fee.is_zero());
    }

    #[test]
    fn test_consume_wide_intermediate() {
        let mut order = sample_order();
        order.asset_quantity_from = U64::new(u64::MAX);
        order.asset_quantity_to = U64::new(u64::MAX);
        order.asset_quantity_fee = U64::new(u64::MAX / 2);

        // the products overflow 64 bits but the ratios do not
        let rest = order.consume(U64::new(u64::MAX - 1)).unwrap();
        assert_eq!(rest.asset_quantity_from, U64::new(1));
        assert_eq!(rest.asset_quantity_to, U64::new(1));
        assert_eq!(rest.asset_quantity_fee, U64::new(1));
    }

    #[test]
    fn test_consume_beyond_offer_rejected() {
        let order = sample_order();
        assert!(matches!(
            order.consume(U64::new(101)),
            Err(TransactionError::OrderExceeded { .. })
        ));
    }
}
