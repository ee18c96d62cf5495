//! Hash-without-script computation shared by asset transactions

use tracing::trace;

use super::{normalize_indices, InputTag, OutputTag, SignatureTag, SigningError};
use crate::asset::AssetTransferInput;
use crate::crypto::{blake128, blake256_with_key};
use crate::primitives::H256;
use crate::rlp::RlpItem;

/// Which spending slot a signature is produced for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputTarget {
    Input(usize),
    Burn(usize),
}

impl InputTarget {
    pub fn index(&self) -> usize {
        match *self {
            InputTarget::Input(index) | InputTarget::Burn(index) => index,
        }
    }
}

/// Transactions whose inputs can be signed individually
pub trait HashWithoutScript {
    /// Message to sign for `target` under `tag`. Scripts of every included
    /// input are blanked, so attaching witnesses never changes the result.
    fn hash_without_script(
        &self,
        tag: &SignatureTag,
        target: Option<InputTarget>,
    ) -> Result<H256, SigningError>;
}

/// Inputs and burns that participate in a partial hash.
///
/// With a single-input tag only the chosen item is kept, on the side it came
/// from: a chosen input yields `([input], [])`, a chosen burn `([], [burn])`.
pub fn select_inputs(
    inputs: &[AssetTransferInput],
    burns: &[AssetTransferInput],
    input: InputTag,
    target: Option<InputTarget>,
) -> Result<(Vec<AssetTransferInput>, Vec<AssetTransferInput>), SigningError> {
    match input {
        InputTag::All => Ok((
            inputs.iter().map(AssetTransferInput::without_script).collect(),
            burns.iter().map(AssetTransferInput::without_script).collect(),
        )),
        InputTag::Single => match target.ok_or(SigningError::MissingTarget)? {
            InputTarget::Input(index) => {
                let selected = pick_slot(inputs, index, "input")?;
                Ok((vec![selected.without_script()], Vec::new()))
            }
            InputTarget::Burn(index) => {
                let selected = pick_slot(burns, index, "burn")?;
                Ok((Vec::new(), vec![selected.without_script()]))
            }
        },
    }
}

/// `items[index]`, or the error naming the missing slot
pub fn pick_slot<'a>(
    items: &'a [AssetTransferInput],
    index: usize,
    kind: &'static str,
) -> Result<&'a AssetTransferInput, SigningError> {
    if items.is_empty() {
        return Err(SigningError::UnsupportedTarget(kind));
    }
    items.get(index).ok_or(SigningError::TargetOutOfRange {
        kind,
        index,
        len: items.len(),
    })
}

/// Replace `items[index]` with its witnessed version
pub fn attach_witness(
    items: &mut [AssetTransferInput],
    index: usize,
    kind: &'static str,
    lock_script: Vec<u8>,
    unlock_script: Vec<u8>,
) -> Result<(), SigningError> {
    if items.is_empty() {
        return Err(SigningError::UnsupportedTarget(kind));
    }
    let len = items.len();
    let slot = items
        .get_mut(index)
        .ok_or(SigningError::TargetOutOfRange { kind, index, len })?;
    *slot = slot.clone().with_witness(lock_script, unlock_script)?;
    Ok(())
}

/// Outputs named by `tag`, in ascending index order
pub fn select_outputs<T: Clone>(outputs: &[T], tag: &OutputTag) -> Result<Vec<T>, SigningError> {
    match tag {
        OutputTag::All => Ok(outputs.to_vec()),
        OutputTag::Indices(indices) => normalize_indices(indices)
            .into_iter()
            .map(|index| {
                outputs.get(index).cloned().ok_or(SigningError::OutputOutOfRange {
                    index,
                    len: outputs.len(),
                })
            })
            .collect(),
    }
}

/// `blake256_with_key(rlp(core), blake128(tag))`
pub fn keyed_partial_hash(core: &RlpItem, tag: &SignatureTag) -> Result<H256, SigningError> {
    let encoded_tag = tag.encode()?;
    let key = blake128(&encoded_tag);
    let hash = blake256_with_key(&core.encode(), &key.0);
    trace!(?tag, %hash, "computed partial hash");
    Ok(hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::AssetOutPoint;
    use crate::primitives::U64;

    fn input(n: u8) -> AssetTransferInput {
        let prev_out = AssetOutPoint::new(H256([n; 32]), 0, H256([9; 32]), 0, U64::new(1));
        AssetTransferInput::new(prev_out, None)
            .with_witness(vec![n], vec![n])
            .unwrap()
    }

    #[test]
    fn test_all_strips_every_script() {
        let (inputs, burns) =
            select_inputs(&[input(1), input(2)], &[input(3)], InputTag::All, None).unwrap();
        assert_eq!(inputs.len(), 2);
        assert_eq!(burns.len(), 1);
        assert!(inputs.iter().chain(burns.iter()).all(|i| !i.has_witness()));
    }

    #[test]
    fn test_single_burn_stays_a_burn() {
        let (inputs, burns) = select_inputs(
            &[input(1)],
            &[input(3)],
            InputTag::Single,
            Some(InputTarget::Burn(0)),
        )
        .unwrap();
        assert!(inputs.is_empty());
        assert_eq!(burns, vec![input(3).without_script()]);
    }

    #[test]
    fn test_single_input_drops_burns() {
        let (inputs, burns) = select_inputs(
            &[input(1), input(2)],
            &[input(3)],
            InputTag::Single,
            Some(InputTarget::Input(1)),
        )
        .unwrap();
        assert_eq!(inputs, vec![input(2).without_script()]);
        assert!(burns.is_empty());
    }

    #[test]
    fn test_pick_slot() {
        let items = [input(1)];
        assert_eq!(pick_slot(&items, 0, "input").unwrap(), &items[0]);
        assert_eq!(
            pick_slot(&items, 1, "input"),
            Err(SigningError::TargetOutOfRange { kind: "input", index: 1, len: 1 })
        );
        assert_eq!(pick_slot(&[], 0, "burn"), Err(SigningError::UnsupportedTarget("burn")));
    }

    #[test]
    fn test_single_rejects_bad_targets() {
        let inputs = [input(1)];
        assert_eq!(
            select_inputs(&inputs, &[], InputTag::Single, None),
            Err(SigningError::MissingTarget)
        );
        assert_eq!(
            select_inputs(&inputs, &[], InputTag::Single, Some(InputTarget::Input(1))),
            Err(SigningError::TargetOutOfRange { kind: "input", index: 1, len: 1 })
        );
        assert_eq!(
            select_inputs(&inputs, &[], InputTag::Single, Some(InputTarget::Burn(0))),
            Err(SigningError::UnsupportedTarget("burn"))
        );
    }

    #[test]
    fn test_attach_witness_in_place() {
        let mut items = vec![input(1).without_script(), input(2).without_script()];
        attach_witness(&mut items, 1, "input", vec![7], vec![8]).unwrap();
        assert!(!items[0].has_witness());
        assert_eq!(items[1].unlock_script(), &[8]);
        assert_eq!(
            attach_witness(&mut items, 1, "input", vec![7], vec![8]),
            Err(SigningError::WitnessAlreadyAttached)
        );
        assert_eq!(
            attach_witness(&mut items, 2, "input", vec![], vec![1]),
            Err(SigningError::TargetOutOfRange { kind: "input", index: 2, len: 2 })
        );
    }

    #[test]
    fn test_select_outputs() {
        let outputs = ['a', 'b', 'c'];
        assert_eq!(select_outputs(&outputs, &OutputTag::All).unwrap(), vec!['a', 'b', 'c']);
        assert_eq!(
            select_outputs(&outputs, &OutputTag::Indices(vec![2, 0, 2])).unwrap(),
            vec!['a', 'c']
        );
        assert_eq!(
            select_outputs(&outputs, &OutputTag::Indices(vec![3])),
            Err(SigningError::OutputOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn test_tag_keys_the_hash() {
        let core = RlpItem::list(vec![RlpItem::uint(0x14)]);
        let all = keyed_partial_hash(&core, &SignatureTag::all()).unwrap();
        let indexed = keyed_partial_hash(
            &core,
            &SignatureTag::new(InputTag::All, OutputTag::Indices(vec![])),
        )
        .unwrap();
        assert_ne!(all, indexed);
        assert_eq!(all, keyed_partial_hash(&core, &SignatureTag::all()).unwrap());
    }
}
