//! Known-answer tests for the platform transaction envelope

use codechain_core::address::PlatformAddress;
use codechain_core::config::ChainConfig;
use codechain_core::crypto::{EcdsaSignature, PrivateKey};
use codechain_core::primitives::{NetworkId, H160, H256, U64};
use codechain_core::rlp::{Decodable, Encodable};
use codechain_core::transaction::{Pay, SignedTransaction, Transaction, TransactionError};

const SECRET: &str = "4f3edf983ac636a65a842ce7c78d9aa706d3b113bce9c46f30d7d21715b23b1d";

fn pay_to_zero() -> Transaction {
    let receiver = PlatformAddress::from_account_id(NetworkId::TESTNET, H160::zero());
    Transaction::new(NetworkId::TESTNET, Pay::new(receiver, U64::new(11)))
}

#[test]
fn test_pay_encoding_vector() {
    let mut tx = pay_to_zero();
    tx.set_seq(0).unwrap();
    tx.set_fee(U64::zero()).unwrap();

    let mut expected = vec![221, 128, 128, 130, 116, 99, 215, 2, 148];
    expected.extend_from_slice(&[0u8; 20]);
    expected.push(11);

    let bytes = tx.rlp_bytes().unwrap();
    assert_eq!(bytes, expected);
    assert_eq!(
        tx.unsigned_hash().unwrap(),
        H256::from_hex("3b578bebb32cae770ab1094d572a4721b624fc101bb88fbc580eeb2931f65665").unwrap()
    );
}

#[test]
fn test_fixed_key_signature_vector() {
    let secret = PrivateKey::from_hex(SECRET).unwrap();
    let signed = pay_to_zero().sign(&secret, 0, U64::zero()).unwrap();

    // RFC6979 nonces make the signature deterministic
    let expected = EcdsaSignature::from_hex(
        "aef83c8da45ba7010a10d52dd2b9fb04e07d91b979c283046eb359c083609c73\
         53aada7f549a640d5f03fbea78de01da058ddcf6d64de3b1564e8e9def907a3e01",
    )
    .unwrap();
    assert_eq!(signed.signature(), &expected);
    assert_eq!(
        signed.signer_account_id().unwrap(),
        H160::from_hex("3448e47a20a311504f1dd65c37e70dd39da01f3c").unwrap()
    );
    assert_eq!(
        signed.hash(),
        H256::from_hex("51207920d025134d70d759740937ce677b403779afcfba361aa2e0c75db57477").unwrap()
    );

    let bytes = signed.rlp_bytes();
    assert_eq!(&bytes[..2], &[0xf8, 0x60]);
    assert_eq!(bytes.len(), 98);
}

#[test]
fn test_envelope_requires_seq_and_fee() {
    let tx = pay_to_zero();
    assert!(matches!(tx.rlp_bytes(), Err(TransactionError::SeqNotSet)));

    let mut tx = pay_to_zero();
    tx.set_seq(3).unwrap();
    assert!(matches!(tx.rlp_bytes(), Err(TransactionError::FeeNotSet)));
    assert!(matches!(tx.set_seq(4), Err(TransactionError::SeqAlreadySet)));
}

#[test]
fn test_sign_and_recover() {
    let secret = PrivateKey::generate();
    let sender = PlatformAddress::from_public(NetworkId::TESTNET, &secret.public_key());

    let signed = pay_to_zero().sign(&secret, 0, U64::new(100)).unwrap();
    assert!(signed.is_pending());
    assert_eq!(signed.signer_address().unwrap(), sender);

    let decoded = SignedTransaction::decode(&signed.rlp_bytes()).unwrap();
    assert_eq!(decoded.hash(), signed.hash());
    assert_eq!(decoded.signer_public().unwrap(), secret.public_key());

    let json = signed.to_json().unwrap();
    assert_eq!(SignedTransaction::from_json(json).unwrap(), signed);
}

#[test]
fn test_sign_with_config_uses_min_fee() {
    let secret = PrivateKey::generate();
    let config = ChainConfig::default();
    let signed = pay_to_zero().sign_with_config(&secret, 1, &config).unwrap();
    assert_eq!(signed.fee(), config.fees.pay);

    let mainnet = ChainConfig::new(NetworkId::MAINNET);
    assert!(matches!(
        pay_to_zero().sign_with_config(&secret, 1, &mainnet),
        Err(TransactionError::NetworkMismatch { .. })
    ));
}
