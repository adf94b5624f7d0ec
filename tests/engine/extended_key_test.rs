// ===== INTEGRATION TESTS - EXTENDED KEY SERIALIZATION =====

use chain_signer::config::chains::{params, Chain, HdScheme};
use chain_signer::services::keys::extended::{
    extended_private_key, extended_public_key, public_key_from_extended, ExtendedKey, XkeyError,
};
use chain_signer::services::keys::seed_from_mnemonic;

use crate::common::test_seed;

const BTC_XPRV: &str = "xprv9xpXFhFpqdQK3TmytPBqXtGSwS3DLjojFhTGht8gwAAii8py5X6pxeBnQ6ehJiyJ6nDjWGJfZ95WxByFXVkDxHXrqu53WCRGypk2ttuqncb";
const BTC_XPUB: &str = "xpub6BosfCnifzxcFwrSzQiqu2DBVTshkCXacvNsWGYJVVhhawA7d4R5WSWGFNbi8Aw6ZRc1brxMyWMzG3DSSSSoekkudhUd9yLb6qx39T9nMdj";

// ===== TEST 1: BITCOIN BIP-44 ACCOUNT KEYS =====

#[test]
fn test_bitcoin_bip44_account_keys() {
    let btc = params(Chain::Bitcoin);
    let seed = test_seed();
    assert_eq!(extended_private_key(&seed, btc, HdScheme::Bip44).unwrap(), BTC_XPRV);
    assert_eq!(extended_public_key(&seed, btc, HdScheme::Bip44).unwrap(), BTC_XPUB);
    println!("✅ xprv/xpub match the reference vectors");
}

// ===== TEST 2: BITCOIN BIP-84 ACCOUNT KEYS =====

#[test]
fn test_bitcoin_bip84_account_keys() {
    let btc = params(Chain::Bitcoin);
    let seed = test_seed();
    assert_eq!(
        extended_private_key(&seed, btc, HdScheme::Bip84).unwrap(),
        "zprvAdG4iTXWBoARxkkzNpNh8r6Qag3irQB8PzEMkAFeTRXxHpbF9z4QgEvBRmfvqWvGp42t42nvgGpNgYSJA9iefm1yYNZKEm7z6qUWCroSQnE"
    );
    assert_eq!(
        extended_public_key(&seed, btc, HdScheme::Bip84).unwrap(),
        "zpub6rFR7y4Q2AijBEqTUquhVz398htDFrtymD9xYYfG1m4wAcvPhXNfE3EfH1r1ADqtfSdVCToUG868RvUUkgDKf31mGDtKsAYz2oz2AGutZYs"
    );
    println!("✅ zprv/zpub match the reference vectors");
}

// ===== TEST 3: DOGECOIN VERSION BYTES =====

#[test]
fn test_dogecoin_extended_keys() {
    let seed = seed_from_mnemonic(
        "ripple scissors kick mammal hire column oak again sun offer wealth tomorrow wagon turn fatal",
        "TREZOR",
    )
    .unwrap();
    let doge = params(Chain::Dogecoin);
    assert_eq!(
        extended_private_key(&seed, doge, HdScheme::Bip44).unwrap(),
        "dgpv57ru95KiYUB5oWm2CVQH4heh1f7E9dNGdRHHVThcQkLeQ2HHxVJfFYefnpKrWZ6L6EDKJHUVq4Yyd5kPZKnRePfkCz3EzkySTydXKbgjcxN"
    );
    assert_eq!(
        extended_public_key(&seed, doge, HdScheme::Bip44).unwrap(),
        "dgub8rjvUmFc6cqR6NRBEj2FBZCHUDUrykPyv24Vea6bCsPex5PzNFrRtr4KN37XgwuVzzC2MikJRW2Ddcp99Ehsqp2iaU4eerNCJVruKxz6Gci"
    );
    println!("✅ dgpv/dgub version bytes and derivation match");
}

// ===== TEST 4: WATCH-ONLY DERIVATION FROM AN XPUB =====

#[test]
fn test_public_key_from_xpub() {
    let public = public_key_from_extended(BTC_XPUB, params(Chain::Bitcoin), 0, 2).unwrap();
    assert_eq!(
        hex::encode(public.as_bytes()),
        "0338994349b3a804c44bbec55c2824443ebb9e475dfdad14f4b1a01a97d42751b3"
    );
    println!("✅ receive key derived from the xpub alone");
}

// ===== TEST 5: PRIVATE AND FOREIGN KEYS ARE REJECTED =====

#[test]
fn test_xpub_derivation_rejects_private_material() {
    let xkey = ExtendedKey::decode(BTC_XPRV).unwrap();
    assert!(xkey.is_private());
    assert!(matches!(
        public_key_from_extended(BTC_XPRV, params(Chain::Bitcoin), 0, 0),
        Err(XkeyError::NotPublic)
    ));
    // A Bitcoin xpub is not a valid Dogecoin extended key.
    assert!(matches!(
        public_key_from_extended(BTC_XPUB, params(Chain::Dogecoin), 0, 0),
        Err(XkeyError::UnknownVersion(_))
    ));
    println!("✅ xprv and wrong-chain xpubs are rejected");
}

// ===== TEST 6: UNSUPPORTED SCHEME =====

#[test]
fn test_scheme_without_version_bytes() {
    // Dogecoin has no registered segwit scheme.
    assert!(matches!(
        extended_private_key(&test_seed(), params(Chain::Dogecoin), HdScheme::Bip84),
        Err(XkeyError::UnsupportedScheme(HdScheme::Bip84))
    ));
    println!("✅ missing version-byte schemes are reported");
}
