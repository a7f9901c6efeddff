//!
//! 配置加载集成测试
//!

mod common;

use common::*;
use sm_seal::prelude::*;
use std::collections::HashMap;
use tempfile::tempdir;

#[test]
fn test_config_file_builds_both_ciphers() {
    let (public_hex, private_hex) = sm2_keypair_hex();
    let json = serde_json::json!({
        "sm4": { "key": SM4_KEY_BASE64, "iv": SM4_ZERO_IV_BASE64, "encoding": "base64" },
        "sm2": { "public_key": public_hex, "private_key": private_hex, "mode": "C1C2C3" },
        "parallelism": { "parallelism": 2 }
    });

    let dir = tempdir().unwrap();
    let path = dir.path().join("sm_seal.json");
    std::fs::write(&path, serde_json::to_vec_pretty(&json).unwrap()).unwrap();

    let config = CryptoConfig::from_file(&path).unwrap();
    assert_eq!(config.parallelism.parallelism, 2);

    let sm4 = config.sm4_cipher().unwrap();
    assert_eq!(
        sm4.encrypt(b"config").unwrap(),
        sm4_cipher().encrypt(b"config").unwrap()
    );

    let sm2 = config.sm2_cipher().unwrap();
    assert_eq!(sm2.default_mode(), Sm2Mode::C1C2C3);
    let ciphertext = sm2.encrypt(b"config", sm2.default_mode()).unwrap();
    assert_eq!(sm2.decrypt(&ciphertext, Sm2Mode::C1C2C3).unwrap(), b"config");
}

#[test]
fn test_config_with_bad_key_material() {
    let json = r#"{"sm4":{"key":"not hex","iv":"00000000000000000000000000000000"}}"#;
    let config = CryptoConfig::from_json_str(json).unwrap();
    assert!(config.sm4_cipher().unwrap_err().is_decode());
}

#[test]
fn test_config_from_env_lookup() {
    let (public_hex, private_hex) = sm2_keypair_hex();
    let vars: HashMap<&str, String> = HashMap::from([
        ("SM_SEAL_SM4_KEY", SM4_KEY_HEX.to_string()),
        ("SM_SEAL_SM4_IV", SM4_ZERO_IV_HEX.to_string()),
        ("SM_SEAL_SM2_PUBLIC_KEY", public_hex),
        ("SM_SEAL_SM2_PRIVATE_KEY", private_hex),
        ("SM_SEAL_SM2_MODE", "1".to_string()),
    ]);

    let config = CryptoConfig::from_env_with(|name| vars.get(name).cloned()).unwrap();
    assert!(config.sm4_cipher().is_ok());
    assert_eq!(config.sm2_cipher().unwrap().default_mode(), Sm2Mode::C1C2C3);
}

#[test]
fn test_config_missing_sections() {
    let config = CryptoConfig::from_json_str("{}").unwrap();
    assert!(matches!(config.sm4_cipher(), Err(Error::Configuration(_))));
    assert!(matches!(config.sm2_cipher(), Err(Error::Configuration(_))));
}
