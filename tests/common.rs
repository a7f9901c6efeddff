//!
//! 集成测试的通用辅助函数
//!
#![allow(dead_code)]

use sm_seal::prelude::*;
use sm_seal::{Sm2PrivateKey, Sm2PublicKey, Sm2System};

pub const SM4_KEY_HEX: &str = "0123456789ABCDEFFEDCBA9876543210";
pub const SM4_KEY_BASE64: &str = "ASNFZ4mrze/+3LqYdlQyEA==";
pub const SM4_ZERO_IV_HEX: &str = "00000000000000000000000000000000";
pub const SM4_ZERO_IV_BASE64: &str = "AAAAAAAAAAAAAAAAAAAAAA==";

/// 直接生成一个 SM2 密钥对，返回 (公钥 Hex, 私钥 Hex)
pub fn sm2_keypair_hex() -> (String, String) {
    let (public_key, private_key): (Sm2PublicKey, Sm2PrivateKey) =
        Sm2System::generate_keypair().unwrap();
    (public_key.to_hex(), private_key.to_hex())
}

pub fn sm4_cipher() -> Sm4Cipher {
    Sm4Cipher::from_hex(SM4_KEY_HEX, SM4_ZERO_IV_HEX).unwrap()
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TestData {
    pub name: String,
    pub value: i32,
}

pub fn test_data() -> TestData {
    TestData {
        name: "test".to_string(),
        value: 123,
    }
}
