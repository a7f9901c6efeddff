//! `Sm2System` 提供 SM2 公钥加密（GB/T 32918.4-2016）。
//!
//! 密文由三段组成：C1 为临时公钥点（65 字节未压缩），C2 为与密钥流异或后的明文，
//! C3 为 `SM3(x2 ‖ M ‖ y2)`。[`Sm2Mode`] 决定 C2 与 C3 的先后顺序。
pub mod keys;

use crate::asymmetric::traits::AsymmetricCryptographicSystem;
use crate::common::errors::{DecodeError, Error, Result};
use crate::hash::{SM3_OUTPUT_SIZE, Sm3Hasher};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};
use sm2::elliptic_curve::sec1::ToEncodedPoint;
use sm2::{AffinePoint, NonZeroScalar, PublicKey, SecretKey};
use std::str::FromStr;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

pub use keys::{Sm2PrivateKey, Sm2PublicKey, decode_private_key, decode_public_key};
use keys::{SM2_PUBLIC_KEY_SIZE, UNCOMPRESSED_TAG};

/// C1 长度
pub const SM2_C1_SIZE: usize = SM2_PUBLIC_KEY_SIZE;
/// C3 长度
pub const SM2_C3_SIZE: usize = SM3_OUTPUT_SIZE;
/// 最短密文长度，对应空明文
pub const SM2_MIN_CIPHERTEXT_SIZE: usize = SM2_C1_SIZE + SM2_C3_SIZE;

/// 密文分段布局
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sm2Mode {
    /// 现行标准布局 `C1 ‖ C3 ‖ C2`
    #[default]
    C1C3C2 = 0,
    /// 旧布局 `C1 ‖ C2 ‖ C3`
    C1C2C3 = 1,
}

impl TryFrom<u8> for Sm2Mode {
    type Error = DecodeError;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Sm2Mode::C1C3C2),
            1 => Ok(Sm2Mode::C1C2C3),
            other => Err(DecodeError::UnknownMode(other)),
        }
    }
}

impl From<Sm2Mode> for u8 {
    fn from(mode: Sm2Mode) -> Self {
        mode as u8
    }
}

impl FromStr for Sm2Mode {
    type Err = Error;

    /// 接受数字 `0`/`1` 或名称 `C1C3C2`/`C1C2C3`（不区分大小写）
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(value) = s.parse::<u8>() {
            return Ok(Sm2Mode::try_from(value)?);
        }
        match s.to_ascii_uppercase().as_str() {
            "C1C3C2" => Ok(Sm2Mode::C1C3C2),
            "C1C2C3" => Ok(Sm2Mode::C1C2C3),
            _ => Err(Error::Configuration(format!("unknown SM2 mode '{s}'"))),
        }
    }
}

/// 携带布局标记的密文，可整体序列化保存
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sm2Ciphertext {
    pub mode: Sm2Mode,
    #[serde(with = "serde_bytes")]
    pub bytes: Vec<u8>,
}

impl Sm2Ciphertext {
    pub fn new(mode: Sm2Mode, bytes: Vec<u8>) -> Self {
        Self { mode, bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// SM2 加密系统实现
#[derive(Debug)]
pub struct Sm2System;

impl AsymmetricCryptographicSystem for Sm2System {
    type PublicKey = Sm2PublicKey;
    type PrivateKey = Sm2PrivateKey;
    type Mode = Sm2Mode;
    type Error = Error;

    fn generate_keypair() -> Result<(Self::PublicKey, Self::PrivateKey)> {
        let private_key = Sm2PrivateKey::from_secret(SecretKey::random(&mut OsRng));
        tracing::debug!("generated sm2 keypair");
        Ok((private_key.public_key().clone(), private_key))
    }

    fn encrypt(public_key: &Self::PublicKey, plaintext: &[u8], mode: Sm2Mode) -> Result<Vec<u8>> {
        loop {
            let k = NonZeroScalar::random(&mut OsRng);
            let c1 = PublicKey::from_secret_scalar(&k).to_encoded_point(false);
            let shared = AffinePoint::from(public_key.as_inner().to_projective() * *k)
                .to_encoded_point(false);
            let (Some(x2), Some(y2)) = (shared.x(), shared.y()) else {
                return Err(DecodeError::InvalidPublicKey.into());
            };

            let mut keystream = kdf(x2, y2, plaintext.len());
            if !plaintext.is_empty() && keystream.iter().all(|&b| b == 0) {
                tracing::debug!("sm2 keystream is all zero, regenerating ephemeral key");
                continue;
            }

            let c2: Vec<u8> = plaintext
                .iter()
                .zip(keystream.iter())
                .map(|(m, t)| m ^ t)
                .collect();
            keystream.zeroize();
            let c3 = hash_c3(x2, plaintext, y2);

            let mut ciphertext =
                Vec::with_capacity(SM2_MIN_CIPHERTEXT_SIZE + plaintext.len());
            ciphertext.extend_from_slice(c1.as_bytes());
            match mode {
                Sm2Mode::C1C3C2 => {
                    ciphertext.extend_from_slice(&c3);
                    ciphertext.extend_from_slice(&c2);
                }
                Sm2Mode::C1C2C3 => {
                    ciphertext.extend_from_slice(&c2);
                    ciphertext.extend_from_slice(&c3);
                }
            }
            tracing::trace!(
                plaintext_len = plaintext.len(),
                ciphertext_len = ciphertext.len(),
                ?mode,
                "sm2 encrypt"
            );
            return Ok(ciphertext);
        }
    }

    fn decrypt(private_key: &Self::PrivateKey, ciphertext: &[u8], mode: Sm2Mode) -> Result<Vec<u8>> {
        if ciphertext.len() < SM2_MIN_CIPHERTEXT_SIZE {
            return Err(DecodeError::CiphertextTooShort {
                min: SM2_MIN_CIPHERTEXT_SIZE,
                actual: ciphertext.len(),
            }
            .into());
        }

        let (c1, rest) = ciphertext.split_at(SM2_C1_SIZE);
        if c1[0] != UNCOMPRESSED_TAG {
            return Err(DecodeError::InvalidCiphertextPoint.into());
        }
        let c1 = PublicKey::from_sec1_bytes(c1).map_err(|_| DecodeError::InvalidCiphertextPoint)?;

        let (c2, c3) = match mode {
            Sm2Mode::C1C3C2 => {
                let (c3, c2) = rest.split_at(SM2_C3_SIZE);
                (c2, c3)
            }
            Sm2Mode::C1C2C3 => rest.split_at(rest.len() - SM2_C3_SIZE),
        };

        let d = private_key.secret().to_nonzero_scalar();
        let shared = AffinePoint::from(c1.to_projective() * *d).to_encoded_point(false);
        let (Some(x2), Some(y2)) = (shared.x(), shared.y()) else {
            return Err(DecodeError::InvalidCiphertextPoint.into());
        };

        let mut keystream = kdf(x2, y2, c2.len());
        if !c2.is_empty() && keystream.iter().all(|&b| b == 0) {
            return Err(Error::Integrity);
        }

        let mut plaintext: Vec<u8> = c2
            .iter()
            .zip(keystream.iter())
            .map(|(c, t)| c ^ t)
            .collect();
        keystream.zeroize();

        let u = hash_c3(x2, &plaintext, y2);
        if !bool::from(u[..].ct_eq(c3)) {
            plaintext.zeroize();
            tracing::debug!(?mode, "sm2 C3 mismatch");
            return Err(Error::Integrity);
        }
        tracing::trace!(plaintext_len = plaintext.len(), ?mode, "sm2 decrypt");
        Ok(plaintext)
    }

    fn export_public_key(public_key: &Self::PublicKey) -> String {
        public_key.to_hex()
    }

    fn export_private_key(private_key: &Self::PrivateKey) -> String {
        private_key.to_hex()
    }

    fn import_public_key(key_data: &str) -> Result<Self::PublicKey> {
        decode_public_key(key_data)
    }

    fn import_private_key(key_data: &str, public_key_data: &str) -> Result<Self::PrivateKey> {
        decode_private_key(key_data, public_key_data)
    }
}

/// 基于 SM3 的密钥派生：依次计算 `SM3(x2 ‖ y2 ‖ ct)`，ct 为从 1 开始的 32 位大端计数器
fn kdf(x2: &[u8], y2: &[u8], len: usize) -> Vec<u8> {
    let mut output = Vec::with_capacity(len.div_ceil(SM3_OUTPUT_SIZE) * SM3_OUTPUT_SIZE);
    let mut counter: u32 = 1;
    while output.len() < len {
        let mut hasher = Sm3Hasher::new();
        hasher.update(x2).update(y2).update(counter.to_be_bytes());
        output.extend_from_slice(&hasher.finalize());
        counter = counter.wrapping_add(1);
    }
    output.truncate(len);
    output
}

fn hash_c3(x2: &[u8], message: &[u8], y2: &[u8]) -> [u8; SM3_OUTPUT_SIZE] {
    let mut hasher = Sm3Hasher::new();
    hasher.update(x2).update(message).update(y2);
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keypair() -> (Sm2PublicKey, Sm2PrivateKey) {
        Sm2System::generate_keypair().unwrap()
    }

    #[test]
    fn test_encrypt_decrypt_both_modes() {
        let (public_key, private_key) = keypair();
        let plaintext = b"Hello, SM2 encryption!";
        for mode in [Sm2Mode::C1C3C2, Sm2Mode::C1C2C3] {
            let ciphertext = Sm2System::encrypt(&public_key, plaintext, mode).unwrap();
            assert_eq!(ciphertext.len(), SM2_MIN_CIPHERTEXT_SIZE + plaintext.len());
            assert_eq!(ciphertext[0], 0x04);
            let decrypted = Sm2System::decrypt(&private_key, &ciphertext, mode).unwrap();
            assert_eq!(decrypted, plaintext);
        }
    }

    #[test]
    fn test_encrypt_is_randomized() {
        let (public_key, _) = keypair();
        let c1 = Sm2System::encrypt(&public_key, b"same", Sm2Mode::C1C3C2).unwrap();
        let c2 = Sm2System::encrypt(&public_key, b"same", Sm2Mode::C1C3C2).unwrap();
        assert_ne!(c1, c2);
    }

    #[test]
    fn test_empty_plaintext() {
        let (public_key, private_key) = keypair();
        let ciphertext = Sm2System::encrypt(&public_key, b"", Sm2Mode::C1C3C2).unwrap();
        assert_eq!(ciphertext.len(), SM2_MIN_CIPHERTEXT_SIZE);
        let decrypted = Sm2System::decrypt(&private_key, &ciphertext, Sm2Mode::C1C3C2).unwrap();
        assert!(decrypted.is_empty());
    }

    #[test]
    fn test_layout_of_modes() {
        let (public_key, private_key) = keypair();
        let plaintext = b"layout check";
        let new_layout = Sm2System::encrypt(&public_key, plaintext, Sm2Mode::C1C3C2).unwrap();

        // C1 ‖ C3 ‖ C2 重排为 C1 ‖ C2 ‖ C3 后应能按旧布局解密
        let (c1, rest) = new_layout.split_at(SM2_C1_SIZE);
        let (c3, c2) = rest.split_at(SM2_C3_SIZE);
        let old_layout = [c1, c2, c3].concat();
        let decrypted = Sm2System::decrypt(&private_key, &old_layout, Sm2Mode::C1C2C3).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_wrong_mode_fails() {
        let (public_key, private_key) = keypair();
        let ciphertext =
            Sm2System::encrypt(&public_key, b"mode mismatch", Sm2Mode::C1C3C2).unwrap();
        let result = Sm2System::decrypt(&private_key, &ciphertext, Sm2Mode::C1C2C3);
        assert!(matches!(result, Err(Error::Integrity)));
    }

    #[test]
    fn test_tampered_c3_is_integrity_error() {
        let (public_key, private_key) = keypair();
        let mut ciphertext = Sm2System::encrypt(&public_key, b"tamper", Sm2Mode::C1C3C2).unwrap();
        ciphertext[SM2_C1_SIZE] ^= 0x01;
        let result = Sm2System::decrypt(&private_key, &ciphertext, Sm2Mode::C1C3C2);
        assert!(matches!(result, Err(Error::Integrity)));
    }

    #[test]
    fn test_c3_checked_over_every_byte() {
        let (public_key, private_key) = keypair();
        let ciphertext = Sm2System::encrypt(&public_key, b"digest", Sm2Mode::C1C3C2).unwrap();
        for offset in [0, SM2_C3_SIZE / 2, SM2_C3_SIZE - 1] {
            let mut tampered = ciphertext.clone();
            tampered[SM2_C1_SIZE + offset] ^= 0x01;
            let result = Sm2System::decrypt(&private_key, &tampered, Sm2Mode::C1C3C2);
            assert!(matches!(result, Err(Error::Integrity)), "C3 byte {offset}");
        }
        assert_eq!(
            Sm2System::decrypt(&private_key, &ciphertext, Sm2Mode::C1C3C2).unwrap(),
            b"digest"
        );
    }

    #[test]
    fn test_tampered_c2_is_integrity_error() {
        let (public_key, private_key) = keypair();
        let mut ciphertext = Sm2System::encrypt(&public_key, b"tamper", Sm2Mode::C1C2C3).unwrap();
        ciphertext[SM2_C1_SIZE] ^= 0x80;
        let result = Sm2System::decrypt(&private_key, &ciphertext, Sm2Mode::C1C2C3);
        assert!(matches!(result, Err(Error::Integrity)));
    }

    #[test]
    fn test_wrong_private_key_is_integrity_error() {
        let (public_key, _) = keypair();
        let (_, other_private) = keypair();
        let ciphertext = Sm2System::encrypt(&public_key, b"secret", Sm2Mode::C1C3C2).unwrap();
        let result = Sm2System::decrypt(&other_private, &ciphertext, Sm2Mode::C1C3C2);
        assert!(matches!(result, Err(Error::Integrity)));
    }

    #[test]
    fn test_short_ciphertext_is_decode_error() {
        let (_, private_key) = keypair();
        let result = Sm2System::decrypt(&private_key, &[0x04; 96], Sm2Mode::C1C3C2);
        assert!(matches!(
            result,
            Err(Error::Decode(DecodeError::CiphertextTooShort { min: 97, actual: 96 }))
        ));
    }

    #[test]
    fn test_invalid_c1_is_decode_error() {
        let (public_key, private_key) = keypair();
        let mut ciphertext = Sm2System::encrypt(&public_key, b"c1", Sm2Mode::C1C3C2).unwrap();

        let mut wrong_tag = ciphertext.clone();
        wrong_tag[0] = 0x02;
        assert!(matches!(
            Sm2System::decrypt(&private_key, &wrong_tag, Sm2Mode::C1C3C2),
            Err(Error::Decode(DecodeError::InvalidCiphertextPoint))
        ));

        ciphertext[64] ^= 0x01;
        assert!(matches!(
            Sm2System::decrypt(&private_key, &ciphertext, Sm2Mode::C1C3C2),
            Err(Error::Decode(DecodeError::InvalidCiphertextPoint))
        ));
    }

    #[test]
    fn test_kdf_counter_blocks() {
        let x2 = [0x11u8; 32];
        let y2 = [0x22u8; 32];
        let long = kdf(&x2, &y2, 70);
        assert_eq!(long.len(), 70);

        let mut first = Sm3Hasher::new();
        first.update(x2).update(y2).update(1u32.to_be_bytes());
        assert_eq!(&long[..32], &first.finalize());

        let mut third = Sm3Hasher::new();
        third.update(x2).update(y2).update(3u32.to_be_bytes());
        assert_eq!(&long[64..], &third.finalize()[..6]);

        assert_eq!(&kdf(&x2, &y2, 10), &long[..10]);
        assert!(kdf(&x2, &y2, 0).is_empty());
    }

    #[test]
    fn test_mode_conversions() {
        assert_eq!(Sm2Mode::default(), Sm2Mode::C1C3C2);
        assert_eq!(Sm2Mode::try_from(0u8).unwrap(), Sm2Mode::C1C3C2);
        assert_eq!(Sm2Mode::try_from(1u8).unwrap(), Sm2Mode::C1C2C3);
        assert!(matches!(Sm2Mode::try_from(2u8), Err(DecodeError::UnknownMode(2))));
        assert_eq!(u8::from(Sm2Mode::C1C2C3), 1);

        assert_eq!("1".parse::<Sm2Mode>().unwrap(), Sm2Mode::C1C2C3);
        assert_eq!("c1c3c2".parse::<Sm2Mode>().unwrap(), Sm2Mode::C1C3C2);
        assert!("7".parse::<Sm2Mode>().unwrap_err().is_decode());
        assert!(matches!("gcm".parse::<Sm2Mode>(), Err(Error::Configuration(_))));

        assert_eq!(serde_json::to_string(&Sm2Mode::C1C2C3).unwrap(), "\"C1C2C3\"");
    }

    #[test]
    fn test_export_import_keys() {
        let (public_key, private_key) = keypair();
        let public_hex = Sm2System::export_public_key(&public_key);
        let private_hex = Sm2System::export_private_key(&private_key);

        let imported_public = Sm2System::import_public_key(&public_hex).unwrap();
        let imported_private = Sm2System::import_private_key(&private_hex, &public_hex).unwrap();
        assert_eq!(imported_public, public_key);
        assert_eq!(imported_private, private_key);
    }
}
