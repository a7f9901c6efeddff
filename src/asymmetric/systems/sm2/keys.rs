//! SM2 密钥的解码、校验与导出
//!
//! 公钥为未压缩点 `04 ‖ X ‖ Y`（共 65 字节），私钥为标量 D 的大端字节，
//! 可短于 32 字节，解码时左侧补零。私钥总是与其公钥一同解码并校验是否匹配。
use crate::common::encoding::{from_hex, to_fixed, to_hex};
use crate::common::errors::{DecodeError, Error, Result};
use crate::common::utils::ZeroizingVec;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sm2::elliptic_curve::sec1::ToEncodedPoint;
use sm2::{FieldBytes, PublicKey, SecretKey};
use std::fmt;
use zeroize::Zeroize;

/// 未压缩公钥长度
pub const SM2_PUBLIC_KEY_SIZE: usize = 65;
/// 私钥标量长度
pub const SM2_PRIVATE_KEY_SIZE: usize = 32;
/// SEC1 未压缩点的标记字节
pub(crate) const UNCOMPRESSED_TAG: u8 = 0x04;

/// SM2 公钥
#[derive(Clone, PartialEq, Eq)]
pub struct Sm2PublicKey {
    inner: PublicKey,
}

impl Sm2PublicKey {
    /// 从 65 字节未压缩点解码，点必须位于曲线上
    pub fn from_bytes(bytes: &[u8]) -> std::result::Result<Self, DecodeError> {
        let encoded: [u8; SM2_PUBLIC_KEY_SIZE] = to_fixed(bytes, "SM2 public key")?;
        if encoded[0] != UNCOMPRESSED_TAG {
            return Err(DecodeError::InvalidPublicKey);
        }
        let inner = PublicKey::from_sec1_bytes(&encoded).map_err(|_| DecodeError::InvalidPublicKey)?;
        Ok(Self { inner })
    }

    pub fn from_hex(public_key_hex: &str) -> Result<Self> {
        let bytes = from_hex(public_key_hex)?;
        Ok(Self::from_bytes(&bytes)?)
    }

    /// 未压缩编码，X 与 Y 各补齐到 32 字节
    pub fn to_bytes(&self) -> Vec<u8> {
        self.inner.to_encoded_point(false).as_bytes().to_vec()
    }

    /// 130 个小写 Hex 字符，以 `04` 开头
    pub fn to_hex(&self) -> String {
        to_hex(self.to_bytes())
    }

    pub(crate) fn as_inner(&self) -> &PublicKey {
        &self.inner
    }

    pub(crate) fn from_inner(inner: PublicKey) -> Self {
        Self { inner }
    }
}

impl fmt::Debug for Sm2PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Sm2PublicKey").field(&self.to_hex()).finish()
    }
}

impl Serialize for Sm2PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Sm2PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Sm2PublicKey::from_hex(&text).map_err(serde::de::Error::custom)
    }
}

/// SM2 私钥，携带对应的公钥
#[derive(Clone)]
pub struct Sm2PrivateKey {
    secret: SecretKey,
    public: Sm2PublicKey,
}

impl Sm2PrivateKey {
    /// 从标量字节与公钥构造，校验标量范围以及与公钥是否匹配
    pub fn from_bytes(
        private_key: &[u8],
        public: Sm2PublicKey,
    ) -> std::result::Result<Self, DecodeError> {
        if private_key.is_empty() {
            return Err(DecodeError::InvalidPrivateKey);
        }
        if private_key.len() > SM2_PRIVATE_KEY_SIZE {
            return Err(DecodeError::InvalidLength {
                what: "SM2 private key",
                expected: SM2_PRIVATE_KEY_SIZE,
                actual: private_key.len(),
            });
        }

        let mut scalar = FieldBytes::default();
        scalar[SM2_PRIVATE_KEY_SIZE - private_key.len()..].copy_from_slice(private_key);
        let secret = SecretKey::from_bytes(&scalar).map_err(|_| DecodeError::InvalidPrivateKey);
        scalar.as_mut_slice().zeroize();
        let secret = secret?;

        if secret.public_key() != *public.as_inner() {
            return Err(DecodeError::KeyMismatch);
        }
        Ok(Self { secret, public })
    }

    pub(crate) fn from_secret(secret: SecretKey) -> Self {
        let public = Sm2PublicKey::from_inner(secret.public_key());
        Self { secret, public }
    }

    pub fn public_key(&self) -> &Sm2PublicKey {
        &self.public
    }

    /// 32 字节大端标量，离开作用域时清零
    pub fn to_bytes(&self) -> ZeroizingVec {
        ZeroizingVec(self.secret.to_bytes().to_vec())
    }

    /// 64 个小写 Hex 字符
    pub fn to_hex(&self) -> String {
        to_hex(self.to_bytes())
    }

    pub(crate) fn secret(&self) -> &SecretKey {
        &self.secret
    }
}

impl fmt::Debug for Sm2PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sm2PrivateKey")
            .field("secret", &"[REDACTED]")
            .field("public", &self.public)
            .finish()
    }
}

impl PartialEq for Sm2PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.secret == other.secret
    }
}

#[derive(Serialize, Deserialize)]
struct Sm2PrivateKeyRepr {
    private_key: String,
    public_key: Sm2PublicKey,
}

impl Drop for Sm2PrivateKeyRepr {
    fn drop(&mut self) {
        self.private_key.zeroize();
    }
}

impl Serialize for Sm2PrivateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        Sm2PrivateKeyRepr {
            private_key: self.to_hex(),
            public_key: self.public.clone(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Sm2PrivateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let repr = Sm2PrivateKeyRepr::deserialize(deserializer)?;
        let bytes = ZeroizingVec(hex::decode(&repr.private_key).map_err(serde::de::Error::custom)?);
        Sm2PrivateKey::from_bytes(&bytes, repr.public_key.clone()).map_err(serde::de::Error::custom)
    }
}

/// 解码 Hex 公钥
pub fn decode_public_key(public_key_hex: &str) -> Result<Sm2PublicKey> {
    Sm2PublicKey::from_hex(public_key_hex)
}

/// 解码 Hex 私钥，并与同时给出的 Hex 公钥配对校验
pub fn decode_private_key(private_key_hex: &str, public_key_hex: &str) -> Result<Sm2PrivateKey> {
    let public = decode_public_key(public_key_hex)?;
    let bytes = ZeroizingVec(from_hex(private_key_hex)?);
    Sm2PrivateKey::from_bytes(&bytes, public).map_err(Error::from)
}
