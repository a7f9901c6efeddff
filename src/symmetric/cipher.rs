//! `Sm4Cipher`：绑定密钥与 IV 的 SM4-CBC 便捷接口
//!
//! 所有变体（Hex、Base64、对象）最终都落到 [`Sm4CbcSystem`] 的字节级加解密上。
use crate::common::config::{KeyEncoding, Sm4Config};
use crate::common::encoding::{
    from_base64, from_hex, object_to_plaintext, plaintext_to_object, to_base64, to_hex,
};
use crate::common::errors::Result;
use crate::symmetric::systems::sm4_cbc::{Sm4CbcSystem, Sm4Key};
use crate::symmetric::traits::SymmetricCryptographicSystem;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// SM4-CBC 加密实例，构造后密钥与 IV 不可变
#[derive(Clone, Debug)]
pub struct Sm4Cipher {
    key: Sm4Key,
}

impl Sm4Cipher {
    /// 从原始字节构造，密钥与 IV 都必须为 16 字节
    pub fn new(key: &[u8], iv: &[u8]) -> Result<Self> {
        Ok(Self::from_key(Sm4Key::new(key, iv)?))
    }

    /// 从 Hex 文本构造
    pub fn from_hex(key_hex: &str, iv_hex: &str) -> Result<Self> {
        Ok(Self::from_key(Sm4Key::from_hex(key_hex, iv_hex)?))
    }

    /// 从标准 Base64 文本构造
    pub fn from_base64(key_b64: &str, iv_b64: &str) -> Result<Self> {
        Ok(Self::from_key(Sm4Key::from_base64(key_b64, iv_b64)?))
    }

    pub fn from_key(key: Sm4Key) -> Self {
        tracing::debug!("sm4 cipher constructed");
        Self { key }
    }

    /// 根据配置段落构造
    pub fn from_config(config: &Sm4Config) -> Result<Self> {
        match config.encoding {
            KeyEncoding::Hex => Self::from_hex(&config.key, &config.iv),
            KeyEncoding::Base64 => Self::from_base64(&config.key, &config.iv),
        }
    }

    pub fn key(&self) -> &Sm4Key {
        &self.key
    }

    /// 填充后加密，输出长度为填充后长度
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        Sm4CbcSystem::encrypt(&self.key, plaintext)
    }

    /// 解密并去填充，填充无效时原样返回解密结果
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        Sm4CbcSystem::decrypt(&self.key, ciphertext)
    }

    /// 解密并要求填充有效
    pub fn decrypt_strict(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        Sm4CbcSystem::decrypt_strict(&self.key, ciphertext)
    }

    pub fn encrypt_to_hex(&self, plaintext: &[u8]) -> Result<String> {
        Ok(to_hex(self.encrypt(plaintext)?))
    }

    pub fn decrypt_from_hex(&self, ciphertext_hex: &str) -> Result<Vec<u8>> {
        let ciphertext = from_hex(ciphertext_hex)?;
        self.decrypt(&ciphertext)
    }

    pub fn encrypt_to_base64(&self, plaintext: &[u8]) -> Result<String> {
        Ok(to_base64(self.encrypt(plaintext)?))
    }

    pub fn decrypt_from_base64(&self, ciphertext_b64: &str) -> Result<Vec<u8>> {
        let ciphertext = from_base64(ciphertext_b64)?;
        self.decrypt(&ciphertext)
    }

    /// 将对象序列化为 JSON 后加密
    pub fn encrypt_object<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        let plaintext = object_to_plaintext(value)?;
        self.encrypt(&plaintext)
    }

    /// 解密 Hex 密文并反序列化为 `T`
    pub fn decrypt_object<T: DeserializeOwned>(&self, ciphertext_hex: &str) -> Result<T> {
        let plaintext = self.decrypt_from_hex(ciphertext_hex)?;
        plaintext_to_object(&plaintext)
    }
}
