//! `Sm2Cipher`：绑定密钥对的 SM2 便捷接口
use crate::asymmetric::systems::sm2::{
    Sm2Ciphertext, Sm2Mode, Sm2PrivateKey, Sm2PublicKey, Sm2System, decode_private_key,
};
use crate::asymmetric::traits::AsymmetricCryptographicSystem;
use crate::common::config::Sm2Config;
use crate::common::encoding::{
    from_base64, from_hex, object_to_plaintext, plaintext_to_object, to_base64, to_hex,
};
use crate::common::errors::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// SM2 加密实例
///
/// 每次调用都显式传入 [`Sm2Mode`]；`default_mode` 仅记录配置中给出的布局，
/// 供调用方在没有其他约定时使用。
#[derive(Clone, Debug)]
pub struct Sm2Cipher {
    private_key: Sm2PrivateKey,
    default_mode: Sm2Mode,
}

impl Sm2Cipher {
    /// 从 Hex 公钥与私钥构造，两者必须匹配
    pub fn new(public_key_hex: &str, private_key_hex: &str) -> Result<Self> {
        let private_key = decode_private_key(private_key_hex, public_key_hex)?;
        Ok(Self::from_private_key(private_key))
    }

    pub fn from_private_key(private_key: Sm2PrivateKey) -> Self {
        tracing::debug!(public_key = %private_key.public_key().to_hex(), "sm2 cipher constructed");
        Self {
            private_key,
            default_mode: Sm2Mode::default(),
        }
    }

    /// 生成新的随机密钥对并构造实例
    pub fn generate() -> Result<Self> {
        let (_, private_key) = Sm2System::generate_keypair()?;
        Ok(Self::from_private_key(private_key))
    }

    /// 根据配置段落构造
    pub fn from_config(config: &Sm2Config) -> Result<Self> {
        Ok(Self::new(&config.public_key, &config.private_key)?.with_default_mode(config.mode))
    }

    pub fn with_default_mode(mut self, mode: Sm2Mode) -> Self {
        self.default_mode = mode;
        self
    }

    pub fn default_mode(&self) -> Sm2Mode {
        self.default_mode
    }

    pub fn public_key(&self) -> &Sm2PublicKey {
        self.private_key.public_key()
    }

    pub fn private_key(&self) -> &Sm2PrivateKey {
        &self.private_key
    }

    pub fn encrypt(&self, plaintext: &[u8], mode: Sm2Mode) -> Result<Vec<u8>> {
        Sm2System::encrypt(self.public_key(), plaintext, mode)
    }

    pub fn decrypt(&self, ciphertext: &[u8], mode: Sm2Mode) -> Result<Vec<u8>> {
        Sm2System::decrypt(&self.private_key, ciphertext, mode)
    }

    pub fn encrypt_to_hex(&self, plaintext: &[u8], mode: Sm2Mode) -> Result<String> {
        Ok(to_hex(self.encrypt(plaintext, mode)?))
    }

    pub fn decrypt_from_hex(&self, ciphertext_hex: &str, mode: Sm2Mode) -> Result<Vec<u8>> {
        let ciphertext = from_hex(ciphertext_hex)?;
        self.decrypt(&ciphertext, mode)
    }

    pub fn encrypt_to_base64(&self, plaintext: &[u8], mode: Sm2Mode) -> Result<String> {
        Ok(to_base64(self.encrypt(plaintext, mode)?))
    }

    pub fn decrypt_from_base64(&self, ciphertext_b64: &str, mode: Sm2Mode) -> Result<Vec<u8>> {
        let ciphertext = from_base64(ciphertext_b64)?;
        self.decrypt(&ciphertext, mode)
    }

    /// 将对象序列化为 JSON 后加密
    pub fn encrypt_object<T: Serialize + ?Sized>(&self, value: &T, mode: Sm2Mode) -> Result<Vec<u8>> {
        let plaintext = object_to_plaintext(value)?;
        self.encrypt(&plaintext, mode)
    }

    /// 解密 Hex 密文并反序列化为 `T`
    pub fn decrypt_object<T: DeserializeOwned>(&self, ciphertext_hex: &str, mode: Sm2Mode) -> Result<T> {
        let plaintext = self.decrypt_from_hex(ciphertext_hex, mode)?;
        plaintext_to_object(&plaintext)
    }

    /// 加密并把布局标记与密文放在一起
    pub fn encrypt_tagged(&self, plaintext: &[u8], mode: Sm2Mode) -> Result<Sm2Ciphertext> {
        Ok(Sm2Ciphertext::new(mode, self.encrypt(plaintext, mode)?))
    }

    /// 按密文自带的布局标记解密
    pub fn decrypt_tagged(&self, ciphertext: &Sm2Ciphertext) -> Result<Vec<u8>> {
        self.decrypt(ciphertext.as_bytes(), ciphertext.mode)
    }
}
