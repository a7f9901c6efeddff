//! 定义了非对称加密系统的核心 Trait。
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// `AsymmetricCryptographicSystem` 定义了非对称加密算法必须实现的核心功能。
///
/// 密文的分段布局由 `Mode` 决定，且不写入密文本身，
/// 因此加密与解密必须使用相同的 `Mode`。
pub trait AsymmetricCryptographicSystem: Sized {
    /// 公钥类型
    type PublicKey: Clone + Serialize + for<'de> Deserialize<'de> + Debug;

    /// 私钥类型
    type PrivateKey: Clone + Serialize + for<'de> Deserialize<'de> + Debug;

    /// 密文布局
    type Mode: Copy + Default + Debug;

    /// 错误类型
    type Error: std::error::Error + Send + Sync + 'static;

    /// 生成密钥对
    fn generate_keypair() -> Result<(Self::PublicKey, Self::PrivateKey), Self::Error>;

    /// 使用公钥加密
    fn encrypt(
        public_key: &Self::PublicKey,
        plaintext: &[u8],
        mode: Self::Mode,
    ) -> Result<Vec<u8>, Self::Error>;

    /// 使用私钥解密
    fn decrypt(
        private_key: &Self::PrivateKey,
        ciphertext: &[u8],
        mode: Self::Mode,
    ) -> Result<Vec<u8>, Self::Error>;

    /// 将公钥导出为标准格式
    fn export_public_key(public_key: &Self::PublicKey) -> String;

    /// 将私钥导出为标准格式
    fn export_private_key(private_key: &Self::PrivateKey) -> String;

    /// 从标准格式导入公钥
    fn import_public_key(key_data: &str) -> Result<Self::PublicKey, Self::Error>;

    /// 从标准格式导入私钥，并与其公钥配对校验
    fn import_private_key(
        key_data: &str,
        public_key_data: &str,
    ) -> Result<Self::PrivateKey, Self::Error>;
}
