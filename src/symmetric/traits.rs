use crate::common::errors::Error;
use std::fmt::Debug;

#[cfg(feature = "parallel")]
use crate::common::config::ParallelismConfig;

/// 对称加密系统的公共特征
pub trait SymmetricCryptographicSystem: Sized {
    /// 密钥的期望长度（以字节为单位）。
    const KEY_SIZE: usize;

    /// 分组长度（以字节为单位），同时也是 IV 长度。
    const BLOCK_SIZE: usize;

    /// 加解密所用的密钥材料。
    type Key: Clone + Debug + Send + Sync;

    /// 生成一个新的随机密钥。
    fn generate_key() -> Result<Self::Key, Error>;

    /// 使用密钥加密数据。
    fn encrypt(key: &Self::Key, plaintext: &[u8]) -> Result<Vec<u8>, Error>;

    /// 使用密钥解密数据。
    fn decrypt(key: &Self::Key, ciphertext: &[u8]) -> Result<Vec<u8>, Error>;

    /// 导出密钥为字符串
    fn export_key(key: &Self::Key) -> String;

    /// 从字符串导入密钥
    fn import_key(key_data: &str) -> Result<Self::Key, Error>;
}

/// `SymmetricParallelSystem` 使用 Rayon 并行处理一批相互独立的消息。
/// 每条消息仍按各自的链式模式顺序处理，结果按输入顺序返回。
#[cfg(feature = "parallel")]
pub trait SymmetricParallelSystem: SymmetricCryptographicSystem {
    /// [并行] 加密一批明文。
    fn par_encrypt_batch<M: AsRef<[u8]> + Sync>(
        key: &Self::Key,
        plaintexts: &[M],
        parallelism_config: &ParallelismConfig,
    ) -> Result<Vec<Vec<u8>>, Error>;

    /// [并行] 解密一批密文。
    fn par_decrypt_batch<M: AsRef<[u8]> + Sync>(
        key: &Self::Key,
        ciphertexts: &[M],
        parallelism_config: &ParallelismConfig,
    ) -> Result<Vec<Vec<u8>>, Error>;
}
