//! SM4-CBC 对称加密实现
use crate::common::encoding::{fixed_from_base64, fixed_from_hex, to_fixed};
use crate::common::errors::{DecodeError, Error};
use crate::symmetric::padding;
use crate::symmetric::traits::SymmetricCryptographicSystem;
use cbc::cipher::block_padding::NoPadding;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand_core::{OsRng, RngCore};
use std::fmt;
use std::num::NonZeroU8;
use zeroize::{Zeroize, ZeroizeOnDrop};

#[cfg(feature = "parallel")]
use crate::common::config::ParallelismConfig;
#[cfg(feature = "parallel")]
use crate::symmetric::traits::SymmetricParallelSystem;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// SM4 密钥长度
pub const SM4_KEY_SIZE: usize = 16;
/// SM4 分组长度，也是 IV 长度
pub const SM4_BLOCK_SIZE: usize = 16;

const PAD_BLOCK: NonZeroU8 = match NonZeroU8::new(SM4_BLOCK_SIZE as u8) {
    Some(block) => block,
    None => unreachable!(),
};

type Sm4CbcEnc = cbc::Encryptor<sm4::Sm4>;
type Sm4CbcDec = cbc::Decryptor<sm4::Sm4>;

/// SM4-CBC 的密钥与 IV，构造后不可变，离开作用域时清零
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Sm4Key {
    key: [u8; SM4_KEY_SIZE],
    iv: [u8; SM4_BLOCK_SIZE],
}

impl Sm4Key {
    /// 从原始字节构造，长度必须均为 16
    pub fn new(key: &[u8], iv: &[u8]) -> Result<Self, DecodeError> {
        Ok(Self {
            key: to_fixed(key, "SM4 key")?,
            iv: to_fixed(iv, "SM4 IV")?,
        })
    }

    /// 从 Hex 文本直接解码到密钥结构中，解码缓冲随即清零
    pub fn from_hex(key_hex: &str, iv_hex: &str) -> Result<Self, Error> {
        Ok(Self {
            key: fixed_from_hex(key_hex, "SM4 key")?,
            iv: fixed_from_hex(iv_hex, "SM4 IV")?,
        })
    }

    /// 从标准 Base64 文本直接解码到密钥结构中
    pub fn from_base64(key_b64: &str, iv_b64: &str) -> Result<Self, Error> {
        Ok(Self {
            key: fixed_from_base64(key_b64, "SM4 key")?,
            iv: fixed_from_base64(iv_b64, "SM4 IV")?,
        })
    }

    pub fn key_bytes(&self) -> &[u8; SM4_KEY_SIZE] {
        &self.key
    }

    pub fn iv_bytes(&self) -> &[u8; SM4_BLOCK_SIZE] {
        &self.iv
    }
}

impl fmt::Debug for Sm4Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sm4Key")
            .field("key", &"[REDACTED]")
            .field("iv", &hex::encode(self.iv))
            .finish()
    }
}

/// SM4-CBC 对称加密系统
#[derive(Debug)]
pub struct Sm4CbcSystem;

impl SymmetricCryptographicSystem for Sm4CbcSystem {
    const KEY_SIZE: usize = SM4_KEY_SIZE;
    const BLOCK_SIZE: usize = SM4_BLOCK_SIZE;
    type Key = Sm4Key;

    fn generate_key() -> Result<Self::Key, Error> {
        let mut key = [0u8; SM4_KEY_SIZE];
        let mut iv = [0u8; SM4_BLOCK_SIZE];
        OsRng.try_fill_bytes(&mut key)?;
        OsRng.try_fill_bytes(&mut iv)?;
        let generated = Sm4Key { key, iv };
        key.zeroize();
        Ok(generated)
    }

    fn encrypt(key: &Self::Key, plaintext: &[u8]) -> Result<Vec<u8>, Error> {
        let padded = padding::pad(plaintext, PAD_BLOCK);
        let ciphertext = Sm4CbcEnc::new(&key.key.into(), &key.iv.into())
            .encrypt_padded_vec_mut::<NoPadding>(&padded);
        tracing::trace!(
            plaintext_len = plaintext.len(),
            ciphertext_len = ciphertext.len(),
            "sm4-cbc encrypt"
        );
        Ok(ciphertext)
    }

    fn decrypt(key: &Self::Key, ciphertext: &[u8]) -> Result<Vec<u8>, Error> {
        let decrypted = cbc_decrypt(key, ciphertext)?;
        Ok(padding::unpad(&decrypted).to_vec())
    }

    fn export_key(key: &Self::Key) -> String {
        format!("{}:{}", hex::encode(key.key), hex::encode(key.iv))
    }

    fn import_key(key_data: &str) -> Result<Self::Key, Error> {
        let (key_hex, iv_hex) = key_data.split_once(':').ok_or(DecodeError::InvalidLength {
            what: "SM4 key/IV pair",
            expected: 2,
            actual: 1,
        })?;
        Sm4Key::from_hex(key_hex, iv_hex)
    }
}

impl Sm4CbcSystem {
    /// 解密并要求填充有效；长度字节无效时返回 [`DecodeError::InvalidPadding`]
    pub fn decrypt_strict(key: &Sm4Key, ciphertext: &[u8]) -> Result<Vec<u8>, Error> {
        let decrypted = cbc_decrypt(key, ciphertext)?;
        match padding::inspect(&decrypted) {
            padding::Unpadding::Stripped(plaintext) => Ok(plaintext.to_vec()),
            padding::Unpadding::PassedThrough(_) => Err(DecodeError::InvalidPadding.into()),
        }
    }
}

/// 去填充之前的 CBC 解密
fn cbc_decrypt(key: &Sm4Key, ciphertext: &[u8]) -> Result<Vec<u8>, Error> {
    if ciphertext.is_empty() || ciphertext.len() % SM4_BLOCK_SIZE != 0 {
        return Err(DecodeError::MisalignedCiphertext(ciphertext.len()).into());
    }
    let decrypted = Sm4CbcDec::new(&key.key.into(), &key.iv.into())
        .decrypt_padded_vec_mut::<NoPadding>(ciphertext)
        .map_err(|_| DecodeError::MisalignedCiphertext(ciphertext.len()))?;
    tracing::trace!(ciphertext_len = ciphertext.len(), "sm4-cbc decrypt");
    Ok(decrypted)
}

#[cfg(feature = "parallel")]
impl SymmetricParallelSystem for Sm4CbcSystem {
    fn par_encrypt_batch<M: AsRef<[u8]> + Sync>(
        key: &Self::Key,
        plaintexts: &[M],
        parallelism_config: &ParallelismConfig,
    ) -> Result<Vec<Vec<u8>>, Error> {
        let pool = build_pool(parallelism_config)?;
        pool.install(|| {
            plaintexts
                .par_iter()
                .map(|plaintext| Self::encrypt(key, plaintext.as_ref()))
                .collect()
        })
    }

    fn par_decrypt_batch<M: AsRef<[u8]> + Sync>(
        key: &Self::Key,
        ciphertexts: &[M],
        parallelism_config: &ParallelismConfig,
    ) -> Result<Vec<Vec<u8>>, Error> {
        let pool = build_pool(parallelism_config)?;
        pool.install(|| {
            ciphertexts
                .par_iter()
                .map(|ciphertext| Self::decrypt(key, ciphertext.as_ref()))
                .collect()
        })
    }
}

#[cfg(feature = "parallel")]
fn build_pool(parallelism_config: &ParallelismConfig) -> Result<rayon::ThreadPool, Error> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(parallelism_config.parallelism)
        .build()
        .map_err(|e| Error::ParallelSetup(e.to_string()))
}
