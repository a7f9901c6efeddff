//!
//! # 通用配置模块
//!
//! 描述 SM4 与 SM2 门面所需的密钥材料与参数，可从 JSON 文件、
//! JSON 字符串或环境变量加载，再据此构造 [`Sm4Cipher`] 与 [`Sm2Cipher`]。
//!
use crate::asymmetric::cipher::Sm2Cipher;
use crate::asymmetric::systems::sm2::Sm2Mode;
use crate::common::errors::{Error, Result};
use crate::symmetric::cipher::Sm4Cipher;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use zeroize::{Zeroize, ZeroizeOnDrop};

const ENV_SM4_KEY: &str = "SM_SEAL_SM4_KEY";
const ENV_SM4_IV: &str = "SM_SEAL_SM4_IV";
const ENV_SM4_ENCODING: &str = "SM_SEAL_SM4_ENCODING";
const ENV_SM2_PUBLIC_KEY: &str = "SM_SEAL_SM2_PUBLIC_KEY";
const ENV_SM2_PRIVATE_KEY: &str = "SM_SEAL_SM2_PRIVATE_KEY";
const ENV_SM2_MODE: &str = "SM_SEAL_SM2_MODE";

/// SM4 密钥与 IV 的文本编码
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyEncoding {
    #[default]
    Hex,
    Base64,
}

impl std::str::FromStr for KeyEncoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hex" => Ok(KeyEncoding::Hex),
            "base64" => Ok(KeyEncoding::Base64),
            other => Err(Error::Configuration(format!(
                "unknown key encoding '{other}', expected 'hex' or 'base64'"
            ))),
        }
    }
}

/// SM4-CBC 配置
#[derive(Clone, Serialize, Deserialize, PartialEq, Zeroize, ZeroizeOnDrop)]
pub struct Sm4Config {
    /// 16 字节密钥的文本形式
    pub key: String,
    /// 16 字节 IV 的文本形式
    pub iv: String,
    #[serde(default)]
    #[zeroize(skip)]
    pub encoding: KeyEncoding,
}

impl fmt::Debug for Sm4Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sm4Config")
            .field("key", &"[REDACTED]")
            .field("iv", &self.iv)
            .field("encoding", &self.encoding)
            .finish()
    }
}

/// SM2 配置
#[derive(Clone, Serialize, Deserialize, PartialEq, Zeroize, ZeroizeOnDrop)]
pub struct Sm2Config {
    /// 未压缩公钥（04‖X‖Y）的 Hex
    pub public_key: String,
    /// 私钥标量 D 的 Hex
    pub private_key: String,
    #[serde(default)]
    #[zeroize(skip)]
    pub mode: Sm2Mode,
}

impl fmt::Debug for Sm2Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sm2Config")
            .field("public_key", &self.public_key)
            .field("private_key", &"[REDACTED]")
            .field("mode", &self.mode)
            .finish()
    }
}

/// 并行批处理配置
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParallelismConfig {
    /// 工作线程数
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
}

fn default_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

impl Default for ParallelismConfig {
    fn default() -> Self {
        Self {
            parallelism: default_parallelism(),
        }
    }
}

/// 完整配置，各算法的段落均为可选
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CryptoConfig {
    #[serde(default)]
    pub sm4: Option<Sm4Config>,
    #[serde(default)]
    pub sm2: Option<Sm2Config>,
    #[serde(default)]
    pub parallelism: ParallelismConfig,
}

impl CryptoConfig {
    /// 从 JSON 字符串加载
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 从 JSON 文件加载
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            sm4 = config.sm4.is_some(),
            sm2 = config.sm2.is_some(),
            "loaded crypto config"
        );
        Ok(config)
    }

    /// 从 `SM_SEAL_*` 环境变量加载
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|name| std::env::var(name).ok())
    }

    /// 使用给定的查找函数加载，便于测试与嵌入其他配置源
    pub fn from_env_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let sm4 = match (lookup(ENV_SM4_KEY), lookup(ENV_SM4_IV)) {
            (Some(key), Some(iv)) => {
                let encoding = match lookup(ENV_SM4_ENCODING) {
                    Some(value) => value.parse()?,
                    None => KeyEncoding::default(),
                };
                Some(Sm4Config { key, iv, encoding })
            }
            (None, None) => None,
            _ => {
                return Err(Error::Configuration(format!(
                    "{ENV_SM4_KEY} and {ENV_SM4_IV} must be set together"
                )));
            }
        };

        let sm2 = match (lookup(ENV_SM2_PUBLIC_KEY), lookup(ENV_SM2_PRIVATE_KEY)) {
            (Some(public_key), Some(private_key)) => {
                let mode = match lookup(ENV_SM2_MODE) {
                    Some(value) => value.parse()?,
                    None => Sm2Mode::default(),
                };
                Some(Sm2Config {
                    public_key,
                    private_key,
                    mode,
                })
            }
            (None, None) => None,
            _ => {
                return Err(Error::Configuration(format!(
                    "{ENV_SM2_PUBLIC_KEY} and {ENV_SM2_PRIVATE_KEY} must be set together"
                )));
            }
        };

        tracing::debug!(
            sm4 = sm4.is_some(),
            sm2 = sm2.is_some(),
            "loaded crypto config from environment"
        );
        Ok(Self {
            sm4,
            sm2,
            parallelism: ParallelismConfig::default(),
        })
    }

    /// 根据 `sm4` 段落构造对称加密门面
    pub fn sm4_cipher(&self) -> Result<Sm4Cipher> {
        let section = self
            .sm4
            .as_ref()
            .ok_or_else(|| Error::Configuration("missing 'sm4' section".to_string()))?;
        Sm4Cipher::from_config(section)
    }

    /// 根据 `sm2` 段落构造非对称加密门面
    pub fn sm2_cipher(&self) -> Result<Sm2Cipher> {
        let section = self
            .sm2
            .as_ref()
            .ok_or_else(|| Error::Configuration("missing 'sm2' section".to_string()))?;
        Sm2Cipher::from_config(section)
    }
}
