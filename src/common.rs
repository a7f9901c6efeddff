//! 通用模块，包含错误处理、配置、编码与工具函数

pub mod config;
pub mod encoding;
pub mod errors;
pub mod utils;

pub use self::config::{CryptoConfig, KeyEncoding, ParallelismConfig, Sm2Config, Sm4Config};
pub use self::errors::{DecodeError, Error, Result};
pub use self::utils::ZeroizingVec;
