//! # Symmetric Cryptographic Systems Module
//!
//! Symmetric block cipher systems supported by the crate. Each system implements
//! the `SymmetricCryptographicSystem` trait and, with the `parallel` feature,
//! `SymmetricParallelSystem` for independent message batches.
//!
//! ---
//!
//! # 对称加密系统模块
//!
//! 本模块汇集库中支持的对称分组密码系统。
//! 每个系统都实现 `SymmetricCryptographicSystem` 特征，
//! 启用 `parallel` 特性时还实现 `SymmetricParallelSystem`，用于批量处理相互独立的消息。

pub mod sm4_cbc;

pub use sm4_cbc::{Sm4CbcSystem, Sm4Key};
