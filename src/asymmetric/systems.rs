//! 算法系统集合
//!
//! 目前包含 SM2 公钥加密
pub mod sm2;
