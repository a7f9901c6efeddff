//! 非对称加密核心模块

pub mod cipher;
pub mod systems;
pub mod traits;
