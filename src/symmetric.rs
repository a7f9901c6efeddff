//! 对称加密核心模块

pub mod cipher;
pub mod padding;
pub mod systems;
pub mod traits;
