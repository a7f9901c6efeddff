//! # SM3 Hash Service
//!
//! One-shot and incremental SM3 digests (GB/T 32905-2016), 32-byte output.
//! Hashing never fails, including on empty input.
//!
//! ---
//!
//! # SM3 摘要服务
//!
//! 提供一次性与增量两种 SM3 摘要计算方式，输出固定 32 字节。

use sm3::{Digest, Sm3};

/// SM3 摘要长度（字节）
pub const SM3_OUTPUT_SIZE: usize = 32;

/// 计算输入的 SM3 摘要，字符串与字节均可
pub fn digest(input: impl AsRef<[u8]>) -> [u8; SM3_OUTPUT_SIZE] {
    Sm3::digest(input.as_ref()).into()
}

/// 计算 SM3 摘要并以小写 Hex 返回
pub fn digest_hex(input: impl AsRef<[u8]>) -> String {
    hex::encode(digest(input))
}

/// 增量 SM3 计算
#[derive(Clone, Default)]
pub struct Sm3Hasher {
    inner: Sm3,
}

impl Sm3Hasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加数据
    pub fn update(&mut self, data: impl AsRef<[u8]>) -> &mut Self {
        self.inner.update(data.as_ref());
        self
    }

    /// 结束计算并返回摘要
    pub fn finalize(self) -> [u8; SM3_OUTPUT_SIZE] {
        self.inner.finalize().into()
    }
}
