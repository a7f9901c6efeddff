//! PKCS#7 风格的分组填充
//!
//! 去填充只信任最后一个字节给出的长度，不逐字节校验填充内容。
//! 长度字节为 0 或超出数据长度时，数据被视为未填充并原样返回，
//! 调用方可通过 [`inspect`] 区分这两种结果。
use std::num::NonZeroU8;

/// 去填充的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unpadding<'a> {
    /// 已按长度字节去除填充
    Stripped(&'a [u8]),
    /// 长度字节无效，数据原样返回
    PassedThrough(&'a [u8]),
}

impl<'a> Unpadding<'a> {
    /// 取出数据，不区分是否真正去除了填充
    pub fn into_inner(self) -> &'a [u8] {
        match self {
            Unpadding::Stripped(data) | Unpadding::PassedThrough(data) => data,
        }
    }

    pub fn is_stripped(&self) -> bool {
        matches!(self, Unpadding::Stripped(_))
    }
}

/// 填充到 `block_size` 的整数倍
///
/// 总是追加 1..=block_size 个值为 N 的字节，已对齐时追加一个完整分组。
/// 分组长度限定为非零的单字节，填充长度总能写进最后一个字节。
pub fn pad(data: &[u8], block_size: NonZeroU8) -> Vec<u8> {
    let block_size = usize::from(block_size.get());
    let pad_len = block_size - (data.len() % block_size);
    let mut padded = Vec::with_capacity(data.len() + pad_len);
    padded.extend_from_slice(data);
    padded.resize(data.len() + pad_len, pad_len as u8);
    padded
}

/// 检查最后一个字节并给出去填充结果
pub fn inspect(data: &[u8]) -> Unpadding<'_> {
    let Some(&last) = data.last() else {
        return Unpadding::PassedThrough(data);
    };
    let pad_len = last as usize;
    if pad_len == 0 || pad_len > data.len() {
        tracing::debug!(
            len = data.len(),
            pad_len,
            "padding length byte out of range, data passed through"
        );
        return Unpadding::PassedThrough(data);
    }
    Unpadding::Stripped(&data[..data.len() - pad_len])
}

/// 去除填充；长度字节无效时原样返回
pub fn unpad(data: &[u8]) -> &[u8] {
    inspect(data).into_inner()
}
