//! 文本编码与结构化对象的辅助函数
//!
//! 对称与非对称的便捷接口（Hex、Base64、对象）都先经过这里，
//! 再落到各自的字节级加解密上。解码失败在进入密码运算之前就返回。

use crate::common::errors::{DecodeError, Result};
use crate::common::utils::ZeroizingVec;
use base64::{Engine, engine::general_purpose};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// 编码为小写 Hex
pub fn to_hex(bytes: impl AsRef<[u8]>) -> String {
    hex::encode(bytes)
}

/// 解码 Hex，大小写均可
pub fn from_hex(text: &str) -> Result<Vec<u8>> {
    Ok(hex::decode(text)?)
}

/// 使用标准字母表（带 `=` 填充）编码 Base64
pub fn to_base64(bytes: impl AsRef<[u8]>) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// 解码标准 Base64
pub fn from_base64(text: &str) -> Result<Vec<u8>> {
    Ok(general_purpose::STANDARD.decode(text)?)
}

/// 解码 Hex 并检查长度，用于固定长度的密钥材料
pub(crate) fn fixed_from_hex<const N: usize>(text: &str, what: &'static str) -> Result<[u8; N]> {
    let bytes = ZeroizingVec(from_hex(text)?);
    Ok(to_fixed(&bytes, what)?)
}

/// 解码 Base64 并检查长度
pub(crate) fn fixed_from_base64<const N: usize>(
    text: &str,
    what: &'static str,
) -> Result<[u8; N]> {
    let bytes = ZeroizingVec(from_base64(text)?);
    Ok(to_fixed(&bytes, what)?)
}

pub(crate) fn to_fixed<const N: usize>(
    bytes: &[u8],
    what: &'static str,
) -> std::result::Result<[u8; N], DecodeError> {
    bytes.try_into().map_err(|_| DecodeError::InvalidLength {
        what,
        expected: N,
        actual: bytes.len(),
    })
}

/// 将对象序列化为 JSON 字节，作为待加密的明文
pub fn object_to_plaintext<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

/// 将解密得到的明文反序列化为调用方指定的结构
pub fn plaintext_to_object<T: DeserializeOwned>(plaintext: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(plaintext)?)
}
