use thiserror::Error;

/// 输入无法被解码为合法的密钥、向量或密文
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("invalid {what} length: expected {expected}, got {actual}")]
    InvalidLength {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("ciphertext length {0} is not a positive multiple of the block size")]
    MisalignedCiphertext(usize),

    #[error("ciphertext too short: need at least {min} bytes, got {actual}")]
    CiphertextTooShort { min: usize, actual: usize },

    #[error("public key is not a valid uncompressed SM2 point")]
    InvalidPublicKey,

    #[error("private key is not a valid SM2 scalar")]
    InvalidPrivateKey,

    #[error("private key does not match the supplied public key")]
    KeyMismatch,

    #[error("ciphertext C1 is not a valid SM2 point")]
    InvalidCiphertextPoint,

    #[error("unknown SM2 ciphertext mode: {0}")]
    UnknownMode(u8),

    #[error("padding is absent or malformed")]
    InvalidPadding,
}

/// 加解密操作可能遇到的错误类型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Integrity check failed: recomputed C3 does not match")]
    Integrity,

    #[error("Serialization error (JSON): {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Key generation failed: {0}")]
    KeyGeneration(#[from] rand_core::Error),

    #[error("Parallel execution setup failed: {0}")]
    ParallelSetup(String),
}

// 嵌套的解码错误无法使用 #[from] 直接转换，手动实现
impl From<hex::FromHexError> for Error {
    fn from(err: hex::FromHexError) -> Self {
        Error::Decode(DecodeError::Hex(err))
    }
}

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Error::Decode(DecodeError::Base64(err))
    }
}

impl Error {
    /// 是否为解码类错误
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode(_))
    }

    /// 是否为完整性校验失败
    pub fn is_integrity(&self) -> bool {
        matches!(self, Error::Integrity)
    }

    /// 是否为结构化对象（反）序列化失败
    pub fn is_serialization(&self) -> bool {
        matches!(self, Error::Serialization(_))
    }
}

/// 本库统一的结果类型
pub type Result<T, E = Error> = std::result::Result<T, E>;
