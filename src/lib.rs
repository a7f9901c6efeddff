//! # SM-Seal: Ergonomic SM2 / SM3 / SM4
//!
//! `sm-seal` is a convenience layer over the Chinese commercial cryptography
//! primitives: SM4 block encryption in CBC mode, SM2 elliptic-curve public-key
//! encryption and the SM3 hash. Every cipher operates on raw bytes and offers
//! hex, base64 and structured-object (JSON) variants on top.
//!
//! ## Core Concepts
//!
//! - **`Sm4Cipher`**: SM4-CBC bound to a fixed key and IV, PKCS#7-style padding.
//! - **`Sm2Cipher`**: SM2 bound to a key pair; every call names its ciphertext layout
//!   through [`Sm2Mode`] (`C1C3C2` or the legacy `C1C2C3`).
//! - **`hash`**: one-shot and incremental SM3 digests.
//! - **`CryptoConfig`**: key material loaded from JSON or `SM_SEAL_*` environment variables.
//!
//! ## Quick Start
//!
//! ```rust
//! use sm_seal::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let sm4 = Sm4Cipher::from_hex(
//!         "0123456789ABCDEFFEDCBA9876543210",
//!         "00000000000000000000000000000000",
//!     )?;
//!     let ciphertext = sm4.encrypt_to_hex(b"Hello, SM4 encryption!")?;
//!     assert_eq!(sm4.decrypt_from_hex(&ciphertext)?, b"Hello, SM4 encryption!");
//!
//!     let sm2 = Sm2Cipher::generate()?;
//!     let ciphertext = sm2.encrypt(b"Hello, SM2!", Sm2Mode::C1C3C2)?;
//!     assert_eq!(sm2.decrypt(&ciphertext, Sm2Mode::C1C3C2)?, b"Hello, SM2!");
//!
//!     assert_eq!(sm_seal::hash::digest("abc").len(), 32);
//!     Ok(())
//! }
//! ```

pub mod asymmetric;
pub mod common;
pub mod hash;
pub mod symmetric;

pub use asymmetric::cipher::Sm2Cipher;
pub use asymmetric::systems::sm2::{
    Sm2Ciphertext, Sm2Mode, Sm2PrivateKey, Sm2PublicKey, Sm2System, decode_private_key,
    decode_public_key,
};
pub use common::config::CryptoConfig;
pub use common::errors::{DecodeError, Error, Result};
pub use symmetric::cipher::Sm4Cipher;
pub use symmetric::systems::sm4_cbc::{Sm4CbcSystem, Sm4Key};

// --- Prelude ---
// The most commonly used types and traits.
pub mod prelude {
    pub use crate::asymmetric::traits::AsymmetricCryptographicSystem;
    #[cfg(feature = "parallel")]
    pub use crate::symmetric::traits::SymmetricParallelSystem;
    pub use crate::symmetric::traits::SymmetricCryptographicSystem;
    pub use crate::{
        CryptoConfig, DecodeError, Error, Result, Sm2Cipher, Sm2Ciphertext, Sm2Mode, Sm4Cipher,
    };
}

/// The version of the `sm-seal` crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
