/**
 * Cryptographic types and operations.
 *  - secp256k1 point and scalar arithmetic
 *  - Secret and public key implementations
 *  - ECIES encryption to a public key
 */
pub mod crypto;
/**
 * Canonical hex/base64/UTF-8 wrapping of keys,
 *  envelopes and messages for callers that can
 *  only pass strings around.
 */
pub mod text;

pub mod prelude {
    pub use crate::crypto::{
        decrypt, derive_public_key, encrypt, generate_private_key, EciesError, Envelope,
        PointFormat, PublicKey, SecretKey,
    };
    pub use crate::text::KeyInfo;
}
