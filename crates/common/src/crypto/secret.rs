//! Per-message symmetric keys: HKDF-SHA256 derivation and AES-256-GCM sealing
//!
//! Every envelope gets its own [`MessageKey`], derived from the x-coordinate of
//! the ECDH shared point with the serialized ephemeral public key as HKDF salt.
//! Because the ephemeral key is fresh per message, so is the derived key, which
//! lets the GCM nonce be derived alongside it instead of transmitted.

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::error::{EciesError, Result};

/// Size of the AES-256 key in bytes (256 bits)
pub const SECRET_SIZE: usize = 32;
/// Size of the AES-GCM nonce in bytes
pub const NONCE_SIZE: usize = 12;
/// Size of the AES-GCM authentication tag in bytes
pub const TAG_SIZE: usize = 16;

/// HKDF `info` label; versions the envelope format
pub const KDF_INFO: &[u8] = b"ecies-box/v1/aes-256-gcm";

const OKM_SIZE: usize = SECRET_SIZE + NONCE_SIZE;

/// Single-use AES-256-GCM key and nonce
///
/// Wiped from memory on drop. Never construct one from anything but
/// [`MessageKey::derive`]: reusing a key/nonce pair across two plaintexts
/// breaks GCM.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct MessageKey {
    key: [u8; SECRET_SIZE],
    nonce: [u8; NONCE_SIZE],
}

impl std::fmt::Debug for MessageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MessageKey(..)")
    }
}

impl MessageKey {
    /// Derive the message key from a shared secret
    ///
    /// * `shared_x` - x-coordinate of the ECDH shared point
    /// * `context` - serialized ephemeral public key, used as the HKDF salt
    ///
    /// # Errors
    ///
    /// Returns [`EciesError::InvalidPoint`] if HKDF refuses the expansion;
    /// cannot happen for the fixed output size used here.
    pub fn derive(shared_x: &[u8], context: &[u8]) -> Result<Self> {
        let hk = Hkdf::<Sha256>::new(Some(context), shared_x);
        let mut okm = Zeroizing::new([0u8; OKM_SIZE]);
        hk.expand(KDF_INFO, &mut okm[..])
            .map_err(|_| EciesError::InvalidPoint)?;

        let mut key = [0u8; SECRET_SIZE];
        let mut nonce = [0u8; NONCE_SIZE];
        key.copy_from_slice(&okm[..SECRET_SIZE]);
        nonce.copy_from_slice(&okm[SECRET_SIZE..]);
        Ok(Self { key, nonce })
    }

    /// Encrypt `plaintext`, authenticating it together with `aad`
    ///
    /// Output is `ciphertext || tag (16 bytes)`.
    ///
    /// # Errors
    ///
    /// Returns [`EciesError::InvalidEncoding`] if the plaintext exceeds the
    /// AES-GCM message size limit.
    pub fn seal(&self, plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>> {
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.key));
        cipher
            .encrypt(
                Nonce::from_slice(&self.nonce),
                Payload {
                    msg: plaintext,
                    aad,
                },
            )
            .map_err(|_| EciesError::InvalidEncoding)
    }

    /// Verify and decrypt `ciphertext || tag`
    ///
    /// The tag is checked over `ciphertext` and `aad` before any keystream is
    /// applied, so nothing derived from unauthenticated input is ever returned.
    ///
    /// # Errors
    ///
    /// Returns [`EciesError::AuthenticationFailed`] on any verification failure.
    pub fn open(&self, sealed: &[u8], aad: &[u8]) -> Result<Vec<u8>> {
        if sealed.len() < TAG_SIZE {
            return Err(EciesError::AuthenticationFailed);
        }
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.key));
        cipher
            .decrypt(
                Nonce::from_slice(&self.nonce),
                Payload { msg: sealed, aad },
            )
            .map_err(|_| EciesError::AuthenticationFailed)
    }
}
