//! Canonical text encodings for crossing a process or language boundary
//!
//! One convention per value type, applied identically when producing and
//! consuming:
//!
//! | value       | text form                                               |
//! |-------------|---------------------------------------------------------|
//! | secret key  | lowercase hex of the 32 raw bytes                       |
//! | public key  | lowercase hex of the 65-byte uncompressed SEC1 encoding |
//! | envelope    | standard padded base64 of the raw envelope bytes        |
//! | plaintext   | UTF-8                                                   |
//!
//! Hex inputs may carry a `0x` prefix, and public keys are also accepted in
//! compressed form since both decode to the same point. Envelopes are base64 of
//! the raw bytes, never base64 of a hex string.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::crypto::{self, EciesError, Envelope, PointFormat, PublicKey, Result, SecretKey};

/// Form used when writing public keys as text
pub const PUBLIC_KEY_TEXT_FORMAT: PointFormat = PointFormat::Uncompressed;

/// Lowercase hex of the 32 secret key bytes, wiped when dropped
pub fn encode_secret_key(secret_key: &SecretKey) -> Zeroizing<String> {
    secret_key.to_hex()
}

/// Parse a 64-character hex secret key, with or without `0x`
pub fn decode_secret_key(text: &str) -> Result<SecretKey> {
    SecretKey::from_hex(text)
}

/// Lowercase hex of the uncompressed public key (130 characters)
pub fn encode_public_key(public_key: &PublicKey) -> String {
    public_key.to_hex(PUBLIC_KEY_TEXT_FORMAT)
}

/// Parse a compressed or uncompressed hex public key, with or without `0x`
pub fn decode_public_key(text: &str) -> Result<PublicKey> {
    PublicKey::from_hex(text)
}

/// Standard padded base64 of the raw envelope bytes
pub fn encode_envelope(envelope: &Envelope) -> String {
    BASE64.encode(envelope.bytes())
}

/// Decode a base64 envelope
///
/// # Errors
///
/// Returns [`EciesError::InvalidEncoding`] for invalid base64 or an envelope
/// shorter than [`crypto::MIN_ENVELOPE_SIZE`].
pub fn decode_envelope(text: &str) -> Result<Envelope> {
    let bytes = BASE64.decode(text)?;
    Envelope::try_from(bytes)
}

/// Encrypt a UTF-8 message for a hex-encoded public key, returning base64
pub fn encrypt_text(public_key_hex: &str, plaintext: &str) -> Result<String> {
    let recipient = decode_public_key(public_key_hex)?;
    let envelope = crypto::encrypt(&recipient, plaintext.as_bytes())?;
    Ok(encode_envelope(&envelope))
}

/// Decrypt a base64 envelope with a hex-encoded secret key
///
/// # Errors
///
/// In addition to the decryption errors, returns
/// [`EciesError::InvalidEncoding`] if the recovered plaintext is not UTF-8.
pub fn decrypt_text(secret_key_hex: &str, envelope_base64: &str) -> Result<String> {
    let secret_key = decode_secret_key(secret_key_hex)?;
    let envelope = decode_envelope(envelope_base64)?;
    let plaintext = crypto::decrypt(&secret_key, &envelope)?;
    String::from_utf8(plaintext).map_err(|e| {
        e.into_bytes().zeroize();
        EciesError::InvalidEncoding
    })
}

/// Text form of a key pair, as handed to the other side of the boundary
///
/// Wiped from memory on drop; `Debug` shows only the public half.
#[derive(Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct KeyInfo {
    pub private: String,
    pub public: String,
}

impl std::fmt::Debug for KeyInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyInfo")
            .field("private", &"..")
            .field("public", &self.public)
            .finish()
    }
}

impl From<&SecretKey> for KeyInfo {
    fn from(secret_key: &SecretKey) -> Self {
        KeyInfo {
            private: encode_secret_key(secret_key).as_str().to_owned(),
            public: encode_public_key(&secret_key.public()),
        }
    }
}

impl KeyInfo {
    /// Generate a fresh key pair and return its text form
    pub fn generate() -> Result<Self> {
        Ok(Self::from(&SecretKey::generate()?))
    }

    /// Parse the key pair back, checking the public half matches the private
    ///
    /// # Errors
    ///
    /// Returns [`EciesError::InvalidPoint`] if `public` is a valid key that
    /// does not belong to `private`.
    pub fn secret_key(&self) -> Result<SecretKey> {
        let secret_key = decode_secret_key(&self.private)?;
        if decode_public_key(&self.public)? != secret_key.public() {
            return Err(EciesError::InvalidPoint);
        }
        Ok(secret_key)
    }
}
