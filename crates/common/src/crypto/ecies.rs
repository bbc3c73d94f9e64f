//! ECIES over secp256k1 with HKDF-SHA256 and AES-256-GCM
//!
//! # Protocol Overview
//!
//! To encrypt for a recipient public key `P`:
//! 1. **Generate ephemeral keypair**: draw a fresh scalar `r`, compute `R = r·G`
//! 2. **Perform ECDH**: compute `S = r·P`, rejecting the identity
//! 3. **Derive key**: HKDF-SHA256 over `x(S)`, salted with the bytes of `R`
//! 4. **Seal**: AES-256-GCM over the plaintext with `R` as associated data
//! 5. **Package**: `R || ciphertext || tag`; `r` is wiped as it goes out of scope
//!
//! The recipient reverses this with their private scalar `d`: `S = d·R`, same
//! derivation, and the tag is verified before any plaintext is released.
//!
//! # Security Properties
//!
//! - **Ephemeral binding**: `R` is both the KDF salt and the AEAD associated
//!   data, so substituting the ephemeral key fails authentication
//! - **Per-message keys**: every envelope is sealed under a key no other
//!   envelope shares
//! - **Opaque failures**: once an envelope is long enough to parse, every
//!   decryption failure is reported as [`EciesError::AuthenticationFailed`]

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use super::curve::{Point, Scalar};
use super::envelope::{Envelope, EPHEMERAL_KEY_FORMAT};
use super::error::{EciesError, Result};
use super::keys::{PublicKey, SecretKey};
use super::secret::MessageKey;

/// Generate a new private key from the operating system's CSPRNG
pub fn generate_private_key() -> Result<SecretKey> {
    SecretKey::generate()
}

/// Derive the public key for a private key
///
/// Pure: the same private key always yields the same public key.
pub fn derive_public_key(secret_key: &SecretKey) -> PublicKey {
    secret_key.public()
}

/// Encrypt `plaintext` for the holder of `recipient`'s private key
///
/// # Errors
///
/// - [`EciesError::RandomnessFailure`] if the system random source fails
/// - [`EciesError::InvalidPoint`] if the shared secret is degenerate
pub fn encrypt(recipient: &PublicKey, plaintext: &[u8]) -> Result<Envelope> {
    encrypt_with_rng(&mut OsRng, recipient, plaintext)
}

/// Encrypt `plaintext` drawing the ephemeral key from `rng`
///
/// `rng` must be a cryptographically secure generator in production. Tests
/// pass a seeded generator to get reproducible envelopes.
pub fn encrypt_with_rng<R>(
    rng: &mut R,
    recipient: &PublicKey,
    plaintext: &[u8],
) -> Result<Envelope>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let (ephemeral_bytes, message_key) = {
        let ephemeral = Scalar::random(rng)?;
        let ephemeral_public = Point::generator_mul(&ephemeral);
        let shared = recipient.point().mul(&ephemeral).map_err(|e| {
            tracing::warn!("ECDH with recipient key produced the identity point");
            e
        })?;
        let shared_x = Zeroizing::new(shared.x_coordinate());
        let ephemeral_bytes = ephemeral_public.to_uncompressed();
        let message_key = MessageKey::derive(&shared_x[..], &ephemeral_bytes)?;
        (ephemeral_bytes, message_key)
    };

    let sealed = message_key.seal(plaintext, &ephemeral_bytes)?;
    let envelope = Envelope::assemble(&ephemeral_bytes, sealed);

    tracing::debug!(
        plaintext_len = plaintext.len(),
        envelope_len = envelope.bytes().len(),
        ephemeral_format = ?EPHEMERAL_KEY_FORMAT,
        "sealed envelope"
    );
    Ok(envelope)
}

/// Decrypt an envelope with the recipient's private key
///
/// # Errors
///
/// Returns [`EciesError::AuthenticationFailed`] if the envelope was not sealed
/// for this key or has been modified in any way.
pub fn decrypt(secret_key: &SecretKey, envelope: &Envelope) -> Result<Vec<u8>> {
    let plaintext = open(secret_key, envelope).map_err(|_| {
        tracing::debug!(envelope_len = envelope.bytes().len(), "envelope rejected");
        EciesError::AuthenticationFailed
    })?;

    tracing::debug!(plaintext_len = plaintext.len(), "opened envelope");
    Ok(plaintext)
}

/// Decrypt raw envelope bytes with the recipient's private key
///
/// # Errors
///
/// - [`EciesError::InvalidEncoding`] if `bytes` is shorter than the minimum
///   envelope size
/// - [`EciesError::AuthenticationFailed`] as for [`decrypt`]
pub fn decrypt_bytes(secret_key: &SecretKey, bytes: &[u8]) -> Result<Vec<u8>> {
    let envelope = Envelope::try_from(bytes)?;
    decrypt(secret_key, &envelope)
}

fn open(secret_key: &SecretKey, envelope: &Envelope) -> Result<Vec<u8>> {
    let ephemeral_bytes = envelope.ephemeral_public_key();
    let ephemeral_public = Point::from_bytes(ephemeral_bytes)?;
    let shared = ephemeral_public.mul(secret_key.scalar())?;
    let shared_x = Zeroizing::new(shared.x_coordinate());
    let message_key = MessageKey::derive(&shared_x[..], ephemeral_bytes)?;
    message_key.open(envelope.sealed(), ephemeral_bytes)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::crypto::envelope::MIN_ENVELOPE_SIZE;

    #[test]
    fn test_encrypt_decrypt() {
        let private_key = generate_private_key().unwrap();
        let public_key = derive_public_key(&private_key);
        let data = b"hello world, this is a test message for encryption";

        let envelope = encrypt(&public_key, data).unwrap();
        let decrypted = decrypt(&private_key, &envelope).unwrap();
        assert_eq!(data.as_slice(), decrypted.as_slice());
    }

    #[test]
    fn test_empty_plaintext() {
        let private_key = generate_private_key().unwrap();
        let envelope = encrypt(&private_key.public(), b"").unwrap();
        assert_eq!(envelope.bytes().len(), MIN_ENVELOPE_SIZE);
        assert!(decrypt(&private_key, &envelope).unwrap().is_empty());
    }

    #[test]
    fn test_decrypt_different_keys() {
        let alice = generate_private_key().unwrap();
        let bob = generate_private_key().unwrap();

        let envelope = encrypt(&alice.public(), b"for alice only").unwrap();
        assert_eq!(
            decrypt(&bob, &envelope).unwrap_err(),
            EciesError::AuthenticationFailed
        );
    }

    #[test]
    fn test_decrypt_bytes_too_short() {
        let private_key = generate_private_key().unwrap();
        assert_eq!(
            decrypt_bytes(&private_key, &[0x04; MIN_ENVELOPE_SIZE - 1]).unwrap_err(),
            EciesError::InvalidEncoding
        );
    }

    #[test]
    fn test_invalid_ephemeral_key_is_opaque() {
        let private_key = generate_private_key().unwrap();
        let envelope = encrypt(&private_key.public(), b"payload").unwrap();

        // not a point on the curve
        let mut bytes = envelope.bytes().to_vec();
        bytes[1..33].fill(0xff);
        assert_eq!(
            decrypt_bytes(&private_key, &bytes).unwrap_err(),
            EciesError::AuthenticationFailed
        );

        // unrecognised prefix
        let mut bytes = envelope.bytes().to_vec();
        bytes[0] = 0x00;
        assert_eq!(
            decrypt_bytes(&private_key, &bytes).unwrap_err(),
            EciesError::AuthenticationFailed
        );
    }

    #[test]
    fn test_ephemeral_key_substitution_fails() {
        let private_key = generate_private_key().unwrap();
        let envelope = encrypt(&private_key.public(), b"payload").unwrap();

        let substitute = generate_private_key().unwrap().public().to_uncompressed();
        let mut bytes = envelope.bytes().to_vec();
        bytes[..substitute.len()].copy_from_slice(&substitute);
        assert_eq!(
            decrypt_bytes(&private_key, &bytes).unwrap_err(),
            EciesError::AuthenticationFailed
        );
    }
}
