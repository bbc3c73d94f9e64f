//! The ECIES ciphertext artifact
//!
//! # Wire Format
//!
//! ```text
//! [ ephemeral_pubkey: 65 bytes ][ ciphertext: len(plaintext) bytes ][ tag: 16 bytes ]
//! ```
//!
//! The ephemeral public key is always SEC1 uncompressed, so every part can be
//! located from the total length alone.

use serde::{Deserialize, Serialize};

use super::curve::{PointFormat, UNCOMPRESSED_POINT_SIZE};
use super::error::{EciesError, Result};
use super::secret::TAG_SIZE;

/// Encoding of the ephemeral public key inside an envelope
pub const EPHEMERAL_KEY_FORMAT: PointFormat = PointFormat::Uncompressed;
/// Size of the ephemeral public key prefix in bytes
pub const EPHEMERAL_KEY_SIZE: usize = UNCOMPRESSED_POINT_SIZE;
/// Smallest valid envelope: ephemeral key and tag around an empty plaintext
pub const MIN_ENVELOPE_SIZE: usize = EPHEMERAL_KEY_SIZE + TAG_SIZE;

/// Upper bound on buffer space reserved from a sequence's declared length
const MAX_PREALLOC: usize = 4096;

/// An encrypted message for a single recipient
///
/// Produced by [`crate::crypto::encrypt`] and consumed by
/// [`crate::crypto::decrypt`]. Holding an `Envelope` guarantees only that it is
/// long enough to be split into its parts; authenticity is established by
/// decryption.
///
/// # Examples
///
/// ```ignore
/// // Alice encrypts a message for Bob
/// let envelope = encrypt(&bob_public_key, b"hello bob")?;
///
/// // Bob decrypts it with his private key
/// let plaintext = decrypt(&bob_secret_key, &envelope)?;
/// assert_eq!(plaintext, b"hello bob");
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Envelope(Vec<u8>);

impl Serialize for Envelope {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bytes(&self.0)
    }
}

impl<'de> Deserialize<'de> for Envelope {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{Error, Visitor};
        use std::fmt;

        struct EnvelopeVisitor;

        impl EnvelopeVisitor {
            fn check<E: Error>(bytes: Vec<u8>) -> std::result::Result<Envelope, E> {
                if bytes.len() < MIN_ENVELOPE_SIZE {
                    return Err(E::invalid_length(
                        bytes.len(),
                        &format!("at least {} bytes", MIN_ENVELOPE_SIZE).as_str(),
                    ));
                }
                Ok(Envelope(bytes))
            }
        }

        impl<'de> Visitor<'de> for EnvelopeVisitor {
            type Value = Envelope;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(
                    formatter,
                    "a byte array or sequence of at least {} bytes",
                    MIN_ENVELOPE_SIZE
                )
            }

            fn visit_bytes<E>(self, v: &[u8]) -> std::result::Result<Self::Value, E>
            where
                E: Error,
            {
                Self::check(v.to_vec())
            }

            fn visit_byte_buf<E>(self, v: Vec<u8>) -> std::result::Result<Self::Value, E>
            where
                E: Error,
            {
                Self::check(v)
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                // the hint is declared by the input; cap what it can reserve
                let capacity = seq.size_hint().unwrap_or(0).min(MAX_PREALLOC);
                let mut bytes = Vec::with_capacity(capacity);
                while let Some(byte) = seq.next_element::<u8>()? {
                    bytes.push(byte);
                }
                Self::check(bytes)
            }
        }

        // Try bytes first (for CBOR/bincode), fallback to seq (for JSON)
        deserializer.deserialize_byte_buf(EnvelopeVisitor)
    }
}

impl TryFrom<Vec<u8>> for Envelope {
    type Error = EciesError;
    fn try_from(bytes: Vec<u8>) -> Result<Self> {
        if bytes.len() < MIN_ENVELOPE_SIZE {
            tracing::debug!(
                len = bytes.len(),
                min = MIN_ENVELOPE_SIZE,
                "envelope too short"
            );
            return Err(EciesError::InvalidEncoding);
        }
        Ok(Envelope(bytes))
    }
}

impl TryFrom<&[u8]> for Envelope {
    type Error = EciesError;
    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::try_from(bytes.to_vec())
    }
}

impl From<Envelope> for Vec<u8> {
    fn from(envelope: Envelope) -> Self {
        envelope.0
    }
}

impl AsRef<[u8]> for Envelope {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Envelope {
    /// Join an ephemeral key with `ciphertext || tag` as produced by the AEAD
    pub(crate) fn assemble(ephemeral: &[u8; EPHEMERAL_KEY_SIZE], sealed: Vec<u8>) -> Self {
        let mut out = Vec::with_capacity(EPHEMERAL_KEY_SIZE + sealed.len());
        out.extend_from_slice(ephemeral);
        out.extend_from_slice(&sealed);
        Envelope(out)
    }

    /// The serialized ephemeral public key `R`
    pub fn ephemeral_public_key(&self) -> &[u8] {
        &self.0[..EPHEMERAL_KEY_SIZE]
    }

    /// The symmetric ciphertext, excluding the tag
    pub fn ciphertext(&self) -> &[u8] {
        &self.0[EPHEMERAL_KEY_SIZE..self.0.len() - TAG_SIZE]
    }

    /// The authentication tag
    pub fn tag(&self) -> &[u8] {
        &self.0[self.0.len() - TAG_SIZE..]
    }

    /// `ciphertext || tag`, the input expected by the AEAD
    pub(crate) fn sealed(&self) -> &[u8] {
        &self.0[EPHEMERAL_KEY_SIZE..]
    }

    /// Length of the plaintext this envelope decrypts to
    pub fn plaintext_len(&self) -> usize {
        self.0.len() - MIN_ENVELOPE_SIZE
    }

    /// Get a reference to the raw envelope bytes
    pub fn bytes(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::crypto::{decrypt, encrypt, SecretKey};
    use serde::de::value::{Error as ValueError, SeqDeserializer};

    fn sample() -> (SecretKey, Envelope) {
        let private_key = SecretKey::generate().unwrap();
        let envelope = encrypt(&private_key.public(), b"sample plaintext").unwrap();
        (private_key, envelope)
    }

    #[test]
    fn test_envelope_layout() {
        let (_, envelope) = sample();
        assert_eq!(envelope.bytes().len(), MIN_ENVELOPE_SIZE + 16);
        assert_eq!(envelope.plaintext_len(), 16);
        assert_eq!(envelope.ephemeral_public_key().len(), EPHEMERAL_KEY_SIZE);
        assert_eq!(envelope.ephemeral_public_key()[0], 0x04);
        assert_eq!(envelope.ciphertext().len(), 16);
        assert_eq!(envelope.tag().len(), TAG_SIZE);

        let mut joined = envelope.ephemeral_public_key().to_vec();
        joined.extend_from_slice(envelope.ciphertext());
        joined.extend_from_slice(envelope.tag());
        assert_eq!(joined, envelope.bytes());
    }

    #[test]
    fn test_try_from_length() {
        assert_eq!(
            Envelope::try_from(&[0u8; MIN_ENVELOPE_SIZE - 1][..]).unwrap_err(),
            EciesError::InvalidEncoding
        );
        assert!(Envelope::try_from(vec![0u8; MIN_ENVELOPE_SIZE]).is_ok());
    }

    #[test]
    fn test_envelope_serde_json_roundtrip() {
        let (private_key, envelope) = sample();

        let json = serde_json::to_string(&envelope).unwrap();
        let recovered: Envelope = serde_json::from_str(&json).unwrap();
        assert_eq!(envelope, recovered);

        let plaintext = decrypt(&private_key, &recovered).unwrap();
        assert_eq!(plaintext, b"sample plaintext");
    }

    #[test]
    fn test_envelope_serde_bincode_roundtrip() {
        let (private_key, envelope) = sample();

        let binary = bincode::serialize(&envelope).unwrap();
        let recovered: Envelope = bincode::deserialize(&binary).unwrap();
        assert_eq!(envelope, recovered);

        let plaintext = decrypt(&private_key, &recovered).unwrap();
        assert_eq!(plaintext, b"sample plaintext");
    }

    /// Byte iterator that claims to hold far more items than it yields
    struct OversizedHint(std::vec::IntoIter<u8>);

    impl Iterator for OversizedHint {
        type Item = u8;

        fn next(&mut self) -> Option<u8> {
            self.0.next()
        }

        fn size_hint(&self) -> (usize, Option<usize>) {
            (usize::MAX / 2, Some(usize::MAX / 2))
        }
    }

    fn from_oversized_seq(bytes: Vec<u8>) -> std::result::Result<Envelope, ValueError> {
        let seq = SeqDeserializer::<_, ValueError>::new(OversizedHint(bytes.into_iter()));
        Envelope::deserialize(seq)
    }

    #[test]
    fn test_envelope_deserialize_ignores_declared_length() {
        assert!(from_oversized_seq(vec![0u8; 10]).is_err());

        let envelope = from_oversized_seq(vec![0u8; MIN_ENVELOPE_SIZE]).unwrap();
        assert_eq!(envelope.bytes().len(), MIN_ENVELOPE_SIZE);
    }

    #[test]
    fn test_envelope_deserialize_invalid_length() {
        let short_data = vec![0u8; MIN_ENVELOPE_SIZE - 1];
        let result: std::result::Result<Envelope, _> =
            bincode::deserialize(&bincode::serialize(&short_data).unwrap());
        assert!(result.is_err());

        let result: std::result::Result<Envelope, _> =
            serde_json::from_str(&serde_json::to_string(&short_data).unwrap());
        assert!(result.is_err());
    }
}
