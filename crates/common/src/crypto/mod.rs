//! Cryptographic primitives for ecies-box
//!
//! This module provides public-key encryption of opaque messages between two
//! parties that share no prior secret:
//!
//! - **Curve**: secp256k1 points and scalars with validated (de)serialization
//! - **Keys**: `SecretKey`/`PublicKey` for the recipient's long-term identity
//! - **Encryption**: ECIES with HKDF-SHA256 and AES-256-GCM
//!
//! # Security Model
//!
//! ## Recipient Identity
//! A recipient publishes a secp256k1 `PublicKey`. Anyone holding it can
//! encrypt; only the holder of the matching `SecretKey` can decrypt. The
//! secret key is never logged and is wiped from memory on drop.
//!
//! ## Message Encryption
//! Every message gets a fresh ephemeral keypair. The ECDH shared point is fed
//! through HKDF, salted with the ephemeral public key, to produce a single-use
//! AES-256-GCM key. The ephemeral scalar is discarded before the call returns.
//!
//! ## Envelope
//! The output is an `Envelope` (ephemeral_pubkey || ciphertext || tag). The
//! tag covers both the ciphertext and the ephemeral public key.
//!
//! ## Randomness
//! Functions that need randomness come in two flavours: a default one drawing
//! from the operating system, and a `*_with`/`*_with_rng` variant that takes
//! the generator explicitly so tests can use a seeded source.

mod curve;
mod ecies;
mod envelope;
mod error;
mod keys;
mod secret;

pub use curve::{
    Point, PointFormat, Scalar, COMPRESSED_POINT_SIZE, SCALAR_SIZE, UNCOMPRESSED_POINT_SIZE,
};
pub use ecies::{
    decrypt, decrypt_bytes, derive_public_key, encrypt, encrypt_with_rng, generate_private_key,
};
pub use envelope::{Envelope, EPHEMERAL_KEY_FORMAT, EPHEMERAL_KEY_SIZE, MIN_ENVELOPE_SIZE};
pub use error::{EciesError, Result};
pub use keys::{PublicKey, SecretKey, PRIVATE_KEY_SIZE};
pub use secret::{KDF_INFO, TAG_SIZE};
