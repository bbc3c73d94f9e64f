use std::str::FromStr;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::curve::{
    Point, PointFormat, Scalar, COMPRESSED_POINT_SIZE, SCALAR_SIZE, UNCOMPRESSED_POINT_SIZE,
};
use super::error::{EciesError, Result};

/// Size of a secp256k1 private key in bytes
pub const PRIVATE_KEY_SIZE: usize = SCALAR_SIZE;

/// Recipient public key for ECIES encryption
///
/// A validated secp256k1 point. Two keys compare equal when they are the same
/// point, regardless of which SEC1 form they were parsed from.
///
/// # Examples
///
/// ```ignore
/// let secret_key = SecretKey::generate()?;
/// let public_key = secret_key.public();
///
/// // Serialize to hex for storage/transmission
/// let hex = public_key.to_hex(PointFormat::Uncompressed);
/// let recovered = PublicKey::from_hex(&hex)?;
/// assert_eq!(public_key, recovered);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKey(Point);

impl From<Point> for PublicKey {
    fn from(point: Point) -> Self {
        PublicKey(point)
    }
}

impl From<PublicKey> for Point {
    fn from(key: PublicKey) -> Self {
        key.0
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = EciesError;
    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl FromStr for PublicKey {
    type Err = EciesError;
    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl PublicKey {
    /// Parse a public key from SEC1 bytes, compressed or uncompressed
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Point::from_bytes(bytes).map(Self)
    }

    /// Parse a public key from a hexadecimal string
    ///
    /// Accepts both plain hex and "0x"-prefixed hex strings, in either
    /// compressed (66 chars) or uncompressed (130 chars) form.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.strip_prefix("0x").unwrap_or(hex);
        let bytes = hex::decode(hex)?;
        Self::from_bytes(&bytes)
    }

    /// Serialize to SEC1 bytes in the requested form
    pub fn to_bytes(&self, format: PointFormat) -> Vec<u8> {
        self.0.to_bytes(format)
    }

    /// Serialize to lowercase hex in the requested form
    pub fn to_hex(&self, format: PointFormat) -> String {
        hex::encode(self.to_bytes(format))
    }

    pub fn to_compressed(&self) -> [u8; COMPRESSED_POINT_SIZE] {
        self.0.to_compressed()
    }

    pub fn to_uncompressed(&self) -> [u8; UNCOMPRESSED_POINT_SIZE] {
        self.0.to_uncompressed()
    }

    pub(crate) fn point(&self) -> &Point {
        &self.0
    }
}

impl Serialize for PublicKey {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex(PointFormat::Uncompressed))
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let hex = String::deserialize(deserializer)?;
        PublicKey::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

/// Private key for ECIES decryption
///
/// Holds only the secret scalar; the matching [`PublicKey`] is always derived
/// on demand, so a key pair can never be assembled from mismatched halves.
/// The scalar is wiped from memory when the key is dropped, and neither
/// `Debug` nor any error message ever prints it.
///
/// # Examples
///
/// ```ignore
/// // Generate a new keypair
/// let secret_key = SecretKey::generate()?;
/// let public_key = secret_key.public();
///
/// // Import an existing key
/// let imported = SecretKey::from_hex(&secret_key.to_hex())?;
/// assert_eq!(imported.public(), public_key);
/// ```
#[derive(Clone)]
pub struct SecretKey(Scalar);

impl From<Scalar> for SecretKey {
    fn from(scalar: Scalar) -> Self {
        SecretKey(scalar)
    }
}

impl TryFrom<&[u8]> for SecretKey {
    type Error = EciesError;
    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SecretKey").field(&self.public()).finish()
    }
}

impl SecretKey {
    /// Generate a new random secret key from the operating system's CSPRNG
    pub fn generate() -> Result<Self> {
        Self::generate_with(&mut OsRng)
    }

    /// Generate a new random secret key from the supplied source
    ///
    /// Production callers should use [`SecretKey::generate`]; this exists so
    /// tests can supply a seeded generator for reproducible fixtures.
    pub fn generate_with<R>(rng: &mut R) -> Result<Self>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        Scalar::random(rng).map(Self)
    }

    /// Parse a secret key from 32 big-endian bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Scalar::from_bytes(bytes).map(Self)
    }

    /// Parse a secret key from a hexadecimal string
    ///
    /// Accepts both plain hex and "0x"-prefixed hex strings.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.strip_prefix("0x").unwrap_or(hex);
        let mut buff = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
        hex::decode_to_slice(hex, &mut buff[..])?;
        Self::from_bytes(&buff[..])
    }

    /// Derive the public key from this secret key
    pub fn public(&self) -> PublicKey {
        PublicKey(Point::generator_mul(&self.0))
    }

    /// Convert secret key to raw bytes
    pub fn to_bytes(&self) -> Zeroizing<[u8; PRIVATE_KEY_SIZE]> {
        self.0.to_bytes()
    }

    /// Convert secret key to hexadecimal string
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(&self.to_bytes()[..]))
    }

    pub(crate) fn scalar(&self) -> &Scalar {
        &self.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_keypair_generation() {
        let private_key = SecretKey::generate().unwrap();
        let public_key = private_key.public();

        // Test round-trip conversion
        let private_hex = private_key.to_hex();
        let recovered_private = SecretKey::from_hex(&private_hex).unwrap();
        assert_eq!(private_key.to_bytes(), recovered_private.to_bytes());

        for format in [PointFormat::Compressed, PointFormat::Uncompressed] {
            let public_hex = public_key.to_hex(format);
            assert_eq!(public_hex.len(), format.size() * 2);
            let recovered_public = PublicKey::from_hex(&public_hex).unwrap();
            assert_eq!(public_key, recovered_public);
        }
    }

    #[test]
    fn test_known_vector() {
        // secret key 1 maps to the generator
        let secret = SecretKey::from_hex(
            "0x0000000000000000000000000000000000000000000000000000000000000001",
        )
        .unwrap();
        assert_eq!(
            secret.public().to_hex(PointFormat::Compressed),
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
    }

    #[test]
    fn test_public_derivation_is_pure() {
        let secret = SecretKey::generate().unwrap();
        let again = SecretKey::from_bytes(&secret.to_bytes()[..]).unwrap();
        assert_eq!(secret.public(), secret.public());
        assert_eq!(secret.public(), again.public());
    }

    #[test]
    fn test_from_hex_errors() {
        assert_eq!(
            SecretKey::from_hex("not hex").unwrap_err(),
            EciesError::InvalidEncoding
        );
        assert_eq!(
            SecretKey::from_hex("abcd").unwrap_err(),
            EciesError::InvalidEncoding
        );
        assert_eq!(
            SecretKey::from_hex(&"00".repeat(PRIVATE_KEY_SIZE)).unwrap_err(),
            EciesError::InvalidScalar
        );
        assert_eq!(
            PublicKey::from_hex("zz").unwrap_err(),
            EciesError::InvalidEncoding
        );
        assert_eq!(
            PublicKey::from_hex(&format!("05{}", "11".repeat(32))).unwrap_err(),
            EciesError::InvalidPoint
        );
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let secret = SecretKey::generate().unwrap();
        let debug = format!("{:?}", secret);
        assert!(!debug.contains(secret.to_hex().as_str()));
    }

    #[test]
    fn test_public_key_serde_json() {
        let public_key = SecretKey::generate().unwrap().public();
        let json = serde_json::to_string(&public_key).unwrap();
        assert_eq!(
            json,
            format!("\"{}\"", public_key.to_hex(PointFormat::Uncompressed))
        );
        let recovered: PublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(public_key, recovered);

        // compressed hex is accepted on input
        let compressed = format!("\"{}\"", public_key.to_hex(PointFormat::Compressed));
        let recovered: PublicKey = serde_json::from_str(&compressed).unwrap();
        assert_eq!(public_key, recovered);

        assert!(serde_json::from_str::<PublicKey>("\"00\"").is_err());
    }
}
