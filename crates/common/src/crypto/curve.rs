//! secp256k1 point and scalar arithmetic
//!
//! Thin, validating wrappers around the `k256` group implementation. The
//! wrappers carry the invariants the rest of the crate relies on:
//!
//! - a [`Scalar`] is always in `[1, n-1]` and is wiped from memory on drop
//! - a [`Point`] is always on the curve and never the identity element
//!
//! Points cross the byte boundary in SEC1 form, either compressed
//! (`02|03 || x`, 33 bytes) or uncompressed (`04 || x || y`, 65 bytes).

use k256::elliptic_curve::point::AffineCoordinates;
use k256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use k256::elliptic_curve::group::Group;
use k256::elliptic_curve::PrimeField;
use k256::{AffinePoint, EncodedPoint, FieldBytes, NonZeroScalar, ProjectivePoint};
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, Zeroizing};

use super::error::{EciesError, Result};

/// Size of a serialized scalar (private key) in bytes
pub const SCALAR_SIZE: usize = 32;
/// Size of a field element (a single affine coordinate) in bytes
pub const COORDINATE_SIZE: usize = 32;
/// Size of a SEC1 compressed point: prefix || x
pub const COMPRESSED_POINT_SIZE: usize = 1 + COORDINATE_SIZE;
/// Size of a SEC1 uncompressed point: prefix || x || y
pub const UNCOMPRESSED_POINT_SIZE: usize = 1 + 2 * COORDINATE_SIZE;

const TAG_COMPRESSED_EVEN: u8 = 0x02;
const TAG_COMPRESSED_ODD: u8 = 0x03;
const TAG_UNCOMPRESSED: u8 = 0x04;

/// Upper bound on rejection-sampling rounds when drawing a random scalar.
///
/// A healthy source is rejected with probability ~2^-128 per round, so hitting
/// this bound means the source is broken (stuck at zero, all ones, ...).
const MAX_SAMPLING_ATTEMPTS: usize = 16;

/// Byte encoding of a curve point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointFormat {
    /// 33 bytes: parity prefix and x-coordinate
    Compressed,
    /// 65 bytes: `0x04` prefix, x and y coordinates
    #[default]
    Uncompressed,
}

impl PointFormat {
    /// Serialized length of a point in this format
    pub const fn size(self) -> usize {
        match self {
            PointFormat::Compressed => COMPRESSED_POINT_SIZE,
            PointFormat::Uncompressed => UNCOMPRESSED_POINT_SIZE,
        }
    }

    fn is_compressed(self) -> bool {
        matches!(self, PointFormat::Compressed)
    }
}

impl std::str::FromStr for PointFormat {
    type Err = EciesError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "compressed" => Ok(PointFormat::Compressed),
            "uncompressed" => Ok(PointFormat::Uncompressed),
            _ => Err(EciesError::InvalidEncoding),
        }
    }
}

/// A non-zero scalar modulo the group order `n`
///
/// Only ever constructed through validating constructors, so holding a
/// `Scalar` proves the value lies in `[1, n-1]`.
#[derive(Clone)]
pub struct Scalar(NonZeroScalar);

impl Scalar {
    /// Parse a big-endian 32-byte scalar
    ///
    /// # Errors
    ///
    /// - [`EciesError::InvalidEncoding`] if `bytes` is not exactly 32 bytes long
    /// - [`EciesError::InvalidScalar`] if the value is zero or `>= n`
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SCALAR_SIZE {
            return Err(EciesError::InvalidEncoding);
        }
        let mut repr = FieldBytes::clone_from_slice(bytes);
        let scalar = Option::<NonZeroScalar>::from(NonZeroScalar::from_repr(repr));
        repr.as_mut_slice().zeroize();
        scalar.map(Self).ok_or(EciesError::InvalidScalar)
    }

    /// Draw a uniformly random scalar from `rng`
    ///
    /// Uses rejection sampling over 32-byte candidates, so the result is
    /// uniform over `[1, n-1]` with no modular bias.
    ///
    /// # Errors
    ///
    /// Returns [`EciesError::RandomnessFailure`] if `rng` fails to produce
    /// bytes, or keeps producing out-of-range candidates.
    pub fn random<R>(rng: &mut R) -> Result<Self>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let mut candidate = Zeroizing::new([0u8; SCALAR_SIZE]);
        for _ in 0..MAX_SAMPLING_ATTEMPTS {
            rng.try_fill_bytes(&mut candidate[..])?;
            if let Ok(scalar) = Self::from_bytes(&candidate[..]) {
                return Ok(scalar);
            }
        }
        tracing::warn!(
            attempts = MAX_SAMPLING_ATTEMPTS,
            "random source produced no valid scalar candidate"
        );
        Err(EciesError::RandomnessFailure)
    }

    /// Big-endian bytes of the scalar, wiped when dropped
    pub fn to_bytes(&self) -> Zeroizing<[u8; SCALAR_SIZE]> {
        let mut repr = self.0.to_repr();
        let mut out = Zeroizing::new([0u8; SCALAR_SIZE]);
        out.copy_from_slice(&repr);
        repr.as_mut_slice().zeroize();
        out
    }

    fn inner(&self) -> k256::Scalar {
        *self.0
    }
}

impl Drop for Scalar {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl std::fmt::Debug for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Scalar(..)")
    }
}

/// A point on secp256k1 other than the identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point(AffinePoint);

impl Point {
    /// Compute `k·G` for the curve generator `G`
    ///
    /// Infallible: the group has prime order and `k` is non-zero.
    pub fn generator_mul(k: &Scalar) -> Self {
        Point((ProjectivePoint::GENERATOR * k.inner()).to_affine())
    }

    /// Compute `k·self`
    ///
    /// # Errors
    ///
    /// Returns [`EciesError::InvalidPoint`] if the product is the identity.
    pub fn mul(&self, k: &Scalar) -> Result<Self> {
        Self::from_projective(ProjectivePoint::from(self.0) * k.inner())
    }

    /// Compute `self + other`
    ///
    /// # Errors
    ///
    /// Returns [`EciesError::InvalidPoint`] if the sum is the identity
    /// (i.e. `other == -self`).
    pub fn add(&self, other: &Point) -> Result<Self> {
        Self::from_projective(ProjectivePoint::from(self.0) + ProjectivePoint::from(other.0))
    }

    /// Parse a SEC1 compressed or uncompressed point
    ///
    /// # Errors
    ///
    /// - [`EciesError::InvalidEncoding`] if the length is neither 33 nor 65
    /// - [`EciesError::InvalidPoint`] if the prefix does not match the length,
    ///   a coordinate is out of field range, or the point is not on the curve
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let tag_ok = match bytes.len() {
            COMPRESSED_POINT_SIZE => {
                matches!(bytes[0], TAG_COMPRESSED_EVEN | TAG_COMPRESSED_ODD)
            }
            UNCOMPRESSED_POINT_SIZE => bytes[0] == TAG_UNCOMPRESSED,
            _ => return Err(EciesError::InvalidEncoding),
        };
        if !tag_ok {
            return Err(EciesError::InvalidPoint);
        }

        let encoded = EncodedPoint::from_bytes(bytes).map_err(|_| EciesError::InvalidPoint)?;
        let affine = Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&encoded))
            .ok_or(EciesError::InvalidPoint)?;
        Self::from_projective(ProjectivePoint::from(affine))
    }

    /// Serialize in the requested format
    pub fn to_bytes(&self, format: PointFormat) -> Vec<u8> {
        self.0
            .to_encoded_point(format.is_compressed())
            .as_bytes()
            .to_vec()
    }

    /// Serialize as a 33-byte SEC1 compressed point
    pub fn to_compressed(&self) -> [u8; COMPRESSED_POINT_SIZE] {
        let mut out = [0u8; COMPRESSED_POINT_SIZE];
        out.copy_from_slice(self.0.to_encoded_point(true).as_bytes());
        out
    }

    /// Serialize as a 65-byte SEC1 uncompressed point
    pub fn to_uncompressed(&self) -> [u8; UNCOMPRESSED_POINT_SIZE] {
        let mut out = [0u8; UNCOMPRESSED_POINT_SIZE];
        out.copy_from_slice(self.0.to_encoded_point(false).as_bytes());
        out
    }

    /// Big-endian affine x-coordinate
    pub fn x_coordinate(&self) -> [u8; COORDINATE_SIZE] {
        let mut out = [0u8; COORDINATE_SIZE];
        out.copy_from_slice(&self.0.x());
        out
    }

    fn from_projective(point: ProjectivePoint) -> Result<Self> {
        if bool::from(point.is_identity()) {
            return Err(EciesError::InvalidPoint);
        }
        Ok(Point(point.to_affine()))
    }
}
