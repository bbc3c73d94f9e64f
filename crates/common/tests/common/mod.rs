//! Shared test utilities for ECIES integration tests
#![allow(dead_code)]

use ::common::crypto::SecretKey;
use rand::rngs::StdRng;
use rand::{CryptoRng, RngCore, SeedableRng};

/// The message exchanged in the originator-info scenario
pub const ORIGINATOR_INFO: &[u8] =
    br#"{"type":"originator_info","originatorInfo":{"title":"myapp","url":"myapp.com"}}"#;

/// Install a test subscriber so `RUST_LOG=debug cargo test` shows crate events
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Deterministic generator for reproducible fixtures
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Key pair drawn from a seeded generator
pub fn seeded_key(seed: u64) -> SecretKey {
    SecretKey::generate_with(&mut seeded_rng(seed)).unwrap()
}

/// Random source whose every draw fails
pub struct FailingRng;

impl RngCore for FailingRng {
    fn next_u32(&mut self) -> u32 {
        panic!("infallible draw from FailingRng")
    }

    fn next_u64(&mut self) -> u64 {
        panic!("infallible draw from FailingRng")
    }

    fn fill_bytes(&mut self, _dest: &mut [u8]) {
        panic!("infallible draw from FailingRng")
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
        Err(rand::Error::new("entropy source unavailable"))
    }
}

impl CryptoRng for FailingRng {}
