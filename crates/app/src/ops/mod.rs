pub mod decrypt;
pub mod encrypt;
pub mod keygen;
pub mod pubkey;

pub use decrypt::Decrypt;
pub use encrypt::Encrypt;
pub use keygen::Keygen;
pub use pubkey::Pubkey;

/// Environment variable consulted when `--secret-key` is not given
pub const SECRET_KEY_ENV: &str = "ECIES_BOX_SECRET_KEY";
