use clap::Args;

use common::crypto::{EciesError, PointFormat};
use common::text;

use super::SECRET_KEY_ENV;

#[derive(Args, Debug, Clone)]
pub struct Pubkey {
    /// Secret key as 64 hex characters
    #[arg(long, env = SECRET_KEY_ENV, hide_env_values = true)]
    pub secret_key: String,

    /// compressed or uncompressed; defaults to the config file setting
    #[arg(long)]
    pub format: Option<PointFormat>,
}

#[derive(Debug, thiserror::Error)]
pub enum PubkeyError {
    #[error("invalid secret key: {0}")]
    SecretKey(#[from] EciesError),
}

impl crate::op::Op for Pubkey {
    type Error = PubkeyError;
    type Output = String;

    fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let secret_key = text::decode_secret_key(&self.secret_key)?;
        let format = self.format.unwrap_or(ctx.config.public_key_format);
        Ok(secret_key.public().to_hex(format))
    }
}
