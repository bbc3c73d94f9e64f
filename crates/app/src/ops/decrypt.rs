use clap::Args;

use common::crypto::EciesError;
use common::text;

use super::SECRET_KEY_ENV;
use crate::op::arg_or_stdin;

#[derive(Args, Debug, Clone)]
pub struct Decrypt {
    /// Secret key as 64 hex characters
    #[arg(long, env = SECRET_KEY_ENV, hide_env_values = true)]
    pub secret_key: String,

    /// Base64 envelope; read from stdin when omitted
    pub envelope: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum DecryptError {
    #[error("failed to read envelope: {0}")]
    Io(#[from] std::io::Error),
    #[error("decryption failed: {0}")]
    Ecies(#[from] EciesError),
}

impl crate::op::Op for Decrypt {
    type Error = DecryptError;
    type Output = String;

    fn execute(&self, _ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let envelope = arg_or_stdin(self.envelope.as_deref())?;
        let message = text::decrypt_text(&self.secret_key, envelope.trim()).map_err(|e| {
            tracing::debug!(error = %e, "envelope rejected");
            e
        })?;
        Ok(message)
    }
}
