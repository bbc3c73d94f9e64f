use clap::Args;

use common::crypto::EciesError;
use common::text::KeyInfo;

#[derive(Args, Debug, Clone)]
pub struct Keygen {
    /// Pretty-print the key pair JSON
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum KeygenError {
    #[error("key generation failed: {0}")]
    Ecies(#[from] EciesError),
    #[error("failed to serialize key pair: {0}")]
    Json(#[from] serde_json::Error),
}

impl crate::op::Op for Keygen {
    type Error = KeygenError;
    type Output = String;

    fn execute(&self, _ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let info = KeyInfo::generate()?;
        tracing::info!(public_key = %info.public, "generated key pair");

        let output = if self.pretty {
            serde_json::to_string_pretty(&info)?
        } else {
            serde_json::to_string(&info)?
        };
        Ok(output)
    }
}
