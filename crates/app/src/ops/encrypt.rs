use clap::Args;

use common::crypto::EciesError;
use common::text;

use crate::op::arg_or_stdin;

#[derive(Args, Debug, Clone)]
pub struct Encrypt {
    /// Recipient public key in hex, compressed or uncompressed
    #[arg(long)]
    pub to: String,

    /// UTF-8 message to encrypt; read from stdin when omitted
    #[arg(long)]
    pub message: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum EncryptError {
    #[error("failed to read message: {0}")]
    Io(#[from] std::io::Error),
    #[error("encryption failed: {0}")]
    Ecies(#[from] EciesError),
}

impl crate::op::Op for Encrypt {
    type Error = EncryptError;
    type Output = String;

    fn execute(&self, _ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let message = arg_or_stdin(self.message.as_deref())?;
        let envelope = text::encrypt_text(&self.to, &message)?;
        tracing::debug!(message_len = message.len(), "encrypted message");
        Ok(envelope)
    }
}
