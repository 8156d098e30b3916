use async_trait::async_trait;
use derive_more::Display;

pub mod resend;
pub mod templates;

/// One transactional message handed to the provider.
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Display)]
pub enum MailError {
    #[display("email transport failed: {_0}")]
    Transport(String),

    #[display("email provider rejected the message: {_0}")]
    Rejected(String),
}

/// Seam over the transactional-email provider: accepts a
/// from/to/subject/HTML body, returns success or an error. No retries
/// happen at this layer.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError>;
}
