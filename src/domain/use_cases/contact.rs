use chrono::Utc;
use validator::Validate;

use crate::{
    email::{templates, Mailer, OutboundEmail},
    entities::contact::{ContactForm, ContactResponse, SanitizedContact},
    errors::AppError,
    settings::AppConfig,
    utils::spam::SpamGuard,
};

/// Response body for an accepted submission.
const ACCEPTED_MESSAGE: &str =
    "Thank you for your message! We'll get back to you within 24 hours.";
/// Response body for a silently dropped spam submission. Identical in
/// shape to a success so automated senders learn nothing.
const SILENT_DROP_MESSAGE: &str = "Thank you for your message!";

/// Everything the pipeline needs besides the transport itself.
#[derive(Debug, Clone)]
pub struct ContactSettings {
    pub email_from: String,
    pub email_to: String,
    pub site_url: String,
    pub business_name: String,
    pub business_phone: String,
}

impl From<&AppConfig> for ContactSettings {
    fn from(config: &AppConfig) -> Self {
        ContactSettings {
            email_from: config.contact_email_from.clone(),
            email_to: config.contact_email_to.clone(),
            site_url: config.site_url.clone(),
            business_name: config.business_name.clone(),
            business_phone: config.business_phone.clone(),
        }
    }
}

/// Orchestrates a submission that already passed admission control:
/// spam check, validation, sanitization, then the two notification
/// sends in order. The business alert is fatal on failure; the visitor
/// acknowledgment is logged and swallowed, because the lead was
/// already captured.
pub struct ContactHandler<M>
where
    M: Mailer,
{
    mailer: M,
    spam_guard: SpamGuard,
    settings: ContactSettings,
}

impl<M> ContactHandler<M>
where
    M: Mailer,
{
    pub fn new(mailer: M, spam_guard: SpamGuard, settings: ContactSettings) -> Self {
        ContactHandler {
            mailer,
            spam_guard,
            settings,
        }
    }

    pub async fn submit(&self, form: ContactForm) -> Result<ContactResponse, AppError> {
        if self.spam_guard.is_honeypot_tripped(&form) {
            tracing::info!("honeypot tripped, dropping submission silently");
            return Ok(ContactResponse {
                message: SILENT_DROP_MESSAGE.to_string(),
            });
        }
        if self.spam_guard.looks_like_spam(&form) {
            tracing::info!("heuristic spam match, dropping submission silently");
            return Ok(ContactResponse {
                message: SILENT_DROP_MESSAGE.to_string(),
            });
        }

        form.validate()?;
        let data = form.sanitize();

        self.send_business_alert(&data).await?;
        self.send_acknowledgment(&data).await;

        tracing::info!(
            name = %data.name,
            email = %data.email,
            service = %data.service,
            "contact form submission accepted"
        );

        Ok(ContactResponse {
            message: ACCEPTED_MESSAGE.to_string(),
        })
    }

    async fn send_business_alert(&self, data: &SanitizedContact) -> Result<(), AppError> {
        let alert = OutboundEmail {
            from: self.settings.email_from.clone(),
            to: self.settings.email_to.clone(),
            subject: format!("New Contact Form Submission from {}", data.name),
            html: templates::business_notification(data, &self.settings.business_name, Utc::now()),
        };
        self.mailer.send(&alert).await.map_err(|e| {
            tracing::error!("failed to send business notification: {e}");
            AppError::NotificationFailed
        })
    }

    async fn send_acknowledgment(&self, data: &SanitizedContact) {
        let ack = OutboundEmail {
            from: self.settings.email_from.clone(),
            to: data.email.clone(),
            subject: format!("Thank you for contacting {}!", self.settings.business_name),
            html: templates::acknowledgment(
                &data.name,
                &self.settings.business_name,
                &self.settings.business_phone,
                &self.settings.site_url,
            ),
        };
        if let Err(e) = self.mailer.send(&ack).await {
            tracing::warn!("failed to send acknowledgment email, lead already captured: {e}");
        }
    }
}
