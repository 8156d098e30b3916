use std::time::Duration;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, routes};
pub use infrastructure::{email, limiter, utils};

use email::{resend::ResendMailer, Mailer};
use limiter::rate_limiter::SlidingWindowLimiter;
use settings::AppConfig;
use use_cases::contact::{ContactHandler, ContactSettings};
use utils::spam::SpamGuard;

/// Shared per-process state. The rate limiter's client table is the
/// only mutable piece; everything else is configuration wired into the
/// submission pipeline at startup.
pub struct AppState<M>
where
    M: Mailer,
{
    pub contact_handler: ContactHandler<M>,
    pub rate_limiter: SlidingWindowLimiter,
    pub max_requests: u32,
    pub trust_x_forwarded_for: bool,
}

impl<M> AppState<M>
where
    M: Mailer,
{
    /// Build state around an arbitrary mail transport; tests hand in a
    /// mock here.
    pub fn with_mailer(config: &AppConfig, mailer: M) -> Self {
        let spam_guard = SpamGuard::new(
            config.spam_keywords.clone(),
            config.spam_caps_run_len,
            config.spam_repeat_run_len,
        );
        let contact_handler = ContactHandler::new(mailer, spam_guard, ContactSettings::from(config));
        let rate_limiter = SlidingWindowLimiter::new(
            Duration::from_secs(config.rate_limit_window_secs),
            config.rate_limit_max_clients,
        );

        AppState {
            contact_handler,
            rate_limiter,
            max_requests: config.rate_limit_max_requests,
            trust_x_forwarded_for: config.trust_x_forwarded_for,
        }
    }
}

impl AppState<ResendMailer> {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_mailer(config, ResendMailer::new(config.resend_api_key.clone()))
    }
}
