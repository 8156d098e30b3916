use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use std::{env, fmt, str::FromStr};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    #[serde(default = "default_site_url")]
    pub site_url: String,

    #[serde(default = "default_business_name")]
    pub business_name: String,

    #[serde(default = "default_business_phone")]
    pub business_phone: String,

    #[serde(default)]
    pub resend_api_key: String,

    #[serde(default = "default_email_from")]
    pub contact_email_from: String,

    #[serde(default = "default_email_to")]
    pub contact_email_to: String,

    /// Length of the rate-limit window, in seconds.
    #[serde(default = "default_rate_limit_window_secs")]
    pub rate_limit_window_secs: u64,

    /// Submissions allowed per client identifier per window.
    #[serde(default = "default_rate_limit_max_requests")]
    pub rate_limit_max_requests: u32,

    /// Distinct client identifiers tracked at once; the least recently
    /// seen identifier is evicted beyond this.
    #[serde(default = "default_rate_limit_max_clients")]
    pub rate_limit_max_clients: usize,

    #[serde(default = "default_trust_x_forwarded_for")]
    pub trust_x_forwarded_for: bool,

    /// Keyword fragments that mark a submission as likely spam,
    /// matched case-insensitively as substrings.
    #[serde(default = "default_spam_keywords")]
    pub spam_keywords: Vec<String>,

    #[serde(default = "default_spam_caps_run_len")]
    pub spam_caps_run_len: usize,

    #[serde(default = "default_spam_repeat_run_len")]
    pub spam_repeat_run_len: usize,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Contact-API".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_site_url() -> String {
    "https://montanafinishcarpenter.com".to_string()
}
fn default_business_name() -> String {
    "Montana Finish Carpenter".to_string()
}
fn default_business_phone() -> String {
    "(406) 555-0123".to_string()
}
fn default_email_from() -> String {
    "noreply@montanafinishcarpenter.com".to_string()
}
fn default_email_to() -> String {
    "info@montanafinishcarpenter.com".to_string()
}
fn default_rate_limit_window_secs() -> u64 {
    15 * 60
}
fn default_rate_limit_max_requests() -> u32 {
    5
}
fn default_rate_limit_max_clients() -> usize {
    500
}
fn default_trust_x_forwarded_for() -> bool {
    true
}
fn default_spam_keywords() -> Vec<String> {
    [
        "viagra", "cialis", "casino", "poker", "betting",
        "seo service", "cheap price", "payday loan",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
fn default_spam_caps_run_len() -> usize {
    10
}
fn default_spam_repeat_run_len() -> usize {
    5
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name.to_string().to_lowercase())).required(false))
            .add_source(Environment::with_prefix("APP").separator("_").ignore_empty(true));

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        // Inject critical env values if missing
        config.resend_api_key = fill_or_env(config.resend_api_key, "APP_RESEND_API_KEY")?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.resend_api_key.trim().is_empty() {
            errors.push("RESEND_API_KEY cannot be empty");
        }
        if self.contact_email_from.trim().is_empty() {
            errors.push("CONTACT_EMAIL_FROM cannot be empty");
        }
        if self.contact_email_to.trim().is_empty() {
            errors.push("CONTACT_EMAIL_TO cannot be empty");
        }
        if self.rate_limit_window_secs == 0 {
            errors.push("RATE_LIMIT_WINDOW_SECS must be greater than zero");
        }
        if self.rate_limit_max_requests == 0 {
            errors.push("RATE_LIMIT_MAX_REQUESTS must be greater than zero");
        }
        if self.rate_limit_max_clients == 0 {
            errors.push("RATE_LIMIT_MAX_CLIENTS must be greater than zero");
        }
        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            errors.push("Wildcard CORS (*) is not allowed in production");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            env: default_env(),
            name: default_name(),
            port: default_port(),
            host: default_host(),
            worker_count: default_worker_count(),
            cors_allowed_origins: default_cors_origins(),
            site_url: default_site_url(),
            business_name: default_business_name(),
            business_phone: default_business_phone(),
            resend_api_key: String::new(),
            contact_email_from: default_email_from(),
            contact_email_to: default_email_to(),
            rate_limit_window_secs: default_rate_limit_window_secs(),
            rate_limit_max_requests: default_rate_limit_max_requests(),
            rate_limit_max_clients: default_rate_limit_max_clients(),
            trust_x_forwarded_for: default_trust_x_forwarded_for(),
            spam_keywords: default_spam_keywords(),
            spam_caps_run_len: default_spam_caps_run_len(),
            spam_repeat_run_len: default_spam_repeat_run_len(),
        }
    }
}

fn fill_or_env(current: String, env_key: &str) -> Result<String, ConfigError> {
    if current.trim().is_empty() {
        env::var(env_key).map_err(|_| ConfigError::Message(format!("{env_key} must be set")))
    } else {
        Ok(current)
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.is_empty() {
            "[MISSING]"
        } else {
            "[REDACTED]"
        }
    }
}

impl Redact for String {
    fn redact(&self) -> &str {
        self.as_str().redact()
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("site_url", &self.site_url)
            .field("business_name", &self.business_name)
            .field("business_phone", &self.business_phone)
            .field("resend_api_key", &self.resend_api_key.redact())
            .field("contact_email_from", &self.contact_email_from)
            .field("contact_email_to", &self.contact_email_to)
            .field("rate_limit_window_secs", &self.rate_limit_window_secs)
            .field("rate_limit_max_requests", &self.rate_limit_max_requests)
            .field("rate_limit_max_clients", &self.rate_limit_max_clients)
            .field("trust_x_forwarded_for", &self.trust_x_forwarded_for)
            .field("spam_caps_run_len", &self.spam_caps_run_len)
            .field("spam_repeat_run_len", &self.spam_repeat_run_len)
            .finish()
    }
}
