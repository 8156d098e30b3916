use once_cell::sync::Lazy;
use regex::Regex;

use crate::entities::contact::ContactForm;

static EMBEDDED_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)https?://").unwrap());

/// Advisory pre-filter for automated submissions.
///
/// The honeypot check is authoritative for the silent-drop path; the
/// heuristic classifier is best effort and its thresholds are tuning
/// knobs, not a contract. False positives and negatives are accepted.
#[derive(Debug, Clone)]
pub struct SpamGuard {
    keywords: Vec<String>,
    caps_run_len: usize,
    repeat_run_len: usize,
}

impl SpamGuard {
    pub fn new(keywords: Vec<String>, caps_run_len: usize, repeat_run_len: usize) -> Self {
        SpamGuard {
            keywords: keywords.into_iter().map(|k| k.to_lowercase()).collect(),
            caps_run_len,
            repeat_run_len,
        }
    }

    /// The `website_url` field is invisible to humans; any value in it
    /// means a bot filled the whole form.
    pub fn is_honeypot_tripped(&self, form: &ContactForm) -> bool {
        form.website_url
            .as_deref()
            .is_some_and(|value| !value.trim().is_empty())
    }

    /// Pattern heuristics over the free-text fields: blacklisted keywords,
    /// embedded URLs, shouting runs of capitals, keyboard-mash repeats.
    pub fn looks_like_spam(&self, form: &ContactForm) -> bool {
        let text = [
            form.name.as_str(),
            form.details.as_deref().unwrap_or(""),
            form.email.as_str(),
        ]
        .join(" ");

        let lowered = text.to_lowercase();
        if self.keywords.iter().any(|k| lowered.contains(k.as_str())) {
            return true;
        }
        if EMBEDDED_URL.is_match(&text) {
            return true;
        }
        if longest_run(&text, |c| c.is_ascii_uppercase()) >= self.caps_run_len {
            return true;
        }
        has_repeated_char_run(&text, self.repeat_run_len)
    }
}

impl Default for SpamGuard {
    fn default() -> Self {
        let defaults = crate::settings::AppConfig::default();
        SpamGuard::new(
            defaults.spam_keywords,
            defaults.spam_caps_run_len,
            defaults.spam_repeat_run_len,
        )
    }
}

/// Longest run of consecutive characters matching `pred`.
fn longest_run(text: &str, pred: impl Fn(char) -> bool) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in text.chars() {
        if pred(c) {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

/// True when any single character repeats `min_len` or more times in a
/// row. The `regex` crate has no backreferences, so this is a scan.
fn has_repeated_char_run(text: &str, min_len: usize) -> bool {
    let mut previous: Option<char> = None;
    let mut run = 0;
    for c in text.chars() {
        if Some(c) == previous {
            run += 1;
        } else {
            previous = Some(c);
            run = 1;
        }
        if run >= min_len {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, details: Option<&str>, honeypot: Option<&str>) -> ContactForm {
        ContactForm {
            name: name.to_string(),
            email: email.to_string(),
            details: details.map(String::from),
            website_url: honeypot.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn honeypot_trips_on_any_non_blank_value() {
        let guard = SpamGuard::default();
        assert!(guard.is_honeypot_tripped(&form("Jane", "j@x.com", None, Some("http://spam.biz"))));
        assert!(!guard.is_honeypot_tripped(&form("Jane", "j@x.com", None, Some("   "))));
        assert!(!guard.is_honeypot_tripped(&form("Jane", "j@x.com", None, None)));
    }

    #[test]
    fn flags_blacklisted_keywords_case_insensitively() {
        let guard = SpamGuard::default();
        assert!(guard.looks_like_spam(&form("Jane", "j@x.com", Some("Buy VIAGRA now"), None)));
    }

    #[test]
    fn flags_embedded_urls() {
        let guard = SpamGuard::default();
        assert!(guard.looks_like_spam(&form(
            "Jane",
            "j@x.com",
            Some("visit https://spam.example for deals"),
            None
        )));
    }

    #[test]
    fn flags_long_capital_runs() {
        let guard = SpamGuard::default();
        assert!(guard.looks_like_spam(&form("Jane", "j@x.com", Some("AMAZINGOFFER today"), None)));
        assert!(!guard.looks_like_spam(&form("Jane", "j@x.com", Some("ASAP please"), None)));
    }

    #[test]
    fn flags_repeated_character_runs() {
        let guard = SpamGuard::default();
        assert!(guard.looks_like_spam(&form("Jane", "j@x.com", Some("hellooooo there"), None)));
    }

    #[test]
    fn ordinary_submission_passes() {
        let guard = SpamGuard::default();
        let clean = form(
            "Jane O'Neil",
            "jane@example.com",
            Some("Looking for built-in bookshelves in the living room."),
            None,
        );
        assert!(!guard.looks_like_spam(&clean));
    }

    #[test]
    fn thresholds_are_configurable() {
        let strict = SpamGuard::new(vec![], 3, 3);
        assert!(strict.looks_like_spam(&form("Jane", "j@x.com", Some("FYI all good"), None)));
    }
}
