//! # Text Processing Utilities
//!
//! Helpers for keeping API keys out of logs and terminal output, plus the
//! informational key-shape check used by the entry form.

use once_cell::sync::Lazy;
use regex::Regex;

/// Prefix shared by Google API keys, including Gemini keys.
pub const GEMINI_KEY_PREFIX: &str = "AIza";

/// Number of leading characters `mask_secret` reveals.
const REVEALED_PREFIX_CHARS: usize = 4;
/// Values shorter than this are masked completely.
const MIN_REVEAL_LENGTH: usize = 12;

/// Redacts values that look like secrets in a string.
///
/// Google API keys, `*_KEY=`/`*_TOKEN=` style assignments and authorization
/// headers are replaced with `[REDACTED]` while keeping the surrounding names
/// so the message stays useful for debugging.
///
/// # Example
/// ```rust
/// use keyentry_util::redact_sensitive;
///
/// let redacted = redact_sensitive("GEMINI_API_KEY=abc123");
/// assert_eq!(redacted, "GEMINI_API_KEY=[REDACTED]");
/// ```
pub fn redact_sensitive(input: &str) -> String {
    let mut redacted = input.to_string();
    for pattern in get_redact_patterns().iter() {
        redacted = pattern
            .replace_all(&redacted, |captures: &regex::Captures| {
                let prefix = captures.get(1).map(|m| m.as_str()).unwrap_or("");
                format!("{prefix}[REDACTED]")
            })
            .to_string();
    }
    redacted
}

fn get_redact_patterns() -> &'static Vec<Regex> {
    static REDACT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(build_redact_patterns);

    &REDACT_PATTERNS
}

fn build_redact_patterns() -> Vec<Regex> {
    [
        r"()AIza[0-9A-Za-z_\-]{8,}",
        r"(?i)(authorization:\s+)([^\s]+(?:\s+[^\s]+)*)",
        r"(?i)(\b[A-Z0-9_]*(?:KEY|TOKEN|SECRET|PASSWORD)\s*=\s*)([^\s]+)",
        r"(?i)(--[a-z\-]*key[=\s]+)([^\s]+)",
    ]
    .iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect()
}

/// Produces a log-safe rendering of a secret: the first few characters and
/// the total length, e.g. `AIza… (39 chars)`.
///
/// Short values reveal nothing beyond their length.
pub fn mask_secret(value: &str) -> String {
    let count = value.chars().count();
    if count < MIN_REVEAL_LENGTH {
        return format!("[REDACTED] ({count} chars)");
    }
    let prefix: String = value.chars().take(REVEALED_PREFIX_CHARS).collect();
    format!("{prefix}… ({count} chars)")
}

/// Returns `true` when the trimmed value carries the conventional Gemini key
/// prefix. Informational only; keys without it are still accepted.
pub fn looks_like_gemini_key(value: &str) -> bool {
    value.trim().starts_with(GEMINI_KEY_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_env_style_assignments() {
        let input = "export GEMINI_API_KEY=supersecret";
        assert_eq!(redact_sensitive(input), "export GEMINI_API_KEY=[REDACTED]");
    }

    #[test]
    fn redacts_bare_google_keys() {
        let input = "rejected key AIzaSyA1234567890abcdef while parsing";
        assert_eq!(redact_sensitive(input), "rejected key [REDACTED] while parsing");
    }

    #[test]
    fn redacts_key_flags() {
        let input = "unexpected argument for --initial-key secret-value";
        assert_eq!(redact_sensitive(input), "unexpected argument for --initial-key [REDACTED]");
    }

    #[test]
    fn leaves_ordinary_text_alone() {
        let input = "PORT=8080 theme=nord";
        assert_eq!(redact_sensitive(input), input);
    }

    #[test]
    fn mask_secret_reveals_prefix_and_length_only() {
        let key = "AIzaSyA1234567890abcdefghijklmnopqrstu";
        let masked = mask_secret(key);
        assert_eq!(masked, format!("AIza… ({} chars)", key.chars().count()));
        assert!(!masked.contains("1234"));
    }

    #[test]
    fn mask_secret_hides_short_values() {
        assert_eq!(mask_secret("abc"), "[REDACTED] (3 chars)");
        assert_eq!(mask_secret(""), "[REDACTED] (0 chars)");
    }

    #[test]
    fn gemini_prefix_check_ignores_surrounding_whitespace() {
        assert!(looks_like_gemini_key("  AIzaXYZ  "));
        assert!(!looks_like_gemini_key("sk-live-123"));
        assert!(!looks_like_gemini_key(""));
    }
}
