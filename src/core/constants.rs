//! Application-wide constants to avoid magic values throughout the codebase.
//!
//! Field names, notify tokens, console messages and mail settings live here
//! so the CLI, the validator and the tests agree on a single spelling.

/// HTTP status code constants
pub mod http_status {
    /// HTTP 200 OK - the only status that counts as reachable
    pub const OK: u16 = 200;
}

/// Timeout and duration constants
pub mod timeouts {
    /// Default probe timeout in seconds
    pub const DEFAULT_PROBE_TIMEOUT_SECONDS: f64 = 10.0;
    /// Maximum accepted probe timeout in seconds (1 hour)
    pub const MAX_PROBE_TIMEOUT_SECONDS: f64 = 3600.0;
    /// Maximum number of redirects followed by a single probe
    pub const MAX_REDIRECTS: usize = 10;
}

/// Keys of a raw input row
pub mod fields {
    pub const TITLE: &str = "title";
    /// Canonical spelling of the URI column; matched case-insensitively
    pub const URI: &str = "URI";
    pub const NOTIFY: &str = "notify";

    /// All keys a raw row may carry, in report order
    pub const ALL: [&str; 3] = [TITLE, URI, NOTIFY];
}

/// Notify policy tokens
pub mod notify_tokens {
    pub const ALWAYS: &str = "always";
    pub const VALID: &str = "valid";
    pub const INVALID: &str = "invalid";

    pub const ALL: [&str; 3] = [ALWAYS, VALID, INVALID];
}

/// Default configuration values
pub mod defaults {
    /// Subject used when neither `--subject` nor the config provides one
    pub const SUBJECT: &str = "Pathfinder report";
    /// Directory holding `app.toml` and `app.local.toml`
    pub const CONFIG_DIR: &str = "etc";
    /// Environment variable overriding the config directory
    pub const CONFIG_DIR_ENV: &str = "PATHFINDER_CONFIG_DIR";
    pub const BASE_CONFIG_FILE: &str = "app.toml";
    pub const LOCAL_CONFIG_FILE: &str = "app.local.toml";
    /// Directory name under the platform config dir for the per-user file
    pub const USER_CONFIG_DIR: &str = "pathfinder";
    pub const USER_CONFIG_FILE: &str = "config.toml";
}

/// Mail relay settings
pub mod mail {
    /// Relay every report is sent through
    pub const SMTP_RELAY: &str = "smtp.gmail.com";
    /// STARTTLS submission port
    pub const SMTP_PORT: u16 = 587;
    /// SMTP reply codes that mean the relay refused our credentials
    pub const AUTH_REJECTION_CODES: [&str; 3] = ["530", "534", "535"];
}

/// Console messages printed by the run orchestrator
pub mod messages {
    pub const VALIDATING: &str = "Validating:";
    pub const ZERO_MATCHED: &str = "Zero rows matched, so no mail was sent.";
    pub const SENT_MAIL: &str = "Sent mail.";
}

/// Plain-text report layout
pub mod report {
    /// Minimum width of the Result column
    pub const RESULT_WIDTH: usize = 10;
    /// Minimum width of the Title column
    pub const TITLE_WIDTH: usize = 20;
    /// Character used for the rule under the header
    pub const RULE_CHAR: char = '=';
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names() {
        assert_eq!(fields::ALL, ["title", "URI", "notify"]);
    }

    #[test]
    fn test_notify_tokens() {
        assert_eq!(notify_tokens::ALL, ["always", "valid", "invalid"]);
    }

    #[test]
    fn test_timeout_bounds() {
        let default = timeouts::DEFAULT_PROBE_TIMEOUT_SECONDS;
        assert!(default > 0.0);
        assert!(default <= timeouts::MAX_PROBE_TIMEOUT_SECONDS);
    }

    #[test]
    fn test_auth_codes_are_5xx() {
        for code in mail::AUTH_REJECTION_CODES {
            assert!(code.starts_with('5'));
        }
    }
}
