//! Run and environment configuration.
//!
//! Two layers: [`RunConfig`] carries the per-run operator settings (mode,
//! pacing delay, bearer credential) and is validated up front so a missing
//! credential fails before any network call; [`AppConfig`] carries ambient
//! settings read from the environment with sensible defaults. Both are
//! passed explicitly into discovery/executor calls — nothing reads
//! process-wide state at run time.

use std::time::Duration;

use crate::error::ConfigError;
use crate::types::RunMode;

/// Inclusive bounds on the operator-configured inter-request delay.
pub const MIN_DELAY_SECS: u64 = 1;
pub const MAX_DELAY_SECS: u64 = 10;

const DEFAULT_API_BASE_URL: &str = "https://api.reverb.com/api";
const DEFAULT_USER_AGENT: &str = "guardian/0.1 (listing-moderation)";

/// Operator settings for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub mode: RunMode,
    /// Fixed pacing sleep between moderation requests.
    pub delay: Duration,
    /// Opaque bearer credential, passed through to the marketplace unchanged.
    pub bearer_token: String,
}

impl RunConfig {
    /// Validates operator settings before discovery begins.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingCredential`] — blank bearer token. The
    ///   credential is required even for dry runs because discovery itself
    ///   authenticates against the search surface.
    /// - [`ConfigError::DelayOutOfRange`] — delay outside 1-10 seconds.
    pub fn new(mode: RunMode, delay_secs: u64, bearer_token: &str) -> Result<Self, ConfigError> {
        if bearer_token.trim().is_empty() {
            return Err(ConfigError::MissingCredential);
        }
        if !(MIN_DELAY_SECS..=MAX_DELAY_SECS).contains(&delay_secs) {
            return Err(ConfigError::DelayOutOfRange { secs: delay_secs });
        }
        Ok(Self {
            mode,
            delay: Duration::from_secs(delay_secs),
            bearer_token: bearer_token.to_owned(),
        })
    }
}

/// Ambient configuration from the environment. Every field has a default;
/// only malformed values are errors.
#[derive(Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Sleep between discovery pages, in milliseconds.
    pub page_delay_ms: u64,
    /// Runaway guard on per-strategy pagination.
    pub max_pages_per_strategy: u32,
    /// Consecutive zero-yield strategies before discovery is abandoned.
    pub max_barren_strategies: u32,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("page_delay_ms", &self.page_delay_ms)
            .field("max_pages_per_strategy", &self.max_pages_per_strategy)
            .field("max_barren_strategies", &self.max_barren_strategies)
            .finish()
    }
}

/// Load ambient configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] if a set variable fails to parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load ambient configuration from variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] if a set variable fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build configuration using the provided env-var lookup function.
///
/// The parsing/validation logic is decoupled from the actual environment so
/// it can be tested with a pure `HashMap` lookup — no `set_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let api_base_url = or_default("GUARDIAN_API_BASE_URL", DEFAULT_API_BASE_URL);
    let request_timeout_secs = parse_u64("GUARDIAN_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("GUARDIAN_USER_AGENT", DEFAULT_USER_AGENT);
    let page_delay_ms = parse_u64("GUARDIAN_PAGE_DELAY_MS", "500")?;
    let max_pages_per_strategy = parse_u32("GUARDIAN_MAX_PAGES_PER_STRATEGY", "50")?;
    let max_barren_strategies = parse_u32("GUARDIAN_MAX_BARREN_STRATEGIES", "4")?;

    Ok(AppConfig {
        api_base_url,
        request_timeout_secs,
        user_agent,
        page_delay_ms,
        max_pages_per_strategy,
        max_barren_strategies,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn build_app_config_uses_defaults_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.api_base_url, "https://api.reverb.com/api");
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.user_agent, "guardian/0.1 (listing-moderation)");
        assert_eq!(cfg.page_delay_ms, 500);
        assert_eq!(cfg.max_pages_per_strategy, 50);
        assert_eq!(cfg.max_barren_strategies, 4);
    }

    #[test]
    fn build_app_config_honors_overrides() {
        let mut map = HashMap::new();
        map.insert("GUARDIAN_API_BASE_URL", "http://127.0.0.1:9999/api");
        map.insert("GUARDIAN_REQUEST_TIMEOUT_SECS", "5");
        map.insert("GUARDIAN_MAX_BARREN_STRATEGIES", "2");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.api_base_url, "http://127.0.0.1:9999/api");
        assert_eq!(cfg.request_timeout_secs, 5);
        assert_eq!(cfg.max_barren_strategies, 2);
    }

    #[test]
    fn build_app_config_rejects_non_numeric_timeout() {
        let mut map = HashMap::new();
        map.insert("GUARDIAN_REQUEST_TIMEOUT_SECS", "soon");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "GUARDIAN_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar, got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_non_numeric_page_guard() {
        let mut map = HashMap::new();
        map.insert("GUARDIAN_MAX_PAGES_PER_STRATEGY", "-3");
        let result = build_app_config(lookup_from_map(&map));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar { .. })));
    }

    #[test]
    fn run_config_accepts_valid_settings() {
        let cfg = RunConfig::new(RunMode::Live, 2, "token-abc").unwrap();
        assert_eq!(cfg.mode, RunMode::Live);
        assert_eq!(cfg.delay, Duration::from_secs(2));
        assert_eq!(cfg.bearer_token, "token-abc");
    }

    #[test]
    fn run_config_rejects_blank_credential() {
        let result = RunConfig::new(RunMode::DryRun, 2, "   ");
        assert!(matches!(result, Err(ConfigError::MissingCredential)));
    }

    #[test]
    fn run_config_rejects_zero_delay() {
        let result = RunConfig::new(RunMode::Live, 0, "token");
        assert!(matches!(
            result,
            Err(ConfigError::DelayOutOfRange { secs: 0 })
        ));
    }

    #[test]
    fn run_config_rejects_delay_above_ceiling() {
        let result = RunConfig::new(RunMode::Live, 11, "token");
        assert!(matches!(
            result,
            Err(ConfigError::DelayOutOfRange { secs: 11 })
        ));
    }

    #[test]
    fn run_config_accepts_delay_bounds() {
        assert!(RunConfig::new(RunMode::Live, MIN_DELAY_SECS, "t").is_ok());
        assert!(RunConfig::new(RunMode::Live, MAX_DELAY_SECS, "t").is_ok());
    }
}
