use std::env;
use std::time::Duration;

/// Fallback signing secret, accepted only outside production.
const LOCAL_SESSION_SECRET: &str = "librario-local-session-secret";

/// AppConfig
///
/// Holds the service's configuration. It is loaded once at startup and never mutated, and
/// is pulled into handlers, extractors and the route guard through `FromRef`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Controls the development session bypass and log format.
    pub env: Env,
    // Address the HTTP listener binds to.
    pub bind_addr: String,
    // Backend REST API origin; requests go to `{api_base}/api/...`.
    pub api_base: String,
    // HMAC secret used to sign and verify the session cookie.
    pub session_secret: String,
    // Lifetime of an issued session before it decodes as anonymous.
    pub session_ttl_hours: i64,
    // Display window of the navigation transition overlay.
    pub transition: Duration,
}

/// Env
///
/// Selects between local development conveniences and production behavior.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// default
    ///
    /// Non-panicking configuration used by tests and local scaffolding.
    fn default() -> Self {
        Self {
            env: Env::Local,
            bind_addr: "0.0.0.0:3000".to_string(),
            api_base: "http://localhost:8080".to_string(),
            session_secret: LOCAL_SESSION_SECRET.to_string(),
            session_ttl_hours: 24,
            transition: Duration::from_millis(1200),
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables.
    ///
    /// # Panics
    /// Panics in production when `SESSION_SECRET` is not set, so the service never starts
    /// signing sessions with the well-known local secret.
    pub fn load() -> Self {
        let defaults = Self::default();

        let env = match env::var("APP_ENV").as_deref() {
            Ok("production") => Env::Production,
            _ => Env::Local,
        };

        let session_secret = match env {
            Env::Production => env::var("SESSION_SECRET")
                .expect("FATAL: SESSION_SECRET must be set in production."),
            Env::Local => {
                env::var("SESSION_SECRET").unwrap_or_else(|_| LOCAL_SESSION_SECRET.to_string())
            }
        };

        let transition_ms = env_parse("TRANSITION_MS", 1200u64);

        Self {
            env,
            bind_addr: env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            api_base: env::var("API_BASE")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            session_secret,
            session_ttl_hours: env_parse("SESSION_TTL_HOURS", defaults.session_ttl_hours),
            transition: Duration::from_millis(transition_ms),
        }
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
