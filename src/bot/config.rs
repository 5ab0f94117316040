use std::{fmt, time::Duration};

/* Config holds everything the bot reads from its environment.
 * The bot token is required; API keys are passed through as-is,
 * an absent key surfaces later as an upstream rejection.
 */

pub const DEFAULT_WEATHER_API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_MEME_API_URL: &str = "https://meme-api.com/gimme";
pub const DEFAULT_GIF_API_URL: &str = "https://api.giphy.com/v1/gifs/search";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

const VAR_BOT_TOKEN: &str = "BOT_TOKEN";
const VAR_TELOXIDE_TOKEN: &str = "TELOXIDE_TOKEN";
const VAR_WEATHER_API_KEY: &str = "OPENWEATHERMAP_API_KEY";
const VAR_GIF_API_KEY: &str = "GIPHY_API_KEY";
const VAR_WEATHER_API_URL: &str = "WEATHER_API_URL";
const VAR_MEME_API_URL: &str = "MEME_API_URL";
const VAR_GIF_API_URL: &str = "GIF_API_URL";
const VAR_HTTP_TIMEOUT_SECS: &str = "HTTP_TIMEOUT_SECS";

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Missing required variable {0}")]
    MissingVariable(&'static str),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

// Endpoints and keys of the three upstream APIs.
#[derive(Clone, PartialEq)]
pub struct UpstreamConfig {
    pub weather_url: String,
    pub weather_api_key: String,
    pub meme_url: String,
    pub gif_url: String,
    pub gif_api_key: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        UpstreamConfig {
            weather_url: DEFAULT_WEATHER_API_URL.to_string(),
            weather_api_key: String::new(),
            meme_url: DEFAULT_MEME_API_URL.to_string(),
            gif_url: DEFAULT_GIF_API_URL.to_string(),
            gif_api_key: String::new(),
        }
    }
}

pub struct Config {
    pub bot_token: String,
    pub upstream: UpstreamConfig,
    pub http_timeout: Duration,
}

impl Config {
    // Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // Reads the configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let bot_token = non_empty(VAR_BOT_TOKEN)
            .or_else(|| non_empty(VAR_TELOXIDE_TOKEN))
            .ok_or(ConfigError::MissingVariable(VAR_BOT_TOKEN))?;

        let defaults = UpstreamConfig::default();
        let upstream = UpstreamConfig {
            weather_url: non_empty(VAR_WEATHER_API_URL).unwrap_or(defaults.weather_url),
            weather_api_key: lookup(VAR_WEATHER_API_KEY).unwrap_or_default(),
            meme_url: non_empty(VAR_MEME_API_URL).unwrap_or(defaults.meme_url),
            gif_url: non_empty(VAR_GIF_API_URL).unwrap_or(defaults.gif_url),
            gif_api_key: lookup(VAR_GIF_API_KEY).unwrap_or_default(),
        };

        let http_timeout = match non_empty(VAR_HTTP_TIMEOUT_SECS) {
            Some(raw) => parse_timeout(&raw)?,
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        Ok(Config {
            bot_token,
            upstream,
            http_timeout,
        })
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidValue(
            VAR_HTTP_TIMEOUT_SECS,
            raw.to_string(),
        )),
    }
}

// Secrets stay out of the logs.
fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("weather_url", &self.weather_url)
            .field("weather_api_key", &redact(&self.weather_api_key))
            .field("meme_url", &self.meme_url)
            .field("gif_url", &self.gif_url)
            .field("gif_api_key", &redact(&self.gif_api_key))
            .finish()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bot_token", &redact(&self.bot_token))
            .field("upstream", &self.upstream)
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_with_only_token() {
        let config = load(&[("BOT_TOKEN", "123:abc")]).unwrap();
        assert_eq!(config.bot_token, "123:abc");
        assert_eq!(config.upstream, UpstreamConfig::default());
        assert_eq!(config.http_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_missing_token_is_fatal() {
        let err = load(&[("OPENWEATHERMAP_API_KEY", "w")]).unwrap_err();
        assert_eq!(err, ConfigError::MissingVariable("BOT_TOKEN"));

        let err = load(&[("BOT_TOKEN", "   ")]).unwrap_err();
        assert_eq!(err, ConfigError::MissingVariable("BOT_TOKEN"));
    }

    #[test]
    fn test_teloxide_token_fallback() {
        let config = load(&[("TELOXIDE_TOKEN", "456:def")]).unwrap();
        assert_eq!(config.bot_token, "456:def");
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("BOT_TOKEN", "t"),
            ("OPENWEATHERMAP_API_KEY", "wkey"),
            ("GIPHY_API_KEY", "gkey"),
            ("WEATHER_API_URL", "http://localhost:1/weather"),
            ("MEME_API_URL", "http://localhost:1/meme"),
            ("GIF_API_URL", "http://localhost:1/gif"),
            ("HTTP_TIMEOUT_SECS", "3"),
        ])
        .unwrap();

        assert_eq!(config.upstream.weather_api_key, "wkey");
        assert_eq!(config.upstream.gif_api_key, "gkey");
        assert_eq!(config.upstream.weather_url, "http://localhost:1/weather");
        assert_eq!(config.upstream.meme_url, "http://localhost:1/meme");
        assert_eq!(config.upstream.gif_url, "http://localhost:1/gif");
        assert_eq!(config.http_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_invalid_timeout() {
        for raw in ["0", "ten", "-5"] {
            let err = load(&[("BOT_TOKEN", "t"), ("HTTP_TIMEOUT_SECS", raw)]).unwrap_err();
            assert_eq!(
                err,
                ConfigError::InvalidValue("HTTP_TIMEOUT_SECS", raw.to_string())
            );
        }
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = load(&[("BOT_TOKEN", "very-secret"), ("GIPHY_API_KEY", "gkey")]).unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("very-secret"));
        assert!(!printed.contains("gkey"));
        assert!(printed.contains("<unset>"));
    }
}
