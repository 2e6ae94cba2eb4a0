use std::collections::HashMap;
use std::fs;

use chrono_tz::Tz;

use crate::error::AppError;
use crate::parser::Dialect;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 2000;
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Los_Angeles;
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3001;

/// Raw `KEY=value` pairs loaded from a dotenv-style file.
#[derive(Debug, Default, Clone)]
pub struct AppConfig {
    values: HashMap<String, String>,
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, AppError> {
        let mut values = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(AppError::Config(format!(
                    "invalid config line {}: {}",
                    idx + 1,
                    line
                )));
            };
            let key = key.trim();
            let mut value = value.trim().to_string();
            if value.len() >= 2
                && ((value.starts_with('"') && value.ends_with('"'))
                    || (value.starts_with('\'') && value.ends_with('\'')))
            {
                value = value[1..value.len() - 1].to_string();
            }
            values.insert(key.to_string(), value);
        }
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Typed settings shared by the server and the CLI.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub openai_api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub dialect: Dialect,
    pub location_hints: bool,
    pub timezone: Tz,
    pub bind_addr: String,
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            dialect: Dialect::Block,
            location_hints: true,
            timezone: DEFAULT_TIMEZONE,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Settings {
    /// Builds settings from a key lookup (config file first, then environment).
    pub fn resolve<F>(get_prop: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();
        let get = |key: &str| get_prop(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            openai_api_key: get("OPENAI_API_KEY"),
            model: get("OPENAI_MODEL").unwrap_or(defaults.model),
            endpoint: get("OPENAI_ENDPOINT").unwrap_or(defaults.endpoint),
            temperature: parse_or("OPENAI_TEMPERATURE", get("OPENAI_TEMPERATURE"), defaults.temperature)?,
            max_tokens: parse_or("OPENAI_MAX_TOKENS", get("OPENAI_MAX_TOKENS"), defaults.max_tokens)?,
            dialect: parse_or("RESPONSE_DIALECT", get("RESPONSE_DIALECT"), defaults.dialect)?,
            location_hints: match get("LOCATION_HINTS") {
                Some(raw) => parse_bool("LOCATION_HINTS", &raw)?,
                None => defaults.location_hints,
            },
            timezone: parse_or("TIMEZONE", get("TIMEZONE"), defaults.timezone)?,
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            port: parse_or("PORT", get("PORT"), defaults.port)?,
        })
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| AppError::Config(format!("{key}: {e}"))),
        None => Ok(default),
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, AppError> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AppError::Config(format!("{key}: expected a boolean, got '{other}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn parses_dotenv_style_lines() {
        let config = AppConfig::parse(
            "# comment\nexport OPENAI_API_KEY=\"sk-test\"\nPORT = 8080\n\nRESPONSE_DIALECT='csv'\n",
        )
        .unwrap();
        assert_eq!(config.get("OPENAI_API_KEY").as_deref(), Some("sk-test"));
        assert_eq!(config.get("PORT").as_deref(), Some("8080"));
        assert_eq!(config.get("RESPONSE_DIALECT").as_deref(), Some("csv"));
        assert!(config.get("MISSING").is_none());
    }

    #[test]
    fn rejects_lines_without_equals() {
        let err = AppConfig::parse("PORT=1\nnot a pair\n").unwrap_err();
        assert!(format!("{err}").contains("line 2"));
    }

    #[test]
    fn lone_quote_is_kept() {
        let config = AppConfig::parse("TOKEN=\"\n").unwrap();
        assert_eq!(config.get("TOKEN").as_deref(), Some("\""));
    }

    #[test]
    fn resolve_uses_defaults() {
        let settings = Settings::resolve(lookup(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.openai_api_key.is_none());
        assert_eq!(settings.port, 3001);
    }

    #[test]
    fn resolve_reads_typed_values() {
        let settings = Settings::resolve(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_TEMPERATURE", "0.2"),
            ("OPENAI_MAX_TOKENS", "500"),
            ("RESPONSE_DIALECT", "csv"),
            ("LOCATION_HINTS", "no"),
            ("TIMEZONE", "America/New_York"),
            ("PORT", "8080"),
        ]))
        .unwrap();
        assert_eq!(settings.openai_api_key.as_deref(), Some("sk-test"));
        assert_eq!(settings.temperature, 0.2);
        assert_eq!(settings.max_tokens, 500);
        assert_eq!(settings.dialect, Dialect::Csv);
        assert!(!settings.location_hints);
        assert_eq!(settings.timezone, chrono_tz::America::New_York);
        assert_eq!(settings.port, 8080);
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let settings = Settings::resolve(lookup(&[("OPENAI_API_KEY", "  ")])).unwrap();
        assert!(settings.openai_api_key.is_none());
    }

    #[test]
    fn resolve_rejects_bad_values() {
        assert!(Settings::resolve(lookup(&[("PORT", "eighty")])).is_err());
        assert!(Settings::resolve(lookup(&[("TIMEZONE", "Mars/Olympus")])).is_err());
        assert!(Settings::resolve(lookup(&[("LOCATION_HINTS", "maybe")])).is_err());
    }
}
