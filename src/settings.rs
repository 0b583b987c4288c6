use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use std::{env, fmt, str::FromStr};
use url::Url;
use zeroize::Zeroizing;

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

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default)]
    pub api_token: Option<String>,

    /// Credentials for signing in at startup; both must be set.
    #[serde(default)]
    pub login_email: Option<String>,

    #[serde(default)]
    pub login_password: Option<String>,

    /// Comment author used until a signed-in user supplies a real name.
    #[serde(default = "default_author")]
    pub default_author: String,

    #[serde(default = "default_page_size")]
    pub page_size: u32,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_json: bool,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Transformer-Inspector".to_string()
}
fn default_api_base_url() -> String {
    "http://localhost:8080".to_string()
}
fn default_author() -> String {
    "admin".to_string()
}
fn default_page_size() -> u32 {
    100
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            env: default_env(),
            name: default_name(),
            api_base_url: default_api_base_url(),
            api_token: None,
            login_email: None,
            login_password: None,
            default_author: default_author(),
            page_size: default_page_size(),
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name)).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        if config.api_token.is_none() {
            config.api_token = env::var("APP_API_TOKEN").ok().filter(|t| !t.trim().is_empty());
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        match Url::parse(self.api_base_url.trim()) {
            Ok(url) if url.scheme() != "http" && url.scheme() != "https" => {
                errors.push("API_BASE_URL must use http or https".to_string());
            }
            Ok(url) if self.is_production() && url.scheme() == "http" && !is_loopback(&url) => {
                errors.push("API_BASE_URL must use https in production".to_string());
            }
            Ok(_) => {}
            Err(e) => errors.push(format!("API_BASE_URL is invalid: {}", e)),
        }
        if self.default_author.trim().is_empty() {
            errors.push("DEFAULT_AUTHOR cannot be empty".to_string());
        }
        if self.login_email.is_some() != self.login_password.is_some() {
            errors.push("LOGIN_EMAIL and LOGIN_PASSWORD must be set together".to_string());
        }
        if self.page_size == 0 {
            errors.push("PAGE_SIZE must be greater than zero".to_string());
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

    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(self.api_base_url.trim())
    }

    /// Bearer token wiped from memory once the caller drops it.
    pub fn token(&self) -> Option<Zeroizing<String>> {
        self.api_token.as_ref().map(|t| Zeroizing::new(t.clone()))
    }

    pub fn password(&self) -> Option<Zeroizing<String>> {
        self.login_password.as_ref().map(|p| Zeroizing::new(p.clone()))
    }
}

fn is_loopback(url: &Url) -> bool {
    matches!(url.host_str(), Some("localhost") | Some("127.0.0.1") | Some("[::1]"))
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

impl Redact for Option<String> {
    fn redact(&self) -> &str {
        match self {
            None => "[MISSING]",
            Some(s) if s.is_empty() => "[MISSING]",
            Some(_) => "[REDACTED]",
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("api_base_url", &self.api_base_url)
            .field("api_token", &self.api_token.redact())
            .field("login_email", &self.login_email)
            .field("login_password", &self.login_password.redact())
            .field("default_author", &self.default_author)
            .field("page_size", &self.page_size)
            .field("log_level", &self.log_level)
            .field("log_json", &self.log_json)
            .finish()
    }
}
