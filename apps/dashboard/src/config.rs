use serde::{Deserialize, Serialize};

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppProfile {
    Dev,
    Prod,
}

impl AppProfile {
    pub fn from_env(value: Option<String>) -> Self {
        match value.as_deref() {
            Some("prod") | Some("production") => Self::Prod,
            _ => Self::Dev,
        }
    }

    pub fn log_level(self) -> tracing::Level {
        match self {
            Self::Dev => tracing::Level::DEBUG,
            Self::Prod => tracing::Level::INFO,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base_url: String,
    pub profile: AppProfile,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            profile: AppProfile::Dev,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        crate::config::load_dotenv();

        Self::from_lookup(read_env)
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("FRAUD_API_BASE_URL").filter(|value| !value.trim().is_empty())
        {
            config.api_base_url = url.trim().to_string();
        }

        config.profile = AppProfile::from_env(lookup("FRAUD_PROFILE"));

        config
    }

    pub fn predict_endpoint(&self) -> String {
        format!("{}/predict", self.api_base_url.trim_end_matches('/'))
    }
}

fn read_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .or_else(|| option_env_from_build(key).map(|s| s.to_string()))
}

fn option_env_from_build(key: &str) -> Option<&'static str> {
    match key {
        "FRAUD_API_BASE_URL" => option_env!("FRAUD_API_BASE_URL"),
        "FRAUD_PROFILE" => option_env!("FRAUD_PROFILE"),
        _ => None,
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_dotenv() {
    if let Err(err) = dotenvy::dotenv() {
        if !matches!(err, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            tracing::warn!("failed to load .env: {err}");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[inline]
pub fn load_dotenv() {}
