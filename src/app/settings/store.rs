// Settings store: data type, global state, load/save.

use lazy_static::lazy_static;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::PathBuf;
use std::sync::RwLock;
use std::time::Duration;

use crate::localization::SupportedLang;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const API_BASE_ENV: &str = "COCKTAIL_API_BASE";

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    // Base url of the proxy serving api/cocktails and api/demo
    #[serde(default = "default_api_base")]
    pub api_base_url: String,
    // UI language (None = auto/system). Stored as "en"/"es" or null.
    #[serde(
        default,
        serialize_with = "serialize_language_opt",
        deserialize_with = "deserialize_language_opt"
    )]
    pub language: Option<SupportedLang>,
    // 0 disables the timeout
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_true")]
    pub load_thumbnails: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base(),
            language: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            load_thumbnails: true,
        }
    }
}

fn deserialize_language_opt<'de, D>(deserializer: D) -> Result<Option<SupportedLang>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    // "auto" or anything unknown means follow the system locale
    Ok(opt.and_then(|s| SupportedLang::from_code(&s)))
}

fn serialize_language_opt<S>(value: &Option<SupportedLang>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(lang) => serializer.serialize_some(lang.code()),
        None => serializer.serialize_none(),
    }
}

lazy_static! {
    pub static ref APP_SETTINGS: RwLock<AppSettings> = RwLock::new(AppSettings::default());
}

fn settings_file_path() -> PathBuf {
    // Allow override for tests and portable setups
    if let Ok(p) = std::env::var("COCKTAIL_SETTINGS_PATH") {
        return PathBuf::from(p);
    }
    PathBuf::from("app_settings.json")
}

impl AppSettings {
    pub fn load_from_file(path: &std::path::Path) -> std::io::Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let s: AppSettings = serde_json::from_str(&data)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(s)
    }

    pub fn save_to_file(&self, path: &std::path::Path) -> std::io::Result<()> {
        let data = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, data)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        match self.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Base url actually used for requests: `COCKTAIL_API_BASE` wins over the file.
    pub fn effective_api_base(&self) -> String {
        self.api_base_with_override(std::env::var(API_BASE_ENV).ok())
    }

    fn api_base_with_override(&self, env_value: Option<String>) -> String {
        match env_value {
            Some(v) if !v.trim().is_empty() => v.trim().to_string(),
            _ => self.api_base_url.clone(),
        }
    }
}

pub fn load_settings_from_disk() {
    let path = settings_file_path();
    match AppSettings::load_from_file(&path) {
        Ok(s) => {
            *APP_SETTINGS.write().unwrap() = s;
            log::info!("Loaded settings from {}", path.to_string_lossy());
        }
        Err(e) => {
            // Keep defaults if missing/unreadable
            log::info!(
                "Using default settings; cannot load {}: {}",
                path.to_string_lossy(),
                e
            );
        }
    }
}

pub fn save_settings_to_disk() {
    let path = settings_file_path();
    let st = APP_SETTINGS.read().unwrap().clone();
    if let Err(e) = st.save_to_file(&path) {
        log::error!(
            "Failed to save settings to {}: {}",
            path.to_string_lossy(),
            e
        );
    } else {
        log::info!("Saved settings to {}", path.to_string_lossy());
    }
}
