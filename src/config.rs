use crate::error::{config_error, CheckinResult};
use chrono_tz::Tz;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default location of the override file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config/checkin.toml";

/// Environment variable naming an alternative override file
pub const CONFIG_PATH_ENV: &str = "CHECKIN_CONFIG";

pub const DEFAULT_NAME: &str = "Your Name";
pub const DEFAULT_CALENDAR_URL: &str =
    "https://calendar.google.com/calendar/ical/ucsfrad%40gmail.com/public/basic.ics";
pub const DEFAULT_SURVEY_URL: &str = "https://ucsf.co1.qualtrics.com/jfe/form/SV_8kUOSKMVlxBzCp8";
pub const DEFAULT_TIMEZONE: &str = "America/Los_Angeles";
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:4444";

/// Main configuration structure for the check-in
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// Name typed into the survey
    pub name: String,
    /// Public iCalendar feed to check
    pub calendar_url: String,
    /// Survey form to fill
    pub survey_url: String,
    /// Timezone that decides what "today" means
    pub timezone: String,
    /// Events containing any of these (case-insensitive) are not conferences
    pub skip_keywords: Vec<String>,
    /// Likert answers, one per survey question, 1-5
    pub default_responses: Vec<u8>,
    /// Optional free-text comment, empty for none
    pub comment: String,
    /// WebDriver server used for browser automation
    pub webdriver_url: String,
}

/// Top-level keys that may appear in the override file.
///
/// Every present key replaces the default wholesale.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigOverrides {
    pub name: Option<String>,
    pub calendar_url: Option<String>,
    pub survey_url: Option<String>,
    pub timezone: Option<String>,
    pub skip_keywords: Option<Vec<String>>,
    pub default_responses: Option<Vec<u8>>,
    pub comment: Option<String>,
    pub webdriver_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            calendar_url: DEFAULT_CALENDAR_URL.to_string(),
            survey_url: DEFAULT_SURVEY_URL.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            skip_keywords: vec!["admin".to_string(), "wellness".to_string()],
            default_responses: vec![5, 5, 5],
            comment: String::new(),
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file.
    ///
    /// Expects `.env` to have been loaded already (see `startup::load_env`).
    pub fn load() -> CheckinResult<Self> {
        let path = env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

        let mut config = Self::load_from(&path)?;

        if let Ok(webdriver_url) = env::var("WEBDRIVER_URL") {
            config.webdriver_url = webdriver_url;
        }

        Ok(config)
    }

    /// Load defaults and overlay the file at `path` if it exists
    pub fn load_from(path: &Path) -> CheckinResult<Self> {
        let mut config = Config::default();

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config file at {}, using defaults", path.display());
                return Ok(config);
            }
            Err(e) => return Err(e.into()),
        };

        let overrides = ConfigOverrides::parse(path, &content).map_err(|e| {
            config_error(&format!("Failed to parse {}: {}", path.display(), e))
        })?;
        config.apply(overrides);

        info!("Loaded configuration overrides from {}", path.display());
        Ok(config)
    }

    /// Replace every field present in `overrides`
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        let ConfigOverrides {
            name,
            calendar_url,
            survey_url,
            timezone,
            skip_keywords,
            default_responses,
            comment,
            webdriver_url,
        } = overrides;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(calendar_url) = calendar_url {
            self.calendar_url = calendar_url;
        }
        if let Some(survey_url) = survey_url {
            self.survey_url = survey_url;
        }
        if let Some(timezone) = timezone {
            self.timezone = timezone;
        }
        if let Some(skip_keywords) = skip_keywords {
            self.skip_keywords = skip_keywords;
        }
        if let Some(default_responses) = default_responses {
            self.default_responses = default_responses;
        }
        if let Some(comment) = comment {
            self.comment = comment;
        }
        if let Some(webdriver_url) = webdriver_url {
            self.webdriver_url = webdriver_url;
        }
    }

    /// Parse the configured timezone
    pub fn tz(&self) -> CheckinResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| config_error(&format!("Invalid timezone: {}", self.timezone)))
    }

    /// The comment, if one is configured
    pub fn comment(&self) -> Option<&str> {
        if self.comment.is_empty() {
            None
        } else {
            Some(&self.comment)
        }
    }
}

impl ConfigOverrides {
    /// JSON files are accepted alongside TOML
    fn parse(path: &Path, content: &str) -> CheckinResult<Self> {
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Ok(serde_json::from_str(content)?)
        } else {
            Ok(toml::from_str(content)?)
        }
    }
}
