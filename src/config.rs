use std::collections::HashMap;
use std::env;
use std::fs;

use chrono_tz::Tz;

const DEFAULT_LOOKBACK_DAYS: u32 = 7;
const DEFAULT_POLL_INTERVAL_SECS: u64 = 300;
const DEFAULT_PROCESSED_LABEL: &str = "calendarBot/processed";

#[derive(Debug, Default, Clone)]
pub struct AppConfig {
    values: HashMap<String, String>,
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self, String> {
        let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
        let mut values = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(format!("Invalid config line {}: {}", idx + 1, line));
            };
            let key = key.trim();
            let mut value = value.trim().to_string();
            if (value.starts_with('"') && value.ends_with('"'))
                || (value.starts_with('\'') && value.ends_with('\''))
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

    // Config file wins over the environment so one file can pin a full setup.
    pub fn prop(&self, key: &str) -> Option<String> {
        self.get(key).or_else(|| env::var(key).ok())
    }
}

/// Typed view over the raw key/value config. The extraction core never sees
/// this; it is handed to the orchestration entry points only.
#[derive(Debug, Clone)]
pub struct Settings {
    pub search_query: String,
    pub calendar_id: String,
    pub lookback_days: u32,
    pub processed_label: String,
    pub title_prefix: String,
    pub timezone: Tz,
    pub access_token: String,
    pub poll_interval_secs: u64,
}

impl Settings {
    pub fn load(config: &AppConfig) -> Result<Self, String> {
        let search_query = config
            .prop("SEARCH_QUERY")
            .ok_or("SEARCH_QUERY must be set".to_string())?;
        let access_token = config
            .prop("GOOGLE_ACCESS_TOKEN")
            .ok_or("GOOGLE_ACCESS_TOKEN must be set".to_string())?;

        let timezone = match config.prop("TIMEZONE") {
            Some(raw) => raw
                .parse::<Tz>()
                .map_err(|_| format!("Invalid TIMEZONE: {}", raw))?,
            None => chrono_tz::America::New_York,
        };
        let lookback_days = match config.prop("LOOKBACK_DAYS") {
            Some(raw) => raw
                .parse()
                .map_err(|_| format!("Invalid LOOKBACK_DAYS: {}", raw))?,
            None => DEFAULT_LOOKBACK_DAYS,
        };
        let poll_interval_secs = match config.prop("POLL_INTERVAL_SECS") {
            Some(raw) => raw
                .parse()
                .map_err(|_| format!("Invalid POLL_INTERVAL_SECS: {}", raw))?,
            None => DEFAULT_POLL_INTERVAL_SECS,
        };

        Ok(Settings {
            search_query,
            calendar_id: config.prop("CALENDAR_ID").unwrap_or("primary".to_string()),
            lookback_days,
            processed_label: config
                .prop("PROCESSED_LABEL")
                .unwrap_or(DEFAULT_PROCESSED_LABEL.to_string()),
            title_prefix: config.prop("TITLE_PREFIX").unwrap_or_default(),
            timezone,
            access_token,
            poll_interval_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(content: &str) -> String {
        let path = env::temp_dir().join(format!("calendarbot_cfg_{}", uuid::Uuid::new_v4()));
        fs::write(&path, content).expect("write temp config");
        path.to_string_lossy().to_string()
    }

    #[test]
    fn from_file_parses_comments_exports_and_quotes() {
        let path = write_config(
            "# comment\n\
             export SEARCH_QUERY=\"from:news@school.edu\"\n\
             TITLE_PREFIX='[School] '\n\
             \n\
             LOOKBACK_DAYS=14\n",
        );
        let config = AppConfig::from_file(&path).expect("config should parse");
        assert_eq!(
            config.get("SEARCH_QUERY").as_deref(),
            Some("from:news@school.edu")
        );
        assert_eq!(config.get("TITLE_PREFIX").as_deref(), Some("[School] "));
        assert_eq!(config.get("LOOKBACK_DAYS").as_deref(), Some("14"));
    }

    #[test]
    fn from_file_rejects_lines_without_separator() {
        let path = write_config("SEARCH_QUERY\n");
        let err = AppConfig::from_file(&path).expect_err("should reject");
        assert!(err.contains("Invalid config line 1"));
    }

    #[test]
    fn settings_apply_defaults() {
        let path = write_config(
            "SEARCH_QUERY=from:news@school.edu\n\
             GOOGLE_ACCESS_TOKEN=token123\n",
        );
        let config = AppConfig::from_file(&path).expect("config should parse");
        let settings = Settings::load(&config).expect("settings should load");
        assert_eq!(settings.calendar_id, "primary");
        assert_eq!(settings.lookback_days, 7);
        assert_eq!(settings.poll_interval_secs, 300);
        assert_eq!(settings.processed_label, "calendarBot/processed");
        assert_eq!(settings.timezone, chrono_tz::America::New_York);
        assert_eq!(settings.title_prefix, "");
    }

    #[test]
    fn settings_reject_bad_timezone() {
        let path = write_config(
            "SEARCH_QUERY=q\n\
             GOOGLE_ACCESS_TOKEN=t\n\
             TIMEZONE=Mars/Olympus_Mons\n",
        );
        let config = AppConfig::from_file(&path).expect("config should parse");
        let err = Settings::load(&config).expect_err("should reject timezone");
        assert!(err.contains("Invalid TIMEZONE"));
    }
}
