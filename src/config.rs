use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;

/// # settings of the application
/// read from the environment, a `.env` file in the working directory is loaded first.
///
/// | variable        | default                   |
/// |-----------------|---------------------------|
/// | `DATA_FILE`     | `data.jsonl`              |
/// | `EVENT_TITLE`   | `Hobby Horse Competition` |
/// | `EVENT_DATE`    | not shown                 |
/// | `LOGGING_LEVEL` | `INFO`                    |
/// | `LOG_FILE`      | `program.log`             |
///
/// the address and port are configured through rocket (`Rocket.toml` or `ROCKET_PORT`).
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub event_title: String,
    pub event_date: Option<String>,
    pub logging_level: String,
    pub log_file: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> AppConfig {
        dotenv().ok();

        AppConfig {
            data_file: env::var("DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data.jsonl")),
            event_title: env::var("EVENT_TITLE")
                .unwrap_or_else(|_| "Hobby Horse Competition".to_string()),
            event_date: env::var("EVENT_DATE").ok().filter(|date| !date.trim().is_empty()),
            logging_level: env::var("LOGGING_LEVEL").unwrap_or_else(|_| "INFO".to_string()),
            log_file: env::var("LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("program.log")),
        }
    }

    /// # settings with defaults and the given data file
    pub fn with_data_file<P: Into<PathBuf>>(data_file: P) -> AppConfig {
        AppConfig {
            data_file: data_file.into(),
            event_title: "Hobby Horse Competition".to_string(),
            event_date: None,
            logging_level: "INFO".to_string(),
            log_file: PathBuf::from("program.log"),
        }
    }

    /// # the heading shown above the tables
    pub fn heading(&self) -> String {
        match &self.event_date {
            Some(date) => format!("{} - {}", self.event_title, date),
            None => self.event_title.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading() {
        let mut config = AppConfig::with_data_file("data.jsonl");
        assert_eq!(config.heading(), "Hobby Horse Competition");

        config.event_date = Some("15.06.2025".to_string());
        assert_eq!(config.heading(), "Hobby Horse Competition - 15.06.2025");
    }
}
