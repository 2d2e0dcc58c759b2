use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::options::{
    LogOpt, with_attr, with_json, with_level, with_simple_source, with_source, with_text,
    with_writer,
};
use crate::writer::file_sink;
use crate::{Attr, Error, Level, Result};

/// Logger configuration as read from a config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Minimum level (e.g., "info", "debug")
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format ("json" or "text")
    #[serde(default = "default_format")]
    pub format: String,
    /// Record the caller location
    #[serde(default)]
    pub source: bool,
    /// Record the caller location as a single `file:function:line` string
    #[serde(default)]
    pub simple_source: bool,
    /// Append to this file instead of stderr
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Attributes present on every record
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
}

impl LogConfig {
    /// Create a new LogConfig with defaults
    pub fn new() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            source: false,
            simple_source: false,
            file: None,
            attrs: BTreeMap::new(),
        }
    }

    /// Set log level
    pub fn with_level(mut self, level: String) -> Self {
        self.level = level;
        self
    }

    /// Set log format
    pub fn with_format(mut self, format: String) -> Self {
        self.format = format;
        self
    }

    pub fn with_source(mut self, source: bool) -> Self {
        self.source = source;
        self
    }

    pub fn with_simple_source(mut self, simple_source: bool) -> Self {
        self.simple_source = simple_source;
        self
    }

    /// Set the log file
    pub fn with_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Add an attribute present on every record
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Translate into option steps.
    ///
    /// Opens the log file, if any, so this is where I/O errors surface.
    pub fn to_options(&self) -> Result<Vec<LogOpt>> {
        let level: Level = self.level.parse()?;

        let mut opts = vec![with_level(level)];

        opts.push(match self.format.trim().to_ascii_lowercase().as_str() {
            "json" => with_json(),
            "text" => with_text(),
            other => {
                return Err(Error::Config(format!(
                    "unknown log format `{other}`, expected `json` or `text`"
                )));
            }
        });

        if self.source {
            opts.push(with_source());
        }
        if self.simple_source {
            opts.push(with_simple_source());
        }

        if let Some(path) = &self.file {
            opts.push(with_writer(file_sink(path)?));
        }

        opts.extend(
            self.attrs
                .iter()
                .map(|(key, value)| with_attr(Attr::string(key.as_str(), value.as_str()))),
        );

        Ok(opts)
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "json".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::Encoding;
    use crate::options::LogOptions;

    fn applied(config: &LogConfig) -> LogOptions {
        let mut lo = LogOptions::new();
        lo.apply(config.to_options().expect("valid config"));
        lo
    }

    #[test]
    fn test_log_config_new() {
        let config = LogConfig::new();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, "json");
        assert!(!config.source);
        assert!(!config.simple_source);
        assert!(config.file.is_none());
        assert!(config.attrs.is_empty());
    }

    #[test]
    fn test_log_config_default() {
        assert_eq!(LogConfig::default(), LogConfig::new());
    }

    #[test]
    fn test_log_config_setters() {
        let config = LogConfig::new()
            .with_level("debug".to_string())
            .with_format("text".to_string())
            .with_source(true)
            .with_file("app.log")
            .with_attr("service", "api");
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, "text");
        assert!(config.source);
        assert_eq!(config.file, Some(PathBuf::from("app.log")));
        assert_eq!(config.attrs.get("service").map(String::as_str), Some("api"));
    }

    #[test]
    fn test_to_options_defaults() {
        let lo = applied(&LogConfig::new());
        assert_eq!(lo.encoding(), Encoding::Json);
        assert_eq!(lo.handler_options().level, Some(Level::Info));
        assert!(!lo.handler_options().add_source);
    }

    #[test]
    fn test_to_options_text_with_source() {
        let lo = applied(
            &LogConfig::new()
                .with_format("TEXT".to_string())
                .with_source(true),
        );
        assert_eq!(lo.encoding(), Encoding::Text);
        assert!(lo.handler_options().add_source);
    }

    #[test]
    fn test_to_options_attrs_in_key_order() {
        let lo = applied(&LogConfig::new().with_attr("zone", "b").with_attr("app", "a"));
        let keys: Vec<&str> = lo.attrs().iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys, ["app", "zone"]);
    }

    #[test]
    fn test_to_options_rejects_unknown_format() {
        let err = LogConfig::new()
            .with_format("xml".to_string())
            .to_options()
            .err()
            .expect("unknown format should fail");
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_to_options_rejects_unknown_level() {
        let err = LogConfig::new()
            .with_level("chatty".to_string())
            .to_options()
            .err()
            .expect("unknown level should fail");
        assert!(matches!(err, Error::InvalidLevel(_)));
    }

    #[test]
    fn test_to_options_opens_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs/app.log");
        let config = LogConfig::new().with_file(&path);
        let opts = config.to_options().unwrap();

        let logger = crate::setup::build(opts);
        logger.warn("to file", []);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"msg\":\"to file\""));
    }

    #[test]
    fn test_deserialize_yaml() {
        let yaml = r#"
level: debug
format: text
simple_source: true
attrs:
  service: my-service
"#;
        let config: LogConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, "text");
        assert!(config.simple_source);
        assert!(!config.source);
        assert_eq!(
            config.attrs.get("service").map(String::as_str),
            Some("my-service")
        );
    }

    #[test]
    fn test_deserialize_toml_defaults() {
        let config: LogConfig = toml::from_str("source = true\n").unwrap();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, "json");
        assert!(config.source);
        assert!(config.file.is_none());
    }

    #[test]
    fn test_default_functions() {
        assert_eq!(super::default_log_level(), "info");
        assert_eq!(super::default_format(), "json");
    }
}
