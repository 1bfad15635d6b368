use crate::config::{DEFAULT_ACTIVE_FILE, DEFAULT_EXPIRED_FILE};
use crate::core::clock::parse_reference_time;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, SweepError};
use crate::utils::validation::{
    validate_distinct, validate_file_name, validate_path, validate_required_field, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub clock: Option<ClockConfig>,
    pub monitoring: Option<MonitoringConfig>,
    #[serde(skip)]
    resolved_now: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub directory: String,
    pub expired: Option<String>,
    pub active: Option<String>,
}

/// `now` may be written as an integer or as an RFC 3339 string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    pub now: Option<toml::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| SweepError::ConfigError {
            message: format!("cannot read '{}': {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        let mut config: TomlConfig =
            toml::from_str(&processed_content).map_err(|e| SweepError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;
        config.resolved_now = config.parse_now()?;
        Ok(config)
    }

    /// 替換環境變數 (例如 ${BANS_DIR})
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::OnceLock;

        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR
            .get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    fn parse_now(&self) -> Result<Option<i64>> {
        let Some(value) = self.clock.as_ref().and_then(|c| c.now.as_ref()) else {
            return Ok(None);
        };

        match value {
            toml::Value::Integer(seconds) => Ok(Some(*seconds)),
            toml::Value::String(text) => parse_reference_time(text).map(Some),
            toml::Value::Datetime(dt) => parse_reference_time(&dt.to_string()).map(Some),
            other => Err(SweepError::InvalidConfigValueError {
                field: "clock.now".to_string(),
                value: other.to_string(),
                reason: "Expected unix seconds or an RFC 3339 timestamp".to_string(),
            }),
        }
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        let input = validate_required_field("input.path", &self.input.path)?;
        validate_path("input.path", input)?;
        validate_path("output.directory", &self.output.directory)?;
        validate_file_name("output.expired", self.expired_file())?;
        validate_file_name("output.active", self.active_file())?;
        validate_distinct(
            "output.expired",
            self.expired_file(),
            "output.active",
            self.active_file(),
        )?;
        Ok(())
    }

    pub fn output_dir(&self) -> &str {
        &self.output.directory
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    /// Pins the reference time, overriding `[clock]`.
    pub fn set_now(&mut self, now: i64) {
        self.resolved_now = Some(now);
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        self.input.path.as_deref().unwrap_or_default()
    }

    fn expired_file(&self) -> &str {
        self.output.expired.as_deref().unwrap_or(DEFAULT_EXPIRED_FILE)
    }

    fn active_file(&self) -> &str {
        self.output.active.as_deref().unwrap_or(DEFAULT_ACTIVE_FILE)
    }

    fn now(&self) -> Option<i64> {
        self.resolved_now
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
