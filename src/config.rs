/// 程序配置
use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Gini API 地址
    pub api_base_url: String,
    /// 访问令牌（Bearer）
    pub access_token: String,
    /// 轮询文档状态的最小间隔（秒）
    pub polling_interval_secs: f64,
    /// 单次 HTTP 请求超时（秒）
    pub request_timeout_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.gini.net".to_string(),
            access_token: String::new(),
            polling_interval_secs: 1.0,
            request_timeout_secs: 30,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从环境变量加载，未设置的项使用默认值
    ///
    /// 如果设置了 `CONFIG_FILE`，先读取该 TOML 文件，再用环境变量覆盖
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = match std::env::var("CONFIG_FILE") {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };

        let config = Self {
            api_base_url: std::env::var("GINI_API_BASE_URL").unwrap_or(base.api_base_url),
            access_token: std::env::var("GINI_ACCESS_TOKEN").unwrap_or(base.access_token),
            polling_interval_secs: parse_env("POLLING_INTERVAL_SECS", "f64")?
                .unwrap_or(base.polling_interval_secs),
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", "u64")?
                .unwrap_or(base.request_timeout_secs),
            verbose_logging: parse_env("VERBOSE_LOGGING", "bool")?
                .unwrap_or(base.verbose_logging),
        };
        config.validate()?;
        Ok(config)
    }

    /// 从 TOML 文件加载
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let load_failed = |source: Box<dyn std::error::Error + Send + Sync>| {
            ConfigError::FileLoadFailed {
                path: path.display().to_string(),
                source,
            }
        };
        let content = std::fs::read_to_string(path).map_err(|e| load_failed(Box::new(e)))?;
        let config: Config = toml::from_str(&content).map_err(|e| load_failed(Box::new(e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.polling_interval_secs.is_finite() || self.polling_interval_secs < 0.0 {
            return Err(ConfigError::InvalidValue {
                name: "polling_interval_secs".to_string(),
                reason: format!("必须是非负数, 实际为 {}", self.polling_interval_secs),
            });
        }
        Ok(())
    }

    /// 非法值（负数、NaN）按 0 处理，`from_env` / `from_file` 会提前拒绝它们
    pub fn polling_interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.polling_interval_secs).unwrap_or_default()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_env<T: std::str::FromStr>(
    var_name: &str,
    expected_type: &str,
) -> Result<Option<T>, ConfigError> {
    match std::env::var(var_name) {
        Ok(value) => {
            let parsed = value.trim().parse::<T>();
            parsed.map(Some).map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            })
        }
        Err(_) => Ok(None),
    }
}
