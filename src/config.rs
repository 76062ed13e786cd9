use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{AppResult, ConfigError};

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 浏览器调试端口（设置后连接已有浏览器，否则启动新浏览器）
    pub browser_debug_port: Option<u16>,
    /// 是否以无头模式启动浏览器
    pub browser_headless: bool,
    /// Chrome/Edge 可执行文件路径（为空时自动探测）
    pub chrome_executable: Option<String>,
    /// 单次等待的超时时间（毫秒）
    pub wait_timeout_ms: u64,
    /// 等待条件的轮询间隔（毫秒）
    pub poll_interval_ms: u64,
    /// 课程数据根目录
    pub data_root: String,
    /// 认证目录文件
    pub catalog_path: String,
    /// 提示词配置文件
    pub prompt_config_path: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 清洗/出题阶段同时处理的单元数量
    pub transform_concurrency: usize,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browser_debug_port: None,
            browser_headless: true,
            chrome_executable: None,
            wait_timeout_ms: 10_000,
            poll_interval_ms: 250,
            data_root: "microsoft_certifications".to_string(),
            catalog_path: "microsoft_certifications/catalog.toml".to_string(),
            prompt_config_path: "config.toml".to_string(),
            verbose_logging: false,
            transform_concurrency: 1,
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            browser_debug_port: std::env::var("BROWSER_DEBUG_PORT").ok().and_then(|v| v.parse().ok()),
            browser_headless: std::env::var("BROWSER_HEADLESS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.browser_headless),
            chrome_executable: std::env::var("CHROME_EXECUTABLE").ok().filter(|v| !v.is_empty()),
            wait_timeout_ms: std::env::var("WAIT_TIMEOUT_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.wait_timeout_ms),
            poll_interval_ms: std::env::var("POLL_INTERVAL_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.poll_interval_ms),
            data_root: std::env::var("DATA_ROOT").unwrap_or(default.data_root),
            catalog_path: std::env::var("CATALOG_PATH").unwrap_or(default.catalog_path),
            prompt_config_path: std::env::var("PROMPT_CONFIG_PATH").unwrap_or(default.prompt_config_path),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            transform_concurrency: std::env::var("TRANSFORM_CONCURRENCY").ok().and_then(|v| v.parse().ok()).filter(|n: &usize| *n > 0).unwrap_or(default.transform_concurrency),
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
        }
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_millis(self.wait_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// 清洗和出题前必须提供 LLM 凭据
    pub fn require_llm_credentials(&self) -> AppResult<()> {
        if self.llm_api_key.trim().is_empty() {
            return Err(ConfigError::EnvVarNotFound {
                var_name: "LLM_API_KEY".to_string(),
            }
            .into());
        }
        if self.llm_api_base_url.trim().is_empty() {
            return Err(ConfigError::EnvVarNotFound {
                var_name: "LLM_API_BASE_URL".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

/// 提示词配置（config.toml）
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PromptConfig {
    pub llm_cleaning_model: Option<String>,
    pub cleaning_prompt: Option<String>,
    pub llm_question_model: Option<String>,
    pub question_prompt: Option<String>,
    #[serde(skip)]
    source_path: PathBuf,
}

impl PromptConfig {
    /// 从 TOML 文件加载提示词配置
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path_str.clone(),
        })?;
        let mut config = Self::from_toml_str(&content, &path_str)?;
        config.source_path = path.to_path_buf();
        Ok(config)
    }

    pub fn from_toml_str(content: &str, origin: &str) -> AppResult<Self> {
        let mut config: PromptConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseFailed {
                path: origin.to_string(),
                reason: e.to_string(),
            })?;
        config.source_path = PathBuf::from(origin);
        Ok(config)
    }

    pub fn cleaning_model(&self) -> AppResult<&str> {
        self.require("llm_cleaning_model", &self.llm_cleaning_model)
    }

    pub fn cleaning_prompt(&self) -> AppResult<&str> {
        self.require("cleaning_prompt", &self.cleaning_prompt)
    }

    pub fn question_model(&self) -> AppResult<&str> {
        self.require("llm_question_model", &self.llm_question_model)
    }

    pub fn question_prompt(&self) -> AppResult<&str> {
        self.require("question_prompt", &self.question_prompt)
    }

    fn require<'a>(&self, key: &str, value: &'a Option<String>) -> AppResult<&'a str> {
        value
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                ConfigError::MissingSetting {
                    key: key.to_string(),
                    path: self.source_path.display().to_string(),
                }
                .into()
            })
    }
}
