use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 浏览器相关错误
    #[error("浏览器错误: {0}")]
    Browser(#[from] BrowserError),
    /// 抓取错误
    #[error("抓取错误: {0}")]
    Scrap(#[from] ScrapError),
    /// 前置步骤缺失
    #[error("流程错误: {0}")]
    Stage(#[from] StageError),
    /// 文档格式错误
    #[error("文档错误: {0}")]
    Document(#[from] DocumentError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// LLM 服务错误
    #[error("LLM错误: {0}")]
    Llm(#[from] LlmError),
    /// 认证目录错误
    #[error("目录错误: {0}")]
    Catalog(#[from] CatalogError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 浏览器相关错误
#[derive(Debug, Error)]
pub enum BrowserError {
    /// 连接浏览器失败
    #[error("无法连接到浏览器 (端口: {port}): {source}")]
    ConnectionFailed {
        port: u16,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 启动浏览器失败
    #[error("启动浏览器失败: {reason}")]
    LaunchFailed { reason: String },
    /// 创建页面失败
    #[error("创建页面失败: {source}")]
    PageCreationFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 导航失败
    #[error("导航到 {url} 失败: {reason}")]
    NavigationFailed { url: String, reason: String },
    /// 页面未在超时时间内就绪
    #[error("页面在 {timeout_ms} 毫秒内未就绪")]
    NavigationTimeout { timeout_ms: u64 },
    /// 元素未在超时时间内出现
    #[error("{timeout_ms} 毫秒内未找到至少 {min_count} 个匹配 '{selector}' 的元素")]
    ElementNotFound {
        selector: String,
        min_count: usize,
        timeout_ms: u64,
    },
    /// 执行脚本失败
    #[error("执行脚本失败: {source}")]
    ScriptExecutionFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// 抓取错误
#[derive(Debug, Error)]
pub enum ScrapError {
    /// 根 URL 不是认证课程地址
    #[error("无效的认证 URL '{url}'，必须以 '{expected_prefix}' 开头")]
    InvalidUrl {
        url: String,
        expected_prefix: String,
    },
    /// 节点抓取失败
    #[error("[{node}] {reason}")]
    Failure {
        node: String,
        reason: String,
        #[source]
        source: Option<BrowserError>,
    },
}

/// 流程错误
#[derive(Debug, Error)]
pub enum StageError {
    /// 前一阶段的产物不存在
    #[error("缺少 {missing} 阶段的产物: {path}，请先运行 '{command}' 命令")]
    PreviousStepsNeeded {
        missing: String,
        path: String,
        command: String,
    },
}

/// 文档格式错误
#[derive(Debug, Error)]
pub enum DocumentError {
    /// 文档结构不符合课程/题目格式
    #[error("文档格式错误 ({origin}): {reason}")]
    Malformed { origin: String, reason: String },
    /// 序列化失败
    #[error("序列化失败: {reason}")]
    SerializeFailed { reason: String },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// LLM 服务错误
#[derive(Debug, Error)]
pub enum LlmError {
    /// API 调用失败
    #[error("LLM API调用失败 (模型: {model}): {source}")]
    ApiCallFailed {
        model: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyContent { model: String },
    /// 题目结构解析失败
    #[error("无法解析LLM返回的题目 (响应: {response}): {reason}")]
    MalformedQuestions { response: String, reason: String },
}

/// 认证目录错误
#[derive(Debug, Error)]
pub enum CatalogError {
    /// 目录文件不存在
    #[error("认证目录文件不存在: {path}")]
    FileNotFound { path: String },
    /// 目录中没有该认证
    #[error("认证代码 {code} 不在目录中，请先运行 'courses' 查看或运行 'test-only' 评估新认证")]
    NotFound { code: String },
    /// 目录解析失败
    #[error("认证目录解析失败 ({path}): {reason}")]
    ParseFailed { path: String, reason: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量不存在
    #[error("环境变量 {var_name} 不存在")]
    EnvVarNotFound { var_name: String },
    /// 配置文件缺少设置项
    #[error("{path} 中缺少设置项 {key}")]
    MissingSetting { key: String, path: String },
    /// 配置文件不存在
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },
    /// 配置文件解析失败
    #[error("配置文件解析失败 ({path}): {reason}")]
    ParseFailed { path: String, reason: String },
}

// ========== 从常见错误类型转换 ==========

impl From<chromiumoxide::error::CdpError> for BrowserError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        BrowserError::ScriptExecutionFailed {
            source: Box::new(err),
        }
    }
}

impl From<chromiumoxide::error::CdpError> for AppError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        AppError::Browser(err.into())
    }
}

// ========== 便捷构造函数 ==========

impl ScrapError {
    /// 节点抓取失败（由底层浏览器错误引起）
    pub fn failure(
        node: impl Into<String>,
        reason: impl Into<String>,
        source: BrowserError,
    ) -> Self {
        ScrapError::Failure {
            node: node.into(),
            reason: reason.into(),
            source: Some(source),
        }
    }

    /// 节点抓取失败（页面结构不符合预期）
    pub fn missing(node: impl Into<String>, reason: impl Into<String>) -> Self {
        ScrapError::Failure {
            node: node.into(),
            reason: reason.into(),
            source: None,
        }
    }
}

impl DocumentError {
    pub fn malformed(origin: impl Into<String>, reason: impl ToString) -> Self {
        DocumentError::Malformed {
            origin: origin.into(),
            reason: reason.to_string(),
        }
    }
}

impl AppError {
    /// 创建浏览器连接错误
    pub fn browser_connection_failed(
        port: u16,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Browser(BrowserError::ConnectionFailed {
            port,
            source: Box::new(source),
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建LLM API调用错误
    pub fn llm_api_failed(
        model: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Llm(LlmError::ApiCallFailed {
            model: model.into(),
            source: Box::new(source),
        })
    }

    /// 是否为抓取类失败（可在可抓取性检查中降级为报告）
    pub fn is_scrap_failure(&self) -> bool {
        matches!(
            self,
            AppError::Scrap(ScrapError::Failure { .. }) | AppError::Browser(_)
        )
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrap_failure_keeps_browser_source() {
        let err = ScrapError::failure(
            "Describe cloud concepts",
            "找不到单元列表",
            BrowserError::ElementNotFound {
                selector: "#unit-list".to_string(),
                min_count: 1,
                timeout_ms: 10_000,
            },
        );

        let message = err.to_string();
        assert!(message.contains("Describe cloud concepts"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_previous_steps_message_names_command() {
        let err: AppError = StageError::PreviousStepsNeeded {
            missing: "scrape".to_string(),
            path: "data/az-900/official_course_material/az-900.yml".to_string(),
            command: "scrap-only".to_string(),
        }
        .into();

        assert!(err.to_string().contains("scrap-only"));
        assert!(!err.is_scrap_failure());
    }

    #[test]
    fn test_invalid_url_is_not_downgradable() {
        let err: AppError = ScrapError::InvalidUrl {
            url: "https://example.com/az-900".to_string(),
            expected_prefix: "https://learn.microsoft.com".to_string(),
        }
        .into();

        assert!(!err.is_scrap_failure());
    }
}
