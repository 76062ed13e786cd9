//! LLM 服务 - 业务能力层
//!
//! 只负责"调用 LLM"能力，不关心课程结构
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（如 Azure, Gemini, Doubao 等）

use std::sync::atomic::{AtomicU64, Ordering};

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, LlmError};

/// 单次请求的最大输出 token 数
const MAX_OUTPUT_TOKENS: u32 = 16384;

/// 累计 token 用量
#[derive(Debug, Default)]
pub struct TokenUsage {
    input: AtomicU64,
    output: AtomicU64,
}

impl TokenUsage {
    pub fn record(&self, input: u64, output: u64) {
        self.input.fetch_add(input, Ordering::Relaxed);
        self.output.fetch_add(output, Ordering::Relaxed);
    }

    /// (输入 token, 输出 token)
    pub fn snapshot(&self) -> (u64, u64) {
        (
            self.input.load(Ordering::Relaxed),
            self.output.load(Ordering::Relaxed),
        )
    }

    pub fn reset(&self) {
        self.input.store(0, Ordering::Relaxed);
        self.output.store(0, Ordering::Relaxed);
    }
}

/// LLM 服务
///
/// 职责：
/// - 调用 LLM API
/// - 统计 token 用量
/// - 不出现 Certification / Unit
pub struct LlmService {
    client: Client<OpenAIConfig>,
    usage: TokenUsage,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        Self {
            client: Client::with_config(openai_config),
            usage: TokenUsage::default(),
        }
    }

    pub fn usage(&self) -> &TokenUsage {
        &self.usage
    }

    /// 通用的 LLM 调用函数
    ///
    /// # 参数
    /// - `model`: 模型名称
    /// - `system_message`: 系统消息
    /// - `user_message`: 用户消息内容
    ///
    /// # 返回
    /// 返回 LLM 的响应内容（去除首尾空白）
    pub async fn send_to_llm(
        &self,
        model: &str,
        system_message: &str,
        user_message: &str,
    ) -> AppResult<String> {
        debug!("调用 LLM API，模型: {}", model);
        debug!("用户消息长度: {} 字符", user_message.len());

        let build_failed = |e: async_openai::error::OpenAIError| AppError::llm_api_failed(model, e);

        let system_msg = ChatCompletionRequestSystemMessageArgs::default()
            .content(system_message)
            .build()
            .map_err(build_failed)?;
        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(build_failed)?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(vec![
                ChatCompletionRequestMessage::System(system_msg),
                ChatCompletionRequestMessage::User(user_msg),
            ])
            .max_tokens(MAX_OUTPUT_TOKENS)
            .build()
            .map_err(build_failed)?;

        // 调用 API
        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            AppError::llm_api_failed(model, e)
        })?;

        if let Some(usage) = &response.usage {
            self.usage
                .record(u64::from(usage.prompt_tokens), u64::from(usage.completion_tokens));
        }

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| LlmError::EmptyContent {
                model: model.to_string(),
            })?;

        Ok(content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_usage_accumulates_and_resets() {
        let usage = TokenUsage::default();
        usage.record(120, 30);
        usage.record(80, 20);
        assert_eq!(usage.snapshot(), (200, 50));

        usage.reset();
        assert_eq!(usage.snapshot(), (0, 0));
    }

    /// 需要真实的 LLM_API_KEY
    #[tokio::test]
    #[ignore]
    async fn test_send_to_llm_simple() {
        let _ = tracing_subscriber::fmt::try_init();

        let config = Config::from_env();
        let service = LlmService::new(&config);

        let response = service
            .send_to_llm("gpt-4o-mini", "你是一个简洁的助手，回答要简短。", "Say hello.")
            .await
            .expect("LLM 调用失败");

        assert!(!response.is_empty());
        assert!(service.usage().snapshot().0 > 0);
    }
}
