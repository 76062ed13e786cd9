//! 文本变换能力 - 业务能力层
//!
//! 课程树只依赖两个能力：
//! - `TextCleaner`：清洗单元正文
//! - `QuestionGenerator`：根据单元正文生成题目
//!
//! `LlmCleaner` / `LlmQuestionGenerator` 是基于 `LlmService` 的实现。

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::config::PromptConfig;
use crate::error::{AppResult, LlmError};
use crate::models::Questions;
use crate::services::LlmService;
use crate::utils::logging::truncate_text;

/// 清洗能力：text -> text
#[async_trait]
pub trait TextCleaner: Send + Sync {
    async fn clean(&self, text: &str) -> AppResult<String>;
}

/// 出题能力：text -> 题目列表
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn questionify(&self, text: &str) -> AppResult<Questions>;
}

/// 基于 LLM 的清洗
pub struct LlmCleaner {
    service: Arc<LlmService>,
    model: String,
    prompt: String,
}

impl LlmCleaner {
    pub fn new(service: Arc<LlmService>, model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            service,
            model: model.into(),
            prompt: prompt.into(),
        }
    }

    /// 从提示词配置创建，缺少设置项时返回 ConfigError
    pub fn from_prompts(service: Arc<LlmService>, prompts: &PromptConfig) -> AppResult<Self> {
        Ok(Self::new(
            service,
            prompts.cleaning_model()?,
            prompts.cleaning_prompt()?,
        ))
    }
}

#[async_trait]
impl TextCleaner for LlmCleaner {
    async fn clean(&self, text: &str) -> AppResult<String> {
        self.service.send_to_llm(&self.model, &self.prompt, text).await
    }
}

/// 基于 LLM 的出题
pub struct LlmQuestionGenerator {
    service: Arc<LlmService>,
    model: String,
    prompt: String,
}

impl LlmQuestionGenerator {
    pub fn new(service: Arc<LlmService>, model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            service,
            model: model.into(),
            prompt: prompt.into(),
        }
    }

    /// 从提示词配置创建，缺少设置项时返回 ConfigError
    pub fn from_prompts(service: Arc<LlmService>, prompts: &PromptConfig) -> AppResult<Self> {
        Ok(Self::new(
            service,
            prompts.question_model()?,
            prompts.question_prompt()?,
        ))
    }

    /// 追加在提示词后面的输出格式说明
    fn system_message(&self) -> String {
        format!(
            "{}\n\nRespond with a single JSON object of the form \
             {{\"questions\": [{{\"question\": string, \"answers\": [string], \
             \"correct_answer\": string, \"explanation\": string}}]}} and nothing else.",
            self.prompt
        )
    }
}

#[async_trait]
impl QuestionGenerator for LlmQuestionGenerator {
    async fn questionify(&self, text: &str) -> AppResult<Questions> {
        let response = self
            .service
            .send_to_llm(&self.model, &self.system_message(), text)
            .await?;
        let questions = parse_questions(&response)?;
        debug!("LLM 生成 {} 道题目", questions.questions.len());
        Ok(questions)
    }
}

/// 解析 LLM 返回的题目 JSON，允许外层包裹 Markdown 代码块
pub fn parse_questions(response: &str) -> AppResult<Questions> {
    let body = strip_code_fence(response);
    serde_json::from_str(body).map_err(|e| {
        LlmError::MalformedQuestions {
            response: truncate_text(response, 200),
            reason: e.to_string(),
        }
        .into()
    })
}

fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // 跳过语言标记（如 ```json）
    let rest = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}
