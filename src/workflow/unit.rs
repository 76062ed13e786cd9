//! 单元：抓取一个页面的正文

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::error::{AppResult, ScrapError};
use crate::infrastructure::html::section_text;
use crate::infrastructure::PageNavigator;
use crate::models::{Question, Unit};
use crate::services::{QuestionGenerator, TextCleaner};
use crate::workflow::listing::into_browser_error;
use crate::workflow::{Cleanable, ListingChild, Questionable, Scrapable};

/// 单元正文区域
pub const UNIT_CONTENT_SELECTOR: &str = "#unit-inner-section";

#[async_trait]
impl Scrapable for Unit {
    /// `check_mode` 在叶子节点上没有作用
    async fn scrap(&mut self, navigator: &mut dyn PageNavigator, _check_mode: bool) -> AppResult<()> {
        let timeout = navigator.wait_timeout();
        navigator
            .wait_for_selector(UNIT_CONTENT_SELECTOR, 1, timeout)
            .await
            .map_err(|e| {
                ScrapError::failure(
                    self.unit_title.as_str(),
                    format!("缺少单元正文区域 '{}'", UNIT_CONTENT_SELECTOR),
                    into_browser_error(e),
                )
            })?;

        let html = navigator.current_html().await.map_err(|e| {
            ScrapError::failure(self.unit_title.as_str(), "无法读取单元页面", into_browser_error(e))
        })?;

        let content = section_text(&html, UNIT_CONTENT_SELECTOR).ok_or_else(|| {
            ScrapError::missing(
                self.unit_title.as_str(),
                format!("缺少单元正文区域 '{}'", UNIT_CONTENT_SELECTOR),
            )
        })?;
        if content.is_empty() {
            return Err(ScrapError::missing(self.unit_title.as_str(), "单元正文为空").into());
        }

        debug!("[{}] 正文 {} 字符", self.unit_title, content.chars().count());
        self.unit_content = Some(content);
        Ok(())
    }
}

#[async_trait]
impl Cleanable for Unit {
    async fn clean(&mut self, cleaner: &dyn TextCleaner) -> AppResult<()> {
        let Some(content) = self.content() else {
            warn!("⚠️ 单元 '{}' 没有正文，跳过清洗", self.unit_title);
            return Ok(());
        };
        info!("🧹 清洗单元: {}", self.unit_title);
        let cleaned = cleaner.clean(content).await?;
        self.unit_content = Some(cleaned);
        Ok(())
    }
}

#[async_trait]
impl Questionable for Unit {
    type Output = Vec<Question>;

    async fn generate_questions(&self, generator: &dyn QuestionGenerator) -> AppResult<Vec<Question>> {
        let Some(content) = self.content() else {
            warn!("⚠️ 单元 '{}' 没有正文，跳过出题", self.unit_title);
            return Ok(Vec::new());
        };
        info!("📝 为单元出题: {}", self.unit_title);
        Ok(generator.questionify(content).await?.questions)
    }
}

impl ListingChild for Unit {
    fn from_title(title: String) -> Self {
        Unit::new(title)
    }
}
