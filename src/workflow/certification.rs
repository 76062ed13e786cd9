//! 认证：根节点的元数据与学习路径列表

use async_trait::async_trait;
use regex::Regex;
use tracing::{info, warn};

use crate::error::{AppResult, ScrapError};
use crate::infrastructure::html::first_inline_text;
use crate::infrastructure::PageNavigator;
use crate::models::{Certification, CertificationMetadata, LearningPathQuestions};
use crate::services::{QuestionGenerator, TextCleaner};
use crate::workflow::listing::{into_browser_error, scrape_listing, AnchorMode, ListingSpec};
use crate::workflow::{Cleanable, Questionable, Scrapable};

/// 认证页面必须位于该站点下
pub const LEARN_URL_PREFIX: &str = "https://learn.microsoft.com";

/// 认证标题
pub const CERTIFICATION_TITLE_SELECTOR: &str = "h1.title";

/// 认证页面上的学习路径卡片
///
/// 列表区域本身出现得很早，以至少 3 个 `learn.wwl` 链接作为渲染完成的标志。
pub const CERTIFICATION_LISTING: ListingSpec = ListingSpec {
    level: "学习路径",
    heading: "#",
    ready_selector: r#"a[id^="learn.wwl"]"#,
    ready_min_count: 3,
    container_selector: "#learning-paths-list",
    anchor_selector: "a.card-title[href]",
    anchor_mode: AnchorMode::AllInFirstContainer,
    check_mode_cutoff: 2,
};

const CERTIFICATION_NODE: &str = "certification";

/// 从根 URL 的最后一段解析认证代码（如 `.../az-900/`）
pub fn parse_certification_code(root_url: &str) -> Option<String> {
    let pattern = Regex::new(r"/([a-z]{2}-\d{3})/?$").ok()?;
    pattern
        .captures(root_url)
        .and_then(|captures| captures.get(1))
        .map(|code| code.as_str().to_string())
}

/// 根 URL 必须位于 learn.microsoft.com 下
pub fn validate_root_url(root_url: &str) -> Result<(), ScrapError> {
    if root_url.starts_with(LEARN_URL_PREFIX) {
        Ok(())
    } else {
        Err(ScrapError::InvalidUrl {
            url: root_url.to_string(),
            expected_prefix: LEARN_URL_PREFIX.to_string(),
        })
    }
}

/// 读取认证代码和标题
///
/// 导航器需已停留在认证首页。代码缺失只记录警告，标题缺失则视为抓取失败。
pub async fn get_certification_metadata(
    navigator: &mut dyn PageNavigator,
    root_url: &str,
) -> AppResult<CertificationMetadata> {
    validate_root_url(root_url)?;

    let code = parse_certification_code(root_url);
    if code.is_none() {
        warn!("⚠️ URL 中没有认证代码: {}", root_url);
    }

    let timeout = navigator.wait_timeout();
    let title_failure = |e| {
        ScrapError::failure(
            CERTIFICATION_NODE,
            "页面中找不到认证标题",
            into_browser_error(e),
        )
    };
    navigator.wait_until_ready(timeout).await.map_err(title_failure)?;
    navigator
        .wait_for_selector(CERTIFICATION_TITLE_SELECTOR, 1, timeout)
        .await
        .map_err(title_failure)?;
    let html = navigator.current_html().await.map_err(title_failure)?;

    let title = first_inline_text(&html, CERTIFICATION_TITLE_SELECTOR)
        .filter(|title| !title.is_empty())
        .ok_or_else(|| ScrapError::missing(CERTIFICATION_NODE, "页面中找不到认证标题"))?;

    info!("🎓 认证: {} ({})", title, code.as_deref().unwrap_or("无代码"));
    Ok(CertificationMetadata { code, title })
}

#[async_trait]
impl Scrapable for Certification {
    async fn scrap(&mut self, navigator: &mut dyn PageNavigator, check_mode: bool) -> AppResult<()> {
        let timeout = navigator.wait_timeout();
        navigator.wait_until_ready(timeout).await.map_err(|e| {
            ScrapError::failure(CERTIFICATION_NODE, "认证页面未加载完成", into_browser_error(e))
        })?;

        let learning_paths =
            scrape_listing(navigator, CERTIFICATION_NODE, &CERTIFICATION_LISTING, check_mode).await?;
        self.certification_content.extend(learning_paths);
        Ok(())
    }
}

#[async_trait]
impl Cleanable for Certification {
    async fn clean(&mut self, cleaner: &dyn TextCleaner) -> AppResult<()> {
        for learning_path in &mut self.certification_content {
            learning_path.clean(cleaner).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Questionable for Certification {
    type Output = Vec<LearningPathQuestions>;

    /// 每个学习路径一组题目，顺序与学习路径一致
    async fn generate_questions(
        &self,
        generator: &dyn QuestionGenerator,
    ) -> AppResult<Vec<LearningPathQuestions>> {
        let mut groups = Vec::with_capacity(self.certification_content.len());
        for learning_path in &self.certification_content {
            let questions = learning_path.generate_questions(generator).await?;
            info!(
                "✓ 学习路径 '{}' 共 {} 道题",
                learning_path.learning_path_title,
                questions.len()
            );
            groups.push(LearningPathQuestions {
                learning_path_title: learning_path.learning_path_title.clone(),
                questions,
            });
        }
        Ok(groups)
    }
}
