//! 学习路径：抓取模块卡片列表

use async_trait::async_trait;

use crate::error::AppResult;
use crate::infrastructure::PageNavigator;
use crate::models::{LearningPath, Question};
use crate::services::{QuestionGenerator, TextCleaner};
use crate::workflow::listing::{scrape_listing, AnchorMode, ListingSpec};
use crate::workflow::{Cleanable, ListingChild, Questionable, Scrapable};

/// 学习路径页面上的模块卡片
pub const LEARNING_PATH_LISTING: ListingSpec = ListingSpec {
    level: "模块",
    heading: "  ##",
    ready_selector: r#"[data-bi-name="module"]"#,
    ready_min_count: 1,
    container_selector: r#"[data-bi-name="module"]"#,
    anchor_selector: "a[href]",
    anchor_mode: AnchorMode::FirstPerContainer,
    // 检查模式只保留第 1 个模块，比认证和模块两层少一个
    check_mode_cutoff: 1,
};

#[async_trait]
impl Scrapable for LearningPath {
    async fn scrap(&mut self, navigator: &mut dyn PageNavigator, check_mode: bool) -> AppResult<()> {
        let modules = scrape_listing(
            navigator,
            &self.learning_path_title,
            &LEARNING_PATH_LISTING,
            check_mode,
        )
        .await?;
        self.modules_in_learning_path.extend(modules);
        Ok(())
    }
}

#[async_trait]
impl Cleanable for LearningPath {
    async fn clean(&mut self, cleaner: &dyn TextCleaner) -> AppResult<()> {
        for module in &mut self.modules_in_learning_path {
            module.clean(cleaner).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Questionable for LearningPath {
    type Output = Vec<Question>;

    /// 扁平的题目列表，按学习路径分组由上层负责
    async fn generate_questions(&self, generator: &dyn QuestionGenerator) -> AppResult<Vec<Question>> {
        let mut questions = Vec::new();
        for module in &self.modules_in_learning_path {
            questions.extend(module.generate_questions(generator).await?);
        }
        Ok(questions)
    }
}

impl ListingChild for LearningPath {
    fn from_title(title: String) -> Self {
        LearningPath::new(title)
    }
}
