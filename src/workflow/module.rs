//! 模块：抓取单元列表

use async_trait::async_trait;

use crate::error::AppResult;
use crate::infrastructure::PageNavigator;
use crate::models::{Module, Question};
use crate::services::{QuestionGenerator, TextCleaner};
use crate::workflow::listing::{scrape_listing, AnchorMode, ListingSpec};
use crate::workflow::{Cleanable, ListingChild, Questionable, Scrapable};

/// 模块页面上的单元列表
pub const MODULE_LISTING: ListingSpec = ListingSpec {
    level: "单元",
    heading: "    ###",
    ready_selector: "#unit-list",
    ready_min_count: 1,
    container_selector: "#unit-list",
    anchor_selector: "a[href]",
    anchor_mode: AnchorMode::AllInFirstContainer,
    // 检查模式保留前 2 个单元
    check_mode_cutoff: 2,
};

#[async_trait]
impl Scrapable for Module {
    async fn scrap(&mut self, navigator: &mut dyn PageNavigator, check_mode: bool) -> AppResult<()> {
        let units = scrape_listing(navigator, &self.module_title, &MODULE_LISTING, check_mode).await?;
        self.units_in_module.extend(units);
        Ok(())
    }
}

#[async_trait]
impl Cleanable for Module {
    async fn clean(&mut self, cleaner: &dyn TextCleaner) -> AppResult<()> {
        for unit in &mut self.units_in_module {
            unit.clean(cleaner).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Questionable for Module {
    type Output = Vec<Question>;

    async fn generate_questions(&self, generator: &dyn QuestionGenerator) -> AppResult<Vec<Question>> {
        let mut questions = Vec::new();
        for unit in &self.units_in_module {
            questions.extend(unit.generate_questions(generator).await?);
        }
        Ok(questions)
    }
}

impl ListingChild for Module {
    fn from_title(title: String) -> Self {
        Module::new(title)
    }
}
