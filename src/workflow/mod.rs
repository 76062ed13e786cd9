//! 流程层（Workflow Layer）
//!
//! 课程树的四种节点各自实现同一组能力：
//!
//! - `Scrapable`：从页面抓取自己（及子节点）
//! - `Cleanable`：用外部清洗能力改写单元正文
//! - `Questionable`：用外部出题能力生成题目，自底向上汇总
//! - `models::Document`：与嵌套文档互相转换
//!
//! 导航器以 `&mut dyn PageNavigator` 显式传入，节点本身不持有浏览器。

use async_trait::async_trait;

use crate::error::AppResult;
use crate::infrastructure::PageNavigator;
use crate::services::{QuestionGenerator, TextCleaner};

pub mod certification;
pub mod concurrent;
pub mod learning_path;
pub mod listing;
pub mod module;
pub mod unit;

pub use certification::get_certification_metadata;
pub use concurrent::{clean_concurrently, generate_questions_concurrently};
pub use listing::{extract_anchors, scrape_listing, Anchor, AnchorMode, ListingSpec};

/// 抓取能力
#[async_trait]
pub trait Scrapable: Send {
    async fn scrap(&mut self, navigator: &mut dyn PageNavigator, check_mode: bool) -> AppResult<()>;
}

/// 清洗能力
#[async_trait]
pub trait Cleanable: Send {
    async fn clean(&mut self, cleaner: &dyn TextCleaner) -> AppResult<()>;
}

/// 出题能力
#[async_trait]
pub trait Questionable: Sync {
    type Output: Send;

    async fn generate_questions(&self, generator: &dyn QuestionGenerator) -> AppResult<Self::Output>;
}

/// 可以由列表中的一个链接创建的子节点
pub trait ListingChild: Scrapable + Sized {
    fn from_title(title: String) -> Self;
}
