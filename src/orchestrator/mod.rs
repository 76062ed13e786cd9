//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `scrape_session` - 抓取会话
//! - 启动或连接浏览器，持有唯一的 Browser 和导航器
//! - 可抓取性检查，成功后写入认证目录
//!
//! ### `course_pipeline` - 课程流水线
//! - 管理一个认证的三个阶段产物路径
//! - 检查前置阶段产物，依次执行抓取 / 清洗 / 出题
//!
//! ## 层次关系
//!
//! ```text
//! course_pipeline / scrape_session
//!     ↓
//! workflow (课程树节点：scrap / clean / generate_questions)
//!     ↓
//! services (能力层：llm / catalog)
//!     ↓
//! infrastructure (基础设施：JsExecutor / PageNavigator)
//! ```

pub mod course_pipeline;
pub mod scrape_session;

pub use course_pipeline::{CoursePipeline, Stage};
pub use scrape_session::{check_scrapability, ScrapabilityReport, ScrapeSession};
