//! # Cert Trainer
//!
//! 抓取 Microsoft Learn 认证课程，清洗正文并生成练习题
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露能力
//! - `JsExecutor` - 唯一的 page owner，提供 eval() / goto() 能力
//! - `PageNavigator` - 导航、等待、读取 DOM、后退
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不认识课程树
//! - `LlmService` - LLM 调用与 token 统计
//! - `TextCleaner` / `QuestionGenerator` - 清洗和出题能力
//! - `CatalogService` - 认证目录读写
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 课程树节点的抓取、清洗、出题
//! - Certification → LearningPath → Module → Unit
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/course_pipeline` - 阶段产物与前置检查
//! - `orchestrator/scrape_session` - 浏览器会话与可抓取性检查
//!
//! ## 模块结构

pub mod app;
pub mod browser;
pub mod cli;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{ChromeNavigator, JsExecutor, PageNavigator};
pub use models::{Certification, LearningPath, Module, Unit};
pub use orchestrator::{CoursePipeline, ScrapabilityReport, ScrapeSession, Stage};
pub use workflow::{Cleanable, Questionable, Scrapable};
