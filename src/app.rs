//! 应用入口：按子命令组装各层并执行

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use crate::cli::Command;
use crate::config::{Config, PromptConfig};
use crate::orchestrator::{CoursePipeline, ScrapabilityReport, ScrapeSession, Stage};
use crate::services::{CatalogService, LlmCleaner, LlmQuestionGenerator, LlmService};
use crate::utils::logging::log_token_usage;

/// 应用主结构
pub struct App {
    config: Config,
    catalog: CatalogService,
}

impl App {
    pub fn new(config: Config) -> Self {
        let catalog = CatalogService::new(&config.catalog_path);
        Self { config, catalog }
    }

    /// 执行一个子命令
    pub async fn run(&self, command: Command, check_mode: bool) -> Result<()> {
        match command {
            Command::Courses => self.list_courses().await,
            Command::TestOnly { url } => self.test_only(&url).await,
            Command::ScrapOnly { certification_code } => {
                self.scrap_only(&certification_code, check_mode).await
            }
            Command::CleanOnly { certification_code } => self.clean_only(&certification_code).await,
            Command::GenerateQuestions { certification_code } => {
                self.generate_questions(&certification_code).await
            }
        }
    }

    async fn list_courses(&self) -> Result<()> {
        info!("📚 可用的认证:");
        for entry in self.catalog.list().await? {
            info!("  {}, {}", entry.code, entry.title);
        }
        Ok(())
    }

    async fn test_only(&self, url: &str) -> Result<()> {
        info!("🔍 检查模式运行，URL: {}", url);
        let mut session = ScrapeSession::open(&self.config).await?;
        let report = session.check_scrapability(url, &self.catalog).await;

        match session.finish(report).await? {
            ScrapabilityReport::Scrapable {
                metadata,
                added_to_catalog,
            } => {
                info!(
                    "✅ 可以抓取: {} ({})",
                    metadata.title,
                    metadata.code.as_deref().unwrap_or("无代码")
                );
                if added_to_catalog {
                    info!("📝 已加入认证目录: {}", self.catalog.path().display());
                }
                Ok(())
            }
            ScrapabilityReport::NotScrapable { reason } => {
                anyhow::bail!("无法抓取该认证: {}", reason)
            }
        }
    }

    async fn scrap_only(&self, code: &str, check_mode: bool) -> Result<()> {
        let entry = self.catalog.lookup(code).await?;
        let pipeline = CoursePipeline::new(&entry.code, &self.config.data_root);

        let mut session = ScrapeSession::open(&self.config).await?;
        let result = pipeline.run_scrape(session.navigator(), &entry.url, check_mode).await;
        session.finish(result).await?;
        Ok(())
    }

    async fn clean_only(&self, code: &str) -> Result<()> {
        let entry = self.catalog.lookup(code).await?;
        let pipeline = CoursePipeline::new(&entry.code, &self.config.data_root);
        // 先检查前置产物，避免在缺少凭据时给出误导性的错误
        pipeline.require(Stage::Scrape)?;

        let (service, prompts) = self.llm_backend()?;
        let cleaner = LlmCleaner::from_prompts(Arc::clone(&service), &prompts)?;
        pipeline
            .run_clean(&cleaner, self.config.transform_concurrency)
            .await?;

        let (input, output) = service.usage().snapshot();
        log_token_usage("清洗", input, output);
        Ok(())
    }

    async fn generate_questions(&self, code: &str) -> Result<()> {
        let entry = self.catalog.lookup(code).await?;
        let pipeline = CoursePipeline::new(&entry.code, &self.config.data_root);
        pipeline.require(Stage::Clean)?;

        let (service, prompts) = self.llm_backend()?;
        let generator = LlmQuestionGenerator::from_prompts(Arc::clone(&service), &prompts)?;
        let questions = pipeline
            .run_generate_questions(&generator, &entry.title, self.config.transform_concurrency)
            .await?;
        if questions.question_count() == 0 {
            warn!("⚠️ 没有生成任何题目");
        }

        let (input, output) = service.usage().snapshot();
        log_token_usage("出题", input, output);
        Ok(())
    }

    fn llm_backend(&self) -> Result<(Arc<LlmService>, PromptConfig)> {
        self.config.require_llm_credentials()?;
        let prompts = PromptConfig::load(&self.config.prompt_config_path)?;
        Ok((Arc::new(LlmService::new(&self.config)), prompts))
    }
}
