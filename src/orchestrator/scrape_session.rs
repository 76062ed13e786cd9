//! 抓取会话 - 编排层
//!
//! 唯一持有 Browser 的地方。一次运行只有一个会话、一个页面、一个导航器。

use chromiumoxide::Browser;
use tracing::{info, warn};

use crate::browser;
use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::{ChromeNavigator, JsExecutor, PageNavigator};
use crate::models::{Certification, CatalogEntry, CertificationMetadata};
use crate::services::CatalogService;
use crate::workflow::certification::validate_root_url;
use crate::workflow::{get_certification_metadata, Scrapable};

/// 可抓取性检查的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapabilityReport {
    /// 检查模式抓取成功
    Scrapable {
        metadata: CertificationMetadata,
        /// 是否新追加到了认证目录
        added_to_catalog: bool,
    },
    /// 页面结构不符合预期
    NotScrapable { reason: String },
}

impl ScrapabilityReport {
    pub fn is_scrapable(&self) -> bool {
        matches!(self, ScrapabilityReport::Scrapable { .. })
    }
}

pub struct ScrapeSession {
    browser: Browser,
    navigator: ChromeNavigator,
}

impl ScrapeSession {
    /// 按配置连接已有浏览器或启动新浏览器
    pub async fn open(config: &Config) -> AppResult<Self> {
        let (browser, page) = match config.browser_debug_port {
            Some(port) => browser::connect_to_browser(port).await?,
            None => browser::launch_browser(config).await?,
        };
        let executor = JsExecutor::new(page);
        let navigator = ChromeNavigator::new(executor, config.wait_timeout(), config.poll_interval());
        Ok(Self { browser, navigator })
    }

    pub fn navigator(&mut self) -> &mut dyn PageNavigator {
        &mut self.navigator
    }

    /// 用检查模式试抓一次认证；成功后把认证追加到目录
    ///
    /// 抓取失败只会体现在报告里，无效 URL 等其它错误照常返回。
    pub async fn check_scrapability(
        &mut self,
        root_url: &str,
        catalog: &CatalogService,
    ) -> AppResult<ScrapabilityReport> {
        check_scrapability(&mut self.navigator, root_url, catalog).await
    }

    pub async fn close(mut self) -> AppResult<()> {
        self.browser.close().await?;
        info!("🔒 浏览器已关闭");
        Ok(())
    }

    /// 关闭浏览器后返回本次运行的结果；运行出错时关闭失败只记录日志
    pub async fn finish<T>(self, result: AppResult<T>) -> AppResult<T> {
        let closed = self.close().await;
        settle(result, closed)
    }
}

fn settle<T>(result: AppResult<T>, closed: AppResult<()>) -> AppResult<T> {
    match (result, closed) {
        (Err(e), Err(close_error)) => {
            warn!("⚠️ 关闭浏览器失败: {}", close_error);
            Err(e)
        }
        (Err(e), Ok(())) => Err(e),
        (Ok(_), Err(close_error)) => Err(close_error),
        (Ok(value), Ok(())) => Ok(value),
    }
}

/// 打开认证首页，读取元数据并以检查模式抓取
async fn scrape_in_check_mode(
    navigator: &mut dyn PageNavigator,
    root_url: &str,
) -> AppResult<CertificationMetadata> {
    validate_root_url(root_url)?;
    navigator.navigate_to(root_url).await?;
    let metadata = get_certification_metadata(navigator, root_url).await?;
    let mut certification = Certification::new();
    certification.scrap(navigator, true).await?;
    Ok(metadata)
}

/// 可抓取性检查，不依赖具体的浏览器实现
pub async fn check_scrapability(
    navigator: &mut dyn PageNavigator,
    root_url: &str,
    catalog: &CatalogService,
) -> AppResult<ScrapabilityReport> {
    let metadata = match scrape_in_check_mode(navigator, root_url).await {
        Ok(metadata) => metadata,
        Err(e) if e.is_scrap_failure() => {
            warn!("❌ 无法抓取 {}: {}", root_url, e);
            return Ok(ScrapabilityReport::NotScrapable {
                reason: e.to_string(),
            });
        }
        Err(e) => return Err(e),
    };

    let added_to_catalog = match &metadata.code {
        Some(code) => {
            catalog
                .append(CatalogEntry {
                    code: code.clone(),
                    title: metadata.title.clone(),
                    url: root_url.to_string(),
                })
                .await?
        }
        None => {
            warn!("⚠️ 认证没有代码，不写入目录");
            false
        }
    };

    info!("✅ 该认证可以抓取: {}", root_url);
    Ok(ScrapabilityReport::Scrapable {
        metadata,
        added_to_catalog,
    })
}
