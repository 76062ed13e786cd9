//! 页面导航能力 - 基础设施层
//!
//! `PageNavigator` 描述一个单线程浏览器会话：导航、等待、读取 DOM、后退。
//! 抓取流程只依赖这个 trait，`ChromeNavigator` 是基于 chromiumoxide 的实现。

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{sleep, Instant};
use tracing::debug;
use url::Url;

use crate::error::{AppResult, BrowserError};
use crate::infrastructure::JsExecutor;

/// 单次等待的默认超时
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(10);

/// 页面导航能力
///
/// 同一次抓取只有一个导航器，以 `&mut` 的方式显式传给每个节点，
/// 因此任意时刻只有一个页面处于打开状态，`go_back` 的目标是确定的。
#[async_trait]
pub trait PageNavigator: Send {
    /// 等待 `document.readyState == "complete"`
    async fn wait_until_ready(&mut self, timeout: Duration) -> AppResult<()>;

    /// 等待至少 `min_count` 个元素匹配 `selector`
    async fn wait_for_selector(
        &mut self,
        selector: &str,
        min_count: usize,
        timeout: Duration,
    ) -> AppResult<()>;

    /// 当前页面渲染后的完整 HTML
    async fn current_html(&mut self) -> AppResult<String>;

    /// 当前页面 URL
    async fn current_url(&mut self) -> AppResult<String>;

    /// 以当前页面为基准解析 `href` 并导航过去
    async fn navigate_to(&mut self, href: &str) -> AppResult<()>;

    /// 回到上一个页面
    async fn go_back(&mut self) -> AppResult<()>;

    /// 节点抓取使用的等待超时
    fn wait_timeout(&self) -> Duration {
        DEFAULT_WAIT_TIMEOUT
    }
}

/// 以 `base` 为基准解析相对链接
pub fn resolve_href(base: &str, href: &str) -> Result<String, BrowserError> {
    let invalid = |reason: String| BrowserError::NavigationFailed {
        url: href.to_string(),
        reason,
    };
    match Url::parse(href) {
        Ok(absolute) => Ok(absolute.to_string()),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse(base).map_err(|e| invalid(format!("无法解析当前页面地址 {}: {}", base, e)))?;
            let joined = base.join(href).map_err(|e| invalid(e.to_string()))?;
            Ok(joined.to_string())
        }
        Err(e) => Err(invalid(e.to_string())),
    }
}

/// 基于 chromiumoxide 的导航器
///
/// 自己维护历史栈：`go_back` 直接重新打开上一个 URL，
/// 不依赖 `history.back()` 在单页应用里的行为。
pub struct ChromeNavigator {
    executor: JsExecutor,
    history: Vec<String>,
    wait_timeout: Duration,
    poll_interval: Duration,
}

impl ChromeNavigator {
    pub fn new(executor: JsExecutor, wait_timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            executor,
            history: Vec::new(),
            wait_timeout,
            poll_interval,
        }
    }

    /// 轮询直到 `check` 返回 true 或超时；脚本执行失败视为条件暂未满足
    async fn poll_until<F, Fut>(&self, timeout: Duration, mut check: F) -> bool
    where
        F: FnMut() -> Fut + Send,
        Fut: std::future::Future<Output = AppResult<bool>> + Send,
    {
        let deadline = Instant::now() + timeout;
        loop {
            match check().await {
                Ok(true) => return true,
                Ok(false) => {}
                Err(e) => debug!("等待条件检查失败，继续轮询: {}", e),
            }
            if Instant::now() >= deadline {
                return false;
            }
            sleep(self.poll_interval).await;
        }
    }
}

#[async_trait]
impl PageNavigator for ChromeNavigator {
    async fn wait_until_ready(&mut self, timeout: Duration) -> AppResult<()> {
        let executor = &self.executor;
        let ready = self
            .poll_until(timeout, || async move {
                let state: String = executor.eval_as("document.readyState").await?;
                Ok(state == "complete")
            })
            .await;
        if ready {
            Ok(())
        } else {
            Err(BrowserError::NavigationTimeout {
                timeout_ms: timeout.as_millis() as u64,
            }
            .into())
        }
    }

    async fn wait_for_selector(
        &mut self,
        selector: &str,
        min_count: usize,
        timeout: Duration,
    ) -> AppResult<()> {
        let js_code = format!(
            "document.querySelectorAll({}).length",
            serde_json::to_string(selector).unwrap_or_default()
        );
        let executor = &self.executor;
        let found = self
            .poll_until(timeout, || {
                let js_code = js_code.clone();
                async move {
                    let count: usize = executor.eval_as(js_code).await?;
                    Ok(count >= min_count)
                }
            })
            .await;
        if found {
            Ok(())
        } else {
            Err(BrowserError::ElementNotFound {
                selector: selector.to_string(),
                min_count,
                timeout_ms: timeout.as_millis() as u64,
            }
            .into())
        }
    }

    async fn current_html(&mut self) -> AppResult<String> {
        self.executor.content().await
    }

    async fn current_url(&mut self) -> AppResult<String> {
        Ok(self
            .executor
            .url()
            .await?
            .unwrap_or_else(|| "about:blank".to_string()))
    }

    async fn navigate_to(&mut self, href: &str) -> AppResult<()> {
        let current = self.current_url().await?;
        let target = resolve_href(&current, href)?;
        debug!("导航: {} -> {}", current, target);
        self.executor.goto(&target).await?;
        self.history.push(current);
        Ok(())
    }

    async fn go_back(&mut self) -> AppResult<()> {
        let previous = self.history.pop().ok_or_else(|| BrowserError::NavigationFailed {
            url: "<history>".to_string(),
            reason: "没有可以返回的页面".to_string(),
        })?;
        debug!("返回: {}", previous);
        self.executor.goto(&previous).await
    }

    fn wait_timeout(&self) -> Duration {
        self.wait_timeout
    }
}
