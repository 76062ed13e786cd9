//! 列表遍历 - 流程层
//!
//! 认证、学习路径、模块的抓取形状相同：
//! 等待列表区域 → 解析子链接 → 逐个"进入子页面 → 抓取子节点 → 返回"。
//! 各层只在 `ListingSpec`（选择器、链接规则、检查模式截断位置）上不同。

use scraper::Html;
use tracing::{error, info};

use crate::error::{AppResult, ScrapError};
use crate::infrastructure::html::{inline_text, parse_selector};
use crate::infrastructure::PageNavigator;
use crate::workflow::ListingChild;

/// 列表区域中链接的取法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorMode {
    /// 只看第一个列表区域，取其中所有链接
    AllInFirstContainer,
    /// 每个列表区域（卡片）取第一个带文字的链接
    FirstPerContainer,
}

/// 一层列表的页面结构
#[derive(Debug, Clone, Copy)]
pub struct ListingSpec {
    /// 日志中的层级名
    pub level: &'static str,
    /// 日志标题前缀（# / ## / ###）
    pub heading: &'static str,
    /// 列表渲染完成的标志选择器
    pub ready_selector: &'static str,
    /// 标志选择器至少匹配的元素数
    pub ready_min_count: usize,
    /// 列表区域选择器
    pub container_selector: &'static str,
    /// 区域内的链接选择器
    pub anchor_selector: &'static str,
    pub anchor_mode: AnchorMode,
    /// 检查模式下遇到该下标的链接即停止
    pub check_mode_cutoff: usize,
}

/// 子页面链接
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub title: String,
    pub href: String,
}

/// 从页面 HTML 中按文档顺序提取子链接；找不到列表区域时返回 None
pub fn extract_anchors(html: &str, listing: &ListingSpec) -> Option<Vec<Anchor>> {
    let container_selector = parse_selector(listing.container_selector)?;
    let anchor_selector = parse_selector(listing.anchor_selector)?;
    let document = Html::parse_document(html);

    let mut containers = document.select(&container_selector).peekable();
    containers.peek()?;

    let to_anchor = |element: scraper::ElementRef<'_>| {
        element.value().attr("href").map(|href| Anchor {
            title: inline_text(element),
            href: href.to_string(),
        })
    };

    let anchors = match listing.anchor_mode {
        AnchorMode::AllInFirstContainer => containers
            .next()
            .map(|container| container.select(&anchor_selector).filter_map(to_anchor).collect())
            .unwrap_or_default(),
        AnchorMode::FirstPerContainer => containers
            .filter_map(|container| {
                container
                    .select(&anchor_selector)
                    .filter_map(to_anchor)
                    .find(|anchor| !anchor.title.is_empty())
            })
            .collect(),
    };
    Some(anchors)
}

/// 抓取一层列表下的所有子节点
///
/// 任一子节点失败时立即返回错误，不保留已抓取的兄弟节点；
/// 调用方只在全部成功后才把结果追加到自己的子节点序列。
pub async fn scrape_listing<C: ListingChild>(
    navigator: &mut dyn PageNavigator,
    owner: &str,
    listing: &ListingSpec,
    check_mode: bool,
) -> AppResult<Vec<C>> {
    let timeout = navigator.wait_timeout();
    navigator
        .wait_for_selector(listing.ready_selector, listing.ready_min_count, timeout)
        .await
        .map_err(|e| listing_failure(owner, listing, e))?;

    let html = navigator
        .current_html()
        .await
        .map_err(|e| listing_failure(owner, listing, e))?;
    let anchors = extract_anchors(&html, listing).ok_or_else(|| {
        ScrapError::missing(
            owner,
            format!("找不到{}列表区域 '{}'", listing.level, listing.container_selector),
        )
    })?;

    let mut children = Vec::with_capacity(anchors.len());
    for (index, anchor) in anchors.into_iter().enumerate() {
        // 检查模式只抓取前几个子节点
        if check_mode && index == listing.check_mode_cutoff {
            break;
        }
        info!("{} {}", listing.heading, anchor.title);

        navigator.navigate_to(&anchor.href).await.map_err(|e| {
            ScrapError::failure(
                anchor.title.as_str(),
                format!("无法打开{}页面 {}", listing.level, anchor.href),
                into_browser_error(e),
            )
        })?;

        let mut child = C::from_title(anchor.title.clone());
        if let Err(e) = child.scrap(navigator, check_mode).await {
            error!("[{}] ❌ {}抓取失败: {}", owner, listing.level, e);
            return Err(e);
        }
        children.push(child);

        navigator.go_back().await.map_err(|e| {
            ScrapError::failure(owner, format!("无法从{}页面返回", listing.level), into_browser_error(e))
        })?;
    }

    Ok(children)
}

fn listing_failure(
    owner: &str,
    listing: &ListingSpec,
    error: crate::error::AppError,
) -> crate::error::AppError {
    ScrapError::failure(
        owner,
        format!("{}列表未出现 ('{}')", listing.level, listing.ready_selector),
        into_browser_error(error),
    )
    .into()
}

/// 节点边界上把底层错误统一包装为浏览器错误
pub(crate) fn into_browser_error(error: crate::error::AppError) -> crate::error::BrowserError {
    use crate::error::{AppError, BrowserError};
    match error {
        AppError::Browser(e) => e,
        other => BrowserError::ScriptExecutionFailed {
            source: Box::new(other),
        },
    }
}
