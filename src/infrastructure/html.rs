//! HTML 解析工具
//!
//! 基于 `scraper` 的纯函数：统计选择器匹配数、提取可见文本。
//! `scraper::Html` 不是 Send，只能在同步函数里使用，不能跨 await 持有。

use scraper::{ElementRef, Html, Selector};

/// 不计入可见文本的标签
const HIDDEN_TAGS: [&str; 4] = ["script", "style", "noscript", "template"];

/// 解析 CSS 选择器，非法选择器返回 None
pub fn parse_selector(selector: &str) -> Option<Selector> {
    Selector::parse(selector).ok()
}

/// 统计页面中匹配选择器的元素数量
pub fn count_matches(html: &str, selector: &str) -> usize {
    let Some(selector) = parse_selector(selector) else {
        return 0;
    };
    let document = Html::parse_document(html);
    let count = document.select(&selector).count();
    count
}

/// 提取元素的可见文本，每个文本片段去除首尾空白后以换行连接
pub fn visible_text(element: ElementRef<'_>) -> String {
    text_fragments(element).join("\n")
}

/// 提取元素的单行文本（用于标题、链接文字）
pub fn inline_text(element: ElementRef<'_>) -> String {
    text_fragments(element).join(" ")
}

/// 第一个匹配元素的可见文本；没有匹配元素时返回 None
pub fn section_text(html: &str, selector: &str) -> Option<String> {
    let selector = parse_selector(selector)?;
    let document = Html::parse_document(html);
    let text = document.select(&selector).next().map(visible_text);
    text
}

/// 第一个匹配元素的单行文本；没有匹配元素时返回 None
pub fn first_inline_text(html: &str, selector: &str) -> Option<String> {
    let selector = parse_selector(selector)?;
    let document = Html::parse_document(html);
    let text = document.select(&selector).next().map(inline_text);
    text
}

fn text_fragments(element: ElementRef<'_>) -> Vec<String> {
    element
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .map(|e| HIDDEN_TAGS.contains(&e.name()))
                    .unwrap_or(false)
            });
            if hidden {
                return None;
            }
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect()
}
