//! 基础设施层
//!
//! - `JsExecutor`：唯一的 page owner
//! - `PageNavigator` / `ChromeNavigator`：导航与等待能力
//! - `html`：HTML 解析工具

pub mod html;
pub mod js_executor;
pub mod navigator;

pub use js_executor::JsExecutor;
pub use navigator::{resolve_href, ChromeNavigator, PageNavigator, DEFAULT_WAIT_TIMEOUT};
