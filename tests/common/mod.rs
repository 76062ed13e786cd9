//! 集成测试共用的假导航器、课程站点和转换能力
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use cert_trainer::error::{AppResult, BrowserError, LlmError};
use cert_trainer::infrastructure::html::count_matches;
use cert_trainer::infrastructure::{resolve_href, PageNavigator};
use cert_trainer::models::{Question, Questions};
use cert_trainer::services::{QuestionGenerator, TextCleaner};

pub const ROOT_URL: &str =
    "https://learn.microsoft.com/en-us/credentials/certifications/azure-fundamentals/az-900/";
pub const CERTIFICATION_TITLE: &str = "Microsoft Certified: Azure Fundamentals";

/// 内存中的站点：URL → 渲染后的 HTML
pub struct FakeNavigator {
    pages: HashMap<String, String>,
    current: String,
    history: Vec<String>,
    visits: Vec<String>,
}

impl FakeNavigator {
    pub fn new(pages: HashMap<String, String>) -> Self {
        Self {
            pages,
            current: "about:blank".to_string(),
            history: Vec::new(),
            visits: Vec::new(),
        }
    }

    /// 直接停留在某个页面（不记录历史）
    pub fn starting_at(mut self, url: &str) -> Self {
        self.current = url.to_string();
        self
    }

    /// 按顺序记录的所有导航目标
    pub fn visits(&self) -> &[String] {
        &self.visits
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    fn html(&self) -> AppResult<&str> {
        self.pages
            .get(&self.current)
            .map(String::as_str)
            .ok_or_else(|| {
                BrowserError::NavigationFailed {
                    url: self.current.clone(),
                    reason: "page not in site map".to_string(),
                }
                .into()
            })
    }
}

#[async_trait]
impl PageNavigator for FakeNavigator {
    async fn wait_until_ready(&mut self, _timeout: Duration) -> AppResult<()> {
        self.html().map(|_| ())
    }

    async fn wait_for_selector(
        &mut self,
        selector: &str,
        min_count: usize,
        timeout: Duration,
    ) -> AppResult<()> {
        let html = self.html()?;
        if count_matches(html, selector) >= min_count {
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
        self.html().map(str::to_string)
    }

    async fn current_url(&mut self) -> AppResult<String> {
        Ok(self.current.clone())
    }

    async fn navigate_to(&mut self, href: &str) -> AppResult<()> {
        let target = resolve_href(&self.current, href)?;
        if !self.pages.contains_key(&target) {
            return Err(BrowserError::NavigationFailed {
                url: target,
                reason: "page not in site map".to_string(),
            }
            .into());
        }
        self.visits.push(target.clone());
        let previous = std::mem::replace(&mut self.current, target);
        self.history.push(previous);
        Ok(())
    }

    async fn go_back(&mut self) -> AppResult<()> {
        let previous = self.history.pop().ok_or_else(|| BrowserError::NavigationFailed {
            url: self.current.clone(),
            reason: "history is empty".to_string(),
        })?;
        self.current = previous;
        Ok(())
    }

    fn wait_timeout(&self) -> Duration {
        Duration::from_millis(10)
    }
}

// ========== 课程站点 ==========

pub fn learning_path_url(lp: usize) -> String {
    format!("https://learn.microsoft.com/en-us/training/paths/lp-{lp}/")
}

pub fn module_url(lp: usize, module: usize) -> String {
    format!("https://learn.microsoft.com/en-us/training/modules/m-{lp}-{module}/")
}

pub fn unit_url(lp: usize, module: usize, unit: usize) -> String {
    format!("{}{unit}-unit", module_url(lp, module))
}

pub fn unit_content(lp: usize, module: usize, unit: usize) -> String {
    format!("Unit {lp}.{module}.{unit}\nContent of unit {lp}.{module}.{unit}")
}

pub fn certification_page(learning_paths: usize) -> String {
    let cards: String = (1..=learning_paths)
        .map(|lp| {
            format!(
                r#"<li><a class="card-title" id="learn.wwl.lp-{lp}" href="/en-us/training/paths/lp-{lp}/">Learning path {lp}</a></li>"#
            )
        })
        .collect();
    format!(
        r#"<html><body>
            <h1 class="title"> {CERTIFICATION_TITLE} </h1>
            <nav>
              <a id="learn.wwl.nav-1" href="/a">a</a>
              <a id="learn.wwl.nav-2" href="/b">b</a>
              <a id="learn.wwl.nav-3" href="/c">c</a>
            </nav>
            <ul id="learning-paths-list">{cards}</ul>
        </body></html>"#
    )
}

pub fn learning_path_page(lp: usize, modules: usize) -> String {
    let cards: String = (1..=modules)
        .map(|module| {
            format!(
                r#"<div data-bi-name="module">
                     <a href="/en-us/training/modules/m-{lp}-{module}/"><img src="icon.svg"></a>
                     <a href="/en-us/training/modules/m-{lp}-{module}/">Module {lp}.{module}</a>
                   </div>"#
            )
        })
        .collect();
    format!("<html><body><main>{cards}</main></body></html>")
}

pub fn module_page(lp: usize, module: usize, units: usize) -> String {
    let items: String = (1..=units)
        .map(|unit| format!(r#"<li><a href="{unit}-unit">Unit {lp}.{module}.{unit}</a></li>"#))
        .collect();
    format!(r#"<html><body><h1>Module {lp}.{module}</h1><ul id="unit-list">{items}</ul></body></html>"#)
}

pub fn unit_page(lp: usize, module: usize, unit: usize) -> String {
    format!(
        r#"<html><body>
            <div id="unit-inner-section">
              <h1>Unit {lp}.{module}.{unit}</h1>
              <p>Content of unit {lp}.{module}.{unit}</p>
              <script>window.telemetry = true;</script>
            </div>
            <footer>Feedback</footer>
        </body></html>"#
    )
}

/// 生成一个每层数量固定的完整课程站点
pub fn course_site(learning_paths: usize, modules: usize, units: usize) -> HashMap<String, String> {
    let mut pages = HashMap::new();
    pages.insert(ROOT_URL.to_string(), certification_page(learning_paths));
    for lp in 1..=learning_paths {
        pages.insert(learning_path_url(lp), learning_path_page(lp, modules));
        for module in 1..=modules {
            pages.insert(module_url(lp, module), module_page(lp, module, units));
            for unit in 1..=units {
                pages.insert(unit_url(lp, module, unit), unit_page(lp, module, unit));
            }
        }
    }
    pages
}

// ========== 转换能力 ==========

/// 把正文转成大写
#[derive(Default)]
pub struct UppercaseCleaner {
    calls: AtomicUsize,
}

impl UppercaseCleaner {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextCleaner for UppercaseCleaner {
    async fn clean(&self, text: &str) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(text.to_uppercase())
    }
}

pub fn question(text: &str) -> Question {
    Question {
        question: text.to_string(),
        answers: vec!["A".to_string(), "B".to_string(), "C".to_string()],
        correct_answer: "A".to_string(),
        explanation: format!("explanation of {text}"),
    }
}

/// 按正文返回预设的题目；正文越靠前等待越久，用来检验并发时的顺序
#[derive(Default)]
pub struct ScriptedGenerator {
    responses: HashMap<String, Vec<Question>>,
    delays: HashMap<String, Duration>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, content: &str, questions: Vec<Question>) -> Self {
        self.responses.insert(content.to_string(), questions);
        self
    }

    pub fn delay(mut self, content: &str, delay: Duration) -> Self {
        self.delays.insert(content.to_string(), delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuestionGenerator for ScriptedGenerator {
    async fn questionify(&self, text: &str) -> AppResult<Questions> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(text) {
            tokio::time::sleep(*delay).await;
        }
        let questions = self
            .responses
            .get(text)
            .cloned()
            .unwrap_or_else(|| vec![question(text)]);
        Ok(Questions { questions })
    }
}

/// 总是失败的出题能力
pub struct FailingGenerator;

#[async_trait]
impl QuestionGenerator for FailingGenerator {
    async fn questionify(&self, text: &str) -> AppResult<Questions> {
        Err(LlmError::MalformedQuestions {
            response: text.to_string(),
            reason: "not json".to_string(),
        }
        .into())
    }
}
