//! 课程树：Certification → LearningPath → Module → Unit
//!
//! 结构体字段名即文档字段名，子节点顺序就是页面上链接出现的顺序。

use serde::{Deserialize, Serialize};

/// 认证（根节点）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Certification {
    pub certification_content: Vec<LearningPath>,
}

/// 学习路径
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LearningPath {
    pub learning_path_title: String,
    pub modules_in_learning_path: Vec<Module>,
}

/// 模块
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Module {
    pub module_title: String,
    pub units_in_module: Vec<Unit>,
}

/// 单元（叶子节点）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Unit {
    pub unit_title: String,
    /// 抓取或加载前为 None
    pub unit_content: Option<String>,
}

/// 认证元数据，来自根 URL 和认证首页
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificationMetadata {
    /// 认证代码（如 az-900），URL 中没有时为 None
    pub code: Option<String>,
    pub title: String,
}

impl Certification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_learning_paths(learning_paths: Vec<LearningPath>) -> Self {
        Self {
            certification_content: learning_paths,
        }
    }

    /// 按阅读顺序遍历所有单元
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.certification_content.iter().flat_map(LearningPath::units)
    }

    /// 按阅读顺序可变地遍历所有单元
    pub fn units_mut(&mut self) -> impl Iterator<Item = &mut Unit> {
        self.certification_content
            .iter_mut()
            .flat_map(LearningPath::units_mut)
    }

    pub fn to_markdown(&self) -> String {
        self.certification_content
            .iter()
            .map(LearningPath::to_markdown)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl LearningPath {
    pub fn new(learning_path_title: impl Into<String>) -> Self {
        Self::with_modules(learning_path_title, Vec::new())
    }

    pub fn with_modules(learning_path_title: impl Into<String>, modules: Vec<Module>) -> Self {
        Self {
            learning_path_title: learning_path_title.into(),
            modules_in_learning_path: modules,
        }
    }

    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.modules_in_learning_path
            .iter()
            .flat_map(|module| module.units_in_module.iter())
    }

    pub fn units_mut(&mut self) -> impl Iterator<Item = &mut Unit> {
        self.modules_in_learning_path
            .iter_mut()
            .flat_map(|module| module.units_in_module.iter_mut())
    }

    pub fn to_markdown(&self) -> String {
        let mut sections = vec![format!("# {}", self.learning_path_title)];
        sections.extend(self.modules_in_learning_path.iter().map(Module::to_markdown));
        sections.join("\n\n")
    }
}

impl Module {
    pub fn new(module_title: impl Into<String>) -> Self {
        Self::with_units(module_title, Vec::new())
    }

    pub fn with_units(module_title: impl Into<String>, units: Vec<Unit>) -> Self {
        Self {
            module_title: module_title.into(),
            units_in_module: units,
        }
    }

    pub fn to_markdown(&self) -> String {
        let mut sections = vec![format!("## {}", self.module_title)];
        sections.extend(self.units_in_module.iter().map(Unit::to_markdown));
        sections.join("\n\n")
    }
}

impl Unit {
    pub fn new(unit_title: impl Into<String>) -> Self {
        Self {
            unit_title: unit_title.into(),
            unit_content: None,
        }
    }

    pub fn with_content(unit_title: impl Into<String>, unit_content: impl Into<String>) -> Self {
        Self {
            unit_title: unit_title.into(),
            unit_content: Some(unit_content.into()),
        }
    }

    /// 非空内容；未抓取或内容为空时返回 None
    pub fn content(&self) -> Option<&str> {
        self.unit_content.as_deref().filter(|c| !c.trim().is_empty())
    }

    pub fn to_markdown(&self) -> String {
        match self.content() {
            Some(content) => format!("### {}\n{}", self.unit_title, content),
            None => format!("### {}", self.unit_title),
        }
    }
}
