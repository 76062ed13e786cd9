use serde::{Deserialize, Serialize};

/// 认证目录中的一行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// 认证代码（如 az-900）
    pub code: String,
    pub title: String,
    /// 认证首页（抓取的根 URL）
    pub url: String,
}

/// 认证目录（catalog.toml）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub certifications: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn find(&self, code: &str) -> Option<&CatalogEntry> {
        self.certifications
            .iter()
            .find(|entry| entry.code.eq_ignore_ascii_case(code))
    }

    /// 追加一行；代码已存在时不重复添加，返回是否追加
    pub fn push(&mut self, entry: CatalogEntry) -> bool {
        if self.find(&entry.code).is_some() {
            return false;
        }
        self.certifications.push(entry);
        true
    }
}
