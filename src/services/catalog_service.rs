//! 认证目录服务 - 业务能力层
//!
//! 只负责读写 catalog.toml：按代码查找认证标题和根 URL，
//! 可抓取性检查通过后追加新认证。

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{info, warn};

use crate::error::{AppError, AppResult, CatalogError};
use crate::models::{Catalog, CatalogEntry};

pub struct CatalogService {
    path: PathBuf,
}

impl CatalogService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取整个目录
    pub async fn load(&self) -> AppResult<Catalog> {
        let path_str = self.path.display().to_string();
        if !self.path.exists() {
            return Err(CatalogError::FileNotFound { path: path_str }.into());
        }
        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| AppError::file_read_failed(&path_str, e))?;
        let catalog: Catalog = toml::from_str(&content).map_err(|e| CatalogError::ParseFailed {
            path: path_str,
            reason: e.to_string(),
        })?;
        Ok(catalog)
    }

    /// 按认证代码查找
    pub async fn lookup(&self, code: &str) -> AppResult<CatalogEntry> {
        let catalog = self.load().await?;
        catalog.find(code).cloned().ok_or_else(|| {
            CatalogError::NotFound {
                code: code.to_string(),
            }
            .into()
        })
    }

    /// 列出所有认证
    pub async fn list(&self) -> AppResult<Vec<CatalogEntry>> {
        Ok(self.load().await?.certifications)
    }

    /// 追加认证；目录文件不存在时创建，代码已存在时跳过
    pub async fn append(&self, entry: CatalogEntry) -> AppResult<bool> {
        let mut catalog = match self.load().await {
            Ok(catalog) => catalog,
            Err(AppError::Catalog(CatalogError::FileNotFound { .. })) => Catalog::default(),
            Err(e) => return Err(e),
        };

        let code = entry.code.clone();
        if !catalog.push(entry) {
            warn!("⚠️ 认证 {} 已在目录中，跳过追加", code);
            return Ok(false);
        }

        let path_str = self.path.display().to_string();
        let content = toml::to_string(&catalog).map_err(|e| CatalogError::ParseFailed {
            path: path_str.clone(),
            reason: e.to_string(),
        })?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::file_write_failed(parent.display().to_string(), e))?;
        }
        fs::write(&self.path, content)
            .await
            .map_err(|e| AppError::file_write_failed(&path_str, e))?;

        info!("✓ 认证 {} 已加入目录: {}", code, path_str);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(code: &str) -> CatalogEntry {
        CatalogEntry {
            code: code.to_string(),
            title: format!("Exam {}", code.to_uppercase()),
            url: format!("https://learn.microsoft.com/en-us/credentials/certifications/exams/{}/", code),
        }
    }

    #[tokio::test]
    async fn test_append_then_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let service = CatalogService::new(dir.path().join("catalog.toml"));

        assert!(service.append(entry("az-900")).await.unwrap());
        assert!(service.append(entry("ai-102")).await.unwrap());

        let found = service.lookup("AZ-900").await.unwrap();
        assert_eq!(found, entry("az-900"));

        let codes: Vec<_> = service
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.code)
            .collect();
        assert_eq!(codes, ["az-900", "ai-102"]);
    }

    #[tokio::test]
    async fn test_append_skips_duplicate_code() {
        let dir = tempfile::tempdir().unwrap();
        let service = CatalogService::new(dir.path().join("catalog.toml"));

        assert!(service.append(entry("az-900")).await.unwrap());
        assert!(!service.append(entry("az-900")).await.unwrap());
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_lookup_unknown_code() {
        let dir = tempfile::tempdir().unwrap();
        let service = CatalogService::new(dir.path().join("catalog.toml"));
        service.append(entry("az-900")).await.unwrap();

        let result = service.lookup("dp-900").await;
        assert!(matches!(
            result,
            Err(AppError::Catalog(CatalogError::NotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn test_missing_catalog_file() {
        let dir = tempfile::tempdir().unwrap();
        let service = CatalogService::new(dir.path().join("missing.toml"));
        assert!(matches!(
            service.list().await,
            Err(AppError::Catalog(CatalogError::FileNotFound { .. }))
        ));
    }
}
