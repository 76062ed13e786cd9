use std::path::Path;

use tokio::fs;

use crate::error::{AppError, AppResult};
use crate::models::document::Document;

/// 按扩展名选择格式：`.json` 为 JSON，其余（`.yml` / `.yaml`）为 YAML
fn is_json(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("json")
}

/// 从文件加载文档并按类型校验
pub async fn load_document<T: Document>(path: &Path) -> AppResult<T> {
    let path_str = path.display().to_string();
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(&path_str, e))?;

    let document = if is_json(path) {
        T::from_json(&content, &path_str)?
    } else {
        T::from_yaml(&content, &path_str)?
    };

    tracing::debug!("已加载 {}: {}", T::KIND, path_str);
    Ok(document)
}

/// 将文档写入文件（自动创建父目录）
pub async fn save_document<T: Document>(path: &Path, document: &T) -> AppResult<()> {
    let path_str = path.display().to_string();
    let content = if is_json(path) {
        document.to_json_pretty()?
    } else {
        document.to_yaml()?
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::file_write_failed(parent.display().to_string(), e))?;
    }
    fs::write(path, content)
        .await
        .map_err(|e| AppError::file_write_failed(&path_str, e))?;

    tracing::info!(
        "✓ 已写入 {}: {}",
        T::KIND,
        path.file_name().unwrap_or_default().to_string_lossy()
    );
    Ok(())
}
