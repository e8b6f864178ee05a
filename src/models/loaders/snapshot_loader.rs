use crate::error::{AppError, AppResult, FileError};
use crate::models::snapshot::ApplicationSnapshot;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 从 TOML / JSON 文件加载申请快照
pub async fn load_snapshot_file(path: &Path) -> AppResult<ApplicationSnapshot> {
    let display = path.display().to_string();
    if !path.exists() {
        return Err(FileError::NotFound { path: display }.into());
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(&display, e))?;

    match path.extension().and_then(|s| s.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|e| {
            FileError::TomlParseFailed {
                path: display,
                source: e,
            }
            .into()
        }),
        Some("json") => serde_json::from_str(&content).map_err(|e| {
            FileError::JsonParseFailed {
                path: display,
                source: e,
            }
            .into()
        }),
        _ => Err(FileError::UnsupportedFormat { path: display }.into()),
    }
}

/// 从文件夹中加载所有快照文件，解析失败的文件只记录警告
pub async fn load_all_snapshots(folder_path: &str) -> AppResult<Vec<(PathBuf, ApplicationSnapshot)>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        return Err(FileError::NotFound {
            path: folder_path.to_string(),
        }
        .into());
    }

    let mut entries = fs::read_dir(&folder)
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?;

    let mut paths = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?
    {
        let path = entry.path();
        if matches!(
            path.extension().and_then(|s| s.to_str()),
            Some("toml") | Some("json")
        ) {
            paths.push(path);
        }
    }
    paths.sort();

    let mut snapshots = Vec::new();
    for path in paths {
        tracing::info!(
            "正在加载快照: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );
        match load_snapshot_file(&path).await {
            Ok(snapshot) => snapshots.push((path, snapshot)),
            Err(e) => tracing::warn!("加载快照失败 {}: {}", path.display(), e),
        }
    }

    Ok(snapshots)
}
