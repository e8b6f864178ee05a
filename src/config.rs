use crate::error::{AppError, AppResult, FileError};
use serde::Deserialize;
use std::path::Path;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 后端 API 根地址（不含末尾的 `/`）
    pub api_base_url: String,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    /// 管理员模式下同时评估的申请数量
    pub max_concurrent_requests: usize,
    /// 会话文件（相当于浏览器的 localStorage）
    pub session_file: Option<String>,
    // --- 申请人登录 ---
    pub national_id: Option<String>,
    pub tracking_code: Option<String>,
    // --- 管理员登录 ---
    pub admin_password: Option<String>,
    /// 指定要查看的申请 ID；为空时使用 `/api/applications/my/`
    pub application_id: Option<u64>,
    /// 本地快照文件（TOML / JSON），设置后不访问网络
    pub snapshot_file: Option<String>,
    /// 申请满足提交条件时自动提交
    pub auto_submit: bool,
    /// 管理员模式：批量统计所有申请的完成度
    pub admin_mode: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// tracing 过滤表达式
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            request_timeout_secs: 30,
            max_concurrent_requests: 8,
            session_file: Some(".admission_session.json".to_string()),
            national_id: None,
            tracking_code: None,
            admin_password: None,
            application_id: None,
            snapshot_file: None,
            auto_submit: false,
            admin_mode: false,
            verbose_logging: false,
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件加载配置，再用环境变量覆盖
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(&display, e))?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            AppError::File(FileError::TomlParseFailed {
                path: display.clone(),
                source: e,
            })
        })?;
        Ok(config.with_env_overrides())
    }

    /// `ADMISSION_CONFIG` 指向配置文件时读取文件，否则只用环境变量
    pub fn resolve() -> AppResult<Self> {
        match std::env::var("ADMISSION_CONFIG") {
            Ok(path) if !path.trim().is_empty() => Self::load(path),
            _ => Ok(Self::from_env()),
        }
    }

    fn with_env_overrides(self) -> Self {
        let default = self;
        Self {
            api_base_url: std::env::var("API_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(default.api_base_url),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            max_concurrent_requests: std::env::var("MAX_CONCURRENT_REQUESTS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_requests),
            session_file: std::env::var("SESSION_FILE").ok().or(default.session_file),
            national_id: std::env::var("NATIONAL_ID").ok().or(default.national_id),
            tracking_code: std::env::var("TRACKING_CODE").ok().or(default.tracking_code),
            admin_password: std::env::var("ADMIN_PASSWORD").ok().or(default.admin_password),
            application_id: std::env::var("APPLICATION_ID").ok().and_then(|v| v.parse().ok()).or(default.application_id),
            snapshot_file: std::env::var("SNAPSHOT_FILE").ok().or(default.snapshot_file),
            auto_submit: std::env::var("AUTO_SUBMIT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.auto_submit),
            admin_mode: std::env::var("ADMIN_MODE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.admin_mode),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            log_filter: std::env::var("RUST_LOG").unwrap_or(default.log_filter),
        }
    }
}
