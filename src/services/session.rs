//! 登录会话
//!
//! 进程内唯一的会话状态。所有组件通过 [`SessionContext`] 读取令牌和当前用户，
//! 不直接读写会话文件。

use crate::error::{AppError, AppResult, FileError};
use crate::models::{User, UserRole};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// 登录后保存的全部内容
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub access: Option<String>,
    pub refresh: Option<String>,
    pub user: Option<User>,
    pub application_id: Option<u64>,
    pub tracking_code: Option<String>,
}

/// 可在多个服务之间共享的会话句柄
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    state: Arc<RwLock<SessionState>>,
    store_path: Option<PathBuf>,
}

impl SessionContext {
    /// 只在内存中保存的会话
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// 带持久化文件的会话；文件存在时加载已有会话
    ///
    /// 文件内容损坏时记录警告并从空会话开始，下次登录会覆盖该文件
    pub fn with_store(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let state = if path.exists() {
            match read_state(&path) {
                Ok(state) => state,
                Err(AppError::File(FileError::JsonParseFailed { path: file, source })) => {
                    tracing::warn!("⚠️ 会话文件 {} 无法解析，需要重新登录: {}", file, source);
                    SessionState::default()
                }
                Err(e) => return Err(e),
            }
        } else {
            SessionState::default()
        };
        if state.access.is_some() {
            tracing::info!("✓ 已从 {} 恢复登录会话", path.display());
        }
        Ok(Self {
            state: Arc::new(RwLock::new(state)),
            store_path: Some(path),
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    fn persist(&self) -> AppResult<()> {
        let Some(path) = &self.store_path else {
            return Ok(());
        };
        let content = serde_json::to_string_pretty(&*self.read()).map_err(|e| {
            AppError::File(FileError::JsonParseFailed {
                path: path.display().to_string(),
                source: e,
            })
        })?;
        std::fs::write(path, content)
            .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))
    }

    /// 登录成功后写入会话
    pub fn login(&self, state: SessionState) -> AppResult<()> {
        *self.write() = state;
        self.persist()
    }

    /// 清空会话并删除会话文件
    pub fn logout(&self) -> AppResult<()> {
        *self.write() = SessionState::default();
        if let Some(path) = &self.store_path {
            if path.exists() {
                std::fs::remove_file(path)
                    .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;
            }
        }
        Ok(())
    }

    /// 刷新成功后只替换访问令牌
    pub fn set_access_token(&self, access: String) -> AppResult<()> {
        self.write().access = Some(access);
        self.persist()
    }

    pub fn set_application_id(&self, application_id: u64) -> AppResult<()> {
        self.write().application_id = Some(application_id);
        self.persist()
    }

    pub fn snapshot(&self) -> SessionState {
        self.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().access.is_some()
    }

    pub fn access_token(&self) -> Option<String> {
        self.read().access.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read().refresh.clone()
    }

    pub fn current_user(&self) -> Option<User> {
        self.read().user.clone()
    }

    pub fn application_id(&self) -> Option<u64> {
        self.read().application_id
    }

    pub fn tracking_code(&self) -> Option<String> {
        self.read().tracking_code.clone()
    }

    pub fn role(&self) -> Option<UserRole> {
        self.read().user.as_ref().map(|u| u.role)
    }

    pub fn is_applicant(&self) -> bool {
        self.role() == Some(UserRole::Applicant)
    }

    /// 任意一种管理员角色
    pub fn is_admin(&self) -> bool {
        matches!(self.role(), Some(role) if role != UserRole::Applicant)
    }

    pub fn is_superadmin(&self) -> bool {
        matches!(
            self.role(),
            Some(UserRole::Superadmin) | Some(UserRole::SystemAdmin)
        )
    }
}

fn read_state(path: &Path) -> AppResult<SessionState> {
    let display = path.display().to_string();
    let content =
        std::fs::read_to_string(path).map_err(|e| AppError::file_read_failed(&display, e))?;
    serde_json::from_str(&content).map_err(|e| {
        FileError::JsonParseFailed {
            path: display,
            source: e,
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn applicant() -> User {
        serde_json::from_value(serde_json::json!({
            "id": 4,
            "national_id": "0012345679",
            "first_name": "سارا",
            "last_name": "احمدی",
            "role": "APPLICANT"
        }))
        .unwrap()
    }

    #[test]
    fn test_login_and_logout_in_memory() {
        let session = SessionContext::in_memory();
        assert!(!session.is_authenticated());

        session
            .login(SessionState {
                access: Some("a".into()),
                refresh: Some("r".into()),
                user: Some(applicant()),
                application_id: Some(12),
                tracking_code: Some("ABCDE12345".into()),
            })
            .unwrap();

        assert!(session.is_authenticated());
        assert!(session.is_applicant());
        assert!(!session.is_admin());
        assert_eq!(session.application_id(), Some(12));

        let shared = session.clone();
        shared.set_access_token("b".into()).unwrap();
        assert_eq!(session.access_token().as_deref(), Some("b"));

        session.logout().unwrap();
        assert!(shared.current_user().is_none());
        assert!(shared.refresh_token().is_none());
    }

    #[test]
    fn test_session_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let session = SessionContext::with_store(&path).unwrap();
        session
            .login(SessionState {
                access: Some("token".into()),
                user: Some(applicant()),
                ..Default::default()
            })
            .unwrap();
        assert!(path.exists());

        let restored = SessionContext::with_store(&path).unwrap();
        assert_eq!(restored.access_token().as_deref(), Some("token"));
        assert_eq!(restored.current_user().map(|u| u.id), Some(4));

        restored.logout().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_corrupt_session_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{ not json").unwrap();

        let session = SessionContext::with_store(&path).unwrap();
        assert!(!session.is_authenticated());

        session
            .login(SessionState {
                access: Some("fresh".into()),
                ..Default::default()
            })
            .unwrap();
        let restored = SessionContext::with_store(&path).unwrap();
        assert_eq!(restored.access_token().as_deref(), Some("fresh"));
    }
}
