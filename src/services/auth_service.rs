/// 认证服务
///
/// 注册、申请人登录、管理员登录、刷新令牌、退出
use crate::clients::ApiClient;
use crate::error::{AppResult, AuthError};
use crate::models::application::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::models::UserRole;
use crate::services::session::SessionState;
use crate::utils::{validate_national_id, validate_tracking_code};
use tracing::{info, warn};

const REGISTER_ENDPOINT: &str = "/api/auth/register/";
const LOGIN_ENDPOINT: &str = "/api/auth/login/";

#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// 注册新申请人
    ///
    /// # 返回
    /// 后端生成的追踪码和申请 ID（追踪码是之后登录的凭据）
    pub async fn register(&self, mut request: RegisterRequest) -> AppResult<RegisterResponse> {
        request.national_id = validate_national_id(&request.national_id)?;
        let response: RegisterResponse = self
            .client
            .post_anonymous(REGISTER_ENDPOINT, &request)
            .await?;
        info!(
            "✓ 注册成功: 申请 {} / 追踪码 {}",
            response.application_id, response.tracking_code
        );
        Ok(response)
    }

    /// 申请人登录（国民身份证号 + 追踪码）
    pub async fn login(&self, national_id: &str, tracking_code: &str) -> AppResult<LoginResponse> {
        let request = LoginRequest::Applicant {
            national_id: validate_national_id(national_id)?,
            tracking_code: validate_tracking_code(tracking_code)?,
        };
        let response: LoginResponse = self.client.post_anonymous(LOGIN_ENDPOINT, &request).await?;
        self.store(&response)?;
        info!("✓ 申请人登录成功: {}", response.user.full_name());
        Ok(response)
    }

    /// 管理员登录（国民身份证号 + 密码）
    ///
    /// 申请人账户和非员工账户会被拒绝，且不会写入会话
    pub async fn admin_login(&self, national_id: &str, password: &str) -> AppResult<LoginResponse> {
        let request = LoginRequest::Admin {
            national_id: validate_national_id(national_id)?,
            password: password.to_string(),
        };
        let response: LoginResponse = self.client.post_anonymous(LOGIN_ENDPOINT, &request).await?;

        if response.user.role == UserRole::Applicant {
            warn!("⚠️ 申请人账户尝试管理员登录: {}", response.user.national_id);
            return Err(AuthError::ApplicantOnAdminLogin.into());
        }
        if !response.user.is_staff {
            warn!("⚠️ 非员工账户尝试管理员登录: {}", response.user.national_id);
            return Err(AuthError::NotStaff.into());
        }

        self.store(&response)?;
        info!(
            "✓ 管理员登录成功: {} ({})",
            response.user.full_name(),
            response.user.role.label()
        );
        Ok(response)
    }

    /// 手动刷新访问令牌
    pub async fn refresh_token(&self) -> AppResult<String> {
        self.client.refresh_access_token().await
    }

    pub fn logout(&self) -> AppResult<()> {
        self.client.session().logout()?;
        info!("已退出登录");
        Ok(())
    }

    fn store(&self, response: &LoginResponse) -> AppResult<()> {
        self.client.session().login(SessionState {
            access: Some(response.access.clone()),
            refresh: Some(response.refresh.clone()),
            user: Some(response.user.clone()),
            application_id: response.application_id,
            tracking_code: response.tracking_code.clone(),
        })
    }
}
