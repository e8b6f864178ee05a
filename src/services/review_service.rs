/// 管理员审核服务
///
/// 大学负责人和学院负责人各有自己的列表和审核接口（`/api/admin/...`）。
/// 角色在本地先检查一次，申请状态是否允许审核由后端判断。
use crate::clients::{ApiClient, ListResponse};
use crate::error::{AppResult, AuthError};
use crate::models::application::{
    FacultyDecision, FacultyReviewRequest, UniversityDecision, UniversityReviewRequest,
};
use crate::models::{Application, ApplicationFilter, ApplicationStatus, UserRole};
use tracing::info;

const ADMIN_APPLICATION_ENDPOINT: &str = "/api/admin/applications/";

/// 管理员的审核范围
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminScope {
    University,
    Faculty,
}

impl AdminScope {
    /// 系统管理员和超级管理员按大学范围处理
    pub fn for_role(role: UserRole) -> Option<Self> {
        match role {
            UserRole::UniversityAdmin | UserRole::SystemAdmin | UserRole::Superadmin => {
                Some(AdminScope::University)
            }
            UserRole::FacultyAdmin => Some(AdminScope::Faculty),
            UserRole::Applicant => None,
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            AdminScope::University => "/api/admin/university/applications/",
            AdminScope::Faculty => "/api/admin/faculty/applications/",
        }
    }

    pub fn list_endpoint(self) -> &'static str {
        self.prefix()
    }

    pub fn review_endpoint(self, application_id: u64) -> String {
        format!("{}{}/review/", self.prefix(), application_id)
    }

    /// 该范围的负责人此时能否给出审核结论
    pub fn can_review(self, status: ApplicationStatus) -> bool {
        match self {
            AdminScope::University => matches!(
                status,
                ApplicationStatus::Submitted | ApplicationStatus::UnderUniversityReview
            ),
            AdminScope::Faculty => matches!(
                status,
                ApplicationStatus::ApprovedByUniversity | ApplicationStatus::UnderFacultyReview
            ),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AdminScope::University => "مسئول دانشگاه",
            AdminScope::Faculty => "مسئول دانشکده",
        }
    }
}

#[derive(Clone)]
pub struct ReviewService {
    client: ApiClient,
}

impl ReviewService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// 当前会话对应的审核范围
    pub fn scope(&self) -> AppResult<AdminScope> {
        let role = self.client.session().role().ok_or(AuthError::NoSession)?;
        AdminScope::for_role(role).ok_or_else(|| AuthError::ReviewNotAllowed(role.label()).into())
    }

    /// 按角色选择列表接口
    pub async fn list_applications(
        &self,
        filter: &ApplicationFilter,
    ) -> AppResult<ListResponse<Application>> {
        let scope = self.scope()?;
        self.client
            .get_with_query(scope.list_endpoint(), &filter.to_query())
            .await
    }

    /// 管理员视角的申请详情（包含学历、文件和专业选择）
    pub async fn get_application(&self, application_id: u64) -> AppResult<Application> {
        self.scope()?;
        self.client
            .get(&format!("{}{}/", ADMIN_APPLICATION_ENDPOINT, application_id))
            .await
    }

    /// 大学负责人审核
    ///
    /// # 参数
    /// - `defects`: 只在 `ApprovedWithDefect` 时有意义，会随退回一起发给申请人
    ///
    /// # 返回
    /// 审核后的申请
    pub async fn university_review(
        &self,
        application_id: u64,
        decision: UniversityDecision,
        comment: &str,
        defects: Vec<String>,
    ) -> AppResult<Application> {
        let scope = self.scope()?;
        if scope != AdminScope::University {
            return Err(AuthError::ReviewNotAllowed(scope.label()).into());
        }
        let request = UniversityReviewRequest {
            review_status: decision,
            comment: comment.to_string(),
            defects,
        };
        let application: Application = self
            .client
            .post(&AdminScope::University.review_endpoint(application_id), &request)
            .await?;
        info!(
            "✓ 申请 {} 大学审核完成: {:?} → {}",
            application_id,
            decision,
            application.status.label()
        );
        Ok(application)
    }

    pub async fn approve(&self, application_id: u64, comment: &str) -> AppResult<Application> {
        self.university_review(application_id, UniversityDecision::Approved, comment, Vec::new())
            .await
    }

    /// 退回申请人修改
    pub async fn return_for_correction(
        &self,
        application_id: u64,
        comment: &str,
        defects: Vec<String>,
    ) -> AppResult<Application> {
        self.university_review(
            application_id,
            UniversityDecision::ApprovedWithDefect,
            comment,
            defects,
        )
        .await
    }

    pub async fn reject(&self, application_id: u64, comment: &str) -> AppResult<Application> {
        self.university_review(application_id, UniversityDecision::Rejected, comment, Vec::new())
            .await
    }

    /// 学院负责人的最终结论；超级管理员也可以执行
    pub async fn faculty_review(
        &self,
        application_id: u64,
        decision: FacultyDecision,
        comment: &str,
    ) -> AppResult<Application> {
        let scope = self.scope()?;
        if scope != AdminScope::Faculty && !self.client.session().is_superadmin() {
            return Err(AuthError::ReviewNotAllowed(scope.label()).into());
        }
        let request = FacultyReviewRequest {
            decision,
            comment: comment.to_string(),
        };
        let application: Application = self
            .client
            .post(&AdminScope::Faculty.review_endpoint(application_id), &request)
            .await?;
        info!(
            "✓ 申请 {} 学院审核完成: {:?} → {}",
            application_id,
            decision,
            application.status.label()
        );
        Ok(application)
    }
}
