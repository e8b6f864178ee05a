/// 申请服务
///
/// 负责申请的读取、各步骤数据的保存和最终提交。
/// 只做 HTTP 调用和少量前置检查，完成度判定交给 `progress` 模块。
use crate::clients::{ApiClient, ListResponse, UploadFile};
use crate::error::{AppResult, ProgressError};
use crate::models::application::{
    ChoiceCreateRequest, EducationRecordRequest, PersonalInfoUpdate, ResearchRecordCreateRequest,
    ResearchRecordCreated, ResearchRecordList, SubmitRequest,
};
use crate::models::{
    Application, ApplicationChoice, ApplicationDocument, ApplicationFilter, ApplicationSnapshot,
    DocumentType, EducationRecord, Gender, ResearchEntry, ResearchRecord, User,
};
use crate::progress::MAX_PROGRAM_CHOICES;
use serde_json::json;
use tracing::{debug, info, warn};

const MY_APPLICATION_ENDPOINT: &str = "/api/applications/my/";
const APPLICATIONS_ENDPOINT: &str = "/api/applications/";
const PROFILE_UPDATE_ENDPOINT: &str = "/api/accounts/profile/update/";
const PROFILE_ENDPOINT: &str = "/api/accounts/profile/";

fn application_endpoint(application_id: u64, tail: &str) -> String {
    format!("/api/applications/{}/{}", application_id, tail)
}

#[derive(Clone)]
pub struct ApplicationService {
    client: ApiClient,
}

impl ApplicationService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    // ========== 申请 ==========

    /// 当前申请人的申请
    pub async fn get_my_application(&self) -> AppResult<Application> {
        let application: Application = self.client.get(MY_APPLICATION_ENDPOINT).await?;
        if self.client.session().application_id() != Some(application.id) {
            self.client.session().set_application_id(application.id)?;
        }
        Ok(application)
    }

    pub async fn get_application(&self, application_id: u64) -> AppResult<Application> {
        self.client
            .get(&application_endpoint(application_id, ""))
            .await
    }

    /// 当前申请人自己的申请列表；管理员列表见 `ReviewService`
    pub async fn list_applications(
        &self,
        filter: &ApplicationFilter,
    ) -> AppResult<ListResponse<Application>> {
        self.client
            .get_with_query(APPLICATIONS_ENDPOINT, &filter.to_query())
            .await
    }

    /// 获取用于进度判定的快照
    ///
    /// 博士类招生在申请详情不含科研记录时，申请人会额外请求科研记录列表
    pub async fn get_snapshot(&self, application_id: u64) -> AppResult<ApplicationSnapshot> {
        let application = self.get_application(application_id).await?;
        self.snapshot_of(&application).await
    }

    /// 把已获取的申请转成快照
    pub async fn snapshot_of(&self, application: &Application) -> AppResult<ApplicationSnapshot> {
        let mut snapshot = ApplicationSnapshot::try_from(application)?;
        // 科研记录列表接口只对申请本人开放
        let is_applicant = self.client.session().is_applicant();

        if is_applicant && snapshot.round_type.is_phd() && snapshot.research_records.is_empty() {
            snapshot.research_records = self
                .list_research_records(application.id)
                .await?
                .into_iter()
                .map(|r| ResearchEntry {
                    record_type: r.record_type,
                    title: r.title,
                })
                .collect();
        }

        // 申请详情里没有申请人信息时，以当前用户资料为准
        if is_applicant && application.user().is_none() && !snapshot.personal_info.is_recorded() {
            match self.get_profile().await {
                Ok(profile) => {
                    snapshot.personal_info.gender =
                        profile.gender.as_deref().and_then(Gender::parse);
                    snapshot.personal_info.father_name = profile.father_name;
                    snapshot.personal_info.birth_year = profile.birth_year;
                }
                Err(e) => warn!("⚠️ 获取个人资料失败，个人信息按未填写处理: {}", e),
            }
        }

        debug!(
            "申请 {} 快照: 学历 {} / 科研 {} / 文件 {} / 专业 {}",
            snapshot.application_id,
            snapshot.education_records.len(),
            snapshot.research_records.len(),
            snapshot.documents.len(),
            snapshot.program_choices.len()
        );
        Ok(snapshot)
    }

    /// 最终提交
    pub async fn submit_application(
        &self,
        application_id: u64,
        confirm_accuracy: bool,
    ) -> AppResult<Application> {
        let application: Application = self
            .client
            .post(
                &application_endpoint(application_id, "submit/"),
                &SubmitRequest { confirm_accuracy },
            )
            .await?;
        info!(
            "📨 申请 {} 已提交，当前状态: {}",
            application_id,
            application.status.label()
        );
        Ok(application)
    }

    // ========== 个人信息 ==========

    pub async fn get_profile(&self) -> AppResult<User> {
        self.client.get(PROFILE_ENDPOINT).await
    }

    pub async fn update_personal_info(&self, update: &PersonalInfoUpdate) -> AppResult<User> {
        let user: User = self.client.patch(PROFILE_UPDATE_ENDPOINT, update).await?;
        info!("✓ 个人信息已保存");
        Ok(user)
    }

    // ========== 专业选择 ==========

    pub async fn list_choices(&self, application_id: u64) -> AppResult<Vec<ApplicationChoice>> {
        self.client
            .get_list(&application_endpoint(application_id, "choices/"))
            .await
    }

    /// 新增专业选择，优先级 = 现有数量 + 1；已满时不发送请求
    pub async fn add_choice(
        &self,
        application_id: u64,
        program_id: u64,
    ) -> AppResult<ApplicationChoice> {
        let existing = self.list_choices(application_id).await?;
        if existing.len() >= MAX_PROGRAM_CHOICES {
            return Err(ProgressError::TooManyProgramChoices {
                count: existing.len() + 1,
                max: MAX_PROGRAM_CHOICES,
            }
            .into());
        }
        if existing.iter().any(|c| c.program.id() == program_id) {
            return Err(ProgressError::DuplicateProgramChoice { program_id }.into());
        }

        let request = ChoiceCreateRequest {
            program_id,
            priority: existing.len() as u32 + 1,
        };
        let choice: ApplicationChoice = self
            .client
            .post(&application_endpoint(application_id, "choices/"), &request)
            .await?;
        info!("✓ 已添加专业 {} (优先级 {})", program_id, choice.priority);
        Ok(choice)
    }

    pub async fn update_choice_priority(
        &self,
        application_id: u64,
        choice_id: u64,
        priority: u32,
    ) -> AppResult<ApplicationChoice> {
        self.client
            .patch(
                &application_endpoint(application_id, &format!("choices/{}/", choice_id)),
                &json!({ "priority": priority }),
            )
            .await
    }

    pub async fn delete_choice(&self, application_id: u64, choice_id: u64) -> AppResult<()> {
        self.client
            .delete(&application_endpoint(
                application_id,
                &format!("choices/{}/", choice_id),
            ))
            .await
    }

    // ========== 学历记录 ==========

    pub async fn list_education_records(
        &self,
        application_id: u64,
    ) -> AppResult<Vec<EducationRecord>> {
        self.client
            .get_list(&application_endpoint(application_id, "education/"))
            .await
    }

    pub async fn add_education_record(
        &self,
        application_id: u64,
        request: &EducationRecordRequest,
    ) -> AppResult<EducationRecord> {
        let record: EducationRecord = self
            .client
            .post(&application_endpoint(application_id, "education/"), request)
            .await?;
        info!("✓ 已添加学历记录: {}", record.degree_level.label());
        Ok(record)
    }

    pub async fn update_education_record(
        &self,
        application_id: u64,
        record_id: u64,
        request: &EducationRecordRequest,
    ) -> AppResult<EducationRecord> {
        self.client
            .patch(
                &application_endpoint(application_id, &format!("education/{}/", record_id)),
                request,
            )
            .await
    }

    pub async fn delete_education_record(
        &self,
        application_id: u64,
        record_id: u64,
    ) -> AppResult<()> {
        self.client
            .delete(&application_endpoint(
                application_id,
                &format!("education/{}/", record_id),
            ))
            .await
    }

    // ========== 科研记录 ==========

    pub async fn list_research_records(
        &self,
        application_id: u64,
    ) -> AppResult<Vec<ResearchRecord>> {
        let list: ResearchRecordList = self
            .client
            .get(&application_endpoint(application_id, "research-records/"))
            .await?;
        Ok(list.into_records())
    }

    /// 新建科研记录，再从列表中按 `record_id` 和类型取回完整记录
    ///
    /// 不同类型的记录编号各自独立，所以匹配时同时比较类型
    pub async fn add_research_record(
        &self,
        application_id: u64,
        request: &ResearchRecordCreateRequest,
    ) -> AppResult<ResearchRecord> {
        let created: ResearchRecordCreated = self
            .client
            .post(
                &application_endpoint(application_id, "research-records/create/"),
                request,
            )
            .await?;
        info!("✓ 已添加科研记录 {} ({})", created.record_id, request.record_type);

        let record = self
            .list_research_records(application_id)
            .await?
            .into_iter()
            .find(|r| {
                r.id == created.record_id && r.record_type.eq_ignore_ascii_case(&request.record_type)
            });
        Ok(record.unwrap_or_else(|| {
            warn!(
                "⚠️ 列表中没有找到新建的科研记录 {}，只返回编号",
                created.record_id
            );
            ResearchRecord {
                id: created.record_id,
                record_type: request.record_type.clone(),
                title: None,
            }
        }))
    }

    pub async fn delete_research_record(
        &self,
        application_id: u64,
        record_type: &str,
        record_id: u64,
    ) -> AppResult<()> {
        self.client
            .delete(&application_endpoint(
                application_id,
                &format!(
                    "research-records/{}/{}/",
                    record_type.to_lowercase(),
                    record_id
                ),
            ))
            .await
    }

    // ========== 文件 ==========

    pub async fn list_documents(&self, application_id: u64) -> AppResult<Vec<ApplicationDocument>> {
        self.client
            .get_list(&application_endpoint(application_id, "documents/"))
            .await
    }

    pub async fn upload_document(
        &self,
        application_id: u64,
        doc_type: DocumentType,
        file: &UploadFile,
    ) -> AppResult<ApplicationDocument> {
        let document: ApplicationDocument = self
            .client
            .post_multipart(
                &application_endpoint(application_id, "documents/"),
                file,
                &[("type", doc_type.code().to_string())],
            )
            .await?;
        info!("✓ 已上传 {} ({})", doc_type.label(), file.file_name);
        Ok(document)
    }

    pub async fn delete_document(&self, application_id: u64, document_id: u64) -> AppResult<()> {
        self.client
            .delete(&application_endpoint(
                application_id,
                &format!("documents/{}/", document_id),
            ))
            .await
    }

    /// 替换某类文件：先删除同类型的旧文件，再上传新文件
    pub async fn replace_document(
        &self,
        application_id: u64,
        doc_type: DocumentType,
        file: &UploadFile,
    ) -> AppResult<ApplicationDocument> {
        let existing = self.list_documents(application_id).await?;
        for old in existing.iter().filter(|d| d.doc_type == doc_type) {
            debug!("删除旧文件 {} ({})", old.id, doc_type.code());
            self.delete_document(application_id, old.id).await?;
        }
        self.upload_document(application_id, doc_type, file).await
    }
}
