//! 后端 REST 接口的数据结构（传输层 DTO）
//!
//! 字段尽量宽松（`#[serde(default)]`），因为不同接口返回的字段并不一致。

use super::document::DocumentType;
use super::round::{DegreeLevel, Gender, RoundType};
use super::status::ApplicationStatus;
use super::user::User;
use serde::{Deserialize, Serialize};

/// 申请（پرونده ثبت‌نام）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: u64,
    #[serde(default)]
    pub tracking_code: String,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round: Option<RoundInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicant: Option<ApplicantInfo>,
    #[serde(default, alias = "selected_programs", alias = "program_choices")]
    pub choices: Vec<ApplicationChoice>,
    #[serde(default)]
    pub education_records: Vec<EducationRecord>,
    #[serde(default)]
    pub research_records: Vec<ResearchRecord>,
    #[serde(default)]
    pub documents: Vec<ApplicationDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<String>,
}

impl Application {
    /// 招生类型代码：优先 `round_type`，否则取 `round.type`
    pub fn round_type_code(&self) -> Option<&str> {
        self.round_type
            .as_deref()
            .or_else(|| self.round.as_ref().map(|r| r.round_type.as_str()))
    }

    pub fn user(&self) -> Option<&User> {
        self.applicant.as_ref().map(|a| &a.user)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundInfo {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", alias = "round_type")]
    pub round_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicantInfo {
    pub user: User,
}

/// 专业（رشته）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree_level: Option<DegreeLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faculty_name: Option<String>,
}

/// 专业字段有时是完整对象，有时只是 ID
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProgramRef {
    Detailed(Program),
    Id(u64),
}

impl ProgramRef {
    pub fn id(&self) -> u64 {
        match self {
            ProgramRef::Detailed(p) => p.id,
            ProgramRef::Id(id) => *id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            ProgramRef::Detailed(p) if !p.name.is_empty() => Some(&p.name),
            _ => None,
        }
    }
}

/// 专业选择（1 = 第一志愿）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationChoice {
    pub id: u64,
    pub program: ProgramRef,
    pub priority: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admission_status: Option<String>,
}

/// 学历记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationRecord {
    pub id: u64,
    pub degree_level: DegreeLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub field_of_study: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub university_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graduation_year: Option<u32>,
}

/// 科研记录（论文、专利、获奖……）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchRecord {
    pub id: u64,
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(default, alias = "title_fa", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// 科研记录列表：汇总对象 `{records: [...]}` 或裸数组
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ResearchRecordList {
    Unified {
        records: Vec<ResearchRecord>,
        #[serde(default)]
        total_score: Option<f64>,
    },
    Plain(Vec<ResearchRecord>),
}

impl ResearchRecordList {
    pub fn into_records(self) -> Vec<ResearchRecord> {
        match self {
            ResearchRecordList::Unified { records, .. } => records,
            ResearchRecordList::Plain(records) => records,
        }
    }
}

/// 已上传的文件
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationDocument {
    pub id: u64,
    #[serde(rename = "type", alias = "doc_type", alias = "document_type")]
    pub doc_type: DocumentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_at: Option<String>,
}

// ========== 请求体 ==========

#[derive(Debug, Clone, Serialize)]
pub struct ChoiceCreateRequest {
    pub program_id: u64,
    pub priority: u32,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct PersonalInfoUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub father_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_place: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub military_status: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EducationRecordRequest {
    pub degree_level: DegreeLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university_id: Option<u64>,
    pub field_of_study: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpa: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graduation_year: Option<u32>,
}

/// 科研记录的具体字段随类型变化，原样透传
#[derive(Debug, Clone, Serialize)]
pub struct ResearchRecordCreateRequest {
    #[serde(rename = "type")]
    pub record_type: String,
    pub data: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResearchRecordCreated {
    pub record_id: u64,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitRequest {
    pub confirm_accuracy: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub national_id: String,
    pub first_name: String,
    pub last_name: String,
    pub mobile: String,
    pub email: String,
    pub round_type: RoundType,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: String,
    pub tracking_code: String,
    pub application_id: u64,
    pub user_id: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum LoginRequest {
    Applicant {
        national_id: String,
        tracking_code: String,
    },
    Admin {
        national_id: String,
        password: String,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: String,
    pub access: String,
    pub refresh: String,
    pub user: User,
    #[serde(default)]
    pub application_id: Option<u64>,
    #[serde(default)]
    pub tracking_code: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenRefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenRefreshResponse {
    pub access: String,
}

/// 大学审核结论；`ApprovedWithDefect` 会把申请退回给申请人修改
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UniversityDecision {
    Approved,
    ApprovedWithDefect,
    Rejected,
}

#[derive(Debug, Clone, Serialize)]
pub struct UniversityReviewRequest {
    pub review_status: UniversityDecision,
    pub comment: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub defects: Vec<String>,
}

/// 学院最终结论
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FacultyDecision {
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize)]
pub struct FacultyReviewRequest {
    pub decision: FacultyDecision,
    pub comment: String,
}

/// 管理员列表查询条件
#[derive(Debug, Clone, Default)]
pub struct ApplicationFilter {
    pub search: Option<String>,
    pub status: Option<String>,
    pub round_type: Option<RoundType>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl ApplicationFilter {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(search) = &self.search {
            params.push(("search", search.clone()));
        }
        if let Some(status) = &self.status {
            params.push(("status", status.clone()));
        }
        if let Some(round_type) = self.round_type {
            params.push(("round_type", round_type.code().to_string()));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            params.push(("page_size", page_size.to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_application_reads_nested_round_type() {
        let app: Application = serde_json::from_value(json!({
            "id": 7,
            "tracking_code": "AB12CD34EF",
            "status": "DRAFT",
            "round": {"id": 1, "title": "1404", "type": "PHD_EXAM"},
            "documents": [{"id": 1, "type": "BSC_CERT"}],
            "choices": [{"id": 3, "program": 42, "priority": 1}]
        }))
        .unwrap();

        assert_eq!(app.round_type_code(), Some("PHD_EXAM"));
        assert_eq!(app.status, ApplicationStatus::New);
        assert_eq!(app.documents[0].doc_type, DocumentType::BscCertificate);
        assert_eq!(app.choices[0].program.id(), 42);
        assert!(app.education_records.is_empty());
    }

    #[test]
    fn test_document_type_field_aliases() {
        let doc: ApplicationDocument =
            serde_json::from_value(json!({"id": 2, "document_type": "NATIONAL_CARD"})).unwrap();
        assert_eq!(doc.doc_type, DocumentType::NationalCard);
        let doc: ApplicationDocument =
            serde_json::from_value(json!({"id": 3, "doc_type": "PERSONAL_PHOTO"})).unwrap();
        assert_eq!(doc.doc_type, DocumentType::PersonalPhoto);
    }

    #[test]
    fn test_choice_with_detailed_program() {
        let choice: ApplicationChoice = serde_json::from_value(json!({
            "id": 9,
            "program": {"id": 11, "name": "مهندسی کامپیوتر", "code": "CE"},
            "priority": 2
        }))
        .unwrap();
        assert_eq!(choice.program.id(), 11);
        assert_eq!(choice.program.name(), Some("مهندسی کامپیوتر"));
    }

    #[test]
    fn test_filter_query_skips_empty_fields() {
        let filter = ApplicationFilter {
            round_type: Some(RoundType::PhdTalent),
            page: Some(2),
            ..Default::default()
        };
        assert_eq!(
            filter.to_query(),
            vec![("round_type", "PHD_TALENT".to_string()), ("page", "2".to_string())]
        );
    }
}
