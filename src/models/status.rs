//! 申请状态
//!
//! 以后端 `Application.Status` 为准；页面上出现过的旧拼写
//! （`DRAFT`、`APPROVED`、`HAS_DEFICIENCY` 等）通过 alias 归一。

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    #[serde(alias = "DRAFT")]
    New,
    ProgramSelected,
    PersonalInfoCompleted,
    IdentityDocsUploaded,
    EduInfoCompleted,
    EduDocsUploaded,
    Submitted,
    #[serde(alias = "UNDER_REVIEW")]
    UnderUniversityReview,
    #[serde(alias = "APPROVED", alias = "ACCEPTED")]
    ApprovedByUniversity,
    #[serde(alias = "REJECTED")]
    RejectedByUniversity,
    #[serde(alias = "PENDING_DOCUMENTS", alias = "HAS_DEFICIENCY")]
    ReturnedForCorrection,
    UnderFacultyReview,
    FacultyReviewCompleted,
    Completed,
    Ineligible,
    Deleted,
    #[serde(other)]
    Unknown,
}

impl Default for ApplicationStatus {
    fn default() -> Self {
        ApplicationStatus::New
    }
}

impl ApplicationStatus {
    /// 申请人仍可编辑（注册阶段，或被退回修改）
    pub fn is_editable(self) -> bool {
        matches!(
            self,
            ApplicationStatus::New
                | ApplicationStatus::ProgramSelected
                | ApplicationStatus::PersonalInfoCompleted
                | ApplicationStatus::IdentityDocsUploaded
                | ApplicationStatus::EduInfoCompleted
                | ApplicationStatus::EduDocsUploaded
                | ApplicationStatus::ReturnedForCorrection
        )
    }

    /// 已经提交过（包括之后的所有审核状态）
    pub fn is_submitted(self) -> bool {
        !self.is_editable() && self != ApplicationStatus::Unknown
    }

    pub fn label(self) -> &'static str {
        match self {
            ApplicationStatus::New => "ثبت‌نام اولیه",
            ApplicationStatus::ProgramSelected => "رشته انتخاب شد",
            ApplicationStatus::PersonalInfoCompleted => "اطلاعات شخصی تکمیل شد",
            ApplicationStatus::IdentityDocsUploaded => "مدارک شناسایی آپلود شد",
            ApplicationStatus::EduInfoCompleted => "اطلاعات تحصیلی تکمیل شد",
            ApplicationStatus::EduDocsUploaded => "مدارک تحصیلی آپلود شد",
            ApplicationStatus::Submitted => "ارسال شده (منتظر بررسی)",
            ApplicationStatus::UnderUniversityReview => "در حال بررسی توسط مسئول دانشگاه",
            ApplicationStatus::ApprovedByUniversity => "تایید شده توسط مسئول دانشگاه",
            ApplicationStatus::RejectedByUniversity => "رد شده توسط مسئول دانشگاه",
            ApplicationStatus::ReturnedForCorrection => "برگشت برای اصلاح نواقص",
            ApplicationStatus::UnderFacultyReview => "در حال بررسی توسط مسئول دانشکده",
            ApplicationStatus::FacultyReviewCompleted => "بررسی دانشکده تکمیل شد",
            ApplicationStatus::Completed => "تکمیل شده",
            ApplicationStatus::Ineligible => "فاقد شرایط",
            ApplicationStatus::Deleted => "حذف شده",
            ApplicationStatus::Unknown => "نامشخص",
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
