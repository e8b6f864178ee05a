use serde::{Deserialize, Serialize};

/// 用户角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Applicant,
    UniversityAdmin,
    FacultyAdmin,
    SystemAdmin,
    Superadmin,
}

impl UserRole {
    pub fn label(self) -> &'static str {
        match self {
            UserRole::Applicant => "متقاضی",
            UserRole::UniversityAdmin => "مسئول دانشگاه",
            UserRole::FacultyAdmin => "مسئول دانشکده",
            UserRole::SystemAdmin => "مدیر سیستم",
            UserRole::Superadmin => "سوپر ادمین",
        }
    }
}

/// 后端返回的用户
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub national_id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<u32>,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub email: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_type: Option<String>,
    #[serde(default)]
    pub is_staff: bool,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}
