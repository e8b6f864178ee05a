//! 申请快照
//!
//! 进度模型的唯一输入。每次切换视图都从后端重新获取，模型本身不缓存。

use super::application::Application;
use super::document::DocumentType;
use super::round::{DegreeLevel, Gender, RoundType};
use super::status::ApplicationStatus;
use crate::error::ProgressError;
use serde::{Deserialize, Serialize};

/// 判断完成度所需的全部子实体（只读）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationSnapshot {
    #[serde(default)]
    pub application_id: u64,
    #[serde(default)]
    pub tracking_code: String,
    #[serde(default)]
    pub status: ApplicationStatus,
    pub round_type: RoundType,
    #[serde(default)]
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub education_records: Vec<EducationEntry>,
    #[serde(default)]
    pub research_records: Vec<ResearchEntry>,
    #[serde(default)]
    pub documents: Vec<DocumentEntry>,
    #[serde(default)]
    pub program_choices: Vec<ProgramChoice>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    #[serde(default)]
    pub father_name: Option<String>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub birth_year: Option<u32>,
}

impl PersonalInfo {
    /// 父名非空白且已填写性别
    pub fn is_recorded(&self) -> bool {
        let has_father_name = self
            .father_name
            .as_deref()
            .map(|n| !n.trim().is_empty())
            .unwrap_or(false);
        has_father_name && self.gender.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree_level: DegreeLevel,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchEntry {
    pub record_type: String,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentEntry {
    #[serde(default)]
    pub id: u64,
    pub doc_type: DocumentType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramChoice {
    #[serde(default)]
    pub id: u64,
    pub program_id: u64,
    pub priority: u32,
}

impl ApplicationSnapshot {
    /// 空快照（只有招生类型）
    pub fn new(round_type: RoundType) -> Self {
        Self {
            application_id: 0,
            tracking_code: String::new(),
            status: ApplicationStatus::New,
            round_type,
            personal_info: PersonalInfo::default(),
            education_records: Vec::new(),
            research_records: Vec::new(),
            documents: Vec::new(),
            program_choices: Vec::new(),
        }
    }

    pub fn has_degree(&self, degree: DegreeLevel) -> bool {
        self.education_records
            .iter()
            .any(|r| r.degree_level == degree)
    }

    pub fn has_document(&self, doc_type: DocumentType) -> bool {
        self.documents.iter().any(|d| d.doc_type == doc_type)
    }

    /// 按优先级排序的专业选择
    pub fn choices_by_priority(&self) -> Vec<&ProgramChoice> {
        let mut choices: Vec<&ProgramChoice> = self.program_choices.iter().collect();
        choices.sort_by_key(|c| c.priority);
        choices
    }
}

impl TryFrom<&Application> for ApplicationSnapshot {
    type Error = ProgressError;

    fn try_from(app: &Application) -> Result<Self, Self::Error> {
        let round_type: RoundType = app
            .round_type_code()
            .ok_or_else(|| ProgressError::InvalidRoundType(String::new()))?
            .parse()?;

        let personal_info = app
            .user()
            .map(|user| PersonalInfo {
                father_name: user.father_name.clone(),
                gender: user.gender.as_deref().and_then(Gender::parse),
                birth_year: user.birth_year,
            })
            .unwrap_or_default();

        Ok(Self {
            application_id: app.id,
            tracking_code: app.tracking_code.clone(),
            status: app.status,
            round_type,
            personal_info,
            education_records: app
                .education_records
                .iter()
                .map(|r| EducationEntry {
                    degree_level: r.degree_level,
                    status: r.status.clone(),
                })
                .collect(),
            research_records: app
                .research_records
                .iter()
                .map(|r| ResearchEntry {
                    record_type: r.record_type.clone(),
                    title: r.title.clone(),
                })
                .collect(),
            documents: app
                .documents
                .iter()
                .map(|d| DocumentEntry {
                    id: d.id,
                    doc_type: d.doc_type,
                })
                .collect(),
            program_choices: app
                .choices
                .iter()
                .map(|c| ProgramChoice {
                    id: c.id,
                    program_id: c.program.id(),
                    priority: c.priority,
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snapshot_from_application() {
        let app: Application = serde_json::from_value(json!({
            "id": 12,
            "tracking_code": "QWERTY1234",
            "status": "NEW",
            "round_type": "MA_TALENT",
            "applicant": {"user": {
                "id": 1, "national_id": "0012345679", "role": "APPLICANT",
                "father_name": "علی", "gender": "MALE"
            }},
            "education_records": [{"id": 1, "degree_level": "BSC", "status": "GRADUATED"}],
            "documents": [{"id": 5, "type": "PERSONAL_PHOTO"}],
            "choices": [{"id": 8, "program": {"id": 77, "name": "ریاضی"}, "priority": 1}]
        }))
        .unwrap();

        let snapshot = ApplicationSnapshot::try_from(&app).unwrap();
        assert_eq!(snapshot.application_id, 12);
        assert_eq!(snapshot.round_type, RoundType::MaTalent);
        assert!(snapshot.personal_info.is_recorded());
        assert!(snapshot.has_degree(DegreeLevel::Bsc));
        assert!(snapshot.has_document(DocumentType::PersonalPhoto));
        assert_eq!(snapshot.program_choices[0].program_id, 77);
    }

    #[test]
    fn test_snapshot_rejects_unknown_round_type() {
        let app: Application =
            serde_json::from_value(json!({"id": 1, "round_type": "KONKUR"})).unwrap();
        assert_eq!(
            ApplicationSnapshot::try_from(&app).unwrap_err(),
            ProgressError::InvalidRoundType("KONKUR".to_string())
        );
    }

    #[test]
    fn test_blank_father_name_is_not_recorded() {
        let info = PersonalInfo {
            father_name: Some("   ".to_string()),
            gender: Some(Gender::Female),
            birth_year: None,
        };
        assert!(!info.is_recorded());
    }
}
