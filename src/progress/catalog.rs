//! 步骤目录
//!
//! 按招生类型生成注册向导的步骤列表。步骤 ID 固定，不随目录内容变化，
//! 所以硕士类招生的目录是 1、2、4、5。

use crate::error::ProgressError;
use crate::models::{DegreeLevel, DocumentType, RoundType};
use serde::Serialize;

/// 步骤种类（决定完成判定规则）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepKind {
    PersonalInfo,
    EducationRecords,
    ResearchRecords,
    DocumentUpload,
    ProgramSelection,
}

/// 向导中的一个步骤
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepDefinition {
    pub id: u8,
    pub kind: StepKind,
    pub title: &'static str,
    pub description: &'static str,
    pub is_optional: bool,
    pub applies_to: &'static [RoundType],
}

const ALL_ROUNDS: &[RoundType] = &RoundType::ALL;
const PHD_ROUNDS: &[RoundType] = &[RoundType::PhdTalent, RoundType::PhdExam];

struct StepTemplate {
    id: u8,
    kind: StepKind,
    title: &'static str,
    description: &'static str,
    applies_to: &'static [RoundType],
    optional_for: &'static [RoundType],
}

/// 目录表，按显示顺序排列
const STEP_TABLE: [StepTemplate; 5] = [
    StepTemplate {
        id: 1,
        kind: StepKind::PersonalInfo,
        title: "مشخصات شخصی",
        description: "تکمیل اطلاعات فردی و شناسنامه‌ای",
        applies_to: ALL_ROUNDS,
        optional_for: &[],
    },
    StepTemplate {
        id: 2,
        kind: StepKind::EducationRecords,
        title: "سوابق تحصیلی",
        description: "ثبت مدارک و سوابق تحصیلی",
        applies_to: ALL_ROUNDS,
        optional_for: &[],
    },
    StepTemplate {
        id: 3,
        kind: StepKind::ResearchRecords,
        title: "سوابق پژوهشی",
        description: "ثبت مقالات، اختراعات و سایر سوابق",
        applies_to: PHD_ROUNDS,
        optional_for: &[RoundType::PhdExam],
    },
    StepTemplate {
        id: 4,
        kind: StepKind::DocumentUpload,
        title: "بارگذاری مدارک",
        description: "آپلود مدارک شناسایی و تحصیلی",
        applies_to: ALL_ROUNDS,
        optional_for: &[],
    },
    StepTemplate {
        id: 5,
        kind: StepKind::ProgramSelection,
        title: "انتخاب رشته",
        description: "انتخاب حداکثر 3 رشته به ترتیب اولویت",
        applies_to: ALL_ROUNDS,
        optional_for: &[],
    },
];

/// 生成某招生类型的有序步骤列表
pub fn build_steps(round_type: RoundType) -> Vec<StepDefinition> {
    STEP_TABLE
        .iter()
        .filter(|t| t.applies_to.contains(&round_type))
        .map(|t| StepDefinition {
            id: t.id,
            kind: t.kind,
            title: t.title,
            description: t.description,
            is_optional: t.optional_for.contains(&round_type),
            applies_to: t.applies_to,
        })
        .collect()
}

/// 从线上字符串生成步骤列表
pub fn build_steps_for(raw_round_type: &str) -> Result<Vec<StepDefinition>, ProgressError> {
    let round_type: RoundType = raw_round_type.parse()?;
    Ok(build_steps(round_type))
}

/// 必须提供学历记录的学历层次
pub fn required_degrees(round_type: RoundType) -> &'static [DegreeLevel] {
    if round_type.is_phd() {
        &[DegreeLevel::Bsc, DegreeLevel::Msc]
    } else {
        &[DegreeLevel::Bsc]
    }
}

/// 必须上传的文件类型：身份证件 + 每个必需学历的成绩单和证书
pub fn required_document_types(round_type: RoundType) -> Vec<DocumentType> {
    let mut required = vec![DocumentType::PersonalPhoto, DocumentType::NationalCard];
    for &degree in required_degrees(round_type) {
        required.extend(DocumentType::transcript_for(degree));
        required.extend(DocumentType::certificate_for(degree));
    }
    required
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(steps: &[StepDefinition]) -> Vec<u8> {
        steps.iter().map(|s| s.id).collect()
    }

    #[test]
    fn test_ma_talent_has_no_research_step() {
        let steps = build_steps(RoundType::MaTalent);
        assert_eq!(ids(&steps), vec![1, 2, 4, 5]);
        assert!(steps.iter().all(|s| !s.is_optional));
    }

    #[test]
    fn test_olympiad_matches_ma_layout() {
        assert_eq!(ids(&build_steps(RoundType::Olympiad)), vec![1, 2, 4, 5]);
    }

    #[test]
    fn test_phd_talent_research_is_mandatory() {
        let steps = build_steps(RoundType::PhdTalent);
        assert_eq!(ids(&steps), vec![1, 2, 3, 4, 5]);
        let research = steps.iter().find(|s| s.id == 3).unwrap();
        assert_eq!(research.kind, StepKind::ResearchRecords);
        assert!(!research.is_optional);
    }

    #[test]
    fn test_phd_exam_research_is_optional() {
        let steps = build_steps(RoundType::PhdExam);
        assert_eq!(ids(&steps), vec![1, 2, 3, 4, 5]);
        let optional: Vec<u8> = steps.iter().filter(|s| s.is_optional).map(|s| s.id).collect();
        assert_eq!(optional, vec![3]);
    }

    #[test]
    fn test_document_and_program_steps_are_always_last() {
        for round in RoundType::ALL {
            let steps = build_steps(round);
            let n = steps.len();
            assert_eq!(steps[n - 2].kind, StepKind::DocumentUpload);
            assert_eq!(steps[n - 1].kind, StepKind::ProgramSelection);
            assert!(steps[0].applies_to.contains(&round));
        }
    }

    #[test]
    fn test_build_steps_is_deterministic() {
        for round in RoundType::ALL {
            assert_eq!(build_steps(round), build_steps(round));
        }
    }

    #[test]
    fn test_build_steps_for_unknown_round() {
        assert_eq!(
            build_steps_for("MBA").unwrap_err(),
            ProgressError::InvalidRoundType("MBA".to_string())
        );
        assert_eq!(build_steps_for("PHD_EXAM").unwrap().len(), 5);
    }

    #[test]
    fn test_required_documents_scale_with_degrees() {
        assert_eq!(
            required_document_types(RoundType::MaTalent),
            vec![
                DocumentType::PersonalPhoto,
                DocumentType::NationalCard,
                DocumentType::BscTranscript,
                DocumentType::BscCertificate,
            ]
        );
        let phd = required_document_types(RoundType::PhdTalent);
        assert_eq!(phd.len(), 6);
        assert!(phd.contains(&DocumentType::MscCertificate));
    }
}
