//! 提交前检查
//!
//! 在完成度之外，还对专业选择做结构检查（优先级连续、数量上限、不重复）。

use super::catalog::{StepDefinition, StepKind};
use super::evaluator::{evaluate, missing_degrees, missing_document_types, CompletionState};
use crate::error::ProgressError;
use crate::models::ApplicationSnapshot;
use serde::Serialize;
use std::collections::HashSet;

/// 最多可选择的专业数
pub const MAX_PROGRAM_CHOICES: usize = 3;

/// 检查结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadinessReport {
    pub ready: bool,
    /// 按顺序渲染好的问题文本（直接展示给申请人）
    pub missing_items: Vec<String>,
    pub issues: Vec<ProgressError>,
    pub completion: CompletionState,
}

impl ReadinessReport {
    fn from_issues(issues: Vec<ProgressError>, completion: CompletionState) -> Self {
        Self {
            ready: issues.is_empty(),
            missing_items: issues.iter().map(ToString::to_string).collect(),
            issues,
            completion,
        }
    }

    /// 转成 `Result`，返回第一个问题
    pub fn ensure_ready(&self) -> Result<(), ProgressError> {
        match self.issues.first() {
            None => Ok(()),
            Some(issue) => Err(issue.clone()),
        }
    }
}

impl Serialize for ReadinessReport {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("ReadinessReport", 3)?;
        s.serialize_field("ready", &self.ready)?;
        s.serialize_field("missing_items", &self.missing_items)?;
        s.serialize_field("completion", &self.completion)?;
        s.end()
    }
}

fn step_detail(snapshot: &ApplicationSnapshot, kind: StepKind) -> Option<String> {
    match kind {
        StepKind::EducationRecords => {
            let missing = missing_degrees(snapshot);
            (!missing.is_empty()).then(|| {
                missing
                    .iter()
                    .map(|d| d.label())
                    .collect::<Vec<_>>()
                    .join("، ")
            })
        }
        StepKind::DocumentUpload => {
            let missing = missing_document_types(snapshot);
            (!missing.is_empty()).then(|| {
                missing
                    .iter()
                    .map(|t| t.label())
                    .collect::<Vec<_>>()
                    .join("، ")
            })
        }
        _ => None,
    }
}

/// 专业选择的结构检查
pub fn check_program_choices(snapshot: &ApplicationSnapshot) -> Vec<ProgressError> {
    let choices = &snapshot.program_choices;
    let mut issues = Vec::new();

    if choices.len() > MAX_PROGRAM_CHOICES {
        issues.push(ProgressError::TooManyProgramChoices {
            count: choices.len(),
            max: MAX_PROGRAM_CHOICES,
        });
    }

    let mut priorities: Vec<u32> = choices.iter().map(|c| c.priority).collect();
    priorities.sort_unstable();
    let dense = priorities
        .iter()
        .enumerate()
        .all(|(i, p)| *p as usize == i + 1);
    if !dense {
        issues.push(ProgressError::InvalidPriorityOrdering { priorities });
    }

    let mut seen = HashSet::new();
    for choice in choices {
        if !seen.insert(choice.program_id) {
            issues.push(ProgressError::DuplicateProgramChoice {
                program_id: choice.program_id,
            });
        }
    }

    issues
}

/// 判断申请是否可以提交
pub fn check_readiness(snapshot: &ApplicationSnapshot, steps: &[StepDefinition]) -> ReadinessReport {
    let completion = evaluate(snapshot, steps);

    let mut issues: Vec<ProgressError> = steps
        .iter()
        .filter(|step| !step.is_optional && !completion.is_complete(step.id))
        .map(|step| ProgressError::MissingRequiredStep {
            step_id: step.id,
            title: step.title.to_string(),
            detail: step_detail(snapshot, step.kind),
        })
        .collect();
    issues.extend(check_program_choices(snapshot));

    let report = ReadinessReport::from_issues(issues, completion);
    tracing::debug!(
        "申请 {} 提交检查: ready={}, 问题数={}",
        snapshot.application_id,
        report.ready,
        report.issues.len()
    );
    report
}
