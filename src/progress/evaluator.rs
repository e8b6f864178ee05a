//! 完成度判定
//!
//! 所有页面共用的唯一判定来源。纯函数，不做任何 I/O。

use super::catalog::{required_degrees, required_document_types, StepDefinition, StepKind};
use crate::models::{ApplicationSnapshot, DegreeLevel, DocumentType};
use serde::Serialize;

/// 单个步骤的完成情况
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepCompletion {
    pub step_id: u8,
    pub complete: bool,
}

/// 按目录顺序排列的完成情况 + 总进度百分比
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionState {
    pub steps: Vec<StepCompletion>,
    pub overall_percent: u8,
}

impl CompletionState {
    fn from_steps(steps: Vec<StepCompletion>) -> Self {
        let done = steps.iter().filter(|s| s.complete).count();
        let overall_percent = percent(done, steps.len());
        Self {
            steps,
            overall_percent,
        }
    }

    /// 某步骤是否完成；不在目录中的步骤视为未完成
    pub fn is_complete(&self, step_id: u8) -> bool {
        self.steps
            .iter()
            .any(|s| s.step_id == step_id && s.complete)
    }

    pub fn completed_count(&self) -> usize {
        self.steps.iter().filter(|s| s.complete).count()
    }

    /// 把某步骤标记为完成，返回是否发生变化
    pub(crate) fn set_complete(&mut self, step_id: u8) -> bool {
        let Some(entry) = self.steps.iter_mut().find(|s| s.step_id == step_id) else {
            return false;
        };
        if entry.complete {
            return false;
        }
        entry.complete = true;
        self.overall_percent = percent(self.completed_count(), self.steps.len());
        true
    }
}

/// round(100 * done / total)，0.5 向上取整
fn percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((200 * done + total) / (2 * total)).min(100) as u8
}

fn step_is_complete(snapshot: &ApplicationSnapshot, kind: StepKind) -> bool {
    match kind {
        StepKind::PersonalInfo => snapshot.personal_info.is_recorded(),
        StepKind::EducationRecords => missing_degrees(snapshot).is_empty(),
        StepKind::ResearchRecords => !snapshot.research_records.is_empty(),
        StepKind::DocumentUpload => missing_document_types(snapshot).is_empty(),
        StepKind::ProgramSelection => !snapshot.program_choices.is_empty(),
    }
}

/// 计算每个步骤的完成情况
pub fn evaluate(snapshot: &ApplicationSnapshot, steps: &[StepDefinition]) -> CompletionState {
    let state = CompletionState::from_steps(
        steps
            .iter()
            .map(|step| StepCompletion {
                step_id: step.id,
                complete: step_is_complete(snapshot, step.kind),
            })
            .collect(),
    );
    tracing::debug!(
        "申请 {} 完成度: {}/{} ({}%)",
        snapshot.application_id,
        state.completed_count(),
        state.steps.len(),
        state.overall_percent
    );
    state
}

/// 缺少学历记录的必需学历层次
pub fn missing_degrees(snapshot: &ApplicationSnapshot) -> Vec<DegreeLevel> {
    required_degrees(snapshot.round_type)
        .iter()
        .copied()
        .filter(|d| !snapshot.has_degree(*d))
        .collect()
}

/// 尚未上传的必需文件类型
pub fn missing_document_types(snapshot: &ApplicationSnapshot) -> Vec<DocumentType> {
    required_document_types(snapshot.round_type)
        .into_iter()
        .filter(|t| !snapshot.has_document(*t))
        .collect()
}
