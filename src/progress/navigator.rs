//! 注册向导导航
//!
//! 持有当前快照和完成情况。真正的提交由异步层完成，
//! 提交成功后调用 [`WizardNavigator::mark_submitted`] 进入终止状态。

use super::catalog::StepDefinition;
use super::evaluator::{evaluate, CompletionState};
use super::readiness::{check_readiness, ReadinessReport};
use crate::error::ProgressError;
use crate::models::ApplicationSnapshot;

/// `next()` 的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    /// 已前进到该索引
    Advanced(usize),
    /// 当前步骤是必填且未完成，停留在原地
    Blocked(ProgressError),
    /// 位于最后一步且可以提交
    ReadyToSubmit,
    /// 位于最后一步但仍有问题
    NotReady(ReadinessReport),
}

#[derive(Debug, Clone)]
pub struct WizardNavigator {
    steps: Vec<StepDefinition>,
    snapshot: ApplicationSnapshot,
    completion: CompletionState,
    current_index: usize,
    submitted: bool,
}

impl WizardNavigator {
    /// 从第一个未完成的步骤开始；全部完成时停在最后一步
    pub fn new(steps: Vec<StepDefinition>, snapshot: ApplicationSnapshot) -> Self {
        let completion = evaluate(&snapshot, &steps);
        let current_index = steps
            .iter()
            .position(|s| !completion.is_complete(s.id))
            .unwrap_or_else(|| steps.len().saturating_sub(1));
        let submitted = snapshot.status.is_submitted();

        Self {
            steps,
            snapshot,
            completion,
            current_index,
            submitted,
        }
    }

    fn ensure_open(&self) -> Result<(), ProgressError> {
        if self.submitted {
            Err(ProgressError::AlreadySubmitted)
        } else {
            Ok(())
        }
    }

    pub fn next(&mut self) -> Result<NavOutcome, ProgressError> {
        self.ensure_open()?;
        let Some(step) = self.steps.get(self.current_index) else {
            return Err(ProgressError::StepOutOfRange {
                index: self.current_index,
                len: self.steps.len(),
            });
        };

        if !step.is_optional && !self.completion.is_complete(step.id) {
            return Ok(NavOutcome::Blocked(ProgressError::MissingRequiredStep {
                step_id: step.id,
                title: step.title.to_string(),
                detail: None,
            }));
        }

        if self.current_index + 1 < self.steps.len() {
            self.current_index += 1;
            return Ok(NavOutcome::Advanced(self.current_index));
        }

        let report = check_readiness(&self.snapshot, &self.steps);
        if report.ready {
            Ok(NavOutcome::ReadyToSubmit)
        } else {
            Ok(NavOutcome::NotReady(report))
        }
    }

    /// 后退一步，第一步时保持不动
    pub fn previous(&mut self) -> Result<usize, ProgressError> {
        self.ensure_open()?;
        self.current_index = self.current_index.saturating_sub(1);
        Ok(self.current_index)
    }

    /// 直接跳转（标签页点击），不检查完成度
    pub fn jump_to(&mut self, index: usize) -> Result<usize, ProgressError> {
        self.ensure_open()?;
        if index >= self.steps.len() {
            return Err(ProgressError::StepOutOfRange {
                index,
                len: self.steps.len(),
            });
        }
        self.current_index = index;
        Ok(index)
    }

    /// 只更新导航器自己的完成情况，用于控制前进
    ///
    /// 提交前检查始终以快照为准：最后一步的 `next()` 和 [`Self::readiness`]
    /// 读取的是快照，不是这里的标记。步骤数据保存后应先 [`Self::refresh`]。
    pub fn mark_complete(&mut self, step_id: u8) -> Result<(), ProgressError> {
        self.ensure_open()?;
        if !self.steps.iter().any(|s| s.id == step_id) {
            return Err(ProgressError::UnknownStep(step_id));
        }
        if self.completion.set_complete(step_id) {
            tracing::debug!("步骤 {} 标记为完成", step_id);
        }
        Ok(())
    }

    /// 用新快照替换完成情况（后端可能撤销某步骤）
    ///
    /// 提交状态同样由快照决定：已提交的申请被退回修改后会重新打开
    pub fn refresh(&mut self, snapshot: ApplicationSnapshot) -> Result<(), ProgressError> {
        self.completion = evaluate(&snapshot, &self.steps);
        self.submitted = snapshot.status.is_submitted();
        self.snapshot = snapshot;
        Ok(())
    }

    pub fn mark_submitted(&mut self) {
        self.submitted = true;
    }

    /// 对当前快照做提交前检查
    pub fn readiness(&self) -> ReadinessReport {
        check_readiness(&self.snapshot, &self.steps)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_step(&self) -> Option<&StepDefinition> {
        self.steps.get(self.current_index)
    }

    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    pub fn snapshot(&self) -> &ApplicationSnapshot {
        &self.snapshot
    }

    pub fn completion(&self) -> &CompletionState {
        &self.completion
    }

    pub fn progress_percent(&self) -> u8 {
        self.completion.overall_percent
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ApplicationStatus, DegreeLevel, DocumentEntry, EducationEntry, Gender, ProgramChoice,
        RoundType,
    };
    use crate::progress::catalog::{build_steps, required_document_types};

    fn navigator(snapshot: ApplicationSnapshot) -> WizardNavigator {
        WizardNavigator::new(build_steps(snapshot.round_type), snapshot)
    }

    fn with_personal_info(mut s: ApplicationSnapshot) -> ApplicationSnapshot {
        s.personal_info.father_name = Some("رضا".to_string());
        s.personal_info.gender = Some(Gender::Male);
        s
    }

    fn complete_ma() -> ApplicationSnapshot {
        let mut s = with_personal_info(ApplicationSnapshot::new(RoundType::MaTalent));
        s.education_records.push(EducationEntry {
            degree_level: DegreeLevel::Bsc,
            status: None,
        });
        for t in required_document_types(RoundType::MaTalent) {
            s.documents.push(DocumentEntry { id: 0, doc_type: t });
        }
        s.program_choices.push(ProgramChoice {
            id: 1,
            program_id: 3,
            priority: 1,
        });
        s
    }

    #[test]
    fn test_starts_at_first_incomplete_step() {
        let nav = navigator(with_personal_info(ApplicationSnapshot::new(RoundType::MaTalent)));
        assert_eq!(nav.current_index(), 1);
        assert_eq!(nav.current_step().map(|s| s.id), Some(2));
        assert_eq!(nav.progress_percent(), 25);
    }

    #[test]
    fn test_starts_at_last_step_when_all_complete() {
        let nav = navigator(complete_ma());
        assert_eq!(nav.current_index(), 3);
        assert!(!nav.is_submitted());
    }

    #[test]
    fn test_next_blocks_on_incomplete_mandatory_step() {
        let mut nav = navigator(ApplicationSnapshot::new(RoundType::MaTalent));
        let outcome = nav.next().unwrap();
        match outcome {
            NavOutcome::Blocked(err) => {
                assert_eq!(err.to_string(), "مرحله «مشخصات شخصی» تکمیل نشده است");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn test_next_skips_over_optional_step() {
        let mut s = with_personal_info(ApplicationSnapshot::new(RoundType::PhdExam));
        s.education_records = vec![
            EducationEntry {
                degree_level: DegreeLevel::Bsc,
                status: None,
            },
            EducationEntry {
                degree_level: DegreeLevel::Msc,
                status: None,
            },
        ];
        let mut nav = navigator(s);
        // 研究记录为空，但对 PHD_EXAM 是可选步骤
        assert_eq!(nav.current_index(), 2);
        assert_eq!(nav.next().unwrap(), NavOutcome::Advanced(3));
        assert!(matches!(nav.next().unwrap(), NavOutcome::Blocked(_)));
    }

    #[test]
    fn test_next_on_last_step_checks_readiness() {
        let mut nav = navigator(complete_ma());
        assert_eq!(nav.next().unwrap(), NavOutcome::ReadyToSubmit);
        assert_eq!(nav.current_index(), 3);

        let mut s = complete_ma();
        s.program_choices.push(ProgramChoice {
            id: 2,
            program_id: 4,
            priority: 1,
        });
        let mut nav = navigator(s);
        match nav.next().unwrap() {
            NavOutcome::NotReady(report) => assert!(!report.ready),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_previous_and_jump() {
        let mut nav = navigator(ApplicationSnapshot::new(RoundType::PhdTalent));
        assert_eq!(nav.previous().unwrap(), 0);
        assert_eq!(nav.jump_to(4).unwrap(), 4);
        assert_eq!(nav.previous().unwrap(), 3);
        assert_eq!(
            nav.jump_to(5),
            Err(ProgressError::StepOutOfRange { index: 5, len: 5 })
        );
        assert_eq!(nav.current_index(), 3);
        assert_eq!(nav.progress_percent(), 0);
    }

    #[test]
    fn test_mark_complete_unblocks_next() {
        let mut nav = navigator(ApplicationSnapshot::new(RoundType::MaTalent));
        nav.mark_complete(1).unwrap();
        nav.mark_complete(1).unwrap();
        assert_eq!(nav.progress_percent(), 25);
        assert_eq!(nav.next().unwrap(), NavOutcome::Advanced(1));
        assert_eq!(nav.mark_complete(3), Err(ProgressError::UnknownStep(3)));
    }

    #[test]
    fn test_refresh_can_revert_completion() {
        let mut nav = navigator(complete_ma());
        let mut reverted = complete_ma();
        reverted.documents.clear();
        nav.refresh(reverted).unwrap();
        assert!(!nav.completion().is_complete(4));
        assert_eq!(nav.progress_percent(), 75);
        assert_eq!(nav.current_index(), 3);
    }

    #[test]
    fn test_submitted_navigator_is_terminal() {
        let mut nav = navigator(complete_ma());
        nav.mark_submitted();
        assert!(nav.is_submitted());
        assert_eq!(nav.next(), Err(ProgressError::AlreadySubmitted));
        assert_eq!(nav.previous(), Err(ProgressError::AlreadySubmitted));
        assert_eq!(nav.jump_to(0), Err(ProgressError::AlreadySubmitted));
        assert_eq!(nav.mark_complete(1), Err(ProgressError::AlreadySubmitted));
    }

    #[test]
    fn test_refresh_reopens_application_returned_for_correction() {
        let mut s = complete_ma();
        s.status = ApplicationStatus::UnderUniversityReview;
        let mut nav = navigator(s);
        assert!(nav.is_submitted());

        let mut returned = complete_ma();
        returned.status = ApplicationStatus::ReturnedForCorrection;
        returned.documents.clear();
        nav.refresh(returned.clone()).unwrap();

        let fresh = navigator(returned);
        assert_eq!(nav.is_submitted(), fresh.is_submitted());
        assert!(!nav.is_submitted());
        assert_eq!(nav.completion(), fresh.completion());
        assert!(matches!(nav.next().unwrap(), NavOutcome::NotReady(_)));
    }

    #[test]
    fn test_refresh_after_local_submit_follows_backend_status() {
        let mut nav = navigator(complete_ma());
        nav.mark_submitted();

        let mut accepted = complete_ma();
        accepted.status = ApplicationStatus::Submitted;
        nav.refresh(accepted).unwrap();
        assert!(nav.is_submitted());
        assert_eq!(nav.next(), Err(ProgressError::AlreadySubmitted));
    }

    #[test]
    fn test_readiness_reads_snapshot_not_marks() {
        let mut s = complete_ma();
        s.program_choices.clear();
        let mut nav = navigator(s);
        nav.mark_complete(5).unwrap();
        assert_eq!(nav.progress_percent(), 100);
        match nav.next().unwrap() {
            NavOutcome::NotReady(report) => assert!(report.missing_items[0].contains("انتخاب رشته")),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_submitted_snapshot_starts_terminal() {
        let mut s = complete_ma();
        s.status = ApplicationStatus::Submitted;
        let nav = navigator(s);
        assert!(nav.is_submitted());
    }
}
