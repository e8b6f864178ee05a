//! 注册向导流程 - 流程层
//!
//! 核心职责：把纯逻辑的 [`WizardNavigator`] 和后端调用串起来
//!
//! - `open`: 获取最新快照，建立向导
//! - `complete_step`: 步骤保存后重新获取快照，再标记完成
//! - `submit`: 本地检查通过后才调用后端提交接口

use crate::error::{AppResult, ProgressError};
use crate::progress::{build_steps, NavOutcome, ReadinessReport, StepDefinition, WizardNavigator};
use crate::services::ApplicationService;
use crate::workflow::application_ctx::ApplicationCtx;
use tracing::{info, warn};

/// 一次向导会话
#[derive(Debug, Clone)]
pub struct WizardSession {
    pub ctx: ApplicationCtx,
    pub navigator: WizardNavigator,
}

impl WizardSession {
    pub fn current_step(&self) -> Option<&StepDefinition> {
        self.navigator.current_step()
    }
}

/// 提交结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 后端已接受提交
    Submitted,
    /// 本地检查未通过，没有发送请求
    NotReady(ReadinessReport),
    /// 申请之前已经提交过
    AlreadySubmitted,
}

/// 注册向导流程
///
/// - 不持有向导状态（状态在 `WizardSession` 中）
/// - 只依赖业务能力（services）
pub struct RegistrationFlow {
    service: ApplicationService,
    confirm_accuracy: bool,
}

impl RegistrationFlow {
    pub fn new(service: ApplicationService) -> Self {
        Self {
            service,
            confirm_accuracy: true,
        }
    }

    pub fn service(&self) -> &ApplicationService {
        &self.service
    }

    /// 打开向导；`application_id` 为空时使用当前申请人的申请
    pub async fn open(&self, application_id: Option<u64>) -> AppResult<WizardSession> {
        let snapshot = match application_id {
            Some(id) => self.service.get_snapshot(id).await?,
            None => {
                let application = self.service.get_my_application().await?;
                self.service.snapshot_of(&application).await?
            }
        };

        let ctx = ApplicationCtx::from_snapshot(&snapshot);
        let navigator = WizardNavigator::new(build_steps(snapshot.round_type), snapshot);
        info!(
            "{} 📋 向导已打开，当前步骤 {} / 进度 {}%",
            ctx,
            navigator.current_index() + 1,
            navigator.progress_percent()
        );
        Ok(WizardSession { ctx, navigator })
    }

    /// 重新获取快照并刷新完成情况和提交状态
    pub async fn reload(&self, session: &mut WizardSession) -> AppResult<()> {
        let snapshot = self.service.get_snapshot(session.ctx.application_id).await?;
        let was_submitted = session.navigator.is_submitted();
        session.navigator.refresh(snapshot)?;
        if was_submitted && !session.navigator.is_submitted() {
            info!(
                "{} 🔁 申请已重新开放: {}",
                session.ctx,
                session.navigator.snapshot().status.label()
            );
        }
        Ok(())
    }

    /// 某步骤的数据已保存：刷新快照后标记完成并尝试前进
    pub async fn complete_step(
        &self,
        session: &mut WizardSession,
        step_id: u8,
    ) -> AppResult<NavOutcome> {
        self.reload(session).await?;
        session.navigator.mark_complete(step_id)?;
        if session.current_step().map(|s| s.id) != Some(step_id) {
            let index = session
                .navigator
                .steps()
                .iter()
                .position(|s| s.id == step_id)
                .ok_or(ProgressError::UnknownStep(step_id))?;
            session.navigator.jump_to(index)?;
        }
        let outcome = session.navigator.next()?;
        match &outcome {
            NavOutcome::Advanced(index) => info!("{} ➡️ 前进到步骤 {}", session.ctx, index + 1),
            NavOutcome::Blocked(err) => warn!("{} ⚠️ {}", session.ctx, err),
            NavOutcome::ReadyToSubmit => info!("{} ✅ 可以提交", session.ctx),
            NavOutcome::NotReady(report) => {
                warn!("{} ⚠️ 仍有 {} 个问题", session.ctx, report.issues.len())
            }
        }
        Ok(outcome)
    }

    /// 提交申请
    ///
    /// 先用最新快照做本地检查，全部通过才调用后端。
    /// 是否已提交以后端状态为准，被退回修改的申请可以再次提交。
    pub async fn submit(&self, session: &mut WizardSession) -> AppResult<SubmitOutcome> {
        self.reload(session).await?;
        if session.navigator.is_submitted() {
            return Ok(SubmitOutcome::AlreadySubmitted);
        }

        let report = session.navigator.readiness();
        if !report.ready {
            warn!(
                "{} ⚠️ 本地检查未通过，不发送提交请求: {}",
                session.ctx,
                report.missing_items.join(" | ")
            );
            return Ok(SubmitOutcome::NotReady(report));
        }

        let application = self
            .service
            .submit_application(session.ctx.application_id, self.confirm_accuracy)
            .await?;
        session.navigator.mark_submitted();
        info!(
            "{} 🎉 申请提交成功，当前状态: {}",
            session.ctx,
            application.status.label()
        );
        Ok(SubmitOutcome::Submitted)
    }
}
