//! 单个申请处理器 - 编排层
//!
//! ## 职责
//!
//! 对一份申请快照做完成度判定和提交前检查，输出日志并给出结论。
//! 管理员批量模式和本地快照模式共用。

use crate::models::ApplicationSnapshot;
use crate::progress::{build_steps, WizardNavigator};
use crate::utils::logging::{log_readiness, log_step_table};
use crate::workflow::ApplicationCtx;
use tracing::info;

/// 单个申请的评估结论
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// 已提交（进入审核流程）
    Submitted,
    /// 可以提交
    Ready { percent: u8 },
    /// 仍有问题
    NotReady { percent: u8, missing_items: Vec<String> },
}

/// 评估单个申请快照
///
/// # 参数
/// - `snapshot`: 申请快照
/// - `ctx`: 申请上下文（日志用）
/// - `verbose`: 是否输出完整步骤表
pub fn evaluate_snapshot(snapshot: &ApplicationSnapshot, ctx: &ApplicationCtx, verbose: bool) -> Verdict {
    let navigator = WizardNavigator::new(build_steps(snapshot.round_type), snapshot.clone());
    let percent = navigator.progress_percent();

    if navigator.is_submitted() {
        info!("{} 📨 已提交 ({})", ctx, snapshot.status.label());
        return Verdict::Submitted;
    }

    if verbose {
        log_step_table(
            navigator.steps(),
            navigator.completion(),
            navigator.current_index(),
        );
    }

    let report = navigator.readiness();
    info!(
        "{} 📊 进度 {}% ({}/{})",
        ctx,
        percent,
        report.completion.completed_count(),
        navigator.steps().len()
    );
    if verbose {
        log_readiness(&report);
    }

    if report.ready {
        Verdict::Ready { percent }
    } else {
        Verdict::NotReady {
            percent,
            missing_items: report.missing_items,
        }
    }
}
