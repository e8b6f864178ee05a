/// 日志工具模块
///
/// 提供订阅器初始化和日志格式化的辅助函数
use crate::progress::{CompletionState, ReadinessReport, StepDefinition};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// 初始化全局 tracing 订阅器
///
/// `filter` 无法解析时退回 `info`；重复调用时忽略
pub fn init(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `mode`: 运行模式描述
/// - `target`: 后端地址或快照路径
pub fn log_startup(mode: &str, target: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - {}", mode);
    info!("🎯 目标: {}", target);
    info!(
        "🕒 启动时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
}

/// 输出步骤表
pub fn log_step_table(steps: &[StepDefinition], completion: &CompletionState, current: usize) {
    info!("{}", "─".repeat(60));
    for (index, step) in steps.iter().enumerate() {
        let mark = if completion.is_complete(step.id) {
            "✓"
        } else if step.is_optional {
            "○"
        } else {
            "✗"
        };
        let pointer = if index == current { "👉" } else { "  " };
        let optional = if step.is_optional { " (اختیاری)" } else { "" };
        info!(
            "{} {} [{}] {}{} - {}",
            pointer, mark, step.id, step.title, optional, step.description
        );
    }
    info!("📊 总进度: {}%", completion.overall_percent);
    info!("{}", "─".repeat(60));
}

/// 输出提交前检查结果
pub fn log_readiness(report: &ReadinessReport) {
    if report.ready {
        info!("✅ 申请已满足提交条件");
        return;
    }
    warn!("⚠️ 申请尚不能提交，共 {} 个问题:", report.missing_items.len());
    for item in &report.missing_items {
        warn!("   - {}", item);
    }
}

/// 批量统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub ready: usize,
    pub not_ready: usize,
    pub submitted: usize,
    pub failed: usize,
}

/// 打印最终统计信息
pub fn print_final_stats(summary: &BatchSummary) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部申请评估完成");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("📄 申请总数: {}", summary.total);
    info!("📨 已提交: {}", summary.submitted);
    info!("✅ 可提交: {}", summary.ready);
    info!("⚠️ 未完成: {}", summary.not_ready);
    info!("❌ 失败: {}", summary.failed);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（按字符计）
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
