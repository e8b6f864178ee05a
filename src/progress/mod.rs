//! 申请进度模型（纯逻辑，无 I/O）
//!
//! - `catalog`: 按招生类型生成步骤目录
//! - `evaluator`: 判定每个步骤是否完成
//! - `readiness`: 提交前检查
//! - `navigator`: 注册向导的状态机

pub mod catalog;
pub mod evaluator;
pub mod navigator;
pub mod readiness;

pub use catalog::{build_steps, build_steps_for, required_degrees, required_document_types};
pub use catalog::{StepDefinition, StepKind};
pub use evaluator::{evaluate, missing_degrees, missing_document_types};
pub use evaluator::{CompletionState, StepCompletion};
pub use navigator::{NavOutcome, WizardNavigator};
pub use readiness::{check_program_choices, check_readiness, ReadinessReport, MAX_PROGRAM_CHOICES};
