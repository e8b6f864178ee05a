//! # Admission Progress
//!
//! 研究生招生报名系统的申请进度客户端：按招生类型生成注册向导步骤、
//! 判定每个步骤是否完成、在提交前做最终检查，并通过后端 REST 接口
//! 完成登录、保存和提交。
//!
//! ## 架构设计
//!
//! ### ① 纯逻辑层（Progress）
//! - `progress/` - 唯一的完成度判定来源，不做 I/O
//! - `catalog` / `evaluator` / `readiness` / `navigator`
//!
//! ### ② 基础设施层（Clients）
//! - `clients/` - `ApiClient`：认证头、401 刷新重试、列表响应归一
//!
//! ### ③ 业务能力层（Services）
//! - `SessionContext` - 进程内唯一的登录会话
//! - `AuthService` - 注册 / 登录 / 刷新 / 退出
//! - `ApplicationService` - 申请读取、各步骤保存、提交
//! - `ReviewService` - 大学 / 学院负责人的申请列表和审核结论
//!
//! ### ④ 流程层（Workflow）
//! - `RegistrationFlow` - 向导会话（获取快照 → 标记完成 → 检查 → 提交）
//!
//! ### ⑤ 编排层（Orchestration）
//! - `orchestrator::App` - 申请人 / 管理员 / 本地快照三种运行模式
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod progress;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::ApiClient;
pub use config::Config;
pub use error::{AppError, AppResult, ProgressError};
pub use models::{ApplicationSnapshot, DocumentType, RoundType};
pub use orchestrator::App;
pub use progress::{
    build_steps, check_readiness, evaluate, CompletionState, NavOutcome, ReadinessReport,
    StepDefinition, WizardNavigator,
};
pub use services::{ApplicationService, AuthService, ReviewService, SessionContext};
pub use workflow::{RegistrationFlow, SubmitOutcome, WizardSession};
