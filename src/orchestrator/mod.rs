//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责模式选择、批量处理和并发控制，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `app` - 应用主结构
//! - 管理应用生命周期（初始化、运行）
//! - 持有会话和服务
//! - 管理员模式下用 Semaphore 控制并发
//! - 输出全局统计信息
//!
//! ### `application_processor` - 单个申请处理器
//! - 对一份快照做完成度判定和提交前检查
//! - 输出单个申请的步骤表和问题列表
//!
//! ## 层次关系
//!
//! ```text
//! app (快照文件 / Vec<Application> / 申请人向导)
//!     ├── application_processor (单个快照 → progress)
//!     └── workflow::RegistrationFlow (向导会话 → progress)
//!             ↓
//!         services (能力层：auth / application / session)
//!             ↓
//!         clients (基础设施：ApiClient)
//! ```

pub mod app;
pub mod application_processor;

pub use app::App;
pub use application_processor::{evaluate_snapshot, Verdict};
