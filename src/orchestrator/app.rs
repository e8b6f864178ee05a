//! 应用主结构 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责资源管理和模式调度。
//!
//! ## 运行模式
//!
//! 1. **本地快照模式**（`snapshot_file`）：评估 TOML / JSON 快照文件或目录，不访问网络
//! 2. **管理员模式**（`admin_mode`）：按角色分页拉取申请列表，用 Semaphore 限制并发评估
//! 3. **申请人模式**（默认）：登录（或复用会话），打开向导，输出进度，可选自动提交

use crate::clients::ApiClient;
use crate::config::Config;
use crate::error::ConfigError;
use crate::models::{load_all_snapshots, load_snapshot_file, Application, ApplicationFilter};
use crate::orchestrator::application_processor::{evaluate_snapshot, Verdict};
use crate::services::{ApplicationService, AuthService, ReviewService, SessionContext};
use crate::utils::logging::{log_readiness, log_startup, log_step_table, print_final_stats, BatchSummary};
use crate::workflow::{ApplicationCtx, RegistrationFlow, SubmitOutcome};
use anyhow::{Context, Result};
use futures::future::join_all;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

/// 管理员模式每页拉取的申请数
const ADMIN_PAGE_SIZE: u32 = 50;

/// 应用主结构
pub struct App {
    config: Config,
    session: SessionContext,
    auth: AuthService,
    applications: ApplicationService,
    reviews: ReviewService,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        let session = match &config.session_file {
            Some(path) if !config.admin_mode => {
                SessionContext::with_store(path).context("无法加载会话文件")?
            }
            _ => SessionContext::in_memory(),
        };

        let client = ApiClient::new(&config, session.clone()).context("无法创建 API 客户端")?;

        Ok(Self {
            auth: AuthService::new(client.clone()),
            reviews: ReviewService::new(client.clone()),
            applications: ApplicationService::new(client),
            session,
            config,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        if let Some(path) = &self.config.snapshot_file {
            log_startup("本地快照评估模式", path);
            return self.run_fixture(Path::new(path)).await;
        }

        if self.config.admin_mode {
            log_startup("管理员批量评估模式", &self.config.api_base_url);
            return self.run_admin().await;
        }

        log_startup("申请人注册向导模式", &self.config.api_base_url);
        self.run_applicant().await
    }

    // ========== 本地快照模式 ==========

    async fn run_fixture(&self, path: &Path) -> Result<()> {
        let snapshots = if path.is_dir() {
            info!("\n📁 正在扫描快照目录...");
            load_all_snapshots(&path.to_string_lossy()).await?
        } else {
            vec![(path.to_path_buf(), load_snapshot_file(path).await?)]
        };

        if snapshots.is_empty() {
            warn!("⚠️ 没有找到可用的快照文件，程序结束");
            return Ok(());
        }

        let mut summary = BatchSummary {
            total: snapshots.len(),
            ..Default::default()
        };
        for (index, (file, snapshot)) in snapshots.iter().enumerate() {
            info!("📄 {}", file.display());
            let ctx = ApplicationCtx::from_snapshot(snapshot).with_batch_index(index + 1);
            // 本地模式总是输出完整步骤表
            record(&mut summary, &evaluate_snapshot(snapshot, &ctx, true));
        }

        print_final_stats(&summary);
        Ok(())
    }

    // ========== 申请人模式 ==========

    async fn run_applicant(&self) -> Result<()> {
        self.ensure_applicant_login().await?;

        let flow = RegistrationFlow::new(self.applications.clone());
        let mut wizard = match flow.open(self.config.application_id).await {
            Ok(wizard) => wizard,
            Err(e) if e.is_unauthorized() => {
                // 保存的会话已失效，重新登录一次
                warn!("⚠️ 会话已失效，重新登录");
                self.login_applicant().await?;
                flow.open(self.config.application_id).await?
            }
            Err(e) => return Err(e).context("无法打开注册向导"),
        };

        log_step_table(
            wizard.navigator.steps(),
            wizard.navigator.completion(),
            wizard.navigator.current_index(),
        );

        if wizard.navigator.is_submitted() {
            info!(
                "{} 📨 申请已提交，当前状态: {}",
                wizard.ctx,
                wizard.navigator.snapshot().status.label()
            );
            return Ok(());
        }

        let report = wizard.navigator.readiness();
        log_readiness(&report);

        if !self.config.auto_submit {
            return Ok(());
        }
        if !report.ready {
            info!("💡 自动提交已开启，但申请尚未满足提交条件");
            return Ok(());
        }

        match flow.submit(&mut wizard).await? {
            SubmitOutcome::Submitted => info!("🎉 申请提交完成"),
            SubmitOutcome::AlreadySubmitted => info!("📨 申请之前已经提交"),
            SubmitOutcome::NotReady(report) => log_readiness(&report),
        }
        Ok(())
    }

    async fn ensure_applicant_login(&self) -> Result<()> {
        if self.session.is_authenticated() && self.session.is_applicant() {
            let name = self
                .session
                .current_user()
                .map(|u| u.full_name())
                .unwrap_or_default();
            info!("✓ 复用已保存的会话: {}", name);
            return Ok(());
        }
        self.login_applicant().await
    }

    async fn login_applicant(&self) -> Result<()> {
        let national_id = self
            .config
            .national_id
            .as_deref()
            .ok_or(ConfigError::Missing("national_id"))?;
        let tracking_code = self
            .config
            .tracking_code
            .as_deref()
            .ok_or(ConfigError::Missing("tracking_code"))?;
        self.auth
            .login(national_id, tracking_code)
            .await
            .context("申请人登录失败")?;
        Ok(())
    }

    // ========== 管理员模式 ==========

    async fn run_admin(&self) -> Result<()> {
        let national_id = self
            .config
            .national_id
            .as_deref()
            .ok_or(ConfigError::Missing("national_id"))?;
        let password = self
            .config
            .admin_password
            .as_deref()
            .ok_or(ConfigError::Missing("admin_password"))?;
        self.auth
            .admin_login(national_id, password)
            .await
            .context("管理员登录失败")?;

        let scope = self.reviews.scope()?;
        let applications = self.load_all_applications().await?;
        if applications.is_empty() {
            warn!("⚠️ 没有找到任何申请，程序结束");
            return Ok(());
        }

        let pending = applications
            .iter()
            .filter(|a| scope.can_review(a.status))
            .count();
        info!(
            "✓ {} 共 {} 份申请（待审核 {}），最大并发数 {}",
            scope.label(),
            applications.len(),
            pending,
            self.config.max_concurrent_requests
        );
        let summary = self.evaluate_all(applications).await?;
        print_final_stats(&summary);
        Ok(())
    }

    /// 分页拉取当前负责人可见的全部申请
    async fn load_all_applications(&self) -> Result<Vec<Application>> {
        let mut all = Vec::new();
        let mut filter = ApplicationFilter {
            page_size: Some(ADMIN_PAGE_SIZE),
            ..Default::default()
        };

        for page in 1.. {
            filter.page = Some(page);
            let list = self
                .reviews
                .list_applications(&filter)
                .await
                .with_context(|| format!("无法获取第 {} 页申请列表", page))?;
            let has_next = list.has_next();
            all.extend(list.into_items());
            if !has_next {
                break;
            }
        }
        Ok(all)
    }

    /// 并发评估所有申请
    async fn evaluate_all(&self, applications: Vec<Application>) -> Result<BatchSummary> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_requests.max(1)));
        let mut handles = Vec::new();

        for (idx, application) in applications.into_iter().enumerate() {
            let batch_index = idx + 1;
            let permit = semaphore.clone().acquire_owned().await?;
            let service = self.applications.clone();
            let reviews = self.reviews.clone();
            let verbose = self.config.verbose_logging;

            let handle = tokio::spawn(async move {
                let _permit = permit;
                // 列表项不含学历和文件，评估前取完整详情
                let detail = reviews.get_application(application.id).await?;
                let snapshot = service.snapshot_of(&detail).await?;
                let ctx = ApplicationCtx::from_snapshot(&snapshot).with_batch_index(batch_index);
                Ok::<_, crate::error::AppError>(evaluate_snapshot(&snapshot, &ctx, verbose))
            });
            handles.push((batch_index, handle));
        }

        let mut summary = BatchSummary {
            total: handles.len(),
            ..Default::default()
        };
        let (indices, handles): (Vec<usize>, Vec<_>) = handles.into_iter().unzip();
        let results = join_all(handles).await;
        for (batch_index, result) in indices.into_iter().zip(results) {
            match result {
                Ok(Ok(verdict)) => record(&mut summary, &verdict),
                Ok(Err(e)) => {
                    error!("[#{}] ❌ 评估失败: {}", batch_index, e);
                    summary.failed += 1;
                }
                Err(e) => {
                    error!("[#{}] 任务执行失败: {}", batch_index, e);
                    summary.failed += 1;
                }
            }
        }
        Ok(summary)
    }
}

fn record(summary: &mut BatchSummary, verdict: &Verdict) {
    match verdict {
        Verdict::Submitted => summary.submitted += 1,
        Verdict::Ready { .. } => summary.ready += 1,
        Verdict::NotReady { .. } => summary.not_ready += 1,
    }
}
