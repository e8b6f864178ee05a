//! 申请处理上下文
//!
//! 封装"我正在处理哪份申请"这一信息

use crate::models::{ApplicationSnapshot, RoundType};
use std::fmt::Display;

/// 申请处理上下文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationCtx {
    /// 申请ID
    pub application_id: u64,

    /// 追踪码（日志显示用）
    pub tracking_code: String,

    /// 招生类型
    pub round_type: RoundType,

    /// 批量处理中的序号（从1开始，0 表示单个申请）
    pub batch_index: usize,
}

impl ApplicationCtx {
    pub fn new(application_id: u64, tracking_code: String, round_type: RoundType) -> Self {
        Self {
            application_id,
            tracking_code,
            round_type,
            batch_index: 0,
        }
    }

    pub fn from_snapshot(snapshot: &ApplicationSnapshot) -> Self {
        Self::new(
            snapshot.application_id,
            snapshot.tracking_code.clone(),
            snapshot.round_type,
        )
    }

    pub fn with_batch_index(mut self, batch_index: usize) -> Self {
        self.batch_index = batch_index;
        self
    }
}

impl Display for ApplicationCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.batch_index > 0 {
            write!(f, "[#{} ", self.batch_index)?;
        } else {
            write!(f, "[")?;
        }
        write!(
            f,
            "申请 ID#{} 追踪码#{} 类型#{}]",
            self.application_id, self.tracking_code, self.round_type
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let ctx = ApplicationCtx::new(7, "AB12CD34EF".to_string(), RoundType::PhdExam);
        assert_eq!(
            ctx.to_string(),
            "[申请 ID#7 追踪码#AB12CD34EF 类型#PHD_EXAM]"
        );
        assert_eq!(
            ctx.with_batch_index(3).to_string(),
            "[#3 申请 ID#7 追踪码#AB12CD34EF 类型#PHD_EXAM]"
        );
    }
}
