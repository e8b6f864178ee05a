use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 进度模型错误（本地、同步、可恢复）
    #[error("进度错误: {0}")]
    Progress(#[from] ProgressError),
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 登录 / 会话错误
    #[error("认证错误: {0}")]
    Auth(#[from] AuthError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 其他错误
    #[error("错误: {0}")]
    Other(String),
}

/// 进度模型错误
///
/// 面向用户的变体（`MissingRequiredStep`、`InvalidPriorityOrdering` 等）的
/// `Display` 文本会被原样展示给申请人，因此使用波斯语。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressError {
    /// 无法识别的招生类型（编程错误，不面向用户）
    #[error("invalid round type: {0:?}")]
    InvalidRoundType(String),

    /// 选择的专业优先级不是 1..N 的连续序列
    #[error("ترتیب اولویت رشته‌ها نامعتبر است (اولویت‌های ثبت‌شده: {})", format_priorities(.priorities))]
    InvalidPriorityOrdering { priorities: Vec<u32> },

    /// 必填步骤未完成
    #[error("مرحله «{title}» تکمیل نشده است{}", format_detail(.detail))]
    MissingRequiredStep {
        step_id: u8,
        title: String,
        detail: Option<String>,
    },

    /// 专业选择超过上限
    #[error("حداکثر {max} رشته می‌توانید انتخاب کنید ({count} رشته ثبت شده است)")]
    TooManyProgramChoices { count: usize, max: usize },

    /// 同一专业被重复选择
    #[error("رشته {program_id} بیش از یک بار انتخاب شده است")]
    DuplicateProgramChoice { program_id: u64 },

    /// 跳转目标超出步骤范围
    #[error("step index {index} out of range (steps: {len})")]
    StepOutOfRange { index: usize, len: usize },

    /// 步骤 ID 不在当前目录中
    #[error("unknown step id {0}")]
    UnknownStep(u8),

    /// 申请已提交，向导处于终止状态
    #[error("پرونده قبلاً ارسال شده است")]
    AlreadySubmitted,
}

fn format_priorities(priorities: &[u32]) -> String {
    priorities
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join("، ")
}

fn format_detail(detail: &Option<String>) -> String {
    match detail {
        Some(d) if !d.is_empty() => format!(": {}", d),
        _ => String::new(),
    }
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// API 返回错误响应
    #[error("API返回错误响应 ({endpoint}): status={status}, message={message:?}")]
    BadResponse {
        endpoint: String,
        status: u16,
        message: Option<String>,
    },
    /// 未登录或令牌刷新失败
    #[error("未授权 ({endpoint})，请重新登录")]
    Unauthorized { endpoint: String },
    /// JSON 解析失败
    #[error("JSON解析失败 ({endpoint}): {source}")]
    JsonParseFailed {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    /// 非法的基础 URL
    #[error("无效的 API 地址: {0}")]
    InvalidBaseUrl(String),
}

/// 登录 / 会话错误
#[derive(Debug, Error)]
pub enum AuthError {
    /// 国民身份证号格式或校验位错误
    #[error("کد ملی نامعتبر است: {0}")]
    InvalidNationalId(String),
    /// 追踪码格式错误
    #[error("کد پیگیری نامعتبر است: {0}")]
    InvalidTrackingCode(String),
    /// 申请人试图使用管理员登录
    #[error("دسترسی غیرمجاز. لطفاً از صفحه ورود دانشجویان استفاده کنید.")]
    ApplicantOnAdminLogin,
    /// 非员工账户
    #[error("دسترسی محدود. لطفاً با پشتیبانی تماس بگیرید.")]
    NotStaff,
    /// 当前没有登录会话
    #[error("没有可用的登录会话")]
    NoSession,
    /// 当前角色不能执行该审核操作
    #[error("شما به این بخش دسترسی ندارید ({0})")]
    ReviewNotAllowed(&'static str),
    /// 缺少刷新令牌
    #[error("Refresh token not found")]
    MissingRefreshToken,
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// JSON 解析失败
    #[error("JSON解析失败 ({path}): {source}")]
    JsonParseFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// 不支持的文件扩展名
    #[error("不支持的文件类型: {path}")]
    UnsupportedFormat { path: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 缺少必要配置项
    #[error("缺少配置项: {0}")]
    Missing(&'static str),
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建API请求失败错误
    pub fn api_request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 是否为未授权错误（调用方据此引导重新登录）
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Api(ApiError::Unauthorized { .. }))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
