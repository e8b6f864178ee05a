/// 招生后端 REST 客户端
///
/// 负责：
/// - 附加 `Authorization: Bearer <access>`
/// - 401 时用刷新令牌刷新一次并重试；失败则清空会话
/// - 把非 2xx 响应转成带后端错误文本的 `ApiError::BadResponse`
/// - 把"数组或分页对象"两种列表响应统一成 `Vec<T>`
use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult, AuthError};
use crate::models::application::{TokenRefreshRequest, TokenRefreshResponse};
use crate::services::session::SessionContext;
use crate::utils::logging::truncate_text;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

pub const REFRESH_ENDPOINT: &str = "/api/auth/refresh/";

/// 分页列表
#[derive(Debug, Clone, Deserialize)]
pub struct Paginated<T> {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// 列表接口可能返回裸数组，也可能返回分页对象
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Paginated(Paginated<T>),
    Plain(Vec<T>),
}

impl<T> ListResponse<T> {
    pub fn has_next(&self) -> bool {
        matches!(self, ListResponse::Paginated(p) if p.next.is_some())
    }

    /// 总数；裸数组时就是数组长度
    pub fn total(&self) -> u64 {
        match self {
            ListResponse::Paginated(p) => p.count,
            ListResponse::Plain(items) => items.len() as u64,
        }
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            ListResponse::Paginated(p) => p.results,
            ListResponse::Plain(items) => items,
        }
    }
}

/// 上传文件的内容
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: SessionContext,
}

impl ApiClient {
    pub fn new(config: &Config, session: SessionContext) -> AppResult<Self> {
        Self::with_base_url(
            &config.api_base_url,
            Duration::from_secs(config.request_timeout_secs),
            session,
        )
    }

    pub fn with_base_url(
        base_url: &str,
        timeout: Duration,
        session: SessionContext,
    ) -> AppResult<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url).map_err(|_| ApiError::InvalidBaseUrl(base_url.clone()))?;

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::api_request_failed(&base_url, e))?;

        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    // ========== 带认证的请求 ==========

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> AppResult<T> {
        let url = self.url(endpoint);
        let response = self.send_authed(endpoint, |http| http.get(&url)).await?;
        decode(endpoint, response).await
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        let url = self.url(endpoint);
        let response = self
            .send_authed(endpoint, |http| http.get(&url).query(query))
            .await?;
        decode(endpoint, response).await
    }

    /// 列表接口，统一返回 `Vec<T>`
    pub async fn get_list<T: DeserializeOwned>(&self, endpoint: &str) -> AppResult<Vec<T>> {
        let list: ListResponse<T> = self.get(endpoint).await?;
        Ok(list.into_items())
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> AppResult<T> {
        let url = self.url(endpoint);
        let response = self
            .send_authed(endpoint, |http| http.post(&url).json(body))
            .await?;
        decode(endpoint, response).await
    }

    pub async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> AppResult<T> {
        let url = self.url(endpoint);
        let response = self
            .send_authed(endpoint, |http| http.patch(&url).json(body))
            .await?;
        decode(endpoint, response).await
    }

    pub async fn delete(&self, endpoint: &str) -> AppResult<()> {
        let url = self.url(endpoint);
        self.send_authed(endpoint, |http| http.delete(&url)).await?;
        Ok(())
    }

    /// multipart 上传：`file` 字段 + 若干文本字段
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        file: &UploadFile,
        fields: &[(&str, String)],
    ) -> AppResult<T> {
        let url = self.url(endpoint);
        // Form 不能 clone，重试时需要重新构造
        let build = |http: &Client| {
            let part = reqwest::multipart::Part::bytes(file.bytes.clone())
                .file_name(file.file_name.clone());
            let form = fields
                .iter()
                .fold(reqwest::multipart::Form::new(), |form, (k, v)| {
                    form.text(k.to_string(), v.clone())
                })
                .part("file", part);
            http.post(&url).multipart(form)
        };
        let response = self.send_authed(endpoint, build).await?;
        decode(endpoint, response).await
    }

    // ========== 不带认证的请求（登录、注册、刷新） ==========

    pub async fn post_anonymous<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> AppResult<T> {
        debug!("POST {} (匿名)", endpoint);
        let response = execute(endpoint, self.http.post(self.url(endpoint)).json(body)).await?;
        let response = check_status(endpoint, response, false).await?;
        decode(endpoint, response).await
    }

    /// 用刷新令牌换取新的访问令牌，并写回会话
    pub async fn refresh_access_token(&self) -> AppResult<String> {
        let refresh = self
            .session
            .refresh_token()
            .ok_or(AuthError::MissingRefreshToken)?;
        let response: TokenRefreshResponse = self
            .post_anonymous(REFRESH_ENDPOINT, &TokenRefreshRequest { refresh })
            .await?;
        self.session.set_access_token(response.access.clone())?;
        debug!("访问令牌已刷新");
        Ok(response.access)
    }

    /// 发送请求；401 时刷新一次令牌再重试
    async fn send_authed<F>(&self, endpoint: &str, build: F) -> AppResult<Response>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let token = self.session.access_token();
        debug!("请求 {} (已登录: {})", endpoint, token.is_some());

        let response = execute(endpoint, with_bearer(build(&self.http), token.as_deref())).await?;

        if response.status() != StatusCode::UNAUTHORIZED || token.is_none() {
            return check_status(endpoint, response, token.is_some()).await;
        }

        match self.refresh_access_token().await {
            Ok(access) => {
                let retry = execute(endpoint, with_bearer(build(&self.http), Some(&access))).await?;
                if retry.status() == StatusCode::UNAUTHORIZED {
                    self.session.logout()?;
                }
                check_status(endpoint, retry, true).await
            }
            Err(e) => {
                warn!("⚠️ 令牌刷新失败，清空会话: {}", e);
                self.session.logout()?;
                Err(ApiError::Unauthorized {
                    endpoint: endpoint.to_string(),
                }
                .into())
            }
        }
    }
}

fn with_bearer(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

async fn execute(endpoint: &str, request: RequestBuilder) -> AppResult<Response> {
    request
        .send()
        .await
        .map_err(|e| AppError::api_request_failed(endpoint, e))
}

async fn check_status(endpoint: &str, response: Response, authed: bool) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED && authed {
        return Err(ApiError::Unauthorized {
            endpoint: endpoint.to_string(),
        }
        .into());
    }

    let body = response.text().await.unwrap_or_default();
    let message = extract_error_message(&body);
    warn!("API {} 返回 {}: {:?}", endpoint, status.as_u16(), message);
    Err(ApiError::BadResponse {
        endpoint: endpoint.to_string(),
        status: status.as_u16(),
        message,
    }
    .into())
}

async fn decode<T: DeserializeOwned>(endpoint: &str, response: Response) -> AppResult<T> {
    let body = response
        .text()
        .await
        .map_err(|e| AppError::api_request_failed(endpoint, e))?;
    // 204 等空响应按 JSON null 处理
    let body = if body.trim().is_empty() { "null" } else { body.as_str() };
    serde_json::from_str(body).map_err(|e| {
        ApiError::JsonParseFailed {
            endpoint: endpoint.to_string(),
            source: e,
        }
        .into()
    })
}

/// 从后端错误体中取出可读文本：`error` / `detail` / `message` / `errors`
pub fn extract_error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    let Ok(value) = serde_json::from_str::<Value>(trimmed) else {
        return Some(truncate_text(trimmed, 200));
    };

    for key in ["error", "detail", "message"] {
        if let Some(text) = value.get(key).and_then(Value::as_str) {
            return Some(text.to_string());
        }
    }

    let errors = value.get("errors").unwrap_or(&value);
    let parts = flatten_errors(errors);
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("؛ "))
    }
}

fn flatten_errors(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items.iter().flat_map(flatten_errors).collect(),
        Value::Object(map) => map
            .iter()
            .flat_map(|(field, v)| {
                flatten_errors(v)
                    .into_iter()
                    .map(move |msg| format!("{}: {}", field, msg))
            })
            .collect(),
        _ => Vec::new(),
    }
}
