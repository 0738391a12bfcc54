/// 组卷服务客户端
///
/// 封装所有与组卷服务相关的调用逻辑：序列化题目、发送请求、解析响应
use futures::future::BoxFuture;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::error::{SubmitError, TransportError};
use crate::models::QuestionRecord;

/// 请求体声明为纯文本，避免跨域预检
pub const PLAIN_TEXT_UTF8: &str = "text/plain;charset=utf-8";

/// 一次 HTTP 调用的原始结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 发送请求的能力
///
/// 只负责把文本 POST 到指定地址，不关心内容
pub trait PaperTransport: Send + Sync {
    fn post_text<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<TransportResponse, TransportError>>;
}

/// 基于 reqwest 的 HTTP 实现
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(Self { client })
    }
}

impl PaperTransport for HttpTransport {
    fn post_text<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<TransportResponse, TransportError>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .header(CONTENT_TYPE, PLAIN_TEXT_UTF8)
                .header(CACHE_CONTROL, "no-cache")
                .body(body)
                .send()
                .await
                .map_err(|e| TransportError::Network(e.to_string()))?;

            let status = response.status().as_u16();
            let body = if response.status().is_success() {
                response
                    .text()
                    .await
                    .map_err(|e| TransportError::MalformedBody(e.to_string()))?
            } else {
                // 非 2xx 只看状态码，读不到响应体也无所谓
                response.text().await.unwrap_or_default()
            };

            Ok(TransportResponse { status, body })
        })
    }
}

/// 组卷服务客户端
pub struct PaperClient {
    endpoint_url: String,
    transport: Box<dyn PaperTransport>,
}

impl PaperClient {
    pub fn new(endpoint_url: impl Into<String>, transport: Box<dyn PaperTransport>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            transport,
        }
    }

    /// 提交选中的题目
    ///
    /// # 参数
    /// - `questions`: 选中的题目（按提交顺序）
    ///
    /// # 返回
    /// 成功时返回服务器的 `message`
    pub async fn submit(&self, questions: &[&QuestionRecord]) -> Result<String, SubmitError> {
        let payload = serde_json::to_string(questions)
            .map_err(|e| TransportError::MalformedBody(e.to_string()))?;

        info!("📤 正在提交 {} 道题目到 {}", questions.len(), self.endpoint_url);
        debug!("提交 Payload: {}", payload);

        let response = self
            .transport
            .post_text(&self.endpoint_url, payload)
            .await
            .inspect_err(|e| warn!("⚠️ 请求失败: {}", e))?;

        debug!("服务器响应 {}: {}", response.status, response.body);

        interpret_response(&response)
    }
}

/// 解析服务器响应
///
/// - 非 2xx → [`TransportError::Status`]
/// - 响应体不是 JSON 对象 → [`TransportError::MalformedBody`]
/// - `status != "success"` → [`SubmitError::Application`]
pub fn interpret_response(response: &TransportResponse) -> Result<String, SubmitError> {
    if !response.is_success() {
        return Err(TransportError::Status(response.status).into());
    }

    // 响应体必须是 JSON 对象
    let reply: Map<String, Value> = serde_json::from_str(&response.body)
        .map_err(|e| TransportError::MalformedBody(e.to_string()))?;

    let message = reply.get("message").map(message_text).unwrap_or_default();
    if reply.get("status").and_then(Value::as_str) == Some("success") {
        Ok(message)
    } else if message.is_empty() {
        Err(SubmitError::Application(
            "The server did not report a reason.".to_string(),
        ))
    } else {
        Err(SubmitError::Application(message))
    }
}

fn message_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
