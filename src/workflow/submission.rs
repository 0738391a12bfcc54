//! 提交流程 - 流程层
//!
//! 核心职责：定义"一次提交"的完整流程
//!
//! 状态顺序：
//! 1. Idle → Validating（未选题目直接失败，不发请求）
//! 2. Validating → Submitting（禁用提交按钮、显示加载提示）
//! 3. Submitting → Succeeded / Failed
//! 4. 回到 Idle

use tracing::{debug, error, info, warn};

use crate::clients::PaperClient;
use crate::error::SubmitError;
use crate::models::{QuestionRecord, RecordStore};
use crate::selection::SelectionState;
use crate::view::{QuestionView, StatusLine, Tone};

/// 提交中的提示
pub const IN_PROGRESS_TEXT: &str = "Generating your paper... Please wait.";

/// 提交流程所处阶段
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStatus {
    Success,
    Failure,
}

/// 一次提交尝试的结果，不会持久化
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    pub status: SubmissionStatus,
    pub message: String,
    pub tone: Tone,
}

impl SubmissionResult {
    fn succeeded(server_message: &str) -> Self {
        Self {
            status: SubmissionStatus::Success,
            message: format!("Success! {}", server_message),
            tone: Tone::Success,
        }
    }

    fn failed(err: &SubmitError) -> Self {
        match err {
            SubmitError::Validation => Self {
                status: SubmissionStatus::Failure,
                message: err.to_string(),
                tone: Tone::Warning,
            },
            _ => Self {
                status: SubmissionStatus::Failure,
                message: format!("An error occurred: {}", err),
                tone: Tone::Error,
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == SubmissionStatus::Success
    }

    pub fn status_line(&self) -> StatusLine {
        StatusLine::new(self.message.clone(), self.tone)
    }
}

/// 提交期间占用界面：禁用提交按钮并显示加载提示
///
/// 离开作用域时（无论成功、失败）恢复
struct BusyGuard<'a, V: QuestionView + ?Sized> {
    view: &'a mut V,
}

impl<'a, V: QuestionView + ?Sized> BusyGuard<'a, V> {
    fn engage(view: &'a mut V) -> Self {
        view.set_loader_visible(true);
        view.set_submit_enabled(false);
        view.set_status(&StatusLine::neutral(IN_PROGRESS_TEXT));
        Self { view }
    }
}

impl<V: QuestionView + ?Sized> Drop for BusyGuard<'_, V> {
    fn drop(&mut self) {
        self.view.set_loader_visible(false);
        self.view.set_submit_enabled(true);
    }
}

/// 提交流程
///
/// - 不持有题目和选中状态，每次提交时读取
/// - 同一时间最多一个请求在途
pub struct SubmissionPipeline {
    client: PaperClient,
    phase: SubmissionPhase,
}

impl SubmissionPipeline {
    pub fn new(client: PaperClient) -> Self {
        Self {
            client,
            phase: SubmissionPhase::Idle,
        }
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    /// 是否有请求在途
    pub fn is_busy(&self) -> bool {
        self.phase == SubmissionPhase::Submitting
    }

    /// 执行一次提交，并把结果写到状态栏
    pub async fn submit(
        &mut self,
        records: &RecordStore,
        selection: &SelectionState,
        view: &mut dyn QuestionView,
    ) -> SubmissionResult {
        self.transition(SubmissionPhase::Validating);

        if selection.is_empty() {
            warn!("⚠️ 未选择任何题目，取消提交");
            return self.finish(Err(SubmitError::Validation), view);
        }

        // 按索引升序收集，保证与原表顺序一致
        let questions: Vec<&QuestionRecord> = selection
            .current()
            .iter()
            .filter_map(|&index| records.get(index))
            .collect();

        self.transition(SubmissionPhase::Submitting);
        let outcome = {
            let _busy = BusyGuard::engage(&mut *view);
            self.client.submit(&questions).await
        };

        self.finish(outcome, view)
    }

    fn finish(
        &mut self,
        outcome: Result<String, SubmitError>,
        view: &mut dyn QuestionView,
    ) -> SubmissionResult {
        let result = match outcome {
            Ok(message) => {
                info!("✓ 组卷成功: {}", message);
                self.transition(SubmissionPhase::Succeeded);
                SubmissionResult::succeeded(&message)
            }
            Err(e) => {
                if !matches!(e, SubmitError::Validation) {
                    error!("❌ 提交失败: {}", e);
                }
                self.transition(SubmissionPhase::Failed);
                SubmissionResult::failed(&e)
            }
        };

        view.set_status(&result.status_line());
        self.transition(SubmissionPhase::Idle);
        result
    }

    fn transition(&mut self, next: SubmissionPhase) {
        debug!("提交状态: {:?} → {:?}", self.phase, next);
        self.phase = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{PaperTransport, TransportResponse};
    use crate::error::TransportError;
    use crate::view::{RecordingView, ViewCall};
    use futures::future::BoxFuture;
    use serde_json::json;

    /// 固定返回同一个响应
    struct FixedTransport(Result<TransportResponse, TransportError>);

    impl PaperTransport for FixedTransport {
        fn post_text<'a>(
            &'a self,
            _url: &'a str,
            _body: String,
        ) -> BoxFuture<'a, Result<TransportResponse, TransportError>> {
            let reply = self.0.clone();
            Box::pin(async move { reply })
        }
    }

    fn pipeline_with(reply: Result<TransportResponse, TransportError>) -> SubmissionPipeline {
        SubmissionPipeline::new(PaperClient::new(
            "http://paper.test/exec",
            Box::new(FixedTransport(reply)),
        ))
    }

    fn records() -> RecordStore {
        let mut record = QuestionRecord::new();
        record.insert("QuestionText", json!("Q"));
        record.insert("QuestionType", json!("mcq"));
        RecordStore::from_records(vec![record])
    }

    #[tokio::test]
    async fn test_busy_state_brackets_the_request() {
        let mut pipeline = pipeline_with(Ok(TransportResponse::new(
            200,
            r#"{"status":"success","message":"done"}"#,
        )));
        let mut selection = SelectionState::new();
        selection.toggle(0, true);
        let mut view = RecordingView::new();

        let result = pipeline.submit(&records(), &selection, &mut view).await;

        assert!(result.is_success());
        assert_eq!(
            view.calls,
            vec![
                ViewCall::Loader(true),
                ViewCall::SubmitEnabled(false),
                ViewCall::Status(StatusLine::neutral(IN_PROGRESS_TEXT)),
                ViewCall::Loader(false),
                ViewCall::SubmitEnabled(true),
                ViewCall::Status(StatusLine::success("Success! done")),
            ]
        );
        assert_eq!(pipeline.phase(), SubmissionPhase::Idle);
    }

    #[tokio::test]
    async fn test_network_failure_still_releases_the_ui() {
        let mut pipeline = pipeline_with(Err(TransportError::Network("connection refused".into())));
        let mut selection = SelectionState::new();
        selection.toggle(0, true);
        let mut view = RecordingView::new();

        let result = pipeline.submit(&records(), &selection, &mut view).await;

        assert_eq!(result.status, SubmissionStatus::Failure);
        assert_eq!(result.message, "An error occurred: connection refused");
        assert_eq!(result.tone, Tone::Error);
        assert!(view.submit_enabled);
        assert!(!view.loader_visible);
        assert!(!pipeline.is_busy());
    }

    #[tokio::test]
    async fn test_empty_selection_never_touches_the_ui_bracket() {
        let mut pipeline = pipeline_with(Ok(TransportResponse::new(500, "")));
        let mut view = RecordingView::new();

        let result = pipeline
            .submit(&records(), &SelectionState::new(), &mut view)
            .await;

        assert_eq!(result.tone, Tone::Warning);
        assert_eq!(
            view.calls,
            vec![ViewCall::Status(StatusLine::warning(
                "Please select at least one question."
            ))]
        );
    }
}
