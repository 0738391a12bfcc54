//! 无界面视图：记录收到的每一次调用
//!
//! 用于脚本化运行和测试

use crate::selection::SelectionCounts;
use crate::view::{counter_text, QuestionView, StatusLine, ViewItem};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCall {
    Items(usize),
    Counts(usize),
    Status(StatusLine),
    SelectionArea(bool),
    SubmitEnabled(bool),
    Loader(bool),
}

#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    pub items: Vec<ViewItem>,
    pub counts: SelectionCounts,
    pub counter: String,
    pub status: StatusLine,
    pub selection_area_visible: bool,
    pub submit_enabled: bool,
    pub loader_visible: bool,
    pub calls: Vec<ViewCall>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前被勾选的列表项索引
    pub fn checked_indices(&self) -> Vec<usize> {
        self.items
            .iter()
            .filter(|item| item.checked)
            .map(|item| item.index)
            .collect()
    }
}

impl QuestionView for RecordingView {
    fn render_items(&mut self, items: &[ViewItem]) {
        self.items = items.to_vec();
        self.calls.push(ViewCall::Items(items.len()));
    }

    fn render_counts(&mut self, counts: &SelectionCounts) {
        self.counts = counts.clone();
        self.counter = counter_text(counts);
        self.calls.push(ViewCall::Counts(counts.total));
    }

    fn set_status(&mut self, status: &StatusLine) {
        self.status = status.clone();
        self.calls.push(ViewCall::Status(status.clone()));
    }

    fn set_selection_area_visible(&mut self, visible: bool) {
        self.selection_area_visible = visible;
        self.calls.push(ViewCall::SelectionArea(visible));
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
        self.calls.push(ViewCall::SubmitEnabled(enabled));
    }

    fn set_loader_visible(&mut self, visible: bool) {
        self.loader_visible = visible;
        self.calls.push(ViewCall::Loader(visible));
    }
}
