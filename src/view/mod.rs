//! 视图层
//!
//! 核心状态通过 [`QuestionView`] 推送到界面；界面本身不持有任何业务状态

pub mod binder;
pub mod recording;
pub mod terminal;

pub use binder::{counter_text, project};
pub use recording::{RecordingView, ViewCall};
pub use terminal::TerminalView;

use crate::selection::SelectionCounts;

/// 状态栏颜色约定
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tone {
    /// 进行中 / 普通提示
    #[default]
    Neutral,
    /// 绿色
    Success,
    /// 橙色，输入校验提示
    Warning,
    /// 红色
    Error,
}

/// 状态栏，所有提示共用这一行
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub tone: Tone,
}

impl StatusLine {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    pub fn neutral(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Neutral)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Success)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Warning)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Error)
    }

    /// 清空状态栏
    pub fn cleared() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// 列表中的一项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewItem {
    pub index: usize,
    pub text: String,
    /// 小写题型，用于着色
    pub type_key: String,
    /// 大写题型徽标
    pub badge: String,
    pub checked: bool,
}

pub trait QuestionView {
    /// 整体重建题目列表
    fn render_items(&mut self, items: &[ViewItem]);
    /// 只刷新计数
    fn render_counts(&mut self, counts: &SelectionCounts);
    fn set_status(&mut self, status: &StatusLine);
    fn set_selection_area_visible(&mut self, visible: bool);
    fn set_submit_enabled(&mut self, enabled: bool);
    fn set_loader_visible(&mut self, visible: bool);
}
